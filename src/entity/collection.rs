// src/entity/collection.rs
use serde::{Deserialize, Serialize};

use super::Note;
use crate::Result;

/// The ordered set of all notes. Order is display order.
///
/// Always replaced wholesale: there is no per-note insert, update or delete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteCollection(Vec<Note>);

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.0
    }

    /// Compact JSON array, the same shape the datastore file holds.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Decode a JSON array of notes. `null` decodes to an empty collection.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let notes: Option<Vec<Note>> = serde_json::from_slice(bytes)?;
        Ok(Self(notes.unwrap_or_default()))
    }
}

impl From<Vec<Note>> for NoteCollection {
    fn from(notes: Vec<Note>) -> Self {
        Self(notes)
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
