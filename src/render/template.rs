// src/render/template.rs
//! The index page template.
//!
//! Templates are plain HTML with `{{ name }}` placeholders. They are parsed
//! once at startup so a broken template stops the server before it binds,
//! and rendering afterwards cannot fail.

use std::fs;
use std::io;
use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_script, encode_text};
use tracing::warn;

use crate::entity::{Note, NoteCollection};
use crate::error::{JotterError, Result};

/// Default template location, relative to the working directory.
pub const DEFAULT_TEMPLATE: &str = "templates/index.html";

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Notes as an HTML list.
    Notes,
    /// Notes as a JSON array, safe inside `<script>`.
    NotesJson,
    /// Number of notes.
    Count,
}

impl Slot {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "notes" => Some(Slot::Notes),
            "notes_json" => Some(Slot::NotesJson),
            "count" => Some(Slot::Count),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

#[derive(Debug, Clone)]
pub struct IndexTemplate {
    segments: Vec<Segment>,
}

impl IndexTemplate {
    /// Read and parse a template file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => JotterError::TemplateNotFound(path.to_path_buf()),
            _ => JotterError::Io(e),
        })?;
        Self::from_source(&source)
    }

    pub fn from_source(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }

            let after_open = &rest[start + OPEN.len()..];
            let end = after_open.find(CLOSE).ok_or_else(|| JotterError::TemplateParse {
                line: line_of(source, offset + start),
                message: "unterminated placeholder".to_string(),
            })?;

            let name = after_open[..end].trim();
            let slot = Slot::from_name(name).ok_or_else(|| JotterError::TemplateParse {
                line: line_of(source, offset + start),
                message: format!("unknown placeholder '{}'", name),
            })?;
            segments.push(Segment::Slot(slot));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            rest = &rest[consumed..];
            offset += consumed;
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn render(&self, notes: &NoteCollection) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(Slot::Notes) => render_list(notes, &mut out),
                Segment::Slot(Slot::NotesJson) => {
                    let json = notes.to_json().unwrap_or_else(|e| {
                        warn!(error = %e, "failed to encode notes for template");
                        "[]".to_string()
                    });
                    out.push_str(&encode_script(&json));
                }
                Segment::Slot(Slot::Count) => out.push_str(&notes.len().to_string()),
            }
        }
        out
    }
}

fn line_of(source: &str, byte_offset: usize) -> usize {
    source[..byte_offset].matches('\n').count() + 1
}

fn render_list(notes: &NoteCollection, out: &mut String) {
    out.push_str("<ul class=\"notes\">\n");
    if notes.is_empty() {
        out.push_str("  <li class=\"empty\">No notes yet.</li>\n");
    }
    for note in notes {
        render_note(note, out);
    }
    out.push_str("</ul>");
}

fn render_note(note: &Note, out: &mut String) {
    out.push_str(&format!(
        "  <li class=\"note\">\n    <h2 class=\"note-title\">{}</h2>\n    <time datetime=\"{}\">{}</time>\n    <pre class=\"note-body\">{}</pre>\n  </li>\n",
        encode_text(&note.title),
        encode_double_quoted_attribute(&note.date.to_rfc3339()),
        note.date.format("%Y-%m-%d %H:%M"),
        encode_text(&note.body),
    ));
}
