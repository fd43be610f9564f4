use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::entity::NoteCollection;
use crate::error::{JotterError, Result};

/// Default datastore location, relative to the working directory.
pub const DEFAULT_DATASTORE: &str = "datastore.json";

const CORRUPT_SUFFIX: &str = "corrupt";

/// The on-disk JSON file holding the full note collection.
#[derive(Debug, Clone)]
pub struct Datastore {
    path: PathBuf,
}

impl Datastore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unparsable datastore is moved by [`Datastore::load`].
    ///
    /// `<name>.corrupt`, or `<name>.corrupt.N` with the lowest free `N` when
    /// earlier quarantined copies are still around.
    pub fn quarantine_path(&self) -> PathBuf {
        let mut base = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_DATASTORE.into());
        base.push(".");
        base.push(CORRUPT_SUFFIX);

        let first = self.path.with_file_name(&base);
        if !first.exists() {
            return first;
        }
        (1u32..)
            .map(|n| {
                let mut name = base.clone();
                name.push(format!(".{}", n));
                self.path.with_file_name(name)
            })
            .find(|candidate| !candidate.exists())
            .unwrap_or(first)
    }

    /// Read the collection from disk.
    ///
    /// Never fails: a missing, empty or unreadable file yields an empty
    /// collection. A file with content that does not decode as a JSON array
    /// of notes is first renamed to [`Datastore::quarantine_path`] so the
    /// next save cannot overwrite it.
    pub fn load(&self) -> NoteCollection {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no datastore yet, starting empty");
                return NoteCollection::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read datastore");
                return NoteCollection::new();
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            warn!(path = %self.path.display(), "datastore is empty");
            return NoteCollection::new();
        }

        match NoteCollection::from_json(&bytes) {
            Ok(notes) => {
                debug!(path = %self.path.display(), count = notes.len(), "loaded datastore");
                notes
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to parse datastore");
                self.quarantine();
                NoteCollection::new()
            }
        }
    }

    fn quarantine(&self) {
        let target = self.quarantine_path();
        match fs::rename(&self.path, &target) {
            Ok(()) => warn!(
                from = %self.path.display(),
                to = %target.display(),
                "moved unparsable datastore aside"
            ),
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not quarantine datastore"),
        }
    }

    /// Overwrite the datastore with `notes`.
    ///
    /// The JSON is written to a temp file beside the datastore, checked for
    /// length, synced, then renamed over the old file.
    pub fn save(&self, notes: &NoteCollection) -> Result<()> {
        let bytes = serde_json::to_vec(notes)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;

        let written = tmp.as_file().metadata()?.len();
        let expected = bytes.len() as u64;
        if written != expected {
            return Err(JotterError::ShortWrite { written, expected });
        }

        tmp.persist(&self.path)?;
        debug!(path = %self.path.display(), bytes = expected, count = notes.len(), "saved datastore");
        Ok(())
    }
}

impl Default for Datastore {
    fn default() -> Self {
        Self::new(DEFAULT_DATASTORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Note;
    use chrono::DateTime;
    use tempfile::TempDir;

    fn sample_notes() -> NoteCollection {
        NoteCollection::from(vec![
            Note {
                title: "Shopping".to_string(),
                body: "eggs\nmilk".to_string(),
                date: DateTime::parse_from_rfc3339("2024-05-01T08:30:00.25+02:00").unwrap(),
            },
            Note {
                title: "Ideas <b>".to_string(),
                body: "\"quoted\" & unicode ✓".to_string(),
                date: DateTime::parse_from_rfc3339("1999-12-31T23:59:59Z").unwrap(),
            },
        ])
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = Datastore::new(tmp.path().join("nope.json"));

        assert!(store.load().is_empty());
        assert!(!tmp.path().join("nope.json.corrupt").exists());
    }

    #[test]
    fn test_load_malformed_file_is_empty_and_quarantined() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("datastore.json");
        fs::write(&path, "{not json").unwrap();
        let store = Datastore::new(&path);

        assert!(store.load().is_empty());
        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(tmp.path().join("datastore.json.corrupt")).unwrap(),
            "{not json"
        );
    }

    #[test]
    fn test_second_quarantine_keeps_the_first() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("datastore.json");
        let store = Datastore::new(&path);

        fs::write(&path, "{first corrupt").unwrap();
        assert!(store.load().is_empty());
        fs::write(&path, "{second corrupt").unwrap();
        assert!(store.load().is_empty());
        fs::write(&path, "{third corrupt").unwrap();
        assert!(store.load().is_empty());

        let read = |name: &str| fs::read_to_string(tmp.path().join(name)).unwrap();
        assert_eq!(read("datastore.json.corrupt"), "{first corrupt");
        assert_eq!(read("datastore.json.corrupt.1"), "{second corrupt");
        assert_eq!(read("datastore.json.corrupt.2"), "{third corrupt");
        assert!(!path.exists());
    }

    #[test]
    fn test_null_datastore_is_empty_without_quarantine() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("datastore.json");
        fs::write(&path, "null").unwrap();

        assert!(Datastore::new(&path).load().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("datastore.json");
        fs::write(&path, r#"{"Title":"not an array"}"#).unwrap();

        assert!(Datastore::new(&path).load().is_empty());
    }

    #[test]
    fn test_load_blank_file_is_empty_without_quarantine() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("datastore.json");
        fs::write(&path, "  \n").unwrap();
        let store = Datastore::new(&path);

        assert!(store.load().is_empty());
        assert!(path.exists());
        assert!(!tmp.path().join("datastore.json.corrupt").exists());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = Datastore::new(tmp.path().join("datastore.json"));
        let notes = sample_notes();

        store.save(&notes).unwrap();
        let loaded = store.load();

        assert_eq!(loaded, notes);
        for (a, b) in loaded.iter().zip(notes.iter()) {
            assert_eq!(a.date.offset(), b.date.offset());
        }
    }

    #[test]
    fn test_file_mirrors_collection_json() {
        let tmp = TempDir::new().unwrap();
        let store = Datastore::new(tmp.path().join("datastore.json"));
        let notes = sample_notes();

        store.save(&notes).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), notes.to_json().unwrap());
    }

    #[test]
    fn test_save_replaces_previous_content() {
        let tmp = TempDir::new().unwrap();
        let store = Datastore::new(tmp.path().join("datastore.json"));

        store.save(&sample_notes()).unwrap();
        store.save(&NoteCollection::new()).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let store = Datastore::new(tmp.path().join("nested/dir/datastore.json"));

        store.save(&sample_notes()).unwrap();

        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let store = Datastore::new(tmp.path().join("datastore.json"));

        store.save(&sample_notes()).unwrap();

        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_fails_when_target_is_a_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("datastore.json");
        fs::create_dir(&path).unwrap();

        let result = Datastore::new(&path).save(&sample_notes());
        assert!(result.is_err());
    }

    #[test]
    fn test_quarantine_path_sits_beside_datastore() {
        let store = Datastore::new("/var/lib/jotter/notes.json");
        assert_eq!(
            store.quarantine_path(),
            PathBuf::from("/var/lib/jotter/notes.json.corrupt")
        );
    }
}
