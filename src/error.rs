use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JotterError {
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Template parse error on line {line}: {message}")]
    TemplateParse { line: usize, message: String },

    #[error("Short write: {written} of {expected} bytes reached disk")]
    ShortWrite { written: u64, expected: u64 },

    #[error("Failed to replace datastore: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JotterError>;
