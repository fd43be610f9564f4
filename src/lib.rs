pub mod cli;
pub mod entity;
pub mod error;
pub mod logging;
pub mod render;
pub mod server;
pub mod storage;

pub use entity::{Note, NoteCollection};
pub use error::{JotterError, Result};
pub use render::IndexTemplate;
pub use storage::Datastore;
