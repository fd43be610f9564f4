mod collection;
mod note;

pub use collection::NoteCollection;
pub use note::{zero_date, Note};
