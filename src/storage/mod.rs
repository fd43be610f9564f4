mod json_store;

pub use json_store::{Datastore, DEFAULT_DATASTORE};
