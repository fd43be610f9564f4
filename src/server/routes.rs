//! Axum route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::response::Html;
use tracing::{debug, error, info};

use super::AppState;
use crate::entity::NoteCollection;

pub const SUCCESS: &str = "success";
pub const FAILURE: &str = "failure";

// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let notes = state.notes.lock().await;
    Html(state.template.render(&notes))
}

// POST /save
//
// Replaces the whole collection. Memory is only swapped once the new
// collection is on disk, so a failed save changes nothing.
pub async fn save(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> &'static str {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "could not read save body");
            return FAILURE;
        }
    };

    let incoming = match NoteCollection::from_json(&body) {
        Ok(notes) => notes,
        Err(e) => {
            debug!(error = %e, "rejected save payload");
            return FAILURE;
        }
    };

    match Arc::clone(&state).replace_notes(incoming).await {
        Ok(count) => {
            info!(count, "saved notes");
            SUCCESS
        }
        Err(e) => {
            error!(path = %state.datastore.path().display(), error = %e, "failed to write datastore");
            FAILURE
        }
    }
}
