//! HTTP front door: `GET /` renders the notes, `POST /save` replaces them.

pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::entity::NoteCollection;
use crate::error::{JotterError, Result};
use crate::render::IndexTemplate;
use crate::storage::Datastore;

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState {
    pub datastore: Datastore,
    /// Held across the file write on save, which serializes saves.
    pub notes: Mutex<NoteCollection>,
    pub template: IndexTemplate,
}

impl AppState {
    pub fn new(datastore: Datastore, notes: NoteCollection, template: IndexTemplate) -> Self {
        Self {
            datastore,
            notes: Mutex::new(notes),
            template,
        }
    }

    /// Persist `incoming`, then make it the in-memory collection.
    ///
    /// Runs as its own task so the write and the swap both happen even when
    /// the caller is dropped halfway through.
    pub async fn replace_notes(self: Arc<Self>, incoming: NoteCollection) -> Result<usize> {
        tokio::spawn(async move {
            let mut notes = self.notes.lock().await;
            let datastore = self.datastore.clone();
            let saved = tokio::task::spawn_blocking(move || {
                datastore.save(&incoming).map(|()| incoming)
            })
            .await
            .map_err(|e| JotterError::Server(format!("save task failed: {}", e)))??;
            let count = saved.len();
            *notes = saved;
            Ok::<usize, JotterError>(count)
        })
        .await
        .map_err(|e| JotterError::Server(format!("save task failed: {}", e)))?
    }

    /// Build state with the collection read from `datastore`.
    pub fn load(datastore: Datastore, template: IndexTemplate) -> Self {
        let notes = datastore.load();
        Self::new(datastore, notes, template)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/save", post(routes::save))
        // Every save carries the whole collection.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` is cancelled.
pub async fn serve(addr: &str, state: Arc<AppState>, shutdown: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| JotterError::Server(format!("failed to bind {}: {}", addr, e)))?;
    serve_listener(listener, state, shutdown).await
}

/// Serve on an already bound listener until `shutdown` is cancelled.
pub async fn serve_listener(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: CancellationToken,
) -> Result<()> {
    let local = listener.local_addr()?;
    info!(addr = %local, "listening on http://{}", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("server stopped");
    Ok(())
}
