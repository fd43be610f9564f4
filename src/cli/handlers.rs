use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::ServeConfig;
use crate::error::Result;
use crate::render::IndexTemplate;
use crate::server::{self, AppState};
use crate::storage::Datastore;

/// Load the template and datastore, then serve until Ctrl-C.
///
/// Template problems abort here, before anything binds.
pub fn handle_serve(config: ServeConfig) -> Result<()> {
    let template = IndexTemplate::load(&config.template)?;
    info!(template = %config.template.display(), "loaded template");

    let datastore = Datastore::new(&config.datastore);
    let notes = datastore.load();
    info!(datastore = %config.datastore.display(), count = notes.len(), "loaded notes");
    let state = Arc::new(AppState::new(datastore, notes, template));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let shutdown = CancellationToken::new();

        let on_signal = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("shutting down");
                    on_signal.cancel();
                }
                Err(e) => warn!(error = %e, "could not listen for Ctrl-C"),
            }
        });

        server::serve(config.bind.as_str(), state, shutdown).await
    })
}
