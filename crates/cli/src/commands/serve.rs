use anyhow::Result;
use std::sync::Arc;
use wortschatz_core::AppConfig;
use wortschatz_http::{AppState, serve};

pub(crate) async fn run(mut config: AppConfig, port: Option<u16>, host: Option<String>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }
    let host = config.server.host.clone();
    let port = config.server.port;

    tracing::info!(
        database = %config.paths.database.display(),
        translations = %config.paths.translations.display(),
        dump_on_write = config.storage.dump_on_write,
        "opening storage"
    );
    let state = Arc::new(AppState::open(config)?);
    serve(state, &host, port).await
}
