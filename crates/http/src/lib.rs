//! HTTP server for wortschatz: HTML forms over the topic tables plus a small
//! read-only JSON API.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(unused_results, reason = "Some results are intentionally ignored")]
#![allow(clippy::let_underscore_untyped, reason = "Type is clear from context")]
#![allow(let_underscore_drop, reason = "Intentionally dropping values")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod blocking;
mod handlers;
mod pages;
mod query_types;
mod response_types;

use axum::{Json, Router, routing::get};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use wortschatz_core::{AppConfig, Identifier, Topic};
use wortschatz_storage::{Storage, StorageError, TranslationStore};

pub use response_types::{TopicListResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for thread-safe sharing across handlers.
pub struct AppState {
    /// Pooled access to the topic tables
    pub storage: Arc<Storage>,
    /// Topic display labels
    pub translations: Arc<TranslationStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Open the database and the translations document named in `config`.
    ///
    /// # Errors
    /// Returns error if either cannot be opened.
    pub fn open(config: AppConfig) -> Result<Self, StorageError> {
        let storage = Storage::from_config(&config)?;
        let translations = TranslationStore::open(&config.paths.translations)?;
        Ok(Self {
            storage: Arc::new(storage),
            translations: Arc::new(translations),
            config: Arc::new(config),
        })
    }

    /// `name` with its display label.
    #[must_use]
    pub fn topic(&self, name: Identifier) -> Topic {
        let label = self.translations.label_for(name.as_str());
        Topic { name, label }
    }

    /// Where writes refresh the CSV dump, if dumping is enabled.
    #[must_use]
    pub fn dump_dir(&self) -> Option<PathBuf> {
        self.config.storage.dump_on_write.then(|| self.config.paths.dump.clone())
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::topics::home))
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route(
            "/topics/new",
            get(handlers::topics::new_topic_form).post(handlers::topics::create_topic),
        )
        .route("/topics/{topic}", get(handlers::topics::show_topic))
        .route(
            "/topics/{topic}/add",
            get(handlers::entries::add_form).post(handlers::entries::add_entry),
        )
        .route(
            "/topics/{topic}/edit",
            get(handlers::entries::edit_form).post(handlers::entries::edit_entry),
        )
        .route("/api/topics", get(handlers::api::list_topics))
        .route("/api/topics/{topic}", get(handlers::api::get_topic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `host:port` and serve until the process is stopped.
///
/// # Errors
/// Returns error if the address cannot be bound or the server fails.
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("wortschatz listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
