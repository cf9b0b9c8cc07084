//! HTTP front of the site: server-rendered pages plus a small JSON API.
//!
//! [`WebChannel`] implements [`Component`]; `run()` drives the axum event
//! loop and the shared [`CancellationToken`] is wired to graceful shutdown.
//!
//! ## URL layout
//!
//! ```text
//! GET    /                                   home
//! GET    /projects
//! GET    /writing
//! GET    /writing/{slug}                     404 page when missing
//! GET    /reading
//! GET    /api/health
//! GET    /api/reading                        display-ready items
//! POST   /api/terminal/sessions              new overlay session
//! POST   /api/terminal/sessions/{id}/input   { line }
//! POST   /api/terminal/sessions/{id}/history { direction: previous|next }
//! POST   /api/terminal/sessions/{id}/clear
//! DELETE /api/terminal/sessions/{id}
//! GET    /favicon.ico                        204
//! *                                          404 page
//! ```

mod api;
mod assets;
pub mod pages;
mod state;

use axum::{
    Router,
    http::StatusCode,
    routing::{delete, get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AppError;
use crate::subsystems::runtime::{Component, ComponentFuture};

pub use state::SiteState;

pub struct WebChannel {
    bind_addr: String,
    state: SiteState,
}

impl WebChannel {
    pub fn new(bind_addr: impl Into<String>, state: SiteState) -> Self {
        Self { bind_addr: bind_addr.into(), state }
    }
}

impl Component for WebChannel {
    fn id(&self) -> &str {
        "web"
    }

    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
        Box::pin(run_web(self.bind_addr, self.state, shutdown))
    }
}

async fn run_web(
    bind_addr: String,
    state: SiteState,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::Web(format!("bind failed on {bind_addr}: {e}")))?;
    serve(listener, state, shutdown).await
}

/// Serve the site on an already-bound listener until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    state: SiteState,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let local = listener
        .local_addr()
        .map_err(|e| AppError::Web(format!("listener has no local address: {e}")))?;
    info!(bind = %local, "site listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Web(format!("server error: {e}")))?;

    info!("site shut down");
    Ok(())
}

pub fn build_router(state: SiteState) -> Router {
    Router::new()
        // Pages
        .route("/",                get(pages::home))
        .route("/projects",        get(pages::projects))
        .route("/writing",         get(pages::writing_index))
        .route("/writing/{slug}",  get(pages::writing_post))
        .route("/reading",         get(pages::reading))
        .route("/favicon.ico",     get(|| async { StatusCode::NO_CONTENT }))
        // API
        .route("/api/health",                          get(api::health))
        .route("/api/reading",                         get(api::reading))
        .route("/api/terminal/sessions",               post(api::terminal_open))
        .route("/api/terminal/sessions/{id}",          delete(api::terminal_close))
        .route("/api/terminal/sessions/{id}/input",    post(api::terminal_input))
        .route("/api/terminal/sessions/{id}/history",  post(api::terminal_history))
        .route("/api/terminal/sessions/{id}/clear",    post(api::terminal_clear))
        .fallback(pages::fallback)
        .with_state(state)
}
