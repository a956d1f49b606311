//! HTTP trigger server
//!
//! `GET /` serves an informational page and `GET /run` performs a run
//! synchronously, answering 200 on success and 500 on failure. The server
//! also owns the cron job when one is configured, so both live exactly as
//! long as the process serves requests.

mod page;

pub use page::{render_index, render_outcome, IndexTemplate, OutcomeTemplate};

use crate::run::Orchestrator;
use crate::schedule::CronJob;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
struct AppState {
    orchestrator: Arc<Orchestrator>,
    cron: Option<String>,
}

/// HTTP listener plus the optional background cron job
pub struct Server {
    router: Router,
    addr: SocketAddr,
    cron: Option<CronJob>,
}

impl Server {
    /// Builds the server and registers the cron job
    ///
    /// An invalid cron expression is logged and scheduled runs stay
    /// disabled; the HTTP trigger still works. Must be called from within a
    /// Tokio runtime.
    pub fn new(orchestrator: Arc<Orchestrator>, port: u16, cron: Option<&str>) -> Self {
        let job = cron.and_then(|expr| match CronJob::spawn(orchestrator.clone(), expr) {
            Ok(job) => Some(job),
            Err(e) => {
                tracing::error!("{}; scheduled runs disabled", e);
                None
            }
        });

        let router = Self::router(orchestrator, job.as_ref().map(|j| j.expr().to_string()));

        Self {
            router,
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            cron: job,
        }
    }

    /// Routes for the trigger endpoints
    pub fn router(orchestrator: Arc<Orchestrator>, cron: Option<String>) -> Router {
        let state = AppState { orchestrator, cron };
        Router::new()
            .route("/", get(index))
            .route("/run", get(trigger_run))
            .with_state(state)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn cron_job(&self) -> Option<&CronJob> {
        self.cron.as_ref()
    }

    /// Serves until Ctrl-C, then stops the cron job
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server terminates unexpectedly.
    pub async fn serve(self) -> Result<()> {
        tracing::info!("Starting HTTP trigger on {}", self.addr);
        let listener = TcpListener::bind(self.addr).await?;
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        if let Some(job) = &self.cron {
            job.stop();
        }
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn index(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    page_response(StatusCode::OK, render_index(state.cron.as_deref()))
}

async fn trigger_run(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    tracing::info!("Run triggered over HTTP");
    let outcome = state.orchestrator.run().await;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    page_response(status, render_outcome(&outcome))
}

fn page_response(status: StatusCode, page: askama::Result<String>) -> (StatusCode, Html<String>) {
    match page {
        Ok(body) => (status, Html(body)),
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("page rendering failed".to_string()),
            )
        }
    }
}
