//! AppBuilder for fluent assembly of CRUD backends
//!
//! # Example
//!
//! ```ignore
//! let state = CrudState::new("tasks", service, authorizer);
//! AppBuilder::new()
//!     .mount("/api/tasks", crud_routes(state))
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder assembling resource routers into one application.
#[derive(Default)]
pub struct AppBuilder {
    resources: Vec<(String, Router)>,
    custom_routes: Vec<Router>,
    permissive_cors: bool,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a resource router under a path, e.g.
    /// `.mount("/api/tasks", crud_routes(state))`.
    pub fn mount(mut self, path: &str, routes: Router) -> Self {
        self.resources.push((path.to_string(), routes));
        self
    }

    /// Add routes that don't fit the CRUD pattern (login, webhooks, ...).
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Apply a permissive CORS layer.
    pub fn with_permissive_cors(mut self, enabled: bool) -> Self {
        self.permissive_cors = enabled;
        self
    }

    /// Build the application router: health routes, every mounted resource,
    /// custom routes, then the HTTP trace layer (and CORS when enabled).
    pub fn build(self) -> Router {
        let mut app = health_routes();

        for (path, routes) in self.resources {
            app = app.nest(&path, routes);
        }
        for routes in self.custom_routes {
            app = app.merge(routes);
        }

        let mut app = app.layer(TraceLayer::new_for_http());
        if self.permissive_cors {
            app = app.layer(CorsLayer::permissive());
        }
        app
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds the address, serves requests and drains on SIGTERM or Ctrl+C.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        }
    }
}

/// Install a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
