//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::state::AppState;
use super::system;
use crate::config::{AppConfig, CorsConfig};
use crate::core::auth::require_auth;
use crate::core::module::Module;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and text parts on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Builder for creating HTTP servers with auto-registered routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .register_module(CatalogModule)
///     .register_module(CommercialModule)
///     .build(state, &config)?;
/// ```
pub struct ServerBuilder {
    entity_registry: EntityRegistry,
    modules: Vec<Arc<dyn Module>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            entity_registry: EntityRegistry::new(),
            modules: Vec::new(),
        }
    }

    /// Register a module
    ///
    /// This will:
    /// 1. Register all entities from the module
    /// 2. Keep the module for its custom routes
    pub fn register_module(mut self, module: impl Module + 'static) -> Self {
        let module = Arc::new(module);
        module.register_entities(&mut self.entity_registry);
        self.modules.push(module);
        self
    }

    /// Names of the registered modules
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Entity types declared by the registered modules, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .modules
            .iter()
            .flat_map(|m| m.entity_types())
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Build the final router
    ///
    /// Every route except health checks and token refresh requires a bearer
    /// access token.
    pub fn build(self, state: AppState, config: &AppConfig) -> Result<Router> {
        let mut protected = self
            .entity_registry
            .build_routes()
            .merge(system::protected_routes());
        for module in &self.modules {
            protected = protected.merge(module.routes());
        }
        let protected = protected.route_layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            require_auth,
        ));

        let body_limit = state.upload.max_bytes + MULTIPART_OVERHEAD;
        let app = system::public_routes()
            .merge(protected)
            .with_state(state)
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(cors_layer(&config.cors)?)
            .layer(TraceLayer::new_for_http());

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, state: AppState, config: &AppConfig) -> Result<()> {
        let addr = config.server.socket_addr()?;
        let modules = self.module_names().join(", ");
        let app = self.build(state, config)?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        tracing::info!(%addr, modules = %modules, "server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// CORS for the configured front-end origins
///
/// A `*` entry allows any origin without credentials.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        },
    }
}
