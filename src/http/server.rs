//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all API handlers
//! - Wire up middleware (request id, tracing, timeout, body limit, CORS)
//! - Give every error response the `{"error": ...}` shape
//! - Hold the hot-swappable application state
//! - Serve until shutdown is signalled

use arc_swap::ArcSwap;
use axum::{
    extract::{DefaultBodyLimit, MatchedPath, Request},
    http::header,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::request::{request_id_of, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::error_response;
use crate::http::{catalog, quote, swap};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::registry::Registry;
use crate::router::{RouterClient, RouterError};

/// One consistent view of everything a handler needs.
#[derive(Debug)]
pub struct Inner {
    pub config: GatewayConfig,
    pub registry: Registry,
    pub router: RouterClient,
}

impl Inner {
    fn from_config(config: GatewayConfig) -> Result<Self, RouterError> {
        let router = RouterClient::new(&config.router, &config.retries)?;
        let registry = Registry::with_rpc_overrides(&config.chains.rpc_urls);
        Ok(Self {
            config,
            registry,
            router,
        })
    }
}

/// Application state injected into handlers.
///
/// Handlers take a snapshot per request, so a reload never mixes two
/// configurations within one call.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<ArcSwap<Inner>>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self, RouterError> {
        let inner = Inner::from_config(config)?;
        Ok(Self {
            inner: Arc::new(ArcSwap::from_pointee(inner)),
        })
    }

    pub fn snapshot(&self) -> Arc<Inner> {
        self.inner.load_full()
    }

    /// Replace the configuration. Listener, timeout and body limit keep
    /// their startup values.
    pub fn reload(&self, config: GatewayConfig) -> Result<(), RouterError> {
        let inner = Inner::from_config(config)?;
        self.inner.store(Arc::new(inner));
        Ok(())
    }
}

/// HTTP server for the gateway API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, RouterError> {
        let state = AppState::new(config)?;
        let router = Self::build_router(state.clone(), &state.snapshot().config);
        Ok(Self { router, state })
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, config: &GatewayConfig) -> Router {
        let cors = if config.security.permissive_cors {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        };

        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id_of(request),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(cors)
            .layer(middleware::from_fn(error_envelope))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));

        Router::new()
            .route("/api/prices", post(quote::get_prices))
            .route("/api/quote", post(quote::get_quote))
            .route("/api/swap", post(swap::execute_swap))
            .route("/api/chains", get(catalog::list_chains))
            .route("/api/tokens/{chain_key}", get(catalog::list_tokens))
            .route("/api/health", get(catalog::health))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(middleware)
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Configurations arriving on `config_updates` replace the state.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match state.reload(config) {
                    Ok(()) => tracing::info!("Configuration reloaded"),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to apply reloaded configuration")
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    metrics::record_request(&route, response.status().as_u16(), start);
    response
}

/// Error responses produced below the handlers (request timeout, unknown
/// route, wrong method) carry no body. Give them the API's error shape.
async fn error_envelope(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    if !is_error || response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }
    error_response(status, status.canonical_reason().unwrap_or("Request failed"))
}
