//! HTTP Server configuration and startup.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{delete, get},
};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use currency_types::{CurrencyRepository, QuoteProvider};

use super::handlers::{self, AppState};
use crate::CurrencyService;
use crate::openapi::ApiDoc;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on requests processed at once.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 512;

/// HTTP Server for the Currency API.
pub struct HttpServer<R: CurrencyRepository, Q: QuoteProvider> {
    state: Arc<AppState<R, Q>>,
    request_timeout: Duration,
    max_concurrent_requests: usize,
}

impl<R: CurrencyRepository, Q: QuoteProvider> HttpServer<R, Q> {
    /// Creates a new HTTP server with the default limits.
    pub fn new(service: CurrencyService<R, Q>) -> Self {
        Self::with_limits(
            service,
            DEFAULT_REQUEST_TIMEOUT,
            DEFAULT_MAX_CONCURRENT_REQUESTS,
        )
    }

    /// Creates a new HTTP server with a custom timeout and concurrency bound.
    pub fn with_limits(
        service: CurrencyService<R, Q>,
        request_timeout: Duration,
        max_concurrent_requests: usize,
    ) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            request_timeout,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let api = Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/currency",
                get(handlers::list_currencies::<R, Q>).post(handlers::create_currency::<R, Q>),
            )
            .route("/currency/{id}", delete(handlers::delete_currency::<R, Q>))
            .route("/currency/convert", get(handlers::convert::<R, Q>))
            .route("/currency/api-convert", get(handlers::convert_live::<R, Q>))
            .with_state(self.state.clone());

        api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(GlobalConcurrencyLimitLayer::new(self.max_concurrent_requests))
            .layer(TimeoutLayer::new(self.request_timeout))
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
