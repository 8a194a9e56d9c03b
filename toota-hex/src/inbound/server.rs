//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use toota_types::{DatabaseProbe, Middleware, Settings};

use super::csrf::csrf_middleware;
use super::handlers::{self, AppState};
use super::hosts::allowed_hosts_middleware;
use super::security::{clickjacking_header, security_headers};
use super::static_files::static_router;

/// HTTP Server for the Toota backend.
pub struct HttpServer<D: DatabaseProbe> {
    state: Arc<AppState<D>>,
}

impl<D: DatabaseProbe> HttpServer<D> {
    /// Creates a new HTTP server from resolved settings and a database handle.
    pub fn new(settings: Arc<Settings>, database: D) -> Self {
        Self {
            state: Arc::new(AppState { settings, database }),
        }
    }

    /// Builds the Axum router, layering middleware in settings order.
    ///
    /// Layers added later wrap earlier ones, so the stack is applied from the
    /// innermost entry (`Clickjacking`) outwards to `Security`.
    pub fn router(&self) -> Router {
        let settings = &self.state.settings;

        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        let mut router = Router::new()
            .route("/health", get(handlers::health))
            .route("/health/ready", get(handlers::ready::<D>))
            .with_state(self.state.clone());

        // The dev server serves static files itself.
        if settings.debug || settings.has_middleware(Middleware::StaticFiles) {
            router = router.merge(static_router(settings));
        }

        if settings.has_middleware(Middleware::Clickjacking) {
            router = clickjacking_header(router);
        }
        if settings.has_middleware(Middleware::Csrf) {
            router = router.layer(middleware::from_fn_with_state(
                settings.clone(),
                csrf_middleware,
            ));
        }
        if settings.has_middleware(Middleware::Common) {
            router = router.layer(middleware::from_fn_with_state(
                settings.clone(),
                allowed_hosts_middleware,
            ));
        }
        if settings.has_middleware(Middleware::Security) {
            router = security_headers(router, settings);
        }

        router
            .layer(metrics)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            profile = %self.state.settings.profile,
            "Server listening on {}",
            listener.local_addr()?
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
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
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
