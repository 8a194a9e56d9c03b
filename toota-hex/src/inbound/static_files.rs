//! Static file serving from `static_root` under `static_url`.

use axum::Router;
use tower_http::{compression::CompressionLayer, services::ServeDir};

use toota_types::{Settings, StorageBackend};

/// Builds the router that serves collected static files.
pub(crate) fn static_router(settings: &Settings) -> Router {
    let serve_dir = match settings.storages {
        StorageBackend::FileSystem => ServeDir::new(&settings.static_root),
        StorageBackend::CompressedStatic => ServeDir::new(&settings.static_root)
            .precompressed_br()
            .precompressed_gzip(),
    };

    let prefix = settings.static_url.trim_matches('/');
    let router = if prefix.is_empty() {
        Router::new().fallback_service(serve_dir)
    } else {
        Router::new().nest_service(&format!("/{}", prefix), serve_dir)
    };

    match settings.storages {
        StorageBackend::FileSystem => router,
        StorageBackend::CompressedStatic => router.layer(CompressionLayer::new()),
    }
}
