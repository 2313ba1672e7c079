//! Bootstrap kernel.
//!
//! # Data Flow
//! ```text
//! HttpKernel::bootstrap(paths, sections, handlers)
//!     wipe previous caches (config + routes)
//!     → mount fresh config snapshot
//!     → caller registers routes against kernel.routes()
//!     → into_app():
//!         dispatch::mount (persisted routes → axum handlers)
//!         + CORS layer from the cors section
//!         + request tracing layer
//!         + JSON 404 fallback
//! ```
//!
//! # Design Decisions
//! - Caches never survive a boot: every process starts from a clean
//!   slate and rebuilds both sidecar files
//! - The kernel owns the config cache and route registry; both are
//!   explicit objects handed to it, not globals
//! - A registration or mount failure aborts boot with the underlying
//!   error; the process must not serve a partial route table

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::cache::{ConfigCache, ConfigError};
use crate::config::schema::ConfigSections;
use crate::dispatch;
use crate::http::response::JsonResponse;
use crate::paths::ProjectPaths;
use crate::routing::handlers::HandlerRegistry;
use crate::routing::registry::{RouteRegistry, RoutingError};

/// Error raised while booting the application.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("bootstrap io: {0}")]
    Io(#[from] std::io::Error),
}

/// Boot-phase context: wipes stale caches, mounts configuration and
/// hands out the route registry, then produces the final application.
pub struct HttpKernel {
    paths: ProjectPaths,
    config: ConfigCache,
    registry: RouteRegistry,
}

impl HttpKernel {
    /// Prepare a fresh boot: remove stale caches and mount the config
    /// snapshot. Route definitions run against `routes()` afterwards.
    pub fn bootstrap(
        paths: ProjectPaths,
        sections: ConfigSections,
        handlers: HandlerRegistry,
    ) -> Result<Self, KernelError> {
        paths.ensure_bootstrap_cache()?;

        let config = ConfigCache::new(&paths, sections);
        config.destroy()?;

        let registry = RouteRegistry::new(&paths, handlers);
        registry.clear()?;

        config.mount()?;

        tracing::info!(base = %paths.base().display(), "kernel bootstrapped");
        Ok(Self {
            paths,
            config,
            registry,
        })
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn config(&self) -> &ConfigCache {
        &self.config
    }

    /// The registry route definitions register against.
    pub fn routes(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Mount every persisted route and assemble the final application.
    pub fn into_app(self) -> Result<Router, KernelError> {
        let app = dispatch::mount(Router::new(), &self.registry)?;
        let cors = cors_layer(&self.config)?;

        if let Some(name) = self.config.app("name")? {
            tracing::info!(
                app = %name.as_str().unwrap_or_default(),
                version = %self
                    .config
                    .app("version")?
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default(),
                "application ready"
            );
        }

        Ok(app
            .fallback(|| async {
                JsonResponse::not_found(serde_json::json!({"error": "route not found"}))
            })
            .layer(cors)
            .layer(TraceLayer::new_for_http()))
    }
}

/// Translate the `cors` config section into a tower-http layer.
fn cors_layer(config: &ConfigCache) -> Result<CorsLayer, KernelError> {
    let mut layer = CorsLayer::new();

    match config.cors("allowed_origins")?.and_then(|v| v.as_str().map(str::to_string)) {
        Some(origins) if origins != "*" => {
            let parsed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            layer = layer.allow_origin(AllowOrigin::list(parsed));
        }
        _ => layer = layer.allow_origin(Any),
    }

    match config.cors("allowed_headers")?.and_then(|v| v.as_str().map(str::to_string)) {
        Some(headers) if headers != "*" => {
            let parsed: Vec<_> = headers
                .split(',')
                .filter_map(|header| header.trim().parse::<axum::http::HeaderName>().ok())
                .collect();
            layer = layer.allow_headers(AllowHeaders::list(parsed));
        }
        _ => layer = layer.allow_headers(Any),
    }

    if let Some(methods) = config.cors("allowed_methods")? {
        let parsed: Vec<Method> = methods
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|m| m.as_str())
            .filter_map(|m| m.parse().ok())
            .collect();
        if !parsed.is_empty() {
            layer = layer.allow_methods(AllowMethods::list(parsed));
        }
    }

    if let Some(max_age) = config.cors("max_age")?.and_then(|v| v.as_u64()) {
        layer = layer.max_age(Duration::from_secs(max_age));
    }

    Ok(layer)
}
