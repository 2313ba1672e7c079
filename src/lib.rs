//! Laravel-style conveniences over axum.
//!
//! Routes are declared as descriptors, validated against a typed handler
//! registry, persisted to a JSON cache file during bootstrap, and mounted
//! into a live [`axum::Router`] at boot.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod kernel;
pub mod paths;
pub mod routing;
pub mod storage;

pub use config::cache::{ConfigCache, ConfigError};
pub use config::schema::ConfigSections;
pub use http::request::RequestContext;
pub use http::response::JsonResponse;
pub use kernel::{HttpKernel, KernelError};
pub use paths::ProjectPaths;
pub use routing::builder::{Route, RouteGroup};
pub use routing::descriptor::{HandlerRef, RouteDescriptor};
pub use routing::handlers::{HandlerRegistry, Next};
pub use routing::registry::{RouteRegistry, RoutingError};
