//! The persisted route registry.
//!
//! # Responsibilities
//! - Validate descriptors against the handler registry before acceptance
//! - Enforce (verb, uri) uniqueness across the whole table
//! - Persist descriptors, in registration order, to `route.json`
//!
//! # Design Decisions
//! - Any rejected descriptor wipes the whole cache file first: the next
//!   boot either sees a fully valid table or none at all
//! - The file is rewritten in full on every register call, atomically;
//!   registration runs once during single-threaded bootstrap
//! - URIs are normalized (leading slash, collapsed slashes) on entry so
//!   uniqueness is checked on canonical paths

use std::path::{Path, PathBuf};

use axum::http::Method;
use axum::routing::MethodFilter;
use thiserror::Error;

use crate::paths::ProjectPaths;
use crate::routing::builder::compose_uri;
use crate::routing::descriptor::{HandlerRef, RouteDescriptor};
use crate::routing::handlers::HandlerRegistry;
use crate::storage;

/// Error raised during route registration or mounting.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no registered {kind} '{class}::{method}' in module '{module}'")]
    UnresolvedHandler {
        kind: &'static str,
        module: String,
        class: String,
        method: String,
    },

    #[error("two routes cannot share the same verb and uri, [{verb}] - [{uri}]")]
    DuplicateRoute { verb: String, uri: String },

    #[error("unsupported HTTP verb '{0}'")]
    InvalidVerb(String),

    #[error("route cache io: {0}")]
    Io(#[from] std::io::Error),

    #[error("route cache parse: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RoutingError {
    pub(crate) fn unresolved(kind: &'static str, reference: &HandlerRef) -> Self {
        Self::UnresolvedHandler {
            kind,
            module: reference.module.clone(),
            class: reference.class.clone(),
            method: reference.method.clone(),
        }
    }
}

/// Owns the persisted route table during the registration phase.
pub struct RouteRegistry {
    path: PathBuf,
    handlers: HandlerRegistry,
}

impl RouteRegistry {
    pub fn new(paths: &ProjectPaths, handlers: HandlerRegistry) -> Self {
        Self {
            path: paths.route_cache_file(),
            handlers,
        }
    }

    /// The backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The handler registry routes are validated against.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Delete the persisted table if present. Runs at the start of every
    /// bootstrap so stale routes never leak into a new process.
    pub fn clear(&self) -> Result<(), RoutingError> {
        if storage::remove_if_exists(&self.path)? {
            tracing::debug!(path = %self.path.display(), "route cache cleared");
        }
        Ok(())
    }

    /// Read the persisted descriptors. An absent file is zero routes.
    pub fn load(&self) -> Result<Vec<RouteDescriptor>, RoutingError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Validate and persist one descriptor.
    ///
    /// On any failure the whole cache file is wiped before the error is
    /// returned, so prior descriptors of the same batch never survive a
    /// partially valid registration run.
    pub fn register(&self, mut descriptor: RouteDescriptor) -> Result<(), RoutingError> {
        descriptor.uri = compose_uri(None, None, &descriptor.uri);

        // Mount can only wire verbs the framework's method filter knows;
        // anything else must be rejected here, not at boot.
        let supported = Method::from_bytes(descriptor.verb.as_bytes())
            .ok()
            .and_then(|method| MethodFilter::try_from(method).ok());
        if supported.is_none() {
            self.clear()?;
            return Err(RoutingError::InvalidVerb(descriptor.verb));
        }

        let handler = descriptor.handler_ref();
        if self.handlers.resolve_controller(&handler).is_none() {
            self.clear()?;
            return Err(RoutingError::unresolved("controller", &handler));
        }

        if let Some(middleware) = descriptor.middleware_ref() {
            if self.handlers.resolve_middleware(&middleware).is_none() {
                self.clear()?;
                return Err(RoutingError::unresolved("middleware", &middleware));
            }
        }

        let mut routes = self.load()?;
        for existing in &routes {
            if existing.verb == descriptor.verb && existing.uri == descriptor.uri {
                self.clear()?;
                return Err(RoutingError::DuplicateRoute {
                    verb: descriptor.verb,
                    uri: descriptor.uri,
                });
            }
        }

        tracing::debug!(
            verb = %descriptor.verb,
            uri = %descriptor.uri,
            handler = %handler,
            "route registered"
        );

        routes.push(descriptor);
        storage::write_atomic(&self.path, &serde_json::to_vec(&routes)?)?;
        Ok(())
    }
}
