//! Route descriptor builders.
//!
//! `Route` produces plain descriptors from a verb, a URI fragment and a
//! handler reference. `RouteGroup` rewrites a batch of descriptors with a
//! shared middleware, URI prefix and base segment before handing them to
//! the registry, mirroring grouped route definitions:
//!
//! ```text
//! RouteGroup::new()
//!     .base("api")
//!     .prefix("v1")
//!     .middleware(token)
//!     .group(vec![Route::get("users", users_index)], &registry)?;
//! // registers GET /api/v1/users, guarded by `token`
//! ```

use crate::routing::descriptor::{HandlerRef, RouteDescriptor};
use crate::routing::registry::{RouteRegistry, RoutingError};

/// Compose `/base/prefix/uri`, collapsing redundant slashes.
///
/// Composition is idempotent: fragments with or without leading slashes
/// produce the same normalized path. An empty composition yields `/`.
pub fn compose_uri(base: Option<&str>, prefix: Option<&str>, uri: &str) -> String {
    let segments: Vec<&str> = [base.unwrap_or(""), prefix.unwrap_or(""), uri]
        .iter()
        .flat_map(|fragment| fragment.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect();

    format!("/{}", segments.join("/"))
}

/// Descriptor builders for individual routes.
pub struct Route;

impl Route {
    /// Build a descriptor for any HTTP verb the framework accepts.
    pub fn on(verb: impl Into<String>, uri: impl Into<String>, handler: HandlerRef) -> RouteDescriptor {
        RouteDescriptor::new(verb, uri, handler)
    }

    pub fn get(uri: impl Into<String>, handler: HandlerRef) -> RouteDescriptor {
        Self::on("GET", uri, handler)
    }

    pub fn post(uri: impl Into<String>, handler: HandlerRef) -> RouteDescriptor {
        Self::on("POST", uri, handler)
    }

    pub fn put(uri: impl Into<String>, handler: HandlerRef) -> RouteDescriptor {
        Self::on("PUT", uri, handler)
    }

    pub fn patch(uri: impl Into<String>, handler: HandlerRef) -> RouteDescriptor {
        Self::on("PATCH", uri, handler)
    }

    pub fn delete(uri: impl Into<String>, handler: HandlerRef) -> RouteDescriptor {
        Self::on("DELETE", uri, handler)
    }
}

/// Shared settings applied to a batch of descriptors before registration.
#[derive(Debug, Clone, Default)]
pub struct RouteGroup {
    middleware: Option<HandlerRef>,
    prefix: Option<String>,
    base: Option<String>,
}

impl RouteGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every request through the given middleware before the
    /// controller. One middleware per route; calling again replaces it.
    pub fn middleware(mut self, reference: HandlerRef) -> Self {
        self.middleware = Some(reference);
        self
    }

    /// Prepend a prefix segment to every URI in the group.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Prepend a base segment (before the prefix) to every URI.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Rewrite one descriptor with this group's settings.
    pub fn apply(&self, mut descriptor: RouteDescriptor) -> RouteDescriptor {
        if let Some(middleware) = &self.middleware {
            descriptor.set_middleware(middleware.clone());
        }

        descriptor.uri = compose_uri(
            self.base.as_deref(),
            self.prefix.as_deref(),
            &descriptor.uri,
        );

        descriptor
    }

    /// Rewrite and register every descriptor, in order. The first failure
    /// aborts the batch (the registry has already wiped the cache file).
    pub fn group(
        &self,
        descriptors: Vec<RouteDescriptor>,
        registry: &RouteRegistry,
    ) -> Result<(), RoutingError> {
        for descriptor in descriptors {
            registry.register(self.apply(descriptor))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> HandlerRef {
        HandlerRef::new("app::users", "UsersController", "index")
    }

    #[test]
    fn compose_collapses_slashes() {
        assert_eq!(compose_uri(Some("api"), Some("v1"), "users"), "/api/v1/users");
        assert_eq!(compose_uri(Some("api"), Some("v1"), "/users"), "/api/v1/users");
        assert_eq!(compose_uri(Some("/api/"), Some("/v1/"), "//users"), "/api/v1/users");
        assert_eq!(compose_uri(None, None, "users"), "/users");
        assert_eq!(compose_uri(None, None, ""), "/");
    }

    #[test]
    fn builders_carry_verb_uri_and_triple() {
        let descriptor = Route::post("users", handler());
        assert_eq!(descriptor.verb, "POST");
        assert_eq!(descriptor.uri, "users");
        assert_eq!(descriptor.handler_ref(), handler());

        let descriptor = Route::on("OPTIONS", "/users", handler());
        assert_eq!(descriptor.verb, "OPTIONS");
    }

    #[test]
    fn group_apply_rewrites_uri_and_middleware() {
        let token = HandlerRef::new("app::token", "TokenMiddleware", "handle");
        let group = RouteGroup::new().base("api").prefix("v1").middleware(token.clone());

        let rewritten = group.apply(Route::get("/users", handler()));
        assert_eq!(rewritten.uri, "/api/v1/users");
        assert_eq!(rewritten.middleware_ref(), Some(token));
    }

    #[test]
    fn group_without_settings_only_normalizes() {
        let rewritten = RouteGroup::new().apply(Route::get("ping", handler()));
        assert_eq!(rewritten.uri, "/ping");
        assert!(rewritten.middleware_ref().is_none());
    }
}
