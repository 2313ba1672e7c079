//! Dispatch mounting.
//!
//! # Data Flow
//! ```text
//! bootstrap/cache/route.json
//!     → RouteRegistry::load (absent file ⇒ zero routes)
//!     → per descriptor, in order:
//!         resolve controller (and middleware) factories
//!         build an axum handler closure
//!         Router::route(uri, on(verb, closure))
//!     → final request-routable axum::Router
//! ```
//!
//! # Design Decisions
//! - Factories are resolved a second time here even though registration
//!   already validated them; a miss means the cache outlived the code
//!   that produced it and boot must fail
//! - Endpoint names derive from the uri (slashes to underscores) so log
//!   lines have stable, unique identifiers per route
//! - The middleware, when present, receives the pending controller
//!   binding and decides whether to forward or short-circuit

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::{Query, RawPathParams};
use axum::http::{Method, Request};
use axum::routing::{on, MethodFilter};
use axum::Router;

use crate::http::request::RequestContext;
use crate::routing::handlers::{ControllerFn, MiddlewareFn, Next};
use crate::routing::registry::{RouteRegistry, RoutingError};

/// Stable endpoint identifier for one route uri.
pub fn endpoint_name(uri: &str) -> String {
    uri.replace('/', "_")
}

/// Wire every persisted descriptor into the framework router.
///
/// Returns the router with all routes mounted, in registration order.
/// Zero persisted routes is a valid, non-error state.
pub fn mount(mut app: Router, registry: &RouteRegistry) -> Result<Router, RoutingError> {
    let descriptors = registry.load()?;
    let handlers = registry.handlers();

    for descriptor in descriptors {
        let handler_ref = descriptor.handler_ref();
        let controller = handlers
            .resolve_controller(&handler_ref)
            .ok_or_else(|| RoutingError::unresolved("controller", &handler_ref))?;

        let middleware = match descriptor.middleware_ref() {
            Some(reference) => Some(
                handlers
                    .resolve_middleware(&reference)
                    .ok_or_else(|| RoutingError::unresolved("middleware", &reference))?,
            ),
            None => None,
        };

        let method = Method::from_bytes(descriptor.verb.as_bytes())
            .map_err(|_| RoutingError::InvalidVerb(descriptor.verb.clone()))?;
        let filter = MethodFilter::try_from(method)
            .map_err(|_| RoutingError::InvalidVerb(descriptor.verb.clone()))?;

        let endpoint = endpoint_name(&descriptor.uri);
        tracing::debug!(
            verb = %descriptor.verb,
            uri = %descriptor.uri,
            endpoint = %endpoint,
            handler = %handler_ref,
            "route mounted"
        );

        app = app.route(
            &descriptor.uri,
            on(filter, route_handler(endpoint, controller, middleware)),
        );
    }

    Ok(app)
}

/// Build the per-request closure for one descriptor.
fn route_handler(
    endpoint: String,
    controller: ControllerFn,
    middleware: Option<MiddlewareFn>,
) -> impl Fn(
    RawPathParams,
    Query<HashMap<String, String>>,
    Request<Body>,
) -> crate::routing::handlers::HandlerFuture
       + Clone
       + Send
       + Sync
       + 'static {
    move |params: RawPathParams, Query(query): Query<HashMap<String, String>>, req: Request<Body>| {
        let endpoint = endpoint.clone();
        let controller = controller.clone();
        let middleware = middleware.clone();

        Box::pin(async move {
            tracing::trace!(endpoint = %endpoint, "dispatching request");

            let ctx = match RequestContext::from_request(params, query, req).await {
                Ok(ctx) => ctx,
                Err(response) => return response,
            };

            match middleware {
                Some(middleware) => middleware(ctx, Next::new(controller)).await,
                None => controller(ctx).await,
            }
        })
    }
}
