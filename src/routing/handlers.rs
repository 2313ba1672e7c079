//! The typed handler registry.
//!
//! # Responsibilities
//! - Map reference triples to closure-producing factories
//! - Resolve controller and middleware references during registration
//!   and again at mount time
//! - Carry the forwarding contract between a middleware and its
//!   pending controller binding (`Next`)
//!
//! # Design Decisions
//! - Factories are registered explicitly at startup; a triple that was
//!   never registered simply does not resolve. Existence validation is
//!   a map lookup, not a runtime import
//! - Controllers and middlewares live in separate maps: a controller
//!   triple cannot be mounted as a middleware or vice versa
//! - One middleware per route; `Next` forwards to exactly one controller

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::response::Response;

use crate::http::request::RequestContext;
use crate::routing::descriptor::HandlerRef;

/// Boxed future produced by a handler invocation.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A controller binding: constructs the controller for one request and
/// invokes its target method.
pub type ControllerFn = Arc<dyn Fn(RequestContext) -> HandlerFuture + Send + Sync>;

/// A middleware binding: runs before the controller and receives the
/// pending controller binding as its forwarding target.
pub type MiddlewareFn = Arc<dyn Fn(RequestContext, Next) -> HandlerFuture + Send + Sync>;

/// The pending controller binding handed to a middleware.
///
/// The middleware either forwards the request or short-circuits with its
/// own response; `Next` is consumed either way.
pub struct Next {
    controller: ControllerFn,
}

impl Next {
    pub(crate) fn new(controller: ControllerFn) -> Self {
        Self { controller }
    }

    /// Forward the request to the controller binding.
    pub async fn forward(self, ctx: RequestContext) -> Response {
        (self.controller)(ctx).await
    }
}

/// Process-wide map from reference triples to handler factories.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    controllers: HashMap<HandlerRef, ControllerFn>,
    middlewares: HashMap<HandlerRef, MiddlewareFn>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller method for type `C`.
    ///
    /// Returns the reference triple the route builders use. The closure
    /// receives the request context and is expected to construct `C`
    /// and invoke the named method.
    pub fn controller<C, F, Fut>(&mut self, method: &str, f: F) -> HandlerRef
    where
        C: 'static,
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let reference = HandlerRef::of::<C>(method);
        let binding: ControllerFn = Arc::new(move |ctx| Box::pin(f(ctx)));
        self.controllers.insert(reference.clone(), binding);
        tracing::debug!(handler = %reference, "controller registered");
        reference
    }

    /// Register the `handle` method of middleware type `M`.
    pub fn middleware<M, F, Fut>(&mut self, f: F) -> HandlerRef
    where
        M: 'static,
        F: Fn(RequestContext, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let reference = HandlerRef::of::<M>("handle");
        let binding: MiddlewareFn = Arc::new(move |ctx, next| Box::pin(f(ctx, next)));
        self.middlewares.insert(reference.clone(), binding);
        tracing::debug!(handler = %reference, "middleware registered");
        reference
    }

    pub fn resolve_controller(&self, reference: &HandlerRef) -> Option<ControllerFn> {
        self.controllers.get(reference).cloned()
    }

    pub fn resolve_middleware(&self, reference: &HandlerRef) -> Option<MiddlewareFn> {
        self.middlewares.get(reference).cloned()
    }
}
