//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use axum::response::Response;
use clarity_web::{
    HandlerRef, HandlerRegistry, JsonResponse, Next, ProjectPaths, RequestContext,
};
use serde_json::json;
use tempfile::TempDir;

/// A disposable project root with a bootstrap cache directory.
pub struct TestProject {
    // Held so the directory outlives the test.
    pub dir: TempDir,
    pub paths: ProjectPaths,
}

pub fn project() -> TestProject {
    let dir = tempfile::tempdir().unwrap();
    let paths = ProjectPaths::new(dir.path());
    paths.ensure_bootstrap_cache().unwrap();
    TestProject { dir, paths }
}

pub struct PingController {
    ctx: RequestContext,
}

impl PingController {
    pub fn new(ctx: RequestContext) -> Self {
        Self { ctx }
    }

    pub async fn show(self) -> Response {
        JsonResponse::ok(json!({"ping": "pong"}))
    }

    /// Echoes the `id` path parameter and the `name` query parameter.
    pub async fn echo(self) -> Response {
        JsonResponse::ok(json!({
            "id": self.ctx.param("id"),
            "name": self.ctx.query_value("name"),
        }))
    }
}

pub struct UsersController {
    ctx: RequestContext,
}

impl UsersController {
    pub fn new(ctx: RequestContext) -> Self {
        Self { ctx }
    }

    pub async fn store(self) -> Response {
        let mut messages = HashMap::new();
        messages.insert("name".to_string(), "a user needs a name".to_string());

        let validation = self.ctx.validate(&["name"], messages);
        if !validation.is_valid {
            return JsonResponse::bad_request(json!({"errors": validation.errors}));
        }

        JsonResponse::created(json!({"name": self.ctx.input("name")}))
    }
}

pub struct TokenMiddleware {
    ctx: RequestContext,
}

impl TokenMiddleware {
    pub fn new(ctx: RequestContext) -> Self {
        Self { ctx }
    }

    pub async fn handle(self, next: Next) -> Response {
        if self.ctx.header("x-api-token") == Some("letmein") {
            next.forward(self.ctx).await
        } else {
            JsonResponse::unauthorized(json!({"error": "invalid token"}))
        }
    }
}

/// Handler registry populated with the demo controllers, plus the
/// references the route definitions use.
pub struct Fixture {
    pub handlers: HandlerRegistry,
    pub ping_show: HandlerRef,
    pub ping_echo: HandlerRef,
    pub users_store: HandlerRef,
    pub token: HandlerRef,
}

pub fn fixture() -> Fixture {
    let mut handlers = HandlerRegistry::new();

    let ping_show = handlers
        .controller::<PingController, _, _>("show", |ctx| PingController::new(ctx).show());
    let ping_echo = handlers
        .controller::<PingController, _, _>("echo", |ctx| PingController::new(ctx).echo());
    let users_store = handlers
        .controller::<UsersController, _, _>("store", |ctx| UsersController::new(ctx).store());
    let token = handlers
        .middleware::<TokenMiddleware, _, _>(|ctx, next| TokenMiddleware::new(ctx).handle(next));

    Fixture {
        handlers,
        ping_show,
        ping_echo,
        users_store,
        token,
    }
}
