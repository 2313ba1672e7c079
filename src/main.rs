//! clarity-web demo application.
//!
//! Boots the kernel against the working directory, registers a couple of
//! demonstration routes and serves them. Intended as the smallest useful
//! skeleton for an application built on this crate.

use clarity_web::{
    ConfigSections, HandlerRegistry, HttpKernel, JsonResponse, Next, ProjectPaths, RequestContext,
    Route, RouteGroup,
};
use serde_json::json;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct PingController {
    ctx: RequestContext,
}

impl PingController {
    fn new(ctx: RequestContext) -> Self {
        Self { ctx }
    }

    async fn show(self) -> axum::response::Response {
        JsonResponse::ok(json!({
            "ping": "pong",
            "path": self.ctx.path(),
        }))
    }
}

struct TokenMiddleware {
    ctx: RequestContext,
}

impl TokenMiddleware {
    fn new(ctx: RequestContext) -> Self {
        Self { ctx }
    }

    async fn handle(self, next: Next) -> axum::response::Response {
        match self.ctx.header("x-api-token") {
            Some(token) if !token.is_empty() => next.forward(self.ctx).await,
            _ => JsonResponse::unauthorized(json!({"error": "missing api token"})),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clarity_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("clarity-web v0.1.0 starting");

    let paths = ProjectPaths::from_current_dir()?;

    let mut handlers = HandlerRegistry::new();
    let ping = handlers
        .controller::<PingController, _, _>("show", |ctx| PingController::new(ctx).show());
    let token =
        handlers.middleware::<TokenMiddleware, _, _>(|ctx, next| {
            TokenMiddleware::new(ctx).handle(next)
        });

    let kernel = HttpKernel::bootstrap(paths, ConfigSections::from_env(), handlers)?;

    kernel.routes().register(Route::get("/ping", ping.clone()))?;
    RouteGroup::new()
        .base("api")
        .prefix("v1")
        .middleware(token)
        .group(vec![Route::get("ping", ping)], kernel.routes())?;

    let app = kernel.into_app()?;

    let address = std::env::var("APP_LISTEN").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = TcpListener::bind(&address).await?;

    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
