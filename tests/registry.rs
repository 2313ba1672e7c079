//! Route registry persistence properties.

use clarity_web::{HandlerRef, Route, RouteGroup, RouteRegistry, RoutingError};
use serde_json::Value;

mod common;

fn registry(project: &common::TestProject, fixture: &common::Fixture) -> RouteRegistry {
    RouteRegistry::new(&project.paths, fixture.handlers.clone())
}

#[test]
fn persists_descriptors_in_call_order() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    registry.register(Route::get("/ping", fixture.ping_show.clone())).unwrap();
    registry.register(Route::post("/users", fixture.users_store.clone())).unwrap();
    registry.register(Route::get("/users/{id}", fixture.ping_echo.clone())).unwrap();

    let routes = registry.load().unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(
        routes.iter().map(|r| (r.verb.as_str(), r.uri.as_str())).collect::<Vec<_>>(),
        vec![("GET", "/ping"), ("POST", "/users"), ("GET", "/users/{id}")]
    );
    assert_eq!(routes[0].handler_ref(), fixture.ping_show);
    assert_eq!(routes[1].handler_ref(), fixture.users_store);

    // Wire format on disk: array of objects with the stable field names
    let raw = std::fs::read_to_string(registry.path()).unwrap();
    let document: Value = serde_json::from_str(&raw).unwrap();
    let first = &document.as_array().unwrap()[0];
    assert_eq!(first["verb"], "GET");
    assert_eq!(first["uri"], "/ping");
    assert!(first.get("file").is_some());
    assert!(first.get("class").is_some());
    assert!(first.get("method").is_some());
}

#[test]
fn duplicate_verb_uri_rejects_and_wipes() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    registry.register(Route::get("/users", fixture.ping_show.clone())).unwrap();
    assert!(registry.path().exists());

    // Different handler, same (verb, uri)
    let result = registry.register(Route::get("/users", fixture.users_store.clone()));
    assert!(matches!(result, Err(RoutingError::DuplicateRoute { .. })));

    // The whole table is gone, not partially written
    assert!(!registry.path().exists());
    assert!(registry.load().unwrap().is_empty());
}

#[test]
fn same_uri_with_different_verbs_is_accepted() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    registry.register(Route::get("/users", fixture.ping_show.clone())).unwrap();
    registry.register(Route::post("/users", fixture.users_store.clone())).unwrap();

    assert_eq!(registry.load().unwrap().len(), 2);
}

#[test]
fn unresolvable_method_rejects_and_wipes() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    registry.register(Route::get("/ping", fixture.ping_show.clone())).unwrap();

    let bogus = HandlerRef::of::<common::PingController>("does_not_exist");
    let result = registry.register(Route::get("/broken", bogus));
    assert!(matches!(result, Err(RoutingError::UnresolvedHandler { .. })));

    // Prior valid descriptors do not survive the failed batch
    assert!(!registry.path().exists());
}

#[test]
fn unresolvable_middleware_rejects_and_wipes() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    let unknown = HandlerRef::new("tests::nowhere", "GhostMiddleware", "handle");
    let result = RouteGroup::new()
        .middleware(unknown)
        .group(vec![Route::get("/ping", fixture.ping_show.clone())], &registry);

    assert!(matches!(result, Err(RoutingError::UnresolvedHandler { kind: "middleware", .. })));
    assert!(!registry.path().exists());
}

#[test]
fn invalid_verb_rejects() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    let result = registry.register(Route::on("B@D VERB", "/x", fixture.ping_show.clone()));
    assert!(matches!(result, Err(RoutingError::InvalidVerb(_))));
    assert!(!registry.path().exists());
}

#[test]
fn extension_verbs_are_rejected_at_registration() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    registry.register(Route::get("/files", fixture.ping_show.clone())).unwrap();

    // PROPFIND parses as an extension method but cannot be mounted;
    // it must fail here, with the cache wiped, never at boot
    let result = registry.register(Route::on("PROPFIND", "/files", fixture.ping_show.clone()));
    assert!(matches!(result, Err(RoutingError::InvalidVerb(_))));
    assert!(!registry.path().exists());
}

#[test]
fn clear_then_load_is_empty() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    registry.register(Route::get("/ping", fixture.ping_show.clone())).unwrap();
    registry.clear().unwrap();

    assert!(!registry.path().exists());
    assert!(registry.load().unwrap().is_empty());

    // Clearing an absent file is fine
    registry.clear().unwrap();
}

#[test]
fn grouped_routes_compose_uri_and_attach_middleware() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    RouteGroup::new()
        .base("api")
        .prefix("v1")
        .middleware(fixture.token.clone())
        .group(
            vec![
                Route::get("users", fixture.ping_show.clone()),
                Route::post("/users", fixture.users_store.clone()),
            ],
            &registry,
        )
        .unwrap();

    let routes = registry.load().unwrap();
    assert_eq!(routes.len(), 2);
    for route in &routes {
        assert_eq!(route.uri, "/api/v1/users");
        assert_eq!(route.middleware_ref(), Some(fixture.token.clone()));
    }
}

#[test]
fn bare_uri_is_normalized_before_uniqueness_check() {
    let project = common::project();
    let fixture = common::fixture();
    let registry = registry(&project, &fixture);

    registry.register(Route::get("ping", fixture.ping_show.clone())).unwrap();

    // "/ping" and "ping" are the same canonical route
    let result = registry.register(Route::get("/ping", fixture.ping_echo.clone()));
    assert!(matches!(result, Err(RoutingError::DuplicateRoute { .. })));
}
