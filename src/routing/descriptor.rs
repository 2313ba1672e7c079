//! Route descriptor wire types.
//!
//! A descriptor is one persisted record in `route.json`:
//! `verb`, `uri`, the controller triple (`file`, `class`, `method`) and
//! an optional middleware triple (`middleware_file`, `middleware_class`,
//! `middleware_method`). Field names are the cache file format and must
//! stay stable across releases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference triple identifying a registered handler:
/// module path, type name, method name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerRef {
    pub module: String,
    pub class: String,
    pub method: String,
}

impl HandlerRef {
    pub fn new(
        module: impl Into<String>,
        class: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            class: class.into(),
            method: method.into(),
        }
    }

    /// Derive the module path and class name from a handler type.
    ///
    /// `of::<app::controllers::Ping>("show")` yields the triple
    /// (`app::controllers`, `Ping`, `show`).
    pub fn of<C: 'static>(method: impl Into<String>) -> Self {
        let full = std::any::type_name::<C>();
        let (module, class) = full.rsplit_once("::").unwrap_or(("", full));
        Self::new(module, class, method)
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.module, self.class, self.method)
    }
}

/// One persisted route record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub verb: String,
    pub uri: String,

    /// Module path of the controller.
    pub file: String,
    /// Controller type name.
    pub class: String,
    /// Controller method name.
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware_method: Option<String>,
}

impl RouteDescriptor {
    pub fn new(verb: impl Into<String>, uri: impl Into<String>, handler: HandlerRef) -> Self {
        Self {
            verb: verb.into(),
            uri: uri.into(),
            file: handler.module,
            class: handler.class,
            method: handler.method,
            middleware_file: None,
            middleware_class: None,
            middleware_method: None,
        }
    }

    /// The controller reference triple.
    pub fn handler_ref(&self) -> HandlerRef {
        HandlerRef::new(&self.file, &self.class, &self.method)
    }

    /// The middleware reference triple, when one is attached.
    pub fn middleware_ref(&self) -> Option<HandlerRef> {
        match (&self.middleware_file, &self.middleware_class, &self.middleware_method) {
            (Some(file), Some(class), Some(method)) => {
                Some(HandlerRef::new(file, class, method))
            }
            _ => None,
        }
    }

    /// Attach a middleware reference. At most one middleware per route;
    /// attaching again replaces the previous reference.
    pub fn set_middleware(&mut self, middleware: HandlerRef) {
        self.middleware_file = Some(middleware.module);
        self.middleware_class = Some(middleware.class);
        self.middleware_method = Some(middleware.method);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PingController;

    #[test]
    fn ref_of_splits_module_and_class() {
        let reference = HandlerRef::of::<PingController>("show");
        assert_eq!(reference.class, "PingController");
        assert_eq!(reference.method, "show");
        assert!(reference.module.ends_with("descriptor::tests"));
    }

    #[test]
    fn wire_format_field_names() {
        let mut descriptor =
            RouteDescriptor::new("GET", "/ping", HandlerRef::new("app::ping", "Ping", "show"));
        descriptor.set_middleware(HandlerRef::new("app::token", "Token", "handle"));

        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(value["verb"], "GET");
        assert_eq!(value["uri"], "/ping");
        assert_eq!(value["file"], "app::ping");
        assert_eq!(value["class"], "Ping");
        assert_eq!(value["method"], "show");
        assert_eq!(value["middleware_file"], "app::token");
        assert_eq!(value["middleware_method"], "handle");
    }

    #[test]
    fn middleware_fields_omitted_when_absent() {
        let descriptor =
            RouteDescriptor::new("GET", "/ping", HandlerRef::new("app::ping", "Ping", "show"));
        let raw = serde_json::to_string(&descriptor).unwrap();
        assert!(!raw.contains("middleware_file"));
        assert!(descriptor.middleware_ref().is_none());
    }
}
