//! Request-scoped context handed to controllers and middlewares.

use std::collections::HashMap;

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::RawPathParams;
use axum::http::{HeaderMap, Method, Request, Uri};
use axum::response::Response;
use serde_json::Value;

use crate::http::response::JsonResponse;
use crate::http::validate::{Validation, Validator};

/// Upper bound on buffered request bodies.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Everything a handler may read from the inbound request.
///
/// Cheap to clone: the body is shared bytes, the rest is small maps.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
    body: Bytes,
}

impl RequestContext {
    /// Build the context from the framework request.
    ///
    /// Returns an error response directly when the body cannot be
    /// buffered (oversized or interrupted stream).
    pub(crate) async fn from_request(
        params: RawPathParams,
        query: HashMap<String, String>,
        req: Request<Body>,
    ) -> Result<Self, Response> {
        let params = params
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let (parts, body) = req.into_parts();
        let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
            JsonResponse::bad_request(serde_json::json!({
                "error": format!("unreadable request body: {e}"),
            }))
        })?;

        Ok(Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            params,
            query,
            body,
        })
    }

    /// Build a context by hand; mainly for handler unit tests.
    pub fn synthetic(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        params: HashMap<String, String>,
        query: HashMap<String, String>,
        body: Bytes,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            params,
            query,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header value as text, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// URL-pattern parameters captured by the route.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Query string parameters.
    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    /// The body parsed as JSON, when it is valid JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Read one input value: JSON body field for body-carrying verbs,
    /// query parameter otherwise.
    pub fn input(&self, name: &str) -> Option<Value> {
        if self.method == Method::GET || self.method == Method::HEAD {
            self.query_value(name).map(Value::from)
        } else {
            self.json().and_then(|doc| doc.get(name).cloned())
        }
    }

    /// The request-bound validation helper.
    pub fn validate(&self, required: &[&str], messages: HashMap<String, String>) -> Validation {
        Validator::new(self).required(required).messages(messages).check()
    }
}
