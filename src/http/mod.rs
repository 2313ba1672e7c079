//! Request-scoped support types.
//!
//! Controllers and middlewares never touch the raw framework request.
//! The dispatcher extracts everything a handler needs into a
//! [`request::RequestContext`] (headers, query, body, URL parameters)
//! and binds a request-scoped [`validate::Validator`] to it. Responses
//! go back through the [`response::JsonResponse`] envelope helpers.

pub mod request;
pub mod response;
pub mod validate;

pub use request::RequestContext;
pub use response::JsonResponse;
pub use validate::{Validation, Validator};
