//! Route registration subsystem.
//!
//! # Data Flow
//! ```text
//! Route::get/post/on (descriptor builders)
//!     → RouteGroup (attach middleware, compose /base/prefix/uri)
//!     → RouteRegistry::register
//!         validate triples against the HandlerRegistry
//!         enforce (verb, uri) uniqueness
//!         append + persist to bootstrap/cache/route.json (atomic)
//!
//! At boot:
//!     dispatch::mount reads route.json and wires every descriptor
//!     into the live axum Router, in registration order
//! ```
//!
//! # Design Decisions
//! - Handler references stay string triples on the wire, but resolve
//!   against factories registered explicitly at startup; nothing is
//!   imported or reflected at request time
//! - A single invalid route wipes the whole persisted table: a partially
//!   valid route table is worse than none
//! - Registration happens once, during single-threaded bootstrap; the
//!   file read-modify-write is not meant for concurrent callers

pub mod builder;
pub mod descriptor;
pub mod handlers;
pub mod registry;

pub use builder::{Route, RouteGroup};
pub use descriptor::{HandlerRef, RouteDescriptor};
pub use handlers::{HandlerRegistry, Next};
pub use registry::{RouteRegistry, RoutingError};
