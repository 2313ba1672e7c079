//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (APP_*, MAIL_*, DB_*, ...)
//!     → schema.rs (typed sections with defaults)
//!     → cache.rs  (merged JSON snapshot on disk)
//!     → section lookups served from an in-memory copy
//!
//! On bootstrap:
//!     destroy() removes the previous snapshot
//!     → mount() rebuilds it from the current environment
//!     → read() memoizes it for the life of the process
//! ```
//!
//! # Design Decisions
//! - The snapshot is rebuilt on every boot; it never outlives the
//!   environment it was derived from
//! - Reads within a process are memoized; cross-process invalidation is
//!   deleting the file, which only affects processes started afterward
//! - `section` lookups never fail on a missing key, they return `None`

pub mod cache;
pub mod schema;

pub use cache::{ConfigCache, ConfigError};
pub use schema::ConfigSections;
