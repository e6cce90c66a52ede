//! Platform catalog subsystem.
//!
//! # Data Flow
//! ```text
//! RawRecord[] (feed parser or JSON upload)
//!     → types.rs (per-record validation: Accepted | Skipped(reason))
//!     → service.rs (fold outcomes into LoadReport, rebuild PathIndex once)
//!
//! Search(path):
//!     → service.rs (reject blank / non-'/' paths)
//!     → PathIndex lookup
//!     → sorted Vec<String>
//! ```
//!
//! # Design Decisions
//! - A bad record never fails the batch; it is reported as skipped
//! - Every load rebuilds, including an empty one
//! - Query validation happens before the index is consulted

pub mod error;
pub mod service;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use service::PlatformCatalog;
pub use types::{LoadReport, RawRecord, SkipReason, SkippedRecord, Validation};
