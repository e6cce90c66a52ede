//! Platform feed subsystem.
//!
//! # Data Flow
//! ```text
//! feed text (upload body or file on disk)
//!     → parser.rs (lines → RawRecord, malformed lines reported)
//!     → catalog (validation, index rebuild)
//!
//! On file change:
//!     watcher.rs detects modify/create
//!     → catalog reloads from the same path
//!     → a failed read keeps the current index
//! ```

pub mod parser;
pub mod watcher;

pub use parser::{parse_feed, parse_line, FeedLine, ParsedFeed};
pub use watcher::FeedWatcher;
