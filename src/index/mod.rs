//! Location index subsystem.
//!
//! # Data Flow
//! ```text
//! Validated Platform[]
//!     → path_index.rs (build a fresh trie + empty cache off to the side)
//!     → ArcSwap publish (readers see old or new, never a mix)
//!
//! Lookup(path):
//!     → trie.rs (normalize, split into segments)
//!     → snapshot cache (hit: shared Arc<PlatformSet>)
//!     → trie walk (miss: union of platforms along the ancestor chain)
//! ```
//!
//! # Design Decisions
//! - The tree is never patched in place; every build replaces it
//! - Tree and cache are published together as one snapshot
//! - Lookups never fail; no match is an empty set

pub mod path_index;
pub mod platform;
pub mod trie;

pub use path_index::{IndexStats, PathIndex, PlatformSet};
pub use platform::Platform;
