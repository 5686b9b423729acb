//! Carton - The shared toolbox for Sigil.
//!
//! Like an artist's carton holding the tools every piece of work needs, this
//! crate gathers the small utilities and re-exports shared by the Sigil
//! crates, so that they agree on string, map and flag types.
//!
//! # Modules
//!
//! - **hash**: xxHash3 digests and entropy gathering for identifier minting
//!
//! # Example
//!
//! ```
//! use sigil_carton::hash::{digest_128, digest_to_hex};
//!
//! let id = digest_to_hex(digest_128(&[b"// @toggle", b"42"]));
//! assert_eq!(id.len(), 32);
//! ```

pub mod hash;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export bitflags for flag types
pub use bitflags::bitflags;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};
