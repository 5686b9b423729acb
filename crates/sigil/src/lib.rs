//! # Sigil
//!
//! Comment-driven visual configuration for JavaScript sources.
//!
//! This crate re-exports the Sigil sub-crates for unified documentation and
//! ships the `sigil` command-line tool.
//!
//! ## Crates
//!
//! - [`carton`] - Shared toolbox: string, map and hashing utilities
//! - [`palette`] - Directive engine: parse, inject, hash and strip

/// Shared toolbox: string, map and hashing utilities.
pub use sigil_carton as carton;

/// Directive engine: parse, inject, hash and strip.
pub use sigil_palette as palette;
