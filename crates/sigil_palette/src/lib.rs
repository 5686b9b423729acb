//! # sigil_palette
//!
//! Palette - Directive-driven visual configuration for JavaScript sources.
//!
//! ## Name Origin
//!
//! A **palette** is the board an artist mixes colors on before they reach
//! the canvas. `sigil_palette` plays the same part for JavaScript config
//! files: comment directives (the sigils) mark which literals a form may
//! touch, and the palette reads those literals into widget values and mixes
//! edited values back into the source.
//!
//! ## Concepts
//!
//! - **Directive**: a `// @<tag> key="value" ...` comment
//! - **Config line**: the first non-empty line after a directive
//! - **Control**: a directive resolved against its literal
//! - **Hash**: the stable address `inject` uses to find a directive again
//!
//! ## Usage
//!
//! ```rust
//! use sigil_carton::{CompactString, FxHashMap};
//! use sigil_palette::{Palette, TagValue};
//!
//! let palette = Palette::new().unwrap();
//! let source = "// @toggle label=\"Banner\" hash=\"v1\"\nvar banner = true; // header\n";
//!
//! let config = palette.parse(source, None);
//! let control = config.controls().next().unwrap();
//! assert_eq!(control.value, TagValue::from("1"));
//!
//! let mut values = FxHashMap::default();
//! values.insert(CompactString::new("v1"), TagValue::from("0"));
//! let out = palette.inject(source, &values, None);
//! assert_eq!(
//!     out.content,
//!     "// @toggle label=\"Banner\" hash=\"v1\"\nvar banner = false; // header\n"
//! );
//! ```
//!
//! ## Features
//!
//! - Ten widget tags, each with its own legal literal types
//! - Byte-exact rewrites: quotes, punctuation and comments survive
//! - Per-directive `access` lists and `group` sections
//! - Idempotent hash allocation and directive stripping

pub mod config_line;
pub mod convert;
pub mod directive;
pub mod hash;
pub mod literal;
pub mod palette;
pub mod trivia;
pub mod types;

// Re-exports for convenience
pub use config_line::ConfigLine;
pub use directive::{AccessList, Attributes, ConfigSlot, Directive, DirectiveGrammar};
pub use hash::{EntropyMint, IdMint};
pub use palette::Palette;
pub use types::{
    Control, ControlGroup, FailureReason, InjectFailure, InjectOutput, LiteralType, LiteralTypes,
    SigilError, Tag, TagValue, VisualConfig,
};
