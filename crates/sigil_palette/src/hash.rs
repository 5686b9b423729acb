//! Hash allocation.
//!
//! Every directive line without a `hash="..."` attribute gets one appended,
//! so that `inject` can later address its literal. Lines that already carry a
//! hash are left untouched, which makes allocation idempotent.

use memchr::memmem;
use sigil_carton::hash::{digest_128, digest_to_hex, entropy_u64, unix_nanos};

use crate::directive::DirectiveGrammar;

/// Source of directive identifiers.
pub trait IdMint {
    /// Mint an identifier for the directive found at byte `position`.
    ///
    /// The returned text is written after a `v` prefix and must not contain
    /// a `"`.
    fn mint(&mut self, position: usize) -> String;
}

/// Mints from position, wall clock and OS entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyMint;

impl IdMint for EntropyMint {
    fn mint(&mut self, position: usize) -> String {
        let position = (position as u64).to_le_bytes();
        let nanos = unix_nanos().to_le_bytes();
        let noise = entropy_u64().to_le_bytes();
        digest_to_hex(digest_128(&[&position, &nanos, &noise]))
    }
}

impl<F: FnMut(usize) -> String> IdMint for F {
    #[inline]
    fn mint(&mut self, position: usize) -> String {
        self(position)
    }
}

/// Append a hash to every terminated directive line that lacks one.
pub(crate) fn allocate(grammar: &DirectiveGrammar, source: &str, mint: &mut dyn IdMint) -> String {
    let mut out = String::with_capacity(source.len() + source.len() / 8);
    let mut copied = 0;
    let mut search_from = 0;

    for raw in grammar.matches(source) {
        if !raw.terminated || raw.text.contains("hash=\"") {
            continue;
        }

        let (position, next) = stamp_position(source, raw.text, search_from);
        search_from = next;
        let id = mint.mint(position);
        tracing::trace!("stamping @{} at {}: v{}", raw.tag, position, id);

        out.push_str(&source[copied..raw.span.end]);
        out.push_str(" hash=\"v");
        out.push_str(&id);
        out.push('"');
        copied = raw.span.end;
    }

    out.push_str(&source[copied..]);
    out
}

/// Position of `text` at or after `search_from`, and the offset the next
/// search starts from.
///
/// Identical directive lines thereby resolve to distinct positions. When the
/// text is not found the search offset itself stands in as the position.
pub fn stamp_position(source: &str, text: &str, search_from: usize) -> (usize, usize) {
    let position = source
        .get(search_from..)
        .and_then(|rest| memmem::find(rest.as_bytes(), text.as_bytes()))
        .map_or(search_from, |found| search_from + found);
    (position, position + 1)
}
