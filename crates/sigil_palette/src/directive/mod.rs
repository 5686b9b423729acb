//! Directive location.
//!
//! A directive is a `//` comment naming a tag and its attributes:
//!
//! ```text
//! // @toggle label="Show banner" group="Header" hash="v3f2c..."
//! var showBanner = true;
//! ```
//!
//! The comment may follow code on the same line. The first non-empty line
//! after it is the config line holding the governed literal.

mod attrs;

pub use attrs::{AccessList, Attributes};

use std::ops::Range;

use memchr::memchr2;
use regex::{CaptureMatches, Regex};

use crate::types::Tag;

/// Compiled directive pattern.
#[derive(Debug, Clone)]
pub struct DirectiveGrammar {
    pattern: Regex,
}

impl DirectiveGrammar {
    /// Build the pattern from the tag table.
    pub fn new() -> Result<Self, regex::Error> {
        let tags = Tag::ALL.map(Tag::as_str).join("|");
        let pattern = Regex::new(&format!(r"//[ ]+@({tags})[ ]+([^\r\n]+)"))?;
        Ok(Self { pattern })
    }

    /// Every directive comment in `source`, without pairing config lines.
    #[inline]
    pub fn matches<'a>(&'a self, source: &'a str) -> RawDirectives<'a> {
        RawDirectives {
            source,
            captures: self.pattern.captures_iter(source),
        }
    }

    /// Every directive in `source`, paired with its config line.
    pub fn locate<'a>(&'a self, source: &'a str) -> impl Iterator<Item = Directive<'a>> + 'a {
        self.matches(source).map(move |raw| Directive {
            tag: raw.tag,
            attributes: Attributes::parse(raw.attrs),
            config: config_slot(source, raw.span.end),
            span: raw.span,
        })
    }
}

/// A directive comment as matched, before attribute parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDirective<'a> {
    pub tag: Tag,
    /// From `//` to the end of the line, terminator excluded.
    pub span: Range<usize>,
    /// The whole comment text, `source[span]`.
    pub text: &'a str,
    /// Attribute text after the tag keyword.
    pub attrs: &'a str,
    /// Whether a line terminator follows.
    pub terminated: bool,
}

/// Iterator over [`RawDirective`]s.
pub struct RawDirectives<'a> {
    source: &'a str,
    captures: CaptureMatches<'a, 'a>,
}

impl<'a> Iterator for RawDirectives<'a> {
    type Item = RawDirective<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let caps = self.captures.next()?;
            let (Some(whole), Some(tag), Some(attrs)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let Some(tag) = Tag::from_name(tag.as_str()) else {
                continue;
            };
            let terminated = matches!(
                self.source.as_bytes().get(whole.end()),
                Some(b'\r' | b'\n')
            );
            return Some(RawDirective {
                tag,
                span: whole.range(),
                text: whole.as_str(),
                attrs: attrs.as_str(),
                terminated,
            });
        }
    }
}

/// A recognized directive paired with its config line.
#[derive(Debug, Clone)]
pub struct Directive<'a> {
    pub tag: Tag,
    pub attributes: Attributes,
    /// Byte range of the directive comment.
    pub span: Range<usize>,
    /// The governed line; `None` when the directive ends the source.
    pub config: Option<ConfigSlot<'a>>,
}

impl Directive<'_> {
    #[inline]
    pub fn hash(&self) -> Option<&str> {
        self.attributes.hash()
    }

    /// Offset of the directive in the source.
    #[inline]
    pub fn source_offset(&self) -> usize {
        self.span.start
    }

    /// Whether `user` passes the directive's `access` list, if it has one.
    #[inline]
    pub fn is_visible_to(&self, user: Option<&str>) -> bool {
        self.attributes
            .access()
            .map_or(true, |list| list.allows(user))
    }
}

/// The line a directive governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSlot<'a> {
    /// Line content without terminator.
    pub line: &'a str,
    /// `\r\n`, `\n`, `\r`, or empty at end of source.
    pub terminator: &'a str,
    /// Byte offset of `line` in the source.
    pub start: usize,
}

/// Find the first non-empty line after the directive ending at `end`.
///
/// Requires at least one terminator after the directive; runs of
/// terminators (blank lines) are skipped.
fn config_slot(source: &str, end: usize) -> Option<ConfigSlot<'_>> {
    let bytes = source.as_bytes();
    let skipped = bytes[end..]
        .iter()
        .take_while(|&&b| b == b'\r' || b == b'\n')
        .count();
    if skipped == 0 {
        return None;
    }

    let start = end + skipped;
    if start >= bytes.len() {
        return None;
    }
    let line_end = memchr2(b'\r', b'\n', &bytes[start..]).map_or(bytes.len(), |p| start + p);
    let terminator_len = match &bytes[line_end..] {
        [b'\r', b'\n', ..] => 2,
        [b'\r' | b'\n', ..] => 1,
        _ => 0,
    };

    Some(ConfigSlot {
        line: &source[start..line_end],
        terminator: &source[line_end..line_end + terminator_len],
        start,
    })
}
