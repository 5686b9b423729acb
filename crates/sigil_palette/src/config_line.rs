//! Config line decomposition.
//!
//! A config line is cut into slices that concatenate back to the original:
//!
//! ```text
//!     var limit = 10 ; // max rows\n
//! ^^^^^^^^^^           prefix
//!           ^^         assignment
//!             ^^       literal
//!               ^      padding
//!                ^     punctuation
//!                 ^^^^^^^^^^^^ trailing
//!                             ^^ terminator
//! ```
//!
//! Only the literal is ever rewritten.

use std::ops::Range;

use crate::literal::classify;
use crate::trivia::TriviaSplitter;
use crate::types::LiteralType;

/// Byte ranges of a comment-free line body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BodyParts {
    /// Offset of the `:` or `=` split symbol; `None` in whole-line mode.
    pub symbol: Option<usize>,
    pub literal: Range<usize>,
    pub punctuation: Range<usize>,
}

/// Locate the literal inside `body`, which carries no comment.
///
/// A trimmed body that is a lone number or string is a whole-line literal.
/// Otherwise the first of `:` and `=` splits name from literal; a symbol at
/// offset 0 of the trimmed text counts as absent.
pub(crate) fn split_body(body: &str) -> Option<BodyParts> {
    let content_end = body.trim_end().len();
    let core_end = match body.as_bytes()[..content_end].last() {
        Some(b',' | b';') => content_end - 1,
        _ => content_end,
    };
    let punctuation = core_end..content_end;

    let core = &body[..core_end];
    let start = core.len() - core.trim_start().len();
    let trimmed = core.trim();
    let end = start + trimmed.len();

    if matches!(classify(trimmed), LiteralType::Number | LiteralType::String) {
        return Some(BodyParts {
            symbol: None,
            literal: start..end,
            punctuation,
        });
    }

    let equal = trimmed.find('=').unwrap_or(0);
    let colon = trimmed.find(':').unwrap_or(0);
    let at = if colon > 0 && (equal == 0 || equal > colon) {
        colon
    } else if equal > 0 && (colon == 0 || colon > equal) {
        equal
    } else {
        return None;
    };

    let symbol = start + at;
    let after = &body[symbol + 1..end];
    let literal_start = symbol + 1 + (after.len() - after.trim_start().len());

    Some(BodyParts {
        symbol: Some(symbol),
        literal: literal_start..end,
        punctuation,
    })
}

/// A config line cut into its format-preserving slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigLine<'a> {
    /// Everything before the assignment symbol, or the indentation of a
    /// whole-line literal.
    pub prefix: &'a str,
    /// `:` or `=` with the whitespace after it; empty for whole-line literals.
    pub assignment: &'a str,
    pub literal: &'a str,
    /// Whitespace between the literal and the punctuation.
    pub padding: &'a str,
    /// `,`, `;` or empty.
    pub punctuation: &'a str,
    /// Whitespace, comment and trailing whitespace.
    pub trailing: &'a str,
    pub terminator: &'a str,
}

impl<'a> ConfigLine<'a> {
    /// Decompose `line` (without its terminator). `None` when no literal can
    /// be located.
    pub fn decompose(
        trivia: &TriviaSplitter,
        line: &'a str,
        terminator: &'a str,
    ) -> Option<Self> {
        let (body, _) = trivia.split(line);
        let parts = split_body(body)?;
        let prefix_end = parts.symbol.unwrap_or(parts.literal.start);

        Some(Self {
            prefix: &line[..prefix_end],
            assignment: &line[prefix_end..parts.literal.start],
            literal: &line[parts.literal.clone()],
            padding: &line[parts.literal.end..parts.punctuation.start],
            punctuation: &line[parts.punctuation.clone()],
            trailing: &line[parts.punctuation.end..],
            terminator,
        })
    }

    /// Whether the whole line is the literal.
    #[inline]
    pub fn is_whole_line(&self) -> bool {
        self.assignment.is_empty()
    }

    #[inline]
    pub fn literal_type(&self) -> LiteralType {
        classify(self.literal)
    }

    /// The line with its literal replaced, terminator included.
    pub fn with_literal(&self, literal: &str) -> String {
        let mut out = String::with_capacity(self.len() - self.literal.len() + literal.len());
        out.push_str(self.prefix);
        out.push_str(self.assignment);
        out.push_str(literal);
        out.push_str(self.padding);
        out.push_str(self.punctuation);
        out.push_str(self.trailing);
        out.push_str(self.terminator);
        out
    }

    /// Total byte length, terminator included.
    #[inline]
    pub fn len(&self) -> usize {
        self.prefix.len()
            + self.assignment.len()
            + self.literal.len()
            + self.padding.len()
            + self.punctuation.len()
            + self.trailing.len()
            + self.terminator.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset of the literal from the start of the line.
    #[inline]
    pub fn literal_offset(&self) -> usize {
        self.prefix.len() + self.assignment.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decompose<'a>(line: &'a str, terminator: &'a str) -> Option<ConfigLine<'a>> {
        let trivia = TriviaSplitter::new().unwrap();
        ConfigLine::decompose(&trivia, line, terminator)
    }

    #[test]
    fn test_assignment_line() {
        let line = decompose("    var limit = 10 ; // max rows", "\n").unwrap();
        assert_eq!(line.prefix, "    var limit ");
        assert_eq!(line.assignment, "= ");
        assert_eq!(line.literal, "10");
        assert_eq!(line.padding, " ");
        assert_eq!(line.punctuation, ";");
        assert_eq!(line.trailing, " // max rows");
        assert_eq!(line.terminator, "\n");
        assert_eq!(line.literal_type(), LiteralType::Number);
        assert!(!line.is_whole_line());
    }

    #[test]
    fn test_object_property_line() {
        let line = decompose("  title: 'Home',", "\r\n").unwrap();
        assert_eq!(line.prefix, "  title");
        assert_eq!(line.assignment, ": ");
        assert_eq!(line.literal, "'Home'");
        assert_eq!(line.punctuation, ",");
        assert_eq!(line.trailing, "");
    }

    #[test]
    fn test_whole_line_literal() {
        let line = decompose("\t\"blue\", // primary", "").unwrap();
        assert!(line.is_whole_line());
        assert_eq!(line.prefix, "\t");
        assert_eq!(line.literal, "\"blue\"");
        assert_eq!(line.punctuation, ",");
        assert_eq!(line.trailing, " // primary");
    }

    #[test]
    fn test_first_symbol_wins() {
        let line = decompose("a: b = 1", "").unwrap();
        assert_eq!(line.prefix, "a");
        assert_eq!(line.literal, "b = 1");

        let line = decompose("var o = {k: 1};", "").unwrap();
        assert_eq!(line.prefix, "var o ");
        assert_eq!(line.literal, "{k: 1}");
        assert_eq!(line.literal_type(), LiteralType::Object);
    }

    #[test]
    fn test_symbol_at_offset_zero_is_absent() {
        assert!(decompose("=1", "").is_none());
        assert!(decompose("  :x", "").is_none());
        // The later symbol still splits.
        let line = decompose("=a:1", "").unwrap();
        assert_eq!(line.prefix, "=a");
        assert_eq!(line.literal, "1");
    }

    #[test]
    fn test_unrecognized_line() {
        assert!(decompose("doSomething();", "\n").is_none());
        assert!(decompose("", "\n").is_none());
    }

    #[test]
    fn test_round_trip() {
        let lines = [
            "    var limit = 10 ; // max rows  ",
            "  title: 'Home',",
            "\t\"blue\", // primary",
            "var links = [\"http://a\", 'b']; // mirrors",
            "x=true",
            "  key :   [1,2]   ,   ",
        ];
        for original in lines {
            let line = decompose(original, "\n").unwrap();
            assert_eq!(line.with_literal(line.literal), format!("{original}\n"));
            assert_eq!(line.len(), original.len() + 1);
        }
    }

    #[test]
    fn test_with_literal_replaces_only_literal() {
        let line = decompose("var x = 'old'; // note", "\n").unwrap();
        assert_eq!(line.with_literal("'new'"), "var x = 'new'; // note\n");
        assert_eq!(line.literal_offset(), 8);
    }
}
