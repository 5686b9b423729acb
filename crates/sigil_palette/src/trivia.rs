//! Trailing comment detection on config lines.
//!
//! A `//` may sit inside a string (`"http://..."`) or an array element, so
//! text matching alone cannot tell a comment from literal content. The
//! splitter therefore walks the `//` occurrences from the right and accepts
//! the first one whose left side still decomposes into a recognizable literal.

use regex::Regex;

use crate::config_line::split_body;
use crate::literal::classify;
use crate::types::LiteralType;

/// Finds where the genuine trailing comment of a config line starts.
#[derive(Debug, Clone)]
pub struct TriviaSplitter {
    /// A lone number or quoted string, optional `,`/`;`, optional comment.
    pure_literal: Regex,
}

impl TriviaSplitter {
    pub fn new() -> Result<Self, regex::Error> {
        let pure_literal = Regex::new(
            r#"^\s*(?:-?[0-9]+(?:\.[0-9]+)?|"[^\r\n"]*"|'[^\r\n']*')[,;]?\s*(//.*)?$"#,
        )?;
        Ok(Self { pure_literal })
    }

    /// Byte offset of the `//` that starts the trailing comment, if any.
    pub fn comment_start(&self, line: &str) -> Option<usize> {
        if let Some(caps) = self.pure_literal.captures(line) {
            return caps.get(1).map(|m| m.start());
        }
        self.comment_by_revalidation(line)
    }

    /// Split `line` into `(code, comment)`; the comment keeps its own
    /// trailing whitespace.
    pub fn split<'a>(&self, line: &'a str) -> (&'a str, &'a str) {
        line.split_at(self.comment_start(line).unwrap_or(line.len()))
    }

    fn comment_by_revalidation(&self, line: &str) -> Option<usize> {
        let mut end = line.len();
        while let Some(pos) = line[..end].rfind("//") {
            if literal_type_of(&line[..pos]) != LiteralType::Unknown {
                return Some(pos);
            }
            end = pos;
        }
        None
    }
}

/// Type of the literal `code` decomposes to, `Unknown` when it does not.
fn literal_type_of(code: &str) -> LiteralType {
    split_body(code).map_or(LiteralType::Unknown, |parts| {
        classify(&code[parts.literal])
    })
}
