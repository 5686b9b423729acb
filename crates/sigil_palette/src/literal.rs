//! Literal classification.
//!
//! A restricted lexical grammar for the right-hand side of a config line.
//! Array and object contents are not validated, only their brackets.

use crate::types::LiteralType;

/// Quote character a string literal is wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    #[inline]
    pub const fn quote(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }

    #[inline]
    pub const fn escaped(self) -> &'static str {
        match self {
            QuoteStyle::Single => "\\'",
            QuoteStyle::Double => "\\\"",
        }
    }
}

/// Classify trimmed, comment-free literal text. First matching rule wins.
pub fn classify(text: &str) -> LiteralType {
    if text == "true" || text == "false" {
        LiteralType::Boolean
    } else if is_number(text) {
        LiteralType::Number
    } else if is_enclosed(text, b'[', b']') {
        LiteralType::Array
    } else if is_enclosed(text, b'{', b'}') {
        LiteralType::Object
    } else if is_string(text) {
        LiteralType::String
    } else {
        LiteralType::Unknown
    }
}

/// Quote style of text wrapped in a matching pair of quotes.
pub fn quote_style(text: &str) -> Option<QuoteStyle> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes.iter().any(|&b| b == b'\r' || b == b'\n') {
        return None;
    }
    match (bytes[0], bytes[bytes.len() - 1]) {
        (b'"', b'"') => Some(QuoteStyle::Double),
        (b'\'', b'\'') => Some(QuoteStyle::Single),
        _ => None,
    }
}

/// Strip one layer of surrounding quotes. Escapes are left as written.
#[inline]
pub fn unquote(text: &str) -> &str {
    match quote_style(text) {
        Some(_) => &text[1..text.len() - 1],
        None => text,
    }
}

/// Wrap `value` in `style` quotes, escaping that quote character.
///
/// Already escaped quotes are unescaped first so they are not doubled.
pub fn quote(value: &str, style: QuoteStyle) -> String {
    let quote = style.quote();
    let body = value
        .replace(style.escaped(), &quote.to_string())
        .replace(quote, style.escaped());

    let mut out = String::with_capacity(body.len() + 2);
    out.push(quote);
    out.push_str(&body);
    out.push(quote);
    out
}

/// Trimmed elements of an array literal, split on every comma.
///
/// `[]` (or whitespace only) has no elements.
pub fn array_elements(text: &str) -> Vec<&str> {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner.split(',').map(str::trim).collect()
}

/// `-?digits(.digits)?`
fn is_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.map_or(true, all_digits)
}

#[inline]
fn is_enclosed(text: &str, open: u8, close: u8) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 2
        && bytes[0] == open
        && bytes[bytes.len() - 1] == close
        && !bytes.contains(&b'\n')
}

fn is_string(text: &str) -> bool {
    let Some(style) = quote_style(text) else {
        return false;
    };
    let body = &text[1..text.len() - 1];
    !body.replace(style.escaped(), "").contains(style.quote())
}
