//! Tag/value conversion.
//!
//! [`extract`] turns a literal into the value a widget shows; [`render`]
//! turns a submitted value back into a literal shaped like the one it
//! replaces. Both are gated by the tag's legal literal types.

use crate::literal::{array_elements, classify, quote, quote_style, unquote, QuoteStyle};
use crate::types::{FailureReason, LiteralType, Tag, TagValue};

/// Convert a trimmed literal into its widget value.
pub fn extract(tag: Tag, literal: &str) -> Result<(TagValue, LiteralType), FailureReason> {
    let ty = checked_type(tag, literal)?;

    let value = match ty {
        LiteralType::String => TagValue::Text(unquote(literal).to_string()),
        LiteralType::Array => array_elements(literal)
            .into_iter()
            .map(|element| match classify(element) {
                LiteralType::String => unquote(element),
                _ => element,
            })
            .collect(),
        _ => TagValue::Text(literal.to_string()),
    };

    let value = match (tag, value) {
        (Tag::Toggle, TagValue::Text(text)) => {
            let on = text == "true" || leading_float(&text) == 1.0;
            TagValue::from(if on { "1" } else { "0" })
        }
        (_, value) => value,
    };

    Ok((value, ty))
}

/// Render `value` as a replacement for the trimmed `literal`.
pub fn render(tag: Tag, literal: &str, value: &TagValue) -> Result<String, FailureReason> {
    let ty = checked_type(tag, literal)?;
    let unsupported = || FailureReason::UnsupportedValue { tag };
    let style = quote_style(literal).unwrap_or(QuoteStyle::Double);

    match tag {
        Tag::Toggle => {
            let on = switch_reading(value);
            Ok(match ty {
                LiteralType::Boolean => bool_literal(on == 1),
                LiteralType::Number => on.to_string(),
                _ => quote(&on.to_string(), style),
            })
        }
        Tag::Radio | Tag::Select | Tag::Step | Tag::Input => {
            let text = value.as_text().ok_or_else(unsupported)?;
            match ty {
                LiteralType::Number if tag == Tag::Input => {
                    render_float(leading_float(text)).ok_or_else(unsupported)
                }
                LiteralType::Number => Ok(text.to_string()),
                _ => Ok(quote(text, style)),
            }
        }
        Tag::Checkbox => match value {
            TagValue::Text(text) => render_array(literal, &[text.as_str()], tag),
            TagValue::List(items) => {
                let items: Vec<&str> = items.iter().map(String::as_str).collect();
                render_array(literal, &items, tag)
            }
        },
        Tag::Range => match value {
            TagValue::Text(text) => {
                let bounds: Vec<&str> = text.split('-').collect();
                if bounds.len() != 2 {
                    return Err(unsupported());
                }
                render_array(literal, &bounds, tag)
            }
            TagValue::List(items) => {
                let items: Vec<&str> = items.iter().map(String::as_str).collect();
                render_array(literal, &items, tag)
            }
        },
        Tag::Date | Tag::Colorpicker => {
            let text = value.as_text().ok_or_else(unsupported)?;
            Ok(quote(text, style))
        }
        Tag::Textarea => {
            let text = value.as_text().ok_or_else(unsupported)?;
            let flat: String = text.chars().filter(|&c| c != '\r' && c != '\n').collect();
            Ok(quote(&flat, style))
        }
    }
}

fn checked_type(tag: Tag, literal: &str) -> Result<LiteralType, FailureReason> {
    let found = classify(literal);
    if tag.accepts(found) {
        Ok(found)
    } else {
        Err(FailureReason::IllegalLiteral { tag, found })
    }
}

/// Render `items` as `[a,b,...]`, each coerced to the type of its template
/// element in `literal`.
///
/// Templates pair up by index when both lists have the same length;
/// otherwise the first template element shapes every item.
fn render_array(literal: &str, items: &[&str], tag: Tag) -> Result<String, FailureReason> {
    let templates = array_elements(literal);
    let mut out = String::from("[");

    for (i, item) in items.iter().enumerate() {
        let template = if templates.len() == items.len() {
            templates.get(i)
        } else {
            templates.first()
        };
        let rendered = template
            .and_then(|template| coerce(item.trim(), template))
            .ok_or(FailureReason::UnsupportedValue { tag })?;
        if i > 0 {
            out.push(',');
        }
        out.push_str(&rendered);
    }

    out.push(']');
    Ok(out)
}

/// Coerce one array item to the literal type of `template`.
fn coerce(item: &str, template: &str) -> Option<String> {
    match classify(template) {
        LiteralType::Number => render_float(leading_float(item)),
        LiteralType::String => Some(quote(item, quote_style(template)?)),
        LiteralType::Boolean => Some(bool_literal(item == "true" || leading_int(item) == 1)),
        _ => None,
    }
}

/// Integer reading of a toggle submission. An unchecked box submits an
/// empty list.
fn switch_reading(value: &TagValue) -> i64 {
    match value {
        TagValue::Text(text) => leading_int(text),
        TagValue::List(items) => i64::from(!items.is_empty()),
    }
}

#[inline]
fn bool_literal(on: bool) -> String {
    String::from(if on { "true" } else { "false" })
}

/// Shortest round-trip rendering; `None` for infinities and NaN.
pub(crate) fn render_float(value: f64) -> Option<String> {
    value.is_finite().then(|| value.to_string())
}

/// Drop leading whitespace, vertical tab and form feed included.
fn skip_space(text: &str) -> &str {
    text.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c'])
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Lenient integer reading: leading whitespace, optional sign, the longest
/// run of digits. No digits reads as 0; overflow saturates.
pub(crate) fn leading_int(text: &str) -> i64 {
    let text = skip_space(text);
    let bytes = text.as_bytes();
    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let mut value: i64 = 0;
    for &b in &bytes[start..start + digit_run(&bytes[start..])] {
        let digit = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Lenient float reading: leading whitespace, then the longest prefix of the
/// form `[+-]digits[.digits][e[+-]digits]` (`.5` and `5.` included). No
/// numeric prefix reads as 0.
pub(crate) fn leading_float(text: &str) -> f64 {
    let text = skip_space(text);
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let int_digits = digit_run(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exp_digits = digit_run(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> TagValue {
        items.iter().copied().collect()
    }

    #[test]
    fn test_extract_scalars() {
        assert_eq!(
            extract(Tag::Input, "'Home'").unwrap(),
            (TagValue::from("Home"), LiteralType::String)
        );
        assert_eq!(
            extract(Tag::Select, "12").unwrap(),
            (TagValue::from("12"), LiteralType::Number)
        );
        assert_eq!(
            extract(Tag::Textarea, r#""a \"b\"""#).unwrap().0,
            TagValue::from(r#"a \"b\""#)
        );
    }

    #[test]
    fn test_extract_toggle() {
        assert_eq!(extract(Tag::Toggle, "true").unwrap().0, TagValue::from("1"));
        assert_eq!(extract(Tag::Toggle, "false").unwrap().0, TagValue::from("0"));
        assert_eq!(extract(Tag::Toggle, "1").unwrap().0, TagValue::from("1"));
        assert_eq!(extract(Tag::Toggle, "2").unwrap().0, TagValue::from("0"));
        assert_eq!(extract(Tag::Toggle, "'1'").unwrap().0, TagValue::from("1"));
        assert_eq!(extract(Tag::Toggle, "'true'").unwrap().0, TagValue::from("1"));
        assert_eq!(extract(Tag::Toggle, "'yes'").unwrap().0, TagValue::from("0"));
    }

    #[test]
    fn test_extract_array() {
        let (value, ty) = extract(Tag::Checkbox, r#"[1, 'two', "three", true]"#).unwrap();
        assert_eq!(ty, LiteralType::Array);
        assert_eq!(value, list(&["1", "two", "three", "true"]));
        assert_eq!(extract(Tag::Range, "[]").unwrap().0, TagValue::List(vec![]));
    }

    #[test]
    fn test_extract_illegal_type() {
        assert_eq!(
            extract(Tag::Checkbox, "5"),
            Err(FailureReason::IllegalLiteral {
                tag: Tag::Checkbox,
                found: LiteralType::Number,
            })
        );
        assert!(extract(Tag::Date, "{a: 1}").is_err());
        assert!(extract(Tag::Input, "foo").is_err());
    }

    #[test]
    fn test_render_toggle() {
        assert_eq!(render(Tag::Toggle, "false", &"1".into()).unwrap(), "true");
        assert_eq!(render(Tag::Toggle, "true", &"0".into()).unwrap(), "false");
        assert_eq!(render(Tag::Toggle, "0", &"1".into()).unwrap(), "1");
        assert_eq!(render(Tag::Toggle, "'0'", &"1".into()).unwrap(), "'1'");
        assert_eq!(render(Tag::Toggle, "true", &list(&[])).unwrap(), "false");
        assert_eq!(render(Tag::Toggle, "false", &list(&["on"])).unwrap(), "true");
        assert_eq!(render(Tag::Toggle, "true", &"yes".into()).unwrap(), "false");
    }

    #[test]
    fn test_render_scalar_tags() {
        assert_eq!(render(Tag::Radio, "1", &"2.00".into()).unwrap(), "2.00");
        assert_eq!(render(Tag::Input, "1", &"2.00".into()).unwrap(), "2");
        assert_eq!(render(Tag::Input, "1", &"abc".into()).unwrap(), "0");
        assert_eq!(render(Tag::Input, "1", &" 3.5kg".into()).unwrap(), "3.5");
        assert_eq!(render(Tag::Select, "'a'", &"it's".into()).unwrap(), r"'it\'s'");
        assert_eq!(render(Tag::Step, r#""a""#, &"b".into()).unwrap(), r#""b""#);
        assert_eq!(
            render(Tag::Radio, "1", &list(&["1"])),
            Err(FailureReason::UnsupportedValue { tag: Tag::Radio })
        );
        assert!(render(Tag::Input, "1", &"1e999".into()).is_err());
    }

    #[test]
    fn test_render_string_only_tags() {
        assert_eq!(render(Tag::Date, "'2020-01-01'", &"2021-02-03".into()).unwrap(), "'2021-02-03'");
        assert_eq!(render(Tag::Colorpicker, r##""#000""##, &"#fff".into()).unwrap(), r##""#fff""##);
        assert_eq!(
            render(Tag::Textarea, "''", &"line one\r\nline two\n".into()).unwrap(),
            "'line oneline two'"
        );
        assert!(render(Tag::Date, "5", &"x".into()).is_err());
    }

    #[test]
    fn test_render_checkbox_pairs_templates() {
        assert_eq!(render(Tag::Checkbox, "[1,2,3]", &list(&["4", "5", "6"])).unwrap(), "[4,5,6]");
        assert_eq!(render(Tag::Checkbox, "[1,2,3]", &list(&["4", "5"])).unwrap(), "[4,5]");
        assert_eq!(
            render(Tag::Checkbox, r#"[1, 'a', "b", true]"#, &list(&["2", "x", "y", "0"])).unwrap(),
            r#"[2,'x',"y",false]"#
        );
        assert_eq!(render(Tag::Checkbox, "['a']", &list(&["x", "y"])).unwrap(), "['x','y']");
        assert_eq!(render(Tag::Checkbox, "[false]", &list(&["true", "1", "0"])).unwrap(), "[true,true,false]");
        assert_eq!(render(Tag::Checkbox, "['a']", &"solo".into()).unwrap(), "['solo']");
        assert_eq!(render(Tag::Checkbox, "[1]", &list(&[])).unwrap(), "[]");
    }

    #[test]
    fn test_render_checkbox_rejects_bad_templates() {
        let unsupported = Err(FailureReason::UnsupportedValue { tag: Tag::Checkbox });
        assert_eq!(render(Tag::Checkbox, "[[1], 2]", &list(&["1", "2"])), unsupported);
        assert_eq!(render(Tag::Checkbox, "[x]", &list(&["1"])), unsupported);
        assert_eq!(render(Tag::Checkbox, "[]", &list(&["1"])), unsupported);
        assert_eq!(render(Tag::Checkbox, "[]", &list(&[])).unwrap(), "[]");
    }

    #[test]
    fn test_render_range() {
        assert_eq!(render(Tag::Range, "[1, 10]", &"3-7".into()).unwrap(), "[3,7]");
        assert_eq!(render(Tag::Range, "['1','9']", &" 2 - 8 ".into()).unwrap(), "['2','8']");
        assert_eq!(render(Tag::Range, "[1, 10]", &list(&["0", "5"])).unwrap(), "[0,5]");
        assert!(render(Tag::Range, "[1, 10]", &"3".into()).is_err());
        assert!(render(Tag::Range, "[1, 10]", &"-3-7".into()).is_err());
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("42"), 42);
        assert_eq!(leading_int("  -7px"), -7);
        assert_eq!(leading_int("+3"), 3);
        assert_eq!(leading_int("1.9"), 1);
        assert_eq!(leading_int("abc"), 0);
        assert_eq!(leading_int(""), 0);
        assert_eq!(leading_int("99999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("2.50"), 2.5);
        assert_eq!(leading_float(".5"), 0.5);
        assert_eq!(leading_float("5."), 5.0);
        assert_eq!(leading_float("-1e3x"), -1000.0);
        assert_eq!(leading_float("4e"), 4.0);
        assert_eq!(leading_float("\t7 apples"), 7.0);
        assert_eq!(leading_float("."), 0.0);
        assert_eq!(leading_float("-"), 0.0);
        assert_eq!(leading_float("none"), 0.0);
    }

    #[test]
    fn test_render_float() {
        assert_eq!(render_float(4.0).as_deref(), Some("4"));
        assert_eq!(render_float(2.5).as_deref(), Some("2.5"));
        assert_eq!(render_float(-0.125).as_deref(), Some("-0.125"));
        assert_eq!(render_float(f64::INFINITY), None);
    }
}
