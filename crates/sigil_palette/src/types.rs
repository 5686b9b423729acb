//! Type definitions for sigil_palette.
//!
//! This module contains the tag table, the literal classification types and
//! the owned structures handed back to the host by `parse` and `inject`.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use sigil_carton::{bitflags, CompactString};

use crate::directive::Attributes;

/// Widget kind a directive binds its literal to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Toggle,
    Radio,
    Checkbox,
    Select,
    Input,
    Textarea,
    Date,
    Range,
    Step,
    Colorpicker,
}

static TAGS: phf::Map<&'static str, Tag> = phf_map! {
    "toggle" => Tag::Toggle,
    "radio" => Tag::Radio,
    "checkbox" => Tag::Checkbox,
    "select" => Tag::Select,
    "input" => Tag::Input,
    "textarea" => Tag::Textarea,
    "date" => Tag::Date,
    "range" => Tag::Range,
    "step" => Tag::Step,
    "colorpicker" => Tag::Colorpicker,
};

impl Tag {
    /// Every tag, in the order the directive grammar lists them.
    pub const ALL: [Tag; 10] = [
        Tag::Toggle,
        Tag::Radio,
        Tag::Checkbox,
        Tag::Select,
        Tag::Input,
        Tag::Textarea,
        Tag::Date,
        Tag::Range,
        Tag::Step,
        Tag::Colorpicker,
    ];

    /// Look up a tag by its directive keyword.
    #[inline]
    pub fn from_name(name: &str) -> Option<Tag> {
        TAGS.get(name).copied()
    }

    /// The directive keyword, as written after `@`.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::Toggle => "toggle",
            Tag::Radio => "radio",
            Tag::Checkbox => "checkbox",
            Tag::Select => "select",
            Tag::Input => "input",
            Tag::Textarea => "textarea",
            Tag::Date => "date",
            Tag::Range => "range",
            Tag::Step => "step",
            Tag::Colorpicker => "colorpicker",
        }
    }

    /// Literal types a directive of this tag may govern.
    #[inline]
    pub const fn legal_types(self) -> LiteralTypes {
        match self {
            Tag::Toggle => LiteralTypes::BOOLEAN
                .union(LiteralTypes::NUMBER)
                .union(LiteralTypes::STRING),
            Tag::Radio | Tag::Select | Tag::Input | Tag::Step => {
                LiteralTypes::NUMBER.union(LiteralTypes::STRING)
            }
            Tag::Checkbox | Tag::Range => LiteralTypes::ARRAY,
            Tag::Textarea | Tag::Date | Tag::Colorpicker => LiteralTypes::STRING,
        }
    }

    /// Whether a literal of type `ty` is legal for this tag.
    ///
    /// `Unknown` is never legal.
    #[inline]
    pub fn accepts(self, ty: LiteralType) -> bool {
        let flag = ty.flag();
        !flag.is_empty() && self.legal_types().contains(flag)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of literal types, used for the per-tag legality table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LiteralTypes: u8 {
        const BOOLEAN = 1 << 0;
        const NUMBER = 1 << 1;
        const STRING = 1 << 2;
        const ARRAY = 1 << 3;
        const OBJECT = 1 << 4;
    }
}

/// Classification of a JavaScript literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralType {
    Boolean,
    Number,
    String,
    Array,
    Object,
    /// Not a literal the grammar recognises.
    Unknown,
}

impl LiteralType {
    /// The matching flag; empty for `Unknown`.
    #[inline]
    pub const fn flag(self) -> LiteralTypes {
        match self {
            LiteralType::Boolean => LiteralTypes::BOOLEAN,
            LiteralType::Number => LiteralTypes::NUMBER,
            LiteralType::String => LiteralTypes::STRING,
            LiteralType::Array => LiteralTypes::ARRAY,
            LiteralType::Object => LiteralTypes::OBJECT,
            LiteralType::Unknown => LiteralTypes::empty(),
        }
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            LiteralType::Boolean => "boolean",
            LiteralType::Number => "number",
            LiteralType::String => "string",
            LiteralType::Array => "array",
            LiteralType::Object => "object",
            LiteralType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LiteralType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Widget-side value of a directive.
///
/// Scalar widgets exchange text; checkbox and range exchange lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    List(Vec<String>),
}

impl TagValue {
    /// Borrow the text of a scalar value.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            TagValue::List(_) => None,
        }
    }

    /// Borrow the items of a list value.
    #[inline]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            TagValue::Text(_) => None,
            TagValue::List(items) => Some(items),
        }
    }
}

impl From<&str> for TagValue {
    #[inline]
    fn from(text: &str) -> Self {
        TagValue::Text(text.to_string())
    }
}

impl From<String> for TagValue {
    #[inline]
    fn from(text: String) -> Self {
        TagValue::Text(text)
    }
}

impl<S: Into<String>> FromIterator<S> for TagValue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TagValue::List(iter.into_iter().map(Into::into).collect())
    }
}

/// A directive resolved against its literal, as presented to a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    /// Widget kind.
    pub tag: Tag,
    /// Address for later injection, absent until hashes are allocated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<CompactString>,
    /// Every attribute written on the directive, in source order.
    pub attributes: Attributes,
    /// Current value converted for the widget.
    pub value: TagValue,
    /// Type of the governed literal.
    pub js_type: LiteralType,
}

/// Controls sharing a `group` attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlGroup {
    /// Group name; empty for directives without a group.
    pub name: CompactString,
    pub controls: Vec<Control>,
}

/// Output of `parse`: groups in order of first appearance, ungrouped last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualConfig {
    pub groups: Vec<ControlGroup>,
}

impl VisualConfig {
    /// Whether no directive resolved.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Find a group by name. The ungrouped controls live under `""`.
    pub fn group(&self, name: &str) -> Option<&ControlGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// All controls, group by group.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.groups.iter().flat_map(|g| g.controls.iter())
    }
}

/// Why a directive was skipped or an injection counted as failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FailureReason {
    #[error("no directive carries this hash")]
    HashNotFound,

    #[error("current user is not in the access list")]
    AccessDenied,

    #[error("directive is not followed by a config line")]
    MissingConfigLine,

    #[error("config line has no recognizable literal")]
    MalformedLine,

    #[error("@{tag} cannot govern a {found} literal")]
    IllegalLiteral { tag: Tag, found: LiteralType },

    #[error("value cannot be written into this @{tag} literal")]
    UnsupportedValue { tag: Tag },
}

/// One failed hash during injection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectFailure {
    pub hash: CompactString,
    pub reason: FailureReason,
}

/// Output of `inject`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectOutput {
    /// Source with every successful rewrite applied.
    pub content: String,
    /// Failed hashes in source order, unmatched hashes last.
    pub failures: Vec<InjectFailure>,
}

impl InjectOutput {
    #[inline]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Fatal error: the directive grammar could not be compiled.
#[derive(Debug, thiserror::Error)]
pub enum SigilError {
    #[error("failed to compile directive grammar: {0}")]
    Pattern(#[from] regex::Error),
}
