//! Directive attribute parsing.
//!
//! Attribute text is a run of `key="value"` pairs separated by spaces. Values
//! are read up to the next `"`, so they cannot contain one; they may contain
//! `=` or spaces.

use memchr::memchr;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sigil_carton::CompactString;

/// Ordered attribute map of one directive.
///
/// Keeps source order. A repeated key keeps its first position and takes the
/// last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(CompactString, CompactString)>,
}

impl Attributes {
    /// Parse the attribute text that follows the tag keyword.
    pub fn parse(text: &str) -> Self {
        let mut attrs = Self::default();
        let mut rest = text.trim();

        while !rest.is_empty() {
            let Some(eq) = memchr(b'=', rest.as_bytes()) else {
                break;
            };
            let key = rest[..eq].trim();
            let Some(body) = rest[eq + 1..].strip_prefix('"') else {
                break;
            };
            let Some(close) = memchr(b'"', body.as_bytes()) else {
                break;
            };
            if !key.is_empty() {
                attrs.insert(key, &body[..close]);
            }
            rest = body[close + 1..].trim_start();
        }

        attrs
    }

    /// Value of `key`, if present.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing the value in place when it already exists.
    pub fn insert(&mut self, key: impl Into<CompactString>, value: impl Into<CompactString>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `hash` address, ignoring an empty one.
    #[inline]
    pub fn hash(&self) -> Option<&str> {
        self.get("hash").filter(|h| !h.is_empty())
    }

    /// The `group` name, ignoring an empty one.
    #[inline]
    pub fn group(&self) -> Option<&str> {
        self.get("group").filter(|g| !g.is_empty())
    }

    /// The `access` list, if the directive is restricted.
    pub fn access(&self) -> Option<AccessList> {
        self.get("access")
            .map(AccessList::parse)
            .filter(|list| !list.is_empty())
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of attribute names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Attributes, A::Error> {
                let mut attrs = Attributes::default();
                while let Some((key, value)) =
                    access.next_entry::<CompactString, CompactString>()?
                {
                    attrs.insert(key, value);
                }
                Ok(attrs)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// Users allowed to see and edit a restricted directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessList {
    users: Vec<CompactString>,
}

impl AccessList {
    /// Parse a `;`-separated list; entries are trimmed, empties dropped and
    /// duplicates removed.
    pub fn parse(text: &str) -> Self {
        let mut users: Vec<CompactString> = Vec::new();
        for user in text.split(';').map(str::trim) {
            if !user.is_empty() && !users.iter().any(|u| u == user) {
                users.push(CompactString::new(user));
            }
        }
        Self { users }
    }

    /// Whether `user` may access the directive. Anonymous callers never may.
    #[inline]
    pub fn allows(&self, user: Option<&str>) -> bool {
        user.is_some_and(|user| self.users.iter().any(|u| u == user))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    #[inline]
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(CompactString::as_str)
    }
}
