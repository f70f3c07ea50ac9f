//! Attribute-list parsing
//!
//! Several tags carry a value of the form `K1=V1,K2="quoted,value",...`.
//! Commas inside a double-quoted value do not separate tokens, so the
//! tokenizer is a quote-aware scanner rather than a plain split.

use crate::error::{PlaylistError, Result};

/// An attribute list in first-seen key order.
///
/// Keys are unique; re-assigning an existing key keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    pairs: Vec<(String, String)>,
}

impl AttributeList {
    /// Look up the unquoted value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate pairs in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }
}

impl IntoIterator for AttributeList {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

// Strip one surrounding pair of double quotes, if present.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an attribute list.
///
/// Each non-empty token must contain a `=` separating key from value; the
/// split happens at the first `=`, so quoted values may themselves contain
/// `=`. Quoted values are stored unquoted.
pub fn parse_attribute_list(list: &str) -> Result<AttributeList> {
    let mut attrs = AttributeList::default();

    let mut start = 0;
    let mut in_quotes = false;
    let mut push = |token: &str| -> Result<()> {
        if token.is_empty() {
            return Ok(());
        }
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| PlaylistError::InvalidAttributeList(token.to_string()))?;
        attrs.insert(key, unquote(value));
        Ok(())
    };

    for (i, b) in list.bytes().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                push(&list[start..i])?;
                start = i + 1;
            }
            _ => {}
        }
    }
    push(&list[start..])?;

    Ok(attrs)
}
