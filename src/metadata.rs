//! Immutable string key/value metadata.
//!
//! The values collected for a template's variables, and arbitrary metadata
//! attached to prompts or assistants, are held as a [`Metadata`] mapping.
//! Updates produce a new mapping rather than mutating in place, so a
//! `Metadata` can be shared freely across threads or renders without
//! coordination.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An immutable, ordered mapping from string keys to string values.
///
/// Serializes as a plain JSON object.
///
/// # Example
///
/// ```
/// use prompt_vars::Metadata;
///
/// let defaults = Metadata::from_pairs([("tone", "neutral"), ("lang", "en")]);
/// let overrides = defaults.set("tone", "formal");
///
/// assert_eq!(defaults.get("tone"), Some("neutral"));
/// assert_eq!(overrides.get("tone"), Some("formal"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from key/value pairs. On duplicate keys the later pair
    /// wins, matching the overwrite behavior of a mutable pair list.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Return a new mapping with `key` set to `value`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key.into(), value.into());
        Self { entries }
    }

    /// Return a new mapping with `key` absent.
    pub fn remove(&self, key: &str) -> Self {
        let mut entries = self.entries.clone();
        entries.remove(key);
        Self { entries }
    }

    /// Return a new mapping combining both; entries in `overrides` win on
    /// key collision.
    pub fn merged_with(&self, overrides: &Metadata) -> Self {
        let mut entries = self.entries.clone();
        for (key, value) in &overrides.entries {
            entries.insert(key.clone(), value.clone());
        }
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_leaves_original_untouched() {
        let base = Metadata::from_pairs([("a", "1")]);
        let updated = base.set("a", "2").set("b", "3");
        assert_eq!(base.get("a"), Some("1"));
        assert_eq!(base.len(), 1);
        assert_eq!(updated.get("a"), Some("2"));
        assert_eq!(updated.get("b"), Some("3"));
    }

    #[test]
    fn test_remove_returns_new_mapping() {
        let base = Metadata::from_pairs([("a", "1"), ("b", "2")]);
        let trimmed = base.remove("a");
        assert!(base.contains_key("a"));
        assert!(!trimmed.contains_key("a"));
        assert_eq!(trimmed.len(), 1);
    }

    #[test]
    fn test_merge_overrides_win() {
        let defaults = Metadata::from_pairs([("tone", "neutral"), ("lang", "en")]);
        let user = Metadata::from_pairs([("tone", "formal")]);
        let merged = defaults.merged_with(&user);
        assert_eq!(merged.get("tone"), Some("formal"));
        assert_eq!(merged.get("lang"), Some("en"));
    }

    #[test]
    fn test_later_duplicate_pair_wins() {
        let meta = Metadata::from_pairs([("k", "old"), ("k", "new")]);
        assert_eq!(meta.get("k"), Some("new"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_serializes_as_json_object() {
        let meta = Metadata::from_pairs([("b", "2"), ("a", "1")]);
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
