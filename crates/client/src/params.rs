//! Request parameters
//!
//! Rakuten operations take free-form query parameters (`keyword`,
//! `genreId`, `page`, ...). `Params` keeps them as an ordered string map so
//! built URLs are deterministic, which also keeps request logs and tests
//! stable.

use std::collections::BTreeMap;

/// Parameter names the SDK manages itself and strips from caller input.
///
/// `format` is forced to JSON by the SDK and `callback` (JSONP) makes no
/// sense outside a browser.
pub const RESERVED_PARAMS: &[&str] = &["callback", "format"];

/// Ordered request parameter map with a builder-style API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: BTreeMap<String, String>,
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.entries.insert(key.into(), value.to_string());
        self
    }

    /// Remove a parameter.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Look up a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop the parameters the SDK manages itself.
    pub(crate) fn strip_reserved(&mut self) {
        for key in RESERVED_PARAMS {
            self.entries.remove(*key);
        }
    }

    /// Iterate as `(&str, &str)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the pairs for use as a query string or form body.
    pub(crate) fn as_pairs(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params = params.set(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_and_replaces() {
        let params = Params::new()
            .set("keyword", "Rakuten")
            .set("page", 1)
            .set("page", 2);

        assert_eq!(params.get("keyword"), Some("Rakuten"));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn iteration_is_key_ordered() {
        let params = Params::new().set("zzz", "1").set("aaa", "2");
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["aaa", "zzz"]);
    }

    #[test]
    fn reserved_params_are_stripped() {
        let mut params = Params::new()
            .set("callback", "it_will_be_deleted")
            .set("format", "xml")
            .set("keyword", "kept");

        params.strip_reserved();
        assert_eq!(params.get("callback"), None);
        assert_eq!(params.get("format"), None);
        assert_eq!(params.get("keyword"), Some("kept"));
    }

    #[test]
    fn from_iterator_collects_pairs() {
        let params: Params = [("keyword", "a"), ("hits", "30")].into_iter().collect();
        assert_eq!(params.get("hits"), Some("30"));
    }
}
