//! Ordered query-string parameters.

use std::fmt::Display;

/// Query parameters appended to a request URL.
///
/// Keys keep their insertion order so the encoded string is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing an existing value in place.
    pub fn set(mut self, key: &str, value: impl Display) -> Self {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encoded `k=v&k=v` form, without a leading `?`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: AsRef<str>, V: Display> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Query::new(), |query, (k, v)| query.set(k.as_ref(), v))
    }
}

impl<K: AsRef<str>, V: Display, const N: usize> From<[(K, V); N]> for Query {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_encodes_to_empty_string() {
        assert!(Query::new().is_empty());
        assert_eq!(Query::new().encode(), "");
    }

    #[test]
    fn keeps_insertion_order() {
        let query = Query::new().set("number", 10).set("order", "ASC");
        assert_eq!(query.encode(), "number=10&order=ASC");
    }

    #[test]
    fn set_replaces_in_place() {
        let query = Query::new()
            .set("number", 1)
            .set("context", "edit")
            .set("number", 5);
        assert_eq!(query.get("number"), Some("5"));
        assert_eq!(query.encode(), "number=5&context=edit");
    }

    #[test]
    fn values_are_percent_encoded() {
        let query = Query::from([("search", "rust & wordpress"), ("tag", "a/b")]);
        assert_eq!(query.encode(), "search=rust%20%26%20wordpress&tag=a%2Fb");
    }

    #[test]
    fn collects_from_iterator() {
        let query: Query = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(query.get("b"), Some("2"));
        assert_eq!(query.get("c"), None);
    }
}
