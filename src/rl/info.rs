use std::collections::BTreeMap;

/// Auxiliary key/value data returned next to observations
///
/// The snake environment always returns an empty map; wrappers and custom
/// controllers may attach numeric diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    entries: BTreeMap<String, f64>,
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert<K: Into<String>>(&mut self, key: K, value: f64) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
