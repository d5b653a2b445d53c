//! Normalized key/value storage for parameter files

use crate::params::normalize::normalize_value;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Key under which the module list of a parameter file is stored.
pub const ACTIVE_THORNS_KEY: &str = "activethorns";

/// Mapping from lower-cased parameter key to its value.
///
/// Values are stored raw by the line parser and rewritten by
/// [`ParameterStore::normalize`] before anything reads them as typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterStore {
    entries: BTreeMap<String, String>,
    #[serde(skip)]
    normalized: bool,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value. The key is stored lower-cased; the value
    /// is normalized right away when the store already is.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let value = if self.normalized {
            normalize_value(&value)
        } else {
            value
        };
        self.entries.insert(key.to_lowercase(), value);
    }

    /// Case-insensitive presence check.
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    /// Case-insensitive lookup of the stored string.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Normalize every stored value.
    ///
    /// Runs at most once per store; later calls leave the values untouched so
    /// that a value such as `"\"yes\""` can never be rewritten twice.
    pub fn normalize(&mut self) {
        if self.normalized {
            return;
        }
        for value in self.entries.values_mut() {
            *value = normalize_value(value);
        }
        self.normalized = true;
        debug!(entries = self.entries.len(), "normalized parameter values");
    }

    /// Modules enabled by the `ActiveThorns` line, in file order.
    pub fn active_thorns(&self) -> Vec<String> {
        self.value(ACTIVE_THORNS_KEY)
            .map(|list| list.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ParameterStore {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut store = ParameterStore::new();
        for (key, value) in iter {
            store.insert(key.as_ref(), value);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_lowercased() {
        let mut store = ParameterStore::new();
        store.insert("Driver::Global_NX", "12");

        assert_eq!(store.iter().next(), Some(("driver::global_nx", "12")));
        assert!(store.exists("DRIVER::GLOBAL_NX"));
        assert_eq!(store.value("driver::Global_nx"), Some("12"));
    }

    #[test]
    fn test_duplicate_keys_overwrite() {
        let store: ParameterStore = [("grid::type", "box"), ("GRID::TYPE", "byrange")]
            .into_iter()
            .collect();

        assert_eq!(store.len(), 1);
        assert_eq!(store.value("grid::type"), Some("byrange"));
    }

    #[test]
    fn test_insert_after_normalize_normalizes_value() {
        let mut store: ParameterStore = [("grid::type", "box")].into_iter().collect();
        store.normalize();
        store.insert("Grid::Avoid_Origin", " \"Yes\" ");

        assert!(store.is_normalized());
        assert_eq!(store.value("grid::avoid_origin"), Some("1"));
    }

    #[test]
    fn test_normalize_runs_once() {
        let mut store = ParameterStore::new();
        store.insert("grid::avoid_origin", "  \"no\" ");
        store.insert("io::out_dir", "\"\"yes\"\"");

        store.normalize();
        assert!(store.is_normalized());
        assert_eq!(store.value("grid::avoid_origin"), Some("0"));
        assert_eq!(store.value("io::out_dir"), Some("1"));

        store.normalize();
        assert_eq!(store.value("grid::avoid_origin"), Some("0"));
        assert_eq!(store.value("io::out_dir"), Some("1"));
    }

    #[test]
    fn test_active_thorns_split_on_whitespace() {
        let mut store = ParameterStore::new();
        assert!(store.active_thorns().is_empty());

        store.insert("ActiveThorns", "PUGH  CartGrid3D Time");
        assert_eq!(store.active_thorns(), vec!["PUGH", "CartGrid3D", "Time"]);
    }
}
