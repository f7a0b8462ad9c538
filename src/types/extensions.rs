use crate::EXTENSION_PREFIX;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Vendor extension fields: sibling keys prefixed with `x-`, captured as
/// opaque JSON values, preserved verbatim and never interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions(BTreeMap<String, Value>);

impl Extensions {
    pub fn new() -> Self {
        Extensions::default()
    }

    /// True when `key` carries the reserved extension prefix.
    pub fn is_extension_key(key: &str) -> bool {
        key.starts_with(EXTENSION_PREFIX)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Splats every extension key into `target`, used when marshalling the
    /// owning entity back to JSON.
    pub(crate) fn apply_to(&self, target: &mut Map<String, Value>) {
        for (key, value) in &self.0 {
            target.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_extension_key() {
        assert!(Extensions::is_extension_key("x-internal-id"));
        assert!(!Extensions::is_extension_key("summary"));
        assert!(!Extensions::is_extension_key("ex-tension"));
    }

    #[test]
    fn test_values_round_trip_unchanged() {
        let mut ext = Extensions::new();
        ext.insert("x-rate-limit", json!({"per": "minute", "count": 60}));

        assert_eq!(ext.len(), 1);
        assert_eq!(
            ext.get("x-rate-limit"),
            Some(&json!({"per": "minute", "count": 60}))
        );
    }

    #[test]
    fn test_apply_to_target() {
        let mut ext = Extensions::new();
        ext.insert("x-b", json!(2));
        ext.insert("x-a", json!(1));

        let mut target = Map::new();
        target.insert(String::from("name"), json!("pet"));
        ext.apply_to(&mut target);

        assert_eq!(target.len(), 3);
        assert_eq!(target.get("x-a"), Some(&json!(1)));
        assert_eq!(target.get("x-b"), Some(&json!(2)));
    }
}
