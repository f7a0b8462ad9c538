use crate::location::Location;
use crate::types::ExternalDocumentation;
use crate::types::extensions::Extensions;
use crate::types::parameter::Parameter;
use crate::types::response::Responses;
use crate::types::security::{SecurityRequirements, security_requirements_to_value};
use crate::types::{put_flag, put_string};
use http::Method;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// The natural key of an operation: its path template and upper-case method.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationKey {
    pub path: String,
    pub method: String,
}

impl OperationKey {
    pub fn new(path: impl Into<String>, method: &Method) -> Self {
        OperationKey {
            path: path.into(),
            method: method.as_str().to_owned(),
        }
    }

    /// Returns the key with its method coerced to upper-case.
    pub fn canonicalize(self) -> Self {
        OperationKey {
            path: self.path,
            method: self.method.to_uppercase(),
        }
    }
}

impl Display for OperationKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

impl Default for OperationKey {
    fn default() -> Self {
        OperationKey {
            path: String::new(),
            method: String::new(),
        }
    }
}

/// One HTTP method handler at one path.
///
/// Created once while its enclosing path item is parsed and never mutated
/// afterwards; the document-wide operation index is built in a separate pass
/// once the whole tree exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    pub id: String,
    pub summary: String,
    pub description: String,
    pub deprecated: bool,
    pub tags: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub schemes: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub responses: Responses,
    pub security: Vec<SecurityRequirements>,
    pub external_docs: Option<ExternalDocumentation>,
    pub extensions: Extensions,
    pub key: OperationKey,
    pub(crate) doc_loc: Location,
}

impl Operation {
    pub fn new(path: impl Into<String>, method: &Method) -> Self {
        Operation {
            key: OperationKey::new(path, method),
            ..Operation::default()
        }
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        put_string(&mut obj, "operationId", &self.id);
        put_string(&mut obj, "summary", &self.summary);
        put_string(&mut obj, "description", &self.description);
        put_flag(&mut obj, "deprecated", self.deprecated);
        for (field, values) in [
            ("tags", &self.tags),
            ("consumes", &self.consumes),
            ("produces", &self.produces),
            ("schemes", &self.schemes),
        ] {
            if !values.is_empty() {
                obj.insert(
                    String::from(field),
                    Value::Array(values.iter().map(|s| Value::String(s.clone())).collect()),
                );
            }
        }
        if !self.parameters.is_empty() {
            obj.insert(
                String::from("parameters"),
                Value::Array(self.parameters.iter().map(Parameter::to_value).collect()),
            );
        }
        if !self.responses.is_empty() {
            obj.insert(String::from("responses"), self.responses.to_value());
        }
        if !self.security.is_empty() {
            obj.insert(
                String::from("security"),
                Value::Array(
                    self.security
                        .iter()
                        .map(security_requirements_to_value)
                        .collect(),
                ),
            );
        }
        if let Some(external_docs) = &self.external_docs {
            obj.insert(String::from("externalDocs"), external_docs.to_value());
        }
        self.extensions.apply_to(&mut obj);
        Value::Object(obj)
    }
}

/// The document-wide operation index: every canonical [`OperationKey`] mapped
/// to the location its operation was parsed at. Iteration order is the
/// deterministic listing order (path first, then method).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationMap(BTreeMap<OperationKey, Location>);

impl OperationMap {
    pub fn new() -> Self {
        OperationMap::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &OperationKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn location(&self, key: &OperationKey) -> Option<&Location> {
        self.0.get(key)
    }

    pub(crate) fn insert(&mut self, key: OperationKey, location: Location) {
        self.0.insert(key.canonicalize(), location);
    }

    /// Keys sorted by path, then method.
    pub fn keys(&self) -> impl Iterator<Item = &OperationKey> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OperationKey, &Location)> {
        self.0.iter()
    }

    /// Every key in either map; on collision the other map's location wins.
    pub fn union(&self, other: &OperationMap) -> OperationMap {
        let mut result = self.0.clone();
        for (key, loc) in &other.0 {
            result.insert(key.clone(), loc.clone());
        }
        OperationMap(result)
    }

    /// Keys in this map but not in the other.
    pub fn difference(&self, other: &OperationMap) -> OperationMap {
        OperationMap(
            self.0
                .iter()
                .filter(|(key, _)| !other.contains(key))
                .map(|(key, loc)| (key.clone(), loc.clone()))
                .collect(),
        )
    }

    /// Keys present in both maps, with the other map's locations.
    pub fn intersect(&self, other: &OperationMap) -> OperationMap {
        OperationMap(
            other
                .0
                .iter()
                .filter(|(key, _)| self.contains(key))
                .map(|(key, loc)| (key.clone(), loc.clone()))
                .collect(),
        )
    }

    /// Keys in exactly one of the two maps.
    pub fn symmetric_difference(&self, other: &OperationMap) -> OperationMap {
        self.difference(other).union(&other.difference(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(path: &str, method: &Method) -> OperationKey {
        OperationKey::new(path, method)
    }

    fn map(keys: &[OperationKey]) -> OperationMap {
        let mut result = OperationMap::new();
        for k in keys {
            result.insert(k.clone(), Location::root());
        }
        result
    }

    #[test]
    fn test_canonicalize_uppercases_method() {
        let k = OperationKey {
            path: String::from("/pets"),
            method: String::from("get"),
        }
        .canonicalize();
        assert_eq!(k.method, "GET");
        assert_eq!(k.path, "/pets");
    }

    #[test]
    fn test_key_display() {
        assert_eq!(key("/pets", &Method::GET).to_string(), "GET /pets");
    }

    #[test]
    fn test_keys_sort_by_path_then_method() {
        let m = map(&[
            key("/pets", &Method::POST),
            key("/owners", &Method::GET),
            key("/pets", &Method::GET),
        ]);
        let keys: Vec<String> = m.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["GET /owners", "GET /pets", "POST /pets"]);
    }

    #[test]
    fn test_set_algebra() {
        let left = map(&[key("/pets", &Method::GET), key("/pets", &Method::POST)]);
        let right = map(&[key("/pets", &Method::GET), key("/owners", &Method::GET)]);

        let union = left.union(&right);
        assert_eq!(union.len(), 3);

        let removed = left.difference(&right);
        assert_eq!(removed.len(), 1);
        assert!(removed.contains(&key("/pets", &Method::POST)));

        let shared = left.intersect(&right);
        assert_eq!(shared.len(), 1);
        assert!(shared.contains(&key("/pets", &Method::GET)));

        let churn = left.symmetric_difference(&right);
        assert_eq!(churn.len(), 2);
        assert!(churn.contains(&key("/pets", &Method::POST)));
        assert!(churn.contains(&key("/owners", &Method::GET)));
    }
}
