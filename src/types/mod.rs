pub mod extensions;
pub mod header;
pub mod info;
pub mod items;
pub mod operation;
pub mod parameter;
pub mod path;
pub mod response;
pub mod schema;
pub mod security;
pub mod tag;
pub mod xml;

pub use extensions::Extensions;
pub use header::Header;
pub use info::{Contact, Info, License};
pub use items::Items;
pub use operation::{Operation, OperationKey, OperationMap};
pub use parameter::Parameter;
pub use path::{PathItem, Paths};
pub use response::{Response, Responses};
pub use schema::{Schema, SchemaOrBool, SchemaOrSchemas, StringOrStrings};
pub use security::{Scopes, SecurityRequirements, SecurityScheme};
pub use tag::Tag;
pub use xml::Xml;

use crate::location::Location;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub(crate) fn put_string(target: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.is_empty() {
        target.insert(String::from(key), Value::String(value.to_owned()));
    }
}

pub(crate) fn put_nonzero(target: &mut Map<String, Value>, key: &str, value: i64) {
    if value != 0 {
        target.insert(String::from(key), Value::from(value));
    }
}

pub(crate) fn put_flag(target: &mut Map<String, Value>, key: &str, value: bool) {
    if value {
        target.insert(String::from(key), Value::Bool(true));
    }
}

/// The root swagger document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Swagger {
    pub swagger: String,
    pub info: Info,
    pub host: String,
    pub base_path: String,
    pub schemes: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub paths: Paths,
    pub definitions: BTreeMap<String, Schema>,
    pub parameters: BTreeMap<String, Parameter>,
    pub responses: BTreeMap<String, Response>,
    pub security_definitions: BTreeMap<String, SecurityScheme>,
    pub security: Vec<SecurityRequirements>,
    pub tags: Vec<Tag>,
    pub external_docs: Option<ExternalDocumentation>,
    pub extensions: Extensions,
    pub(crate) operation_map: OperationMap,
    pub(crate) doc_loc: Location,
}

impl Swagger {
    pub fn new() -> Self {
        Swagger::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }

    /// Count of operations across every path item.
    pub fn operation_count(&self) -> usize {
        self.operation_map.len()
    }

    /// The operation index built after parsing: every canonical
    /// `(path, method)` key with the location its operation was parsed at.
    pub fn operation_map(&self) -> &OperationMap {
        &self.operation_map
    }

    /// Looks an operation up by its natural key.
    pub fn operation(&self, key: &OperationKey) -> Option<&Operation> {
        self.paths.items.get(&key.path)?.operation(&key.method)
    }

    /// Every operation in the document, sorted by path then method.
    pub fn operations(&self) -> Vec<&Operation> {
        let mut result: Vec<&Operation> = self
            .paths
            .items
            .values()
            .flat_map(PathItem::operations)
            .collect();
        result.sort_by(|a, b| a.key.cmp(&b.key));
        result
    }
}

/// A link to documentation hosted outside the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalDocumentation {
    pub description: String,
    pub url: String,
    pub extensions: Extensions,
    pub(crate) doc_loc: Location,
}

impl ExternalDocumentation {
    pub fn new() -> Self {
        ExternalDocumentation::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        put_string(&mut obj, "description", &self.description);
        put_string(&mut obj, "url", &self.url);
        self.extensions.apply_to(&mut obj);
        Value::Object(obj)
    }
}
