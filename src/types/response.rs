use crate::location::Location;
use crate::types::extensions::Extensions;
use crate::types::header::Header;
use crate::types::schema::Schema;
use crate::types::put_string;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One possible response of an operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub description: String,
    pub schema: Option<Schema>,
    pub headers: BTreeMap<String, Header>,
    pub extensions: Extensions,
    pub(crate) doc_loc: Location,
}

impl Response {
    pub fn new() -> Self {
        Response::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        put_string(&mut obj, "description", &self.description);
        if let Some(schema) = &self.schema {
            obj.insert(String::from("schema"), schema.to_value());
        }
        if !self.headers.is_empty() {
            let mut headers = Map::new();
            for (name, header) in &self.headers {
                headers.insert(name.clone(), header.to_value());
            }
            obj.insert(String::from("headers"), Value::Object(headers));
        }
        self.extensions.apply_to(&mut obj);
        Value::Object(obj)
    }
}

/// The full response table of an operation: an optional default response plus
/// responses keyed by HTTP status code (100-599).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Responses {
    pub default: Option<Response>,
    pub by_status_code: BTreeMap<u16, Response>,
    pub extensions: Extensions,
    pub(crate) doc_loc: Location,
}

impl Responses {
    pub fn new() -> Self {
        Responses::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_status_code.is_empty() && self.extensions.is_empty()
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(default) = &self.default {
            obj.insert(String::from("default"), default.to_value());
        }
        for (status, response) in &self.by_status_code {
            obj.insert(status.to_string(), response.to_value());
        }
        self.extensions.apply_to(&mut obj);
        Value::Object(obj)
    }
}
