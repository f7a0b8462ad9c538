use crate::location::Location;
use crate::types::extensions::Extensions;
use crate::types::items::Items;
use crate::types::{put_flag, put_nonzero, put_string};
use serde_json::{Map, Value};

/// A response header descriptor: the flat type descriptor plus a description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub description: String,
    pub type_name: String,
    pub format: String,
    pub items: Option<Box<Items>>,
    pub collection_format: String,
    pub default: Option<Value>,
    pub maximum: i64,
    pub exclusive_maximum: bool,
    pub minimum: i64,
    pub exclusive_minimum: bool,
    pub max_length: i64,
    pub min_length: i64,
    pub pattern: String,
    pub max_items: i64,
    pub min_items: i64,
    pub unique_items: bool,
    pub max_properties: i64,
    pub min_properties: i64,
    pub required: bool,
    pub enum_values: Vec<Value>,
    pub multiple_of: i64,
    pub extensions: Extensions,
    pub(crate) doc_loc: Location,
}

impl Header {
    pub fn new() -> Self {
        Header::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        put_string(&mut obj, "description", &self.description);
        put_string(&mut obj, "type", &self.type_name);
        put_string(&mut obj, "format", &self.format);
        if let Some(items) = &self.items {
            obj.insert(String::from("items"), items.to_value());
        }
        put_string(&mut obj, "collectionFormat", &self.collection_format);
        if let Some(default) = &self.default {
            obj.insert(String::from("default"), default.clone());
        }
        put_nonzero(&mut obj, "maximum", self.maximum);
        put_flag(&mut obj, "exclusiveMaximum", self.exclusive_maximum);
        put_nonzero(&mut obj, "minimum", self.minimum);
        put_flag(&mut obj, "exclusiveMinimum", self.exclusive_minimum);
        put_nonzero(&mut obj, "maxLength", self.max_length);
        put_nonzero(&mut obj, "minLength", self.min_length);
        put_string(&mut obj, "pattern", &self.pattern);
        put_nonzero(&mut obj, "maxItems", self.max_items);
        put_nonzero(&mut obj, "minItems", self.min_items);
        put_flag(&mut obj, "uniqueItems", self.unique_items);
        put_nonzero(&mut obj, "maxProperties", self.max_properties);
        put_nonzero(&mut obj, "minProperties", self.min_properties);
        put_flag(&mut obj, "required", self.required);
        if !self.enum_values.is_empty() {
            obj.insert(
                String::from("enum"),
                Value::Array(self.enum_values.clone()),
            );
        }
        put_nonzero(&mut obj, "multipleOf", self.multiple_of);
        self.extensions.apply_to(&mut obj);
        Value::Object(obj)
    }
}
