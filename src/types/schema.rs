use crate::location::Location;
use crate::refs::Reference;
use crate::types::ExternalDocumentation;
use crate::types::extensions::Extensions;
use crate::types::xml::Xml;
use crate::types::{put_flag, put_nonzero, put_string};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A field that holds either one string or a list of them, e.g. `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum StringOrStrings {
    One(String),
    Many(Vec<String>),
}

impl StringOrStrings {
    /// The single value, when this holds exactly one.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            StringOrStrings::One(s) => Some(s),
            StringOrStrings::Many(_) => None,
        }
    }

    /// Both shapes collapsed into one slice view.
    pub fn values(&self) -> &[String] {
        match self {
            StringOrStrings::One(s) => std::slice::from_ref(s),
            StringOrStrings::Many(items) => items,
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        match self {
            StringOrStrings::One(s) => Value::String(s.clone()),
            StringOrStrings::Many(items) => Value::Array(
                items.iter().map(|s| Value::String(s.clone())).collect(),
            ),
        }
    }
}

/// A field that holds either one schema or a list of them, e.g. `items`.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaOrSchemas {
    One(Box<Schema>),
    Many(Vec<Schema>),
}

impl SchemaOrSchemas {
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrSchemas::One(schema) => Some(schema),
            SchemaOrSchemas::Many(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Schema]> {
        match self {
            SchemaOrSchemas::One(_) => None,
            SchemaOrSchemas::Many(items) => Some(items),
        }
    }

    /// Both shapes collapsed into one slice view.
    pub fn schemas(&self) -> &[Schema] {
        match self {
            SchemaOrSchemas::One(schema) => std::slice::from_ref(schema),
            SchemaOrSchemas::Many(items) => items,
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        match self {
            SchemaOrSchemas::One(schema) => schema.to_value(),
            SchemaOrSchemas::Many(items) => {
                Value::Array(items.iter().map(Schema::to_value).collect())
            }
        }
    }
}

/// A field that holds either a nested schema or a boolean flag, e.g.
/// `additionalProperties` and `additionalItems`.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaOrBool {
    Schema(Box<Schema>),
    Bool(bool),
}

impl SchemaOrBool {
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrBool::Schema(schema) => Some(schema),
            SchemaOrBool::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SchemaOrBool::Schema(_) => None,
            SchemaOrBool::Bool(value) => Some(*value),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        match self {
            SchemaOrBool::Schema(schema) => schema.to_value(),
            SchemaOrBool::Bool(value) => Value::Bool(*value),
        }
    }
}

/// The subset of JSON Schema used by Swagger 2.0.
///
/// Schema values are trees: cycles are only expressible through `$ref`
/// pointers into the definitions table, never through direct nesting, so a
/// traversal that dereferences references must track visited names itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub reference: Option<Reference>,
    pub discriminator: String,
    pub is_read_only: bool,
    pub xml: Option<Xml>,
    pub example: Option<Value>,
    pub format: String,
    pub title: String,
    pub description: String,
    pub multiple_of: i64,
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
    pub required: Vec<String>,
    pub enum_values: Vec<Value>,
    pub type_name: Option<StringOrStrings>,
    pub items: Option<SchemaOrSchemas>,
    pub additional_items: Option<SchemaOrBool>,
    pub all_of: Vec<Schema>,
    pub properties: BTreeMap<String, Schema>,
    pub additional_properties: Option<SchemaOrBool>,
    pub external_docs: Option<ExternalDocumentation>,
    pub default: Option<Value>,
    pub extensions: Extensions,
    pub(crate) doc_loc: Location,
}

impl Schema {
    pub fn new() -> Self {
        Schema::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(reference) = &self.reference {
            obj.insert(
                String::from("$ref"),
                Value::String(reference.uri().to_owned()),
            );
        }
        put_string(&mut obj, "format", &self.format);
        put_string(&mut obj, "title", &self.title);
        put_string(&mut obj, "description", &self.description);
        if let Some(default) = &self.default {
            obj.insert(String::from("default"), default.clone());
        }
        put_nonzero(&mut obj, "multipleOf", self.multiple_of);
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
        if !self.required.is_empty() {
            obj.insert(
                String::from("required"),
                Value::Array(
                    self.required
                        .iter()
                        .map(|name| Value::String(name.clone()))
                        .collect(),
                ),
            );
        }
        if !self.enum_values.is_empty() {
            obj.insert(
                String::from("enum"),
                Value::Array(self.enum_values.clone()),
            );
        }
        if let Some(type_name) = &self.type_name {
            obj.insert(String::from("type"), type_name.to_value());
        }
        if let Some(items) = &self.items {
            obj.insert(String::from("items"), items.to_value());
        }
        if let Some(additional_items) = &self.additional_items {
            obj.insert(
                String::from("additionalItems"),
                additional_items.to_value(),
            );
        }
        if !self.all_of.is_empty() {
            obj.insert(
                String::from("allOf"),
                Value::Array(self.all_of.iter().map(Schema::to_value).collect()),
            );
        }
        if !self.properties.is_empty() {
            let mut props = Map::new();
            for (name, schema) in &self.properties {
                props.insert(name.clone(), schema.to_value());
            }
            obj.insert(String::from("properties"), Value::Object(props));
        }
        if let Some(additional_properties) = &self.additional_properties {
            obj.insert(
                String::from("additionalProperties"),
                additional_properties.to_value(),
            );
        }
        put_string(&mut obj, "discriminator", &self.discriminator);
        put_flag(&mut obj, "readOnly", self.is_read_only);
        if let Some(xml) = &self.xml {
            obj.insert(String::from("xml"), xml.to_value());
        }
        if let Some(example) = &self.example {
            obj.insert(String::from("example"), example.clone());
        }
        if let Some(external_docs) = &self.external_docs {
            obj.insert(String::from("externalDocs"), external_docs.to_value());
        }
        self.extensions.apply_to(&mut obj);
        Value::Object(obj)
    }
}
