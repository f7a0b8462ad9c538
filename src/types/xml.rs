use crate::types::extensions::Extensions;
use serde_json::{Map, Value};

/// XML serialization hints attached to a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Xml {
    pub name: String,
    pub namespace: String,
    pub prefix: String,
    pub is_attribute: bool,
    pub is_wrapped: bool,
    pub extensions: Extensions,
}

impl Xml {
    pub fn new() -> Self {
        Xml::default()
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if !self.name.is_empty() {
            obj.insert(String::from("name"), Value::String(self.name.clone()));
        }
        if !self.namespace.is_empty() {
            obj.insert(
                String::from("namespace"),
                Value::String(self.namespace.clone()),
            );
        }
        if !self.prefix.is_empty() {
            obj.insert(String::from("prefix"), Value::String(self.prefix.clone()));
        }
        if self.is_attribute {
            obj.insert(String::from("attribute"), Value::Bool(true));
        }
        if self.is_wrapped {
            obj.insert(String::from("wrapped"), Value::Bool(true));
        }
        self.extensions.apply_to(&mut obj);
        Value::Object(obj)
    }
}
