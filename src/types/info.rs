use crate::types::extensions::Extensions;
use serde_json::{Map, Value};

/// The document metadata block found at `.info`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub terms_of_service: String,
    pub version: String,
    pub contact: Option<Contact>,
    pub license: Option<License>,
    pub extensions: Extensions,
}

impl Info {
    pub fn new() -> Self {
        Info::default()
    }
}

/// Contact metadata found at `.info.contact`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub name: String,
    pub url: String,
    pub email: String,
    pub extensions: Extensions,
}

impl Contact {
    pub fn new() -> Self {
        Contact::default()
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if !self.name.is_empty() {
            obj.insert(String::from("name"), Value::String(self.name.clone()));
        }
        if !self.url.is_empty() {
            obj.insert(String::from("url"), Value::String(self.url.clone()));
        }
        if !self.email.is_empty() {
            obj.insert(String::from("email"), Value::String(self.email.clone()));
        }
        self.extensions.apply_to(&mut obj);
        Value::Object(obj)
    }
}

/// License metadata found at `.info.license`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct License {
    pub name: String,
    pub url: String,
    pub extensions: Extensions,
}

impl License {
    pub fn new() -> Self {
        License::default()
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if !self.name.is_empty() {
            obj.insert(String::from("name"), Value::String(self.name.clone()));
        }
        if !self.url.is_empty() {
            obj.insert(String::from("url"), Value::String(self.url.clone()));
        }
        self.extensions.apply_to(&mut obj);
        Value::Object(obj)
    }
}
