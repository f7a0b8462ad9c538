use crate::types::OperationKey;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// The kind of difference a [`Change`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffOp {
    NoChange,
    Add,
    Remove,
    Update,
    ItemAdded,
    ItemRemoved,
}

impl DiffOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffOp::NoChange => "unchanged",
            DiffOp::Add => "added",
            DiffOp::Remove => "removed",
            DiffOp::Update => "updated",
            DiffOp::ItemAdded => "item-added",
            DiffOp::ItemRemoved => "item-removed",
        }
    }
}

impl Display for DiffOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed classification changes are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Class {
    Root,
    Info,
    Definition,
    Paths,
    Operation,
}

impl Class {
    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Root => "Swagger Root",
            Class::Info => "Info",
            Class::Definition => "Definition",
            Class::Paths => "Paths",
            Class::Operation => "Operation",
        }
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One reported difference between two documents, for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub location: String,
    pub name: String,
    pub old_value: String,
    pub new_value: String,
    pub operation: DiffOp,
    pub class: Class,
}

impl Change {
    pub fn to_value(&self) -> Value {
        json!({
            "diffOperation": self.operation.as_str(),
            "class": self.class.as_str(),
            "from": self.old_value,
            "to": self.new_value,
            "location": self.location,
            "name": self.name,
        })
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Changes grouped by the location string they were detected at.
pub type ChangesByLocation = BTreeMap<String, Vec<Change>>;

/// Everything one analysis detected: changes grouped by classification and
/// location, plus a derived per-operation index for callers that filter by
/// endpoint rather than by location. The index is a convenience view over the
/// same changes, never a source of truth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub changes: BTreeMap<Class, ChangesByLocation>,
    pub changes_by_operation: BTreeMap<OperationKey, Vec<Change>>,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    /// True when no classification holds any change.
    pub fn is_empty(&self) -> bool {
        self.changes.values().all(BTreeMap::is_empty)
    }

    /// Stores a classification's changes, dropping empty groups so an empty
    /// report stays empty.
    pub(crate) fn insert_class(&mut self, class: Class, changes: ChangesByLocation) {
        if !changes.is_empty() {
            self.changes.insert(class, changes);
        }
    }

    /// The report as one nested JSON object:
    /// classification name, then location, then the ordered change list.
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        for (class, by_location) in &self.changes {
            if by_location.is_empty() {
                continue;
            }
            let mut locations = Map::new();
            for (location, changes) in by_location {
                if changes.is_empty() {
                    continue;
                }
                locations.insert(
                    location.clone(),
                    Value::Array(changes.iter().map(Change::to_value).collect()),
                );
            }
            root.insert(class.as_str().to_owned(), Value::Object(locations));
        }
        Value::Object(root)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{}", self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_op_strings() {
        assert_eq!(DiffOp::NoChange.as_str(), "unchanged");
        assert_eq!(DiffOp::Add.as_str(), "added");
        assert_eq!(DiffOp::Remove.as_str(), "removed");
        assert_eq!(DiffOp::Update.as_str(), "updated");
        assert_eq!(DiffOp::ItemAdded.as_str(), "item-added");
        assert_eq!(DiffOp::ItemRemoved.as_str(), "item-removed");
    }

    #[test]
    fn test_change_serialization_shape() {
        let change = Change {
            location: String::from(".host"),
            name: String::from("host"),
            old_value: String::from("old.example.com"),
            new_value: String::from("new.example.com"),
            operation: DiffOp::Update,
            class: Class::Root,
        };
        assert_eq!(
            change.to_value(),
            serde_json::json!({
                "diffOperation": "updated",
                "class": "Swagger Root",
                "from": "old.example.com",
                "to": "new.example.com",
                "location": ".host",
                "name": "host",
            })
        );
    }

    #[test]
    fn test_empty_report_serializes_to_empty_object() {
        let report = Report::new();
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "{}");
    }

    #[test]
    fn test_report_groups_by_class_then_location() {
        let mut report = Report::new();
        let mut by_location = ChangesByLocation::new();
        by_location.insert(
            String::from(".host"),
            vec![Change {
                location: String::from(".host"),
                name: String::from("host"),
                old_value: String::new(),
                new_value: String::from("api.example.com"),
                operation: DiffOp::Add,
                class: Class::Root,
            }],
        );
        report.insert_class(Class::Root, by_location);
        report.insert_class(Class::Info, ChangesByLocation::new());

        assert!(!report.is_empty());
        let value = report.to_value();
        let root = value.as_object().unwrap();
        assert_eq!(root.len(), 1);
        assert!(root.contains_key("Swagger Root"));
        assert_eq!(
            value["Swagger Root"][".host"][0]["diffOperation"],
            "added"
        );
    }
}
