use crate::DEFINITIONS_FRAGMENT;
use crate::types::{
    Operation, Parameter, PathItem, Paths, Response, Responses, Schema, SchemaOrBool,
    SchemaOrSchemas, Swagger,
};
use std::collections::HashSet;

/// A JSON reference link, stored as its opaque URI.
///
/// Only the fragment form `#/definitions/<name>` is recognized as a pointer
/// into the document's reusable-schema table; any other URI is preserved but
/// never resolvable by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    uri: String,
}

impl Reference {
    pub fn new(uri: impl Into<String>) -> Self {
        Reference { uri: uri.into() }
    }

    /// The raw link, exactly as it appeared in the document.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The definition name this reference points at, when it uses the
    /// same-document `#/definitions/<name>` form.
    pub fn definition_name(&self) -> Option<&str> {
        let name = self.uri.strip_prefix(DEFINITIONS_FRAGMENT)?;
        if name.is_empty() || name.contains('/') {
            return None;
        }
        Some(name)
    }
}

/// The unique definition names referenced by some (sub)tree, preserving
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniqueDefinitionRefs {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl UniqueDefinitionRefs {
    pub fn new() -> Self {
        UniqueDefinitionRefs::default()
    }

    /// Records a resolvable reference; anything else is ignored.
    pub fn add_ref(&mut self, reference: &Reference) {
        if let Some(name) = reference.definition_name() {
            self.add(name);
        }
    }

    /// Records `name` unless already present; returns whether it was new.
    pub fn add(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_owned());
        self.names.push(name.to_owned());
        true
    }

    /// Appends every name from `other` that is not already present,
    /// keeping first-seen order across the merge.
    pub fn merge(&mut self, other: &UniqueDefinitionRefs) {
        for name in &other.names {
            self.add(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The collected names in first-seen order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Schema {
    /// The unique definition names this schema transitively references.
    ///
    /// References themselves are terminal: the traversal reports that a name
    /// is referenced without descending into its definition body. A caller
    /// expanding names into their definitions must keep its own visited set,
    /// since mutually recursive definitions are legal.
    pub fn referenced_definitions(&self) -> UniqueDefinitionRefs {
        let mut refs = UniqueDefinitionRefs::new();
        self.collect_refs(&mut refs);
        refs
    }

    pub(crate) fn collect_refs(&self, refs: &mut UniqueDefinitionRefs) {
        if let Some(reference) = &self.reference {
            refs.add_ref(reference);
        }
        if let Some(items) = &self.items {
            match items {
                SchemaOrSchemas::One(schema) => schema.collect_refs(refs),
                SchemaOrSchemas::Many(schemas) => {
                    for schema in schemas {
                        schema.collect_refs(refs);
                    }
                }
            }
        }
        if let Some(SchemaOrBool::Schema(schema)) = &self.additional_items {
            schema.collect_refs(refs);
        }
        for schema in &self.all_of {
            schema.collect_refs(refs);
        }
        for schema in self.properties.values() {
            schema.collect_refs(refs);
        }
        if let Some(SchemaOrBool::Schema(schema)) = &self.additional_properties {
            schema.collect_refs(refs);
        }
    }
}

impl Parameter {
    /// The unique definition names referenced through this parameter's
    /// body schema.
    pub fn referenced_definitions(&self) -> UniqueDefinitionRefs {
        let mut refs = UniqueDefinitionRefs::new();
        self.collect_refs(&mut refs);
        refs
    }

    pub(crate) fn collect_refs(&self, refs: &mut UniqueDefinitionRefs) {
        if let Some(schema) = &self.schema {
            schema.collect_refs(refs);
        }
    }
}

impl Response {
    /// The unique definition names referenced through this response's schema.
    pub fn referenced_definitions(&self) -> UniqueDefinitionRefs {
        let mut refs = UniqueDefinitionRefs::new();
        self.collect_refs(&mut refs);
        refs
    }

    pub(crate) fn collect_refs(&self, refs: &mut UniqueDefinitionRefs) {
        if let Some(schema) = &self.schema {
            schema.collect_refs(refs);
        }
    }
}

impl Responses {
    /// The unique definition names referenced by any response in the table.
    pub fn referenced_definitions(&self) -> UniqueDefinitionRefs {
        let mut refs = UniqueDefinitionRefs::new();
        self.collect_refs(&mut refs);
        refs
    }

    pub(crate) fn collect_refs(&self, refs: &mut UniqueDefinitionRefs) {
        if let Some(default) = &self.default {
            default.collect_refs(refs);
        }
        for response in self.by_status_code.values() {
            response.collect_refs(refs);
        }
    }
}

impl Operation {
    /// The unique definition names referenced by this operation's parameters
    /// and responses.
    pub fn referenced_definitions(&self) -> UniqueDefinitionRefs {
        let mut refs = UniqueDefinitionRefs::new();
        self.collect_refs(&mut refs);
        refs
    }

    pub(crate) fn collect_refs(&self, refs: &mut UniqueDefinitionRefs) {
        for parameter in &self.parameters {
            parameter.collect_refs(refs);
        }
        self.responses.collect_refs(refs);
    }
}

impl PathItem {
    /// The unique definition names referenced anywhere under this path item.
    pub fn referenced_definitions(&self) -> UniqueDefinitionRefs {
        let mut refs = UniqueDefinitionRefs::new();
        self.collect_refs(&mut refs);
        refs
    }

    pub(crate) fn collect_refs(&self, refs: &mut UniqueDefinitionRefs) {
        if let Some(reference) = &self.reference {
            refs.add_ref(reference);
        }
        for parameter in &self.parameters {
            parameter.collect_refs(refs);
        }
        for operation in self.operations() {
            operation.collect_refs(refs);
        }
    }
}

impl Paths {
    /// The unique definition names referenced anywhere under the path table.
    pub fn referenced_definitions(&self) -> UniqueDefinitionRefs {
        let mut refs = UniqueDefinitionRefs::new();
        self.collect_refs(&mut refs);
        refs
    }

    pub(crate) fn collect_refs(&self, refs: &mut UniqueDefinitionRefs) {
        for item in self.items.values() {
            item.collect_refs(refs);
        }
    }
}

impl Swagger {
    /// The unique definition names referenced anywhere in the document:
    /// across the path table and the reusable definition, parameter and
    /// response tables.
    pub fn referenced_definitions(&self) -> UniqueDefinitionRefs {
        let mut result = UniqueDefinitionRefs::new();
        result.merge(&self.paths.referenced_definitions());
        for schema in self.definitions.values() {
            result.merge(&schema.referenced_definitions());
        }
        for parameter in self.parameters.values() {
            result.merge(&parameter.referenced_definitions());
        }
        for response in self.responses.values() {
            result.merge(&response.referenced_definitions());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Schema, SchemaOrBool, SchemaOrSchemas};

    fn ref_schema(uri: &str) -> Schema {
        let mut schema = Schema::new();
        schema.reference = Some(Reference::new(uri));
        schema
    }

    #[test]
    fn test_definition_name_recognizes_fragment_form() {
        assert_eq!(
            Reference::new("#/definitions/Pet").definition_name(),
            Some("Pet")
        );
        assert_eq!(Reference::new("#/definitions/").definition_name(), None);
        assert_eq!(
            Reference::new("#/definitions/Pet/properties/id").definition_name(),
            None
        );
        assert_eq!(
            Reference::new("other.json#/definitions/Pet").definition_name(),
            None
        );
        assert_eq!(Reference::new("#/parameters/petId").definition_name(), None);
    }

    #[test]
    fn test_unique_refs_preserve_first_seen_order() {
        let mut refs = UniqueDefinitionRefs::new();
        assert!(refs.add("Pet"));
        assert!(refs.add("Error"));
        assert!(!refs.add("Pet"));
        assert_eq!(refs.names(), &[String::from("Pet"), String::from("Error")]);
    }

    #[test]
    fn test_merge_keeps_order_and_uniqueness() {
        let mut left = UniqueDefinitionRefs::new();
        left.add("Pet");
        left.add("Error");

        let mut right = UniqueDefinitionRefs::new();
        right.add("Error");
        right.add("Owner");

        left.merge(&right);
        assert_eq!(
            left.names(),
            &[
                String::from("Pet"),
                String::from("Error"),
                String::from("Owner")
            ]
        );
    }

    #[test]
    fn test_schema_traversal_covers_nested_positions() {
        let mut schema = Schema::new();
        schema
            .properties
            .insert(String::from("a"), ref_schema("#/definitions/Foo"));

        let mut b = Schema::new();
        b.items = Some(SchemaOrSchemas::Many(vec![ref_schema("#/definitions/Bar")]));
        schema.properties.insert(String::from("b"), b);

        let refs = schema.referenced_definitions();
        assert_eq!(refs.len(), 2);
        assert!(refs.contains("Foo"));
        assert!(refs.contains("Bar"));
    }

    #[test]
    fn test_duplicate_reference_reported_once() {
        let mut schema = Schema::new();
        schema
            .properties
            .insert(String::from("a"), ref_schema("#/definitions/Foo"));
        schema
            .properties
            .insert(String::from("b"), ref_schema("#/definitions/Foo"));
        schema.all_of.push(ref_schema("#/definitions/Foo"));

        let refs = schema.referenced_definitions();
        assert_eq!(refs.names(), &[String::from("Foo")]);
    }

    #[test]
    fn test_additional_properties_and_items() {
        let mut schema = Schema::new();
        schema.additional_properties = Some(SchemaOrBool::Schema(Box::new(ref_schema(
            "#/definitions/Extra",
        ))));
        schema.additional_items = Some(SchemaOrBool::Bool(true));
        schema.items = Some(SchemaOrSchemas::One(Box::new(ref_schema(
            "#/definitions/Item",
        ))));

        let refs = schema.referenced_definitions();
        assert_eq!(
            refs.names(),
            &[String::from("Item"), String::from("Extra")]
        );
    }

    #[test]
    fn test_reference_is_terminal_not_dereferenced() {
        // A schema that points at a definition reports the name only; the
        // body of the target never contributes names through the pointer.
        let schema = ref_schema("#/definitions/Node");
        let refs = schema.referenced_definitions();
        assert_eq!(refs.names(), &[String::from("Node")]);
    }

    #[test]
    fn test_document_wide_extraction() {
        let raw = serde_json::to_vec(&serde_json::json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "paths": {
                "/pets": {
                    "post": {
                        "parameters": [
                            {"name": "pet", "in": "body",
                             "schema": {"$ref": "#/definitions/Pet"}}
                        ],
                        "responses": {
                            "200": {"description": "ok",
                                    "schema": {"$ref": "#/definitions/Pet"}},
                            "default": {"description": "err",
                                        "schema": {"$ref": "#/definitions/Error"}}
                        }
                    }
                }
            },
            "definitions": {
                // mutually recursive definitions are legal; extraction only
                // reports names and never chases the pointers
                "Pet": {"properties": {"friend": {"$ref": "#/definitions/Pet"}}},
                "Error": {"properties": {"cause": {"$ref": "#/definitions/Error"}}}
            }
        }))
        .unwrap();
        let outcome = crate::parser::Parser::new(&raw).parse();
        assert!(outcome.error.is_none());
        let swagger = outcome.swagger.unwrap();

        let refs = swagger.referenced_definitions();
        assert_eq!(refs.len(), 2);
        assert!(refs.contains("Pet"));
        assert!(refs.contains("Error"));
    }
}
