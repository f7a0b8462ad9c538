use crate::error::ParseIssue;
use crate::location::Location;
use crate::parser::{ALLOW_EMPTY, Parser, REQUIRE_VALUE, root};
use crate::refs::Reference;
use crate::types::{
    Extensions, Items, Schema, SchemaOrBool, SchemaOrSchemas, StringOrStrings,
};
use serde_json::Value;
use std::collections::BTreeMap;

pub(crate) fn parse_definitions(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
) -> BTreeMap<String, Schema> {
    let Some(obj) = p.object_value(value, loc, "definitions") else {
        return BTreeMap::new();
    };
    let mut result = BTreeMap::new();
    for (key, value) in obj {
        if let Some(schema) = parse_schema(p, value, &loc.field(key)) {
            result.insert(key.clone(), schema);
        }
    }
    result
}

pub(crate) fn parse_properties(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
) -> BTreeMap<String, Schema> {
    let Some(obj) = p.object_value(value, loc, "properties") else {
        return BTreeMap::new();
    };
    let mut result = BTreeMap::new();
    for (key, value) in obj {
        if let Some(schema) = parse_schema(p, value, &loc.field(key)) {
            result.insert(key.clone(), schema);
        }
    }
    result
}

/// Dispatches a `type` field that may hold one string or an array of them.
fn parse_type(p: &mut Parser, value: &Value, loc: &Location) -> Option<StringOrStrings> {
    if let Some(items) = value.as_array() {
        let names: Vec<String> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| p.string_value(item, &loc.index(i), "type item", ALLOW_EMPTY))
            .collect();
        return Some(StringOrStrings::Many(names));
    }
    p.string_value(value, loc, "type", ALLOW_EMPTY)
        .map(StringOrStrings::One)
}

/// Dispatches a field that may hold a nested schema or a boolean, deciding by
/// the JSON value's runtime type before any coercion runs.
fn parse_schema_or_bool(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
    field: &str,
) -> Option<SchemaOrBool> {
    if value.is_object() {
        parse_schema(p, value, loc).map(|schema| SchemaOrBool::Schema(Box::new(schema)))
    } else {
        p.bool_value(value, loc, field).map(SchemaOrBool::Bool)
    }
}

pub(crate) fn parse_schema(p: &mut Parser, value: &Value, loc: &Location) -> Option<Schema> {
    let obj = p.object_value(value, loc, "schema")?;
    let mut result = Schema::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "$ref" => {
                if let Some(s) = p.string_value(value, &child, "$ref", REQUIRE_VALUE) {
                    result.reference = Some(Reference::new(s));
                }
            }
            "format" => {
                if let Some(s) = p.string_value(value, &child, "format", ALLOW_EMPTY) {
                    result.format = s;
                }
            }
            "title" => {
                if let Some(s) = p.string_value(value, &child, "title", ALLOW_EMPTY) {
                    result.title = s;
                }
            }
            "description" => {
                if let Some(s) = p.string_value(value, &child, "description", ALLOW_EMPTY) {
                    result.description = s;
                }
            }
            "default" => result.default = Some(value.clone()),
            "multipleOf" => {
                if let Some(i) = p.int_value(value, &child, "multipleOf") {
                    result.multiple_of = i;
                }
            }
            "maximum" => {
                if let Some(i) = p.int_value(value, &child, "maximum") {
                    result.maximum = i;
                }
            }
            "exclusiveMaximum" => {
                if let Some(b) = p.bool_value(value, &child, "exclusiveMaximum") {
                    result.exclusive_maximum = b;
                }
            }
            "minimum" => {
                if let Some(i) = p.int_value(value, &child, "minimum") {
                    result.minimum = i;
                }
            }
            "exclusiveMinimum" => {
                if let Some(b) = p.bool_value(value, &child, "exclusiveMinimum") {
                    result.exclusive_minimum = b;
                }
            }
            "maxLength" => {
                if let Some(i) = p.int_value(value, &child, "maxLength") {
                    result.max_length = i;
                }
            }
            "minLength" => {
                if let Some(i) = p.int_value(value, &child, "minLength") {
                    result.min_length = i;
                }
            }
            "pattern" => {
                if let Some(s) = p.string_value(value, &child, "pattern", ALLOW_EMPTY) {
                    result.pattern = s;
                }
            }
            "maxItems" => {
                if let Some(i) = p.int_value(value, &child, "maxItems") {
                    result.max_items = i;
                }
            }
            "minItems" => {
                if let Some(i) = p.int_value(value, &child, "minItems") {
                    result.min_items = i;
                }
            }
            "uniqueItems" => {
                if let Some(b) = p.bool_value(value, &child, "uniqueItems") {
                    result.unique_items = b;
                }
            }
            "maxProperties" => {
                if let Some(i) = p.int_value(value, &child, "maxProperties") {
                    result.max_properties = i;
                }
            }
            "minProperties" => {
                if let Some(i) = p.int_value(value, &child, "minProperties") {
                    result.min_properties = i;
                }
            }
            "required" => {
                if let Some(items) = value.as_array() {
                    for (i, item) in items.iter().enumerate() {
                        let field = format!("required[{}]", i);
                        if let Some(s) =
                            p.string_value(item, &child.index(i), &field, REQUIRE_VALUE)
                        {
                            result.required.push(s);
                        }
                    }
                } else {
                    p.append(
                        &child,
                        ParseIssue::invalid_value(
                            "required",
                            format!(
                                "expected array but found {}",
                                super::json_type_name(value)
                            ),
                        ),
                    );
                }
            }
            "enum" => {
                if let Some(items) = value.as_array() {
                    result.enum_values = items.clone();
                } else {
                    p.append(
                        &child,
                        ParseIssue::invalid_value(
                            "enum",
                            format!(
                                "expected array but found {}",
                                super::json_type_name(value)
                            ),
                        ),
                    );
                }
            }
            "type" => result.type_name = parse_type(p, value, &child),
            "items" => {
                if let Some(items) = value.as_array() {
                    let schemas: Vec<Schema> = items
                        .iter()
                        .enumerate()
                        .filter_map(|(i, item)| parse_schema(p, item, &child.index(i)))
                        .collect();
                    result.items = Some(SchemaOrSchemas::Many(schemas));
                } else if let Some(schema) = parse_schema(p, value, &child) {
                    result.items = Some(SchemaOrSchemas::One(Box::new(schema)));
                }
            }
            "allOf" => {
                if let Some(items) = value.as_array() {
                    for (i, item) in items.iter().enumerate() {
                        if let Some(schema) = parse_schema(p, item, &child.index(i)) {
                            result.all_of.push(schema);
                        }
                    }
                } else {
                    p.append(
                        &child,
                        ParseIssue::invalid_value(
                            "allOf",
                            format!(
                                "expected array but found {}",
                                super::json_type_name(value)
                            ),
                        ),
                    );
                }
            }
            "properties" => {
                result.properties = parse_properties(p, value, &child);
            }
            "additionalProperties" => {
                result.additional_properties =
                    parse_schema_or_bool(p, value, &child, "additionalProperties");
            }
            "additionalItems" => {
                result.additional_items =
                    parse_schema_or_bool(p, value, &child, "additionalItems");
            }
            "discriminator" => {
                if let Some(s) = p.string_value(value, &child, "discriminator", ALLOW_EMPTY) {
                    result.discriminator = s;
                }
            }
            "readOnly" => {
                if let Some(b) = p.bool_value(value, &child, "readOnly") {
                    result.is_read_only = b;
                }
            }
            "xml" => result.xml = root::parse_xml(p, value, &child),
            "externalDocs" => {
                result.external_docs = root::parse_external_documentation(p, value, &child);
            }
            "example" => result.example = Some(value.clone()),
            _ if Extensions::is_extension_key(key) => {
                result.extensions.insert(key, value.clone());
            }
            _ => p.append(&child, ParseIssue::unrecognized_field(key)),
        }
    }
    Some(result)
}

pub(crate) fn parse_items(p: &mut Parser, value: &Value, loc: &Location) -> Option<Box<Items>> {
    let obj = p.object_value(value, loc, "items")?;
    let mut result = Items::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "type" => {
                if let Some(s) = p.string_value(value, &child, "type", REQUIRE_VALUE) {
                    result.type_name = s;
                }
            }
            "format" => {
                if let Some(s) = p.string_value(value, &child, "format", ALLOW_EMPTY) {
                    result.format = s;
                }
            }
            "items" => result.items = parse_items(p, value, &child),
            "collectionFormat" => {
                if let Some(s) = p.string_value(value, &child, "collectionFormat", ALLOW_EMPTY) {
                    result.collection_format = s;
                }
            }
            "default" => result.default = Some(value.clone()),
            "multipleOf" => {
                if let Some(i) = p.int_value(value, &child, "multipleOf") {
                    result.multiple_of = i;
                }
            }
            "maximum" => {
                if let Some(i) = p.int_value(value, &child, "maximum") {
                    result.maximum = i;
                }
            }
            "exclusiveMaximum" => {
                if let Some(b) = p.bool_value(value, &child, "exclusiveMaximum") {
                    result.exclusive_maximum = b;
                }
            }
            "minimum" => {
                if let Some(i) = p.int_value(value, &child, "minimum") {
                    result.minimum = i;
                }
            }
            "exclusiveMinimum" => {
                if let Some(b) = p.bool_value(value, &child, "exclusiveMinimum") {
                    result.exclusive_minimum = b;
                }
            }
            "maxLength" => {
                if let Some(i) = p.int_value(value, &child, "maxLength") {
                    result.max_length = i;
                }
            }
            "minLength" => {
                if let Some(i) = p.int_value(value, &child, "minLength") {
                    result.min_length = i;
                }
            }
            "pattern" => {
                if let Some(s) = p.string_value(value, &child, "pattern", ALLOW_EMPTY) {
                    result.pattern = s;
                }
            }
            "maxItems" => {
                if let Some(i) = p.int_value(value, &child, "maxItems") {
                    result.max_items = i;
                }
            }
            "minItems" => {
                if let Some(i) = p.int_value(value, &child, "minItems") {
                    result.min_items = i;
                }
            }
            "uniqueItems" => {
                if let Some(b) = p.bool_value(value, &child, "uniqueItems") {
                    result.unique_items = b;
                }
            }
            "maxProperties" => {
                if let Some(i) = p.int_value(value, &child, "maxProperties") {
                    result.max_properties = i;
                }
            }
            "minProperties" => {
                if let Some(i) = p.int_value(value, &child, "minProperties") {
                    result.min_properties = i;
                }
            }
            "required" => {
                if let Some(b) = p.bool_value(value, &child, "required") {
                    result.required = b;
                }
            }
            "enum" => {
                if let Some(items) = value.as_array() {
                    result.enum_values = items.clone();
                } else {
                    p.append(
                        &child,
                        ParseIssue::invalid_value(
                            "enum",
                            format!(
                                "expected array but found {}",
                                super::json_type_name(value)
                            ),
                        ),
                    );
                }
            }
            _ if Extensions::is_extension_key(key) => {
                result.extensions.insert(key, value.clone());
            }
            _ => p.append(&child, ParseIssue::unrecognized_field(key)),
        }
    }
    Some(Box::new(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parser() -> Parser<'static> {
        Parser::new(b"{}")
    }

    #[test]
    fn test_parse_schema_with_ref_stores_uri_unresolved() {
        let mut p = parser();
        let value = json!({"$ref": "#/definitions/Pet"});
        let loc = Location::root().field("definitions").field("Pets");
        let schema = parse_schema(&mut p, &value, &loc).unwrap();

        assert!(p.errors.is_empty());
        assert_eq!(
            schema.reference.as_ref().map(Reference::uri),
            Some("#/definitions/Pet")
        );
    }

    #[test]
    fn test_parse_schema_type_single_or_list() {
        let mut p = parser();
        let loc = Location::root();

        let single = parse_schema(&mut p, &json!({"type": "string"}), &loc).unwrap();
        assert_eq!(
            single.type_name.as_ref().and_then(StringOrStrings::as_single),
            Some("string")
        );

        let many = parse_schema(&mut p, &json!({"type": ["string", "null"]}), &loc).unwrap();
        assert_eq!(
            many.type_name.as_ref().map(|t| t.values().len()),
            Some(2)
        );
        assert!(p.errors.is_empty());
    }

    #[test]
    fn test_parse_schema_items_single_or_list() {
        let mut p = parser();
        let loc = Location::root();

        let single = parse_schema(
            &mut p,
            &json!({"type": "array", "items": {"type": "string"}}),
            &loc,
        )
        .unwrap();
        assert!(single.items.as_ref().unwrap().as_schema().is_some());

        let many = parse_schema(
            &mut p,
            &json!({"type": "array", "items": [{"type": "string"}, {"type": "integer"}]}),
            &loc,
        )
        .unwrap();
        assert_eq!(many.items.as_ref().unwrap().schemas().len(), 2);
    }

    #[test]
    fn test_parse_schema_additional_properties_bool_or_schema() {
        let mut p = parser();
        let loc = Location::root();

        let flag = parse_schema(&mut p, &json!({"additionalProperties": false}), &loc).unwrap();
        assert_eq!(
            flag.additional_properties.as_ref().and_then(SchemaOrBool::as_bool),
            Some(false)
        );

        let nested = parse_schema(
            &mut p,
            &json!({"additionalProperties": {"type": "string"}}),
            &loc,
        )
        .unwrap();
        assert!(
            nested
                .additional_properties
                .as_ref()
                .unwrap()
                .as_schema()
                .is_some()
        );
        assert!(p.errors.is_empty());
    }

    #[test]
    fn test_parse_schema_required_rejects_empty_names() {
        let mut p = parser();
        let loc = Location::root().field("definitions").field("Pet");
        let schema = parse_schema(
            &mut p,
            &json!({"type": "object", "required": ["id", ""]}),
            &loc,
        )
        .unwrap();

        assert_eq!(schema.required, vec!["id"]);
        assert_eq!(
            p.errors.at(".definitions.Pet.required[1]"),
            &[ParseIssue::empty_value("required[1]")]
        );
    }

    #[test]
    fn test_parse_schema_nested_property_error_location() {
        let mut p = parser();
        let loc = Location::root().field("definitions").field("Pet");
        parse_schema(
            &mut p,
            &json!({
                "type": "object",
                "properties": {
                    "age": {"type": "integer", "minimum": "zero"}
                }
            }),
            &loc,
        );

        assert_eq!(
            p.errors.at(".definitions.Pet.properties.age.minimum"),
            &[ParseIssue::invalid_value(
                "minimum",
                "expected integer but found string"
            )]
        );
    }

    #[test]
    fn test_parse_items_recursive() {
        let mut p = parser();
        let loc = Location::root();
        let items = parse_items(
            &mut p,
            &json!({"type": "array", "items": {"type": "string", "maxLength": 10}}),
            &loc,
        )
        .unwrap();

        assert_eq!(items.type_name, "array");
        let inner = items.items.as_ref().unwrap();
        assert_eq!(inner.type_name, "string");
        assert_eq!(inner.max_length, 10);
    }

    #[test]
    fn test_parse_definitions_collects_each_schema() {
        let mut p = parser();
        let loc = Location::root().field("definitions");
        let defs = parse_definitions(
            &mut p,
            &json!({
                "Pet": {"type": "object"},
                "Error": {"type": "object"}
            }),
            &loc,
        );

        assert_eq!(defs.len(), 2);
        assert_eq!(
            defs.get("Pet").unwrap().document_location().as_str(),
            ".definitions.Pet"
        );
    }
}
