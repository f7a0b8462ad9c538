mod param;
mod path;
mod root;
mod schema;

use crate::error::{ParseErrors, ParseFailure, ParseIssue};
use crate::location::Location;
use crate::types::{OperationMap, Swagger};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Policy for string coercion: descriptive fields accept the empty string.
pub(crate) const ALLOW_EMPTY: bool = true;

/// Policy for string coercion: semantically required fields reject it.
pub(crate) const REQUIRE_VALUE: bool = false;

/// Returns the JSON type name of `value` for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The result of one parse: a best-effort document plus whatever went wrong.
///
/// A document accompanied by a `Validation` failure is not guaranteed to be
/// structurally complete and should be treated as advisory only.
#[derive(Debug)]
pub struct ParseOutcome {
    pub swagger: Option<Swagger>,
    pub error: Option<ParseFailure>,
}

impl ParseOutcome {
    /// Collapses the outcome, surfacing the failure even when a partially
    /// populated document exists.
    pub fn into_result(self) -> Result<Swagger, ParseFailure> {
        match (self.swagger, self.error) {
            (_, Some(failure)) => Err(failure),
            (Some(swagger), None) => Ok(swagger),
            (None, None) => Err(ParseFailure::EmptyInput),
        }
    }
}

/// Parses and validates one raw swagger document.
///
/// A parser is value-like: construct one per document and consume it with
/// [`Parser::parse`]. Parsing two documents concurrently is safe only because
/// each uses its own instance; nothing is shared between parses.
pub struct Parser<'a> {
    raw: &'a [u8],
    errors: ParseErrors,
}

impl<'a> Parser<'a> {
    pub fn new(raw: &'a [u8]) -> Self {
        Parser {
            raw,
            errors: ParseErrors::new(),
        }
    }

    /// Decodes and validates the raw bytes into a [`Swagger`] document.
    ///
    /// Malformed input (empty bytes, invalid JSON, non-object root) fails
    /// immediately with no document. Validation failures are local: they
    /// accumulate per location and a best-effort document is still returned
    /// alongside the aggregate.
    pub fn parse(mut self) -> ParseOutcome {
        if self.raw.is_empty() {
            return ParseOutcome {
                swagger: None,
                error: Some(ParseFailure::EmptyInput),
            };
        }
        let root_val: Value = match serde_json::from_slice(self.raw) {
            Ok(value) => value,
            Err(e) => {
                return ParseOutcome {
                    swagger: None,
                    error: Some(ParseFailure::InvalidJson(e)),
                };
            }
        };
        let Some(root_obj) = root_val.as_object() else {
            return ParseOutcome {
                swagger: None,
                error: Some(ParseFailure::RootNotObject),
            };
        };

        let loc = Location::root();
        let mut swagger = root::parse_swagger(&mut self, root_obj, &loc);
        self.index_operations(&mut swagger);
        log::debug!(
            "parsed swagger document: {} operations, {} error locations",
            swagger.operation_count(),
            self.errors.location_count()
        );
        ParseOutcome {
            swagger: Some(swagger),
            error: self.errors.into_option().map(ParseFailure::Validation),
        }
    }

    /// Second phase of a parse: walks the finished tree, registers every
    /// operation under its canonical key and validates that every non-empty
    /// operationId is globally unique. Paths are visited in key order and
    /// method slots in fixed order, so first-seen ownership is deterministic.
    fn index_operations(&mut self, swagger: &mut Swagger) {
        let mut index = OperationMap::new();
        let mut owners: BTreeMap<String, Location> = BTreeMap::new();
        for item in swagger.paths.items.values() {
            for op in item.operations() {
                index.insert(op.key.clone(), op.doc_loc.clone());
                if op.id.is_empty() {
                    continue;
                }
                let id_loc = op.doc_loc.field("operationId");
                match owners.get(&op.id) {
                    Some(owner) => {
                        let issue = ParseIssue::duplicate_operation_id(&op.id, owner);
                        self.errors.append(&id_loc, issue);
                    }
                    None => {
                        owners.insert(op.id.clone(), id_loc);
                    }
                }
            }
        }
        swagger.operation_map = index;
    }

    pub(crate) fn append(&mut self, loc: &Location, issue: ParseIssue) {
        self.errors.append(loc, issue);
    }

    /// Coerces a string field. Depending on `allow_empty` the empty string is
    /// either accepted or recorded as its own validation error.
    pub(crate) fn string_value(
        &mut self,
        value: &Value,
        loc: &Location,
        field: &str,
        allow_empty: bool,
    ) -> Option<String> {
        let Some(s) = value.as_str() else {
            self.append(
                loc,
                ParseIssue::invalid_value(
                    field,
                    format!("expected string but found {}", json_type_name(value)),
                ),
            );
            return None;
        };
        if s.is_empty() && !allow_empty {
            self.append(loc, ParseIssue::empty_value(field));
            return None;
        }
        Some(s.to_owned())
    }

    /// Coerces an integer field.
    pub(crate) fn int_value(&mut self, value: &Value, loc: &Location, field: &str) -> Option<i64> {
        match value.as_i64() {
            Some(i) => Some(i),
            None => {
                self.append(
                    loc,
                    ParseIssue::invalid_value(
                        field,
                        format!("expected integer but found {}", json_type_name(value)),
                    ),
                );
                None
            }
        }
    }

    /// Coerces a boolean field.
    pub(crate) fn bool_value(&mut self, value: &Value, loc: &Location, field: &str) -> Option<bool> {
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.append(
                    loc,
                    ParseIssue::invalid_value(
                        field,
                        format!("expected boolean but found {}", json_type_name(value)),
                    ),
                );
                None
            }
        }
    }

    /// Coerces an object-valued field, recording a type-mismatch otherwise.
    pub(crate) fn object_value<'v>(
        &mut self,
        value: &'v Value,
        loc: &Location,
        field: &str,
    ) -> Option<&'v Map<String, Value>> {
        match value.as_object() {
            Some(obj) => Some(obj),
            None => {
                self.append(
                    loc,
                    ParseIssue::invalid_value(
                        field,
                        format!("expected object but found {}", json_type_name(value)),
                    ),
                );
                None
            }
        }
    }

    /// Parses an array of strings. Each element is coerced independently:
    /// one bad element is recorded at its indexed location without aborting
    /// the rest.
    pub(crate) fn string_list(
        &mut self,
        value: &Value,
        loc: &Location,
        field: &str,
    ) -> Vec<String> {
        let Some(items) = value.as_array() else {
            self.append(
                loc,
                ParseIssue::invalid_value(
                    field,
                    format!("expected array but found {}", json_type_name(value)),
                ),
            );
            return Vec::new();
        };
        let item_field = format!("{} item", field);
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                self.string_value(item, &loc.index(i), &item_field, ALLOW_EMPTY)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_empty_input_is_fatal() {
        let outcome = Parser::new(b"").parse();
        assert!(outcome.swagger.is_none());
        assert_eq!(
            outcome.error.map(|e| e.to_string()),
            Some(String::from("cannot parse empty raw swagger JSON bytes"))
        );
    }

    #[test]
    fn test_parse_malformed_json_is_fatal() {
        let outcome = Parser::new(b"{not json").parse();
        assert!(outcome.swagger.is_none());
        assert!(matches!(outcome.error, Some(ParseFailure::InvalidJson(_))));
    }

    #[test]
    fn test_parse_non_object_root_is_fatal() {
        let outcome = Parser::new(b"[1, 2, 3]").parse();
        assert!(outcome.swagger.is_none());
        assert!(matches!(outcome.error, Some(ParseFailure::RootNotObject)));
    }

    #[test]
    fn test_parse_minimal_valid_document() {
        let raw = serde_json::to_vec(&json!({
            "swagger": "2.0",
            "info": {"title": "Petstore", "version": "1.0.0"},
            "paths": {}
        }))
        .unwrap();
        let outcome = Parser::new(&raw).parse();
        assert!(outcome.error.is_none());
        let swagger = outcome.swagger.unwrap();
        assert_eq!(swagger.swagger, "2.0");
        assert_eq!(swagger.info.title, "Petstore");
        assert_eq!(swagger.operation_count(), 0);
    }

    #[test]
    fn test_wrong_version_keeps_best_effort_document() {
        let raw = serde_json::to_vec(&json!({
            "swagger": "1.0",
            "info": {"title": "x", "version": "1"},
            "paths": {}
        }))
        .unwrap();
        let outcome = Parser::new(&raw).parse();

        let swagger = outcome.swagger.expect("document should still be built");
        assert_eq!(swagger.info.title, "x");
        assert_eq!(swagger.swagger, "");

        let failure = outcome.error.expect("version mismatch must be recorded");
        let errors = failure.validation().expect("validation failure");
        assert_eq!(errors.location_count(), 1);
        assert_eq!(
            errors.at(".swagger"),
            &[ParseIssue::version_mismatch("1.0")]
        );
    }

    #[test]
    fn test_operation_index_counts_every_method_slot() {
        let raw = serde_json::to_vec(&json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "paths": {
                "/pets": {
                    "get": {"responses": {"200": {"description": "ok"}}},
                    "post": {"responses": {"201": {"description": "created"}}}
                },
                "/owners": {
                    "delete": {"responses": {"204": {"description": "gone"}}}
                }
            }
        }))
        .unwrap();
        let outcome = Parser::new(&raw).parse();
        assert!(outcome.error.is_none());
        let swagger = outcome.swagger.unwrap();
        assert_eq!(swagger.operation_count(), 3);

        let keys: Vec<String> = swagger
            .operation_map()
            .keys()
            .map(ToString::to_string)
            .collect();
        assert_eq!(keys, vec!["DELETE /owners", "GET /pets", "POST /pets"]);
    }

    #[test]
    fn test_duplicate_operation_id_names_first_owner() {
        let raw = serde_json::to_vec(&json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "paths": {
                "/a": {"get": {"operationId": "listPets",
                               "responses": {"200": {"description": "ok"}}}},
                "/b": {"get": {"operationId": "listPets",
                               "responses": {"200": {"description": "ok"}}}}
            }
        }))
        .unwrap();
        let outcome = Parser::new(&raw).parse();
        let failure = outcome.error.expect("duplicate id must be an error");
        let errors = failure.validation().unwrap();
        assert_eq!(
            errors.at(".paths./b.get.operationId"),
            &[ParseIssue::DuplicateOperationId {
                id: String::from("listPets"),
                owner: String::from(".paths./a.get.operationId"),
            }]
        );
    }

    #[test]
    fn test_into_result_prefers_failure() {
        let raw = serde_json::to_vec(&json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "paths": {},
            "bogus": true
        }))
        .unwrap();
        let result = Parser::new(&raw).parse().into_result();
        assert!(result.is_err());
    }
}
