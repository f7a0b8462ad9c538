use crate::error::ParseIssue;
use crate::location::Location;
use crate::parser::{ALLOW_EMPTY, Parser, REQUIRE_VALUE, param, root};
use crate::refs::Reference;
use crate::types::{Extensions, Operation, PathItem, Paths};
use http::Method;
use serde_json::Value;

pub(crate) fn parse_paths(p: &mut Parser, value: &Value, loc: &Location) -> Option<Paths> {
    let obj = p.object_value(value, loc, "paths")?;
    let mut result = Paths::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        if key.starts_with('/') {
            if let Some(item) = parse_path_item(p, value, &child, key) {
                result.items.insert(key.clone(), item);
            }
        } else if Extensions::is_extension_key(key) {
            result.extensions.insert(key, value.clone());
        } else {
            p.append(&child, ParseIssue::unrecognized_field(key));
        }
    }
    Some(result)
}

pub(crate) fn parse_path_item(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
    path: &str,
) -> Option<PathItem> {
    let obj = p.object_value(value, loc, "path item")?;
    let mut result = PathItem::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "$ref" => {
                if let Some(s) = p.string_value(value, &child, "$ref", REQUIRE_VALUE) {
                    result.reference = Some(Reference::new(s));
                }
            }
            "get" => result.get = parse_operation(p, value, &child, path, Method::GET),
            "put" => result.put = parse_operation(p, value, &child, path, Method::PUT),
            "post" => result.post = parse_operation(p, value, &child, path, Method::POST),
            "delete" => result.delete = parse_operation(p, value, &child, path, Method::DELETE),
            "options" => result.options = parse_operation(p, value, &child, path, Method::OPTIONS),
            "head" => result.head = parse_operation(p, value, &child, path, Method::HEAD),
            "patch" => result.patch = parse_operation(p, value, &child, path, Method::PATCH),
            "parameters" => {
                if let Some(items) = value.as_array() {
                    for (i, item) in items.iter().enumerate() {
                        if let Some(parameter) = param::parse_parameter(p, item, &child.index(i)) {
                            result.parameters.push(parameter);
                        }
                    }
                } else {
                    p.append(
                        &child,
                        ParseIssue::invalid_value(
                            "parameters",
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
    Some(result)
}

pub(crate) fn parse_operation(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
    path: &str,
    method: Method,
) -> Option<Operation> {
    let obj = p.object_value(value, loc, "operation")?;
    let mut result = Operation::new(path, &method);
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "operationId" => {
                if let Some(id) = p.string_value(value, &child, "operationId", REQUIRE_VALUE) {
                    result.id = id;
                }
            }
            "summary" => {
                if let Some(s) = p.string_value(value, &child, "summary", ALLOW_EMPTY) {
                    result.summary = s;
                }
            }
            "description" => {
                if let Some(s) = p.string_value(value, &child, "description", ALLOW_EMPTY) {
                    result.description = s;
                }
            }
            "deprecated" => {
                if let Some(b) = p.bool_value(value, &child, "deprecated") {
                    result.deprecated = b;
                }
            }
            "tags" => result.tags = p.string_list(value, &child, "tags"),
            "consumes" => result.consumes = p.string_list(value, &child, "consumes"),
            "produces" => result.produces = p.string_list(value, &child, "produces"),
            "schemes" => result.schemes = p.string_list(value, &child, "schemes"),
            "parameters" => {
                if let Some(items) = value.as_array() {
                    for (i, item) in items.iter().enumerate() {
                        if let Some(parameter) = param::parse_parameter(p, item, &child.index(i)) {
                            result.parameters.push(parameter);
                        }
                    }
                } else {
                    p.append(
                        &child,
                        ParseIssue::invalid_value(
                            "parameters",
                            format!(
                                "expected array but found {}",
                                super::json_type_name(value)
                            ),
                        ),
                    );
                }
            }
            "responses" => {
                if let Some(responses) = param::parse_responses(p, value, &child) {
                    result.responses = responses;
                }
            }
            "security" => {
                result.security = param::parse_security_list(p, value, &child);
            }
            "externalDocs" => {
                result.external_docs = root::parse_external_documentation(p, value, &child);
            }
            _ if Extensions::is_extension_key(key) => {
                result.extensions.insert(key, value.clone());
            }
            _ => p.append(&child, ParseIssue::unrecognized_field(key)),
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parser() -> Parser<'static> {
        Parser::new(b"{}")
    }

    #[test]
    fn test_path_keys_must_start_with_slash() {
        let mut p = parser();
        let value = json!({
            "/pets": {"get": {"responses": {"200": {"description": "ok"}}}},
            "pets": {},
            "x-order": ["first"]
        });
        let loc = Location::root().field("paths");
        let paths = parse_paths(&mut p, &value, &loc).unwrap();

        assert_eq!(paths.items.len(), 1);
        assert!(paths.items.contains_key("/pets"));
        assert_eq!(paths.extensions.get("x-order"), Some(&json!(["first"])));
        assert_eq!(
            p.errors.at(".paths.pets"),
            &[ParseIssue::unrecognized_field("pets")]
        );
    }

    #[test]
    fn test_operation_key_is_canonical() {
        let mut p = parser();
        let value = json!({
            "get": {"responses": {"200": {"description": "ok"}}}
        });
        let loc = Location::root().field("paths").field("/pets");
        let item = parse_path_item(&mut p, &value, &loc, "/pets").unwrap();

        let op = item.get.as_ref().unwrap();
        assert_eq!(op.key.path, "/pets");
        assert_eq!(op.key.method, "GET");
        assert_eq!(op.document_location().as_str(), ".paths./pets.get");
    }

    #[test]
    fn test_one_bad_parameter_does_not_abort_the_rest() {
        let mut p = parser();
        let value = json!({
            "parameters": ["oops", {"name": "limit", "in": "query", "type": "integer"}],
            "get": {"responses": {"200": {"description": "ok"}}}
        });
        let loc = Location::root().field("paths").field("/pets");
        let item = parse_path_item(&mut p, &value, &loc, "/pets").unwrap();

        assert_eq!(item.parameters.len(), 1);
        assert_eq!(item.parameters[0].name, "limit");
        assert_eq!(
            p.errors.at(".paths./pets.parameters[0]"),
            &[ParseIssue::invalid_value(
                "parameter",
                "expected object but found string"
            )]
        );
    }

    #[test]
    fn test_operation_collects_overrides_and_security() {
        let mut p = parser();
        let value = json!({
            "operationId": "listPets",
            "summary": "List pets",
            "deprecated": true,
            "tags": ["pets"],
            "consumes": ["application/json"],
            "produces": ["application/json"],
            "schemes": ["https"],
            "security": [{"petstore_auth": ["read:pets"]}],
            "responses": {"200": {"description": "ok"}}
        });
        let loc = Location::root().field("paths").field("/pets").field("get");
        let op = parse_operation(&mut p, &value, &loc, "/pets", Method::GET).unwrap();

        assert!(p.errors.is_empty());
        assert_eq!(op.id, "listPets");
        assert!(op.deprecated);
        assert_eq!(op.tags, vec!["pets"]);
        assert_eq!(op.schemes, vec!["https"]);
        assert_eq!(op.security.len(), 1);
        assert_eq!(
            op.security[0].get("petstore_auth"),
            Some(&vec![String::from("read:pets")])
        );
        assert_eq!(op.responses.by_status_code.len(), 1);
    }
}
