use crate::error::ParseIssue;
use crate::location::Location;
use crate::parser::{ALLOW_EMPTY, Parser, REQUIRE_VALUE, schema};
use crate::types::{
    Extensions, Header, Parameter, Response, Responses, Scopes, SecurityRequirements,
    SecurityScheme,
};
use serde_json::Value;
use std::collections::BTreeMap;

pub(crate) fn parse_parameter_definitions(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
) -> BTreeMap<String, Parameter> {
    let Some(obj) = p.object_value(value, loc, "parameters") else {
        return BTreeMap::new();
    };
    let mut result = BTreeMap::new();
    for (key, value) in obj {
        if let Some(parameter) = parse_parameter(p, value, &loc.field(key)) {
            result.insert(key.clone(), parameter);
        }
    }
    result
}

pub(crate) fn parse_parameter(p: &mut Parser, value: &Value, loc: &Location) -> Option<Parameter> {
    let obj = p.object_value(value, loc, "parameter")?;
    let mut result = Parameter::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "name" => {
                if let Some(s) = p.string_value(value, &child, "name", REQUIRE_VALUE) {
                    result.name = s;
                }
            }
            "in" => {
                if let Some(s) = p.string_value(value, &child, "in", REQUIRE_VALUE) {
                    result.location_in = s;
                }
            }
            "description" => {
                if let Some(s) = p.string_value(value, &child, "description", ALLOW_EMPTY) {
                    result.description = s;
                }
            }
            "required" => {
                if let Some(b) = p.bool_value(value, &child, "required") {
                    result.required = b;
                }
            }
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
            "collectionFormat" => {
                if let Some(s) = p.string_value(value, &child, "collectionFormat", ALLOW_EMPTY) {
                    result.collection_format = s;
                }
            }
            "allowEmptyValue" => {
                if let Some(b) = p.bool_value(value, &child, "allowEmptyValue") {
                    result.allow_empty_value = b;
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
            "multipleOf" => {
                if let Some(i) = p.int_value(value, &child, "multipleOf") {
                    result.multiple_of = i;
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
            "items" => result.items = schema::parse_items(p, value, &child),
            "default" => result.default = Some(value.clone()),
            "schema" => result.schema = schema::parse_schema(p, value, &child),
            _ if Extensions::is_extension_key(key) => {
                result.extensions.insert(key, value.clone());
            }
            _ => p.append(&child, ParseIssue::unrecognized_field(key)),
        }
    }
    Some(result)
}

pub(crate) fn parse_responses(p: &mut Parser, value: &Value, loc: &Location) -> Option<Responses> {
    let obj = p.object_value(value, loc, "responses")?;
    let mut result = Responses::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        if key == "default" {
            result.default = parse_response(p, value, &child);
        } else if let Some(status) = http_status_code(key) {
            if let Some(response) = parse_response(p, value, &child) {
                result.by_status_code.insert(status, response);
            }
        } else if Extensions::is_extension_key(key) {
            result.extensions.insert(key, value.clone());
        } else {
            p.append(&child, ParseIssue::unrecognized_field(key));
        }
    }
    Some(result)
}

/// Accepts only 3-digit status keys within [100,599].
fn http_status_code(key: &str) -> Option<u16> {
    let status = key.parse::<u16>().ok()?;
    if (100..=599).contains(&status) {
        Some(status)
    } else {
        None
    }
}

pub(crate) fn parse_response_definitions(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
) -> BTreeMap<String, Response> {
    let Some(obj) = p.object_value(value, loc, "responses") else {
        return BTreeMap::new();
    };
    let mut result = BTreeMap::new();
    for (key, value) in obj {
        if let Some(response) = parse_response(p, value, &loc.field(key)) {
            result.insert(key.clone(), response);
        }
    }
    result
}

pub(crate) fn parse_response(p: &mut Parser, value: &Value, loc: &Location) -> Option<Response> {
    let obj = p.object_value(value, loc, "response")?;
    let mut result = Response::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "description" => {
                if let Some(s) = p.string_value(value, &child, "description", REQUIRE_VALUE) {
                    result.description = s;
                }
            }
            "schema" => result.schema = schema::parse_schema(p, value, &child),
            "headers" => {
                if let Some(headers) = p.object_value(value, &child, "headers") {
                    for (name, header_val) in headers {
                        if let Some(header) = parse_header(p, header_val, &child.field(name)) {
                            result.headers.insert(name.clone(), header);
                        }
                    }
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

pub(crate) fn parse_header(p: &mut Parser, value: &Value, loc: &Location) -> Option<Header> {
    let obj = p.object_value(value, loc, "header")?;
    let mut result = Header::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "description" => {
                if let Some(s) = p.string_value(value, &child, "description", ALLOW_EMPTY) {
                    result.description = s;
                }
            }
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
            "items" => result.items = schema::parse_items(p, value, &child),
            "collectionFormat" => {
                if let Some(s) = p.string_value(value, &child, "collectionFormat", ALLOW_EMPTY) {
                    result.collection_format = s;
                }
            }
            "default" => result.default = Some(value.clone()),
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
            "multipleOf" => {
                if let Some(i) = p.int_value(value, &child, "multipleOf") {
                    result.multiple_of = i;
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
    Some(result)
}

pub(crate) fn parse_security_definitions(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
) -> BTreeMap<String, SecurityScheme> {
    let Some(obj) = p.object_value(value, loc, "securityDefinitions") else {
        return BTreeMap::new();
    };
    let mut result = BTreeMap::new();
    for (key, value) in obj {
        if let Some(scheme) = parse_security_scheme(p, value, &loc.field(key)) {
            result.insert(key.clone(), scheme);
        }
    }
    result
}

pub(crate) fn parse_security_scheme(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
) -> Option<SecurityScheme> {
    let obj = p.object_value(value, loc, "security scheme")?;
    let mut result = SecurityScheme::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "type" => {
                if let Some(s) = p.string_value(value, &child, "type", REQUIRE_VALUE) {
                    result.type_name = s;
                }
            }
            "description" => {
                if let Some(s) = p.string_value(value, &child, "description", ALLOW_EMPTY) {
                    result.description = s;
                }
            }
            "name" => {
                if let Some(s) = p.string_value(value, &child, "name", REQUIRE_VALUE) {
                    result.name = s;
                }
            }
            "in" => {
                if let Some(s) = p.string_value(value, &child, "in", REQUIRE_VALUE) {
                    result.location_in = s;
                }
            }
            "flow" => {
                if let Some(s) = p.string_value(value, &child, "flow", REQUIRE_VALUE) {
                    result.flow = s;
                }
            }
            "authorizationUrl" => {
                if let Some(s) = p.string_value(value, &child, "authorizationUrl", REQUIRE_VALUE) {
                    result.authorization_url = s;
                }
            }
            "tokenUrl" => {
                if let Some(s) = p.string_value(value, &child, "tokenUrl", REQUIRE_VALUE) {
                    result.token_url = s;
                }
            }
            "scopes" => {
                if let Some(scopes) = parse_scopes(p, value, &child) {
                    result.scopes = scopes;
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

pub(crate) fn parse_scopes(p: &mut Parser, value: &Value, loc: &Location) -> Option<Scopes> {
    let obj = p.object_value(value, loc, "scopes")?;
    let mut result = Scopes::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        if Extensions::is_extension_key(key) {
            result.extensions.insert(key, value.clone());
        } else {
            let field = format!("scopes[{}]", key);
            if let Some(s) = p.string_value(value, &child, &field, ALLOW_EMPTY) {
                result.values.insert(key.clone(), s);
            }
        }
    }
    Some(result)
}

/// Parses an array of security requirement objects, one indexed location per
/// element.
pub(crate) fn parse_security_list(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
) -> Vec<SecurityRequirements> {
    let Some(items) = value.as_array() else {
        p.append(
            loc,
            ParseIssue::invalid_value(
                "security",
                format!("expected array but found {}", super::json_type_name(value)),
            ),
        );
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| parse_security_requirements(p, item, &loc.index(i)))
        .collect()
}

pub(crate) fn parse_security_requirements(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
) -> Option<SecurityRequirements> {
    let obj = p.object_value(value, loc, "security requirement")?;
    let mut result = SecurityRequirements::new();
    for (key, value) in obj {
        let child = loc.field(key);
        let scopes = p.string_list(value, &child, "security scheme");
        result.insert(key.clone(), scopes);
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
    fn test_parse_body_parameter_populates_schema() {
        let mut p = parser();
        let value = json!({
            "name": "pet",
            "in": "body",
            "required": true,
            "schema": {"$ref": "#/definitions/Pet"}
        });
        let loc = Location::root()
            .field("paths")
            .field("/pets")
            .field("post")
            .field("parameters")
            .index(0);
        let parameter = parse_parameter(&mut p, &value, &loc).unwrap();

        assert!(p.errors.is_empty());
        assert_eq!(parameter.name, "pet");
        assert_eq!(parameter.location_in, "body");
        assert!(parameter.required);
        assert!(parameter.schema.is_some());
        assert!(parameter.items.is_none());
    }

    #[test]
    fn test_parse_query_parameter_uses_flat_descriptor() {
        let mut p = parser();
        let value = json!({
            "name": "limit",
            "in": "query",
            "type": "array",
            "collectionFormat": "csv",
            "items": {"type": "integer"},
            "maxItems": 5
        });
        let parameter = parse_parameter(&mut p, &value, &Location::root()).unwrap();

        assert!(p.errors.is_empty());
        assert_eq!(parameter.type_name, "array");
        assert_eq!(parameter.collection_format, "csv");
        assert_eq!(parameter.max_items, 5);
        assert_eq!(parameter.items.as_ref().unwrap().type_name, "integer");
        assert!(parameter.schema.is_none());
    }

    #[test]
    fn test_parse_parameter_requires_name_and_in() {
        let mut p = parser();
        let value = json!({"name": "", "in": "query", "type": "string"});
        let loc = Location::root().field("parameters").field("bad");
        parse_parameter(&mut p, &value, &loc);

        assert_eq!(
            p.errors.at(".parameters.bad.name"),
            &[ParseIssue::empty_value("name")]
        );
    }

    #[test]
    fn test_parse_responses_status_code_bounds() {
        let mut p = parser();
        let value = json!({
            "default": {"description": "fallback"},
            "200": {"description": "ok"},
            "099": {"description": "too low"},
            "600": {"description": "too high"},
            "x-note": "kept"
        });
        let loc = Location::root()
            .field("paths")
            .field("/pets")
            .field("get")
            .field("responses");
        let responses = parse_responses(&mut p, &value, &loc).unwrap();

        assert!(responses.default.is_some());
        assert_eq!(responses.by_status_code.len(), 1);
        assert!(responses.by_status_code.contains_key(&200));
        assert_eq!(responses.extensions.len(), 1);
        assert_eq!(
            p.errors.at(".paths./pets.get.responses.099"),
            &[ParseIssue::unrecognized_field("099")]
        );
        assert_eq!(
            p.errors.at(".paths./pets.get.responses.600"),
            &[ParseIssue::unrecognized_field("600")]
        );
    }

    #[test]
    fn test_parse_response_headers() {
        let mut p = parser();
        let value = json!({
            "description": "ok",
            "headers": {
                "X-Rate-Limit": {"type": "integer", "format": "int32"}
            }
        });
        let loc = Location::root().field("responses").field("ok");
        let response = parse_response(&mut p, &value, &loc).unwrap();

        assert!(p.errors.is_empty());
        let header = response.headers.get("X-Rate-Limit").unwrap();
        assert_eq!(header.type_name, "integer");
        assert_eq!(
            header.document_location().as_str(),
            ".responses.ok.headers.X-Rate-Limit"
        );
    }

    #[test]
    fn test_parse_response_requires_description() {
        let mut p = parser();
        let value = json!({"description": ""});
        parse_response(&mut p, &value, &Location::root().field("r"));
        assert_eq!(
            p.errors.at(".r.description"),
            &[ParseIssue::empty_value("description")]
        );
    }

    #[test]
    fn test_parse_security_scheme_with_scopes() {
        let mut p = parser();
        let value = json!({
            "type": "oauth2",
            "flow": "implicit",
            "authorizationUrl": "https://example.com/oauth",
            "scopes": {
                "read:pets": "read your pets",
                "x-internal": true
            }
        });
        let loc = Location::root()
            .field("securityDefinitions")
            .field("petstore_auth");
        let scheme = parse_security_scheme(&mut p, &value, &loc).unwrap();

        assert!(p.errors.is_empty());
        assert_eq!(scheme.type_name, "oauth2");
        assert_eq!(
            scheme.scopes.values.get("read:pets"),
            Some(&String::from("read your pets"))
        );
        assert_eq!(scheme.scopes.extensions.len(), 1);
    }

    #[test]
    fn test_parse_security_requirements_elements_fail_independently() {
        let mut p = parser();
        let value = json!([
            {"petstore_auth": ["write:pets", 7]},
            "oops"
        ]);
        let loc = Location::root().field("security");
        let list = parse_security_list(&mut p, &value, &loc);

        assert_eq!(list.len(), 1);
        assert_eq!(
            list[0].get("petstore_auth"),
            Some(&vec![String::from("write:pets")])
        );
        assert_eq!(
            p.errors.at(".security[0].petstore_auth[1]"),
            &[ParseIssue::invalid_value(
                "security scheme item",
                "expected string but found number"
            )]
        );
        assert_eq!(
            p.errors.at(".security[1]"),
            &[ParseIssue::invalid_value(
                "security requirement",
                "expected object but found string"
            )]
        );
    }
}
