use crate::SWAGGER_VERSION;
use crate::error::ParseIssue;
use crate::location::Location;
use crate::parser::{ALLOW_EMPTY, Parser, REQUIRE_VALUE, param, path, schema};
use crate::types::{Contact, Extensions, ExternalDocumentation, Info, License, Swagger, Tag, Xml};
use serde_json::{Map, Value};

/// Parses the root swagger object. The caller has already verified the root
/// value is an object; everything below is best-effort.
pub(crate) fn parse_swagger(p: &mut Parser, obj: &Map<String, Value>, loc: &Location) -> Swagger {
    let mut result = Swagger::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "swagger" => {
                if let Some(s) = p.string_value(value, &child, "swagger", ALLOW_EMPTY) {
                    if s == SWAGGER_VERSION {
                        result.swagger = s;
                    } else {
                        p.append(&child, ParseIssue::version_mismatch(s));
                    }
                }
            }
            "host" => {
                if let Some(s) = p.string_value(value, &child, "host", ALLOW_EMPTY) {
                    result.host = s;
                }
            }
            "basePath" => {
                if let Some(s) = p.string_value(value, &child, "basePath", ALLOW_EMPTY) {
                    result.base_path = s;
                }
            }
            "schemes" => result.schemes = p.string_list(value, &child, "schemes"),
            "consumes" => result.consumes = p.string_list(value, &child, "consumes"),
            "produces" => result.produces = p.string_list(value, &child, "produces"),
            "info" => {
                if let Some(info) = parse_info(p, value, &child) {
                    result.info = info;
                }
            }
            "definitions" => {
                result.definitions = schema::parse_definitions(p, value, &child);
            }
            "paths" => {
                if let Some(paths) = path::parse_paths(p, value, &child) {
                    result.paths = paths;
                }
            }
            "parameters" => {
                result.parameters = param::parse_parameter_definitions(p, value, &child);
            }
            "responses" => {
                result.responses = param::parse_response_definitions(p, value, &child);
            }
            "securityDefinitions" => {
                result.security_definitions = param::parse_security_definitions(p, value, &child);
            }
            "security" => {
                result.security = param::parse_security_list(p, value, &child);
            }
            "tags" => {
                if let Some(tags) = value.as_array() {
                    for (i, tag_val) in tags.iter().enumerate() {
                        if let Some(tag) = parse_tag(p, tag_val, &child.index(i)) {
                            result.tags.push(tag);
                        }
                    }
                } else {
                    p.append(
                        &child,
                        ParseIssue::invalid_value(
                            "tags",
                            format!(
                                "expected array but found {}",
                                super::json_type_name(value)
                            ),
                        ),
                    );
                }
            }
            "externalDocs" => {
                result.external_docs = parse_external_documentation(p, value, &child);
            }
            _ if Extensions::is_extension_key(key) => {
                result.extensions.insert(key, value.clone());
            }
            _ => p.append(&child, ParseIssue::unrecognized_field(key)),
        }
    }
    result
}

pub(crate) fn parse_info(p: &mut Parser, value: &Value, loc: &Location) -> Option<Info> {
    let obj = p.object_value(value, loc, "info")?;
    let mut result = Info::new();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "title" => {
                if let Some(s) = p.string_value(value, &child, "title", REQUIRE_VALUE) {
                    result.title = s;
                }
            }
            "version" => {
                if let Some(s) = p.string_value(value, &child, "version", REQUIRE_VALUE) {
                    result.version = s;
                }
            }
            "description" => {
                if let Some(s) = p.string_value(value, &child, "description", ALLOW_EMPTY) {
                    result.description = s;
                }
            }
            "termsOfService" => {
                if let Some(s) = p.string_value(value, &child, "termsOfService", ALLOW_EMPTY) {
                    result.terms_of_service = s;
                }
            }
            "contact" => result.contact = parse_contact(p, value, &child),
            "license" => result.license = parse_license(p, value, &child),
            _ if Extensions::is_extension_key(key) => {
                result.extensions.insert(key, value.clone());
            }
            _ => p.append(&child, ParseIssue::unrecognized_field(key)),
        }
    }
    Some(result)
}

fn parse_contact(p: &mut Parser, value: &Value, loc: &Location) -> Option<Contact> {
    let obj = p.object_value(value, loc, "contact")?;
    let mut result = Contact::new();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "name" => {
                if let Some(s) = p.string_value(value, &child, "name", ALLOW_EMPTY) {
                    result.name = s;
                }
            }
            "url" => {
                if let Some(s) = p.string_value(value, &child, "url", ALLOW_EMPTY) {
                    result.url = s;
                }
            }
            "email" => {
                if let Some(s) = p.string_value(value, &child, "email", ALLOW_EMPTY) {
                    result.email = s;
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

fn parse_license(p: &mut Parser, value: &Value, loc: &Location) -> Option<License> {
    let obj = p.object_value(value, loc, "license")?;
    let mut result = License::new();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "name" => {
                if let Some(s) = p.string_value(value, &child, "name", REQUIRE_VALUE) {
                    result.name = s;
                }
            }
            "url" => {
                if let Some(s) = p.string_value(value, &child, "url", ALLOW_EMPTY) {
                    result.url = s;
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

pub(crate) fn parse_tag(p: &mut Parser, value: &Value, loc: &Location) -> Option<Tag> {
    let obj = p.object_value(value, loc, "tag")?;
    let mut result = Tag::new();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "name" => {
                if let Some(s) = p.string_value(value, &child, "name", ALLOW_EMPTY) {
                    result.name = s;
                }
            }
            "description" => {
                if let Some(s) = p.string_value(value, &child, "description", ALLOW_EMPTY) {
                    result.description = s;
                }
            }
            "externalDocs" => {
                result.external_docs = parse_external_documentation(p, value, &child);
            }
            _ if Extensions::is_extension_key(key) => {
                result.extensions.insert(key, value.clone());
            }
            _ => p.append(&child, ParseIssue::unrecognized_field(key)),
        }
    }
    Some(result)
}

pub(crate) fn parse_external_documentation(
    p: &mut Parser,
    value: &Value,
    loc: &Location,
) -> Option<ExternalDocumentation> {
    let obj = p.object_value(value, loc, "externalDocs")?;
    let mut result = ExternalDocumentation::new();
    result.doc_loc = loc.clone();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "url" => {
                if let Some(s) = p.string_value(value, &child, "url", ALLOW_EMPTY) {
                    result.url = s;
                }
            }
            "description" => {
                if let Some(s) = p.string_value(value, &child, "description", ALLOW_EMPTY) {
                    result.description = s;
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

pub(crate) fn parse_xml(p: &mut Parser, value: &Value, loc: &Location) -> Option<Xml> {
    let obj = p.object_value(value, loc, "xml")?;
    let mut result = Xml::new();
    for (key, value) in obj {
        let child = loc.field(key);
        match key.as_str() {
            "name" => {
                if let Some(s) = p.string_value(value, &child, "name", ALLOW_EMPTY) {
                    result.name = s;
                }
            }
            "namespace" => {
                if let Some(s) = p.string_value(value, &child, "namespace", ALLOW_EMPTY) {
                    result.namespace = s;
                }
            }
            "prefix" => {
                if let Some(s) = p.string_value(value, &child, "prefix", ALLOW_EMPTY) {
                    result.prefix = s;
                }
            }
            "attribute" => {
                if let Some(b) = p.bool_value(value, &child, "attribute") {
                    result.is_attribute = b;
                }
            }
            "wrapped" => {
                if let Some(b) = p.bool_value(value, &child, "wrapped") {
                    result.is_wrapped = b;
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
