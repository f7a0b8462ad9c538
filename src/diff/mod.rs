//! Structural comparison of two parsed swagger documents.

mod change;

pub use change::{Change, ChangesByLocation, Class, DiffOp, Report};

use crate::error::DiffError;
use crate::parser::Parser;
use crate::types::security::security_requirements_to_value;
use crate::types::{
    Contact, Extensions, ExternalDocumentation, Header, Info, Items, License, OperationKey,
    Parameter, Paths, Response, Responses, Schema, SchemaOrBool, SchemaOrSchemas,
    SecurityRequirements, Swagger, Operation,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// Analyzes the differences between two swagger documents in raw JSON form.
///
/// Both inputs are checked before failing, so a caller sees every input
/// problem at once; a parse failure on either side is fatal and produces no
/// partial report.
pub fn analyze(from_raw: &[u8], to_raw: &[u8]) -> Result<Report, DiffError> {
    let mut errors = Vec::new();
    if from_raw.is_empty() {
        errors.push(DiffError::EmptyFrom);
    }
    if to_raw.is_empty() {
        errors.push(DiffError::EmptyTo);
    }
    if !errors.is_empty() {
        return Err(DiffError::combine(errors));
    }

    let from = match Parser::new(from_raw).parse().into_result() {
        Ok(swagger) => Some(swagger),
        Err(failure) => {
            errors.push(DiffError::FromParse(failure));
            None
        }
    };
    let to = match Parser::new(to_raw).parse().into_result() {
        Ok(swagger) => Some(swagger),
        Err(failure) => {
            errors.push(DiffError::ToParse(failure));
            None
        }
    };
    let (Some(from), Some(to)) = (from, to) else {
        return Err(DiffError::combine(errors));
    };

    let mut report = Report::new();
    report.insert_class(Class::Root, analyze_root(&from, &to));
    report.insert_class(Class::Info, analyze_info(&from.info, &to.info));
    report.insert_class(
        Class::Definition,
        analyze_definitions(&from.definitions, &to.definitions),
    );
    report.insert_class(Class::Paths, analyze_paths(&from.paths, &to.paths));
    let (operation_changes, by_operation) = analyze_operations(&from, &to);
    report.insert_class(Class::Operation, operation_changes);
    report.changes_by_operation = by_operation;
    log::debug!(
        "diff report: {} classifications changed",
        report.changes.len()
    );
    Ok(report)
}

fn record(changes: &mut ChangesByLocation, change: Change) {
    changes.entry(change.location.clone()).or_default().push(change);
}

fn sub(base: &str, name: &str) -> String {
    format!("{}.{}", base, name)
}

fn int_str(value: i64) -> String {
    if value == 0 { String::new() } else { value.to_string() }
}

fn flag_str(value: bool) -> &'static str {
    if value { "true" } else { "" }
}

fn value_str(value: &Option<Value>) -> String {
    value.as_ref().map(Value::to_string).unwrap_or_default()
}

/// One scalar field on corresponding entities: the change is `added` when the
/// old side holds the empty value, `removed` when the new side does, and
/// `updated` otherwise.
fn diff_scalar(
    changes: &mut ChangesByLocation,
    class: Class,
    location: String,
    name: &str,
    old: &str,
    new: &str,
) {
    if old == new {
        return;
    }
    let operation = if old.is_empty() {
        DiffOp::Add
    } else if new.is_empty() {
        DiffOp::Remove
    } else {
        DiffOp::Update
    };
    record(
        changes,
        Change {
            location,
            name: name.to_owned(),
            old_value: old.to_owned(),
            new_value: new.to_owned(),
            operation,
            class,
        },
    );
}

/// Set-membership comparison: order and duplicate count are never a signal,
/// only values present on one side.
fn diff_string_set(
    changes: &mut ChangesByLocation,
    class: Class,
    location: &str,
    name: &str,
    from: &[String],
    to: &[String],
) {
    let mut reported: Vec<&String> = Vec::new();
    for value in to {
        if !from.contains(value) && !reported.contains(&value) {
            reported.push(value);
            record(
                changes,
                Change {
                    location: location.to_owned(),
                    name: name.to_owned(),
                    old_value: String::new(),
                    new_value: value.clone(),
                    operation: DiffOp::ItemAdded,
                    class,
                },
            );
        }
    }
    reported.clear();
    for value in from {
        if !to.contains(value) && !reported.contains(&value) {
            reported.push(value);
            record(
                changes,
                Change {
                    location: location.to_owned(),
                    name: name.to_owned(),
                    old_value: value.clone(),
                    new_value: String::new(),
                    operation: DiffOp::ItemRemoved,
                    class,
                },
            );
        }
    }
}

/// Extension fields compare by serialized equality only.
fn diff_extensions(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &Extensions,
    to: &Extensions,
) {
    for (key, old_value) in from.iter() {
        let location = sub(base, key);
        let old = old_value.to_string();
        match to.get(key) {
            Some(new_value) => {
                let new = new_value.to_string();
                if old != new {
                    record(
                        changes,
                        Change {
                            location,
                            name: key.to_owned(),
                            old_value: old,
                            new_value: new,
                            operation: DiffOp::Update,
                            class,
                        },
                    );
                }
            }
            None => record(
                changes,
                Change {
                    location,
                    name: key.to_owned(),
                    old_value: old,
                    new_value: String::new(),
                    operation: DiffOp::ItemRemoved,
                    class,
                },
            ),
        }
    }
    for (key, new_value) in to.iter() {
        if from.get(key).is_none() {
            record(
                changes,
                Change {
                    location: sub(base, key),
                    name: key.to_owned(),
                    old_value: String::new(),
                    new_value: new_value.to_string(),
                    operation: DiffOp::ItemAdded,
                    class,
                },
            );
        }
    }
}

fn analyze_root(from: &Swagger, to: &Swagger) -> ChangesByLocation {
    let mut changes = ChangesByLocation::new();
    diff_scalar(
        &mut changes,
        Class::Root,
        String::from(".host"),
        "host",
        &from.host,
        &to.host,
    );
    diff_scalar(
        &mut changes,
        Class::Root,
        String::from(".basePath"),
        "basePath",
        &from.base_path,
        &to.base_path,
    );
    diff_string_set(
        &mut changes,
        Class::Root,
        ".schemes",
        "schemes",
        &from.schemes,
        &to.schemes,
    );
    diff_string_set(
        &mut changes,
        Class::Root,
        ".consumes",
        "consumes",
        &from.consumes,
        &to.consumes,
    );
    diff_string_set(
        &mut changes,
        Class::Root,
        ".produces",
        "produces",
        &from.produces,
        &to.produces,
    );
    diff_security(
        &mut changes,
        Class::Root,
        ".security",
        &from.security,
        &to.security,
    );
    diff_extensions(&mut changes, Class::Root, "", &from.extensions, &to.extensions);
    changes
}

fn analyze_info(from: &Info, to: &Info) -> ChangesByLocation {
    let mut changes = ChangesByLocation::new();
    diff_scalar(
        &mut changes,
        Class::Info,
        String::from(".info.title"),
        "title",
        &from.title,
        &to.title,
    );
    diff_scalar(
        &mut changes,
        Class::Info,
        String::from(".info.description"),
        "description",
        &from.description,
        &to.description,
    );
    diff_scalar(
        &mut changes,
        Class::Info,
        String::from(".info.termsOfService"),
        "termsOfService",
        &from.terms_of_service,
        &to.terms_of_service,
    );
    diff_scalar(
        &mut changes,
        Class::Info,
        String::from(".info.version"),
        "version",
        &from.version,
        &to.version,
    );
    diff_contact(&mut changes, from.contact.as_ref(), to.contact.as_ref());
    diff_license(&mut changes, from.license.as_ref(), to.license.as_ref());
    diff_extensions(&mut changes, Class::Info, ".info", &from.extensions, &to.extensions);
    changes
}

fn diff_contact(
    changes: &mut ChangesByLocation,
    from: Option<&Contact>,
    to: Option<&Contact>,
) {
    match (from, to) {
        (None, None) => {}
        (None, Some(contact)) => diff_scalar(
            changes,
            Class::Info,
            String::from(".info.contact"),
            "contact",
            "",
            &contact.to_value().to_string(),
        ),
        (Some(contact), None) => diff_scalar(
            changes,
            Class::Info,
            String::from(".info.contact"),
            "contact",
            &contact.to_value().to_string(),
            "",
        ),
        (Some(from), Some(to)) => {
            diff_scalar(
                changes,
                Class::Info,
                String::from(".info.contact.name"),
                "name",
                &from.name,
                &to.name,
            );
            diff_scalar(
                changes,
                Class::Info,
                String::from(".info.contact.email"),
                "email",
                &from.email,
                &to.email,
            );
            diff_scalar(
                changes,
                Class::Info,
                String::from(".info.contact.url"),
                "url",
                &from.url,
                &to.url,
            );
            diff_extensions(
                changes,
                Class::Info,
                ".info.contact",
                &from.extensions,
                &to.extensions,
            );
        }
    }
}

fn diff_license(
    changes: &mut ChangesByLocation,
    from: Option<&License>,
    to: Option<&License>,
) {
    match (from, to) {
        (None, None) => {}
        (None, Some(license)) => diff_scalar(
            changes,
            Class::Info,
            String::from(".info.license"),
            "license",
            "",
            &license.to_value().to_string(),
        ),
        (Some(license), None) => diff_scalar(
            changes,
            Class::Info,
            String::from(".info.license"),
            "license",
            &license.to_value().to_string(),
            "",
        ),
        (Some(from), Some(to)) => {
            diff_scalar(
                changes,
                Class::Info,
                String::from(".info.license.name"),
                "name",
                &from.name,
                &to.name,
            );
            diff_scalar(
                changes,
                Class::Info,
                String::from(".info.license.url"),
                "url",
                &from.url,
                &to.url,
            );
            diff_extensions(
                changes,
                Class::Info,
                ".info.license",
                &from.extensions,
                &to.extensions,
            );
        }
    }
}

fn analyze_definitions(
    from: &BTreeMap<String, Schema>,
    to: &BTreeMap<String, Schema>,
) -> ChangesByLocation {
    let mut changes = ChangesByLocation::new();
    for name in to.keys() {
        if !from.contains_key(name) {
            record(
                &mut changes,
                Change {
                    location: String::from(".definitions"),
                    name: String::from("definitions"),
                    old_value: String::new(),
                    new_value: name.clone(),
                    operation: DiffOp::ItemAdded,
                    class: Class::Definition,
                },
            );
        }
    }
    for (name, from_schema) in from {
        match to.get(name) {
            None => record(
                &mut changes,
                Change {
                    location: String::from(".definitions"),
                    name: String::from("definitions"),
                    old_value: name.clone(),
                    new_value: String::new(),
                    operation: DiffOp::ItemRemoved,
                    class: Class::Definition,
                },
            ),
            Some(to_schema) => {
                let base = sub(".definitions", name);
                diff_schema(&mut changes, Class::Definition, &base, from_schema, to_schema);
            }
        }
    }
    changes
}

fn analyze_paths(from: &Paths, to: &Paths) -> ChangesByLocation {
    let mut changes = ChangesByLocation::new();
    for path in to.items.keys() {
        if !from.items.contains_key(path) {
            record(
                &mut changes,
                Change {
                    location: String::from(".paths"),
                    name: String::from("paths"),
                    old_value: String::new(),
                    new_value: path.clone(),
                    operation: DiffOp::ItemAdded,
                    class: Class::Paths,
                },
            );
        }
    }
    for (path, from_item) in &from.items {
        match to.items.get(path) {
            None => record(
                &mut changes,
                Change {
                    location: String::from(".paths"),
                    name: String::from("paths"),
                    old_value: path.clone(),
                    new_value: String::new(),
                    operation: DiffOp::ItemRemoved,
                    class: Class::Paths,
                },
            ),
            Some(to_item) => diff_extensions(
                &mut changes,
                Class::Paths,
                from_item.document_location().as_str(),
                &from_item.extensions,
                &to_item.extensions,
            ),
        }
    }
    diff_extensions(&mut changes, Class::Paths, ".paths", &from.extensions, &to.extensions);
    changes
}

/// Builds one map over the operations of both documents, keyed by their
/// canonical natural key, and reports removals, additions and per-field
/// changes. Also populates the derived per-operation index.
fn analyze_operations(
    from: &Swagger,
    to: &Swagger,
) -> (ChangesByLocation, BTreeMap<OperationKey, Vec<Change>>) {
    let mut changes = ChangesByLocation::new();
    let mut by_operation: BTreeMap<OperationKey, Vec<Change>> = BTreeMap::new();
    let from_map = from.operation_map();
    let to_map = to.operation_map();

    for key in from_map.difference(to_map).keys() {
        let Some(op) = from.operation(key) else { continue };
        let change = Change {
            location: op.document_location().as_str().to_owned(),
            name: key.to_string(),
            old_value: op.to_value().to_string(),
            new_value: String::new(),
            operation: DiffOp::ItemRemoved,
            class: Class::Operation,
        };
        by_operation.insert(key.clone(), vec![change.clone()]);
        record(&mut changes, change);
    }
    for key in to_map.difference(from_map).keys() {
        let Some(op) = to.operation(key) else { continue };
        let change = Change {
            location: op.document_location().as_str().to_owned(),
            name: key.to_string(),
            old_value: String::new(),
            new_value: op.to_value().to_string(),
            operation: DiffOp::ItemAdded,
            class: Class::Operation,
        };
        by_operation.insert(key.clone(), vec![change.clone()]);
        record(&mut changes, change);
    }
    for key in from_map.intersect(to_map).keys() {
        let (Some(from_op), Some(to_op)) = (from.operation(key), to.operation(key)) else {
            continue;
        };
        let op_changes = diff_operation(from_op, to_op);
        if op_changes.is_empty() {
            continue;
        }
        by_operation.insert(key.clone(), op_changes.clone());
        for change in op_changes {
            record(&mut changes, change);
        }
    }
    (changes, by_operation)
}

/// Field-level comparison of one operation present in both documents: every
/// sub-field produces its own located change, never a single opaque update.
fn diff_operation(from: &Operation, to: &Operation) -> Vec<Change> {
    let mut changes = ChangesByLocation::new();
    let class = Class::Operation;
    let base = to.document_location().as_str();

    diff_scalar(
        &mut changes,
        class,
        sub(base, "operationId"),
        "operationId",
        &from.id,
        &to.id,
    );
    diff_scalar(
        &mut changes,
        class,
        sub(base, "summary"),
        "summary",
        &from.summary,
        &to.summary,
    );
    diff_scalar(
        &mut changes,
        class,
        sub(base, "description"),
        "description",
        &from.description,
        &to.description,
    );
    diff_scalar(
        &mut changes,
        class,
        sub(base, "deprecated"),
        "deprecated",
        flag_str(from.deprecated),
        flag_str(to.deprecated),
    );
    diff_string_set(&mut changes, class, &sub(base, "tags"), "tags", &from.tags, &to.tags);
    diff_string_set(
        &mut changes,
        class,
        &sub(base, "consumes"),
        "consumes",
        &from.consumes,
        &to.consumes,
    );
    diff_string_set(
        &mut changes,
        class,
        &sub(base, "produces"),
        "produces",
        &from.produces,
        &to.produces,
    );
    diff_string_set(
        &mut changes,
        class,
        &sub(base, "schemes"),
        "schemes",
        &from.schemes,
        &to.schemes,
    );
    diff_parameters(
        &mut changes,
        class,
        &sub(base, "parameters"),
        &from.parameters,
        &to.parameters,
    );
    diff_responses(
        &mut changes,
        class,
        &sub(base, "responses"),
        &from.responses,
        &to.responses,
    );
    diff_security(
        &mut changes,
        class,
        &sub(base, "security"),
        &from.security,
        &to.security,
    );
    diff_external_docs(
        &mut changes,
        class,
        &sub(base, "externalDocs"),
        from.external_docs.as_ref(),
        to.external_docs.as_ref(),
    );
    diff_extensions(&mut changes, class, base, &from.extensions, &to.extensions);

    changes.into_values().flatten().collect()
}

/// Security requirement sets compare by canonical serialized form under
/// set-membership rules.
fn diff_security(
    changes: &mut ChangesByLocation,
    class: Class,
    location: &str,
    from: &[SecurityRequirements],
    to: &[SecurityRequirements],
) {
    let from_values: Vec<String> = from
        .iter()
        .map(|req| security_requirements_to_value(req).to_string())
        .collect();
    let to_values: Vec<String> = to
        .iter()
        .map(|req| security_requirements_to_value(req).to_string())
        .collect();
    diff_string_set(changes, class, location, "security", &from_values, &to_values);
}

fn diff_external_docs(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: Option<&ExternalDocumentation>,
    to: Option<&ExternalDocumentation>,
) {
    match (from, to) {
        (None, None) => {}
        (None, Some(docs)) => diff_scalar(
            changes,
            class,
            base.to_owned(),
            "externalDocs",
            "",
            &docs.to_value().to_string(),
        ),
        (Some(docs), None) => diff_scalar(
            changes,
            class,
            base.to_owned(),
            "externalDocs",
            &docs.to_value().to_string(),
            "",
        ),
        (Some(from), Some(to)) => {
            diff_scalar(
                changes,
                class,
                sub(base, "url"),
                "url",
                &from.url,
                &to.url,
            );
            diff_scalar(
                changes,
                class,
                sub(base, "description"),
                "description",
                &from.description,
                &to.description,
            );
            diff_extensions(changes, class, base, &from.extensions, &to.extensions);
        }
    }
}

/// Parameters pair up by their `(name, in)` identity; order in the parameter
/// list is not a signal.
fn diff_parameters(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &[Parameter],
    to: &[Parameter],
) {
    let key = |p: &Parameter| (p.name.clone(), p.location_in.clone());
    let from_by_key: BTreeMap<(String, String), &Parameter> =
        from.iter().map(|p| (key(p), p)).collect();
    let to_by_key: BTreeMap<(String, String), &Parameter> =
        to.iter().map(|p| (key(p), p)).collect();

    for (k, parameter) in &to_by_key {
        if !from_by_key.contains_key(k) {
            record(
                changes,
                Change {
                    location: base.to_owned(),
                    name: String::from("parameters"),
                    old_value: String::new(),
                    new_value: parameter.to_value().to_string(),
                    operation: DiffOp::ItemAdded,
                    class,
                },
            );
        }
    }
    for (k, from_param) in &from_by_key {
        match to_by_key.get(k) {
            None => record(
                changes,
                Change {
                    location: base.to_owned(),
                    name: String::from("parameters"),
                    old_value: from_param.to_value().to_string(),
                    new_value: String::new(),
                    operation: DiffOp::ItemRemoved,
                    class,
                },
            ),
            Some(to_param) => {
                let param_base = to_param.document_location().as_str();
                diff_parameter(changes, class, param_base, from_param, to_param);
            }
        }
    }
}

fn diff_parameter(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &Parameter,
    to: &Parameter,
) {
    diff_scalar(
        changes,
        class,
        sub(base, "description"),
        "description",
        &from.description,
        &to.description,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "required"),
        "required",
        flag_str(from.required),
        flag_str(to.required),
    );
    diff_scalar(
        changes,
        class,
        sub(base, "type"),
        "type",
        &from.type_name,
        &to.type_name,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "format"),
        "format",
        &from.format,
        &to.format,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "collectionFormat"),
        "collectionFormat",
        &from.collection_format,
        &to.collection_format,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "allowEmptyValue"),
        "allowEmptyValue",
        flag_str(from.allow_empty_value),
        flag_str(to.allow_empty_value),
    );
    diff_scalar(
        changes,
        class,
        sub(base, "pattern"),
        "pattern",
        &from.pattern,
        &to.pattern,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "multipleOf"),
        "multipleOf",
        &int_str(from.multiple_of),
        &int_str(to.multiple_of),
    );
    diff_constraints(changes, class, base, &constraint_fields(from), &constraint_fields(to));
    let from_enum: Vec<String> = from.enum_values.iter().map(Value::to_string).collect();
    let to_enum: Vec<String> = to.enum_values.iter().map(Value::to_string).collect();
    diff_string_set(changes, class, &sub(base, "enum"), "enum", &from_enum, &to_enum);
    diff_scalar(
        changes,
        class,
        sub(base, "default"),
        "default",
        &value_str(&from.default),
        &value_str(&to.default),
    );
    match (&from.items, &to.items) {
        (None, None) => {}
        (None, Some(items)) => diff_scalar(
            changes,
            class,
            sub(base, "items"),
            "items",
            "",
            &items.to_value().to_string(),
        ),
        (Some(items), None) => diff_scalar(
            changes,
            class,
            sub(base, "items"),
            "items",
            &items.to_value().to_string(),
            "",
        ),
        (Some(from_items), Some(to_items)) => {
            diff_items(changes, class, &sub(base, "items"), from_items, to_items);
        }
    }
    match (&from.schema, &to.schema) {
        (None, None) => {}
        (None, Some(schema)) => diff_scalar(
            changes,
            class,
            sub(base, "schema"),
            "schema",
            "",
            &schema.to_value().to_string(),
        ),
        (Some(schema), None) => diff_scalar(
            changes,
            class,
            sub(base, "schema"),
            "schema",
            &schema.to_value().to_string(),
            "",
        ),
        (Some(from_schema), Some(to_schema)) => {
            diff_schema(changes, class, &sub(base, "schema"), from_schema, to_schema);
        }
    }
    diff_extensions(changes, class, base, &from.extensions, &to.extensions);
}

/// The shared numeric/flag constraint set carried by parameters, items and
/// headers, paired with its swagger field names.
struct Constraints {
    fields: [(&'static str, String); 11],
}

fn constraint_fields(p: &Parameter) -> Constraints {
    Constraints {
        fields: [
            ("maximum", int_str(p.maximum)),
            ("exclusiveMaximum", flag_str(p.exclusive_maximum).to_owned()),
            ("minimum", int_str(p.minimum)),
            ("exclusiveMinimum", flag_str(p.exclusive_minimum).to_owned()),
            ("maxLength", int_str(p.max_length)),
            ("minLength", int_str(p.min_length)),
            ("maxItems", int_str(p.max_items)),
            ("minItems", int_str(p.min_items)),
            ("uniqueItems", flag_str(p.unique_items).to_owned()),
            ("maxProperties", int_str(p.max_properties)),
            ("minProperties", int_str(p.min_properties)),
        ],
    }
}

fn items_constraints(i: &Items) -> Constraints {
    Constraints {
        fields: [
            ("maximum", int_str(i.maximum)),
            ("exclusiveMaximum", flag_str(i.exclusive_maximum).to_owned()),
            ("minimum", int_str(i.minimum)),
            ("exclusiveMinimum", flag_str(i.exclusive_minimum).to_owned()),
            ("maxLength", int_str(i.max_length)),
            ("minLength", int_str(i.min_length)),
            ("maxItems", int_str(i.max_items)),
            ("minItems", int_str(i.min_items)),
            ("uniqueItems", flag_str(i.unique_items).to_owned()),
            ("maxProperties", int_str(i.max_properties)),
            ("minProperties", int_str(i.min_properties)),
        ],
    }
}

fn header_constraints(h: &Header) -> Constraints {
    Constraints {
        fields: [
            ("maximum", int_str(h.maximum)),
            ("exclusiveMaximum", flag_str(h.exclusive_maximum).to_owned()),
            ("minimum", int_str(h.minimum)),
            ("exclusiveMinimum", flag_str(h.exclusive_minimum).to_owned()),
            ("maxLength", int_str(h.max_length)),
            ("minLength", int_str(h.min_length)),
            ("maxItems", int_str(h.max_items)),
            ("minItems", int_str(h.min_items)),
            ("uniqueItems", flag_str(h.unique_items).to_owned()),
            ("maxProperties", int_str(h.max_properties)),
            ("minProperties", int_str(h.min_properties)),
        ],
    }
}

fn diff_constraints(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &Constraints,
    to: &Constraints,
) {
    for ((name, old), (_, new)) in from.fields.iter().zip(to.fields.iter()) {
        diff_scalar(changes, class, sub(base, name), name, old, new);
    }
}

fn diff_items(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &Items,
    to: &Items,
) {
    diff_scalar(changes, class, sub(base, "type"), "type", &from.type_name, &to.type_name);
    diff_scalar(changes, class, sub(base, "format"), "format", &from.format, &to.format);
    diff_scalar(
        changes,
        class,
        sub(base, "collectionFormat"),
        "collectionFormat",
        &from.collection_format,
        &to.collection_format,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "pattern"),
        "pattern",
        &from.pattern,
        &to.pattern,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "multipleOf"),
        "multipleOf",
        &int_str(from.multiple_of),
        &int_str(to.multiple_of),
    );
    diff_scalar(
        changes,
        class,
        sub(base, "required"),
        "required",
        flag_str(from.required),
        flag_str(to.required),
    );
    diff_constraints(changes, class, base, &items_constraints(from), &items_constraints(to));
    let from_enum: Vec<String> = from.enum_values.iter().map(Value::to_string).collect();
    let to_enum: Vec<String> = to.enum_values.iter().map(Value::to_string).collect();
    diff_string_set(changes, class, &sub(base, "enum"), "enum", &from_enum, &to_enum);
    diff_scalar(
        changes,
        class,
        sub(base, "default"),
        "default",
        &value_str(&from.default),
        &value_str(&to.default),
    );
    match (&from.items, &to.items) {
        (None, None) => {}
        (None, Some(items)) => diff_scalar(
            changes,
            class,
            sub(base, "items"),
            "items",
            "",
            &items.to_value().to_string(),
        ),
        (Some(items), None) => diff_scalar(
            changes,
            class,
            sub(base, "items"),
            "items",
            &items.to_value().to_string(),
            "",
        ),
        (Some(from_items), Some(to_items)) => {
            diff_items(changes, class, &sub(base, "items"), from_items, to_items);
        }
    }
    diff_extensions(changes, class, base, &from.extensions, &to.extensions);
}

fn diff_responses(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &Responses,
    to: &Responses,
) {
    match (&from.default, &to.default) {
        (None, None) => {}
        (None, Some(response)) => diff_scalar(
            changes,
            class,
            sub(base, "default"),
            "default",
            "",
            &response.to_value().to_string(),
        ),
        (Some(response), None) => diff_scalar(
            changes,
            class,
            sub(base, "default"),
            "default",
            &response.to_value().to_string(),
            "",
        ),
        (Some(from_default), Some(to_default)) => diff_response(
            changes,
            class,
            &sub(base, "default"),
            from_default,
            to_default,
        ),
    }
    for status in to.by_status_code.keys() {
        if !from.by_status_code.contains_key(status) {
            record(
                changes,
                Change {
                    location: base.to_owned(),
                    name: String::from("responses"),
                    old_value: String::new(),
                    new_value: status.to_string(),
                    operation: DiffOp::ItemAdded,
                    class,
                },
            );
        }
    }
    for (status, from_response) in &from.by_status_code {
        match to.by_status_code.get(status) {
            None => record(
                changes,
                Change {
                    location: base.to_owned(),
                    name: String::from("responses"),
                    old_value: status.to_string(),
                    new_value: String::new(),
                    operation: DiffOp::ItemRemoved,
                    class,
                },
            ),
            Some(to_response) => diff_response(
                changes,
                class,
                &sub(base, &status.to_string()),
                from_response,
                to_response,
            ),
        }
    }
    diff_extensions(changes, class, base, &from.extensions, &to.extensions);
}

fn diff_response(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &Response,
    to: &Response,
) {
    diff_scalar(
        changes,
        class,
        sub(base, "description"),
        "description",
        &from.description,
        &to.description,
    );
    match (&from.schema, &to.schema) {
        (None, None) => {}
        (None, Some(schema)) => diff_scalar(
            changes,
            class,
            sub(base, "schema"),
            "schema",
            "",
            &schema.to_value().to_string(),
        ),
        (Some(schema), None) => diff_scalar(
            changes,
            class,
            sub(base, "schema"),
            "schema",
            &schema.to_value().to_string(),
            "",
        ),
        (Some(from_schema), Some(to_schema)) => {
            diff_schema(changes, class, &sub(base, "schema"), from_schema, to_schema);
        }
    }
    let headers_base = sub(base, "headers");
    for name in to.headers.keys() {
        if !from.headers.contains_key(name) {
            record(
                changes,
                Change {
                    location: headers_base.clone(),
                    name: String::from("headers"),
                    old_value: String::new(),
                    new_value: name.clone(),
                    operation: DiffOp::ItemAdded,
                    class,
                },
            );
        }
    }
    for (name, from_header) in &from.headers {
        match to.headers.get(name) {
            None => record(
                changes,
                Change {
                    location: headers_base.clone(),
                    name: String::from("headers"),
                    old_value: name.clone(),
                    new_value: String::new(),
                    operation: DiffOp::ItemRemoved,
                    class,
                },
            ),
            Some(to_header) => diff_header(
                changes,
                class,
                &sub(&headers_base, name),
                from_header,
                to_header,
            ),
        }
    }
    diff_extensions(changes, class, base, &from.extensions, &to.extensions);
}

fn diff_header(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &Header,
    to: &Header,
) {
    diff_scalar(
        changes,
        class,
        sub(base, "description"),
        "description",
        &from.description,
        &to.description,
    );
    diff_scalar(changes, class, sub(base, "type"), "type", &from.type_name, &to.type_name);
    diff_scalar(changes, class, sub(base, "format"), "format", &from.format, &to.format);
    diff_scalar(
        changes,
        class,
        sub(base, "collectionFormat"),
        "collectionFormat",
        &from.collection_format,
        &to.collection_format,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "pattern"),
        "pattern",
        &from.pattern,
        &to.pattern,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "multipleOf"),
        "multipleOf",
        &int_str(from.multiple_of),
        &int_str(to.multiple_of),
    );
    diff_scalar(
        changes,
        class,
        sub(base, "required"),
        "required",
        flag_str(from.required),
        flag_str(to.required),
    );
    diff_constraints(
        changes,
        class,
        base,
        &header_constraints(from),
        &header_constraints(to),
    );
    let from_enum: Vec<String> = from.enum_values.iter().map(Value::to_string).collect();
    let to_enum: Vec<String> = to.enum_values.iter().map(Value::to_string).collect();
    diff_string_set(changes, class, &sub(base, "enum"), "enum", &from_enum, &to_enum);
    diff_scalar(
        changes,
        class,
        sub(base, "default"),
        "default",
        &value_str(&from.default),
        &value_str(&to.default),
    );
    match (&from.items, &to.items) {
        (None, None) => {}
        (None, Some(items)) => diff_scalar(
            changes,
            class,
            sub(base, "items"),
            "items",
            "",
            &items.to_value().to_string(),
        ),
        (Some(items), None) => diff_scalar(
            changes,
            class,
            sub(base, "items"),
            "items",
            &items.to_value().to_string(),
            "",
        ),
        (Some(from_items), Some(to_items)) => {
            diff_items(changes, class, &sub(base, "items"), from_items, to_items);
        }
    }
    diff_extensions(changes, class, base, &from.extensions, &to.extensions);
}

/// Recursive schema comparison built from the same scalar/set/extension
/// primitives as everything else.
fn diff_schema(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &Schema,
    to: &Schema,
) {
    let ref_uri = |s: &Schema| {
        s.reference
            .as_ref()
            .map(|r| r.uri().to_owned())
            .unwrap_or_default()
    };
    diff_scalar(changes, class, sub(base, "$ref"), "$ref", &ref_uri(from), &ref_uri(to));
    diff_scalar(changes, class, sub(base, "format"), "format", &from.format, &to.format);
    diff_scalar(changes, class, sub(base, "title"), "title", &from.title, &to.title);
    diff_scalar(
        changes,
        class,
        sub(base, "description"),
        "description",
        &from.description,
        &to.description,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "pattern"),
        "pattern",
        &from.pattern,
        &to.pattern,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "discriminator"),
        "discriminator",
        &from.discriminator,
        &to.discriminator,
    );
    diff_scalar(
        changes,
        class,
        sub(base, "readOnly"),
        "readOnly",
        flag_str(from.is_read_only),
        flag_str(to.is_read_only),
    );
    for (name, old, new) in [
        ("multipleOf", from.multiple_of, to.multiple_of),
        ("maximum", from.maximum, to.maximum),
        ("minimum", from.minimum, to.minimum),
        ("maxLength", from.max_length, to.max_length),
        ("minLength", from.min_length, to.min_length),
        ("maxItems", from.max_items, to.max_items),
        ("minItems", from.min_items, to.min_items),
        ("maxProperties", from.max_properties, to.max_properties),
        ("minProperties", from.min_properties, to.min_properties),
    ] {
        diff_scalar(changes, class, sub(base, name), name, &int_str(old), &int_str(new));
    }
    for (name, old, new) in [
        ("exclusiveMaximum", from.exclusive_maximum, to.exclusive_maximum),
        ("exclusiveMinimum", from.exclusive_minimum, to.exclusive_minimum),
        ("uniqueItems", from.unique_items, to.unique_items),
    ] {
        diff_scalar(changes, class, sub(base, name), name, flag_str(old), flag_str(new));
    }
    diff_string_set(
        changes,
        class,
        &sub(base, "required"),
        "required",
        &from.required,
        &to.required,
    );
    let from_enum: Vec<String> = from.enum_values.iter().map(Value::to_string).collect();
    let to_enum: Vec<String> = to.enum_values.iter().map(Value::to_string).collect();
    diff_string_set(changes, class, &sub(base, "enum"), "enum", &from_enum, &to_enum);
    let type_values = |s: &Schema| {
        s.type_name
            .as_ref()
            .map(|t| t.values().to_vec())
            .unwrap_or_default()
    };
    diff_string_set(
        changes,
        class,
        &sub(base, "type"),
        "type",
        &type_values(from),
        &type_values(to),
    );
    diff_schema_items(changes, class, &sub(base, "items"), from.items.as_ref(), to.items.as_ref());
    diff_schema_or_bool(
        changes,
        class,
        &sub(base, "additionalItems"),
        "additionalItems",
        from.additional_items.as_ref(),
        to.additional_items.as_ref(),
    );
    diff_all_of(changes, class, &sub(base, "allOf"), &from.all_of, &to.all_of);
    let properties_base = sub(base, "properties");
    for name in to.properties.keys() {
        if !from.properties.contains_key(name) {
            record(
                changes,
                Change {
                    location: properties_base.clone(),
                    name: String::from("properties"),
                    old_value: String::new(),
                    new_value: name.clone(),
                    operation: DiffOp::ItemAdded,
                    class,
                },
            );
        }
    }
    for (name, from_property) in &from.properties {
        match to.properties.get(name) {
            None => record(
                changes,
                Change {
                    location: properties_base.clone(),
                    name: String::from("properties"),
                    old_value: name.clone(),
                    new_value: String::new(),
                    operation: DiffOp::ItemRemoved,
                    class,
                },
            ),
            Some(to_property) => diff_schema(
                changes,
                class,
                &sub(&properties_base, name),
                from_property,
                to_property,
            ),
        }
    }
    diff_schema_or_bool(
        changes,
        class,
        &sub(base, "additionalProperties"),
        "additionalProperties",
        from.additional_properties.as_ref(),
        to.additional_properties.as_ref(),
    );
    diff_scalar(
        changes,
        class,
        sub(base, "default"),
        "default",
        &value_str(&from.default),
        &value_str(&to.default),
    );
    diff_scalar(
        changes,
        class,
        sub(base, "example"),
        "example",
        &value_str(&from.example),
        &value_str(&to.example),
    );
    diff_external_docs(
        changes,
        class,
        &sub(base, "externalDocs"),
        from.external_docs.as_ref(),
        to.external_docs.as_ref(),
    );
    diff_extensions(changes, class, base, &from.extensions, &to.extensions);
}

fn diff_schema_items(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: Option<&SchemaOrSchemas>,
    to: Option<&SchemaOrSchemas>,
) {
    match (from, to) {
        (None, None) => {}
        (None, Some(items)) => diff_scalar(
            changes,
            class,
            base.to_owned(),
            "items",
            "",
            &items.to_value().to_string(),
        ),
        (Some(items), None) => diff_scalar(
            changes,
            class,
            base.to_owned(),
            "items",
            &items.to_value().to_string(),
            "",
        ),
        (Some(SchemaOrSchemas::One(from_schema)), Some(SchemaOrSchemas::One(to_schema))) => {
            diff_schema(changes, class, base, from_schema, to_schema);
        }
        (Some(SchemaOrSchemas::Many(from_items)), Some(SchemaOrSchemas::Many(to_items))) => {
            let shared = from_items.len().min(to_items.len());
            for i in 0..shared {
                let item_base = format!("{}[{}]", base, i);
                diff_schema(changes, class, &item_base, &from_items[i], &to_items[i]);
            }
            for schema in &to_items[shared..] {
                record(
                    changes,
                    Change {
                        location: base.to_owned(),
                        name: String::from("items"),
                        old_value: String::new(),
                        new_value: schema.to_value().to_string(),
                        operation: DiffOp::ItemAdded,
                        class,
                    },
                );
            }
            for schema in &from_items[shared..] {
                record(
                    changes,
                    Change {
                        location: base.to_owned(),
                        name: String::from("items"),
                        old_value: schema.to_value().to_string(),
                        new_value: String::new(),
                        operation: DiffOp::ItemRemoved,
                        class,
                    },
                );
            }
        }
        (Some(from_items), Some(to_items)) => {
            // One side holds a single schema, the other a tuple; the shape
            // itself changed.
            diff_scalar(
                changes,
                class,
                base.to_owned(),
                "items",
                &from_items.to_value().to_string(),
                &to_items.to_value().to_string(),
            );
        }
    }
}

fn diff_schema_or_bool(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    name: &str,
    from: Option<&SchemaOrBool>,
    to: Option<&SchemaOrBool>,
) {
    match (from, to) {
        (None, None) => {}
        (None, Some(value)) => diff_scalar(
            changes,
            class,
            base.to_owned(),
            name,
            "",
            &value.to_value().to_string(),
        ),
        (Some(value), None) => diff_scalar(
            changes,
            class,
            base.to_owned(),
            name,
            &value.to_value().to_string(),
            "",
        ),
        (Some(SchemaOrBool::Schema(from_schema)), Some(SchemaOrBool::Schema(to_schema))) => {
            diff_schema(changes, class, base, from_schema, to_schema);
        }
        (Some(from_value), Some(to_value)) => {
            let old = from_value.to_value().to_string();
            let new = to_value.to_value().to_string();
            if old != new {
                record(
                    changes,
                    Change {
                        location: base.to_owned(),
                        name: name.to_owned(),
                        old_value: old,
                        new_value: new,
                        operation: DiffOp::Update,
                        class,
                    },
                );
            }
        }
    }
}

/// `allOf` members pair by index; a length change is reported as one update
/// on the field itself.
fn diff_all_of(
    changes: &mut ChangesByLocation,
    class: Class,
    base: &str,
    from: &[Schema],
    to: &[Schema],
) {
    if from.len() != to.len() {
        record(
            changes,
            Change {
                location: base.to_owned(),
                name: String::from("allOf"),
                old_value: from.len().to_string(),
                new_value: to.len().to_string(),
                operation: DiffOp::Update,
                class,
            },
        );
        return;
    }
    for (i, (from_schema, to_schema)) in from.iter().zip(to.iter()).enumerate() {
        let item_base = format!("{}[{}]", base, i);
        diff_schema(changes, class, &item_base, from_schema, to_schema);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    fn minimal(paths: Value) -> Value {
        json!({
            "swagger": "2.0",
            "info": {"title": "Petstore", "version": "1.0.0"},
            "paths": paths
        })
    }

    fn all_changes(report: &Report, class: Class) -> Vec<&Change> {
        report
            .changes
            .get(&class)
            .map(|by_loc| by_loc.values().flatten().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_both_empty_inputs_reported_together() {
        let err = analyze(b"", b"").unwrap_err();
        let DiffError::Multiple(errors) = err else {
            panic!("expected combined input errors");
        };
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_parse_failure_on_either_side_is_fatal() {
        let good = raw(minimal(json!({})));
        let err = analyze(&good, b"{oops").unwrap_err();
        assert!(matches!(err, DiffError::ToParse(_)));

        let err = analyze(b"{oops", &good).unwrap_err();
        assert!(matches!(err, DiffError::FromParse(_)));
    }

    #[test]
    fn test_identical_documents_yield_empty_report() {
        let doc = raw(json!({
            "swagger": "2.0",
            "info": {
                "title": "Petstore",
                "version": "1.0.0",
                "contact": {"name": "support", "email": "s@example.com"}
            },
            "host": "api.example.com",
            "schemes": ["https"],
            "definitions": {
                "Pet": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {"name": {"type": "string"}}
                }
            },
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "listPets",
                        "tags": ["pets"],
                        "responses": {"200": {"description": "ok"}}
                    }
                }
            },
            "x-audience": "public"
        }));
        let report = analyze(&doc, &doc).unwrap();
        assert!(report.is_empty());
        assert!(report.changes_by_operation.is_empty());
        assert_eq!(report.to_string(), "{}");
    }

    #[test]
    fn test_root_scalar_and_set_changes() {
        let from = raw(json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "host": "old.example.com",
            "schemes": ["http", "https"],
            "paths": {}
        }));
        let to = raw(json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "basePath": "/v2",
            "schemes": ["https", "wss"],
            "paths": {}
        }));
        let report = analyze(&from, &to).unwrap();
        let root = report.changes.get(&Class::Root).unwrap();

        let host = &root[".host"][0];
        assert_eq!(host.operation, DiffOp::Remove);
        assert_eq!(host.old_value, "old.example.com");

        let base_path = &root[".basePath"][0];
        assert_eq!(base_path.operation, DiffOp::Add);
        assert_eq!(base_path.new_value, "/v2");

        let schemes = &root[".schemes"];
        assert_eq!(schemes.len(), 2);
        assert!(schemes.iter().any(|c| c.operation == DiffOp::ItemAdded && c.new_value == "wss"));
        assert!(
            schemes
                .iter()
                .any(|c| c.operation == DiffOp::ItemRemoved && c.old_value == "http")
        );
    }

    #[test]
    fn test_set_membership_diff_is_symmetric() {
        let make = |schemes: Value| {
            raw(json!({
                "swagger": "2.0",
                "info": {"title": "x", "version": "1"},
                "schemes": schemes,
                "paths": {}
            }))
        };
        let a = make(json!(["http", "https", "https"]));
        let b = make(json!(["https", "wss"]));

        let forward = analyze(&a, &b).unwrap();
        let backward = analyze(&b, &a).unwrap();

        let collect = |report: &Report| -> Vec<(DiffOp, String)> {
            let mut result: Vec<(DiffOp, String)> = all_changes(report, Class::Root)
                .iter()
                .map(|c| {
                    let value = if c.operation == DiffOp::ItemAdded {
                        c.new_value.clone()
                    } else {
                        c.old_value.clone()
                    };
                    (c.operation, value)
                })
                .collect();
            result.sort_by(|a, b| a.1.cmp(&b.1));
            result
        };

        let forward_changes = collect(&forward);
        let backward_changes = collect(&backward);
        assert_eq!(forward_changes.len(), backward_changes.len());
        for ((fwd_op, fwd_value), (bwd_op, bwd_value)) in
            forward_changes.iter().zip(backward_changes.iter())
        {
            assert_eq!(fwd_value, bwd_value);
            match fwd_op {
                DiffOp::ItemAdded => assert_eq!(*bwd_op, DiffOp::ItemRemoved),
                DiffOp::ItemRemoved => assert_eq!(*bwd_op, DiffOp::ItemAdded),
                other => panic!("unexpected op: {}", other),
            }
        }
        // duplicates never count: "https" twice on one side is not a change
        assert!(!forward_changes.iter().any(|(_, v)| v == "https"));
    }

    #[test]
    fn test_info_contact_added_and_license_nested_change() {
        let from = raw(json!({
            "swagger": "2.0",
            "info": {
                "title": "x",
                "version": "1",
                "license": {"name": "MIT", "url": "https://old.example.com"}
            },
            "paths": {}
        }));
        let to = raw(json!({
            "swagger": "2.0",
            "info": {
                "title": "x",
                "version": "2",
                "contact": {"name": "support"},
                "license": {"name": "MIT", "url": "https://new.example.com"}
            },
            "paths": {}
        }));
        let report = analyze(&from, &to).unwrap();
        let info = report.changes.get(&Class::Info).unwrap();

        assert_eq!(info[".info.version"][0].operation, DiffOp::Update);
        assert_eq!(info[".info.contact"][0].operation, DiffOp::Add);
        let license_url = &info[".info.license.url"][0];
        assert_eq!(license_url.operation, DiffOp::Update);
        assert_eq!(license_url.new_value, "https://new.example.com");
    }

    #[test]
    fn test_added_method_on_existing_path_leaves_other_operation_untouched() {
        let from = raw(minimal(json!({
            "/pets": {
                "get": {"responses": {"200": {"description": "ok"}}}
            }
        })));
        let to = raw(minimal(json!({
            "/pets": {
                "get": {"responses": {"200": {"description": "ok"}}},
                "post": {"responses": {"201": {"description": "created"}}}
            }
        })));
        let report = analyze(&from, &to).unwrap();

        let operations = all_changes(&report, Class::Operation);
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].operation, DiffOp::ItemAdded);
        assert_eq!(operations[0].name, "POST /pets");
        assert_eq!(operations[0].location, ".paths./pets.post");

        let post_key = OperationKey {
            path: String::from("/pets"),
            method: String::from("POST"),
        };
        let get_key = OperationKey {
            path: String::from("/pets"),
            method: String::from("GET"),
        };
        assert!(report.changes_by_operation.contains_key(&post_key));
        assert!(!report.changes_by_operation.contains_key(&get_key));
        // the path itself exists on both sides, so no paths change either
        assert!(report.changes.get(&Class::Paths).is_none());
    }

    #[test]
    fn test_removed_path_reports_paths_and_operation_changes() {
        let from = raw(minimal(json!({
            "/pets": {"get": {"responses": {"200": {"description": "ok"}}}},
            "/owners": {"get": {"responses": {"200": {"description": "ok"}}}}
        })));
        let to = raw(minimal(json!({
            "/pets": {"get": {"responses": {"200": {"description": "ok"}}}}
        })));
        let report = analyze(&from, &to).unwrap();

        let paths = report.changes.get(&Class::Paths).unwrap();
        let removed = &paths[".paths"][0];
        assert_eq!(removed.operation, DiffOp::ItemRemoved);
        assert_eq!(removed.old_value, "/owners");

        let operations = all_changes(&report, Class::Operation);
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].operation, DiffOp::ItemRemoved);
        assert_eq!(operations[0].name, "GET /owners");
    }

    #[test]
    fn test_shared_operation_diffs_field_by_field() {
        let from = raw(minimal(json!({
            "/pets": {
                "get": {
                    "summary": "List pets",
                    "deprecated": false,
                    "tags": ["pets"],
                    "produces": ["application/json"],
                    "responses": {
                        "200": {"description": "ok"},
                        "404": {"description": "missing"}
                    }
                }
            }
        })));
        let to = raw(minimal(json!({
            "/pets": {
                "get": {
                    "summary": "List all pets",
                    "deprecated": true,
                    "tags": ["pets", "listing"],
                    "produces": ["application/json"],
                    "responses": {
                        "200": {"description": "everything is fine"}
                    }
                }
            }
        })));
        let report = analyze(&from, &to).unwrap();
        let key = OperationKey {
            path: String::from("/pets"),
            method: String::from("GET"),
        };
        let changes = report.changes_by_operation.get(&key).unwrap();

        let find = |name: &str| {
            changes
                .iter()
                .find(|c| c.name == name)
                .unwrap_or_else(|| panic!("missing change for {}", name))
        };
        let summary = find("summary");
        assert_eq!(summary.operation, DiffOp::Update);
        assert_eq!(summary.location, ".paths./pets.get.summary");
        assert_eq!(summary.new_value, "List all pets");

        assert_eq!(find("deprecated").operation, DiffOp::Add);
        let tags = find("tags");
        assert_eq!(tags.operation, DiffOp::ItemAdded);
        assert_eq!(tags.new_value, "listing");

        let description = find("description");
        assert_eq!(description.location, ".paths./pets.get.responses.200.description");
        assert_eq!(description.operation, DiffOp::Update);

        let responses = find("responses");
        assert_eq!(responses.operation, DiffOp::ItemRemoved);
        assert_eq!(responses.old_value, "404");

        // never a single opaque update for the whole operation
        assert!(changes.iter().all(|c| c.location != ".paths./pets.get"));
    }

    #[test]
    fn test_parameter_and_security_diff() {
        let from = raw(minimal(json!({
            "/pets": {
                "get": {
                    "parameters": [
                        {"name": "limit", "in": "query", "type": "integer", "maximum": 50}
                    ],
                    "security": [{"api_key": []}],
                    "responses": {"200": {"description": "ok"}}
                }
            }
        })));
        let to = raw(minimal(json!({
            "/pets": {
                "get": {
                    "parameters": [
                        {"name": "limit", "in": "query", "type": "integer", "maximum": 100},
                        {"name": "offset", "in": "query", "type": "integer"}
                    ],
                    "security": [{"petstore_auth": ["read:pets"]}],
                    "responses": {"200": {"description": "ok"}}
                }
            }
        })));
        let report = analyze(&from, &to).unwrap();
        let key = OperationKey {
            path: String::from("/pets"),
            method: String::from("GET"),
        };
        let changes = report.changes_by_operation.get(&key).unwrap();

        let maximum = changes
            .iter()
            .find(|c| c.name == "maximum")
            .expect("maximum change");
        assert_eq!(maximum.operation, DiffOp::Update);
        assert_eq!(maximum.location, ".paths./pets.get.parameters[0].maximum");
        assert_eq!(maximum.old_value, "50");
        assert_eq!(maximum.new_value, "100");

        let added_param = changes
            .iter()
            .find(|c| c.name == "parameters" && c.operation == DiffOp::ItemAdded)
            .expect("added parameter");
        assert!(added_param.new_value.contains("offset"));

        let security: Vec<_> = changes.iter().filter(|c| c.name == "security").collect();
        assert_eq!(security.len(), 2);
        assert!(security.iter().any(|c| c.operation == DiffOp::ItemAdded
            && c.new_value.contains("petstore_auth")));
        assert!(security.iter().any(|c| c.operation == DiffOp::ItemRemoved
            && c.old_value.contains("api_key")));
    }

    #[test]
    fn test_definition_schema_diff_recurses_into_properties() {
        let from = raw(json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "paths": {},
            "definitions": {
                "Pet": {
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": {"type": "integer"},
                        "nickname": {"type": "string"}
                    }
                },
                "Gone": {"type": "object"}
            }
        }));
        let to = raw(json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "paths": {},
            "definitions": {
                "Pet": {
                    "type": "object",
                    "required": ["id", "name"],
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "name": {"type": "string"}
                    }
                }
            }
        }));
        let report = analyze(&from, &to).unwrap();
        let definitions = report.changes.get(&Class::Definition).unwrap();

        let table = &definitions[".definitions"];
        assert!(table.iter().any(|c| c.operation == DiffOp::ItemRemoved && c.old_value == "Gone"));

        let required = &definitions[".definitions.Pet.required"][0];
        assert_eq!(required.operation, DiffOp::ItemAdded);
        assert_eq!(required.new_value, "name");

        let format = &definitions[".definitions.Pet.properties.id.format"][0];
        assert_eq!(format.operation, DiffOp::Add);
        assert_eq!(format.new_value, "int64");

        let properties = &definitions[".definitions.Pet.properties"];
        assert!(
            properties
                .iter()
                .any(|c| c.operation == DiffOp::ItemAdded && c.new_value == "name")
        );
        assert!(
            properties
                .iter()
                .any(|c| c.operation == DiffOp::ItemRemoved && c.old_value == "nickname")
        );
    }

    #[test]
    fn test_extension_diff_by_serialized_equality() {
        let from = raw(json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "paths": {},
            "x-stable": {"since": "1.0"},
            "x-dropped": true
        }));
        let to = raw(json!({
            "swagger": "2.0",
            "info": {"title": "x", "version": "1"},
            "paths": {},
            "x-stable": {"since": "2.0"},
            "x-introduced": [1, 2]
        }));
        let report = analyze(&from, &to).unwrap();
        let root = report.changes.get(&Class::Root).unwrap();

        assert_eq!(root[".x-stable"][0].operation, DiffOp::Update);
        assert_eq!(root[".x-dropped"][0].operation, DiffOp::ItemRemoved);
        let introduced = &root[".x-introduced"][0];
        assert_eq!(introduced.operation, DiffOp::ItemAdded);
        assert_eq!(introduced.new_value, "[1,2]");
    }

    #[test]
    fn test_path_item_extension_change_classified_under_paths() {
        let from = raw(minimal(json!({
            "/pets": {
                "get": {"responses": {"200": {"description": "ok"}}},
                "x-owner": "team-a"
            }
        })));
        let to = raw(minimal(json!({
            "/pets": {
                "get": {"responses": {"200": {"description": "ok"}}},
                "x-owner": "team-b"
            }
        })));
        let report = analyze(&from, &to).unwrap();
        let paths = report.changes.get(&Class::Paths).unwrap();
        let owner = &paths[".paths./pets.x-owner"][0];
        assert_eq!(owner.operation, DiffOp::Update);
        assert_eq!(owner.old_value, "\"team-a\"");
        assert_eq!(owner.new_value, "\"team-b\"");
    }
}
