use crate::location::Location;
use crate::types::extensions::Extensions;
use std::collections::BTreeMap;

/// One security requirement set: scheme name to the scopes it requires.
pub type SecurityRequirements = BTreeMap<String, Vec<String>>;

/// Renders a requirement in canonical form (scheme names sorted, scope lists
/// in document order) so requirement sets can be compared by value.
pub(crate) fn security_requirements_to_value(requirements: &SecurityRequirements) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    for (scheme, scopes) in requirements {
        obj.insert(
            scheme.clone(),
            serde_json::Value::Array(
                scopes
                    .iter()
                    .map(|scope| serde_json::Value::String(scope.clone()))
                    .collect(),
            ),
        );
    }
    serde_json::Value::Object(obj)
}

/// A named security scheme from the `securityDefinitions` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityScheme {
    pub type_name: String,
    pub description: String,
    pub name: String,
    pub location_in: String,
    pub flow: String,
    pub authorization_url: String,
    pub token_url: String,
    pub scopes: Scopes,
    pub extensions: Extensions,
    pub(crate) doc_loc: Location,
}

impl SecurityScheme {
    pub fn new() -> Self {
        SecurityScheme::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }
}

/// The scope names and descriptions of an OAuth2 security scheme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scopes {
    pub values: BTreeMap<String, String>,
    pub extensions: Extensions,
    pub(crate) doc_loc: Location,
}

impl Scopes {
    pub fn new() -> Self {
        Scopes::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }
}
