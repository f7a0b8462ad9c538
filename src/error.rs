use crate::location::Location;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A single validation failure raised while parsing one document field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIssue {
    /// A field value could not be coerced to its expected shape.
    #[error("invalid '{field}' value: {cause}")]
    InvalidValue { field: String, cause: String },

    /// A semantically required string field held the empty string.
    #[error("empty '{field}' value")]
    EmptyValue { field: String },

    /// A key outside the closed field vocabulary that is not an extension.
    #[error("invalid field name: '{name}'")]
    UnrecognizedField { name: String },

    /// The root format-version tag did not hold the required literal.
    #[error("swagger value should be '2.0' but got: '{found}'")]
    VersionMismatch { found: String },

    /// A non-empty operationId was already registered elsewhere.
    #[error("duplicated operationID[{id}]: also in: {owner}")]
    DuplicateOperationId { id: String, owner: String },
}

impl ParseIssue {
    pub(crate) fn invalid_value(field: impl Into<String>, cause: impl Into<String>) -> Self {
        ParseIssue::InvalidValue {
            field: field.into(),
            cause: cause.into(),
        }
    }

    pub(crate) fn empty_value(field: impl Into<String>) -> Self {
        ParseIssue::EmptyValue { field: field.into() }
    }

    pub(crate) fn unrecognized_field(name: impl Into<String>) -> Self {
        ParseIssue::UnrecognizedField { name: name.into() }
    }

    pub(crate) fn version_mismatch(found: impl Into<String>) -> Self {
        ParseIssue::VersionMismatch { found: found.into() }
    }

    pub(crate) fn duplicate_operation_id(id: impl Into<String>, owner: &Location) -> Self {
        ParseIssue::DuplicateOperationId {
            id: id.into(),
            owner: owner.as_str().to_owned(),
        }
    }
}

/// The aggregate of every validation failure raised during one parse,
/// keyed by document location.
///
/// The textual form is deterministic: locations sort lexicographically and
/// issues within one location keep discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseErrors {
    by_location: BTreeMap<String, Vec<ParseIssue>>,
}

impl ParseErrors {
    pub fn new() -> Self {
        ParseErrors::default()
    }

    pub(crate) fn append(&mut self, loc: &Location, issue: ParseIssue) {
        self.by_location
            .entry(loc.as_str().to_owned())
            .or_default()
            .push(issue);
    }

    /// Number of distinct locations that raised at least one issue.
    pub fn location_count(&self) -> usize {
        self.by_location.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_location.is_empty()
    }

    /// Issues raised at the exact location string, in discovery order.
    pub fn at(&self, location: &str) -> &[ParseIssue] {
        self.by_location
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates locations in lexicographic order with their ordered issues.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParseIssue])> {
        self.by_location
            .iter()
            .map(|(loc, issues)| (loc.as_str(), issues.as_slice()))
    }

    pub(crate) fn into_option(self) -> Option<ParseErrors> {
        if self.is_empty() { None } else { Some(self) }
    }
}

impl Display for ParseErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.by_location.is_empty() {
            return Ok(());
        }
        write!(
            f,
            "invalid swagger: found validation errors from {} locations: {{",
            self.by_location.len()
        )?;
        for (i, (loc, issues)) in self.by_location.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": [", loc)?;
            for (j, issue) in issues.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "\"{}\"", issue)?;
            }
            write!(f, "]")?;
        }
        write!(f, "}}")
    }
}

impl std::error::Error for ParseErrors {}

/// Why a parse produced no usable result, or completed with validation errors.
#[derive(Debug, Error)]
pub enum ParseFailure {
    /// The input slice was empty; nothing was decoded.
    #[error("cannot parse empty raw swagger JSON bytes")]
    EmptyInput,

    /// The input was not syntactically valid JSON.
    #[error("failed to parse raw swagger bytes as JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The root JSON value was not an object.
    #[error("invalid swagger value: root is not an object")]
    RootNotObject,

    /// Parsing completed but raised validation errors; a best-effort
    /// document is still available alongside this failure.
    #[error(transparent)]
    Validation(ParseErrors),
}

impl ParseFailure {
    /// Returns the aggregated validation errors, if that is what this is.
    pub fn validation(&self) -> Option<&ParseErrors> {
        match self {
            ParseFailure::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Errors raised by [`crate::diff::analyze`] before any comparison happens.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("diff: from-spec JSON must not be nil or empty")]
    EmptyFrom,

    #[error("diff: to-spec JSON must not be nil or empty")]
    EmptyTo,

    #[error("diff: failed to parse from-spec: {0}")]
    FromParse(#[source] ParseFailure),

    #[error("diff: failed to parse to-spec: {0}")]
    ToParse(#[source] ParseFailure),

    /// Both sides are checked before failing so callers see every input
    /// problem at once.
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
    Multiple(Vec<DiffError>),
}

impl DiffError {
    /// Collapses accumulated input errors into one error value.
    pub(crate) fn combine(mut errors: Vec<DiffError>) -> DiffError {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            DiffError::Multiple(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_display_sorts_locations() {
        let mut errors = ParseErrors::new();
        errors.append(
            &Location::root().field("host"),
            ParseIssue::invalid_value("host", "expected string but found number"),
        );
        errors.append(
            &Location::root().field("basePath"),
            ParseIssue::invalid_value("basePath", "expected string but found array"),
        );
        errors.append(
            &Location::root().field("host"),
            ParseIssue::unrecognized_field("hostname"),
        );

        assert_eq!(
            errors.to_string(),
            "invalid swagger: found validation errors from 2 locations: {\
             \".basePath\": [\"invalid 'basePath' value: expected string but found array\"], \
             \".host\": [\"invalid 'host' value: expected string but found number\", \
             \"invalid field name: 'hostname'\"]}"
        );
    }

    #[test]
    fn test_parse_errors_keep_discovery_order_within_location() {
        let mut errors = ParseErrors::new();
        let loc = Location::root().field("info");
        errors.append(&loc, ParseIssue::unrecognized_field("b"));
        errors.append(&loc, ParseIssue::unrecognized_field("a"));

        let at = errors.at(".info");
        assert_eq!(at.len(), 2);
        assert_eq!(at[0], ParseIssue::unrecognized_field("b"));
        assert_eq!(at[1], ParseIssue::unrecognized_field("a"));
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(
            ParseIssue::version_mismatch("1.0").to_string(),
            "swagger value should be '2.0' but got: '1.0'"
        );
        assert_eq!(
            ParseIssue::empty_value("name").to_string(),
            "empty 'name' value"
        );
        let owner = Location::root()
            .field("paths")
            .field("/pets")
            .field("get")
            .field("operationId");
        assert_eq!(
            ParseIssue::duplicate_operation_id("listPets", &owner).to_string(),
            "duplicated operationID[listPets]: also in: .paths./pets.get.operationId"
        );
    }

    #[test]
    fn test_diff_error_combine() {
        let single = DiffError::combine(vec![DiffError::EmptyFrom]);
        assert!(matches!(single, DiffError::EmptyFrom));

        let both = DiffError::combine(vec![DiffError::EmptyFrom, DiffError::EmptyTo]);
        assert_eq!(
            both.to_string(),
            "diff: from-spec JSON must not be nil or empty\n\
             diff: to-spec JSON must not be nil or empty"
        );
    }
}
