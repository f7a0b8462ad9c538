//! Parsing, validation and structural comparison of Swagger 2.0 specifications.
//!
//! [`parser::Parser`] turns raw JSON bytes into a typed [`types::Swagger`]
//! document while collecting every validation failure with its exact document
//! location. [`diff::analyze`] compares two raw documents and produces a
//! classified [`diff::Report`] of changes.

pub mod diff;
pub mod error;
pub mod location;
pub mod parser;
pub mod refs;
pub mod types;

pub use error::{DiffError, ParseErrors, ParseFailure, ParseIssue};
pub use location::Location;
pub use parser::{ParseOutcome, Parser};
pub use refs::{Reference, UniqueDefinitionRefs};

/// The only format version accepted at the document root.
pub const SWAGGER_VERSION: &'static str = "2.0";

/// Marker prefix for opaque vendor extension fields.
pub const EXTENSION_PREFIX: &'static str = "x-";

/// Fragment prefix of reference URIs that resolve into the definitions table.
pub const DEFINITIONS_FRAGMENT: &'static str = "#/definitions/";
