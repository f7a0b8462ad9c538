use crate::types::ExternalDocumentation;
use crate::types::extensions::Extensions;

/// A descriptive tag, attached to operations by name rather than by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub name: String,
    pub description: String,
    pub external_docs: Option<ExternalDocumentation>,
    pub extensions: Extensions,
}

impl Tag {
    pub fn new() -> Self {
        Tag::default()
    }
}
