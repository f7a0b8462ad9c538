use crate::location::Location;
use crate::refs::Reference;
use crate::types::extensions::Extensions;
use crate::types::operation::Operation;
use crate::types::parameter::Parameter;
use std::collections::BTreeMap;

/// One path template and the operations it serves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    pub reference: Option<Reference>,
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub parameters: Vec<Parameter>,
    pub extensions: Extensions,
    pub(crate) doc_loc: Location,
}

impl PathItem {
    pub fn new() -> Self {
        PathItem::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }

    /// The operation stored in the slot for `method`, if any.
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method {
            "GET" => self.get.as_ref(),
            "PUT" => self.put.as_ref(),
            "POST" => self.post.as_ref(),
            "DELETE" => self.delete.as_ref(),
            "OPTIONS" => self.options.as_ref(),
            "HEAD" => self.head.as_ref(),
            "PATCH" => self.patch.as_ref(),
            _ => None,
        }
    }

    /// Every populated operation, visited in slot order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        [
            &self.get,
            &self.put,
            &self.post,
            &self.delete,
            &self.options,
            &self.head,
            &self.patch,
        ]
        .into_iter()
        .filter_map(Option::as_ref)
    }
}

/// The path table: path templates (each starting with `/`) mapped to their
/// path items, ordered by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paths {
    pub items: BTreeMap<String, PathItem>,
    pub extensions: Extensions,
    pub(crate) doc_loc: Location,
}

impl Paths {
    pub fn new() -> Self {
        Paths::default()
    }

    /// The document path at which this object was parsed.
    pub fn document_location(&self) -> &Location {
        &self.doc_loc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_operation_slot_lookup() {
        let mut item = PathItem::new();
        item.get = Some(Operation::new("/pets", &Method::GET));
        item.post = Some(Operation::new("/pets", &Method::POST));

        assert!(item.operation("GET").is_some());
        assert!(item.operation("POST").is_some());
        assert!(item.operation("PUT").is_none());
        assert!(item.operation("TRACE").is_none());
    }

    #[test]
    fn test_operations_visit_slot_order() {
        let mut item = PathItem::new();
        item.patch = Some(Operation::new("/pets", &Method::PATCH));
        item.get = Some(Operation::new("/pets", &Method::GET));

        let methods: Vec<&str> = item
            .operations()
            .map(|op| op.key.method.as_str())
            .collect();
        assert_eq!(methods, vec!["GET", "PATCH"]);
    }
}
