use serde::Serialize;
use std::fmt::{Display, Formatter};

/// A dotted/bracketed path identifying where in the source document an entity
/// or error originated, e.g. `.paths./pets.get.parameters[0]`.
///
/// Locations are immutable values. Descending into a nested field or array
/// element produces a new `Location`, so a parse function never has to restore
/// any shared cursor state on exit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location(String);

impl Location {
    /// The document root, rendered as `.`
    pub fn root() -> Self {
        Location(String::from("."))
    }

    /// Returns the location of the named field under this one.
    pub fn field(&self, name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if self.0 == "." {
            Location(format!(".{}", name))
        } else {
            Location(format!("{}.{}", self.0, name))
        }
    }

    /// Returns the location of the array element at `index` under this one.
    pub fn index(&self, index: usize) -> Self {
        Location(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::root()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
