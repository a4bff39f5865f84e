use std::{fmt, sync::Arc};

/// Opaque identifier of a class or interface.
///
/// A `Type` wraps the type descriptor as it appears in the bytecode (for example
/// `Ljava/lang/Object;`). It is cheap to clone, and equality, ordering and hashing
/// are defined over the descriptor alone, so two `Type` values built from the same
/// descriptor always denote the same class or interface.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Type(Arc<str>);

impl Type {
    /// Creates a new type from its descriptor.
    #[must_use]
    pub fn new(descriptor: &str) -> Self {
        Type(Arc::from(descriptor))
    }

    /// Returns the descriptor this type was created from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Type {
    fn from(descriptor: &str) -> Self {
        Type::new(descriptor)
    }
}

impl From<String> for Type {
    fn from(descriptor: String) -> Self {
        Type(Arc::from(descriptor))
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.0)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
