//! Methods and call-site method references.
//!
//! A [`Method`] is a concrete definition owned by exactly one class. A [`MethodRef`] is the
//! signature a call site names: it is only ever matched against methods, never dereferenced.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use bitflags::bitflags;

use crate::program::Type;

/// A reference counted [`Method`]
pub type MethodRc = Arc<Method>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Method modifier flags, using the bytecode access flag bit positions
    pub struct MethodFlags: u32 {
        /// Method is final and cannot be overridden
        const FINAL = 0x0010;
        /// Method has no body and must be implemented by a subclass
        const ABSTRACT = 0x0400;
        /// Method was generated by the compiler
        const SYNTHETIC = 0x1000;
    }
}

/// A virtual method defined by a class.
///
/// Identity is the tuple (declaring class, name, return type, parameter types). The
/// [`MethodFlags`] are descriptive only and never take part in equality or hashing, so two
/// `Method` values compare equal exactly when they denote the same definition.
///
/// The parameter list of a virtual method starts with the implicit receiver. Use
/// [`Method::explicit_params`] to obtain the parameters a call site actually passes.
#[derive(Clone)]
pub struct Method {
    /// The class declaring this method
    pub class: Type,
    /// Simple name of the method
    pub name: String,
    /// Declared return type
    pub return_type: Type,
    /// Parameter types, receiver first
    pub params: Vec<Type>,
    /// Modifier flags
    pub flags: MethodFlags,
}

impl Method {
    /// Creates a new virtual method with its receiver parameter prepended.
    ///
    /// # Arguments
    ///
    /// * `class` - The declaring class, which also becomes the receiver type
    /// * `name` - The method name
    /// * `return_type` - The declared return type
    /// * `params` - The explicit parameters, without the receiver
    #[must_use]
    pub fn new(class: Type, name: &str, return_type: Type, params: Vec<Type>) -> Self {
        let mut full = Vec::with_capacity(params.len() + 1);
        full.push(class.clone());
        full.extend(params);

        Method {
            class,
            name: name.to_string(),
            return_type,
            params: full,
            flags: MethodFlags::empty(),
        }
    }

    /// Returns the same method with the given modifier flags.
    #[must_use]
    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the parameters following the implicit receiver.
    ///
    /// # Panics
    ///
    /// Panics if the parameter list is empty. A virtual method without a receiver is a
    /// breach of the program model contract, and silently treating its first explicit
    /// parameter as the receiver would misresolve every call matched against it.
    #[must_use]
    pub fn explicit_params(&self) -> &[Type] {
        assert!(
            !self.params.is_empty(),
            "virtual method {}->{} has no receiver parameter",
            self.class,
            self.name
        );
        &self.params[1..]
    }

    /// Returns `true` if this method matches the call-site signature.
    ///
    /// Name, return type and every explicit parameter type must be equal.
    #[must_use]
    pub fn matches(&self, method_ref: &MethodRef) -> bool {
        self.name == method_ref.name
            && self.return_type == method_ref.return_type
            && self.explicit_params() == method_ref.params.as_slice()
    }

    /// Returns `true` if the method is abstract.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(MethodFlags::ABSTRACT)
    }

    /// Returns `true` if the method is final.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.flags.contains(MethodFlags::FINAL)
    }

    /// Returns the call-site signature this method answers to.
    #[must_use]
    pub fn to_ref(&self) -> MethodRef {
        MethodRef {
            name: self.name.clone(),
            return_type: self.return_type.clone(),
            params: self.explicit_params().to_vec(),
        }
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.name == other.name
            && self.return_type == other.return_type
            && self.params == other.params
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        self.name.hash(state);
        self.return_type.hash(state);
        self.params.hash(state);
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}(", self.class, self.name)?;
        for param in self.params.iter().skip(1) {
            write!(f, "{param}")?;
        }
        write!(f, "){}", self.return_type)
    }
}

/// The method signature named by a call site, excluding the receiver.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Simple name of the method
    pub name: String,
    /// Expected return type
    pub return_type: Type,
    /// Explicit parameter types
    pub params: Vec<Type>,
}

impl MethodRef {
    /// Creates a new method reference.
    #[must_use]
    pub fn new(name: &str, return_type: Type, params: Vec<Type>) -> Self {
        MethodRef {
            name: name.to_string(),
            return_type,
            params,
        }
    }
}

impl fmt::Debug for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for param in &self.params {
            write!(f, "{param}")?;
        }
        write!(f, "){}", self.return_type)
    }
}
