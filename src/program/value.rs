//! Receiver values and invocation kinds.
//!
//! The hierarchy index does not interpret values beyond asking where a receiver comes from:
//! a formal parameter or a caught exception has a dynamic type that cannot be known
//! statically, anything else is treated as exact.

use strum::{Display, EnumIter};

use crate::program::{MethodRc, Type};

/// The SSA value a call is invoked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A formal parameter of the enclosing method.
    Parameter {
        /// Zero based parameter index, receiver included
        index: u16,
        /// Declared parameter type
        ty: Type,
    },
    /// The exception object bound by a catch handler.
    MoveException {
        /// The caught type
        ty: Type,
    },
    /// A checked cast of another value.
    CheckCast {
        /// The value being cast
        source: Box<Value>,
        /// The target type of the cast
        ty: Type,
    },
    /// A freshly allocated instance of a known class.
    NewInstance {
        /// The allocated class
        ty: Type,
    },
    /// Any other value with a statically declared type.
    Other {
        /// Declared type
        ty: Type,
    },
}

impl Value {
    /// Wraps this value in a checked cast to `ty`.
    #[must_use]
    pub fn cast(self, ty: Type) -> Self {
        Value::CheckCast {
            source: Box::new(self),
            ty,
        }
    }

    /// Returns the underlying value with every enclosing cast removed.
    #[must_use]
    pub fn strip_casts(&self) -> &Value {
        let mut current = self;
        while let Value::CheckCast { source, .. } = current {
            current = source;
        }
        current
    }

    /// Returns the statically declared type of the value.
    #[must_use]
    pub fn ty(&self) -> &Type {
        match self {
            Value::Parameter { ty, .. }
            | Value::MoveException { ty }
            | Value::CheckCast { ty, .. }
            | Value::NewInstance { ty }
            | Value::Other { ty } => ty,
        }
    }

    /// Returns `true` if the runtime type of the value cannot be known statically.
    ///
    /// Parameters and caught exceptions qualify, looking through any casts.
    #[must_use]
    pub fn has_unknown_dynamic_type(&self) -> bool {
        matches!(
            self.strip_casts(),
            Value::Parameter { .. } | Value::MoveException { .. }
        )
    }
}

/// Kind of invoke instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum InvokeKind {
    /// `invoke-virtual`
    Virtual,
    /// `invoke-super`, always targets the declaring class's superclass
    Super,
    /// `invoke-direct`
    Direct,
    /// `invoke-static`
    Static,
    /// `invoke-interface`
    Interface,
}

impl InvokeKind {
    /// Returns `true` for `invoke-super`.
    #[must_use]
    pub const fn is_super(&self) -> bool {
        matches!(self, Self::Super)
    }
}

/// An invoke instruction, located inside its enclosing method.
#[derive(Debug, Clone)]
pub struct Instruction {
    /// The method whose body contains the instruction
    pub method: MethodRc,
    /// Code unit offset within the method body
    pub offset: u32,
}

impl Instruction {
    /// Creates a new instruction reference.
    #[must_use]
    pub fn new(method: MethodRc, offset: u32) -> Self {
        Instruction { method, offset }
    }

    /// Returns the class declaring the enclosing method.
    #[must_use]
    pub fn declaring_class(&self) -> &Type {
        &self.method.class
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.method == other.method
    }
}

impl Eq for Instruction {}
