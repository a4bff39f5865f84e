use std::sync::Arc;

use bitflags::bitflags;

use crate::program::{Method, MethodRc, MethodRef, Type};

/// A reference counted [`Class`]
pub type ClassRc = Arc<Class>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Class modifier flags, using the bytecode access flag bit positions
    pub struct ClassFlags: u32 {
        /// Class is final and cannot be subclassed
        const FINAL = 0x0010;
        /// Definition is an interface
        const INTERFACE = 0x0200;
        /// Class is abstract
        const ABSTRACT = 0x0400;
    }
}

/// A class or interface definition present in the program.
///
/// For an interface, `interfaces` lists the interfaces it extends.
#[derive(Debug, Clone)]
pub struct Class {
    /// The type this definition declares
    pub ty: Type,
    /// The direct superclass, absent only at the root of the hierarchy
    pub parent: Option<Type>,
    /// Directly declared interfaces, in declaration order
    pub interfaces: Vec<Type>,
    /// Virtual methods, in declaration order
    pub virtual_methods: Vec<MethodRc>,
    /// Modifier flags
    pub flags: ClassFlags,
}

impl Class {
    /// Creates a new class with no interfaces and no methods.
    #[must_use]
    pub fn new(ty: Type, parent: Option<Type>) -> Self {
        Class {
            ty,
            parent,
            interfaces: Vec::new(),
            virtual_methods: Vec::new(),
            flags: ClassFlags::empty(),
        }
    }

    /// Adds a directly implemented (or, for interfaces, extended) interface.
    #[must_use]
    pub fn implements(mut self, interface: Type) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Adds a virtual method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.virtual_methods.push(Arc::new(method));
        self
    }

    /// Returns the same class with the given modifier flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns `true` if the definition is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(ClassFlags::INTERFACE)
    }

    /// Returns `true` if the class cannot be subclassed.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.flags.contains(ClassFlags::FINAL)
    }

    /// Finds the first virtual method matching a call-site signature.
    #[must_use]
    pub fn find_virtual(&self, method_ref: &MethodRef) -> Option<&MethodRc> {
        self.virtual_methods.iter().find(|m| m.matches(method_ref))
    }
}
