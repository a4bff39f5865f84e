use std::collections::{HashMap, HashSet};

use crate::{
    program::{Class, ClassRc, Type},
    Error, Result,
};

/// The whole set of classes making up the analysed program.
///
/// Class order is declaration order. It only influences the enumeration order of query
/// results, never their content.
#[derive(Debug, Clone, Default)]
pub struct Program {
    classes: Vec<ClassRc>,
}

impl Program {
    /// Creates a program from its classes, in declaration order.
    #[must_use]
    pub fn new(classes: Vec<Class>) -> Self {
        Program {
            classes: classes.into_iter().map(ClassRc::new).collect(),
        }
    }

    /// Creates a program from already shared class definitions.
    #[must_use]
    pub fn from_shared(classes: Vec<ClassRc>) -> Self {
        Program { classes }
    }

    /// Returns all classes in declaration order.
    #[must_use]
    pub fn classes(&self) -> &[ClassRc] {
        &self.classes
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if the program defines no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Looks up the class defining `ty`.
    ///
    /// Linear in the number of classes. Build a
    /// [`crate::analysis::cha::HierarchyIndex`] for repeated lookups.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeNotFound`] if no class defines `ty`.
    pub fn class(&self, ty: &Type) -> Result<&ClassRc> {
        self.classes
            .iter()
            .find(|class| &class.ty == ty)
            .ok_or_else(|| Error::TypeNotFound(ty.clone()))
    }

    /// Checks the structural contract the hierarchy index relies on.
    ///
    /// The index itself never calls this: it trusts its input and asserts on the
    /// receiver invariant. Loaders that build a [`Program`] from untrusted input can use
    /// it to turn contract breaches into errors up front.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateType`] if two classes declare the same type
    /// - [`Error::MissingReceiver`] if a virtual method has an empty parameter list
    /// - [`Error::Malformed`] if a method's declaring class differs from its owner
    /// - [`Error::CyclicHierarchy`] if parent links form a cycle
    pub fn validate(&self) -> Result<()> {
        let mut parents: HashMap<&Type, Option<&Type>> = HashMap::with_capacity(self.len());

        for class in &self.classes {
            if parents.insert(&class.ty, class.parent.as_ref()).is_some() {
                return Err(Error::DuplicateType(class.ty.clone()));
            }

            for method in &class.virtual_methods {
                if method.params.is_empty() {
                    return Err(Error::MissingReceiver {
                        class: class.ty.clone(),
                        method: method.name.clone(),
                    });
                }
                if method.class != class.ty {
                    return Err(malformed_error!(
                        "Method {} is listed in {} but declared by {}",
                        method.name,
                        class.ty,
                        method.class
                    ));
                }
            }
        }

        let mut acyclic: HashSet<&Type> = HashSet::with_capacity(parents.len());
        for class in &self.classes {
            let mut path = HashSet::new();
            let mut current = Some(&class.ty);

            while let Some(ty) = current {
                if acyclic.contains(ty) {
                    break;
                }
                if !path.insert(ty) {
                    return Err(Error::CyclicHierarchy(ty.clone()));
                }
                current = parents.get(ty).copied().flatten();
            }

            acyclic.extend(path);
        }

        Ok(())
    }
}

impl FromIterator<Class> for Program {
    fn from_iter<I: IntoIterator<Item = Class>>(iter: I) -> Self {
        Program::new(iter.into_iter().collect())
    }
}
