//! Deduplicated dispatch target sets.

use std::collections::HashSet;

use crate::program::MethodRc;

/// The set of methods a call site may invoke.
///
/// Targets keep the order in which they were first inserted and are deduplicated by
/// method identity (declaring class, name, return type, parameter types), so an
/// inherited method reached through several sibling subclasses appears once.
#[derive(Debug, Clone, Default)]
pub struct DispatchTargets {
    ordered: Vec<MethodRc>,
    seen: HashSet<MethodRc>,
}

impl DispatchTargets {
    /// Creates an empty target set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding at most one target.
    #[must_use]
    pub fn from_option(target: Option<MethodRc>) -> Self {
        let mut targets = Self::new();
        if let Some(method) = target {
            targets.insert(method);
        }
        targets
    }

    /// Adds a target.
    ///
    /// # Returns
    ///
    /// `true` if the method was not present yet.
    pub fn insert(&mut self, method: MethodRc) -> bool {
        if self.seen.insert(method.clone()) {
            self.ordered.push(method);
            true
        } else {
            false
        }
    }

    /// Returns the number of distinct targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns `true` if no target could be resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns `true` if the method is one of the targets.
    #[must_use]
    pub fn contains(&self, method: &MethodRc) -> bool {
        self.seen.contains(method)
    }

    /// Iterates over the targets in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MethodRc> {
        self.ordered.iter()
    }

    /// Returns the only target, if there is exactly one.
    ///
    /// A call site with a single target can be devirtualized into a direct call.
    #[must_use]
    pub fn single(&self) -> Option<&MethodRc> {
        match self.ordered.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Consumes the set, returning the targets in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<MethodRc> {
        self.ordered
    }
}

impl PartialEq for DispatchTargets {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl Eq for DispatchTargets {}

impl<'a> IntoIterator for &'a DispatchTargets {
    type Item = &'a MethodRc;
    type IntoIter = std::slice::Iter<'a, MethodRc>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}

impl IntoIterator for DispatchTargets {
    type Item = MethodRc;
    type IntoIter = std::vec::IntoIter<MethodRc>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.into_iter()
    }
}

impl FromIterator<MethodRc> for DispatchTargets {
    fn from_iter<I: IntoIterator<Item = MethodRc>>(iter: I) -> Self {
        let mut targets = Self::new();
        for method in iter {
            targets.insert(method);
        }
        targets
    }
}

impl Extend<MethodRc> for DispatchTargets {
    fn extend<I: IntoIterator<Item = MethodRc>>(&mut self, iter: I) {
        for method in iter {
            self.insert(method);
        }
    }
}
