//! Name/signature resolution up the superclass chain.
//!
//! Resolution follows single-inheritance method lookup: starting at the receiver type, each
//! defined class on the path to the root is scanned for a virtual method matching the call
//! site's signature, and the nearest match wins. Types without a definition are passed
//! through. Interface default methods are not considered.

use crate::{
    analysis::cha::HierarchyIndex,
    program::{MethodRc, MethodRef, Type},
};

impl HierarchyIndex {
    /// Resolves a call-site signature against a receiver type.
    ///
    /// Walks from `ty` up through its superclasses and returns the first virtual method
    /// whose name, return type and explicit parameter types match `method_ref`.
    ///
    /// Every (MethodRef, Type) pair visited during the walk is memoized, negative results
    /// included, so a later query for any type on the same chain stops at the first
    /// memoized entry it meets.
    ///
    /// # Arguments
    ///
    /// * `ty` - The type to start the lookup from
    /// * `method_ref` - The signature named by the call site
    ///
    /// # Returns
    ///
    /// The nearest matching method, or `None` if no ancestor (or `ty` itself) defines one.
    ///
    /// # Panics
    ///
    /// Panics if a scanned virtual method has no receiver parameter.
    #[must_use]
    pub fn resolve_method_ref(&self, ty: &Type, method_ref: &MethodRef) -> Option<MethodRc> {
        if !self.config.enable_resolution_cache {
            return self.walk(ty, method_ref, &mut Vec::new());
        }

        let mut visited = Vec::new();
        let result = self.walk(ty, method_ref, &mut visited);
        for visited_ty in visited {
            self.cache.insert(method_ref.clone(), visited_ty, result.clone());
        }
        result
    }

    /// Walks the chain from `ty`, pushing every type whose resolution equals the result.
    ///
    /// Stops early on a cache hit; the hit type is not pushed since it is already memoized.
    fn walk(
        &self,
        ty: &Type,
        method_ref: &MethodRef,
        visited: &mut Vec<Type>,
    ) -> Option<MethodRc> {
        let cached = self.config.enable_resolution_cache;
        let mut current = Some(ty);

        while let Some(ty) = current {
            if cached {
                if let Some(result) = self.cache.get(method_ref, ty) {
                    return result;
                }
                visited.push(ty.clone());
            }

            if let Some(method) = self
                .definition(ty)
                .and_then(|class| class.find_virtual(method_ref))
            {
                return Some(method.clone());
            }

            current = self.superclass(ty);
        }

        None
    }

    /// Resolves starting from the direct superclass of `ty`.
    ///
    /// This is the lookup an `invoke-super` performs from a method declared in `ty`.
    ///
    /// # Returns
    ///
    /// `None` if `ty` has no superclass or nothing above it matches.
    #[must_use]
    pub fn resolve_super(&self, ty: &Type, method_ref: &MethodRef) -> Option<MethodRc> {
        self.superclass(ty)
            .and_then(|parent| self.resolve_method_ref(parent, method_ref))
    }
}
