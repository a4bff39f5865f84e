//! Whole-hierarchy implementor search.
//!
//! Answers "which concrete methods could run if this signature were invoked on something
//! declared as `name`", where `name` may denote an interface or a class. The search scans
//! every class in the program to seed its roots, so it is meant for occasional queries
//! rather than per-call-site dispatch.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::{
    analysis::cha::HierarchyIndex,
    program::{ClassRc, MethodRc, MethodRef, Type},
};

impl HierarchyIndex {
    /// Finds every method matching `method_ref` on implementors of `name` and their subclasses.
    ///
    /// Roots are every class directly declaring `name` among its interfaces, plus the class
    /// named `name` itself when the program defines it as a class rather than an interface.
    /// When interface extension is modelled (see [`crate::analysis::cha::ChaConfig`]),
    /// implementors reached through interfaces extending `name` are roots as well, while
    /// the extending interfaces themselves are not, so their abstract declarations never
    /// appear in the result. From each root the whole subclass tree is walked, collecting
    /// every matching virtual method declared along the way.
    ///
    /// # Arguments
    ///
    /// * `name` - Descriptor of an interface or class, e.g. `Ljava/lang/Runnable;`
    /// * `method_ref` - The signature to look for
    ///
    /// # Returns
    ///
    /// Matching methods, each once, in discovery order. Empty if nothing declares `name`.
    #[must_use]
    pub fn implementations_of(&self, name: &str, method_ref: &MethodRef) -> Vec<MethodRc> {
        let roots = self.implementor_roots(name);

        let mut visited: HashSet<&Type> = HashSet::new();
        let mut stack: Vec<&Type> = Vec::new();
        let mut result = Vec::new();

        for root in &roots {
            stack.push(root);

            while let Some(ty) = stack.pop() {
                if !visited.insert(ty) {
                    continue;
                }

                if let Some(class) = self.definition(ty) {
                    result.extend(
                        class
                            .virtual_methods
                            .iter()
                            .filter(|method| method.matches(method_ref))
                            .cloned(),
                    );
                }

                stack.extend(self.subclasses(ty).iter().rev());
            }
        }

        tracing::debug!(
            name,
            %method_ref,
            roots = roots.len(),
            methods = result.len(),
            "searched implementors"
        );

        result
    }

    /// Seeds the implementor search with a scan over every program class.
    ///
    /// With interface extension modelled, interface definitions are never roots: the
    /// classes implementing them are reached through `all_implementations` instead.
    fn implementor_roots(&self, name: &str) -> Vec<Type> {
        let skip_interfaces = self.config.model_interface_extension;
        let declares = |class: &&ClassRc| {
            !(skip_interfaces && class.is_interface())
                && class.interfaces.iter().any(|i| i.name() == name)
        };

        let mut roots: Vec<Type> = if self.classes.len() >= self.config.parallel_scan_threshold {
            self.classes
                .par_iter()
                .filter(declares)
                .map(|class| class.ty.clone())
                .collect()
        } else {
            self.classes
                .iter()
                .filter(declares)
                .map(|class| class.ty.clone())
                .collect()
        };
        let mut seen: HashSet<Type> = roots.iter().cloned().collect();

        let named = Type::new(name);
        if skip_interfaces {
            for implementor in self.all_implementations(&named) {
                if seen.insert(implementor.clone()) {
                    roots.push(implementor);
                }
            }
        }
        let named_class = self
            .definition(&named)
            .is_some_and(|class| !class.is_interface());
        if named_class && seen.insert(named.clone()) {
            roots.push(named);
        }

        roots
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        analysis::cha::{ChaConfig, HierarchyIndex},
        program::{Class, ClassFlags, Method, MethodFlags, MethodRef, Program},
        test::{method_of, pet_name, speak, ty, zoo},
    };

    #[test]
    fn test_interface_implementors() {
        let index = HierarchyIndex::new(&zoo());
        let found = index.implementations_of("LPet;", &pet_name());

        assert_eq!(
            found,
            vec![
                method_of(&index, "LDog;", &pet_name()),
                method_of(&index, "LPuppy;", &pet_name()),
                method_of(&index, "LCat;", &pet_name()),
            ]
        );
    }

    #[test]
    fn test_class_name_includes_class_and_subtree() {
        let index = HierarchyIndex::new(&zoo());
        let found = index.implementations_of("LAnimal;", &speak());

        assert_eq!(
            found,
            vec![
                method_of(&index, "LAnimal;", &speak()),
                method_of(&index, "LDog;", &speak()),
            ]
        );
    }

    #[test]
    fn test_unknown_name_is_empty() {
        let index = HierarchyIndex::new(&zoo());

        assert!(index.implementations_of("LNobody;", &speak()).is_empty());
        assert!(index
            .implementations_of("LPet;", &MethodRef::new("fly", ty("V"), vec![]))
            .is_empty());
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let parallel = ChaConfig {
            parallel_scan_threshold: 0,
            ..ChaConfig::default()
        };
        let sequential = HierarchyIndex::new(&zoo());
        let threaded = HierarchyIndex::with_config(&zoo(), parallel);

        assert_eq!(
            sequential.implementations_of("LPet;", &pet_name()),
            threaded.implementations_of("LPet;", &pet_name())
        );
    }

    #[test]
    fn test_extended_interfaces() {
        let void = ty("V");
        let run = MethodRef::new("run", void.clone(), vec![]);
        let program = Program::new(vec![
            Class::new(ty("LRunnable;"), None)
                .with_flags(ClassFlags::INTERFACE | ClassFlags::ABSTRACT),
            Class::new(ty("LTask;"), None)
                .implements(ty("LRunnable;"))
                .with_flags(ClassFlags::INTERFACE | ClassFlags::ABSTRACT),
            Class::new(ty("LWorker;"), None)
                .implements(ty("LTask;"))
                .with_method(Method::new(ty("LWorker;"), "run", void, vec![])),
        ]);

        let modelled = HierarchyIndex::new(&program);
        let found = modelled.implementations_of("LRunnable;", &run);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].class, ty("LWorker;"));

        // Literal indexing only reaches the direct declarer
        let literal = HierarchyIndex::with_config(&program, ChaConfig::literal());
        assert!(literal.implementations_of("LRunnable;", &run).is_empty());
    }

    #[test]
    fn test_extending_interface_declarations_are_not_implementations() {
        let void = ty("V");
        let run = MethodRef::new("run", void.clone(), vec![]);
        let program = Program::new(vec![
            Class::new(ty("LRunnable;"), None)
                .with_flags(ClassFlags::INTERFACE | ClassFlags::ABSTRACT),
            Class::new(ty("LTask;"), None)
                .implements(ty("LRunnable;"))
                .with_flags(ClassFlags::INTERFACE | ClassFlags::ABSTRACT)
                .with_method(
                    Method::new(ty("LTask;"), "run", void.clone(), vec![])
                        .with_flags(MethodFlags::ABSTRACT),
                ),
            Class::new(ty("LWorker;"), None)
                .implements(ty("LTask;"))
                .with_method(Method::new(ty("LWorker;"), "run", void, vec![])),
        ]);
        let index = HierarchyIndex::new(&program);
        let worker = method_of(&index, "LWorker;", &run);

        assert_eq!(index.implementations_of("LRunnable;", &run), vec![worker.clone()]);
        assert_eq!(index.implementations_of("LTask;", &run), vec![worker]);
    }

    #[test]
    fn test_shared_implementor_is_one_root() {
        // Reached both directly and through an extending interface
        let void = ty("V");
        let run = MethodRef::new("run", void.clone(), vec![]);
        let program = Program::new(vec![
            Class::new(ty("LRunnable;"), None)
                .with_flags(ClassFlags::INTERFACE | ClassFlags::ABSTRACT),
            Class::new(ty("LTask;"), None)
                .implements(ty("LRunnable;"))
                .with_flags(ClassFlags::INTERFACE | ClassFlags::ABSTRACT),
            Class::new(ty("LWorker;"), None)
                .implements(ty("LRunnable;"))
                .implements(ty("LTask;"))
                .with_method(Method::new(ty("LWorker;"), "run", void, vec![])),
        ]);
        let index = HierarchyIndex::new(&program);

        assert_eq!(index.implementations_of("LRunnable;", &run).len(), 1);
    }
}
