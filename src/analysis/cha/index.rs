//! Hierarchy index construction and structural queries.
//!
//! The index is built by a single fold over every class in the program. It records, for each
//! type, its parent, its direct children, the classes directly implementing it and (for
//! interfaces) the interfaces directly extending it. All adjacency lists are appended to in
//! class declaration order, so enumeration order is deterministic.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{
    analysis::cha::{ChaConfig, ResolutionCache},
    program::{ClassRc, Program, Type},
};

/// Class Hierarchy Analysis index over a whole program.
///
/// Built once from a [`Program`] and queried many times afterwards. Apart from the
/// [`ResolutionCache`] it owns, the index is immutable and can be shared freely across
/// threads; all query methods take `&self`.
///
/// Types referenced by the program but not defined in it (a library's host application,
/// platform classes) are valid query arguments. They simply have no definition, so
/// resolution passes through them and structural queries return what the edges recorded
/// from defined classes allow.
///
/// # Examples
///
/// ```rust
/// use chascope::analysis::cha::HierarchyIndex;
/// use chascope::program::{Class, Program, Type};
///
/// let animal = Type::new("LAnimal;");
/// let dog = Type::new("LDog;");
/// let program = Program::new(vec![
///     Class::new(animal.clone(), None),
///     Class::new(dog.clone(), Some(animal.clone())),
/// ]);
///
/// let index = HierarchyIndex::new(&program);
/// assert_eq!(index.superclass(&dog), Some(&animal));
/// assert_eq!(index.subclasses(&animal), &[dog]);
/// ```
#[derive(Debug)]
pub struct HierarchyIndex {
    pub(crate) config: ChaConfig,
    /// All defined classes, in declaration order.
    pub(crate) classes: Vec<ClassRc>,
    /// type -> direct superclass
    parent_of: HashMap<Type, Type>,
    /// type -> direct subclasses
    children_of: HashMap<Type, Vec<Type>>,
    /// interface -> classes directly declaring it
    implementors_of: HashMap<Type, Vec<Type>>,
    /// interface -> interfaces directly extending it
    subinterfaces_of: HashMap<Type, Vec<Type>>,
    /// type -> definition, only for types defined in the program
    class_of: HashMap<Type, ClassRc>,
    pub(crate) cache: ResolutionCache,
}

impl HierarchyIndex {
    /// Builds an index with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `program` - The whole program; every class is indexed
    #[must_use]
    pub fn new(program: &Program) -> Self {
        Self::with_config(program, ChaConfig::default())
    }

    /// Builds an index with an explicit configuration.
    ///
    /// Runs in O(classes + edges). When a type is defined more than once, the first
    /// definition wins and later ones are skipped entirely, keeping the adjacency lists
    /// exact inverses of the indexed parent and implements relations.
    ///
    /// # Arguments
    ///
    /// * `program` - The whole program; every class is indexed
    /// * `config` - Index and query options
    #[must_use]
    #[tracing::instrument(level = "debug", skip_all, fields(classes = program.len()))]
    pub fn with_config(program: &Program, config: ChaConfig) -> Self {
        let mut index = HierarchyIndex {
            config,
            classes: Vec::with_capacity(program.len()),
            parent_of: HashMap::with_capacity(program.len()),
            children_of: HashMap::new(),
            implementors_of: HashMap::new(),
            subinterfaces_of: HashMap::new(),
            class_of: HashMap::with_capacity(program.len()),
            cache: ResolutionCache::new(),
        };

        for class in program.classes() {
            index.add_class(class);
        }

        tracing::debug!(
            classes = index.classes.len(),
            inheritance_edges = index.parent_of.len(),
            implementation_edges = count_edges(&index.implementors_of),
            extension_edges = count_edges(&index.subinterfaces_of),
            "built class hierarchy index"
        );

        index
    }

    fn add_class(&mut self, class: &ClassRc) {
        if self.class_of.contains_key(&class.ty) {
            tracing::warn!(ty = %class.ty, "duplicate class definition skipped");
            return;
        }

        if let Some(parent) = &class.parent {
            self.parent_of.insert(class.ty.clone(), parent.clone());
            self.children_of
                .entry(parent.clone())
                .or_default()
                .push(class.ty.clone());
        }

        let edges = if class.is_interface() && self.config.model_interface_extension {
            &mut self.subinterfaces_of
        } else {
            &mut self.implementors_of
        };
        for interface in &class.interfaces {
            edges
                .entry(interface.clone())
                .or_default()
                .push(class.ty.clone());
        }

        self.class_of.insert(class.ty.clone(), class.clone());
        self.classes.push(class.clone());
    }

    /// Returns the configuration the index was built with.
    #[must_use]
    pub fn config(&self) -> &ChaConfig {
        &self.config
    }

    /// Returns the shared resolution cache.
    #[must_use]
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Returns every indexed class in declaration order.
    #[must_use]
    pub fn classes(&self) -> &[ClassRc] {
        &self.classes
    }

    /// Returns the direct superclass of a type.
    ///
    /// # Returns
    ///
    /// `None` at the root of the hierarchy and for types with no definition.
    #[must_use]
    pub fn superclass(&self, ty: &Type) -> Option<&Type> {
        self.parent_of.get(ty)
    }

    /// Returns the direct subclasses of a type, in declaration order.
    #[must_use]
    pub fn subclasses(&self, ty: &Type) -> &[Type] {
        self.children_of.get(ty).map_or(&[], Vec::as_slice)
    }

    /// Returns `ty` followed by all of its transitive subclasses.
    ///
    /// The result is self-inclusive and in pre-order: each type precedes its own
    /// subclasses, and siblings appear in declaration order. Use
    /// [`HierarchyIndex::proper_subclasses`] to exclude `ty` itself.
    #[must_use]
    pub fn all_subclasses(&self, ty: &Type) -> Vec<Type> {
        let mut result = Vec::new();
        let mut stack = vec![ty];

        while let Some(current) = stack.pop() {
            result.push(current.clone());
            stack.extend(self.subclasses(current).iter().rev());
        }

        result
    }

    /// Returns all transitive subclasses of `ty`, excluding `ty` itself.
    #[must_use]
    pub fn proper_subclasses(&self, ty: &Type) -> Vec<Type> {
        let mut all = self.all_subclasses(ty);
        all.remove(0);
        all
    }

    /// Returns the classes directly declaring `ty` as an implemented interface.
    #[must_use]
    pub fn implementations(&self, ty: &Type) -> &[Type] {
        self.implementors_of.get(ty).map_or(&[], Vec::as_slice)
    }

    /// Returns the interfaces directly extending the interface `ty`.
    ///
    /// Always empty when the index was built with
    /// [`ChaConfig::model_interface_extension`] disabled.
    #[must_use]
    pub fn subinterfaces(&self, ty: &Type) -> &[Type] {
        self.subinterfaces_of.get(ty).map_or(&[], Vec::as_slice)
    }

    /// Returns the classes implementing `ty` directly or through interface extension.
    ///
    /// Starting from `ty`, collects the direct implementors of every interface reached by
    /// following extension edges, and of every implementor itself. Each type appears once,
    /// in breadth-first discovery order. Subclasses of implementors are not included;
    /// combine with [`HierarchyIndex::all_subclasses`] for that.
    #[must_use]
    pub fn all_implementations(&self, ty: &Type) -> Vec<Type> {
        let mut result = Vec::new();
        let mut emitted = HashSet::new();
        let mut visited = HashSet::from([ty]);
        let mut queue = VecDeque::from([ty]);

        while let Some(current) = queue.pop_front() {
            for implementor in self.implementations(current) {
                if emitted.insert(implementor) {
                    result.push(implementor.clone());
                }
                if visited.insert(implementor) {
                    queue.push_back(implementor);
                }
            }
            for extension in self.subinterfaces(current) {
                if visited.insert(extension) {
                    queue.push_back(extension);
                }
            }
        }

        result
    }

    /// Returns the definition of a type, if the program defines it.
    #[must_use]
    pub fn definition(&self, ty: &Type) -> Option<&ClassRc> {
        self.class_of.get(ty)
    }

    /// Returns the definition of a type's direct superclass, if both are known.
    #[must_use]
    pub fn superclass_def(&self, ty: &Type) -> Option<&ClassRc> {
        self.superclass(ty).and_then(|parent| self.definition(parent))
    }

    /// Finds a defined class by its descriptor name.
    #[must_use]
    pub fn definition_by_name(&self, name: &str) -> Option<&ClassRc> {
        self.class_of.get(&Type::new(name))
    }

    /// Returns `true` if the type is defined as an interface.
    #[must_use]
    pub fn is_interface(&self, ty: &Type) -> bool {
        self.definition(ty).is_some_and(|class| class.is_interface())
    }

    /// Returns `true` if the type is defined as final.
    #[must_use]
    pub fn is_final(&self, ty: &Type) -> bool {
        self.definition(ty).is_some_and(|class| class.is_final())
    }

    /// Returns the defined classes that have no superclass, in declaration order.
    pub fn roots(&self) -> impl Iterator<Item = &ClassRc> {
        self.classes.iter().filter(|class| class.parent.is_none())
    }

    /// Returns statistics about the index and its cache.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            classes: self.classes.len(),
            interfaces: self.classes.iter().filter(|c| c.is_interface()).count(),
            roots: self.roots().count(),
            inheritance_edges: self.parent_of.len(),
            implementation_edges: count_edges(&self.implementors_of),
            extension_edges: count_edges(&self.subinterfaces_of),
            cache_entries: self.cache.len(),
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
        }
    }
}

fn count_edges(edges: &HashMap<Type, Vec<Type>>) -> usize {
    edges.values().map(Vec::len).sum()
}

/// Statistics about a hierarchy index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of indexed class definitions.
    pub classes: usize,
    /// Number of definitions flagged as interfaces.
    pub interfaces: usize,
    /// Number of definitions without a superclass.
    pub roots: usize,
    /// Number of recorded parent edges.
    pub inheritance_edges: usize,
    /// Number of recorded class-implements-interface edges.
    pub implementation_edges: usize,
    /// Number of recorded interface-extends-interface edges.
    pub extension_edges: usize,
    /// Number of memoized resolutions.
    pub cache_entries: usize,
    /// Resolution cache hits so far.
    pub cache_hits: u64,
    /// Resolution cache misses so far.
    pub cache_misses: u64,
}
