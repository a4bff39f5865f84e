//! Class Hierarchy Analysis (CHA) and virtual call resolution.
//!
//! This module indexes inheritance and interface-implementation edges among all classes of a
//! program and uses that index to resolve virtual calls, either exactly (when the receiver's
//! runtime type is statically known) or as a sound over-approximation (when it is not).
//!
//! # Architecture
//!
//! The [`HierarchyIndex`] is built once by a single fold over the program's classes and is
//! immutable afterwards, apart from the [`ResolutionCache`] it owns. Queries take `&self`
//! and may run concurrently from any number of threads:
//!
//! - **Structural queries**: [`HierarchyIndex::superclass`],
//!   [`HierarchyIndex::subclasses`], [`HierarchyIndex::all_subclasses`],
//!   [`HierarchyIndex::implementations`], [`HierarchyIndex::all_implementations`],
//!   [`HierarchyIndex::definition`], [`HierarchyIndex::superclass_def`]
//! - **Resolution**: [`HierarchyIndex::resolve_method_ref`] walks up the superclass chain,
//!   memoizing every visited level
//! - **Dispatch**: [`HierarchyIndex::virtual_dispatch`] picks a [`DispatchPolicy`] per call
//!   site; [`HierarchyIndex::any_target`] enumerates every subtype's resolution
//! - **Implementor search**: [`HierarchyIndex::implementations_of`] scans the whole program
//!   for classes declaring an interface and collects matching methods in their subtrees
//! - **Batches**: [`HierarchyIndex::resolve_call_sites`] resolves [`CallSite`]s in parallel
//!
//! # Partial Programs
//!
//! Types that are referenced but not defined in the program are never an error. They have no
//! definition, so resolution passes through them, and queries simply return less.
//!
//! # Example
//!
//! ```rust
//! use chascope::analysis::cha::HierarchyIndex;
//! use chascope::program::{Class, Instruction, InvokeKind, Method, MethodRef, Program, Type, Value};
//! use std::sync::Arc;
//!
//! let animal = Type::new("LAnimal;");
//! let dog = Type::new("LDog;");
//! let cat = Type::new("LCat;");
//! let void = Type::new("V");
//!
//! let program = Program::new(vec![
//!     Class::new(animal.clone(), None)
//!         .with_method(Method::new(animal.clone(), "speak", void.clone(), vec![])),
//!     Class::new(dog.clone(), Some(animal.clone()))
//!         .with_method(Method::new(dog.clone(), "speak", void.clone(), vec![])),
//!     Class::new(cat.clone(), Some(animal.clone())),
//! ]);
//! let index = HierarchyIndex::new(&program);
//! let speak = MethodRef::new("speak", void.clone(), vec![]);
//!
//! // Cat inherits Animal's implementation
//! let target = index.resolve_method_ref(&cat, &speak).unwrap();
//! assert_eq!(target.class, animal);
//!
//! // A parameter typed Animal may be any subclass at runtime
//! let caller = Instruction::new(Arc::new(Method::new(cat.clone(), "play", void, vec![])), 0);
//! let receiver = Value::Parameter { index: 1, ty: animal.clone() };
//! let targets = index.virtual_dispatch(&caller, InvokeKind::Virtual, &speak, &receiver);
//! assert_eq!(targets.len(), 2);
//! ```

mod cache;
mod config;
mod dispatch;
mod implementors;
mod index;
mod resolve;
mod site;
mod targets;

pub use cache::ResolutionCache;
pub use config::ChaConfig;
pub use dispatch::DispatchPolicy;
pub use index::{HierarchyIndex, IndexStats};
pub use site::{CallSite, CallTarget, SiteStats};
pub use targets::DispatchTargets;
