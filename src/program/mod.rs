//! In-memory program model consumed by the hierarchy analysis.
//!
//! This module holds the read-only representation of a whole program: its types, class
//! definitions, virtual methods, and the handful of instruction and value details needed to
//! classify a call site's receiver. Loaders produce it; [`crate::analysis::cha`] consumes it
//! without ever mutating it.
//!
//! # Key Types
//!
//! - [`Type`] - Opaque class or interface identifier
//! - [`Class`] - A definition with its parent, interfaces and virtual methods
//! - [`Method`] / [`MethodRef`] - A definition and a call-site signature
//! - [`Value`] / [`Instruction`] / [`InvokeKind`] - Call-site receiver information
//! - [`Program`] - The ordered set of all classes
//!
//! # Example
//!
//! ```rust
//! use chascope::program::{Class, Method, Program, Type};
//!
//! let animal = Type::new("LAnimal;");
//! let void = Type::new("V");
//!
//! let program = Program::new(vec![
//!     Class::new(animal.clone(), None)
//!         .with_method(Method::new(animal.clone(), "speak", void.clone(), vec![])),
//! ]);
//! program.validate()?;
//! # Ok::<(), chascope::Error>(())
//! ```

mod class;
mod method;
mod model;
mod types;
mod value;

pub use class::{Class, ClassFlags, ClassRc};
pub use method::{Method, MethodFlags, MethodRc, MethodRef};
pub use model::Program;
pub use types::Type;
pub use value::{Instruction, InvokeKind, Value};
