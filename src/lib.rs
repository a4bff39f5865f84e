// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # chascope
//!
//! Class Hierarchy Analysis (CHA) over whole-program object-oriented bytecode.
//! `chascope` indexes the inheritance and interface-implementation edges among all classes of
//! a program and uses that index to resolve virtual method calls to their concrete targets:
//! exactly, when the receiver's runtime type is statically known, or as a sound
//! over-approximated candidate set, when it is not.
//!
//! ## Features
//!
//! - **🌳 Hierarchy index** - Parent, children, implementor and interface-extension maps built in one pass
//! - **🎯 Method resolution** - Nearest-ancestor lookup of call-site signatures, memoized in a shared concurrent cache
//! - **🔀 Dispatch sets** - Per call site target sets for `invoke-super`, exact and unknown receivers
//! - **🔍 Implementor search** - Whole-program search for every method answering an interface signature
//! - **⚡ Concurrent queries** - Immutable index, `&self` queries, parallel batch resolution
//! - **🧩 Partial programs** - Types without a definition are passed through, never an error
//!
//! ## Quick Start
//!
//! ```rust
//! use chascope::prelude::*;
//!
//! let animal = Type::new("LAnimal;");
//! let dog = Type::new("LDog;");
//! let void = Type::new("V");
//!
//! let program = Program::new(vec![
//!     Class::new(animal.clone(), None)
//!         .with_method(Method::new(animal.clone(), "speak", void.clone(), vec![])),
//!     Class::new(dog.clone(), Some(animal.clone())),
//! ]);
//! program.validate()?;
//!
//! let index = HierarchyIndex::new(&program);
//! let speak = MethodRef::new("speak", void, vec![]);
//! let target = index.resolve_method_ref(&dog, &speak);
//! assert_eq!(target.map(|m| m.class.clone()), Some(animal));
//! # Ok::<(), chascope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`program`] - The read-only program model: types, classes, methods, call-site values
//! - [`analysis`] - The hierarchy index and its resolution engine
//! - [`Error`] and [`Result`] - Error handling for program model validation
//!
//! ## Observability
//!
//! Index construction and implementor searches emit [`tracing`] events at `debug` level,
//! dispatch policy selection at `trace` level. The library never installs a subscriber.
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```
#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use chascope::prelude::*;
///
/// let program = Program::new(vec![Class::new(Type::new("LMain;"), None)]);
/// let index = HierarchyIndex::with_config(&program, ChaConfig::uncached());
/// assert!(index.definition(&Type::new("LMain;")).is_some());
/// ```
pub mod prelude;

/// The in-memory program model.
///
/// Types, class definitions and virtual methods, plus the instruction and value details
/// needed to classify a call site's receiver. See [`program::Program`] for the entry point.
pub mod program;

/// Whole-program analyses.
///
/// See [`analysis::cha::HierarchyIndex`] for Class Hierarchy Analysis and virtual dispatch
/// resolution.
pub mod analysis;

/// `chascope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `chascope` Error type
///
/// Returned by program model validation. Hierarchy queries never fail; see
/// [`analysis::cha`] for how absence is reported.
pub use error::Error;
