//! Whole-program analysis over the in-memory program model.
//!
//! # Architecture
//!
//! - [`cha`] - Class Hierarchy Analysis: hierarchy index, method resolution and virtual
//!   dispatch target computation
//!
//! # Usage
//!
//! ```rust
//! use chascope::analysis::HierarchyIndex;
//! use chascope::program::{Class, Program, Type};
//!
//! let program = Program::new(vec![Class::new(Type::new("LMain;"), None)]);
//! let index = HierarchyIndex::new(&program);
//! assert_eq!(index.stats().classes, 1);
//! ```

pub mod cha;

// Re-export primary types at module level
pub use cha::{
    CallSite, CallTarget, ChaConfig, DispatchPolicy, DispatchTargets, HierarchyIndex,
    IndexStats, ResolutionCache, SiteStats,
};
