//! # chascope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! chascope library. Import this module to get quick access to the essential types for
//! building a program model and querying its class hierarchy.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all chascope operations
pub use crate::Error;

/// The result type used throughout chascope
pub use crate::Result;

// ================================================================================================
// Program Model
// ================================================================================================

/// Class and method definitions
pub use crate::program::{
    Class, ClassFlags, ClassRc, Method, MethodFlags, MethodRc, MethodRef, Program, Type,
};

/// Call-site receiver information
pub use crate::program::{Instruction, InvokeKind, Value};

// ================================================================================================
// Class Hierarchy Analysis
// ================================================================================================

/// Hierarchy index and its configuration
pub use crate::analysis::cha::{ChaConfig, HierarchyIndex, IndexStats, ResolutionCache};

/// Dispatch results
pub use crate::analysis::cha::{CallSite, CallTarget, DispatchPolicy, DispatchTargets, SiteStats};
