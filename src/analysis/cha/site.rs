//! Call site representation and batch resolution.
//!
//! A [`CallSite`] bundles the four inputs of
//! [`HierarchyIndex::virtual_dispatch`]; a [`CallTarget`] is its outcome, classified the way
//! downstream call-graph builders and devirtualizers consume it.

use rayon::prelude::*;

use crate::{
    analysis::cha::{DispatchTargets, HierarchyIndex},
    program::{Instruction, InvokeKind, MethodRc, MethodRef, Value},
};

/// A specific invoke instruction together with what it calls and on what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// The invoke instruction
    pub instruction: Instruction,
    /// The invoke kind
    pub kind: InvokeKind,
    /// The signature named by the instruction
    pub method_ref: MethodRef,
    /// The receiver value
    pub receiver: Value,
}

impl CallSite {
    /// Creates a new call site.
    ///
    /// # Arguments
    ///
    /// * `instruction` - The invoke instruction within its enclosing method
    /// * `kind` - The invoke kind
    /// * `method_ref` - The signature named by the instruction
    /// * `receiver` - The value the method is invoked on
    #[must_use]
    pub const fn new(
        instruction: Instruction,
        kind: InvokeKind,
        method_ref: MethodRef,
        receiver: Value,
    ) -> Self {
        Self {
            instruction,
            kind,
            method_ref,
            receiver,
        }
    }
}

/// Resolved target of a call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// Exactly one method can run; the call can be devirtualized.
    Resolved(MethodRc),

    /// Several methods may run, depending on the receiver's runtime type.
    Virtual {
        /// The signature named by the call site.
        declared: MethodRef,
        /// All possible runtime targets.
        possible_targets: DispatchTargets,
    },

    /// No method in the program answers to the call site.
    Unresolved {
        /// The signature that could not be resolved.
        method_ref: MethodRef,
    },
}

impl CallTarget {
    fn from_targets(method_ref: &MethodRef, targets: DispatchTargets) -> Self {
        if let Some(method) = targets.single() {
            CallTarget::Resolved(method.clone())
        } else if targets.is_empty() {
            CallTarget::Unresolved {
                method_ref: method_ref.clone(),
            }
        } else {
            CallTarget::Virtual {
                declared: method_ref.clone(),
                possible_targets: targets,
            }
        }
    }

    /// Returns `true` if at least one target was found.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_) | Self::Virtual { .. })
    }

    /// Returns `true` if more than one target is possible.
    #[must_use]
    pub const fn is_polymorphic(&self) -> bool {
        matches!(self, Self::Virtual { .. })
    }

    /// Returns all possible target methods for this call.
    ///
    /// # Returns
    ///
    /// A single-element vector for `Resolved`, every candidate for `Virtual`, and an
    /// empty vector for `Unresolved`.
    #[must_use]
    pub fn all_targets(&self) -> Vec<MethodRc> {
        match self {
            Self::Resolved(method) => vec![method.clone()],
            Self::Virtual {
                possible_targets, ..
            } => possible_targets.iter().cloned().collect(),
            Self::Unresolved { .. } => Vec::new(),
        }
    }
}

impl HierarchyIndex {
    /// Resolves a single call site.
    #[must_use]
    pub fn resolve_call_site(&self, site: &CallSite) -> CallTarget {
        let targets =
            self.virtual_dispatch(&site.instruction, site.kind, &site.method_ref, &site.receiver);
        CallTarget::from_targets(&site.method_ref, targets)
    }

    /// Resolves many call sites in parallel.
    ///
    /// All sites share this index and its resolution cache. Results are returned in the
    /// same order as `sites`.
    #[must_use]
    pub fn resolve_call_sites(&self, sites: &[CallSite]) -> Vec<CallTarget> {
        sites
            .par_iter()
            .map(|site| self.resolve_call_site(site))
            .collect()
    }
}

/// Aggregate figures over a batch of resolved call sites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteStats {
    /// Total number of call sites.
    pub total_call_sites: usize,
    /// Number of call sites with at least one target.
    pub resolved_calls: usize,
    /// Number of call sites with a single target.
    pub monomorphic_calls: usize,
    /// Number of call sites with several possible targets.
    pub polymorphic_calls: usize,
    /// Largest number of targets for any single call site.
    pub max_targets: usize,
}

impl SiteStats {
    /// Computes statistics over resolved call targets.
    #[must_use]
    pub fn from_targets(targets: &[CallTarget]) -> Self {
        let mut stats = SiteStats {
            total_call_sites: targets.len(),
            ..SiteStats::default()
        };

        for target in targets {
            match target {
                CallTarget::Resolved(_) => stats.monomorphic_calls += 1,
                CallTarget::Virtual {
                    possible_targets, ..
                } => {
                    stats.polymorphic_calls += 1;
                    stats.max_targets = stats.max_targets.max(possible_targets.len());
                }
                CallTarget::Unresolved { .. } => {}
            }
        }
        stats.resolved_calls = stats.monomorphic_calls + stats.polymorphic_calls;
        if stats.monomorphic_calls > 0 {
            stats.max_targets = stats.max_targets.max(1);
        }

        stats
    }

    /// Returns the call target resolution rate as a percentage.
    ///
    /// # Returns
    ///
    /// The percentage of resolved call sites (0.0 to 100.0). Returns 100.0
    /// if there are no call sites.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn resolution_rate(&self) -> f64 {
        if self.total_call_sites == 0 {
            100.0
        } else {
            (self.resolved_calls as f64 / self.total_call_sites as f64) * 100.0
        }
    }
}
