//! Dispatch target computation for individual call sites.
//!
//! Each call site is handled by one of three policies, chosen from the invoke kind and the
//! provenance of the receiver:
//!
//! - **Super**: `invoke-super` resolves one level above the class declaring the calling
//!   method, regardless of the receiver.
//! - **Over-approximate**: the receiver is a formal parameter or a caught exception (seen
//!   through casts), so its declared type is only a lower bound and every subtype's
//!   resolution is a candidate.
//! - **Exact**: otherwise the receiver's type is taken as its runtime type and a single
//!   target is resolved.

use std::fmt;

use crate::{
    analysis::cha::{DispatchTargets, HierarchyIndex},
    program::{Instruction, InvokeKind, MethodRef, Type, Value},
};

/// How the targets of a call site are computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Resolve above the declaring class of the calling method.
    Super {
        /// The class declaring the calling method
        declaring: Type,
    },
    /// The receiver's runtime type is its static type.
    Exact {
        /// The receiver's runtime type
        receiver: Type,
    },
    /// The receiver's runtime type may be any subtype of its static type.
    OverApproximate {
        /// The receiver's static type, a lower bound on its runtime type
        bound: Type,
    },
}

impl DispatchPolicy {
    /// Chooses the dispatch policy for a call site.
    ///
    /// # Arguments
    ///
    /// * `instruction` - The invoke instruction, used for its enclosing method's class
    /// * `kind` - The invoke kind; only [`InvokeKind::Super`] changes the policy
    /// * `receiver` - The value the method is invoked on
    #[must_use]
    pub fn classify(instruction: &Instruction, kind: InvokeKind, receiver: &Value) -> Self {
        if kind.is_super() {
            DispatchPolicy::Super {
                declaring: instruction.declaring_class().clone(),
            }
        } else if receiver.has_unknown_dynamic_type() {
            DispatchPolicy::OverApproximate {
                bound: receiver.ty().clone(),
            }
        } else {
            // A cast over an allocation cannot change its runtime type. Over anything else
            // the cast is the tightest type known.
            let exact = match receiver.strip_casts() {
                allocation @ Value::NewInstance { .. } => allocation.ty(),
                _ => receiver.ty(),
            };
            DispatchPolicy::Exact {
                receiver: exact.clone(),
            }
        }
    }
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchPolicy::Super { .. } => f.write_str("super"),
            DispatchPolicy::Exact { .. } => f.write_str("exact"),
            DispatchPolicy::OverApproximate { .. } => f.write_str("over-approximate"),
        }
    }
}

impl HierarchyIndex {
    /// Computes the methods that may run for one call site.
    ///
    /// # Arguments
    ///
    /// * `instruction` - The invoke instruction
    /// * `kind` - The invoke kind
    /// * `method_ref` - The signature named by the call site
    /// * `receiver` - The value the method is invoked on
    ///
    /// # Returns
    ///
    /// At most one target for super calls and exact receivers, the full candidate set for
    /// receivers of unknown dynamic type. Empty if nothing resolves.
    #[must_use]
    pub fn virtual_dispatch(
        &self,
        instruction: &Instruction,
        kind: InvokeKind,
        method_ref: &MethodRef,
        receiver: &Value,
    ) -> DispatchTargets {
        let policy = DispatchPolicy::classify(instruction, kind, receiver);
        tracing::trace!(%method_ref, %policy, offset = instruction.offset, "dispatching call site");

        match policy {
            DispatchPolicy::Super { declaring } => {
                DispatchTargets::from_option(self.resolve_super(&declaring, method_ref))
            }
            DispatchPolicy::OverApproximate { bound } => self.any_target(kind, method_ref, &bound),
            DispatchPolicy::Exact { receiver } => {
                DispatchTargets::from_option(self.resolve_method_ref(&receiver, method_ref))
            }
        }
    }

    /// Enumerates every target reachable from a receiver whose type is at least `root`.
    ///
    /// Visits `root` and each of its transitive subclasses (for super calls, starting from
    /// the superclass of `root` when it has one) and collects whatever each visited type
    /// resolves to. The walk continues below types that fail to resolve, since deeper
    /// subclasses may still define the method.
    ///
    /// # Arguments
    ///
    /// * `kind` - The invoke kind
    /// * `method_ref` - The signature named by the call site
    /// * `root` - The receiver's static type
    ///
    /// # Returns
    ///
    /// The deduplicated candidate set, in pre-order discovery order.
    #[must_use]
    pub fn any_target(
        &self,
        kind: InvokeKind,
        method_ref: &MethodRef,
        root: &Type,
    ) -> DispatchTargets {
        let start = if kind.is_super() {
            self.superclass(root).unwrap_or(root)
        } else {
            root
        };

        self.all_subclasses(start)
            .iter()
            .filter_map(|ty| self.resolve_method_ref(ty, method_ref))
            .collect()
    }

    /// Returns `true` if the call site has more than one possible target.
    #[must_use]
    pub fn is_polymorphic(
        &self,
        instruction: &Instruction,
        kind: InvokeKind,
        method_ref: &MethodRef,
        receiver: &Value,
    ) -> bool {
        self.virtual_dispatch(instruction, kind, method_ref, receiver).len() > 1
    }
}
