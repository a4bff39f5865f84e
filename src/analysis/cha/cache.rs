//! Shared memo table for name/signature resolution.
//!
//! Resolving a [`MethodRef`] against a [`Type`] is a pure function of the (immutable)
//! hierarchy, so its results can be shared by every query running against the same index.
//! The cache is a sharded concurrent map: each read-check-insert sequence touches one shard
//! under its lock, and no shard lock is held while the superclass chain is walked.
//!
//! # Contention
//!
//! Two callers missing on the same key at the same time both walk the chain and both
//! insert. The values they insert are necessarily identical, so the cache may recompute
//! under contention but is never inconsistent.

use std::{
    borrow::Borrow,
    hash::{Hash, Hasher},
    sync::atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;

use crate::program::{MethodRc, MethodRef, Type};

/// A (MethodRef, Type) pair, owned or borrowed.
///
/// Owned keys borrow as `dyn KeyParts`, so a lookup hashes and compares the caller's
/// references without building an owned key.
trait KeyParts {
    fn parts(&self) -> (&MethodRef, &Type);
}

#[derive(Debug)]
struct CacheKey {
    method_ref: MethodRef,
    ty: Type,
}

impl KeyParts for CacheKey {
    fn parts(&self) -> (&MethodRef, &Type) {
        (&self.method_ref, &self.ty)
    }
}

impl KeyParts for (&MethodRef, &Type) {
    fn parts(&self) -> (&MethodRef, &Type) {
        (self.0, self.1)
    }
}

impl<'a> Borrow<dyn KeyParts + 'a> for CacheKey {
    fn borrow(&self) -> &(dyn KeyParts + 'a) {
        self
    }
}

// Owned and borrowed keys must hash and compare identically.
impl Hash for dyn KeyParts + '_ {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts().hash(state);
    }
}

impl PartialEq for dyn KeyParts + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.parts() == other.parts()
    }
}

impl Eq for dyn KeyParts + '_ {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts().hash(state);
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.parts() == other.parts()
    }
}

impl Eq for CacheKey {}

/// Memoized results of [`crate::analysis::cha::HierarchyIndex::resolve_method_ref`].
///
/// Negative results are cached as `None`, so a repeated miss never re-walks the chain.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: DashMap<CacheKey, Option<MethodRc>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a memoized resolution.
    ///
    /// Returns `None` on a miss and `Some(result)` on a hit, where `result` itself may be
    /// `None` for a memoized negative resolution.
    pub fn get(&self, method_ref: &MethodRef, ty: &Type) -> Option<Option<MethodRc>> {
        let key: &dyn KeyParts = &(method_ref, ty);
        match self.entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Records a resolution result.
    ///
    /// Overwriting an existing entry is harmless: any two results for the same key agree.
    pub fn insert(&self, method_ref: MethodRef, ty: Type, result: Option<MethodRc>) {
        self.entries.insert(CacheKey { method_ref, ty }, result);
    }

    /// Returns the number of memoized (MethodRef, Type) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been memoized yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of lookups answered from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups that had to walk the hierarchy.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Drops every memoized entry and resets the counters.
    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
