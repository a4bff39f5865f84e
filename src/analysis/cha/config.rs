//! Configuration for hierarchy index construction and querying.

/// Configuration for a [`crate::analysis::cha::HierarchyIndex`].
///
/// None of the options change which targets a sound query reports for a program without
/// interface-extension edges; they trade memory for speed or pick how interface
/// definitions are indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaConfig {
    /// Memoize name/signature resolution in the shared cache (default: true).
    /// Disabling it makes every resolution walk the superclass chain.
    pub enable_resolution_cache: bool,

    /// Index the interfaces declared by an interface definition as extension edges
    /// rather than implementor edges (default: true).
    /// Required for `all_implementations` to follow interface-extends-interface chains.
    pub model_interface_extension: bool,

    /// Minimum class count at which whole-program implementor searches seed their
    /// roots with a parallel scan (default: 4096).
    pub parallel_scan_threshold: usize,
}

impl Default for ChaConfig {
    fn default() -> Self {
        Self {
            enable_resolution_cache: true,
            model_interface_extension: true,
            parallel_scan_threshold: 4096,
        }
    }
}

impl ChaConfig {
    /// Creates a configuration that resolves without memoization
    ///
    /// Useful for benchmarking and for cross-checking cached results.
    #[must_use]
    pub fn uncached() -> Self {
        Self {
            enable_resolution_cache: false,
            ..Self::default()
        }
    }

    /// Creates a configuration that indexes every declared interface as an implementor
    /// edge, interface definitions included
    #[must_use]
    pub fn literal() -> Self {
        Self {
            model_interface_extension: false,
            ..Self::default()
        }
    }
}
