//! Resource limits for tokenizing untrusted documents.

/// Bounds enforced by the tokenizer before and during a pass over the
/// input.
///
/// The depth bound is the load-bearing one: it caps the tokenizer's only
/// growing allocation (the scope stack) and rejects stack-bomb documents
/// up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total input size in bytes.
    pub max_input_size: usize,
    /// Maximum nesting depth for arrays and objects.
    pub max_depth: usize,
}

impl Limits {
    /// Default limits for untrusted input.
    ///
    /// A mempool-API transaction document nests five levels deep at most,
    /// so 32 leaves generous headroom while keeping the scope stack tiny.
    pub const fn consensus() -> Self {
        Self {
            max_input_size: 1024 * 1024, // 1 MiB
            max_depth: 32,
        }
    }

    /// Relaxed limits for trusted input (e.g. debugging fixtures).
    pub const fn lenient() -> Self {
        Self {
            max_input_size: 16 * 1024 * 1024, // 16 MiB
            max_depth: 128,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::consensus()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consensus_limits() {
        let limits = Limits::consensus();
        assert_eq!(limits.max_input_size, 1024 * 1024);
        assert_eq!(limits.max_depth, 32);
        assert_eq!(Limits::default(), limits);
    }

    #[test]
    fn test_lenient_limits_are_wider() {
        let limits = Limits::lenient();
        assert!(limits.max_input_size > Limits::consensus().max_input_size);
        assert!(limits.max_depth > Limits::consensus().max_depth);
    }
}
