//! Generation configuration errors.

/// A subdivision request that can never produce a mesh.
///
/// Raised before any vertex is allocated, so a rejected request leaves no
/// partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The split depth must be strictly below the total depth.
    #[error("split depth ({split_depth}) must be less than total depth ({total_depth})")]
    SplitDepthNotBelowTotal { split_depth: u32, total_depth: u32 },

    /// The total depth would overflow the index space.
    #[error("total depth {depth} exceeds the supported maximum of {max}")]
    DepthTooLarge { depth: u32, max: u32 },
}
