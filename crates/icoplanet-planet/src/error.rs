//! Planet generation and export errors.

use icoplanet_geometry::ConfigurationError;

/// A generation request was rejected before any geometry was built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// Invalid subdivision depths.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The planet radius must be a positive, finite number.
    #[error("base radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// The pole tolerance must lie in `[0, 0.5)`.
    #[error("pole tolerance must be in [0, 0.5), got {0}")]
    InvalidPoleTolerance(f32),
}

/// Errors that can occur while writing a generated planet to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Failed to create the output directory or write a file.
    #[error("failed to write export: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to serialize the pivot report to RON.
    #[error("failed to serialize pivot report: {0}")]
    SerializeError(#[source] ron::Error),
}
