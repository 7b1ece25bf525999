//! Error types for the resource layer.

/// Errors raised while constructing resources.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// A plain object payload could not be reflected into a property
    /// map (its serialization failed).
    #[error("object payload is not serializable: {0}")]
    ObjectAccess(#[from] serde_json::Error),
}
