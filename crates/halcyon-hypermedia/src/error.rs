//! Error types for the hypermedia layer.

/// Errors raised while building the declared resource-state table.
#[derive(Debug, thiserror::Error)]
pub enum HypermediaError {
    /// Two states were registered under the same name. State names key
    /// the declared table; silently replacing one would make path
    /// resolution depend on registration accidents.
    #[error("duplicate resource state '{name}'")]
    DuplicateState { name: String },
}
