//! Error types for the metadata layer.

/// Errors that can occur while coercing wire values against a vocabulary.
///
/// Coercion is strict: a value that claims to be a number but does not
/// parse is a real failure the caller must see, not something to paper
/// over with a default.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// A property declared as a number carried text that does not parse
    /// as a 64-bit integer.
    #[error("property '{property}' is not a valid number: {source}")]
    NumberFormat {
        property: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
