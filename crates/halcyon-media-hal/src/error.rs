//! Error types for the media layer.
//!
//! Every failure here is either the client's fault (malformed document,
//! unresolvable entity, bad number) or a configuration fault on our side
//! (missing metadata, unsupported combination). [`MediaError::status_code`]
//! makes that split explicit so the transport layer can answer with the
//! right class of response without inspecting variants.

use halcyon_metadata::MetadataError;

/// Errors that can occur while encoding or decoding hypermedia documents.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The inbound document is structurally unusable.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The inbound document is not valid JSON of the expected shape.
    #[error("failed to parse document: {0}")]
    Json(#[from] serde_json::Error),

    /// No declared resource state accounts for the document's path.
    /// Never silently defaulted — the client addressed something we do
    /// not serve.
    #[error("could not resolve an entity for path '{path}'")]
    EntityNotResolved { path: String },

    /// A declared property failed coercion (strict; see the metadata
    /// layer).
    #[error(transparent)]
    Coercion(#[from] MetadataError),

    /// No vocabulary is registered for an entity type reached during
    /// encode. Metadata is a static configuration invariant; this is
    /// our fault, not the client's.
    #[error("entity metadata could not be found [{entity}]")]
    MetadataNotFound { entity: String },

    /// The negotiated media type cannot serve this operation.
    #[error("media type '{media}' is not supported here")]
    UnsupportedMediaType { media: String },

    /// A resource/payload combination the encoder has no rendering for.
    #[error("unsupported payload combination: {0}")]
    UnsupportedPayload(String),

    /// Embedded resources nested beyond the recursion bound.
    #[error("embedded resources nested deeper than {limit}")]
    EmbedDepthExceeded { limit: usize },

    /// Writing the outbound document failed.
    #[error("document write failed: {0}")]
    Write(String),
}

impl MediaError {
    /// The HTTP-style status class this error maps onto: `400` for
    /// client problems, `500` for configuration/server faults.
    pub fn status_code(&self) -> u16 {
        match self {
            MediaError::Malformed(_)
            | MediaError::Json(_)
            | MediaError::EntityNotResolved { .. }
            | MediaError::Coercion(_) => 400,
            MediaError::MetadataNotFound { .. }
            | MediaError::UnsupportedMediaType { .. }
            | MediaError::UnsupportedPayload(_)
            | MediaError::EmbedDepthExceeded { .. }
            | MediaError::Write(_) => 500,
        }
    }
}
