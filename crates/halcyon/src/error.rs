//! Unified error type for the Halcyon framework.

use halcyon_command::CommandError;
use halcyon_hypermedia::HypermediaError;
use halcyon_media_hal::MediaError;
use halcyon_metadata::MetadataError;
use halcyon_resource::ResourceError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `halcyon` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HalcyonError {
    /// A metadata-level error (vocabulary, coercion).
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// A hypermedia-model error (state declaration).
    #[error(transparent)]
    Hypermedia(#[from] HypermediaError),

    /// A resource-model error (object reflection).
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// A codec error (encode, decode, media negotiation).
    #[error(transparent)]
    Media(#[from] MediaError),

    /// A command-layer error (registration, execution).
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl HalcyonError {
    /// The HTTP-style status this error answers with. The media layer
    /// carries its own client/server split; everything else that leaks
    /// out of a request is a server fault.
    pub fn status_code(&self) -> u16 {
        match self {
            HalcyonError::Media(error) => error.status_code(),
            _ => 500,
        }
    }
}
