//! HAL document codec for Halcyon.
//!
//! This crate turns resource graphs into hypermedia documents and
//! inbound documents into flat domain entities:
//!
//! - [`Representation`] — the syntax-independent document model, with
//!   the HAL JSON rendering built in and the XML rendering in [`xml`].
//! - [`encode`] — resource graph → representation, enforcing vocabulary
//!   filtering, null suppression, and the self-link heuristic.
//! - [`decode`] — representation → [`Entity`](halcyon_resource::Entity),
//!   resolving the entity type from the document's own address.
//! - [`HalCodec`] — the facade the dispatch layer negotiates media
//!   types against.

mod codec;
pub mod decode;
pub mod encode;
mod error;
mod representation;
pub mod xml;

pub use codec::{HalCodec, MediaType, RequestContext};
pub use decode::build_entity_from_document;
pub use encode::{build_representation, MAX_EMBED_DEPTH};
pub use error::MediaError;
pub use representation::{Representation, WireLink};
