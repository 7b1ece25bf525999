//! # Halcyon
//!
//! Hypermedia API framework with a HAL document codec at its core.
//!
//! Halcyon turns resource graphs into hypermedia documents (HAL JSON or
//! XML) and inbound documents into typed domain entities, resolving the
//! target entity type from path structure and declared resource states.
//! Application behavior plugs in as named interaction commands.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use halcyon::prelude::*;
//!
//! let metadata = Arc::new(
//!     Metadata::builder()
//!         .entity(
//!             EntityMetadata::new("Customer")
//!                 .declare("name", TermType::Text)
//!                 .declare("age", TermType::Number),
//!         )
//!         .build(),
//! );
//! let states = Arc::new(
//!     ResourceStateRegistry::builder()
//!         .state(ResourceState::new("customer", "Customer", "/customers/{id}"))
//!         .build()
//!         .unwrap(),
//! );
//! let codec = HalCodec::new(metadata, states);
//! // codec.write_to(...) / codec.read_from(...)
//! ```

mod engine;
mod error;

pub use engine::{Engine, InteractionResponse};
pub use error::HalcyonError;

pub use halcyon_command as command;
pub use halcyon_hypermedia as hypermedia;
pub use halcyon_media_hal as media;
pub use halcyon_metadata as metadata;
pub use halcyon_resource as resource;

/// The common imports for building on Halcyon.
pub mod prelude {
    pub use crate::{Engine, HalcyonError, InteractionResponse};
    pub use halcyon_command::{
        AggregateRegistry, CommandError, CommandOutcome, CommandRegistry,
        CommandSource, InteractionCommand, InteractionContext, MatchCommand,
        NamedCommand,
    };
    pub use halcyon_hypermedia::{
        Action, Event, Link, ResourceState, ResourceStateProvider,
        ResourceStateRegistry, Transition,
    };
    pub use halcyon_media_hal::{
        HalCodec, MediaError, MediaType, RequestContext,
    };
    pub use halcyon_metadata::{
        coerce, EntityMetadata, Metadata, TermType,
    };
    pub use halcyon_resource::{
        CollectionResource, Entity, EntityProperties, EntityProperty,
        EntityResource, Payload, RESTResource, Record, RecordProperty,
        RecordValue,
    };
}
