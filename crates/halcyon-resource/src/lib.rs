//! Resource model for Halcyon.
//!
//! Everything the codec consumes or produces lives here:
//!
//! - **Entities** ([`Entity`], [`EntityProperties`], [`EntityProperty`])
//!   — flat, typed property bags.
//! - **Records** ([`Record`], [`RecordValue`]) — raw protocol payloads
//!   with nested structure.
//! - **Resources** ([`RESTResource`], [`EntityResource`],
//!   [`CollectionResource`], [`Payload`]) — the resource graph handed
//!   across the codec boundary, transient and consumed once.

mod entity;
mod error;
mod record;
mod resource;

pub use entity::{Entity, EntityProperties, EntityProperty};
pub use error::ResourceError;
pub use record::{Record, RecordProperty, RecordValue};
pub use resource::{
    CollectionResource, EntityResource, Payload, RESTResource, ResourceKind,
};
