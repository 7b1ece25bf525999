//! Entity metadata for Halcyon.
//!
//! This crate holds the two leaf concerns every codec call depends on:
//!
//! - **Vocabularies** ([`Metadata`], [`EntityMetadata`], [`TermType`]) —
//!   which property names are declared for an entity type and what each
//!   one means semantically.
//! - **Coercion** ([`coerce`]) — type-directed conversion between
//!   wire-string values and typed property values.
//!
//! Both are read-only after startup and safe to share across concurrent
//! requests without coordination.

mod coerce;
mod error;
mod vocabulary;

pub use coerce::coerce;
pub use error::MetadataError;
pub use vocabulary::{EntityMetadata, Metadata, MetadataBuilder, TermType};
