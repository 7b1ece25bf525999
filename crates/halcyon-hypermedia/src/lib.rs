//! Hypermedia model for Halcyon.
//!
//! This crate defines the vocabulary of the hypermedia state machine as
//! the codec sees it:
//!
//! - **Model** ([`Link`], [`Transition`], [`ResourceState`], [`Event`],
//!   [`Action`]) — links, the transitions that produce them, and the
//!   declared states they connect.
//! - **Provider** ([`ResourceStateProvider`], [`ResourceStateRegistry`])
//!   — the read-only query surface over the declared state table.
//! - **Resolver** ([`resolve_entity_name`]) — the two-phase algorithm
//!   that maps a concrete request path back onto a declared entity type.
//!
//! Nothing here performs I/O; the full transition algebra of the state
//! machine lives outside this crate.

mod error;
mod link;
mod provider;
mod resolver;
mod state;

pub use error::HypermediaError;
pub use link::{Link, Transition};
pub use provider::{
    ResourceStateProvider, ResourceStateRegistry, ResourceStateRegistryBuilder,
};
pub use resolver::{canonicalize_path, resolve_entity_name};
pub use state::{Action, Event, ResourceState, DEFAULT_ID_PATH_ELEMENT};
