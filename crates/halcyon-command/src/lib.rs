//! Command layer for Halcyon.
//!
//! Application behavior plugs into the framework as named
//! [`InteractionCommand`]s:
//!
//! - [`CommandRegistry`] / [`AggregateRegistry`] — name → command
//!   lookup, built at startup, shared read-only.
//! - [`NamedCommand`] — the naming convention for registration.
//! - [`MatchCommand`] — the built-in expression matcher.

mod command;
mod error;
mod match_command;
mod naming;
mod registry;

pub use command::{CommandOutcome, InteractionCommand, InteractionContext};
pub use error::CommandError;
pub use match_command::MatchCommand;
pub use naming::NamedCommand;
pub use registry::{AggregateRegistry, CommandRegistry, CommandSource};
