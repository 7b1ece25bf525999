//! Command naming: pairing a command with the name it registers under.
//!
//! The default name is a three-tier convention, evaluated at pairing
//! time: an explicit name wins, then the command's own
//! [`declared_name`](crate::InteractionCommand::declared_name) hook,
//! then the bare type name with a trailing `Command` stripped. The
//! convention is a convenience for one-off commands; anything reused
//! across projects is better registered with an explicit name.

use std::sync::Arc;

use crate::InteractionCommand;

/// A command and the name it registers under.
#[derive(Clone)]
pub struct NamedCommand {
    name: String,
    command: Arc<dyn InteractionCommand>,
}

impl NamedCommand {
    /// Pairs a command with an explicit name.
    pub fn new(
        name: impl Into<String>,
        command: Arc<dyn InteractionCommand>,
    ) -> Self {
        Self {
            name: name.into(),
            command,
        }
    }

    /// Pairs a command with its conventional default name.
    pub fn with_default_name<C>(command: C) -> Self
    where
        C: InteractionCommand + 'static,
    {
        let name = command
            .declared_name()
            .map(str::to_string)
            .unwrap_or_else(|| type_default_name::<C>());
        Self {
            name,
            command: Arc::new(command),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &Arc<dyn InteractionCommand> {
        &self.command
    }

    pub fn into_parts(self) -> (String, Arc<dyn InteractionCommand>) {
        (self.name, self.command)
    }
}

/// The type-name tier of the convention: module path stripped, a
/// trailing `Command` removed — unless the bare name *is* `Command`,
/// which stays as is.
fn type_default_name<C>() -> String {
    let full = std::any::type_name::<C>();
    let bare = full.rsplit("::").next().unwrap_or(full);
    match bare.strip_suffix("Command") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => bare.to_string(),
    }
}
