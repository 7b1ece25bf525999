//! Error types for the command layer.

/// Errors raised while building or executing commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A command name was registered twice in one registry. The count
    /// reports how many commands the registry held when the collision
    /// happened.
    #[error("duplicate command name '{name}' (registry has {registered} commands)")]
    DuplicateName { name: String, registered: usize },

    /// A strict aggregate found a name served by an earlier element.
    #[error("duplicate command '{name}' in element number {element}")]
    DuplicateAcrossElements { name: String, element: usize },

    /// A command failed in a way it could not express as a plain
    /// failure outcome.
    #[error("command '{name}' failed: {reason}")]
    Execution { name: String, reason: String },
}
