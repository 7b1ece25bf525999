//! Command registries: name → command lookup.
//!
//! [`CommandRegistry`] is the plain table; [`AggregateRegistry`] chains
//! several sources and answers from the first that knows the name. Both
//! are built at startup and shared read-only, like the metadata and
//! state tables.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{CommandError, InteractionCommand, NamedCommand};

/// Read-only lookup surface shared by the plain and aggregate
/// registries.
pub trait CommandSource: Send + Sync {
    /// Fetches the command bound to a name.
    fn fetch(&self, name: &str) -> Option<Arc<dyn InteractionCommand>>;

    /// Whether a command is bound to the name.
    fn is_registered(&self, name: &str) -> bool {
        self.fetch(name).is_some()
    }

    /// The registered names, for enumeration and duplicate checks.
    fn names(&self) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// CommandRegistry
// ---------------------------------------------------------------------------

/// A startup-built name → command table. Duplicate names are rejected
/// at registration.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn InteractionCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a command to a name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        command: Arc<dyn InteractionCommand>,
    ) -> Result<(), CommandError> {
        let name = name.into();
        if self.commands.contains_key(&name) {
            return Err(CommandError::DuplicateName {
                name,
                registered: self.commands.len(),
            });
        }
        self.commands.insert(name, command);
        Ok(())
    }

    /// Binds a named command.
    pub fn add(&mut self, named: NamedCommand) -> Result<(), CommandError> {
        let (name, command) = named.into_parts();
        self.register(name, command)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandSource for CommandRegistry {
    fn fetch(&self, name: &str) -> Option<Arc<dyn InteractionCommand>> {
        tracing::debug!(name, "looking up interaction command");
        let command = self.commands.get(name).cloned();
        if command.is_none() {
            tracing::error!(name, "no command bound to name");
        }
        command
    }

    fn is_registered(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// AggregateRegistry
// ---------------------------------------------------------------------------

/// An ordered chain of command sources. Lookup asks each element in
/// order and returns the first hit, so earlier elements shadow later
/// ones unless built with [`AggregateRegistry::strict`].
#[derive(Default)]
pub struct AggregateRegistry {
    elements: Vec<Arc<dyn CommandSource>>,
}

impl AggregateRegistry {
    /// Chains sources, allowing the same name in several elements;
    /// the first element wins on lookup.
    pub fn new(
        elements: impl IntoIterator<Item = Arc<dyn CommandSource>>,
    ) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// Chains sources, rejecting any name already served by an earlier
    /// element. The error reports the 1-based element that collided.
    pub fn strict(
        elements: impl IntoIterator<Item = Arc<dyn CommandSource>>,
    ) -> Result<Self, CommandError> {
        let mut aggregate = Self::default();
        for element in elements {
            for name in element.names() {
                if aggregate.is_registered(&name) {
                    return Err(CommandError::DuplicateAcrossElements {
                        name,
                        element: aggregate.elements.len() + 1,
                    });
                }
            }
            aggregate.elements.push(element);
        }
        Ok(aggregate)
    }
}

impl CommandSource for AggregateRegistry {
    fn fetch(&self, name: &str) -> Option<Arc<dyn InteractionCommand>> {
        self.elements
            .iter()
            .find_map(|element| element.fetch(name))
    }

    fn is_registered(&self, name: &str) -> bool {
        self.elements
            .iter()
            .any(|element| element.is_registered(name))
    }

    fn names(&self) -> Vec<String> {
        self.elements
            .iter()
            .flat_map(|element| element.names())
            .collect()
    }
}
