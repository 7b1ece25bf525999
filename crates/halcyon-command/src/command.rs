//! The interaction command contract and its execution context.
//!
//! A command is one unit of application behavior bound to a resource
//! state. Commands are registered once at startup and executed
//! concurrently afterwards, so implementations must be `Send + Sync`
//! and keep their mutable state inside the per-request context.

use std::collections::HashMap;

use halcyon_hypermedia::ResourceState;
use halcyon_resource::RESTResource;

use crate::CommandError;

/// What a command execution reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    Failure,
}

/// One unit of application behavior, dispatched by name.
pub trait InteractionCommand: Send + Sync {
    /// Runs the command against the per-request context. Business-level
    /// "no" is [`CommandOutcome::Failure`]; `Err` is reserved for
    /// conditions the command cannot express as an outcome.
    fn execute(
        &self,
        context: &mut InteractionContext,
    ) -> Result<CommandOutcome, CommandError>;

    /// The name this command prefers to register under, when the caller
    /// does not pick one. `None` defers to the type-name convention —
    /// see [`NamedCommand`](crate::NamedCommand).
    fn declared_name(&self) -> Option<&str> {
        None
    }
}

/// Per-request execution state handed through a command.
///
/// Carries the matched path and query parameters, the resource state
/// being interacted with, and a slot for the resource the command
/// produces (or consumes, for inbound payloads).
#[derive(Default)]
pub struct InteractionContext {
    path_parameters: HashMap<String, Vec<String>>,
    query_parameters: HashMap<String, Vec<String>>,
    current_state: Option<ResourceState>,
    resource: Option<RESTResource>,
}

impl InteractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one matched path-parameter value.
    pub fn path_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.path_parameters
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Records one query-parameter value.
    pub fn query_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.query_parameters
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Sets the resource state this interaction targets.
    pub fn current_state(mut self, state: ResourceState) -> Self {
        self.current_state = Some(state);
        self
    }

    /// Seeds the resource slot (the decoded inbound payload, typically).
    pub fn resource(mut self, resource: RESTResource) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn path_parameters(&self) -> &HashMap<String, Vec<String>> {
        &self.path_parameters
    }

    pub fn query_parameters(&self) -> &HashMap<String, Vec<String>> {
        &self.query_parameters
    }

    /// The first value of a path parameter.
    pub fn first_path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// The first value of a query parameter.
    pub fn first_query_parameter(&self, name: &str) -> Option<&str> {
        self.query_parameters
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_current_state(&self) -> Option<&ResourceState> {
        self.current_state.as_ref()
    }

    pub fn get_resource(&self) -> Option<&RESTResource> {
        self.resource.as_ref()
    }

    /// Stores the resource a command produced.
    pub fn set_resource(&mut self, resource: RESTResource) {
        self.resource = Some(resource);
    }

    /// Takes the produced resource out of the context.
    pub fn take_resource(&mut self) -> Option<RESTResource> {
        self.resource.take()
    }
}
