//! Resource states: the declared points of the hypermedia state machine.
//!
//! A resource state binds one entity type to one URL path template. The
//! set of states is configuration — declared once at startup, read-only
//! for the rest of the process. The codec never mutates a state; it only
//! asks "which state does this path belong to?" and "which entity type
//! does that state expose?".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The path parameter name assumed when a state does not declare one.
/// A template like `/customers/{id}` resolves against this default.
pub const DEFAULT_ID_PATH_ELEMENT: &str = "id";

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An interaction event: the trigger the state machine is asked about.
///
/// For inbound HTTP traffic the event is simply the request method; the
/// name defaults to the method when nothing more specific applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    method: String,
}

impl Event {
    /// Creates an event named after its HTTP method — the common case
    /// when decoding an inbound request.
    pub fn from_method(method: impl Into<String>) -> Self {
        let method = method.into();
        Self {
            name: method.clone(),
            method,
        }
    }

    /// Creates an event with a distinct name and method.
    pub fn new(name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: method.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A command binding on a resource state, with its configuration
/// properties. The view action of a state names the command that renders
/// it; its property bag carries command-specific settings (for example
/// the `Expression` evaluated by the match command).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    name: String,
    properties: HashMap<String, String>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
        }
    }

    /// Adds a configuration property.
    pub fn property(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The command name this action dispatches to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// ResourceState
// ---------------------------------------------------------------------------

/// A declared resource state: entity type + path template.
///
/// `path` is template-shaped (`/customers/{id}`), never value-shaped.
/// `path_id_parameter` overrides the placeholder name the fallback
/// matcher substitutes; when unset, [`DEFAULT_ID_PATH_ELEMENT`] applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    name: String,
    entity_name: String,
    path: String,
    path_id_parameter: Option<String>,
    methods: Vec<String>,
    view_action: Option<Action>,
}

impl ResourceState {
    /// Declares a state exposing `entity_name` at `path`.
    pub fn new(
        name: impl Into<String>,
        entity_name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            entity_name: entity_name.into(),
            path: path.into(),
            path_id_parameter: None,
            methods: Vec::new(),
            view_action: None,
        }
    }

    /// Overrides the path-id parameter name used by the fallback matcher.
    pub fn path_id_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.path_id_parameter = Some(parameter.into());
        self
    }

    /// Restricts the state to the given HTTP methods. A state with no
    /// declared methods accepts any event.
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods
            .into_iter()
            .map(|m| m.into().to_ascii_uppercase())
            .collect();
        self
    }

    /// Sets the view action dispatched when this state is rendered.
    pub fn view_action(mut self, action: Action) -> Self {
        self.view_action = Some(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The declared path-id parameter, if any.
    pub fn path_id(&self) -> Option<&str> {
        self.path_id_parameter.as_deref()
    }

    pub fn get_view_action(&self) -> Option<&Action> {
        self.view_action.as_ref()
    }

    /// Returns `true` if the state accepts the given HTTP method.
    pub fn accepts_method(&self, method: &str) -> bool {
        self.methods.is_empty()
            || self
                .methods
                .iter()
                .any(|m| m.eq_ignore_ascii_case(method))
    }
}
