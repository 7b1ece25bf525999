//! Links and transitions: the outgoing edges of a resource.
//!
//! A [`Link`] is what ends up on the wire; a [`Transition`] is the state
//! machine edge that produced it. The back-reference from link to
//! transition is what lets the encoder recognise a resource's own
//! canonical address among several candidates — see the self-link
//! heuristic in the media layer.

use crate::ResourceState;

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// A directed edge between two resource states, carrying the command and
/// method that perform it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    source: ResourceState,
    target: ResourceState,
    command: String,
    method: Option<String>,
}

impl Transition {
    pub fn new(
        source: ResourceState,
        target: ResourceState,
        command: impl Into<String>,
    ) -> Self {
        Self {
            source,
            target,
            command: command.into(),
            method: None,
        }
    }

    /// Sets the HTTP method performing this transition.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn source(&self) -> &ResourceState {
        &self.source
    }

    pub fn target(&self) -> &ResourceState {
        &self.target
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn get_method(&self) -> Option<&str> {
        self.method.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Link
// ---------------------------------------------------------------------------

/// A hyperlink attached to a resource.
///
/// The relation string may name several simultaneous relations separated
/// by spaces (`"item self"`); [`Link::rels`] splits them. Splitting is
/// purely syntactic — each relation points at the same href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    id: Option<String>,
    rel: String,
    href: String,
    title: Option<String>,
    method: Option<String>,
    transition: Option<Transition>,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: None,
            rel: rel.into(),
            href: href.into(),
            title: None,
            method: None,
            transition: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Records the transition this link was generated from.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The raw relation string, possibly space-separated.
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// The individual relations this link represents.
    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.rel.split_whitespace()
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn get_method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn get_transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }
}
