//! The resource-state provider contract and its default registry.
//!
//! The codec does not own the state machine; it consumes a read-only
//! view of it through [`ResourceStateProvider`]. The default
//! implementation, [`ResourceStateRegistry`], is a startup-built table
//! shared immutably across requests.

use std::collections::HashMap;

use crate::{Event, HypermediaError, ResourceState};

/// Read-only query surface of the declared resource states.
///
/// `states_by_path` exposes the full `(path, state names)` table for the
/// resolver's fallback scan. The slice is in **declaration order** — the
/// fallback matcher awards ties to the first-declared state, so the
/// order a provider reports here is part of its contract.
pub trait ResourceStateProvider: Send + Sync {
    /// Determines the concrete state a template-shaped path and event
    /// refer to. This is the deterministic, preferred phase of entity
    /// resolution; `None` sends the resolver into its fallback scan.
    fn determine(&self, event: &Event, path: &str) -> Option<&ResourceState>;

    /// Looks up a state by its declared name.
    fn state_by_name(&self, name: &str) -> Option<&ResourceState>;

    /// The declared `(path, state names)` table, in declaration order.
    fn states_by_path(&self) -> &[(String, Vec<String>)];
}

// ---------------------------------------------------------------------------
// ResourceStateRegistry
// ---------------------------------------------------------------------------

/// Default [`ResourceStateProvider`]: an immutable table built once at
/// startup via [`ResourceStateRegistryBuilder`].
#[derive(Debug, Default)]
pub struct ResourceStateRegistry {
    by_name: HashMap<String, ResourceState>,
    by_path: Vec<(String, Vec<String>)>,
}

impl ResourceStateRegistry {
    pub fn builder() -> ResourceStateRegistryBuilder {
        ResourceStateRegistryBuilder::default()
    }
}

impl ResourceStateProvider for ResourceStateRegistry {
    fn determine(&self, event: &Event, path: &str) -> Option<&ResourceState> {
        for (declared_path, names) in &self.by_path {
            if declared_path != path {
                continue;
            }
            for name in names {
                if let Some(state) = self.by_name.get(name) {
                    if state.accepts_method(event.method()) {
                        return Some(state);
                    }
                }
            }
        }
        None
    }

    fn state_by_name(&self, name: &str) -> Option<&ResourceState> {
        self.by_name.get(name)
    }

    fn states_by_path(&self) -> &[(String, Vec<String>)] {
        &self.by_path
    }
}

/// Builder for [`ResourceStateRegistry`]. Declaration order is preserved
/// and duplicate state names are rejected at build time.
#[derive(Debug, Default)]
pub struct ResourceStateRegistryBuilder {
    states: Vec<ResourceState>,
}

impl ResourceStateRegistryBuilder {
    /// Declares a state. Order of declaration decides fallback-scan
    /// priority.
    pub fn state(mut self, state: ResourceState) -> Self {
        self.states.push(state);
        self
    }

    /// Validates and builds the registry.
    pub fn build(self) -> Result<ResourceStateRegistry, HypermediaError> {
        let mut by_name = HashMap::with_capacity(self.states.len());
        let mut by_path: Vec<(String, Vec<String>)> = Vec::new();

        for state in self.states {
            let name = state.name().to_string();
            let path = state.path().to_string();
            if by_name.contains_key(&name) {
                return Err(HypermediaError::DuplicateState { name });
            }
            match by_path.iter_mut().find(|(p, _)| *p == path) {
                Some((_, names)) => names.push(name.clone()),
                None => by_path.push((path, vec![name.clone()])),
            }
            by_name.insert(name, state);
        }

        Ok(ResourceStateRegistry { by_name, by_path })
    }
}
