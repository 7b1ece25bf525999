//! Domain entities: named bags of typed properties.
//!
//! An [`Entity`] is what the decoder produces and what command handlers
//! exchange with the codec. It is deliberately flat — no links, no
//! embedded resources, just `(name, value)` pairs. Property names are
//! unique within an entity; the map is ordered by name so encoded
//! documents come out reproducible.

use std::collections::BTreeMap;

use serde_json::Value;

/// One property of an entity: a name and its typed value.
///
/// Values are held as JSON values; the metadata layer's coercion rules
/// decide whether a wire string becomes a string or an integer here.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityProperty {
    name: String,
    value: Value,
}

impl EntityProperty {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// The ordered property set of an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityProperties {
    properties: BTreeMap<String, EntityProperty>,
}

impl EntityProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property; a property with the same name is replaced.
    pub fn set_property(&mut self, property: EntityProperty) {
        self.properties
            .insert(property.name().to_string(), property);
    }

    pub fn get_property(&self, name: &str) -> Option<&EntityProperty> {
        self.properties.get(name)
    }

    /// Iterates properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityProperty> {
        self.properties.values()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A named domain entity. Immutable once handed to the codec; created
/// per request and never persisted by this subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    properties: EntityProperties,
}

impl Entity {
    pub fn new(name: impl Into<String>, properties: EntityProperties) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// The entity type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &EntityProperties {
        &self.properties
    }
}
