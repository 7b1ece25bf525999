//! Raw protocol records: the structured, pre-domain payload kind.
//!
//! A [`Record`] is what a backing protocol adapter hands over before any
//! domain mapping has happened: named properties whose values may be
//! scalars, ordered collections, or nested complex structures. The
//! encoder flattens records property by property against the entity's
//! vocabulary; this module only models the shape.

use serde_json::Value;

/// The value of one record property.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A scalar; rendered as a string on the wire.
    Simple(Value),
    /// An ordered collection of values, flattened item by item.
    Collection(Vec<RecordValue>),
    /// A nested structure with its own declared sub-properties.
    Complex(Vec<RecordProperty>),
}

/// A named record property. `None` models an explicit null — the
/// encoder drops such properties from the wire document.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordProperty {
    name: String,
    value: Option<RecordValue>,
}

impl RecordProperty {
    pub fn new(name: impl Into<String>, value: RecordValue) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }

    /// A property present on the record but carrying no value.
    pub fn null(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&RecordValue> {
        self.value.as_ref()
    }
}

/// A raw protocol record: the record's type name plus its properties in
/// protocol order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    properties: Vec<RecordProperty>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn property(mut self, property: RecordProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[RecordProperty] {
        &self.properties
    }
}
