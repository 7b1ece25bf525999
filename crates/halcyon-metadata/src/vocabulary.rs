//! Entity metadata: the declared property vocabulary of each entity type.
//!
//! A vocabulary is the closed set of property names an entity type may
//! carry on the wire, each with a semantic type. The codec consults it on
//! every encode and decode: a property that is not declared here is never
//! emitted and never read, regardless of its value.
//!
//! Vocabularies are configuration, not data. They are built once at
//! startup through [`MetadataBuilder`], then shared read-only (typically
//! behind an `Arc`) by every concurrent request for the life of the
//! process.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TermType
// ---------------------------------------------------------------------------

/// The semantic type of a declared property.
///
/// The wire carries strings; `TermType` says how to interpret them.
/// Anything that is not text or a number is treated as opaque text by
/// the coercion rules — the vocabulary still has to declare it for the
/// property to appear on the wire at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TermType {
    /// Free text; values pass through unconverted.
    #[default]
    Text,
    /// A 64-bit integer; malformed values fail coercion.
    Number,
    /// Any other declared type; treated as opaque text.
    Other,
}

// ---------------------------------------------------------------------------
// EntityMetadata
// ---------------------------------------------------------------------------

/// The declared vocabulary of one entity type.
///
/// Property names are unique within an entity type. Lookups are the hot
/// path of the codec, so the map is kept flat; iteration order follows
/// the property name (BTreeMap) to make encoded documents reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    entity_name: String,
    vocabulary: BTreeMap<String, TermType>,
}

impl EntityMetadata {
    /// Creates an empty vocabulary for the named entity type.
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            vocabulary: BTreeMap::new(),
        }
    }

    /// The entity type this vocabulary belongs to.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Declares a property. Redeclaring a name replaces the earlier term.
    pub fn declare(mut self, property: impl Into<String>, term: TermType) -> Self {
        self.vocabulary.insert(property.into(), term);
        self
    }

    /// Looks up the declared term for a property, `None` if undeclared.
    pub fn vocabulary(&self, property: &str) -> Option<TermType> {
        self.vocabulary.get(property).copied()
    }

    /// Returns `true` if the property is declared as text.
    pub fn is_text(&self, property: &str) -> bool {
        self.vocabulary(property) == Some(TermType::Text)
    }

    /// Returns `true` if the property is declared as a number.
    pub fn is_number(&self, property: &str) -> bool {
        self.vocabulary(property) == Some(TermType::Number)
    }

    /// Iterates the declared property names.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// The process-wide metadata table: entity type name → vocabulary.
///
/// Immutable once built. Every entity type reachable at runtime must be
/// registered here before the first request — the encoder treats a miss
/// as a configuration fault, not a client problem.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    entities: HashMap<String, EntityMetadata>,
}

impl Metadata {
    /// Starts building a metadata table.
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::default()
    }

    /// Looks up the vocabulary for an entity type.
    pub fn entity_metadata(&self, entity_name: &str) -> Option<&EntityMetadata> {
        self.entities.get(entity_name)
    }
}

/// Builder for the startup-time [`Metadata`] table.
#[derive(Debug, Default)]
pub struct MetadataBuilder {
    entities: HashMap<String, EntityMetadata>,
}

impl MetadataBuilder {
    /// Registers one entity type's vocabulary. Registering the same
    /// entity name twice replaces the earlier vocabulary.
    pub fn entity(mut self, metadata: EntityMetadata) -> Self {
        self.entities
            .insert(metadata.entity_name().to_string(), metadata);
        self
    }

    /// Finishes the table.
    pub fn build(self) -> Metadata {
        Metadata {
            entities: self.entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> EntityMetadata {
        EntityMetadata::new("Customer")
            .declare("name", TermType::Text)
            .declare("age", TermType::Number)
            .declare("joined", TermType::Other)
    }

    #[test]
    fn test_vocabulary_lookup() {
        let md = customer();
        assert_eq!(md.vocabulary("name"), Some(TermType::Text));
        assert_eq!(md.vocabulary("age"), Some(TermType::Number));
        assert_eq!(md.vocabulary("joined"), Some(TermType::Other));
        assert_eq!(md.vocabulary("undeclared"), None);
    }

    #[test]
    fn test_is_text_and_is_number() {
        let md = customer();
        assert!(md.is_text("name"));
        assert!(!md.is_text("age"));
        assert!(md.is_number("age"));
        assert!(!md.is_number("joined"));
        assert!(!md.is_number("undeclared"));
    }

    #[test]
    fn test_redeclare_replaces_term() {
        let md = customer().declare("age", TermType::Text);
        assert!(md.is_text("age"));
    }

    #[test]
    fn test_metadata_table_lookup() {
        let metadata = Metadata::builder().entity(customer()).build();
        assert!(metadata.entity_metadata("Customer").is_some());
        assert!(metadata.entity_metadata("Order").is_none());
    }

    #[test]
    fn test_property_names_are_ordered() {
        let vocabulary = customer();
        let names: Vec<&str> = vocabulary.property_names().collect();
        assert_eq!(names, vec!["age", "joined", "name"]);
    }
}
