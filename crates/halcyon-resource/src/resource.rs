//! REST resources: what command handlers hand to the codec.
//!
//! A resource is either a single entity with its links and embedded
//! sub-resources, or an ordered collection of such entities sharing one
//! entity type. The payload of an entity resource is a closed sum over
//! exactly three kinds — raw protocol record, domain entity, or plain
//! reflected object — so the encoder dispatches with a `match` instead
//! of open-ended type inspection.

use halcyon_hypermedia::{Link, Transition};
use serde::Serialize;
use serde_json::Value;

use crate::{Entity, Record, ResourceError};

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The payload kinds an entity resource can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A raw protocol record, flattened against the vocabulary.
    Record(Record),
    /// A domain entity, copied property by property.
    Entity(Entity),
    /// A plain object reflected into JSON at construction time.
    Object(Value),
}

// ---------------------------------------------------------------------------
// EntityResource
// ---------------------------------------------------------------------------

/// One addressable resource: payload, outgoing links, and embedded
/// sub-resources keyed by the transition that pulled them in.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityResource {
    entity_name: String,
    payload: Option<Payload>,
    links: Vec<Link>,
    embedded: Vec<(Transition, RESTResource)>,
}

impl EntityResource {
    /// A resource with no payload; encodes to an empty document.
    pub fn empty(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            payload: None,
            links: Vec::new(),
            embedded: Vec::new(),
        }
    }

    pub fn from_record(record: Record) -> Self {
        let entity_name = record.name().to_string();
        Self {
            entity_name,
            payload: Some(Payload::Record(record)),
            links: Vec::new(),
            embedded: Vec::new(),
        }
    }

    pub fn from_entity(entity: Entity) -> Self {
        let entity_name = entity.name().to_string();
        Self {
            entity_name,
            payload: Some(Payload::Entity(entity)),
            links: Vec::new(),
            embedded: Vec::new(),
        }
    }

    /// Reflects a plain object into its property map. The one place the
    /// resource layer can fail: an object whose serialization errors is
    /// rejected here rather than surfacing mid-encode.
    pub fn from_object<T: Serialize>(
        entity_name: impl Into<String>,
        object: &T,
    ) -> Result<Self, ResourceError> {
        let reflected = serde_json::to_value(object)?;
        Ok(Self {
            entity_name: entity_name.into(),
            payload: Some(Payload::Object(reflected)),
            links: Vec::new(),
            embedded: Vec::new(),
        })
    }

    /// Attaches an outgoing link.
    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Embeds a sub-resource reached by `transition`.
    pub fn embed(mut self, transition: Transition, resource: RESTResource) -> Self {
        self.embedded.push((transition, resource));
        self
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn embedded(&self) -> &[(Transition, RESTResource)] {
        &self.embedded
    }
}

// ---------------------------------------------------------------------------
// CollectionResource
// ---------------------------------------------------------------------------

/// An ordered collection of entity resources sharing one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionResource {
    entity_name: String,
    entities: Vec<EntityResource>,
    links: Vec<Link>,
}

impl CollectionResource {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            entities: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn entity(mut self, resource: EntityResource) -> Self {
        self.entities.push(resource);
        self
    }

    /// Attaches a collection-level link.
    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn entities(&self) -> &[EntityResource] {
        &self.entities
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

// ---------------------------------------------------------------------------
// RESTResource
// ---------------------------------------------------------------------------

/// Which of the two resource variants a value is — the shape the codec
/// facade's applicability predicates are keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Entity,
    Collection,
}

/// The two resource variants the codec understands.
#[derive(Debug, Clone, PartialEq)]
pub enum RESTResource {
    Entity(EntityResource),
    Collection(CollectionResource),
}

impl RESTResource {
    /// The entity type name this resource exposes.
    pub fn entity_name(&self) -> &str {
        match self {
            RESTResource::Entity(resource) => resource.entity_name(),
            RESTResource::Collection(collection) => collection.entity_name(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            RESTResource::Entity(_) => ResourceKind::Entity,
            RESTResource::Collection(_) => ResourceKind::Collection,
        }
    }

    /// Whether the resource carries a payload at all. A collection
    /// always does (possibly empty); an entity resource may not.
    pub fn has_payload(&self) -> bool {
        match self {
            RESTResource::Entity(resource) => resource.payload().is_some(),
            RESTResource::Collection(_) => true,
        }
    }

    /// The resource's outgoing links.
    pub fn links(&self) -> &[Link] {
        match self {
            RESTResource::Entity(resource) => resource.links(),
            RESTResource::Collection(collection) => collection.links(),
        }
    }

    /// The embedded sub-resources; collections carry none.
    pub fn embedded(&self) -> &[(Transition, RESTResource)] {
        match self {
            RESTResource::Entity(resource) => resource.embedded(),
            RESTResource::Collection(_) => &[],
        }
    }
}

impl From<EntityResource> for RESTResource {
    fn from(resource: EntityResource) -> Self {
        RESTResource::Entity(resource)
    }
}

impl From<CollectionResource> for RESTResource {
    fn from(collection: CollectionResource) -> Self {
        RESTResource::Collection(collection)
    }
}
