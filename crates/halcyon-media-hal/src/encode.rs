//! Resource graph → representation.
//!
//! The encoder walks a [`RESTResource`] and produces the generic
//! [`Representation`] the syntax renderers serialize. Two invariants hold
//! for every document it builds: a property appears only if it is both
//! declared in the entity type's vocabulary and non-null, and at most one
//! link is ever promoted to the document's canonical self address.

use halcyon_hypermedia::Link;
use halcyon_metadata::{EntityMetadata, Metadata};
use halcyon_resource::{
    Entity, EntityResource, Payload, RESTResource, Record, RecordValue,
};
use serde_json::{Map, Value};

use crate::{MediaError, Representation};

/// Upper bound on embedded-resource nesting. The resource graph is
/// caller-built; a graph deeper than this is treated as a structural
/// error rather than recursed into indefinitely.
pub const MAX_EMBED_DEPTH: usize = 32;

/// Encodes a resource graph into a representation rooted at `base_uri`.
pub fn build_representation(
    metadata: &Metadata,
    base_uri: &str,
    resource: &RESTResource,
) -> Result<Representation, MediaError> {
    encode_resource(metadata, base_uri, resource, 0)
}

fn encode_resource(
    metadata: &Metadata,
    base_uri: &str,
    resource: &RESTResource,
    depth: usize,
) -> Result<Representation, MediaError> {
    if depth > MAX_EMBED_DEPTH {
        return Err(MediaError::EmbedDepthExceeded {
            limit: MAX_EMBED_DEPTH,
        });
    }

    // A payload-less resource encodes to an empty document that still
    // names its own address.
    if !resource.has_payload() {
        return Ok(rooted_at(base_uri));
    }

    let mut representation = rooted_at(base_uri);

    let self_link = find_self_link(resource.links());
    if let Some(link) = self_link {
        representation.set_href(link.href());
    }

    for link in resource.links() {
        if self_link == Some(link) {
            continue;
        }
        for rel in link.rels() {
            tracing::debug!(rel, href = link.href(), "adding link");
            representation.add_link(
                rel,
                link.href(),
                link.get_id(),
                link.get_title(),
            );
        }
    }

    for (transition, sub_resource) in resource.embedded() {
        let Some(link) = resource
            .links()
            .iter()
            .find(|link| link.get_transition() == Some(transition))
        else {
            tracing::warn!(
                command = transition.command(),
                "no link found for embedded resource, skipping"
            );
            continue;
        };
        let rel = if link.rel().is_empty() {
            format!("embedded/{}", sub_resource.entity_name())
        } else {
            link.rel().to_string()
        };
        let child =
            encode_resource(metadata, base_uri, sub_resource, depth + 1)?;
        representation.add_representation(rel, child);
    }

    match resource {
        RESTResource::Entity(entity_resource) => {
            entity_properties(metadata, &mut representation, entity_resource)?;
        }
        RESTResource::Collection(collection) => {
            for member in collection.entities() {
                encode_member(
                    metadata,
                    &mut representation,
                    collection.entity_name(),
                    member,
                )?;
            }
        }
    }

    Ok(representation)
}

/// A document carrying no base URI stays unrooted; it then has no links
/// section at all unless the resource contributes one.
fn rooted_at(base_uri: &str) -> Representation {
    if base_uri.is_empty() {
        Representation::unrooted()
    } else {
        Representation::new(base_uri)
    }
}

// ---------------------------------------------------------------------------
// Self-link heuristic
// ---------------------------------------------------------------------------

/// Picks the resource's canonical self link, if any. A link qualifies
/// when its relation set carries the literal token `self`, or when its
/// originating transition is known, performs a safe read (no method, GET,
/// or HEAD), and loops back onto the same entity type. The first
/// qualifying link wins.
fn find_self_link(links: &[Link]) -> Option<&Link> {
    links.iter().find(|link| is_self_link(link))
}

fn is_self_link(link: &Link) -> bool {
    if link.rels().any(|rel| rel == "self") {
        return true;
    }
    let Some(transition) = link.get_transition() else {
        return false;
    };
    let safe_read = match transition.get_method() {
        None => true,
        Some(method) => {
            method.eq_ignore_ascii_case("GET")
                || method.eq_ignore_ascii_case("HEAD")
        }
    };
    safe_read
        && transition.target().entity_name()
            == transition.source().entity_name()
}

// ---------------------------------------------------------------------------
// Entity-resource properties
// ---------------------------------------------------------------------------

fn entity_properties(
    metadata: &Metadata,
    representation: &mut Representation,
    resource: &EntityResource,
) -> Result<(), MediaError> {
    let Some(payload) = resource.payload() else {
        return Ok(());
    };
    let vocabulary = lookup_vocabulary(metadata, resource.entity_name())?;
    match payload {
        Payload::Record(record) => {
            record_properties(vocabulary, representation, record);
        }
        Payload::Entity(entity) => {
            declared_entity_properties(vocabulary, representation, entity);
        }
        Payload::Object(value) => {
            object_properties(vocabulary, representation, value);
        }
    }
    Ok(())
}

fn lookup_vocabulary<'a>(
    metadata: &'a Metadata,
    entity_name: &str,
) -> Result<&'a EntityMetadata, MediaError> {
    metadata.entity_metadata(entity_name).ok_or_else(|| {
        MediaError::MetadataNotFound {
            entity: entity_name.to_string(),
        }
    })
}

/// Flattens a raw record: declared, non-null properties only.
fn record_properties(
    vocabulary: &EntityMetadata,
    representation: &mut Representation,
    record: &Record,
) {
    for property in record.properties() {
        let Some(value) = property.value() else {
            continue;
        };
        if vocabulary.vocabulary(property.name()).is_none() {
            continue;
        }
        representation
            .add_property(property.name(), flatten_value(vocabulary, value));
    }
}

/// Flattens one record value. Scalars become strings, collections become
/// arrays of flattened items, complex structures become nested maps of
/// their declared sub-properties.
fn flatten_value(vocabulary: &EntityMetadata, value: &RecordValue) -> Value {
    match value {
        RecordValue::Simple(raw) => Value::String(simple_text(raw)),
        RecordValue::Collection(items) => Value::Array(
            items
                .iter()
                .map(|item| flatten_value(vocabulary, item))
                .collect(),
        ),
        RecordValue::Complex(properties) => {
            let mut object = Map::new();
            for property in properties {
                let Some(value) = property.value() else {
                    continue;
                };
                if vocabulary.vocabulary(property.name()).is_none() {
                    continue;
                }
                object.insert(
                    property.name().to_string(),
                    flatten_value(vocabulary, value),
                );
            }
            Value::Object(object)
        }
    }
}

fn simple_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Copies a domain entity's declared, non-null properties straight
/// across. No type dispatch; the values were coerced when the entity was
/// built.
fn declared_entity_properties(
    vocabulary: &EntityMetadata,
    representation: &mut Representation,
    entity: &Entity,
) {
    for property in entity.properties().iter() {
        if vocabulary.vocabulary(property.name()).is_none() {
            continue;
        }
        if property.value().is_null() {
            continue;
        }
        representation.add_property(property.name(), property.value().clone());
    }
}

/// Attaches a reflected object's declared, non-null fields with their
/// raw values. A payload that reflected into something other than a map
/// has no readable fields; it is logged and contributes nothing.
fn object_properties(
    vocabulary: &EntityMetadata,
    representation: &mut Representation,
    value: &Value,
) {
    let Value::Object(fields) = value else {
        tracing::error!(
            entity = vocabulary.entity_name(),
            "object payload did not reflect into a field map"
        );
        return;
    };
    for (name, field) in fields {
        if vocabulary.vocabulary(name).is_none() {
            continue;
        }
        if field.is_null() {
            continue;
        }
        representation.add_property(name, field.clone());
    }
}

// ---------------------------------------------------------------------------
// Collection members
// ---------------------------------------------------------------------------

/// Encodes one collection member as an embedded sub-representation.
///
/// Record members go under the `item` relation, unrooted, with every
/// member link emitted relation by relation. Reflected-object members go
/// under `collection.<EntityType>` and require a resolvable self link —
/// a member without one is skipped, not failed. Domain-entity members
/// have no collection rendering.
fn encode_member(
    metadata: &Metadata,
    representation: &mut Representation,
    collection_entity_name: &str,
    member: &EntityResource,
) -> Result<(), MediaError> {
    let Some(payload) = member.payload() else {
        tracing::debug!(
            entity = member.entity_name(),
            "collection member without payload, skipping"
        );
        return Ok(());
    };
    match payload {
        Payload::Record(record) => {
            let mut child = Representation::unrooted();
            for link in member.links() {
                for rel in link.rels() {
                    child.add_link(
                        rel,
                        link.href(),
                        link.get_id(),
                        link.get_title(),
                    );
                }
            }
            let vocabulary =
                lookup_vocabulary(metadata, collection_entity_name)?;
            record_properties(vocabulary, &mut child, record);
            representation.add_representation("item", child);
        }
        Payload::Object(value) => {
            let Some(self_link) = find_self_link(member.links()) else {
                tracing::debug!(
                    entity = member.entity_name(),
                    "no self link on collection member, skipping"
                );
                return Ok(());
            };
            let mut child = Representation::new(self_link.href());
            for link in member.links() {
                if self_link == link {
                    continue;
                }
                child.add_link(
                    link.rel(),
                    link.href(),
                    link.get_id(),
                    link.get_title(),
                );
            }
            // Members render under the collection's vocabulary and
            // relation, whatever entity name the member carries.
            let vocabulary =
                lookup_vocabulary(metadata, collection_entity_name)?;
            object_properties(vocabulary, &mut child, value);
            representation.add_representation(
                format!("collection.{collection_entity_name}"),
                child,
            );
        }
        Payload::Entity(_) => {
            return Err(MediaError::UnsupportedPayload(format!(
                "domain entity '{}' as collection member",
                member.entity_name()
            )));
        }
    }
    Ok(())
}
