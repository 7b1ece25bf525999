//! Representation → domain entity.
//!
//! The decoder works out which entity type an inbound document is about
//! (self link first, request path second), then lifts every declared,
//! non-null document property through the coercion rules into a flat
//! [`Entity`]. Everything that can go wrong here is the client's fault;
//! the error variants reflect that.

use halcyon_hypermedia::{resolve_entity_name, Event, ResourceStateProvider};
use halcyon_metadata::{coerce, Metadata};
use halcyon_resource::{Entity, EntityProperties, EntityProperty};

use crate::{MediaError, Representation, RequestContext};

/// Assembles an entity from a parsed document.
pub fn build_entity_from_document(
    metadata: &Metadata,
    states: &dyn ResourceStateProvider,
    representation: &Representation,
    context: &RequestContext,
) -> Result<Entity, MediaError> {
    // The document's own self link names the resource it is about;
    // absent that, the request path does.
    let resource_path = representation
        .resource_href()
        .unwrap_or_else(|| context.path());
    tracing::info!(path = resource_path, "decoding inbound document");

    let resource_path = normalize_path(resource_path, context.get_base_uri());

    let event = Event::from_method(context.method());
    let entity_name = resolve_entity_name(
        states,
        &event,
        &resource_path,
        context.path_parameters(),
    )
    .ok_or(MediaError::EntityNotResolved {
        path: resource_path,
    })?;

    // A miss here means the client addressed an entity type we declare a
    // state for but no vocabulary; from the wire's point of view the
    // document is unusable.
    let vocabulary = metadata.entity_metadata(&entity_name).ok_or_else(|| {
        MediaError::Malformed(format!(
            "entity metadata could not be found [{entity_name}]"
        ))
    })?;

    let mut properties = EntityProperties::new();
    for (name, value) in representation.properties() {
        if vocabulary.vocabulary(name).is_none() {
            continue;
        }
        if value.is_null() {
            continue;
        }
        let coerced = coerce(vocabulary, name, Some(value))?;
        properties.set_property(EntityProperty::new(name, coerced));
    }

    Ok(Entity::new(entity_name, properties))
}

/// Strips a leading base-URI prefix and guarantees exactly one leading
/// separator.
fn normalize_path(resource_path: &str, base_uri: &str) -> String {
    let base = base_uri.trim_end_matches('/');
    let mut path = resource_path;
    if !base.is_empty() {
        if let Some(stripped) = path.strip_prefix(base) {
            // Only a whole path element counts as the base; "/based/x"
            // is not under "/base".
            if stripped.starts_with('/') {
                path = stripped;
            }
        }
    }
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_hypermedia::{ResourceState, ResourceStateRegistry};
    use halcyon_metadata::{EntityMetadata, TermType};
    use serde_json::json;
    use std::sync::Arc;

    fn metadata() -> Metadata {
        Metadata::builder()
            .entity(
                EntityMetadata::new("Customer")
                    .declare("name", TermType::Text)
                    .declare("age", TermType::Number),
            )
            .build()
    }

    fn states() -> Arc<dyn ResourceStateProvider> {
        let registry = ResourceStateRegistry::builder()
            .state(ResourceState::new(
                "customer",
                "Customer",
                "/customers/{id}",
            ))
            .build()
            .unwrap();
        Arc::new(registry)
    }

    fn context() -> RequestContext {
        RequestContext::new("PUT", "/customers/{id}")
    }

    #[test]
    fn test_decode_coerces_declared_properties() {
        let mut rep = Representation::unrooted();
        rep.add_property("name", json!("Ada"));
        rep.add_property("age", json!("36"));
        rep.add_property("undeclared", json!("dropped"));

        let entity = build_entity_from_document(
            &metadata(),
            states().as_ref(),
            &rep,
            &context(),
        )
        .unwrap();

        assert_eq!(entity.name(), "Customer");
        assert_eq!(
            entity.properties().get_property("name").unwrap().value(),
            &json!("Ada")
        );
        assert_eq!(
            entity.properties().get_property("age").unwrap().value(),
            &json!(36)
        );
        assert!(entity.properties().get_property("undeclared").is_none());
    }

    #[test]
    fn test_decode_prefers_document_self_link() {
        let rep = Representation::new("/customers/{id}");
        let context = RequestContext::new("PUT", "/somewhere/else/entirely");
        let entity = build_entity_from_document(
            &metadata(),
            states().as_ref(),
            &rep,
            &context,
        )
        .unwrap();
        assert_eq!(entity.name(), "Customer");
    }

    #[test]
    fn test_decode_unresolvable_path_is_client_error() {
        let rep = Representation::unrooted();
        let context = RequestContext::new("PUT", "/unknown/42");
        let error = build_entity_from_document(
            &metadata(),
            states().as_ref(),
            &rep,
            &context,
        )
        .unwrap_err();
        assert!(matches!(error, MediaError::EntityNotResolved { .. }));
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn test_decode_malformed_number_fails() {
        let mut rep = Representation::unrooted();
        rep.add_property("age", json!("not-a-number"));
        let error = build_entity_from_document(
            &metadata(),
            states().as_ref(),
            &rep,
            &context(),
        )
        .unwrap_err();
        assert!(matches!(error, MediaError::Coercion(_)));
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn test_normalize_strips_base_uri() {
        assert_eq!(
            normalize_path(
                "http://api.example.com/base/customers/1",
                "http://api.example.com/base/"
            ),
            "/customers/1"
        );
    }

    #[test]
    fn test_normalize_strips_base_uri_without_trailing_slash() {
        assert_eq!(
            normalize_path(
                "http://api.example.com/base/customers/1",
                "http://api.example.com/base"
            ),
            "/customers/1"
        );
    }

    #[test]
    fn test_normalize_handles_multibyte_base_uri() {
        assert_eq!(
            normalize_path(
                "http://api.example.com/café/customers/1",
                "http://api.example.com/café"
            ),
            "/customers/1"
        );
    }

    #[test]
    fn test_normalize_keeps_path_sharing_only_a_base_prefix() {
        assert_eq!(
            normalize_path(
                "http://api.example.com/based/customers/1",
                "http://api.example.com/base"
            ),
            "/http://api.example.com/based/customers/1"
        );
    }

    #[test]
    fn test_normalize_adds_missing_separator() {
        assert_eq!(normalize_path("customers/1", ""), "/customers/1");
    }

    #[test]
    fn test_normalize_leaves_unprefixed_path_alone() {
        assert_eq!(
            normalize_path("/customers/1", "http://api.example.com/base/"),
            "/customers/1"
        );
    }
}
