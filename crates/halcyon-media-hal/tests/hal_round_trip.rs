//! End-to-end codec behavior: encode a resource graph to the wire,
//! read the document back, and check the guarantees that hold across
//! the whole pipeline.

use std::sync::Arc;

use halcyon_hypermedia::{
    Link, ResourceState, ResourceStateProvider, ResourceStateRegistry,
    Transition,
};
use halcyon_media_hal::{HalCodec, MediaError, MediaType, RequestContext};
use halcyon_metadata::{EntityMetadata, Metadata, TermType};
use halcyon_resource::{
    CollectionResource, Entity, EntityProperties, EntityProperty,
    EntityResource, RESTResource, Record, RecordProperty, RecordValue,
};
use serde_json::{json, Value};

fn metadata() -> Arc<Metadata> {
    Arc::new(
        Metadata::builder()
            .entity(
                EntityMetadata::new("Customer")
                    .declare("name", TermType::Text)
                    .declare("age", TermType::Number),
            )
            .entity(
                EntityMetadata::new("Order")
                    .declare("total", TermType::Number),
            )
            .build(),
    )
}

fn states() -> Arc<dyn ResourceStateProvider> {
    Arc::new(
        ResourceStateRegistry::builder()
            .state(ResourceState::new(
                "customer",
                "Customer",
                "/customers/{id}",
            ))
            .state(ResourceState::new("customers", "Customer", "/customers"))
            .build()
            .unwrap(),
    )
}

fn codec() -> HalCodec {
    HalCodec::new(metadata(), states())
}

fn ada() -> Entity {
    let mut props = EntityProperties::new();
    props.set_property(EntityProperty::new("name", json!("Ada")));
    props.set_property(EntityProperty::new("age", json!(36)));
    Entity::new("Customer", props)
}

fn write_context() -> RequestContext {
    RequestContext::new("GET", "/customers/1")
}

fn read_context() -> RequestContext {
    RequestContext::new("PUT", "/customers/1").path_parameter("id", "1")
}

#[test]
fn test_json_round_trip_preserves_declared_properties() {
    let codec = codec();
    let resource: RESTResource = EntityResource::from_entity(ada())
        .link(Link::new("self", "/customers/1"))
        .into();

    let bytes = codec
        .write_to(MediaType::HalJson, &write_context(), &resource)
        .unwrap();
    let decoded = codec
        .read_from(MediaType::HalJson, &read_context(), &bytes)
        .unwrap();

    let entity = match decoded.payload() {
        Some(halcyon_resource::Payload::Entity(entity)) => entity,
        other => panic!("unexpected payload {other:?}"),
    };
    assert_eq!(entity.name(), "Customer");
    assert_eq!(
        entity.properties().get_property("name").unwrap().value(),
        &json!("Ada")
    );
    assert_eq!(
        entity.properties().get_property("age").unwrap().value(),
        &json!(36)
    );
}

#[test]
fn test_xml_round_trip_coerces_numbers_back() {
    let codec = codec();
    let resource: RESTResource = EntityResource::from_entity(ada())
        .link(Link::new("self", "/customers/1"))
        .into();

    let bytes = codec
        .write_to(MediaType::HalXml, &write_context(), &resource)
        .unwrap();
    let decoded = codec
        .read_from(MediaType::HalXml, &read_context(), &bytes)
        .unwrap();

    let entity = match decoded.payload() {
        Some(halcyon_resource::Payload::Entity(entity)) => entity,
        other => panic!("unexpected payload {other:?}"),
    };
    // XML carries "36" as text; coercion restores the integer.
    assert_eq!(
        entity.properties().get_property("age").unwrap().value(),
        &json!(36)
    );
}

#[test]
fn test_undeclared_and_null_properties_never_reach_the_wire() {
    let mut props = EntityProperties::new();
    props.set_property(EntityProperty::new("name", json!("Ada")));
    props.set_property(EntityProperty::new("age", Value::Null));
    props.set_property(EntityProperty::new("password", json!("s3cret")));
    let resource: RESTResource =
        EntityResource::from_entity(Entity::new("Customer", props)).into();

    let bytes = codec()
        .write_to(MediaType::HalJson, &write_context(), &resource)
        .unwrap();
    let document: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(document["name"], json!("Ada"));
    assert!(document.get("age").is_none());
    assert!(document.get("password").is_none());
}

#[test]
fn test_at_most_one_self_link_and_no_duplicate_emission() {
    let customer = ResourceState::new("customer", "Customer", "/customers/{id}");
    let self_by_transition = Link::new("", "/customers/1").transition(
        Transition::new(customer.clone(), customer.clone(), "GETCustomer")
            .method("GET"),
    );
    let resource: RESTResource = EntityResource::from_entity(ada())
        .link(Link::new("item self", "/customers/1"))
        .link(self_by_transition)
        .link(Link::new("edit", "/customers/1/edit"))
        .into();

    let bytes = codec()
        .write_to(MediaType::HalJson, &write_context(), &resource)
        .unwrap();
    let document: Value = serde_json::from_slice(&bytes).unwrap();
    let links = document["_links"].as_object().unwrap();

    // Exactly one self entry, from the first qualifying link.
    assert_eq!(links["self"].as_array().unwrap().len(), 1);
    assert_eq!(links["self"][0]["href"], "/customers/1");
    // The chosen self link is skipped wholesale, its other relation
    // tokens included; the remaining links come through as usual.
    assert!(!links.contains_key("item"));
    assert!(links.contains_key("edit"));
}

#[test]
fn test_space_separated_relations_split_into_entries() {
    let resource: RESTResource = EntityResource::from_entity(ada())
        .link(Link::new("first prev", "/customers?page=1"))
        .into();

    let bytes = codec()
        .write_to(MediaType::HalJson, &write_context(), &resource)
        .unwrap();
    let document: Value = serde_json::from_slice(&bytes).unwrap();
    let links = document["_links"].as_object().unwrap();

    assert_eq!(links["first"][0]["href"], "/customers?page=1");
    assert_eq!(links["prev"][0]["href"], "/customers?page=1");
}

#[test]
fn test_collection_of_records_embeds_items() {
    let record = |name: &str, age: i64| {
        Record::new("Customer")
            .property(RecordProperty::new(
                "name",
                RecordValue::Simple(json!(name)),
            ))
            .property(RecordProperty::new(
                "age",
                RecordValue::Simple(json!(age)),
            ))
    };
    let collection: RESTResource = CollectionResource::new("Customer")
        .entity(EntityResource::from_record(record("Ada", 36)))
        .entity(EntityResource::from_record(record("Grace", 45)))
        .into();

    let context = RequestContext::new("GET", "/customers");
    let bytes = codec()
        .write_to(MediaType::HalJson, &context, &collection)
        .unwrap();
    let document: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(document["_links"]["self"][0]["href"], "/customers");
    let items = document["_embedded"]["item"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], json!("Ada"));
    assert_eq!(items[1]["age"], json!("45"));
    // Record members are unrooted: no per-item self link.
    assert!(items[0].get("_links").is_none());
}

#[test]
fn test_collection_of_objects_requires_member_self_links() {
    #[derive(serde::Serialize)]
    struct OrderBean {
        total: i64,
    }

    let with_self = EntityResource::from_object("Order", &OrderBean { total: 120 })
        .unwrap()
        .link(Link::new("self", "/orders/1"));
    let without_self =
        EntityResource::from_object("Order", &OrderBean { total: 7 }).unwrap();
    let collection: RESTResource = CollectionResource::new("Order")
        .entity(with_self)
        .entity(without_self)
        .into();

    let context = RequestContext::new("GET", "/orders");
    let bytes = codec()
        .write_to(MediaType::HalJson, &context, &collection)
        .unwrap();
    let document: Value = serde_json::from_slice(&bytes).unwrap();

    // The member without a self link is skipped, not failed.
    let members = document["_embedded"]["collection.Order"]
        .as_array()
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["_links"]["self"][0]["href"], "/orders/1");
    assert_eq!(members[0]["total"], json!(120));
}

#[test]
fn test_linkless_entity_has_no_links_section() {
    // {name: "Ada", age: 36} with no links and no base URI encodes to a
    // document with exactly two properties; reading it back yields the
    // same pairs.
    use halcyon_media_hal::build_representation;

    let resource: RESTResource = EntityResource::from_entity(ada()).into();
    let representation =
        build_representation(&metadata(), "", &resource).unwrap();
    let document = representation.to_hal_json();

    let object = document.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object.get("_links").is_none());
    assert_eq!(object["name"], json!("Ada"));
    assert_eq!(object["age"], json!(36));

    let bytes = serde_json::to_vec(&document).unwrap();
    let decoded = codec()
        .read_from(MediaType::HalJson, &read_context(), &bytes)
        .unwrap();
    let entity = match decoded.payload() {
        Some(halcyon_resource::Payload::Entity(entity)) => entity,
        other => panic!("unexpected payload {other:?}"),
    };
    assert_eq!(entity.properties().len(), 2);
    assert_eq!(
        entity.properties().get_property("age").unwrap().value(),
        &json!(36)
    );
}

#[test]
fn test_decode_rejects_malformed_json() {
    let error = codec()
        .read_from(MediaType::HalJson, &read_context(), b"{not json")
        .unwrap_err();
    assert_eq!(error.status_code(), 400);
}

#[test]
fn test_decode_rejects_unknown_path() {
    let context = RequestContext::new("PUT", "/widgets/9");
    let error = codec()
        .read_from(
            MediaType::HalJson,
            &context,
            br#"{"name": "Ada"}"#,
        )
        .unwrap_err();
    assert!(matches!(error, MediaError::EntityNotResolved { .. }));
    assert_eq!(error.status_code(), 400);
}

#[test]
fn test_decode_uses_document_self_link_over_request_path() {
    let body = br#"{
        "_links": { "self": { "href": "/customers/8" } },
        "name": "Ada",
        "age": "36"
    }"#;
    let context = RequestContext::new("PUT", "/somewhere/unrelated")
        .path_parameter("id", "8");
    let decoded = codec()
        .read_from(MediaType::HalJson, &context, body)
        .unwrap();
    assert_eq!(decoded.entity_name(), "Customer");
}

#[test]
fn test_plain_json_media_type_reuses_hal_shape() {
    let resource: RESTResource = EntityResource::from_entity(ada())
        .link(Link::new("self", "/customers/1"))
        .into();
    let hal = codec()
        .write_to(MediaType::HalJson, &write_context(), &resource)
        .unwrap();
    let plain = codec()
        .write_to(MediaType::Json, &write_context(), &resource)
        .unwrap();
    assert_eq!(hal, plain);
}
