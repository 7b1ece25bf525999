//! End-to-end engine behavior: request in, hypermedia document out.

use std::sync::Arc;

use halcyon::prelude::*;
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// View command that loads a fixed customer and links it to itself.
struct GetCustomerCommand;

impl InteractionCommand for GetCustomerCommand {
    fn execute(
        &self,
        context: &mut InteractionContext,
    ) -> Result<CommandOutcome, CommandError> {
        let Some(id) = context.first_path_parameter("id") else {
            return Ok(CommandOutcome::Failure);
        };
        let mut properties = EntityProperties::new();
        properties.set_property(EntityProperty::new("name", json!("Ada")));
        properties.set_property(EntityProperty::new("age", json!(36)));
        let resource = EntityResource::from_entity(Entity::new(
            "Customer",
            properties,
        ))
        .link(Link::new("self", format!("/customers/{id}")));
        context.set_resource(resource.into());
        Ok(CommandOutcome::Success)
    }
}

/// Command that echoes the decoded inbound entity back out.
struct PutCustomerCommand;

impl InteractionCommand for PutCustomerCommand {
    fn execute(
        &self,
        context: &mut InteractionContext,
    ) -> Result<CommandOutcome, CommandError> {
        match context.get_resource() {
            Some(_) => Ok(CommandOutcome::Success),
            None => Ok(CommandOutcome::Failure),
        }
    }
}

fn engine() -> Engine {
    init_tracing();

    let metadata = Arc::new(
        Metadata::builder()
            .entity(
                EntityMetadata::new("Customer")
                    .declare("name", TermType::Text)
                    .declare("age", TermType::Number),
            )
            .build(),
    );

    let states = Arc::new(
        ResourceStateRegistry::builder()
            .state(
                ResourceState::new("customer", "Customer", "/customers/{id}")
                    .methods(["GET"])
                    .view_action(Action::new("GetCustomer")),
            )
            .state(
                ResourceState::new(
                    "customer_update",
                    "Customer",
                    "/customers/{id}",
                )
                .methods(["PUT"])
                .view_action(Action::new("PutCustomer")),
            )
            .state(
                ResourceState::new(
                    "customer_gate",
                    "Customer",
                    "/customers/{id}/gate",
                )
                .methods(["GET"])
                .view_action(
                    Action::new("Match")
                        .property("Expression", "{id}='42'"),
                ),
            )
            .build()
            .unwrap(),
    );

    let mut commands = CommandRegistry::new();
    commands
        .add(NamedCommand::new("GetCustomer", Arc::new(GetCustomerCommand)))
        .unwrap();
    commands
        .add(NamedCommand::new("PutCustomer", Arc::new(PutCustomerCommand)))
        .unwrap();
    commands
        .add(NamedCommand::with_default_name(MatchCommand))
        .unwrap();

    Engine::new(metadata, states, Arc::new(commands))
}

#[test]
fn test_get_renders_hal_document() {
    let engine = engine();
    let context = RequestContext::new("GET", "/customers/1")
        .path_parameter("id", "1");

    let response = engine.handle(MediaType::HalJson, &context, None);

    assert_eq!(response.status, 200);
    let document: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(document["_links"]["self"][0]["href"], "/customers/1");
    assert_eq!(document["name"], json!("Ada"));
    assert_eq!(document["age"], json!(36));
}

#[test]
fn test_put_decodes_body_before_dispatch() {
    let engine = engine();
    let context = RequestContext::new("PUT", "/customers/1")
        .path_parameter("id", "1");
    let body = br#"{"name": "Grace", "age": "45"}"#;

    let response =
        engine.handle(MediaType::HalJson, &context, Some(body));
    assert_eq!(response.status, 200);
}

#[test]
fn test_malformed_body_is_bad_request() {
    let engine = engine();
    let context = RequestContext::new("PUT", "/customers/1")
        .path_parameter("id", "1");

    let response =
        engine.handle(MediaType::HalJson, &context, Some(b"{broken"));
    assert_eq!(response.status, 400);
    assert!(response.body.is_empty());
}

#[test]
fn test_unknown_path_is_not_found() {
    let engine = engine();
    let context = RequestContext::new("GET", "/widgets/7");
    let response = engine.handle(MediaType::HalJson, &context, None);
    assert_eq!(response.status, 404);
}

#[test]
fn test_match_command_gates_a_state() {
    let engine = engine();

    let open = RequestContext::new("GET", "/customers/42/gate")
        .path_parameter("id", "42");
    assert_eq!(engine.handle(MediaType::HalJson, &open, None).status, 200);

    let closed = RequestContext::new("GET", "/customers/7/gate")
        .path_parameter("id", "7");
    assert_eq!(engine.handle(MediaType::HalJson, &closed, None).status, 404);
}

#[test]
fn test_xml_media_type_renders_xml() {
    let engine = engine();
    let context = RequestContext::new("GET", "/customers/1")
        .path_parameter("id", "1");

    let response = engine.handle(MediaType::HalXml, &context, None);
    assert_eq!(response.status, 200);
    let text = String::from_utf8(response.body).unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.contains("<resource"));
    assert!(text.contains("<name>Ada</name>"));
}
