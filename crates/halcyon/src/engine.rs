//! The request engine: one interaction from inbound bytes to outbound
//! document.
//!
//! `Engine` ties the layers together: codec ← metadata + states,
//! commands ← registry. It is built once at startup and shared across
//! requests; `handle` holds no state beyond its own stack frame.

use std::sync::Arc;

use halcyon_command::{
    CommandOutcome, CommandSource, InteractionContext,
};
use halcyon_hypermedia::{canonicalize_path, Event, ResourceStateProvider};
use halcyon_media_hal::{HalCodec, MediaType, RequestContext};
use halcyon_metadata::Metadata;
use halcyon_resource::{EntityResource, RESTResource};

use crate::HalcyonError;

/// What the engine answers a request with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl InteractionResponse {
    fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

/// Startup-built bundle of metadata, state table, command registry and
/// codec, driving one request end to end.
#[derive(Clone)]
pub struct Engine {
    states: Arc<dyn ResourceStateProvider>,
    commands: Arc<dyn CommandSource>,
    codec: HalCodec,
}

impl Engine {
    pub fn new(
        metadata: Arc<Metadata>,
        states: Arc<dyn ResourceStateProvider>,
        commands: Arc<dyn CommandSource>,
    ) -> Self {
        let codec = HalCodec::new(metadata, Arc::clone(&states));
        Self {
            states,
            commands,
            codec,
        }
    }

    /// The codec the engine encodes and decodes with.
    pub fn codec(&self) -> &HalCodec {
        &self.codec
    }

    /// Serves one request: decode the body when present, run the target
    /// state's view command, encode whatever resource it produced.
    /// Failures are folded into the response status; this never panics
    /// and never leaks an error to the transport layer.
    pub fn handle(
        &self,
        media: MediaType,
        context: &RequestContext,
        body: Option<&[u8]>,
    ) -> InteractionResponse {
        match self.interact(media, context, body) {
            Ok(response) => response,
            Err(error) => {
                let status = error.status_code();
                if status >= 500 {
                    tracing::error!(%error, "interaction failed");
                } else {
                    tracing::warn!(%error, "interaction rejected");
                }
                InteractionResponse::empty(status)
            }
        }
    }

    fn interact(
        &self,
        media: MediaType,
        context: &RequestContext,
        body: Option<&[u8]>,
    ) -> Result<InteractionResponse, HalcyonError> {
        let event = Event::from_method(context.method());
        let canonical =
            canonicalize_path(context.path(), context.path_parameters());
        let Some(state) = self.states.determine(&event, &canonical) else {
            tracing::debug!(path = %canonical, "no state for request path");
            return Ok(InteractionResponse::empty(404));
        };

        let Some(view_action) = state.get_view_action() else {
            tracing::error!(
                state = state.name(),
                "state has no view action configured"
            );
            return Ok(InteractionResponse::empty(500));
        };
        let Some(command) = self.commands.fetch(view_action.name()) else {
            return Ok(InteractionResponse::empty(500));
        };

        let mut interaction =
            InteractionContext::new().current_state(state.clone());
        for (name, values) in context.path_parameters() {
            for value in values {
                interaction = interaction.path_parameter(name, value);
            }
        }
        if let Some(body) = body {
            let resource = self.codec.read_from(media, context, body)?;
            interaction.set_resource(resource.into());
        }

        match command.execute(&mut interaction)? {
            CommandOutcome::Failure => Ok(InteractionResponse::empty(404)),
            CommandOutcome::Success => {
                let resource =
                    interaction.take_resource().unwrap_or_else(|| {
                        RESTResource::Entity(EntityResource::empty(
                            state.entity_name(),
                        ))
                    });
                let body = self.codec.write_to(media, context, &resource)?;
                Ok(InteractionResponse { status: 200, body })
            }
        }
    }
}
