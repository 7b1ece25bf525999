//! The codec facade: media-type negotiation over the encoder/decoder.
//!
//! [`HalCodec`] is the one object the surrounding dispatch layer talks
//! to. It is built once from the shared metadata table and state
//! provider, then used concurrently by every request; it keeps no
//! per-call state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use halcyon_hypermedia::ResourceStateProvider;
use halcyon_metadata::Metadata;
use halcyon_resource::{EntityResource, RESTResource, ResourceKind};
use serde_json::Value;

use crate::decode::build_entity_from_document;
use crate::encode::build_representation;
use crate::xml::{from_hal_xml, to_hal_xml};
use crate::{MediaError, Representation};

// ---------------------------------------------------------------------------
// MediaType
// ---------------------------------------------------------------------------

/// The closed set of media types the codec serves: the two hypermedia
/// syntaxes plus a plain JSON fallback that reuses the HAL JSON shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    HalJson,
    HalXml,
    Json,
}

impl MediaType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediaType::HalJson => "application/hal+json",
            MediaType::HalXml => "application/hal+xml",
            MediaType::Json => "application/json",
        }
    }

    /// Parses a media-type string, ignoring any `;`-separated
    /// parameters. `None` for anything outside the supported set.
    pub fn parse(value: &str) -> Option<MediaType> {
        let essence = value.split(';').next().unwrap_or(value).trim();
        [MediaType::HalJson, MediaType::HalXml, MediaType::Json]
            .into_iter()
            .find(|media| essence.eq_ignore_ascii_case(media.as_str()))
    }

    /// Like [`MediaType::parse`], but a miss is an answerable error
    /// instead of `None`; this is the entry the dispatch layer uses to
    /// negotiate `Content-Type`/`Accept` headers.
    pub fn negotiate(value: &str) -> Result<MediaType, MediaError> {
        MediaType::parse(value).ok_or_else(|| MediaError::UnsupportedMediaType {
            media: value.to_string(),
        })
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RequestContext
// ---------------------------------------------------------------------------

/// The slice of the inbound request the codec needs: method, path, the
/// deployment base URI, and the matched path parameters (used to
/// canonicalize value-shaped paths back into template shape).
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    method: String,
    path: String,
    base_uri: String,
    path_parameters: HashMap<String, Vec<String>>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the deployment base URI the decoder strips from self links.
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Records one matched path-parameter value.
    pub fn path_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.path_parameters
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get_base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn path_parameters(&self) -> &HashMap<String, Vec<String>> {
        &self.path_parameters
    }
}

// ---------------------------------------------------------------------------
// HalCodec
// ---------------------------------------------------------------------------

/// Encoder/decoder facade over the shared metadata and state tables.
#[derive(Clone)]
pub struct HalCodec {
    metadata: Arc<Metadata>,
    states: Arc<dyn ResourceStateProvider>,
}

impl HalCodec {
    pub fn new(
        metadata: Arc<Metadata>,
        states: Arc<dyn ResourceStateProvider>,
    ) -> Self {
        Self { metadata, states }
    }

    /// Encode applies to both resource variants on every supported media
    /// type.
    pub fn is_writeable(&self, _media: MediaType, _kind: ResourceKind) -> bool {
        true
    }

    /// Decode applies to single-entity payloads only; collections are
    /// never accepted as input.
    pub fn is_readable(&self, _media: MediaType, kind: ResourceKind) -> bool {
        kind == ResourceKind::Entity
    }

    /// Encodes a resource graph into the negotiated wire syntax.
    pub fn write_to(
        &self,
        media: MediaType,
        context: &RequestContext,
        resource: &RESTResource,
    ) -> Result<Vec<u8>, MediaError> {
        let base = document_base(context);
        let representation =
            build_representation(&self.metadata, &base, resource)?;
        match media {
            MediaType::HalJson | MediaType::Json => {
                serde_json::to_vec(&representation.to_hal_json())
                    .map_err(|error| MediaError::Write(error.to_string()))
            }
            MediaType::HalXml => to_hal_xml(&representation),
        }
    }

    /// Decodes an inbound document into a single-entity resource.
    ///
    /// Client-class failures (bad syntax, unresolvable path, bad
    /// numbers) are logged at warning level here, once, so the dispatch
    /// layer can map the error straight to a response.
    pub fn read_from(
        &self,
        media: MediaType,
        context: &RequestContext,
        body: &[u8],
    ) -> Result<EntityResource, MediaError> {
        let result = self.parse_and_build(media, context, body);
        match result {
            Ok(entity_resource) => Ok(entity_resource),
            Err(error) => {
                if error.status_code() == 400 {
                    tracing::warn!(%error, "malformed request from client");
                }
                Err(error)
            }
        }
    }

    fn parse_and_build(
        &self,
        media: MediaType,
        context: &RequestContext,
        body: &[u8],
    ) -> Result<EntityResource, MediaError> {
        let representation = match media {
            MediaType::HalJson | MediaType::Json => {
                let document: Value = serde_json::from_slice(body)?;
                Representation::from_hal_json(document)?
            }
            MediaType::HalXml => from_hal_xml(body)?,
        };
        let entity = build_entity_from_document(
            &self.metadata,
            self.states.as_ref(),
            &representation,
            context,
        )?;
        Ok(EntityResource::from_entity(entity))
    }
}

/// The URI an encoded document is rooted at when the resource carries no
/// usable self link: deployment base plus request path.
fn document_base(context: &RequestContext) -> String {
    let base = context.get_base_uri().trim_end_matches('/');
    format!("{base}{}", context.path())
}
