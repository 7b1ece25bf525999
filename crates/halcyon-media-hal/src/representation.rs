//! The generic readable/writable representation of a hypermedia document.
//!
//! [`Representation`] is the syntax-independent middle ground between
//! resource graphs and concrete documents: a root href, a flat list of
//! wire links, a property map, and embedded child representations. The
//! encoder builds one from a resource; the decoder parses one from bytes.
//! The JSON rendering lives here; the XML rendering in the `xml` module.

use serde_json::{json, Map, Value};

use crate::MediaError;

/// A link as it appears on the wire: exactly one relation per entry.
/// Multi-relation links are split before they get here.
#[derive(Debug, Clone, PartialEq)]
pub struct WireLink {
    pub rel: String,
    pub href: String,
    pub name: Option<String>,
    pub title: Option<String>,
}

/// A parsed or under-construction hypermedia document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Representation {
    href: Option<String>,
    links: Vec<WireLink>,
    properties: Map<String, Value>,
    embedded: Vec<(String, Representation)>,
}

impl Representation {
    /// A representation rooted at `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// A representation with no canonical address (collection members
    /// of the record kind have none).
    pub fn unrooted() -> Self {
        Self::default()
    }

    /// The document's canonical address, when it has one.
    pub fn resource_href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Re-roots the representation at a different href.
    pub fn set_href(&mut self, href: impl Into<String>) {
        self.href = Some(href.into());
    }

    pub fn add_link(
        &mut self,
        rel: impl Into<String>,
        href: impl Into<String>,
        name: Option<&str>,
        title: Option<&str>,
    ) {
        self.links.push(WireLink {
            rel: rel.into(),
            href: href.into(),
            name: name.map(str::to_string),
            title: title.map(str::to_string),
        });
    }

    pub fn add_property(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }

    /// Attaches an embedded child under `rel`.
    pub fn add_representation(
        &mut self,
        rel: impl Into<String>,
        child: Representation,
    ) {
        self.embedded.push((rel.into(), child));
    }

    pub fn links(&self) -> &[WireLink] {
        &self.links
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn embedded(&self) -> &[(String, Representation)] {
        &self.embedded
    }

    // -----------------------------------------------------------------
    // HAL JSON rendering
    // -----------------------------------------------------------------

    /// Renders the document as HAL JSON. Link relations are always
    /// rendered as arrays, even with a single entry, so clients never
    /// have to branch on shape.
    pub fn to_hal_json(&self) -> Value {
        let mut root = Map::new();

        let mut links = Map::new();
        if let Some(href) = &self.href {
            links.insert("self".to_string(), json!([{ "href": href }]));
        }
        for link in &self.links {
            let mut entry = Map::new();
            entry.insert("href".to_string(), Value::String(link.href.clone()));
            if let Some(name) = &link.name {
                entry.insert("name".to_string(), Value::String(name.clone()));
            }
            if let Some(title) = &link.title {
                entry.insert("title".to_string(), Value::String(title.clone()));
            }
            if let Some(rel_entries) = links
                .entry(link.rel.clone())
                .or_insert_with(|| Value::Array(Vec::new()))
                .as_array_mut()
            {
                rel_entries.push(Value::Object(entry));
            }
        }
        if !links.is_empty() {
            root.insert("_links".to_string(), Value::Object(links));
        }

        if !self.embedded.is_empty() {
            let mut embedded = Map::new();
            for (rel, child) in &self.embedded {
                if let Some(children) = embedded
                    .entry(rel.clone())
                    .or_insert_with(|| Value::Array(Vec::new()))
                    .as_array_mut()
                {
                    children.push(child.to_hal_json());
                }
            }
            root.insert("_embedded".to_string(), Value::Object(embedded));
        }

        for (name, value) in &self.properties {
            root.insert(name.clone(), value.clone());
        }

        Value::Object(root)
    }

    /// Parses a HAL JSON document. Accepts both object and array forms
    /// for link relations and embedded entries.
    pub fn from_hal_json(document: Value) -> Result<Self, MediaError> {
        let Value::Object(root) = document else {
            return Err(MediaError::Malformed(
                "document root is not an object".into(),
            ));
        };

        let mut representation = Representation::unrooted();

        for (name, value) in root {
            match name.as_str() {
                "_links" => parse_links(&mut representation, value)?,
                "_embedded" => parse_embedded(&mut representation, value)?,
                _ => {
                    representation.properties.insert(name, value);
                }
            }
        }

        Ok(representation)
    }
}

fn parse_links(
    representation: &mut Representation,
    links: Value,
) -> Result<(), MediaError> {
    let Value::Object(rels) = links else {
        return Err(MediaError::Malformed("_links is not an object".into()));
    };
    for (rel, entries) in rels {
        let entries = match entries {
            Value::Array(entries) => entries,
            single @ Value::Object(_) => vec![single],
            _ => {
                return Err(MediaError::Malformed(format!(
                    "link relation '{rel}' is neither object nor array"
                )))
            }
        };
        for entry in entries {
            let Some(href) = entry.get("href").and_then(Value::as_str) else {
                return Err(MediaError::Malformed(format!(
                    "link relation '{rel}' entry has no href"
                )));
            };
            if rel == "self" && representation.href.is_none() {
                representation.href = Some(href.to_string());
            } else {
                representation.add_link(
                    rel.clone(),
                    href,
                    entry.get("name").and_then(Value::as_str),
                    entry.get("title").and_then(Value::as_str),
                );
            }
        }
    }
    Ok(())
}

fn parse_embedded(
    representation: &mut Representation,
    embedded: Value,
) -> Result<(), MediaError> {
    let Value::Object(rels) = embedded else {
        return Err(MediaError::Malformed("_embedded is not an object".into()));
    };
    for (rel, children) in rels {
        let children = match children {
            Value::Array(children) => children,
            single @ Value::Object(_) => vec![single],
            _ => {
                return Err(MediaError::Malformed(format!(
                    "embedded relation '{rel}' is neither object nor array"
                )))
            }
        };
        for child in children {
            representation
                .embedded
                .push((rel.clone(), Representation::from_hal_json(child)?));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_self_link_and_properties() {
        let mut rep = Representation::new("/customers/1");
        rep.add_property("name", json!("Ada"));
        rep.add_property("age", json!(36));

        let doc = rep.to_hal_json();
        assert_eq!(doc["_links"]["self"][0]["href"], "/customers/1");
        assert_eq!(doc["name"], "Ada");
        assert_eq!(doc["age"], 36);
    }

    #[test]
    fn test_render_groups_links_by_rel_as_arrays() {
        let mut rep = Representation::new("/customers/1");
        rep.add_link("order", "/orders/1", None, None);
        rep.add_link("order", "/orders/2", None, None);

        let doc = rep.to_hal_json();
        let orders = doc["_links"]["order"].as_array().unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1]["href"], "/orders/2");
    }

    #[test]
    fn test_no_links_section_when_unrooted_and_linkless() {
        let mut rep = Representation::unrooted();
        rep.add_property("name", json!("Ada"));
        let doc = rep.to_hal_json();
        assert!(doc.get("_links").is_none());
        assert!(doc.get("_embedded").is_none());
    }

    #[test]
    fn test_parse_extracts_self_href() {
        let rep = Representation::from_hal_json(json!({
            "_links": { "self": { "href": "/customers/1" } },
            "name": "Ada"
        }))
        .unwrap();
        assert_eq!(rep.resource_href(), Some("/customers/1"));
        assert_eq!(rep.properties()["name"], "Ada");
    }

    #[test]
    fn test_parse_accepts_array_link_form() {
        let rep = Representation::from_hal_json(json!({
            "_links": {
                "self": [{ "href": "/customers/1" }],
                "order": [{ "href": "/orders/1" }, { "href": "/orders/2" }]
            }
        }))
        .unwrap();
        assert_eq!(rep.links().len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        let error = Representation::from_hal_json(json!([1, 2])).unwrap_err();
        assert!(matches!(error, MediaError::Malformed(_)));
    }

    #[test]
    fn test_parse_rejects_link_without_href() {
        let error = Representation::from_hal_json(json!({
            "_links": { "self": { "title": "no href" } }
        }))
        .unwrap_err();
        assert!(matches!(error, MediaError::Malformed(_)));
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut rep = Representation::new("/customers/1");
        rep.add_link("order", "/orders/1", Some("o1"), None);
        rep.add_property("name", json!("Ada"));
        let mut child = Representation::new("/addresses/9");
        child.add_property("city", json!("London"));
        rep.add_representation("address", child);

        let parsed =
            Representation::from_hal_json(rep.to_hal_json()).unwrap();
        assert_eq!(parsed.resource_href(), Some("/customers/1"));
        assert_eq!(parsed.links().len(), 1);
        assert_eq!(parsed.embedded().len(), 1);
        assert_eq!(parsed.embedded()[0].0, "address");
        assert_eq!(
            parsed.embedded()[0].1.properties()["city"],
            json!("London")
        );
    }
}
