//! HAL XML rendering and parsing.
//!
//! The XML form mirrors the JSON one: a `<resource>` root with an
//! optional `href`, `<link>` children, nested `<resource rel="…">`
//! elements for embedded documents, and one element per property.
//! Repeated property elements of the same name collapse into arrays;
//! elements with child elements become nested maps.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};

use crate::{MediaError, Representation};

fn malformed(error: impl std::fmt::Display) -> MediaError {
    MediaError::Malformed(format!("invalid XML document: {error}"))
}

fn write_failed(error: impl std::fmt::Display) -> MediaError {
    MediaError::Write(error.to_string())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Renders a representation as a HAL XML document.
pub fn to_hal_xml(representation: &Representation) -> Result<Vec<u8>, MediaError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_failed)?;
    write_resource(&mut writer, representation, None)?;
    Ok(writer.into_inner())
}

fn write_resource(
    writer: &mut Writer<Vec<u8>>,
    representation: &Representation,
    rel: Option<&str>,
) -> Result<(), MediaError> {
    let mut start = BytesStart::new("resource");
    if let Some(rel) = rel {
        start.push_attribute(("rel", rel));
    }
    if let Some(href) = representation.resource_href() {
        start.push_attribute(("href", href));
    }
    writer
        .write_event(Event::Start(start))
        .map_err(write_failed)?;

    for link in representation.links() {
        let mut element = BytesStart::new("link");
        element.push_attribute(("rel", link.rel.as_str()));
        element.push_attribute(("href", link.href.as_str()));
        if let Some(name) = &link.name {
            element.push_attribute(("name", name.as_str()));
        }
        if let Some(title) = &link.title {
            element.push_attribute(("title", title.as_str()));
        }
        writer
            .write_event(Event::Empty(element))
            .map_err(write_failed)?;
    }

    for (rel, child) in representation.embedded() {
        write_resource(writer, child, Some(rel))?;
    }

    for (name, value) in representation.properties() {
        write_property(writer, name, value)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("resource")))
        .map_err(write_failed)?;
    Ok(())
}

fn write_property(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &Value,
) -> Result<(), MediaError> {
    match value {
        Value::Null => Ok(()),
        Value::Array(items) => {
            for item in items {
                write_property(writer, name, item)?;
            }
            Ok(())
        }
        Value::Object(entries) => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(write_failed)?;
            for (child_name, child) in entries {
                write_property(writer, child_name, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(write_failed)?;
            Ok(())
        }
        Value::String(text) => write_text_element(writer, name, text),
        other => write_text_element(writer, name, &other.to_string()),
    }
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), MediaError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_failed)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(write_failed)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_failed)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parses a HAL XML document into a representation.
pub fn from_hal_xml(data: &[u8]) -> Result<Representation, MediaError> {
    let mut reader = Reader::from_reader(data);
    let mut buf = Vec::new();
    loop {
        let event = reader.read_event_into(&mut buf).map_err(malformed)?;
        match event {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::Text(text) => {
                let text = text.unescape().map_err(malformed)?;
                if !text.trim().is_empty() {
                    return Err(malformed("text before resource element"));
                }
            }
            Event::Start(start) => {
                if start.name().as_ref() != b"resource" {
                    return Err(malformed("document root is not <resource>"));
                }
                let mut representation = root_from_attributes(&start)?;
                parse_children(&mut reader, &mut representation)?;
                return Ok(representation);
            }
            Event::Empty(start) => {
                if start.name().as_ref() != b"resource" {
                    return Err(malformed("document root is not <resource>"));
                }
                return root_from_attributes(&start);
            }
            Event::Eof => {
                return Err(malformed("no <resource> element found"))
            }
            _ => return Err(malformed("unexpected content before <resource>")),
        }
        buf.clear();
    }
}

fn root_from_attributes(
    start: &BytesStart<'_>,
) -> Result<Representation, MediaError> {
    Ok(match attribute(start, b"href")? {
        Some(href) => Representation::new(href),
        None => Representation::unrooted(),
    })
}

fn parse_children(
    reader: &mut Reader<&[u8]>,
    representation: &mut Representation,
) -> Result<(), MediaError> {
    let mut buf = Vec::new();
    loop {
        let event = reader.read_event_into(&mut buf).map_err(malformed)?;
        match event {
            Event::Empty(start) => match start.name().as_ref() {
                b"link" => add_link(representation, &start)?,
                b"resource" => {
                    let rel = attribute(&start, b"rel")?
                        .unwrap_or_else(|| "embedded".to_string());
                    let child = root_from_attributes(&start)?;
                    representation.add_representation(rel, child);
                }
                name => {
                    let name = String::from_utf8_lossy(name).into_owned();
                    add_grouped_property(
                        representation,
                        name,
                        Value::String(String::new()),
                    );
                }
            },
            Event::Start(start) => match start.name().as_ref() {
                b"link" => {
                    add_link(representation, &start)?;
                    let mut skip = Vec::new();
                    reader
                        .read_to_end_into(start.name(), &mut skip)
                        .map_err(malformed)?;
                }
                b"resource" => {
                    let rel = attribute(&start, b"rel")?
                        .unwrap_or_else(|| "embedded".to_string());
                    let mut child = root_from_attributes(&start)?;
                    parse_children(reader, &mut child)?;
                    representation.add_representation(rel, child);
                }
                name => {
                    let name = String::from_utf8_lossy(name).into_owned();
                    let value = parse_property(reader)?;
                    add_grouped_property(representation, name, value);
                }
            },
            Event::Text(text) => {
                // Whitespace between child elements.
                let _ = text.unescape().map_err(malformed)?;
            }
            Event::Comment(_) | Event::PI(_) | Event::CData(_) => {}
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(malformed("unexpected end of document")),
            _ => {}
        }
        buf.clear();
    }
}

/// Parses one property element: plain text becomes a string, child
/// elements a nested map, repeated child names an array.
fn parse_property(reader: &mut Reader<&[u8]>) -> Result<Value, MediaError> {
    let mut text = String::new();
    let mut object = Map::new();
    let mut buf = Vec::new();
    loop {
        let event = reader.read_event_into(&mut buf).map_err(malformed)?;
        match event {
            Event::Text(content) => {
                text.push_str(content.unescape().map_err(malformed)?.trim());
            }
            Event::CData(content) => {
                text.push_str(&String::from_utf8_lossy(&content.into_inner()));
            }
            Event::Start(start) => {
                let child_name =
                    String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let child = parse_property(reader)?;
                insert_grouped(&mut object, child_name, child);
            }
            Event::Empty(start) => {
                let child_name =
                    String::from_utf8_lossy(start.name().as_ref()).into_owned();
                insert_grouped(
                    &mut object,
                    child_name,
                    Value::String(String::new()),
                );
            }
            Event::Comment(_) | Event::PI(_) => {}
            Event::End(_) => break,
            Event::Eof => return Err(malformed("unexpected end of document")),
            _ => {}
        }
        buf.clear();
    }
    if object.is_empty() {
        Ok(Value::String(text))
    } else {
        Ok(Value::Object(object))
    }
}

fn add_link(
    representation: &mut Representation,
    start: &BytesStart<'_>,
) -> Result<(), MediaError> {
    let rel = attribute(start, b"rel")?
        .ok_or_else(|| malformed("<link> without rel"))?;
    let href = attribute(start, b"href")?
        .ok_or_else(|| malformed("<link> without href"))?;
    let name = attribute(start, b"name")?;
    let title = attribute(start, b"title")?;
    if rel == "self" && representation.resource_href().is_none() {
        representation.set_href(href);
    } else {
        representation.add_link(rel, href, name.as_deref(), title.as_deref());
    }
    Ok(())
}

fn add_grouped_property(
    representation: &mut Representation,
    name: String,
    value: Value,
) {
    // Repeated elements of the same name collapse into an array, like
    // the JSON form.
    match representation.properties().get(&name).cloned() {
        None => representation.add_property(name, value),
        Some(Value::Array(mut items)) => {
            items.push(value);
            representation.add_property(name, Value::Array(items));
        }
        Some(existing) => {
            representation
                .add_property(name, Value::Array(vec![existing, value]));
        }
    }
}

fn insert_grouped(object: &mut Map<String, Value>, name: String, value: Value) {
    match object.remove(&name) {
        None => {
            object.insert(name, value);
        }
        Some(Value::Array(mut items)) => {
            items.push(value);
            object.insert(name, Value::Array(items));
        }
        Some(existing) => {
            object.insert(name, Value::Array(vec![existing, value]));
        }
    }
}

fn attribute(
    start: &BytesStart<'_>,
    key: &[u8],
) -> Result<Option<String>, MediaError> {
    for attr in start.attributes() {
        let attr = attr.map_err(malformed)?;
        if attr.key.as_ref() == key {
            return Ok(Some(
                attr.unescape_value().map_err(malformed)?.into_owned(),
            ));
        }
    }
    Ok(None)
}
