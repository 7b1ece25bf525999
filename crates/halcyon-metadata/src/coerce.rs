//! Type-directed coercion between wire values and typed property values.
//!
//! The wire is stringly typed; the vocabulary says what each property is
//! supposed to be. `coerce` is the single place where that conversion
//! happens — a pure function of the vocabulary, the property name, and
//! the raw value.

use serde_json::Value;

use crate::{EntityMetadata, MetadataError};

/// Coerces a raw wire value into a typed property value.
///
/// Rules:
/// - absent or `null` → the type-appropriate empty value: `""` for text,
///   `0` for numbers, `""` for any other declared type. An explicit
///   fallback, not a failure.
/// - text → the raw string, unconverted.
/// - number → parsed as a 64-bit integer; malformed input fails with
///   [`MetadataError::NumberFormat`]. Strict — decoding stops.
/// - any other declared type → pass-through string.
///
/// Undeclared properties never reach this function; callers filter
/// against the vocabulary first.
pub fn coerce(
    metadata: &EntityMetadata,
    property: &str,
    raw: Option<&Value>,
) -> Result<Value, MetadataError> {
    let raw = match raw {
        None | Some(Value::Null) => return Ok(empty_value(metadata, property)),
        Some(value) => value,
    };

    let text = raw_text(raw);

    if metadata.is_number(property) {
        let number: i64 =
            text.parse().map_err(|source| MetadataError::NumberFormat {
                property: property.to_string(),
                source,
            })?;
        Ok(Value::from(number))
    } else {
        // Text and every other declared type carry the string through.
        Ok(Value::String(text))
    }
}

/// The usable stand-in for a null value, per declared type.
fn empty_value(metadata: &EntityMetadata, property: &str) -> Value {
    if metadata.is_number(property) {
        Value::from(0i64)
    } else {
        Value::String(String::new())
    }
}

/// Renders a raw JSON value as the string the vocabulary rules work on.
/// Strings contribute their content; other scalars their JSON text.
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
