//! Serialization Codec Module
//!
//! Converts typed values to and from the byte payloads held by the store.
//!
//! The encoding is fixed process-wide: UTF-8 JSON, pretty-printed with
//! two-space indentation, field names preserved exactly as declared, and
//! object fields holding a null value omitted entirely. Decoding is lenient
//! toward a trailing comma after the last field or element, so payloads
//! written by a slightly different encoder version still parse. Human-readable
//! cache contents are favored over payload size: no compression, no binary
//! framing, no schema versioning beyond this structural tolerance.
//!
//! Missing optional fields decode to `None`; other fields may opt into the
//! same leniency with `#[serde(default)]`. A required non-defaultable field
//! that is absent fails with [`CacheError::Decode`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CacheError, Result};

// == Encode ==
/// Encodes a value into its stored byte form.
///
/// Null object fields are stripped recursively before printing, so the
/// payload never carries a null marker for an absent field. Array elements
/// are never dropped: their position is meaningful.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut tree =
        serde_json::to_value(value).map_err(|e| CacheError::Encode(e.to_string()))?;
    strip_null_fields(&mut tree);
    serde_json::to_vec_pretty(&tree).map_err(|e| CacheError::Encode(e.to_string()))
}

// == Decode ==
/// Decodes stored bytes back into a typed value.
///
/// Fails with [`CacheError::Decode`] when the payload is not UTF-8, is not
/// well-formed JSON after trailing-comma removal, or does not match the
/// target type.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let text =
        std::str::from_utf8(bytes).map_err(|e| CacheError::Decode(e.to_string()))?;
    let cleaned = strip_trailing_commas(text);
    serde_json::from_str(&cleaned).map_err(|e| CacheError::Decode(e.to_string()))
}

// == Null Stripping ==
/// Removes null-valued fields from objects, recursively.
fn strip_null_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for v in map.values_mut() {
                strip_null_fields(v);
            }
        }
        Value::Array(items) => {
            for v in items {
                strip_null_fields(v);
            }
        }
        _ => {}
    }
}

// == Trailing Comma Removal ==
/// Removes commas that directly precede a closing `}` or `]`.
///
/// A comma outside a string is buffered together with any whitespace that
/// follows it; it is dropped when the next significant character closes the
/// enclosing object or array, and emitted unchanged otherwise. String
/// contents, including escaped quotes, pass through untouched.
fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;
    // Buffered comma plus the whitespace that followed it
    let mut pending: Option<String> = None;

    for ch in input.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                flush(&mut out, &mut pending);
                in_string = true;
                out.push(ch);
            }
            ',' => {
                flush(&mut out, &mut pending);
                pending = Some(String::from(","));
            }
            '}' | ']' => {
                if let Some(p) = pending.take() {
                    // Drop the comma, keep its trailing whitespace
                    out.push_str(&p[1..]);
                }
                out.push(ch);
            }
            c if c.is_whitespace() => match pending.as_mut() {
                Some(p) => p.push(c),
                None => out.push(c),
            },
            _ => {
                flush(&mut out, &mut pending);
                out.push(ch);
            }
        }
    }

    if let Some(p) = pending {
        out.push_str(&p);
    }
    out
}

fn flush(out: &mut String, pending: &mut Option<String>) {
    if let Some(p) = pending.take() {
        out.push_str(&p);
    }
}
