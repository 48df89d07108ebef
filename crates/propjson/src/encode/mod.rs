//! JSON encoding with a guaranteed-successful fallback chain.
//!
//! [`safe_serialize`] is the entry point for response bodies: it cleans the
//! tree, tries literal UTF-8 output, falls back to ASCII-escaped output, and
//! as a last resort writes a fixed error object with status 500.

pub mod encoders;
pub mod primitives;
pub mod writer;

use crate::clean::{clean, sanitize_string};
use crate::locate::locate_first_unserializable_string;
use crate::options::{Charset, Options};
use crate::value::Value;
use crate::{Error, Result};

/// Encode `value` as compact JSON text. Does not clean; non-finite floats
/// are an error in either charset.
pub fn encode(value: &Value, charset: Charset) -> Result<String> {
    let mut w = writer::JsonWriter::new(charset);
    encoders::encode_value(value, &mut w)?;
    Ok(w.into_string())
}

/// A response body ready to be written, with the HTTP status the encoder
/// vouches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Serialized {
    pub body: Vec<u8>,
    /// 200 for cleaned data, 500 only for the last-resort error object.
    pub status: u16,
    pub charset: Charset,
}

impl Serialized {
    pub fn is_fallback(&self) -> bool {
        self.status != 200
    }

    pub fn as_str(&self) -> &str {
        // Bodies are built from Strings.
        core::str::from_utf8(&self.body).unwrap_or("")
    }
}

pub fn safe_serialize(value: &Value) -> Serialized {
    safe_serialize_with(value, &Options::default())
}

pub fn safe_serialize_with(value: &Value, options: &Options) -> Serialized {
    let cleaned = clean(value);
    serialize_cleaned(value, &cleaned, options)
}

fn serialize_cleaned(original: &Value, cleaned: &Value, options: &Options) -> Serialized {
    if !options.ascii_only {
        match encode(cleaned, Charset::Unicode) {
            Ok(s) => return ok_body(s, Charset::Unicode),
            Err(e) => {
                let path = locate_first_unserializable_string(cleaned);
                tracing::warn!(
                    error = %e,
                    path = %path.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
                    "literal encoding failed, falling back to ASCII escapes"
                );
            }
        }
    }
    match encode(cleaned, Charset::Ascii) {
        Ok(s) => ok_body(s, Charset::Ascii),
        Err(e) => {
            tracing::error!(error = %e, data_type = original.kind_name(), "ASCII encoding failed");
            last_resort(&e, original)
        }
    }
}

fn ok_body(s: String, charset: Charset) -> Serialized {
    Serialized {
        body: s.into_bytes(),
        status: 200,
        charset,
    }
}

/// Fixed error object for when both tiers failed. Holds only strings, so the
/// ASCII tier cannot reject it.
fn last_resort(e: &Error, original: &Value) -> Serialized {
    let fallback = Value::object([
        ("error", Value::from("Data processing failed")),
        ("message", Value::from(sanitize_string(&e.to_string()))),
        ("data_type", Value::from(original.kind_name())),
    ]);
    let body = encode(&fallback, Charset::Ascii).unwrap_or_else(|_| {
        String::from(r#"{"error":"Data processing failed","message":"unavailable","data_type":"unknown"}"#)
    });
    Serialized {
        body: body.into_bytes(),
        status: 500,
        charset: Charset::Ascii,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn compact_output_keeps_member_order() {
        let v = Value::object([
            ("z", Value::from(1i64)),
            ("a", Value::Array(vec![Value::Null, Value::from(true), Value::from(1.5)])),
        ]);
        assert_eq!(
            encode(&v, Charset::Unicode).unwrap(),
            r#"{"z":1,"a":[null,true,1.5]}"#
        );
    }

    #[test]
    fn cleaned_tree_never_reaches_last_resort() {
        let v = Value::Array(vec![Value::Number(Number::F64(f64::NAN))]);
        let out = safe_serialize(&v);
        assert!(!out.is_fallback());
        assert_eq!(out.as_str(), "[null]");
    }

    #[test]
    fn uncleaned_non_finite_hits_last_resort() {
        let v = Value::object([("price", Value::from(f64::INFINITY))]);
        let out = serialize_cleaned(&v, &v, &Options::default());
        assert!(out.is_fallback());
        assert_eq!(out.status, 500);
        assert_eq!(out.charset, Charset::Ascii);
        let text = out.as_str();
        assert!(text.starts_with(r#"{"error":"Data processing failed","message":""#));
        assert!(text.ends_with(r#""data_type":"object"}"#));
    }

    #[test]
    fn ascii_only_skips_literal_tier() {
        let opts = Options {
            ascii_only: true,
            ..Options::default()
        };
        let out = safe_serialize_with(&Value::from("café"), &opts);
        assert_eq!(out.charset, Charset::Ascii);
        assert_eq!(out.as_str(), "\"caf\\u00e9\"");
    }
}
