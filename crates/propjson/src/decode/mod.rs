//! Lenient JSON decoding into [`Value`] trees.
//!
//! Beyond RFC 8259 the default (non-strict) parser accepts what real upstream
//! payloads contain: bare `NaN`, `Infinity` and `-Infinity` tokens, raw control
//! characters inside strings, and lone surrogate escapes (decoded to U+FFFD).
//! Invalid UTF-8 inside strings is replaced with U+FFFD. Syntax error offsets
//! are byte offsets into the input.

pub mod parser;

use std::borrow::Cow;

use crate::{Error, Result};
use crate::options::Options;
use crate::value::Value;

pub fn parse(bytes: &[u8]) -> Result<Value> {
    parse_with_options(bytes, &Options::default())
}

pub fn parse_with_options(bytes: &[u8], options: &Options) -> Result<Value> {
    parser::Parser::new(bytes, options).parse_document()
}

pub fn parse_str_with_options(s: &str, options: &Options) -> Result<Value> {
    parse_with_options(s.as_bytes(), options)
}

/// Lossily decoded text of `bytes`, cut to at most `max_chars` characters.
pub fn preview(bytes: &[u8], max_chars: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    let cut = text.char_indices().nth(max_chars).map(|(i, _)| i);
    match (cut, text) {
        (Some(cut), text) => text[..cut].to_string(),
        (None, Cow::Borrowed(s)) => s.to_string(),
        (None, Cow::Owned(s)) => s,
    }
}

/// Error tree describing an upstream body that failed to parse: the parser
/// message, the upstream status when known, the body length and a bounded
/// preview of the raw text.
pub fn invalid_body_report(err: &Error, bytes: &[u8], status: Option<u16>, options: &Options) -> Value {
    let mut members = vec![("error".to_string(), Value::from("Invalid JSON response from API"))];
    if let Some(status) = status {
        members.push(("status_code".to_string(), Value::from(status)));
    }
    members.push(("response_length".to_string(), Value::from(bytes.len())));
    members.push(("response_preview".to_string(), Value::from(preview(bytes, options.preview_len))));
    members.push(("message".to_string(), Value::from(err.to_string())));
    Value::Object(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_status_length_and_preview() {
        let body = b"<html>oops</html>";
        let err = parse(body).unwrap_err();
        let report = invalid_body_report(&err, body, Some(200), &Options::default());
        assert_eq!(report.get("status_code"), Some(&Value::from(200u16)));
        assert_eq!(report.get("response_length"), Some(&Value::from(body.len())));
        assert_eq!(report.get("response_preview"), Some(&Value::from("<html>oops</html>")));
        assert_eq!(
            report.get("message"),
            Some(&Value::from("syntax at byte 0: expected value"))
        );
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        assert_eq!(preview("héllo".as_bytes(), 2), "hé");
        assert_eq!(preview(b"abc", 10), "abc");
        assert_eq!(preview(&[b'a', 0xFF, b'b'], 10), "a\u{FFFD}b");
    }
}
