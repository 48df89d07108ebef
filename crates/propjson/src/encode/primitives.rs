use core::fmt::Write as _;

use crate::clean::is_noncharacter;
use crate::error::{Error, Result};
use crate::number::format_json_f64;
use crate::options::Charset;
use crate::value::Number;

/// Characters a browser consumer cannot take as literal text: the JavaScript
/// line terminators and Unicode noncharacters.
pub fn is_unsafe_literal(c: char) -> bool {
    matches!(c, '\u{2028}' | '\u{2029}') || is_noncharacter(c)
}

fn push_u_escape(out: &mut String, unit: u16) {
    let _ = write!(out, "\\u{:04x}", unit);
}

/// Append `s` as a quoted JSON string.
///
/// In [`Charset::Unicode`] mode non-ASCII text is written literally and
/// [`is_unsafe_literal`] characters are an error. [`Charset::Ascii`] escapes
/// every non-ASCII scalar (as a surrogate pair above the BMP) and cannot fail.
pub fn escape_and_quote_into(out: &mut String, s: &str, charset: Charset) -> Result<()> {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => push_u_escape(out, c as u16),
            c if c.is_ascii() => out.push(c),
            c => match charset {
                Charset::Ascii => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        push_u_escape(out, *unit);
                    }
                }
                Charset::Unicode if is_unsafe_literal(c) => {
                    return Err(Error::Unencodable { code: c as u32 });
                }
                Charset::Unicode => out.push(c),
            },
        }
    }
    out.push('"');
    Ok(())
}

pub fn escape_and_quote(s: &str, charset: Charset) -> Result<String> {
    let mut out = String::with_capacity(s.len() + 2);
    escape_and_quote_into(&mut out, s, charset)?;
    Ok(out)
}

pub fn format_number(n: &Number) -> Result<String> {
    match n {
        Number::I64(i) => Ok(i.to_string()),
        Number::U64(u) => Ok(u.to_string()),
        Number::F64(f) if f.is_finite() => Ok(format_json_f64(*f)),
        Number::F64(f) => Err(Error::NonFinite(*f)),
    }
}

pub fn format_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

pub fn format_null() -> &'static str {
    "null"
}
