use crate::clean::MAX_CLEAN_DEPTH;
use crate::error::{Error, Result};
use crate::number::{has_forbidden_leading_zeros, number_from_token};
use crate::options::Options;
use crate::value::{Number, Value, insert_member};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
    depth: usize,
    strict: bool,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// `src` need not be valid UTF-8: invalid sequences inside strings decode
    /// to U+FFFD, anywhere else they are a syntax error. Offsets index `src`.
    pub fn new(src: &'a [u8], options: &Options) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
            strict: options.strict,
            // Deeper input would only be nulled by `clean`.
            max_depth: options.max_depth.min(MAX_CLEAN_DEPTH),
        }
    }

    /// Parse a whole document: one value, optionally surrounded by whitespace.
    pub fn parse_document(mut self) -> Result<Value> {
        if self.src.starts_with(UTF8_BOM) {
            self.pos = UTF8_BOM.len();
        }
        self.skip_ws();
        if self.at_end() {
            return Err(Error::syntax(self.pos, "empty document"));
        }
        let value = self.parse_value()?;
        self.skip_ws();
        if !self.at_end() {
            return Err(Error::syntax(self.pos, "trailing characters after document"));
        }
        Ok(value)
    }

    fn bytes(&self) -> &'a [u8] {
        self.src
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn expect_byte(&mut self, want: u8, what: &str) -> Result<()> {
        match self.peek() {
            Some(b) if b == want => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(Error::syntax(self.pos, format!("expected {}", what))),
            None => Err(Error::syntax(self.pos, "unexpected end of input")),
        }
    }

    fn eat_keyword(&mut self, word: &str) -> bool {
        if self.src[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        let start = self.pos;
        match self.peek() {
            None => Err(Error::syntax(start, "unexpected end of input")),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b't') if self.eat_keyword("true") => Ok(Value::Bool(true)),
            Some(b'f') if self.eat_keyword("false") => Ok(Value::Bool(false)),
            Some(b'n') if self.eat_keyword("null") => Ok(Value::Null),
            Some(b'N') if self.eat_keyword("NaN") => self.non_finite(start, f64::NAN),
            Some(b'I') if self.eat_keyword("Infinity") => self.non_finite(start, f64::INFINITY),
            Some(b'-') if self.src.get(self.pos + 1) == Some(&b'I') => {
                if self.eat_keyword("-Infinity") {
                    self.non_finite(start, f64::NEG_INFINITY)
                } else {
                    Err(Error::syntax(start, "invalid number"))
                }
            }
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(Error::syntax(start, "expected value")),
        }
    }

    fn non_finite(&self, start: usize, f: f64) -> Result<Value> {
        if self.strict {
            return Err(Error::syntax(
                start,
                format!(
                    "non-finite literal `{}` is not JSON",
                    String::from_utf8_lossy(&self.src[start..self.pos])
                ),
            ));
        }
        Ok(Value::Number(Number::F64(f)))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::DepthLimit(self.max_depth));
        }
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        self.pos += 1;
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }
        loop {
            self.skip_ws();
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => return Err(Error::syntax(self.pos, "expected ',' or ']'")),
                None => return Err(Error::syntax(self.pos, "unexpected end of input")),
            }
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        self.pos += 1;
        let mut members: Vec<(String, Value)> = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(members));
        }
        loop {
            self.skip_ws();
            if self.peek() != Some(b'"') {
                return match self.peek() {
                    None => Err(Error::syntax(self.pos, "unexpected end of input")),
                    Some(_) => Err(Error::syntax(self.pos, "expected string key")),
                };
            }
            let key = self.parse_string()?;
            self.skip_ws();
            self.expect_byte(b':', "':' after object key")?;
            self.skip_ws();
            let value = self.parse_value()?;
            insert_member(&mut members, key, value);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => return Err(Error::syntax(self.pos, "expected ',' or '}'")),
                None => return Err(Error::syntax(self.pos, "unexpected end of input")),
            }
        }
        self.depth -= 1;
        Ok(Value::Object(members))
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        let bytes = self.bytes();
        let mut i = self.pos;
        if bytes.get(i) == Some(&b'-') {
            i += 1;
        }
        let int_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == int_start {
            return Err(Error::syntax(start, "invalid number"));
        }
        // Scanned ranges hold only ASCII digits, signs, `.` and exponents.
        let int_part = core::str::from_utf8(&bytes[start..i]).unwrap_or_default();
        if has_forbidden_leading_zeros(int_part) {
            return Err(Error::syntax(start, "leading zeros are not allowed"));
        }
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            let frac_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == frac_start {
                return Err(Error::syntax(i, "expected digit after decimal point"));
            }
        }
        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            i += 1;
            if matches!(bytes.get(i), Some(b'+' | b'-')) {
                i += 1;
            }
            let exp_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == exp_start {
                return Err(Error::syntax(i, "expected digit in exponent"));
            }
        }
        self.pos = i;
        let token = core::str::from_utf8(&bytes[start..i]).unwrap_or_default();
        match number_from_token(token) {
            Some(n) if self.strict && !n.is_finite() => {
                Err(Error::syntax(start, format!("number `{}` overflows to infinity", token)))
            }
            Some(n) => Ok(Value::Number(n)),
            None => Err(Error::syntax(start, "invalid number")),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let open = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let bytes = self.bytes();
        let mut run_start = self.pos;
        loop {
            let Some(&b) = bytes.get(self.pos) else {
                return Err(Error::syntax(open, "unterminated string"));
            };
            match b {
                b'"' => {
                    out.push_str(&String::from_utf8_lossy(&self.src[run_start..self.pos]));
                    self.pos += 1;
                    return Ok(out);
                }
                b'\\' => {
                    out.push_str(&String::from_utf8_lossy(&self.src[run_start..self.pos]));
                    self.parse_escape(&mut out)?;
                    run_start = self.pos;
                }
                c if c < 0x20 && self.strict => {
                    return Err(Error::syntax(self.pos, "control character in string"));
                }
                _ => self.pos += 1,
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let at = self.pos;
        self.pos += 1;
        let Some(b) = self.peek() else {
            return Err(Error::syntax(at, "unterminated escape"));
        };
        self.pos += 1;
        match b {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let unit = self.read_hex4(at)?;
                self.push_code_unit(at, unit, out)?;
            }
            _ => return Err(Error::syntax(at, "invalid escape")),
        }
        Ok(())
    }

    fn push_code_unit(&mut self, at: usize, unit: u32, out: &mut String) -> Result<()> {
        match unit {
            0xD800..=0xDBFF => {
                if self.src[self.pos..].starts_with(b"\\u") {
                    let save = self.pos;
                    self.pos += 2;
                    let low = self.read_hex4(save)?;
                    if (0xDC00..=0xDFFF).contains(&low) {
                        let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                        out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                        return Ok(());
                    }
                    // Not a pair: the high half is lone, the next escape
                    // gets parsed on its own.
                    self.pos = save;
                }
                self.lone_surrogate(at, out)
            }
            0xDC00..=0xDFFF => self.lone_surrogate(at, out),
            _ => {
                out.push(char::from_u32(unit).unwrap_or('\u{FFFD}'));
                Ok(())
            }
        }
    }

    fn lone_surrogate(&self, at: usize, out: &mut String) -> Result<()> {
        if self.strict {
            return Err(Error::syntax(at, "lone surrogate escape"));
        }
        out.push('\u{FFFD}');
        Ok(())
    }

    fn read_hex4(&mut self, at: usize) -> Result<u32> {
        let Some(digits) = self.bytes().get(self.pos..self.pos + 4) else {
            return Err(Error::syntax(at, "truncated \\u escape"));
        };
        let mut code = 0u32;
        for &d in digits {
            let v = hex_val(d).ok_or_else(|| Error::syntax(at, "invalid \\u escape"))?;
            code = code * 16 + v;
        }
        self.pos += 4;
        Ok(code)
    }
}

fn hex_val(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as u32),
        b'a'..=b'f' => Some(10 + (c - b'a') as u32),
        b'A'..=b'F' => Some(10 + (c - b'A') as u32),
        _ => None,
    }
}
