use crate::Result;
use crate::encode::primitives;
use crate::options::Charset;
use crate::value::Number;

/// Compact JSON text sink bound to one output charset.
pub struct JsonWriter {
    out: String,
    charset: Charset,
}

impl JsonWriter {
    pub fn new(charset: Charset) -> Self {
        Self {
            out: String::new(),
            charset,
        }
    }

    pub fn null(&mut self) {
        self.out.push_str(primitives::format_null());
    }

    pub fn bool(&mut self, b: bool) {
        self.out.push_str(primitives::format_bool(b));
    }

    pub fn number(&mut self, n: &Number) -> Result<()> {
        let s = primitives::format_number(n)?;
        self.out.push_str(&s);
        Ok(())
    }

    pub fn string(&mut self, s: &str) -> Result<()> {
        primitives::escape_and_quote_into(&mut self.out, s, self.charset)
    }

    pub fn key(&mut self, k: &str) -> Result<()> {
        self.string(k)?;
        self.out.push(':');
        Ok(())
    }

    pub fn punct(&mut self, c: char) {
        self.out.push(c);
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
