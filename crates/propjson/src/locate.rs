//! Find the string leaf that made literal encoding fail. Diagnostics only.

use core::fmt;

use crate::encode::primitives::escape_and_quote;
use crate::options::Charset;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Route from the document root to a node, e.g. `results[0].land_size`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(pub Vec<Segment>);

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                Segment::Key(k) if i == 0 => write!(f, "{}", k)?,
                Segment::Key(k) => write!(f, ".{}", k)?,
                Segment::Index(n) => write!(f, "[{}]", n)?,
            }
        }
        Ok(())
    }
}

/// Depth-first, document-order search for the first string value that fails
/// to encode on its own with [`Charset::Unicode`].
pub fn locate_first_unserializable_string(v: &Value) -> Option<FieldPath> {
    let mut path = Vec::new();
    if walk(v, &mut path) {
        Some(FieldPath(path))
    } else {
        None
    }
}

fn walk(v: &Value, path: &mut Vec<Segment>) -> bool {
    match v {
        Value::String(s) => escape_and_quote(s, Charset::Unicode).is_err(),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(Segment::Index(i));
                if walk(item, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
        Value::Object(members) => {
            for (k, item) in members {
                path.push(Segment::Key(k.clone()));
                if walk(item, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}
