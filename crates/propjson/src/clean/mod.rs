//! The cleaning pass: a total function from any [`Value`] to a tree that the
//! encoder can always write.
//!
//! - non-finite floats become `null`
//! - strings are sanitized (see [`sanitize_string`]); sentinel texts such as
//!   `"NaN"`, `"None"` or `""` become `null`
//! - object keys are sanitized too, and keys left empty are dropped
//! - arrays and objects keep their order
//!
//! Cleaning is idempotent: `clean(&clean(v)) == clean(v)`.

mod text;

pub use text::{is_sentinel, sanitize_string};
pub(crate) use text::is_noncharacter;

use crate::options::DEFAULT_MAX_DEPTH;
use crate::value::{Number, Value, insert_member};

/// Subtrees nested deeper than this are replaced by `null`.
pub const MAX_CLEAN_DEPTH: usize = DEFAULT_MAX_DEPTH;

pub fn clean(v: &Value) -> Value {
    clean_at(v, 0)
}

fn clean_at(v: &Value, depth: usize) -> Value {
    match v {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(Number::F64(f)) if !f.is_finite() => Value::Null,
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => clean_string(s),
        Value::Array(_) | Value::Object(_) if depth >= MAX_CLEAN_DEPTH => {
            tracing::debug!(depth, "subtree exceeds cleaning depth, replaced by null");
            Value::Null
        }
        Value::Array(items) => Value::Array(items.iter().map(|i| clean_at(i, depth + 1)).collect()),
        Value::Object(members) => {
            let mut out = Vec::with_capacity(members.len());
            for (k, vv) in members {
                let key = sanitize_string(k);
                if key.is_empty() {
                    continue;
                }
                insert_member(&mut out, key, clean_at(vv, depth + 1));
            }
            Value::Object(out)
        }
    }
}

fn clean_string(s: &str) -> Value {
    let t = sanitize_string(s);
    if is_sentinel(&t) {
        Value::Null
    } else {
        Value::String(t)
    }
}
