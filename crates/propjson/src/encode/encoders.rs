use crate::{Result, encode::writer::JsonWriter, value::Value};

pub fn encode_value(value: &Value, w: &mut JsonWriter) -> Result<()> {
    match value {
        Value::Null => w.null(),
        Value::Bool(b) => w.bool(*b),
        Value::Number(n) => w.number(n)?,
        Value::String(s) => w.string(s)?,
        Value::Array(items) => {
            w.punct('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    w.punct(',');
                }
                encode_value(item, w)?;
            }
            w.punct(']');
        }
        Value::Object(members) => {
            w.punct('{');
            for (i, (k, v)) in members.iter().enumerate() {
                if i > 0 {
                    w.punct(',');
                }
                w.key(k)?;
                encode_value(v, w)?;
            }
            w.punct('}');
        }
    }
    Ok(())
}
