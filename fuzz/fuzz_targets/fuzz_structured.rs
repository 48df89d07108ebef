#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::{arbitrary, fuzz_target};
use propjson::{Charset, Number, Value, clean, encode, safe_serialize};

const MAX_DEPTH: usize = 8;
const MAX_ARRAY_SIZE: usize = 20;
const MAX_OBJECT_SIZE: usize = 20;

#[derive(Arbitrary, Debug)]
struct FuzzValue {
    choice: u8,
}

impl FuzzValue {
    fn to_value(&self, u: &mut arbitrary::Unstructured, depth: usize) -> arbitrary::Result<Value> {
        if depth >= MAX_DEPTH {
            return Ok(Value::Null);
        }

        Ok(match self.choice % 10 {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::Number(Number::I64(u.arbitrary()?)),
            3 => Value::Number(Number::F64(u.arbitrary()?)),
            4 => Value::String(u.arbitrary()?),
            5..=7 => {
                let size = u.int_in_range(0..=MAX_ARRAY_SIZE)?;
                let mut arr = Vec::with_capacity(size);
                for _ in 0..size {
                    let fv: FuzzValue = u.arbitrary()?;
                    arr.push(fv.to_value(u, depth + 1)?);
                }
                Value::Array(arr)
            }
            _ => {
                let size = u.int_in_range(0..=MAX_OBJECT_SIZE)?;
                let mut members = Vec::with_capacity(size);
                for _ in 0..size {
                    let key: String = u.arbitrary()?;
                    let fv: FuzzValue = u.arbitrary()?;
                    members.push((key, fv.to_value(u, depth + 1)?));
                }
                Value::Object(members)
            }
        })
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);
    let Ok(root) = FuzzValue::arbitrary(&mut u) else {
        return;
    };
    let Ok(value) = root.to_value(&mut u, 0) else {
        return;
    };

    let out = safe_serialize(&value);
    assert_eq!(out.status, 200);
    assert!(serde_json::from_slice::<serde_json::Value>(&out.body).is_ok());

    // The ASCII tier accepts every cleaned tree.
    assert!(encode(&clean(&value), Charset::Ascii).is_ok());
});
