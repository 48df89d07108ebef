#![no_main]
use libfuzzer_sys::fuzz_target;
use propjson::{Charset, parse, safe_serialize};

fuzz_target!(|data: &[u8]| {
    let Ok(v) = parse(data) else {
        return;
    };
    let out = safe_serialize(&v);
    assert_eq!(out.status, 200);
    if let Err(e) = serde_json::from_slice::<serde_json::Value>(&out.body) {
        panic!("strict parser rejected {:?}: {}", out.as_str(), e);
    }
    if out.charset == Charset::Ascii {
        assert!(out.body.is_ascii());
    }
});
