#![no_main]
use libfuzzer_sys::fuzz_target;
use propjson::{clean, parse};

fuzz_target!(|data: &[u8]| {
    if let Ok(v) = parse(data) {
        let once = clean(&v);
        assert_eq!(clean(&once), once);
    }
});
