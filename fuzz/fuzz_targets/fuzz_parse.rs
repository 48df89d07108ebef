#![no_main]
use libfuzzer_sys::fuzz_target;
use propjson::{Options, parse_with_options};

fuzz_target!(|data: &[u8]| {
    let _ = parse_with_options(data, &Options::default());
    let strict = Options {
        strict: true,
        ..Options::default()
    };
    if let Ok(v) = parse_with_options(data, &strict) {
        // Whatever strict mode accepts, the lenient parser accepts identically.
        assert_eq!(parse_with_options(data, &Options::default()).ok(), Some(v));
    }
});
