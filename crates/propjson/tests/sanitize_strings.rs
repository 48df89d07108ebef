use propjson::{Charset, Value, clean, encode, sanitize_string};

#[test]
fn superscript_two_reads_as_sqm() {
    assert_eq!(sanitize_string("973\u{00B2} m"), "973 sqm m");
    assert_eq!(sanitize_string("973m\u{00B2}"), "973m sqm");
}

#[test]
fn typographic_text_re_encodes_without_error() -> Result<(), Box<dyn std::error::Error>> {
    let cleaned = clean(&Value::from("caf\u{00E9}\u{2019}s\u{00A0}\u{2022}\u{2013}"));
    assert_eq!(cleaned, Value::from("caf\u{00E9}'s --"));
    assert_eq!(encode(&cleaned, Charset::Unicode)?, "\"caf\u{00E9}'s --\"");
    assert_eq!(encode(&cleaned, Charset::Ascii)?, "\"caf\\u00e9's --\"");
    Ok(())
}

#[test]
fn accented_and_cjk_text_is_preserved() {
    assert_eq!(sanitize_string("Doncaster East 東"), "Doncaster East 東");
    assert_eq!(sanitize_string("Malvern\u{2026}"), "Malvern...");
}

#[test]
fn sanitize_is_idempotent() {
    let raw = "a\u{0000}\u{00A0}\u{00B2}\u{201C}x\u{201D}\u{FFFF}\u{0085}\t";
    let once = sanitize_string(raw);
    assert_eq!(sanitize_string(&once), once);
    assert_eq!(once, "a  sqm\"x\"\t");
}
