use propjson::{
    Charset, Error, FieldPath, Options, Segment, Value, encode, locate_first_unserializable_string,
    parse, safe_serialize, safe_serialize_with,
};

#[test]
fn unicode_tier_is_preferred() -> Result<(), Box<dyn std::error::Error>> {
    let v = parse("{\"suburb\": \"Doncaster East\", \"note\": \"caf\u{00E9}\"}".as_bytes())?;
    let out = safe_serialize(&v);
    assert_eq!(out.status, 200);
    assert_eq!(out.charset, Charset::Unicode);
    assert_eq!(out.as_str(), "{\"suburb\":\"Doncaster East\",\"note\":\"caf\u{00E9}\"}");
    Ok(())
}

#[test]
fn line_separator_falls_back_to_ascii() -> Result<(), Box<dyn std::error::Error>> {
    let v = parse("{\"results\":[{\"desc\":\"caf\u{00E9}\u{2028}view\"}]}".as_bytes())?;
    assert!(matches!(
        encode(&v, Charset::Unicode),
        Err(Error::Unencodable { code: 0x2028 })
    ));
    let out = safe_serialize(&v);
    assert_eq!(out.status, 200);
    assert_eq!(out.charset, Charset::Ascii);
    assert_eq!(out.as_str(), r#"{"results":[{"desc":"caf\u00e9\u2028view"}]}"#);
    let reparsed: serde_json::Value = serde_json::from_slice(&out.body)?;
    assert_eq!(reparsed["results"][0]["desc"], "caf\u{00E9}\u{2028}view");
    Ok(())
}

#[test]
fn locator_reports_the_offending_field() -> Result<(), Box<dyn std::error::Error>> {
    let v = parse("{\"results\":[{\"ok\":\"fine\"},{\"id\":1,\"land_size\":\"x\u{2029}\"}]}".as_bytes())?;
    let path = locate_first_unserializable_string(&v).ok_or("expected a path")?;
    assert_eq!(
        path,
        FieldPath(vec![
            Segment::Key("results".into()),
            Segment::Index(1),
            Segment::Key("land_size".into()),
        ])
    );
    assert_eq!(path.to_string(), "results[1].land_size");
    Ok(())
}

#[test]
fn locator_finds_nothing_in_clean_tree() -> Result<(), Box<dyn std::error::Error>> {
    let v = parse(br#"{"a":["b",{"c":"d"}],"e":NaN}"#)?;
    assert_eq!(locate_first_unserializable_string(&v), None);
    Ok(())
}

#[test]
fn locator_handles_root_string() {
    let path = locate_first_unserializable_string(&Value::from("\u{2028}"));
    assert_eq!(path.map(|p| p.to_string()).as_deref(), Some("$"));
}

#[test]
fn non_finite_fails_both_tiers_without_cleaning() {
    let v = Value::Array(vec![Value::from(f64::NAN)]);
    assert!(matches!(encode(&v, Charset::Unicode), Err(Error::NonFinite(_))));
    assert!(matches!(encode(&v, Charset::Ascii), Err(Error::NonFinite(_))));
    let out = safe_serialize(&v);
    assert_eq!(out.status, 200);
    assert_eq!(out.as_str(), "[null]");
}

#[test]
fn astral_characters_use_surrogate_pairs_in_ascii_mode() {
    let opts = Options {
        ascii_only: true,
        ..Options::default()
    };
    let out = safe_serialize_with(&Value::from("home \u{1F3E0}"), &opts);
    assert_eq!(out.as_str(), r#""home \ud83c\udfe0""#);
}

#[test]
fn error_envelopes_go_through_the_same_path() {
    let v = Value::object([
        ("error", Value::from("API request failed with status 503")),
        ("details", Value::from("Service\u{0000} Unavailable\u{00A0}")),
    ]);
    let out = safe_serialize(&v);
    assert_eq!(
        out.as_str(),
        r#"{"error":"API request failed with status 503","details":"Service Unavailable "}"#
    );
}
