use propjson::{Options, parse, safe_serialize};

#[test]
fn upstream_payload_with_nan_and_superscript() -> Result<(), Box<dyn std::error::Error>> {
    let upstream = "{\"results\":[{\"price\": NaN, \"land_size\": \"973m\u{00B2}\"}]}";
    let out = safe_serialize(&parse(upstream.as_bytes())?);
    assert_eq!(out.status, 200);
    let body: serde_json::Value = serde_json::from_slice(&out.body)?;
    assert_eq!(
        body,
        serde_json::json!({"results":[{"price": null, "land_size": "973m sqm"}]})
    );
    Ok(())
}

#[test]
fn realistic_listing_survives_intact() -> Result<(), Box<dyn std::error::Error>> {
    let upstream = r#"{
        "results": [
            {
                "address": {"street": "12 Oak St", "sal": "Belmont", "state": "WA"},
                "price": 1250000,
                "attributes": {"bedrooms": 3, "bathrooms": NaN, "garage_spaces": "None", "land_size": "612 m²"},
                "listing_date": "2024-05-01",
                "description": "Renovated kitchen • North–facing ’yard’\u0003"
            }
        ]
    }"#;
    let out = safe_serialize(&parse(upstream.as_bytes())?);
    let body: serde_json::Value = serde_json::from_slice(&out.body)?;
    let listing = &body["results"][0];
    assert_eq!(listing["price"], 1250000);
    assert_eq!(listing["attributes"]["bedrooms"], 3);
    assert!(listing["attributes"]["bathrooms"].is_null());
    assert!(listing["attributes"]["garage_spaces"].is_null());
    assert_eq!(listing["attributes"]["land_size"], "612 m sqm");
    assert_eq!(
        listing["description"],
        "Renovated kitchen - North-facing 'yard'"
    );
    Ok(())
}

#[test]
fn preview_len_is_clamped() {
    assert_eq!(Options::default().with_preview_len(10).preview_len, 200);
    assert_eq!(Options::default().with_preview_len(5000).preview_len, 1000);
    assert_eq!(Options::default().with_preview_len(300).preview_len, 300);
}
