use georeport_xml::xml::{DecodeOptions, EncodeOptions, decode, encode, needs_cdata};
use georeport_xml::{Map, Result, Value, XmlError};

fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Map(Map::from(entries))
}

fn round_trip(value: &Value) -> Result<Value> {
    let xml = encode(value, &EncodeOptions::default())?;
    decode(&xml, &DecodeOptions::default())
}

#[test]
fn test_attribute_round_trip_merges_text_under_hash() -> Result<()> {
    let element = map([("@foo", Value::from("bar")), ("#", Value::from("hello"))]);
    let value = map([("x", element.clone())]);

    let xml = encode(&value, &EncodeOptions::default())?;
    assert!(xml.contains("<x foo=\"bar\">hello</x>"));

    // With attributes present, the text lands under "#"
    assert_eq!(round_trip(&value)?, map([("x", element)]));
    Ok(())
}

#[test]
fn test_text_without_attributes_decodes_bare() -> Result<()> {
    let value = map([("x", map([("#", Value::from("hello"))]))]);
    assert_eq!(round_trip(&value)?, map([("x", Value::from("hello"))]));

    let literal = decode("<r><x foo=\"bar\">hello</x></r>", &DecodeOptions::default())?;
    assert_eq!(
        literal,
        map([(
            "x",
            map([("@foo", Value::from("bar")), ("#", Value::from("hello"))])
        )])
    );
    Ok(())
}

#[test]
fn test_cdata_trigger() -> Result<()> {
    assert!(needs_cdata("a<b"));
    assert!(needs_cdata("a&b"));
    assert!(!needs_cdata("plain"));

    let xml = encode(
        &map([("description", Value::from("a<b"))]),
        &EncodeOptions::default(),
    )?;
    assert!(xml.contains("<description><![CDATA[a<b]]></description>"));

    let plain = encode(
        &map([("description", Value::from("plain"))]),
        &EncodeOptions::default(),
    )?;
    assert!(plain.contains("<description>plain</description>"));
    Ok(())
}

#[test]
fn test_root_inference() -> Result<()> {
    let errors = map([("error", map([("code", Value::from(404))]))]);
    assert!(encode(&errors, &EncodeOptions::default())?.contains("<errors><error><code>404</code>"));

    let services = Value::List(vec![map([("metadata", Value::from(true))])]);
    assert!(encode(&services, &EncodeOptions::default())?.contains("<services>"));

    let discovery = map([("changeset", Value::from("2024-01-01"))]);
    assert!(
        encode(&discovery, &EncodeOptions::default())?
            .contains("<discovery><changeset>2024-01-01</changeset></discovery>")
    );

    let requests = Value::List(vec![map([("service_request_id", Value::from(1))])]);
    assert!(encode(&requests, &EncodeOptions::default())?.contains("<service_requests>"));
    Ok(())
}

#[test]
fn test_root_inference_ignores_requested_name() -> Result<()> {
    let options = EncodeOptions {
        root_node_name: Some("response".to_string()),
        ..Default::default()
    };
    let xml = encode(&map([("error", Value::from("x"))]), &options)?;
    assert!(xml.contains("<errors>"));
    assert!(!xml.contains("<response>"));
    Ok(())
}

#[test]
fn test_list_of_one_collapses_on_decode() -> Result<()> {
    let value = map([(
        "request",
        Value::List(vec![map([("id", Value::from(1))])]),
    )]);

    let decoded = round_trip(&value)?;
    // The singular shape comes back, not a one-item list
    assert_eq!(decoded, map([("request", map([("id", Value::from("1"))]))]));
    assert_ne!(
        decoded,
        map([("request", Value::List(vec![map([("id", Value::from("1"))])]))])
    );

    let collected = decode(
        &encode(&value, &EncodeOptions::default())?,
        &DecodeOptions {
            as_collection: true,
            ..Default::default()
        },
    )?;
    assert_eq!(
        collected,
        map([("request", Value::List(vec![map([("id", Value::List(vec![Value::from("1")]))])]))])
    );
    Ok(())
}

#[test]
fn test_fallback_element_naming() -> Result<()> {
    let service = map([("0", map([("metadata", Value::from(true))]))]);
    let xml = encode(&service, &EncodeOptions::default())?;
    assert!(xml.contains("<service key=\"0\"><metadata>1</metadata></service>"));

    let request = map([("0", map([("name", Value::from("x"))]))]);
    let xml = encode(&request, &EncodeOptions::default())?;
    assert!(xml.contains("<request key=\"0\"><name>x</name></request>"));

    let endpoint = map([("endpoints", map([("3", map([("changeset", Value::from("c"))]))]))]);
    let xml = encode(&endpoint, &EncodeOptions::default())?;
    // A lone digit key counts as list-like, so "endpoints" itself repeats
    assert!(xml.contains("<endpoints><changeset>c</changeset></endpoints>"));

    let nested = map([("wrap", map([("3", map([("changeset", Value::from("c"))])), ("x", Value::from(1))]))]);
    let xml = encode(&nested, &EncodeOptions::default())?;
    assert!(xml.contains("<wrap><endpoint key=\"3\"><changeset>c</changeset></endpoint><x>1</x></wrap>"));
    Ok(())
}

#[test]
fn test_item_key_reconstruction() -> Result<()> {
    let decoded = decode(
        "<r><item key=\"a\">1</item><item key=\"b\"><c>2</c></item></r>",
        &DecodeOptions::default(),
    )?;
    assert_eq!(
        decoded,
        map([
            ("a", Value::from("1")),
            ("b", map([("@key", Value::from("b")), ("c", Value::from("2"))])),
        ])
    );
    Ok(())
}

#[test]
fn test_attribute_only_maps_round_trip() -> Result<()> {
    let cases = vec![
        map([("@id", Value::from(5))]),
        map([("@status", Value::from("open")), ("@count", Value::from(12))]),
        map([
            ("@title", Value::from("Fish & \"chips\" <today>")),
            ("@lang", Value::from("en")),
        ]),
        map([("@note", Value::from("line1\nline2\tx\r\ny"))]),
    ];
    for case in cases {
        assert_eq!(round_trip(&case)?, case);
    }
    Ok(())
}

#[test]
fn test_text_line_endings_survive() -> Result<()> {
    let value = map([("d", Value::from("a\r\nb\rc"))]);
    assert_eq!(round_trip(&value)?, value);
    Ok(())
}

#[test]
fn test_deep_nesting_is_rejected() {
    let xml = "<r>".repeat(100_000) + &"</r>".repeat(100_000);
    assert!(matches!(
        decode(&xml, &DecodeOptions::default()),
        Err(XmlError::MalformedXml(_))
    ));
}

#[test]
fn test_attribute_numeric_coercion_is_attribute_only() -> Result<()> {
    let decoded = decode("<r><n id=\"42\">42</n></r>", &DecodeOptions::default())?;
    assert_eq!(
        decoded,
        map([("n", map([("@id", Value::from(42)), ("#", Value::from("42"))]))])
    );
    Ok(())
}

#[test]
fn test_boolean_asymmetry() -> Result<()> {
    let value = map([
        ("@flag", Value::from(false)),
        ("enabled", Value::from(false)),
    ]);
    let xml = encode(&value, &EncodeOptions::default())?;
    assert!(xml.contains("<service_requests flag=\"\"><enabled>0</enabled></service_requests>"));
    Ok(())
}

#[test]
fn test_scalar_root() -> Result<()> {
    let xml = encode(&Value::from("ok"), &EncodeOptions::default())?;
    assert!(xml.ends_with("<service_requests>ok</service_requests>\n"));
    assert_eq!(decode(&xml, &DecodeOptions::default())?, Value::from("ok"));

    let xml = encode(&Value::Null, &EncodeOptions::default())?;
    assert!(xml.ends_with("<service_requests/>\n"));
    Ok(())
}

#[test]
fn test_unserializable_value() {
    let value = map([("lat", Value::from(f64::INFINITY))]);
    let err = encode(&value, &EncodeOptions::default()).unwrap_err();
    assert!(matches!(err, XmlError::UnserializableValue(ref repr) if repr.contains("inf")));
}

#[test]
fn test_failure_scenarios() {
    let options = DecodeOptions::default();
    assert!(matches!(decode("", &options), Err(XmlError::EmptyDocument)));
    assert!(matches!(decode("   \n", &options), Err(XmlError::EmptyDocument)));
    assert!(matches!(
        decode("<a><b></a>", &options),
        Err(XmlError::MalformedXml(_))
    ));
    assert!(matches!(
        decode("<!DOCTYPE foo><a/>", &options),
        Err(XmlError::DoctypeNotAllowed)
    ));
    assert!(matches!(
        decode("<a/><b/>", &options),
        Err(XmlError::MalformedXml(_))
    ));
}

#[test]
fn test_namespaces_surface_on_outer_value() -> Result<()> {
    let decoded = decode(
        "<service_requests xmlns:georss=\"http://www.georss.org/georss\">\
         <request><georss:point>37.76 -122.46</georss:point></request></service_requests>",
        &DecodeOptions::default(),
    )?;
    assert_eq!(
        decoded,
        map([
            ("@xmlns:georss", Value::from("http://www.georss.org/georss")),
            ("request", map([("georss:point", Value::from("37.76 -122.46"))])),
        ])
    );
    Ok(())
}
