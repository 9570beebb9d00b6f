use jsonkit_core::{decode_string, encode, encode_string, parse, Value};

/// Assert that parse → encode reproduces `json` byte for byte.
fn assert_canonical(json: &str) {
    let value = parse(json).expect("parse failed");
    let encoded = encode(&value).expect("encode failed");
    assert_eq!(encoded, json, "canonical text changed");
}

/// Assert that parse → encode → parse yields the same tree and that the
/// second encoding matches the first.
fn assert_roundtrip(json: &str) {
    let first = parse(json).expect("parse failed");
    let encoded = encode(&first).expect("encode failed");
    let second = parse(&encoded).expect("re-parse failed");
    assert_eq!(
        first, second,
        "Roundtrip failed:\n  input:   {json}\n  encoded: {encoded}"
    );
    assert_eq!(encode(&second).unwrap(), encoded, "encoding not idempotent");
}

// ============================================================================
// Canonical documents
// ============================================================================

#[test]
fn canonical_flat_array() {
    assert_canonical(r#"[1,-2,3.5,true,false,null,"x"]"#);
}

#[test]
fn canonical_object() {
    assert_canonical(r#"{"id":1,"name":"Ada","active":true}"#);
}

#[test]
fn canonical_nested() {
    assert_canonical(r#"{"users":[{"id":1,"tags":["a","b"]},{"id":2,"tags":[]}],"meta":{}}"#);
}

#[test]
fn canonical_float_forms() {
    assert_canonical("[1.0,0.5,1e300,1e-7,-0.0]");
}

#[test]
fn canonical_escaped_text() {
    assert_canonical(r#"["a\/b","q\"uote","back\\slash","\n\t"]"#);
}

// ============================================================================
// Normalizing documents
// ============================================================================

#[test]
fn roundtrip_whitespace_removed() {
    let value = parse("{\n  \"a\" : [ 1 , 2 ] ,\n  \"b\" : null\n}\n").unwrap();
    assert_eq!(encode(&value).unwrap(), r#"{"a":[1,2],"b":null}"#);
}

#[test]
fn roundtrip_keyword_case_normalized() {
    let value = parse("[TRUE,False,NULL]").unwrap();
    assert_eq!(encode(&value).unwrap(), "[true,false,null]");
}

#[test]
fn roundtrip_exponent_integer_becomes_float() {
    let value = parse("[1E3, 2e0]").unwrap();
    assert_eq!(encode(&value).unwrap(), "[1000.0,2.0]");
}

#[test]
fn roundtrip_unicode_escapes_decoded() {
    let value = parse(r#"["\u0041\u00e9\ud83d\ude00"]"#).unwrap();
    assert_eq!(encode(&value).unwrap(), "[\"A\u{e9}\u{1F600}\"]");
}

#[test]
fn roundtrip_unescaped_slash_gains_escape() {
    let value = parse(r#"["a/b"]"#).unwrap();
    assert_eq!(encode(&value).unwrap(), r#"["a\/b"]"#);
}

#[test]
fn roundtrip_duplicate_keys_collapse() {
    let value = parse(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    assert_eq!(encode(&value).unwrap(), r#"{"b":2,"a":3}"#);
}

#[test]
fn roundtrip_empty_slots_dropped() {
    let value = parse("[1,,2,]").unwrap();
    assert_eq!(encode(&value).unwrap(), "[1,2]");
}

// ============================================================================
// Trees and strings
// ============================================================================

#[test]
fn roundtrip_mixed_documents() {
    for json in [
        "[]",
        "{}",
        "[[[[]]]]",
        r#"{"a":{"b":{"c":{"d":[1,2,{"e":null}]}}}}"#,
        r#"[9223372036854775807,-9223372036854775808,5e-324,1.7976931348623157e308]"#,
        r#"{"":"","\u0000":"\u001f","\u2028":"\u20ff"}"#,
        r#"{"key with spaces":"[not, an: array]"}"#,
    ] {
        assert_roundtrip(json);
    }
}

#[test]
fn roundtrip_all_control_characters() {
    let text: String = (0u32..0x20).filter_map(char::from_u32).collect();
    let encoded = encode(&Value::List(vec![Value::Text(text.clone())])).unwrap();
    assert!(!encoded.chars().any(|c| c.is_control()));
    let parsed = parse(&encoded).unwrap();
    assert_eq!(parsed.as_list().unwrap()[0].as_str(), Some(text.as_str()));
}

#[test]
fn roundtrip_string_literals() {
    for s in [
        "",
        "plain",
        "\"quoted\"",
        "back\\slash",
        "tab\tnew\nline",
        "\u{7f}\u{85}\u{2003}",
        "caf\u{e9} \u{1F600}",
    ] {
        assert_eq!(decode_string(&encode_string(s)).unwrap(), s);
    }
}
