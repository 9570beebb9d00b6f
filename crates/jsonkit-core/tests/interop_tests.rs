use std::collections::BTreeMap;

use jsonkit_core::{
    encode, encode_serialize, parse, parse_with, to_value, JsonError, Mapping, ParseOptions,
    SerdeJsonFactory, Value,
};
use serde::Serialize;
use serde_json::json;

// ============================================================================
// serde_json conversions
// ============================================================================

#[test]
fn from_serde_json_value() {
    let value = Value::from(json!({"a": [1, 2.5, "x", null, true]}));
    assert_eq!(value, parse(r#"{"a":[1,2.5,"x",null,true]}"#).unwrap());
}

#[test]
fn from_serde_json_large_unsigned_becomes_float() {
    let value = Value::from(json!(u64::MAX));
    assert_eq!(value, Value::Float(u64::MAX as f64));
}

#[test]
fn into_serde_json_value() {
    let value = parse(r#"{"b":[1,2.5],"a":"x"}"#).unwrap();
    let converted = serde_json::Value::from(value);
    assert_eq!(converted, json!({"b": [1, 2.5], "a": "x"}));
    assert_eq!(serde_json::to_string(&converted).unwrap(), r#"{"b":[1,2.5],"a":"x"}"#);
}

#[test]
fn into_serde_json_non_finite_becomes_null() {
    let converted = serde_json::Value::from(Value::List(vec![Value::Float(f64::NAN)]));
    assert_eq!(converted, json!([null]));
}

#[test]
fn serde_json_value_is_self_describing() {
    let doc = json!({"z": 1, "a": [true, "s/t"], "f": 0.5});
    assert_eq!(encode(&doc).unwrap(), r#"{"z":1,"a":[true,"s\/t"],"f":0.5}"#);
}

#[test]
fn serde_json_oracle_agrees_on_samples() {
    for json in [
        r#"{"a":1,"b":[true,false,null],"c":{"d":"e"}}"#,
        r#"[0.25,-17,"tab\there",{"nested":[[],{}]}]"#,
        r#"{"unicode":"\u00e9\ud83d\ude00","quote":"\""}"#,
    ] {
        let ours = parse(json).unwrap();
        let theirs: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(ours, Value::from(theirs), "disagreement on {json}");
    }
}

// ============================================================================
// SerdeJsonFactory
// ============================================================================

#[test]
fn serde_json_factory_builds_serde_json_trees() {
    let text = r#"{"name":"Ada","langs":["en","fr"],"age":36,"score":9.5}"#;
    let parsed = parse_with(text, &SerdeJsonFactory, &ParseOptions::default()).unwrap();
    let expected: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn serde_json_factory_keeps_first_position_for_duplicates() {
    let parsed = parse_with(
        r#"{"a":1,"b":2,"a":3}"#,
        &SerdeJsonFactory,
        &ParseOptions::default(),
    )
    .unwrap();
    let keys: Vec<&String> = parsed.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(parsed["a"], json!(3));
}

#[test]
fn serde_json_factory_reports_same_errors() {
    let err = parse_with(r#"{"a":}"#, &SerdeJsonFactory, &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, JsonError::Structural { offset: 5, .. }));
}

// ============================================================================
// serde Serialize bridge
// ============================================================================

#[derive(Serialize)]
struct User {
    id: u32,
    name: String,
    email: Option<String>,
    roles: Vec<Role>,
    weight: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    Admin,
    Viewer,
}

#[derive(Serialize)]
enum Shape {
    Circle(f64),
    Rect { w: u8, h: u8 },
    Line(i32, i32),
}

#[test]
fn to_value_struct() {
    let user = User {
        id: 7,
        name: "Ada".to_string(),
        email: None,
        roles: vec![Role::Admin, Role::Viewer],
        weight: 61.0,
    };
    assert_eq!(
        encode_serialize(&user).unwrap(),
        r#"{"id":7,"name":"Ada","email":null,"roles":["admin","viewer"],"weight":61.0}"#
    );
}

#[test]
fn to_value_enum_variants_externally_tagged() {
    let shapes = vec![
        Shape::Circle(1.5),
        Shape::Rect { w: 2, h: 3 },
        Shape::Line(-1, 1),
    ];
    assert_eq!(
        encode_serialize(&shapes).unwrap(),
        r#"[{"Circle":1.5},{"Rect":{"w":2,"h":3}},{"Line":[-1,1]}]"#
    );
}

#[test]
fn to_value_tuples_and_unit() {
    assert_eq!(encode_serialize(&(1, "a", ())).unwrap(), r#"[1,"a",null]"#);
}

#[test]
fn to_value_string_keyed_maps() {
    let mut map = BTreeMap::new();
    map.insert("b", vec![1u64, 2]);
    map.insert("a", vec![]);
    let value = to_value(&map).unwrap();
    assert_eq!(encode(&value).unwrap(), r#"{"a":[],"b":[1,2]}"#);
}

#[test]
fn to_value_rejects_non_string_keys() {
    let mut map = BTreeMap::new();
    map.insert(1, "one");
    match to_value(&map) {
        Err(JsonError::UnsupportedValue(message)) => {
            assert!(message.contains("map key must be a string"), "{message}")
        }
        other => panic!("expected unsupported value, got {other:?}"),
    }
}

#[test]
fn to_value_rejects_integers_beyond_i64() {
    assert!(matches!(
        to_value(&u64::MAX),
        Err(JsonError::UnsupportedValue(_))
    ));
    assert!(matches!(
        to_value(&i128::MIN),
        Err(JsonError::UnsupportedValue(_))
    ));
    assert_eq!(to_value(&(i64::MAX as u64)).unwrap(), Value::Integer(i64::MAX));
}

#[test]
fn value_serializes_through_serde_json() {
    let mut map = Mapping::new();
    map.insert("z", Value::from(vec![Value::Float(0.5), Value::Null]));
    map.insert("a", Value::from("s"));
    let value = Value::Mapping(map);
    assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"z":[0.5,null],"a":"s"}"#);
    assert_eq!(to_value(&value).unwrap(), value);
}
