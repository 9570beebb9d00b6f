//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! Also provides [`SerdeJsonFactory`], a container factory that makes the
//! parser build `serde_json` trees directly instead of [`Value`] trees.

use serde_json::{Map, Number};

use crate::encoder::{write_entries, SelfDescribing};
use crate::error::Result;
use crate::factory::ContainerFactory;
use crate::value::{Scalar, Value};

/// Integers outside the `i64` range become floats.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Non-finite floats become `null`, matching the encoder.
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Integer(n) => serde_json::Value::Number(n.into()),
            Value::Float(f) => float_to_json(f),
            Value::Text(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

fn float_to_json(f: f64) -> serde_json::Value {
    Number::from_f64(f).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

/// Parses into `serde_json::Value` trees.
///
/// With `serde_json`'s `preserve_order` feature, a duplicate key keeps the
/// position of its first occurrence and takes the value of its last.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonFactory;

impl ContainerFactory for SerdeJsonFactory {
    type Value = serde_json::Value;
    type List = Vec<serde_json::Value>;
    type Map = Map<String, serde_json::Value>;

    fn create_list(&self) -> Self::List {
        Vec::new()
    }

    fn create_map(&self) -> Self::Map {
        Map::new()
    }

    fn push(&self, list: &mut Self::List, value: serde_json::Value) {
        list.push(value);
    }

    fn insert(&self, map: &mut Self::Map, key: String, value: serde_json::Value) {
        map.insert(key, value);
    }

    fn finish_list(&self, list: Self::List) -> serde_json::Value {
        serde_json::Value::Array(list)
    }

    fn finish_map(&self, map: Self::Map) -> serde_json::Value {
        serde_json::Value::Object(map)
    }

    fn scalar(&self, scalar: Scalar) -> serde_json::Value {
        match scalar {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(b),
            Scalar::Integer(n) => serde_json::Value::Number(n.into()),
            Scalar::Float(f) => float_to_json(f),
            Scalar::Text(s) => serde_json::Value::String(s),
        }
    }
}

impl SelfDescribing for serde_json::Value {
    fn write_json(&self, out: &mut String) -> Result<()> {
        match self {
            serde_json::Value::Null => out.push_str("null"),
            serde_json::Value::Bool(b) => b.write_json(out)?,
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.write_json(out)?;
                } else if let Some(u) = n.as_u64() {
                    u.write_json(out)?;
                } else if let Some(f) = n.as_f64() {
                    f.write_json(out)?;
                } else {
                    out.push_str("null");
                }
            }
            serde_json::Value::String(s) => s.write_json(out)?,
            serde_json::Value::Array(items) => items.write_json(out)?,
            serde_json::Value::Object(map) => write_entries(map, out)?,
        }
        Ok(())
    }
}
