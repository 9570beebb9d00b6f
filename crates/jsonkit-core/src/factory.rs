//! Container construction for the parser.
//!
//! The parser never builds lists or mappings itself. Each time a container is
//! opened it asks a [`ContainerFactory`] for an empty one, feeds it elements,
//! and finally asks the factory to wrap the finished container as a value.
//! Swapping the factory lets callers parse straight into another collection
//! ecosystem (see [`crate::interop::SerdeJsonFactory`]).

use crate::value::{Mapping, Scalar, Value};

/// Builds the list and mapping containers that hold parsed data.
pub trait ContainerFactory {
    /// The tree node type the parser returns.
    type Value;
    /// In-progress array container.
    type List;
    /// In-progress object container.
    type Map;

    fn create_list(&self) -> Self::List;

    fn create_map(&self) -> Self::Map;

    fn push(&self, list: &mut Self::List, value: Self::Value);

    /// Store `value` under `key`. Duplicate keys are resolved by the container.
    fn insert(&self, map: &mut Self::Map, key: String, value: Self::Value);

    fn finish_list(&self, list: Self::List) -> Self::Value;

    fn finish_map(&self, map: Self::Map) -> Self::Value;

    /// Convert a scanned literal or string into a tree node.
    fn scalar(&self, scalar: Scalar) -> Self::Value;
}

/// Default factory producing [`Value`] trees backed by `Vec` and [`Mapping`].
///
/// Stateless, so a single instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueFactory;

impl ContainerFactory for ValueFactory {
    type Value = Value;
    type List = Vec<Value>;
    type Map = Mapping;

    fn create_list(&self) -> Vec<Value> {
        Vec::new()
    }

    fn create_map(&self) -> Mapping {
        Mapping::new()
    }

    fn push(&self, list: &mut Vec<Value>, value: Value) {
        list.push(value);
    }

    fn insert(&self, map: &mut Mapping, key: String, value: Value) {
        map.insert(key, value);
    }

    fn finish_list(&self, list: Vec<Value>) -> Value {
        Value::List(list)
    }

    fn finish_map(&self, map: Mapping) -> Value {
        Value::Mapping(map)
    }

    fn scalar(&self, scalar: Scalar) -> Value {
        scalar.into()
    }
}
