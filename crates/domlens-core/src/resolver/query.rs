//! Address structures produced by the model and their resolved form.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A JSON answer whose string leaves are addresses.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressQuery {
    Array(Vec<AddressQuery>),
    Mapping(IndexMap<String, AddressQuery>),
    /// An address; the empty string means "not found".
    Address(String),
    /// Numbers, booleans and null pass through resolution unchanged.
    Scalar(Value),
}

impl From<Value> for AddressQuery {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => AddressQuery::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                AddressQuery::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::String(address) => AddressQuery::Address(address),
            other => AddressQuery::Scalar(other),
        }
    }
}

impl From<&str> for AddressQuery {
    fn from(address: &str) -> Self {
        AddressQuery::Address(address.to_string())
    }
}

impl AddressQuery {
    /// Every address leaf, depth first, empty strings included.
    pub fn addresses(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_addresses(&mut out);
        out
    }

    fn collect_addresses<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            AddressQuery::Array(items) => items.iter().for_each(|i| i.collect_addresses(out)),
            AddressQuery::Mapping(map) => map.values().for_each(|v| v.collect_addresses(out)),
            AddressQuery::Address(address) => out.push(address),
            AddressQuery::Scalar(_) => {}
        }
    }
}

/// An [`AddressQuery`] with every address replaced by a lookup result.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Array(Vec<Resolved<T>>),
    Mapping(IndexMap<String, Resolved<T>>),
    /// `None` when no element carries the address.
    Leaf(Option<T>),
    Scalar(Value),
}

impl<T> Resolved<T> {
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Resolved::Leaf(value) => value.as_ref(),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Resolved<T>> {
        match self {
            Resolved::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    pub fn index(&self, i: usize) -> Option<&Resolved<T>> {
        match self {
            Resolved::Array(items) => items.get(i),
            _ => None,
        }
    }

    /// Transform every found leaf.
    pub fn map<U>(self, f: &impl Fn(T) -> U) -> Resolved<U> {
        match self {
            Resolved::Array(items) => Resolved::Array(items.into_iter().map(|i| i.map(f)).collect()),
            Resolved::Mapping(map) => {
                Resolved::Mapping(map.into_iter().map(|(k, v)| (k, v.map(f))).collect())
            }
            Resolved::Leaf(value) => Resolved::Leaf(value.map(f)),
            Resolved::Scalar(value) => Resolved::Scalar(value),
        }
    }

    /// Found leaves, depth first.
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a T>) {
        match self {
            Resolved::Array(items) => items.iter().for_each(|i| i.collect_leaves(out)),
            Resolved::Mapping(map) => map.values().for_each(|v| v.collect_leaves(out)),
            Resolved::Leaf(Some(value)) => out.push(value),
            Resolved::Leaf(None) | Resolved::Scalar(_) => {}
        }
    }
}

impl<T: Serialize> Serialize for Resolved<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Resolved::Array(items) => items.serialize(serializer),
            Resolved::Mapping(map) => map.serialize(serializer),
            Resolved::Leaf(value) => value.serialize(serializer),
            Resolved::Scalar(value) => value.serialize(serializer),
        }
    }
}

impl<T: Serialize> Resolved<T> {
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_keeps_shape_and_order() {
        let query = AddressQuery::from(json!({"z": ["a1", "a2"], "a": "a3", "n": 7}));
        let AddressQuery::Mapping(map) = &query else {
            panic!("expected mapping");
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a", "n"]);
        assert_eq!(map["n"], AddressQuery::Scalar(json!(7)));
        assert_eq!(query.addresses(), vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_resolved_serializes_untagged() {
        let mut map = IndexMap::new();
        map.insert("found".to_string(), Resolved::Leaf(Some("div > p".to_string())));
        map.insert("missing".to_string(), Resolved::Leaf(None));
        map.insert("n".to_string(), Resolved::Scalar(json!(true)));
        map.insert(
            "list".to_string(),
            Resolved::Array(vec![Resolved::Leaf(Some("a".to_string()))]),
        );
        let resolved = Resolved::Mapping(map);
        assert_eq!(
            resolved.to_json(),
            json!({"found": "div > p", "missing": null, "n": true, "list": ["a"]})
        );
    }

    #[test]
    fn test_map_and_leaves() {
        let resolved = Resolved::Array(vec![
            Resolved::Leaf(Some(2)),
            Resolved::Leaf(None),
            Resolved::Scalar(json!("x")),
            Resolved::Leaf(Some(5)),
        ]);
        let doubled = resolved.map(&|n| n * 2);
        assert_eq!(doubled.leaves(), vec![&4, &10]);
        assert_eq!(doubled.index(0).and_then(Resolved::as_leaf), Some(&4));
        assert!(doubled.index(1).and_then(Resolved::as_leaf).is_none());
    }
}
