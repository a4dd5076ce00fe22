// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Handles stack names, regions and order-preserving key/value maps.

use serde::Deserialize;
use serde::de::{MapAccess, Visitor};
use std::fmt;

use crate::control::{Parameter, Tag};
use crate::types::{Region, StackName};

pub fn deserialize_stack_name<'de, D>(deserializer: D) -> Result<StackName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    StackName::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_stack_name_option<'de, D>(deserializer: D) -> Result<Option<StackName>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| StackName::new(&s).map_err(serde::de::Error::custom))
        .transpose()
}

pub fn deserialize_region<'de, D>(deserializer: D) -> Result<Region, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Region::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_region_option<'de, D>(deserializer: D) -> Result<Option<Region>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| Region::new(&s).map_err(serde::de::Error::custom))
        .transpose()
}

pub fn deserialize_parameters<'de, D>(deserializer: D) -> Result<Vec<Parameter>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let pairs = deserializer.deserialize_option(OrderedPairs)?;
    Ok(pairs
        .into_iter()
        .map(|(key, value)| Parameter::new(key, value))
        .collect())
}

pub fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let pairs = deserializer.deserialize_option(OrderedPairs)?;
    Ok(pairs
        .into_iter()
        .map(|(key, value)| Tag::new(key, value))
        .collect())
}

/// Scalar YAML values are all passed to the control plane as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ScalarValue {
    fn into_string(self) -> String {
        match self {
            ScalarValue::Text(s) => s,
            ScalarValue::Integer(n) => n.to_string(),
            ScalarValue::Float(n) => n.to_string(),
            ScalarValue::Bool(b) => b.to_string(),
        }
    }
}

/// Reads a mapping into a list of pairs, keeping document order.
struct OrderedPairs;

impl<'de> Visitor<'de> for OrderedPairs {
    type Value = Vec<(String, String)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of names to scalar values")
    }

    /// An explicit `~` or an empty value means no entries.
    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs: Vec<(String, String)> = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, ScalarValue>()? {
            if pairs.iter().any(|(existing, _)| *existing == key) {
                return Err(serde::de::Error::custom(format!("duplicate key: {key}")));
            }
            pairs.push((key, value.into_string()));
        }
        Ok(pairs)
    }
}
