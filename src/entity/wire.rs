// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Shared (de)serialization of field-keyed property maps.

use std::collections::BTreeMap;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{SerializeMap, Serializer};

use crate::model::{FieldName, Value};

pub(crate) fn serialize_fields<F, S>(
    properties: &BTreeMap<F, Value>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    F: FieldName,
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(properties.len()))?;
    for (field, value) in properties {
        map.serialize_entry(field.as_str(), value)?;
    }
    map.end()
}

pub(crate) fn deserialize_fields<'de, F, D>(deserializer: D) -> Result<BTreeMap<F, Value>, D::Error>
where
    F: FieldName,
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(name, value)| {
            F::parse(&name)
                .map(|field| (field, value))
                .ok_or_else(|| de::Error::custom(format!("unknown field '{}'", name)))
        })
        .collect()
}
