// lvl - CLI for the Level27 hosting management API
// Copyright (C) 2026 The lvl contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Payload types mirroring the API's JSON resources.
//!
//! Every struct is `#[serde(default)]` so partial payloads still decode;
//! fields the CLI never looks at are simply not modelled.

pub mod app;
pub mod domain;
pub mod job;
pub mod network;
pub mod organisation;
pub mod system;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decodes an API payload. Object keys set to `null` are dropped first, so
/// they fall back to the field default exactly like a missing key.
pub(crate) fn decode<T: DeserializeOwned>(mut value: Value) -> Result<T, serde_json::Error> {
    drop_nulls(&mut value);
    serde_json::from_value(value)
}

fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

/// Accepts a string, a number or null. Addresses arrive either way
/// depending on the endpoint.
pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// `{id, name}` reference to a related entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EntityRef {
    pub id: i64,
    pub name: String,
}

/// Body of the `{"type": "<action>"}` requests used by every actions endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActionRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ActionRequest {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::system::System;
    use serde_json::json;

    #[test]
    fn null_fields_decode_as_defaults() {
        let system: System = decode(json!({
            "id": 5,
            "name": "web01",
            "fqdn": null,
            "cpu": null,
            "organisation": null,
            "customerFqdn": null,
            "networks": [{"id": 1, "name": null, "ips": null}]
        }))
        .unwrap();

        assert_eq!(system.name, "web01");
        assert_eq!(system.fqdn, "");
        assert_eq!(system.cpu, 0);
        assert_eq!(system.organisation, EntityRef::default());
        assert_eq!(system.customer_fqdn, None);
        assert_eq!(system.networks[0].name, "");
        assert!(system.networks[0].ips.is_empty());
    }

    #[test]
    fn nulls_inside_arrays_are_kept() {
        let values: Vec<Option<i64>> = decode(json!([1, null])).unwrap();
        assert_eq!(values, vec![Some(1), None]);
    }
}
