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

//! Typed endpoint wrappers, one file per resource.
//!
//! The API wraps every payload in a named key (`{"systems": [...]}`,
//! `{"system": {...}}`); the helpers here unwrap it.

pub mod apps;
pub mod domains;
pub mod jobs;
pub mod networks;
pub mod organisations;
pub mod regions;
pub mod systems;
pub mod volumes;

use crate::client::{ApiClient, ApiError};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

fn take<T: DeserializeOwned>(
    mut body: Map<String, Value>,
    path: &str,
    key: &'static str,
    missing_ok: bool,
) -> Result<T, ApiError> {
    let decode = |source: serde_json::Error| ApiError::Decode {
        endpoint: path.to_string(),
        source,
    };
    match body.remove(key) {
        Some(Value::Null) | None if missing_ok => {
            serde_json::from_value(Value::Array(Vec::new())).map_err(decode)
        }
        Some(value) => serde_json::from_value(value).map_err(decode),
        None => Err(decode(serde_json::Error::missing_field(key))),
    }
}

impl ApiClient {
    /// GETs a collection stored under `key`. A missing key is an empty list.
    pub(crate) fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &'static str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let body: Map<String, Value> = self.get(path, query)?;
        take(body, path, key, true)
    }

    /// GETs a single entity stored under `key`.
    pub(crate) fn get_one<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &'static str,
    ) -> Result<T, ApiError> {
        let body: Map<String, Value> = self.get(path, &[])?;
        take(body, path, key, false)
    }

    /// POSTs `body` and decodes the entity the API echoes back under `key`.
    pub(crate) fn create<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        key: &'static str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response: Map<String, Value> = self.post(path, body)?;
        take(response, path, key, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn missing_list_key_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/regions");
            then.status(200).json_body(json!({}));
        });

        let client = ApiClient::new(&server.base_url(), "k").unwrap();
        let regions: Vec<Value> = client.get_list("regions", "regions", &[]).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn missing_entity_key_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/apps/1");
            then.status(200).json_body(json!({"other": {}}));
        });

        let client = ApiClient::new(&server.base_url(), "k").unwrap();
        let err = client.get_one::<Value>("apps/1", "app").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
        assert!(err.to_string().contains("app"));
    }

    #[test]
    fn list_rows_with_null_fields_still_decode() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/systems");
            then.status(200).json_body(json!({"systems": [
                {"id": 1, "name": "web01", "fqdn": null, "cpu": null, "organisation": null},
                {"id": 2, "name": "web02", "organisation": {"id": 3, "name": "Acme"}}
            ]}));
        });

        let client = ApiClient::new(&server.base_url(), "k").unwrap();
        let systems = client.systems(&crate::client::ListQuery::default()).unwrap();
        assert_eq!(systems.len(), 2);
        assert_eq!(systems[0].fqdn, "");
        assert_eq!(systems[0].organisation.id, 0);
        assert_eq!(systems[1].organisation.name, "Acme");
    }
}
