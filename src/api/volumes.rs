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

use crate::client::{ApiClient, ApiError, ListQuery};
use crate::settings::Settings;
use crate::types::system::{Volume, VolumeAction, VolumeCreate};

impl ApiClient {
    pub fn system_volumes(&self, system: i64, query: &ListQuery) -> Result<Vec<Volume>, ApiError> {
        self.get_list(&format!("systems/{system}/volumes"), "volumes", &query.pairs())
    }

    pub fn volume_group_volumes(&self, group: i64, query: &ListQuery) -> Result<Vec<Volume>, ApiError> {
        self.get_list(&format!("volumegroups/{group}/volumes"), "volumes", &query.pairs())
    }

    pub fn volume(&self, id: i64) -> Result<Volume, ApiError> {
        self.get_one(&format!("volumes/{id}"), "volume")
    }

    pub fn create_volume(&self, request: &VolumeCreate) -> Result<Volume, ApiError> {
        self.create("volumes", "volume", request)
    }

    pub fn update_volume(&self, id: i64, body: &Settings) -> Result<(), ApiError> {
        self.put(&format!("volumes/{id}"), body)
    }

    pub fn delete_volume(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("volumes/{id}"))
    }

    pub fn link_volume(&self, id: i64, system: i64, device_name: &str) -> Result<(), ApiError> {
        let action = VolumeAction {
            kind: "link".to_string(),
            system,
            device_name: Some(device_name.to_string()),
        };
        self.post_no_content(&format!("volumes/{id}/actions"), &action)
    }

    pub fn unlink_volume(&self, id: i64, system: i64) -> Result<(), ApiError> {
        let action = VolumeAction {
            kind: "unlink".to_string(),
            system,
            device_name: None,
        };
        self.post_no_content(&format!("volumes/{id}/actions"), &action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn link_sends_device_name_and_unlink_does_not() {
        let server = MockServer::start();
        let link = server.mock(|when, then| {
            when.method(POST)
                .path("/volumes/4/actions")
                .json_body(json!({"type": "link", "system": 9, "deviceName": "vdb"}));
            then.status(200).json_body(json!({}));
        });
        let unlink = server.mock(|when, then| {
            when.method(POST)
                .path("/volumes/4/actions")
                .json_body(json!({"type": "unlink", "system": 9}));
            then.status(204);
        });

        let client = ApiClient::new(&server.base_url(), "key").unwrap();
        client.link_volume(4, 9, "vdb").unwrap();
        client.unlink_volume(4, 9).unwrap();

        link.assert();
        unlink.assert();
    }
}
