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
use crate::types::ActionRequest;
use crate::types::network::{
    SystemHasNetwork, SystemHasNetworkAdd, SystemHasNetworkIp, SystemHasNetworkIpAdd,
};
use crate::types::organisation::{AclAdd, OrganisationAccess};
use crate::types::system::{
    CheckType, Cookbook, CookbookType, SshKey, SshKeyAdd, System, SystemCheck, SystemPost,
};
use std::collections::BTreeMap;

impl ApiClient {
    pub fn systems(&self, query: &ListQuery) -> Result<Vec<System>, ApiError> {
        self.get_list("systems", "systems", &query.pairs())
    }

    pub fn system(&self, id: i64) -> Result<System, ApiError> {
        self.get_one(&format!("systems/{id}"), "system")
    }

    pub fn create_system(&self, request: &SystemPost) -> Result<System, ApiError> {
        self.create("systems", "system", request)
    }

    pub fn update_system(&self, id: i64, settings: &Settings) -> Result<(), ApiError> {
        self.put(&format!("systems/{id}"), settings)
    }

    pub fn delete_system(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("systems/{id}"))
    }

    /// Deletes a system even when it is still running or has linked entities.
    pub fn force_delete_system(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("systems/{id}/force"))
    }

    pub fn system_action(&self, id: i64, action: &str) -> Result<(), ApiError> {
        self.post_no_content(&format!("systems/{id}/actions"), &ActionRequest::new(action))
    }

    /// Human readable schedules, indexed by a system's `installSecurityUpdates`.
    pub fn security_update_dates(&self) -> Result<Vec<String>, ApiError> {
        self.get_list("systems/securityupdatedates", "securityUpdateDates", &[])
    }

    // checks

    pub fn system_checks(&self, id: i64, query: &ListQuery) -> Result<Vec<SystemCheck>, ApiError> {
        self.get_list(&format!("systems/{id}/checks"), "checks", &query.pairs())
    }

    pub fn system_check(&self, id: i64, check: i64) -> Result<SystemCheck, ApiError> {
        self.get_one(&format!("systems/{id}/checks/{check}"), "check")
    }

    pub fn create_system_check(&self, id: i64, body: &Settings) -> Result<SystemCheck, ApiError> {
        self.create(&format!("systems/{id}/checks"), "check", body)
    }

    pub fn update_system_check(&self, id: i64, check: i64, body: &Settings) -> Result<(), ApiError> {
        self.put(&format!("systems/{id}/checks/{check}"), body)
    }

    pub fn delete_system_check(&self, id: i64, check: i64) -> Result<(), ApiError> {
        self.delete(&format!("systems/{id}/checks/{check}"))
    }

    pub fn check_types(&self) -> Result<BTreeMap<String, CheckType>, ApiError> {
        self.get_one("checktypes", "checktypes")
    }

    // cookbooks

    pub fn system_cookbooks(&self, id: i64) -> Result<Vec<Cookbook>, ApiError> {
        self.get_list(&format!("systems/{id}/cookbooks"), "cookbooks", &[])
    }

    pub fn system_cookbook(&self, id: i64, cookbook: i64) -> Result<Cookbook, ApiError> {
        self.get_one(&format!("systems/{id}/cookbooks/{cookbook}"), "cookbook")
    }

    pub fn create_system_cookbook(&self, id: i64, body: &Settings) -> Result<Cookbook, ApiError> {
        self.create(&format!("systems/{id}/cookbooks"), "cookbook", body)
    }

    pub fn update_system_cookbook(
        &self,
        id: i64,
        cookbook: i64,
        body: &Settings,
    ) -> Result<(), ApiError> {
        self.put(&format!("systems/{id}/cookbooks/{cookbook}"), body)
    }

    pub fn delete_system_cookbook(&self, id: i64, cookbook: i64) -> Result<(), ApiError> {
        self.delete(&format!("systems/{id}/cookbooks/{cookbook}"))
    }

    /// Cookbook changes are staged until this is called.
    pub fn apply_cookbook_changes(&self, id: i64) -> Result<(), ApiError> {
        self.system_action(id, "update_cookbooks")
    }

    pub fn cookbook_type(&self, name: &str) -> Result<CookbookType, ApiError> {
        self.get(&format!("cookbooktypes/{name}"), &[])
    }

    // ssh keys

    pub fn system_ssh_keys(&self, id: i64, query: &ListQuery) -> Result<Vec<SshKey>, ApiError> {
        self.get_list(&format!("systems/{id}/sshkeys"), "sshKeys", &query.pairs())
    }

    /// Keys of `user` in `organisation` that are not on the system yet.
    pub fn nonadded_ssh_keys(
        &self,
        id: i64,
        organisation: i64,
        user: i64,
        query: &ListQuery,
    ) -> Result<Vec<SshKey>, ApiError> {
        let path = format!("systems/{id}/organisations/{organisation}/users/{user}/nonadded-sshkeys");
        self.get_list(&path, "sshKeys", &query.pairs())
    }

    pub fn add_system_ssh_key(&self, id: i64, key: i64) -> Result<(), ApiError> {
        self.post_no_content(&format!("systems/{id}/sshkeys"), &SshKeyAdd { ssh_key: key })
    }

    pub fn remove_system_ssh_key(&self, id: i64, key: i64) -> Result<(), ApiError> {
        self.delete(&format!("systems/{id}/sshkeys/{key}"))
    }

    // networks

    pub fn system_has_networks(&self, id: i64) -> Result<Vec<SystemHasNetwork>, ApiError> {
        self.get_list(&format!("systems/{id}/networks"), "systemHasNetworks", &[])
    }

    pub fn system_has_network(&self, id: i64, has_network: i64) -> Result<SystemHasNetwork, ApiError> {
        self.get_one(
            &format!("systems/{id}/networks/{has_network}"),
            "systemHasNetwork",
        )
    }

    pub fn add_system_network(&self, id: i64, network: i64) -> Result<(), ApiError> {
        self.post_no_content(
            &format!("systems/{id}/networks"),
            &SystemHasNetworkAdd { network },
        )
    }

    pub fn remove_system_network(&self, id: i64, has_network: i64) -> Result<(), ApiError> {
        self.delete(&format!("systems/{id}/networks/{has_network}"))
    }

    pub fn system_network_ips(
        &self,
        id: i64,
        has_network: i64,
    ) -> Result<Vec<SystemHasNetworkIp>, ApiError> {
        self.get_list(
            &format!("systems/{id}/networks/{has_network}/ips"),
            "systemHasNetworkIps",
            &[],
        )
    }

    pub fn system_network_ip(
        &self,
        id: i64,
        has_network: i64,
        ip: i64,
    ) -> Result<SystemHasNetworkIp, ApiError> {
        self.get_one(
            &format!("systems/{id}/networks/{has_network}/ips/{ip}"),
            "systemHasNetworkIp",
        )
    }

    pub fn add_system_network_ip(
        &self,
        id: i64,
        has_network: i64,
        request: &SystemHasNetworkIpAdd,
    ) -> Result<(), ApiError> {
        self.post_no_content(&format!("systems/{id}/networks/{has_network}/ips"), request)
    }

    pub fn update_system_network_ip(
        &self,
        id: i64,
        has_network: i64,
        ip: i64,
        body: &Settings,
    ) -> Result<(), ApiError> {
        self.put(&format!("systems/{id}/networks/{has_network}/ips/{ip}"), body)
    }

    pub fn remove_system_network_ip(&self, id: i64, has_network: i64, ip: i64) -> Result<(), ApiError> {
        self.delete(&format!("systems/{id}/networks/{has_network}/ips/{ip}"))
    }

    // access

    pub fn system_acls(&self, id: i64) -> Result<Vec<OrganisationAccess>, ApiError> {
        self.get_list(&format!("systems/{id}/acls"), "organisations", &[])
    }

    pub fn add_system_acl(&self, id: i64, organisation: i64) -> Result<(), ApiError> {
        self.post_no_content(&format!("systems/{id}/acls"), &AclAdd { organisation })
    }

    pub fn remove_system_acl(&self, id: i64, organisation: i64) -> Result<(), ApiError> {
        self.delete(&format!("systems/{id}/acls/{organisation}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url(), "key").unwrap()
    }

    #[test]
    fn lists_systems_with_filter() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/systems")
                .query_param("filter", "web")
                .query_param("limit", "2");
            then.status(200)
                .json_body(json!({"systems": [{"id": 1, "name": "web01"}, {"id": 2, "name": "web02"}]}));
        });

        let query = ListQuery {
            limit: Some(2),
            filter: Some("web".into()),
        };
        let systems = client(&server).systems(&query).unwrap();

        mock.assert();
        assert_eq!(systems.len(), 2);
        assert_eq!(systems[1].name, "web02");
    }

    #[test]
    fn runs_actions_by_type() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/systems/7/actions")
                .json_body(json!({"type": "update_cookbooks"}));
            then.status(200).json_body(json!({"system": {"id": 7}}));
        });

        client(&server).apply_cookbook_changes(7).unwrap();
        mock.assert();
    }

    #[test]
    fn decodes_cookbook_type_without_envelope() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cookbooktypes/php");
            then.status(200).json_body(json!({
                "cookbooktype": {"name": "php", "parameters": [{"name": "versions", "type": "select"}]},
                "parameterOptions": {"versions": {"8.1": {"exclusive": false}}}
            }));
        });

        let cookbook_type = client(&server).cookbook_type("php").unwrap();
        assert_eq!(cookbook_type.cookbook_type.name, "php");
        assert!(cookbook_type.parameter_options["versions"].contains_key("8.1"));
    }

    #[test]
    fn adds_ssh_key_by_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/systems/3/sshkeys")
                .json_body(json!({"sshkey": 55}));
            then.status(200).json_body(json!({"sshKey": {"id": 55}}));
        });

        client(&server).add_system_ssh_key(3, 55).unwrap();
        mock.assert();
    }
}
