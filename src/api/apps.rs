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
use crate::types::app::{
    App, AppComponent, AppComponentType, AppPostRequest, SslCertificate, SslCertificateRequest,
};
use std::collections::BTreeMap;

impl ApiClient {
    pub fn apps(&self, query: &ListQuery) -> Result<Vec<App>, ApiError> {
        self.get_list("apps", "apps", &query.pairs())
    }

    pub fn app(&self, id: i64) -> Result<App, ApiError> {
        self.get_one(&format!("apps/{id}"), "app")
    }

    pub fn create_app(&self, request: &AppPostRequest) -> Result<App, ApiError> {
        self.create("apps", "app", request)
    }

    pub fn update_app(&self, id: i64, body: &Settings) -> Result<(), ApiError> {
        self.put(&format!("apps/{id}"), body)
    }

    pub fn delete_app(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("apps/{id}"))
    }

    pub fn app_action(&self, id: i64, action: &str) -> Result<(), ApiError> {
        self.post_no_content(&format!("apps/{id}/actions"), &ActionRequest::new(action))
    }

    pub fn app_components(&self, app: i64, query: &ListQuery) -> Result<Vec<AppComponent>, ApiError> {
        self.get_list(&format!("apps/{app}/components"), "components", &query.pairs())
    }

    pub fn app_component(&self, app: i64, component: i64) -> Result<AppComponent, ApiError> {
        self.get_one(&format!("apps/{app}/components/{component}"), "component")
    }

    pub fn create_app_component(&self, app: i64, body: &Settings) -> Result<AppComponent, ApiError> {
        self.create(&format!("apps/{app}/components"), "component", body)
    }

    pub fn app_component_types(&self) -> Result<BTreeMap<String, AppComponentType>, ApiError> {
        self.get_one("appcomponenttypes", "appcomponenttypes")
    }

    pub fn app_certificates(&self, app: i64, query: &ListQuery) -> Result<Vec<SslCertificate>, ApiError> {
        self.get_list(&format!("apps/{app}/sslcertificates"), "sslCertificates", &query.pairs())
    }

    pub fn create_app_certificate(
        &self,
        app: i64,
        request: &SslCertificateRequest,
    ) -> Result<SslCertificate, ApiError> {
        self.create(&format!("apps/{app}/sslcertificates"), "sslCertificate", request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn lists_component_types_keyed_by_name() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/appcomponenttypes");
            then.status(200).json_body(json!({"appcomponenttypes": {
                "mysql": {"servicetype": {"name": "mysql", "category": "databases",
                    "parameters": [{"name": "pass", "type": "password"}]}},
                "php": {"servicetype": {"name": "php", "category": "web-apps"}}
            }}));
        });

        let client = ApiClient::new(&server.base_url(), "key").unwrap();
        let types = client.app_component_types().unwrap();

        assert_eq!(types.len(), 2);
        assert_eq!(types["mysql"].service_type.parameters[0].name, "pass");
    }

    #[test]
    fn app_action_posts_type() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/apps/2077/actions")
                .json_body(json!({"type": "deactivate"}));
            then.status(200).json_body(json!({"app": {"id": 2077}}));
        });

        let client = ApiClient::new(&server.base_url(), "key").unwrap();
        client.app_action(2077, "deactivate").unwrap();
        mock.assert();
    }
}
