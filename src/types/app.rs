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

use super::EntityRef;
use super::domain::Team;
use super::system::ParameterSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories the API groups app components into.
pub const COMPONENT_CATEGORIES: [&str; 3] = ["web-apps", "databases", "extensions"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppComponentSummary {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(rename = "appcomponenttype")]
    pub component_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct App {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub status_category: String,
    pub organisation: EntityRef,
    pub dt_expires: Option<i64>,
    pub billing_status: String,
    pub components: Vec<AppComponentSummary>,
    pub count_teams: i64,
    pub teams: Vec<Team>,
    pub external_info: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppPostRequest {
    pub name: String,
    pub organisation: i64,
    pub auto_teams: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_info: Option<String>,
}

/// Full PUT shape of an app, used as the baseline of an update.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppPutRequest {
    pub name: String,
    pub organisation: i64,
    pub auto_teams: Vec<String>,
}

impl From<&App> for AppPutRequest {
    fn from(app: &App) -> Self {
        Self {
            name: app.name.clone(),
            organisation: app.organisation.id,
            auto_teams: app.teams.iter().map(|team| team.id.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComponentSystem {
    pub id: i64,
    pub name: String,
    pub fqdn: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppComponent {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(rename = "appcomponenttype")]
    pub component_type: String,
    #[serde(rename = "appcomponentparameters")]
    pub parameters: Value,
    pub status: String,
    pub organisation: EntityRef,
    pub app: EntityRef,
    pub systems: Vec<ComponentSystem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentServiceType {
    pub name: String,
    pub cookbook: String,
    pub display_name: String,
    pub description: String,
    pub category: String,
    pub selecting_system_possible: bool,
    pub parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppComponentType {
    #[serde(rename = "servicetype")]
    pub service_type: ComponentServiceType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SslCertificateUrl {
    pub id: i64,
    pub content: String,
    pub ssl_status: String,
    pub validation_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SslCertificate {
    pub id: i64,
    pub name: String,
    pub ssl_type: String,
    pub ssl_status: String,
    pub status: String,
    pub status_category: String,
    pub auto_url_link: bool,
    pub ssl_force: bool,
    pub dt_expires: Value,
    pub ssl_certificate_urls: Vec<SslCertificateUrl>,
    pub matching_urls: Vec<String>,
}

/// Body of an add-certificate request. Key, certificate and CA bundle are
/// only sent for certificates of type `own`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SslCertificateRequest {
    pub name: String,
    pub ssl_type: String,
    pub auto_ssl_certificate_urls: String,
    pub auto_url_link: bool,
    pub ssl_force: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_crt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_cabundle: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_baseline_carries_team_ids_as_strings() {
        let app: App = serde_json::from_value(json!({
            "id": 2077,
            "name": "shop",
            "organisation": {"id": 3, "name": "Acme"},
            "teams": [{"id": 10}, {"id": 11}]
        }))
        .unwrap();

        let put = AppPutRequest::from(&app);
        assert_eq!(
            serde_json::to_value(put).unwrap(),
            json!({"name": "shop", "organisation": 3, "autoTeams": ["10", "11"]})
        );
    }

    #[test]
    fn ssl_request_omits_own_fields_for_letsencrypt() {
        let request = SslCertificateRequest {
            name: "cert".into(),
            ssl_type: "letsencrypt".into(),
            auto_ssl_certificate_urls: "shop.example".into(),
            ssl_force: true,
            ..SslCertificateRequest::default()
        };
        let value = serde_json::to_value(request).unwrap();
        assert!(value.get("sslKey").is_none());
        assert_eq!(value["autoSslCertificateUrls"], "shop.example");
    }
}
