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
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainType {
    pub id: i64,
    pub name: String,
    pub extension: String,
    pub renew_period: i64,
    pub dnssec_supported: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainProviderRef {
    pub id: i64,
    pub name: String,
    pub api: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub admin_only: bool,
    pub organisation_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Domain {
    pub id: i64,
    pub name: String,
    pub fullname: String,
    pub ttl: i64,
    pub status: String,
    pub dnssec_status: Option<String>,
    pub registration_is_handled: bool,
    pub dns_is_handled: bool,
    pub provider: DomainProviderRef,
    pub dt_register: Option<String>,
    pub nameserver1: Option<String>,
    pub nameserver2: Option<String>,
    pub nameserver3: Option<String>,
    pub nameserver4: Option<String>,
    pub organisation: EntityRef,
    #[serde(rename = "domaintype")]
    pub domain_type: DomainType,
    pub mailgroup: Option<EntityRef>,
    pub handle_mail_dns: bool,
    pub dt_expires: Option<i64>,
    pub billing_status: String,
    pub external_info: Option<String>,
    pub teams: Vec<Team>,
    pub count_teams: i64,
}

/// A registrar together with the extensions it sells.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainProvider {
    pub id: i64,
    pub name: String,
    pub api: String,
    pub dns_sec_supported: bool,
    #[serde(rename = "domaintypes")]
    pub domain_types: Vec<DomainType>,
}

/// Body of a create-domain request.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainRequest {
    pub name: String,
    #[serde(rename = "domaintype")]
    pub domain_type: i64,
    pub organisation: i64,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    pub handle_dns: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epp_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameserver1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameserver2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameserver3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameserver4: Option<String>,
    #[serde(
        rename = "domaincontactLicensee",
        skip_serializing_if = "Option::is_none"
    )]
    pub domain_contact_licensee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_teams: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_info: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IdRef {
    pub id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainRecord {
    pub id: i64,
    pub name: String,
    pub content: String,
    pub priority: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub system_has_network_ip: Option<IdRef>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DomainRecordRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}
