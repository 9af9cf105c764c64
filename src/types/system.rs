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
use super::job::Job;
use super::network::SystemNetwork;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemImage {
    pub id: i64,
    pub name: String,
    pub external_id: String,
    pub os_id: i64,
    pub os_name: String,
    pub os_type: String,
    pub os_version: String,
    pub os_version_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OperatingSystemVersion {
    pub id: i64,
    pub os_id: i64,
    pub os_name: String,
    pub os_type: String,
    pub os_version: String,
}

impl OperatingSystemVersion {
    /// Name used by cookbook parameter options to restrict values by OS.
    pub fn display(&self) -> String {
        format!("{} {}", self.os_name, self.os_version)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemProviderConfiguration {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatValue {
    pub unit: String,
    pub value: Value,
    pub max: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatsSummary {
    pub diskspace: StatValue,
    #[serde(rename = "Memory", alias = "memory")]
    pub memory: StatValue,
    pub cpu: StatValue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct System {
    pub id: i64,
    pub uid: String,
    pub hostname: String,
    pub fqdn: String,
    pub customer_fqdn: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub status_category: String,
    pub running_status: String,
    pub running_status_category: String,
    pub cpu: i64,
    pub memory: i64,
    pub disk: Value,
    pub monitoring_enabled: bool,
    pub management_type: String,
    pub organisation: EntityRef,
    #[serde(rename = "systemimage")]
    pub system_image: SystemImage,
    #[serde(rename = "operatingsystemVersion")]
    pub operating_system_version: OperatingSystemVersion,
    pub provider_api: String,
    #[serde(rename = "systemproviderConfiguration")]
    pub system_provider_configuration: SystemProviderConfiguration,
    pub region: String,
    pub zone: EntityRef,
    pub networks: Vec<SystemNetwork>,
    pub public_networking: bool,
    pub stats_summary: StatsSummary,
    pub dt_expires: Option<i64>,
    pub billing_status: String,
    pub external_info: Option<String>,
    pub remarks: Option<String>,
    pub install_security_updates: i64,
    pub limit_riops: Option<i64>,
    pub limit_wiops: Option<i64>,
    #[serde(rename = "preferredparentsystem")]
    pub preferred_parent_system: Option<i64>,
}

/// Body of a create-system request. Zero-valued sizing fields are left out
/// so the API applies its own defaults.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemPost {
    pub name: String,
    pub customer_fqdn: String,
    pub remarks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    pub management_type: String,
    pub public_networking: bool,
    #[serde(rename = "systemimage")]
    pub system_image: i64,
    pub organisation: i64,
    #[serde(rename = "systemproviderConfiguration")]
    pub system_provider_configuration: i64,
    pub zone: i64,
    pub auto_teams: String,
    pub external_info: String,
    #[serde(
        rename = "operatingsystemVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub operating_system_version: Option<i64>,
    #[serde(rename = "parentsystem", skip_serializing_if = "Option::is_none")]
    pub parent_system: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub auto_networks: Vec<Value>,
}

/// Full PUT shape of a system, used as the baseline of an update.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemPut {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub cpu: i64,
    pub memory: i64,
    pub disk: Value,
    pub management_type: String,
    pub organisation: i64,
    #[serde(rename = "systemimage")]
    pub system_image: i64,
    #[serde(rename = "operatingsystemVersion")]
    pub operating_system_version: i64,
    #[serde(rename = "systemproviderConfiguration")]
    pub system_provider_configuration: i64,
    pub zone: i64,
    pub public_networking: bool,
    #[serde(rename = "preferredparentsystem")]
    pub preferred_parent_system: Option<i64>,
    pub remarks: Option<String>,
    pub install_security_updates: i64,
    pub limit_riops: Option<i64>,
    pub limit_wiops: Option<i64>,
}

impl From<&System> for SystemPut {
    fn from(system: &System) -> Self {
        Self {
            id: system.id,
            name: system.name.clone(),
            kind: system.kind.clone(),
            cpu: system.cpu,
            memory: system.memory,
            disk: system.disk.clone(),
            management_type: system.management_type.clone(),
            organisation: system.organisation.id,
            system_image: system.system_image.id,
            operating_system_version: system.operating_system_version.id,
            system_provider_configuration: system.system_provider_configuration.id,
            zone: system.zone.id,
            public_networking: system.public_networking,
            preferred_parent_system: system.preferred_parent_system,
            remarks: system.remarks.clone(),
            install_security_updates: system.install_security_updates,
            limit_riops: system.limit_riops,
            limit_wiops: system.limit_wiops,
        }
    }
}

/// Everything `system describe` shows, gathered from several endpoints.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeSystem {
    #[serde(flatten)]
    pub system: System,
    pub install_security_updates_string: String,
    pub ssh_keys: Vec<SshKey>,
    pub has_networks: Vec<super::network::SystemHasNetwork>,
    pub volumes: Vec<Volume>,
    pub jobs: Vec<Job>,
}

// ---------------------------------------------------------------- checks

/// A check parameter as reported on an existing check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckParameterValue {
    pub value: Value,
    pub default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemCheck {
    pub id: i64,
    #[serde(rename = "checktype")]
    pub check_type: String,
    #[serde(rename = "checktypeLocation")]
    pub check_type_location: String,
    pub status: String,
    pub status_information: String,
    #[serde(rename = "dtLastMonitoringEnabled")]
    pub dt_last_monitoring_enabled: Option<i64>,
    #[serde(rename = "dtLastStatusChange")]
    pub dt_last_status_change: Option<i64>,
    pub dt_next_check: Option<i64>,
    pub dt_last_check: Option<i64>,
    #[serde(rename = "checkparameters")]
    pub check_parameters: BTreeMap<String, CheckParameterValue>,
    #[serde(rename = "checkparameterDescriptions")]
    pub check_parameter_descriptions: BTreeMap<String, String>,
}

/// Parameter declared by a check type or cookbook type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterSpec {
    pub name: String,
    pub display_name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub default_value: Value,
    pub readonly: bool,
    pub disable_edit: bool,
    pub required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceType {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckType {
    #[serde(rename = "servicetype")]
    pub service_type: ServiceType,
}

// ------------------------------------------------------------- cookbooks

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Cookbook {
    pub id: i64,
    #[serde(rename = "cookbooktype")]
    pub cookbook_type: String,
    #[serde(rename = "cookbookparameters")]
    pub cookbook_parameters: BTreeMap<String, CheckParameterValue>,
    #[serde(rename = "cookbookparameterDescriptions")]
    pub cookbook_parameter_descriptions: Value,
    #[serde(rename = "previousCookbookparameters")]
    pub previous_cookbook_parameters: Value,
    pub status: String,
}

/// OS version an option value may be installed on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OptionOs {
    pub id: i64,
    pub name: String,
}

/// One selectable value of a `select` cookbook parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CookbookParameterOption {
    pub name: String,
    pub exclusive: bool,
    #[serde(rename = "operatingsystem_versions", alias = "operatingSystemVersions")]
    pub operating_system_versions: Vec<OptionOs>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CookbookTypeDefinition {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

/// A cookbook type together with the options of its `select` parameters,
/// keyed by parameter name and then by option value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CookbookType {
    #[serde(rename = "cookbooktype")]
    pub cookbook_type: CookbookTypeDefinition,
    pub parameter_options: BTreeMap<String, BTreeMap<String, CookbookParameterOption>>,
}

// -------------------------------------------------------------- ssh keys

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SshKey {
    pub id: i64,
    pub description: String,
    pub content: String,
    pub fingerprint: String,
    pub status: String,
    #[serde(rename = "shsStatus")]
    pub shs_status: String,
    pub organisation: EntityRef,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SshKeyAdd {
    #[serde(rename = "sshkey")]
    pub ssh_key: i64,
}

// --------------------------------------------------------------- volumes

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VolumeSystemRef {
    pub id: i64,
    pub name: String,
    pub fqdn: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Volume {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub space: i64,
    pub uid: String,
    pub remarks: Option<String>,
    pub auto_resize: bool,
    pub device_name: String,
    pub organisation: EntityRef,
    pub system: VolumeSystemRef,
    #[serde(rename = "volumegroup")]
    pub volume_group: EntityRef,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeCreate {
    pub name: String,
    pub space: i64,
    pub organisation: i64,
    pub system: i64,
    pub auto_resize: bool,
    pub device_name: String,
}

/// Full PUT shape of a volume, used as the baseline of an update.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolumePut {
    pub name: String,
    pub device_name: String,
    pub space: i64,
    pub organisation: i64,
    pub auto_resize: bool,
    pub remarks: Option<String>,
    pub system: i64,
    #[serde(rename = "volumegroup")]
    pub volume_group: i64,
}

impl From<&Volume> for VolumePut {
    fn from(volume: &Volume) -> Self {
        Self {
            name: volume.name.clone(),
            device_name: volume.device_name.clone(),
            space: volume.space,
            organisation: volume.organisation.id,
            auto_resize: volume.auto_resize,
            remarks: volume.remarks.clone(),
            system: volume.system.id,
            volume_group: volume.volume_group.id,
        }
    }
}

/// Body of the volume link/unlink actions.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub system: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

// --------------------------------------------------------- create lookups

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub country: super::organisation::Country,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub short_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_system_with_nulls_and_renamed_fields() {
        let system: System = serde_json::from_value(json!({
            "id": 42,
            "name": "web01",
            "type": "kvmGuest",
            "organisation": {"id": 7, "name": "Acme"},
            "systemimage": {"id": 3, "name": "ubuntu"},
            "operatingsystemVersion": {"id": 9, "osName": "Ubuntu", "osVersion": "20.04"},
            "remarks": null,
            "limitRiops": 300,
            "unknownField": true
        }))
        .unwrap();

        assert_eq!(system.kind, "kvmGuest");
        assert_eq!(system.system_image.id, 3);
        assert_eq!(system.operating_system_version.display(), "Ubuntu 20.04");
        assert_eq!(system.remarks, None);

        let put = SystemPut::from(&system);
        let value = serde_json::to_value(&put).unwrap();
        assert_eq!(value["organisation"], 7);
        assert_eq!(value["operatingsystemVersion"], 9);
        assert_eq!(value["limitRiops"], 300);
    }

    #[test]
    fn decodes_cookbook_type_options() {
        let cookbook_type: CookbookType = serde_json::from_value(json!({
            "cookbooktype": {
                "parameters": [{"name": "versions", "type": "select"}]
            },
            "parameterOptions": {
                "versions": {
                    "7.4": {"exclusive": false, "operatingsystem_versions": [{"name": "Ubuntu 20.04"}]},
                    "8.1": {"exclusive": true}
                }
            }
        }))
        .unwrap();

        let versions = &cookbook_type.parameter_options["versions"];
        assert_eq!(versions["7.4"].operating_system_versions[0].name, "Ubuntu 20.04");
        assert!(versions["8.1"].exclusive);
        assert_eq!(cookbook_type.cookbook_type.parameters[0].kind, "select");
    }
}
