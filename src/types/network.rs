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

use super::{EntityRef, lenient_string};
use serde::{Deserialize, Serialize};

/// Returns the label of the first set network flag.
fn network_kind(public: bool, customer: bool, internal: bool) -> &'static str {
    if public {
        "public"
    } else if customer {
        "customer"
    } else if internal {
        "internal"
    } else {
        ""
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Network {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub public: bool,
    pub customer: bool,
    pub internal: bool,
    pub vlan: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub ipv4: String,
    #[serde(deserialize_with = "lenient_string")]
    pub netmaskv4: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gatewayv4: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ipv6: String,
    #[serde(deserialize_with = "lenient_string")]
    pub netmaskv6: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gatewayv6: String,
    pub organisation: EntityRef,
    pub zone: EntityRef,
}

impl Network {
    pub fn kind(&self) -> &'static str {
        network_kind(self.public, self.customer, self.internal)
    }
}

/// Free addresses reported by `networks/{id}/locate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkLocate {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
}

/// Address entry embedded in a system's network summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemNetworkIp {
    #[serde(deserialize_with = "lenient_string")]
    pub ipv4: String,
    #[serde(deserialize_with = "lenient_string")]
    pub public_ipv4: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ipv6: String,
    #[serde(deserialize_with = "lenient_string")]
    pub public_ipv6: String,
    pub hostname: String,
}

/// Network summary embedded in a system payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemNetwork {
    pub id: i64,
    pub network_id: i64,
    pub name: String,
    pub mac: String,
    pub net_public: bool,
    pub net_customer: bool,
    pub net_internal: bool,
    pub ips: Vec<SystemNetworkIp>,
}

impl SystemNetwork {
    pub fn kind(&self) -> &'static str {
        network_kind(self.net_public, self.net_customer, self.net_internal)
    }
}

/// Link between a system and a network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemHasNetwork {
    pub id: i64,
    pub status: String,
    pub status_category: String,
    pub network: Network,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SystemHasNetworkAdd {
    pub network: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemHasNetworkIp {
    pub id: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub ipv4: String,
    #[serde(deserialize_with = "lenient_string")]
    pub public_ipv4: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ipv6: String,
    #[serde(deserialize_with = "lenient_string")]
    pub public_ipv6: String,
    pub hostname: String,
    pub status: String,
    pub status_category: String,
}

/// Body of an add-IP request. Exactly one address field is filled in,
/// picked from the address family and whether the network is public.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SystemHasNetworkIpAdd {
    pub ipv4: String,
    pub public_ipv4: String,
    pub ipv6: String,
    pub public_ipv6: String,
    pub hostname: String,
}

impl SystemHasNetworkIpAdd {
    pub fn new(address: &str, public: bool, hostname: &str) -> Self {
        let mut data = Self {
            hostname: hostname.to_string(),
            ..Self::default()
        };
        let slot = match (address.contains(':'), public) {
            (true, true) => &mut data.public_ipv6,
            (true, false) => &mut data.ipv6,
            (false, true) => &mut data.public_ipv4,
            (false, false) => &mut data.ipv4,
        };
        *slot = address.to_string();
        data
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SystemHasNetworkIpPut {
    pub hostname: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn network_kind_prefers_public() {
        let net = Network {
            public: true,
            internal: true,
            ..Network::default()
        };
        assert_eq!(net.kind(), "public");
        assert_eq!(Network::default().kind(), "");
    }

    #[test]
    fn decodes_numeric_addresses_as_strings() {
        let ip: SystemHasNetworkIp = serde_json::from_value(json!({
            "id": 5,
            "ipv4": null,
            "publicIpv4": 3232235777u32,
            "hostname": "web01"
        }))
        .unwrap();
        assert_eq!(ip.public_ipv4, "3232235777");
        assert_eq!(ip.ipv4, "");
    }

    #[test]
    fn ip_add_picks_field_from_family_and_visibility() {
        let v6 = SystemHasNetworkIpAdd::new("2a02::1", true, "web01");
        assert_eq!(v6.public_ipv6, "2a02::1");
        assert!(v6.ipv4.is_empty() && v6.ipv6.is_empty());

        let v4 = SystemHasNetworkIpAdd::new("10.0.0.5", false, "db");
        assert_eq!(v4.ipv4, "10.0.0.5");
        assert_eq!(v4.hostname, "db");
    }
}
