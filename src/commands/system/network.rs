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

use crate::commands::{Context, SettingsFileArg};
use crate::output::{self, Column, ip_display};
use crate::resolve;
use crate::settings;
use crate::types::network::{
    NetworkLocate, SystemHasNetwork, SystemHasNetworkIp, SystemHasNetworkIpAdd,
    SystemHasNetworkIpPut, SystemNetwork,
};
use anyhow::{Result, anyhow};
use clap::Subcommand;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Subcommand, Debug)]
pub enum SystemNetworkCommand {
    /// List the networks a system is connected to
    Get {
        #[arg(value_name = "SYSTEM")]
        system: String,
    },
    /// Show detailed information about every network of a system
    Describe {
        #[arg(value_name = "SYSTEM")]
        system: String,
    },
    /// Connect a system to a network
    Add {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "NETWORK")]
        network: String,
    },
    /// Disconnect a system from a network
    Remove {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "NETWORK")]
        network: String,
    },
    /// Manage IP addresses on a system network
    #[command(subcommand)]
    Ip(IpCommand),
}

#[derive(Subcommand, Debug)]
pub enum IpCommand {
    /// List the addresses on a system network
    Get {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "NETWORK")]
        network: String,
    },
    /// Add an address to a system network
    ///
    /// The address is IPv4 or IPv6. `auto` and `auto-v6` pick the first free
    /// address of the network.
    Add {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "NETWORK")]
        network: String,
        #[arg(value_name = "ADDRESS")]
        address: String,
        #[arg(long, help = "Hostname for the address; defaults to the system hostname")]
        hostname: Option<String>,
    },
    /// Remove an address from a system network
    Remove {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "NETWORK")]
        network: String,
        #[arg(value_name = "ADDRESS|ID")]
        ip: String,
    },
    /// Update settings on a system network address
    Update {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "NETWORK")]
        network: String,
        #[arg(value_name = "ADDRESS|ID")]
        ip: String,
        #[command(flatten)]
        patch: IpPatch,
        #[command(flatten)]
        file: SettingsFileArg,
    },
}

#[derive(clap::Args, Serialize, Debug, Default)]
pub struct IpPatch {
    #[arg(long, help = "New hostname for the address")]
    #[serde(skip_serializing_if = "Option::is_none")]
    hostname: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SystemNetworks {
    networks: Vec<SystemNetwork>,
    has_networks: Vec<SystemHasNetwork>,
}

pub fn run(ctx: &Context, command: SystemNetworkCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        SystemNetworkCommand::Get { system } => {
            let id = resolve::system(client, &system)?;
            let networks = client.system(id)?.networks;
            output::print_list(ctx.output, &networks, &columns())
        }
        SystemNetworkCommand::Describe { system } => {
            let id = resolve::system(client, &system)?;
            let described = SystemNetworks {
                networks: client.system(id)?.networks,
                has_networks: client.system_has_networks(id)?,
            };
            output::print_describe(ctx.output, &described)
        }
        SystemNetworkCommand::Add { system, network } => {
            let id = resolve::system(client, &system)?;
            let network = resolve::network(client, &network)?;
            client.add_system_network(id, network)?;
            info!(system = id, network, "connected network");
            Ok(())
        }
        SystemNetworkCommand::Remove { system, network } => {
            let id = resolve::system(client, &system)?;
            let has_network = resolve::system_has_network(client, id, &network)?;
            client.remove_system_network(id, has_network)?;
            info!(system = id, has_network, "disconnected network");
            Ok(())
        }
        SystemNetworkCommand::Ip(command) => run_ip(ctx, command),
    }
}

fn run_ip(ctx: &Context, command: IpCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        IpCommand::Get { system, network } => {
            let id = resolve::system(client, &system)?;
            let has_network = resolve::system_has_network(client, id, &network)?;
            let ips = client.system_network_ips(id, has_network)?;
            output::print_list(ctx.output, &ips, &ip_columns())
        }
        IpCommand::Add {
            system,
            network,
            address,
            hostname,
        } => {
            let id = resolve::system(client, &system)?;
            let system = client.system(id)?;
            let has_network = resolve::system_has_network(client, id, &network)?;
            let link = client.system_has_network(id, has_network)?;

            let address = match address.as_str() {
                "auto" | "auto-v6" => {
                    let located = client.network_locate(link.network.id)?;
                    free_address(&located, address == "auto-v6")?
                }
                _ => address,
            };
            debug!(%address, "adding address");

            let hostname = hostname.unwrap_or(system.hostname);
            let request = SystemHasNetworkIpAdd::new(&address, link.network.public, &hostname);
            client.add_system_network_ip(id, has_network, &request)?;
            info!(system = id, has_network, %address, "added address");
            Ok(())
        }
        IpCommand::Remove {
            system,
            network,
            ip,
        } => {
            let id = resolve::system(client, &system)?;
            let has_network = resolve::system_has_network(client, id, &network)?;
            let ip = resolve::system_network_ip(client, id, has_network, &ip)?;
            client.remove_system_network_ip(id, has_network, ip)?;
            info!(system = id, has_network, ip, "removed address");
            Ok(())
        }
        IpCommand::Update {
            system,
            network,
            ip,
            patch,
            file,
        } => {
            let id = resolve::system(client, &system)?;
            let has_network = resolve::system_has_network(client, id, &network)?;
            let ip = resolve::system_network_ip(client, id, has_network, &ip)?;
            let current = client.system_network_ip(id, has_network, ip)?;
            let baseline = SystemHasNetworkIpPut {
                hostname: current.hostname,
            };
            let payload =
                settings::merge_settings(&baseline, file.settings_file.as_deref(), &patch)?;
            client.update_system_network_ip(id, has_network, ip, &payload)?;
            info!(system = id, has_network, ip, "updated address");
            Ok(())
        }
    }
}

fn free_address(located: &NetworkLocate, v6: bool) -> Result<String> {
    let choices = if v6 { &located.ipv6 } else { &located.ipv4 };
    choices
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Unable to find a free IP address"))
}

/// The IPv4 address if set, otherwise the IPv6 one.
fn first_address(v4: &str, v6: &str) -> String {
    let v4 = ip_display(v4);
    if v4.is_empty() { ip_display(v6) } else { v4 }
}

fn columns() -> Vec<Column<SystemNetwork>> {
    vec![
        Column::path("ID", "id"),
        Column::path("NETWORK ID", "networkId"),
        Column::with("TYPE", |n: &SystemNetwork| n.kind().to_string()),
        Column::path("NAME", "name"),
        Column::path("MAC", "mac"),
        Column::count("IPS", "ips"),
    ]
}

fn ip_columns() -> Vec<Column<SystemHasNetworkIp>> {
    vec![
        Column::path("ID", "id"),
        Column::with("PUBLIC IP", |ip: &SystemHasNetworkIp| {
            first_address(&ip.public_ipv4, &ip.public_ipv6)
        }),
        Column::with("IP", |ip: &SystemHasNetworkIp| first_address(&ip.ipv4, &ip.ipv6)),
        Column::path("HOSTNAME", "hostname"),
        Column::path("STATUS", "status"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::render_table;
    use serde_json::json;

    #[test]
    fn auto_picks_first_free_address_of_family() {
        let located = NetworkLocate {
            ipv4: vec!["10.0.0.5".into(), "10.0.0.6".into()],
            ipv6: vec![],
        };
        assert_eq!(free_address(&located, false).unwrap(), "10.0.0.5");
        let err = free_address(&located, true).unwrap_err();
        assert_eq!(err.to_string(), "Unable to find a free IP address");
    }

    #[test]
    fn ip_table_shows_integer_addresses_dotted() {
        let ips: Vec<SystemHasNetworkIp> = serde_json::from_value(json!([
            {"id": 1, "publicIpv4": 3232235777u32, "hostname": "web01", "status": "ok"},
            {"id": 2, "ipv4": "0", "ipv6": "2a02:0db8::0001", "hostname": "web01", "status": "ok"}
        ]))
        .unwrap();

        let table = render_table(&ips, &ip_columns()).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID  PUBLIC IP    IP           HOSTNAME  STATUS");
        assert_eq!(lines[2], "1   192.168.1.1               web01     ok");
        assert_eq!(lines[3], "2                2a02:db8::1  web01     ok");
    }
}
