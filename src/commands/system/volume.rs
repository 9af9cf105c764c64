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

use crate::client::ListQuery;
use crate::commands::{ConfirmArgs, Context, ListArgs, SettingsFileArg, resolve_organisation_setting};
use crate::output::{self, Column};
use crate::resolve;
use crate::settings;
use crate::types::system::{Volume, VolumeCreate, VolumePut};
use anyhow::{Result, anyhow};
use clap::Subcommand;
use serde::Serialize;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum VolumeCommand {
    /// List the volumes of a system
    Get {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Create a volume on a system
    Create {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(long, help = "Name of the new volume")]
        name: String,
        #[arg(long, help = "Owning organisation, by name or ID; defaults to the system's")]
        organisation: Option<String>,
        #[arg(long = "deviceName", default_value = "", help = "Device name for the new volume")]
        device_name: String,
        #[arg(long = "autoResize", help = "Enable automatic resizing")]
        auto_resize: bool,
        #[arg(long, help = "Space of the new volume in GB")]
        space: i64,
    },
    /// Link an existing volume to a system
    Link {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "VOLUME")]
        volume: String,
        #[arg(value_name = "DEVICE_NAME")]
        device_name: String,
    },
    /// Unlink a volume from a system
    Unlink {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "VOLUME")]
        volume: String,
    },
    /// Delete a volume on a system
    Delete {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "VOLUME")]
        volume: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Update settings on a volume
    Update {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "VOLUME")]
        volume: String,
        #[command(flatten)]
        patch: VolumePatch,
        #[command(flatten)]
        file: SettingsFileArg,
    },
}

/// Flags of `system volume update`; only the ones given are sent.
#[derive(clap::Args, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct VolumePatch {
    #[arg(long, help = "New name for the volume")]
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[arg(long = "autoResize", value_name = "BOOL", help = "New autoResize setting")]
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_resize: Option<bool>,
    #[arg(long, help = "New volume space in GB")]
    #[serde(skip_serializing_if = "Option::is_none")]
    space: Option<i64>,
}

pub fn run(ctx: &Context, command: VolumeCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        VolumeCommand::Get { system, list } => {
            let id = resolve::system(client, &system)?;
            let volumes = client.system_volumes(id, &list.query())?;
            output::print_list(ctx.output, &volumes, &columns())
        }
        VolumeCommand::Create {
            system,
            name,
            organisation,
            device_name,
            auto_resize,
            space,
        } => {
            let id = resolve::system(client, &system)?;
            let organisation = match organisation {
                Some(org) => resolve::organisation(client, &org)?,
                None => client.system(id)?.organisation.id,
            };
            let request = VolumeCreate {
                name,
                space,
                organisation,
                system: id,
                auto_resize,
                device_name,
            };
            let volume = client.create_volume(&request)?;
            info!(system = id, volume = volume.id, "created volume");
            output::print_created(
                ctx.output,
                &format!("Volume {} created with ID {}", volume.name, volume.id),
                &volume,
            )
        }
        VolumeCommand::Link {
            system,
            volume,
            device_name,
        } => {
            let id = resolve::system(client, &system)?;
            let volume = linkable_volume(ctx, id, &volume)?;
            client.link_volume(volume, id, &device_name)?;
            info!(system = id, volume, %device_name, "linked volume");
            Ok(())
        }
        VolumeCommand::Unlink { system, volume } => {
            let id = resolve::system(client, &system)?;
            let volume = resolve::system_volume(client, id, &volume)?;
            client.unlink_volume(volume, id)?;
            info!(system = id, volume, "unlinked volume");
            Ok(())
        }
        VolumeCommand::Delete {
            system,
            volume,
            confirm,
        } => {
            let id = resolve::system(client, &system)?;
            let volume = client.volume(resolve::system_volume(client, id, &volume)?)?;
            if confirm.confirmed(&format!("Delete volume {} ({})?", volume.name, volume.id))? {
                client.delete_volume(volume.id)?;
                info!(system = id, volume = volume.id, "deleted volume");
            }
            Ok(())
        }
        VolumeCommand::Update {
            system,
            volume,
            patch,
            file,
        } => {
            let id = resolve::system(client, &system)?;
            let volume = resolve::system_volume(client, id, &volume)?;
            let current = client.volume(volume)?;
            let mut payload = settings::merge_settings(
                &VolumePut::from(&current),
                file.settings_file.as_deref(),
                &patch,
            )?;
            resolve_organisation_setting(client, &mut payload)?;
            client.update_volume(volume, &payload)?;
            info!(system = id, volume, "updated volume");
            Ok(())
        }
    }
}

/// Resolves a volume that is not on `system` yet. Names are looked up in
/// the volume group of the system's existing volumes.
fn linkable_volume(ctx: &Context, system: i64, arg: &str) -> Result<i64> {
    if let Ok(id) = arg.trim().parse::<i64>() {
        return Ok(id);
    }
    let group = ctx
        .client
        .system_volumes(system, &ListQuery::default())?
        .first()
        .map(|volume| volume.volume_group.id)
        .ok_or_else(|| anyhow!("System {system} has no volumes to find a volume group from"))?;
    Ok(resolve::volume_group_volume(&ctx.client, group, arg)?)
}

fn columns() -> Vec<Column<Volume>> {
    vec![
        Column::path("ID", "id"),
        Column::path("NAME", "name"),
        Column::path("STATUS", "status"),
        Column::path("SPACE", "space"),
        Column::path("UID", "uid"),
        Column::path("AUTO RESIZE", "autoResize"),
        Column::path("DEVICE NAME", "deviceName"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::output::OutputFormat;
    use httpmock::prelude::*;
    use serde_json::json;

    fn context(server: &MockServer) -> Context {
        Context {
            client: ApiClient::new(&server.base_url(), "key").unwrap(),
            output: OutputFormat::Text,
            user_id: None,
            org_id: None,
        }
    }

    #[test]
    fn link_looks_up_names_in_the_system_volume_group() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/systems/9/volumes");
            then.status(200)
                .json_body(json!({"volumes": [{"id": 1, "name": "root", "volumegroup": {"id": 40}}]}));
        });
        let group = server.mock(|when, then| {
            when.method(GET)
                .path("/volumegroups/40/volumes")
                .query_param("filter", "data");
            then.status(200)
                .json_body(json!({"volumes": [{"id": 5, "name": "data"}, {"id": 6, "name": "data2"}]}));
        });

        let ctx = context(&server);
        assert_eq!(linkable_volume(&ctx, 9, "data").unwrap(), 5);
        assert_eq!(linkable_volume(&ctx, 9, "77").unwrap(), 77);
        group.assert_hits(1);
    }

    #[test]
    fn link_by_name_needs_an_existing_volume() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/systems/9/volumes");
            then.status(200).json_body(json!({"volumes": []}));
        });

        let err = linkable_volume(&context(&server), 9, "data").unwrap_err();
        assert!(err.to_string().contains("no volumes"), "{err}");
    }

    #[test]
    fn update_sends_full_volume_with_patched_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/volumes/5");
            then.status(200).json_body(json!({"volume": {
                "id": 5,
                "name": "data",
                "space": 10,
                "deviceName": "vdb",
                "organisation": {"id": 3},
                "system": {"id": 9},
                "volumegroup": {"id": 40}
            }}));
        });
        let put = server.mock(|when, then| {
            when.method(PUT).path("/volumes/5").json_body(json!({
                "name": "data",
                "deviceName": "vdb",
                "space": 20,
                "organisation": 3,
                "autoResize": true,
                "remarks": null,
                "system": 9,
                "volumegroup": 40
            }));
            then.status(204);
        });

        let patch = VolumePatch {
            space: Some(20),
            auto_resize: Some(true),
            ..VolumePatch::default()
        };
        let command = VolumeCommand::Update {
            system: "9".into(),
            volume: "5".into(),
            patch,
            file: SettingsFileArg::default(),
        };
        run(&context(&server), command).unwrap();
        put.assert();
    }
}
