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

//! `lvl system`: systems and everything attached to them.

mod checks;
mod cookbooks;
mod network;
mod volume;

pub use checks::CheckCommand;
pub use cookbooks::CookbookCommand;
pub use network::SystemNetworkCommand;
pub use volume::VolumeCommand;

use super::{
    ConfirmArgs, Context, ListArgs, SettingsFileArg, get_by_ids, resolve_organisation_setting,
};
use crate::client::ListQuery;
use crate::output::{self, Column};
use crate::resolve;
use crate::settings;
use crate::types::organisation::OrganisationAccess;
use crate::types::system::{DescribeSystem, SshKey, System, SystemPost, SystemPut};
use anyhow::{Result, anyhow, bail};
use clap::{ArgAction, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Subcommand, Debug)]
pub enum SystemCommand {
    /// List systems, or show the given IDs
    Get {
        #[arg(value_name = "ID")]
        ids: Vec<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show detailed information about a system
    Describe {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(long = "hide-jobs", help = "Leave the job history out")]
        hide_jobs: bool,
    },
    /// Create a new system
    Create(CreateArgs),
    /// Update settings on a system
    Update {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[command(flatten)]
        patch: SystemPatch,
        #[command(flatten)]
        file: SettingsFileArg,
    },
    /// Delete a system
    Delete {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(long, help = "Delete even when the system is running or still linked")]
        force: bool,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Run a power or lifecycle action on a system
    #[command(subcommand)]
    Actions(ActionCommand),
    /// Manage monitoring checks
    #[command(subcommand)]
    Checks(CheckCommand),
    /// Manage cookbooks
    #[command(subcommand)]
    Cookbooks(CookbookCommand),
    /// Manage SSH keys on a system
    #[command(subcommand)]
    Sshkeys(SshKeyCommand),
    /// Manage the networks of a system
    #[command(subcommand)]
    Network(SystemNetworkCommand),
    /// Manage the volumes of a system
    #[command(subcommand)]
    Volume(VolumeCommand),
    /// Manage which organisations can access a system
    #[command(subcommand)]
    Access(AccessCommand),
}

#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum ManagementType {
    #[default]
    Basic,
    Professional,
    Enterprise,
    #[value(name = "professional_level27")]
    ProfessionalLevel27,
}

impl ManagementType {
    pub fn as_str(self) -> &'static str {
        match self {
            ManagementType::Basic => "basic",
            ManagementType::Professional => "professional",
            ManagementType::Enterprise => "enterprise",
            ManagementType::ProfessionalLevel27 => "professional_level27",
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    #[arg(long, short = 'n')]
    name: String,
    #[arg(long, help = "Image, by name or ID; must exist in the zone's region")]
    image: String,
    #[arg(long, help = "Owning organisation, by name or ID")]
    organisation: String,
    #[arg(long, help = "System provider configuration, by name or ID")]
    provider: String,
    #[arg(long, help = "Zone, by name or ID")]
    zone: String,
    #[arg(long, help = "Hostname the customer uses for the system")]
    fqdn: Option<String>,
    #[arg(long)]
    remarks: Option<String>,
    #[arg(long, help = "Disk size in GB")]
    disk: Option<i64>,
    #[arg(long, help = "CPU cores")]
    cpu: Option<i64>,
    #[arg(long, help = "Memory in GB")]
    memory: Option<i64>,
    #[arg(long, value_enum, ignore_case = true, default_value_t = ManagementType::Basic)]
    management: ManagementType,
    #[arg(long = "publicNetworking", action = ArgAction::Set, default_value_t = true)]
    public_networking: bool,
    #[arg(long = "autoTeams", value_name = "IDS", help = "Comma separated team IDs")]
    auto_teams: Option<String>,
    #[arg(long = "externalInfo")]
    external_info: Option<String>,
    #[arg(long, help = "Operating system version ID")]
    version: Option<i64>,
    #[arg(long, help = "Parent system ID")]
    parent: Option<i64>,
    #[arg(long = "type", help = "System type")]
    kind: Option<String>,
    #[arg(long, value_delimiter = ',', help = "Networks to attach, by name or ID")]
    networks: Vec<String>,
}

/// Flags of `system update`; only the ones given are sent.
#[derive(clap::Args, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SystemPatch {
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[arg(long, help = "CPU cores")]
    #[serde(skip_serializing_if = "Option::is_none")]
    cpu: Option<i64>,
    #[arg(long, help = "Memory in GB")]
    #[serde(skip_serializing_if = "Option::is_none")]
    memory: Option<i64>,
    #[arg(long = "managementType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    management_type: Option<String>,
    #[arg(long, help = "Owning organisation, by name or ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    organisation: Option<String>,
    #[arg(long = "publicNetworking")]
    #[serde(skip_serializing_if = "Option::is_none")]
    public_networking: Option<bool>,
    #[arg(long = "limitRiops", help = "Read IOPS limit")]
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_riops: Option<i64>,
    #[arg(long = "limitWiops", help = "Write IOPS limit")]
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_wiops: Option<i64>,
    #[arg(long = "installSecurityUpdates", help = "Security update schedule index")]
    #[serde(skip_serializing_if = "Option::is_none")]
    install_security_updates: Option<i64>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    remarks: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SystemArg {
    #[arg(value_name = "SYSTEM")]
    system: String,
}

#[derive(Subcommand, Debug)]
pub enum ActionCommand {
    Start(SystemArg),
    Stop(SystemArg),
    Shutdown(SystemArg),
    Reboot(SystemArg),
    Reset(SystemArg),
    #[command(name = "emergencyPowerOff")]
    EmergencyPowerOff(SystemArg),
    Deactivate(SystemArg),
    Activate(SystemArg),
    #[command(name = "autoInstall")]
    AutoInstall(SystemArg),
}

impl ActionCommand {
    /// The action type the API expects, and the system it targets.
    fn split(self) -> (&'static str, SystemArg) {
        match self {
            ActionCommand::Start(arg) => ("start", arg),
            ActionCommand::Stop(arg) => ("stop", arg),
            ActionCommand::Shutdown(arg) => ("shutdown", arg),
            ActionCommand::Reboot(arg) => ("reboot", arg),
            ActionCommand::Reset(arg) => ("reset", arg),
            ActionCommand::EmergencyPowerOff(arg) => ("emergencyPowerOff", arg),
            ActionCommand::Deactivate(arg) => ("deactivate", arg),
            ActionCommand::Activate(arg) => ("activate", arg),
            ActionCommand::AutoInstall(arg) => ("autoInstall", arg),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SshKeyCommand {
    /// List the SSH keys on a system
    Get {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add one of your SSH keys to a system, by ID or description
    Add {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Remove an SSH key from a system, by ID or description
    Remove {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "KEY")]
        key: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccessCommand {
    /// List the organisations with access to a system
    Get {
        #[arg(value_name = "SYSTEM")]
        system: String,
    },
    /// Grant an organisation access to a system
    Add {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "ORGANISATION")]
        organisation: String,
    },
    /// Revoke an organisation's access to a system
    Remove {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "ORGANISATION")]
        organisation: String,
    },
}

pub fn run(ctx: &Context, command: SystemCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        SystemCommand::Get { ids, list } => {
            let systems = get_by_ids(
                &ids,
                "system",
                || client.systems(&list.query()),
                |id| client.system(id),
            )?;
            output::print_list(ctx.output, &systems, &columns())
        }
        SystemCommand::Describe { system, hide_jobs } => {
            let id = resolve::system(client, &system)?;
            output::print_describe(ctx.output, &describe(ctx, id, hide_jobs)?)
        }
        SystemCommand::Create(args) => create(ctx, args),
        SystemCommand::Update {
            system,
            patch,
            file,
        } => {
            let id = resolve::system(client, &system)?;
            let current = client.system(id)?;
            let mut payload = settings::merge_settings(
                &SystemPut::from(&current),
                file.settings_file.as_deref(),
                &patch,
            )?;
            resolve_organisation_setting(client, &mut payload)?;
            client.update_system(id, &payload)?;
            info!(id, "updated system");
            Ok(())
        }
        SystemCommand::Delete {
            system,
            force,
            confirm,
        } => {
            let id = resolve::system(client, &system)?;
            let system = client.system(id)?;
            if !confirm.confirmed(&format!("Delete system {} ({id})?", system.name))? {
                return Ok(());
            }
            if force {
                client.force_delete_system(id)?;
            } else {
                client.delete_system(id)?;
            }
            info!(id, force, "deleted system");
            Ok(())
        }
        SystemCommand::Actions(action) => {
            let (action, target) = action.split();
            let id = resolve::system(client, &target.system)?;
            client.system_action(id, action)?;
            info!(id, action, "ran system action");
            Ok(())
        }
        SystemCommand::Checks(command) => checks::run(ctx, command),
        SystemCommand::Cookbooks(command) => cookbooks::run(ctx, command),
        SystemCommand::Sshkeys(command) => run_ssh_keys(ctx, command),
        SystemCommand::Network(command) => network::run(ctx, command),
        SystemCommand::Volume(command) => volume::run(ctx, command),
        SystemCommand::Access(command) => run_access(ctx, command),
    }
}

fn describe(ctx: &Context, id: i64, hide_jobs: bool) -> Result<DescribeSystem> {
    let client = &ctx.client;
    let system = client.system(id)?;
    let schedules = client.security_update_dates()?;
    let install_security_updates_string = usize::try_from(system.install_security_updates)
        .ok()
        .and_then(|idx| schedules.get(idx))
        .cloned()
        .unwrap_or_default();
    let jobs = if hide_jobs {
        Vec::new()
    } else {
        client.job_history("system", id)?
    };

    Ok(DescribeSystem {
        ssh_keys: client.system_ssh_keys(id, &ListQuery::default())?,
        has_networks: client.system_has_networks(id)?,
        volumes: client.system_volumes(id, &ListQuery::default())?,
        install_security_updates_string,
        jobs,
        system,
    })
}

fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    let client = &ctx.client;
    let (zone, region) = resolve::zone_and_region(client, &args.zone)?;
    debug!(zone, region, "resolved zone");

    let auto_networks = args
        .networks
        .iter()
        .map(|network| resolve::network(client, network).map(Value::from))
        .collect::<Result<Vec<_>, _>>()?;

    let request = SystemPost {
        name: args.name,
        customer_fqdn: args.fqdn.unwrap_or_default(),
        remarks: args.remarks.unwrap_or_default(),
        disk: non_zero(args.disk),
        cpu: non_zero(args.cpu),
        memory: non_zero(args.memory),
        management_type: args.management.as_str().to_string(),
        public_networking: args.public_networking,
        system_image: resolve::image(client, region, &args.image)?,
        organisation: resolve::organisation(client, &args.organisation)?,
        system_provider_configuration: resolve::provider_configuration(client, &args.provider)?,
        zone,
        auto_teams: args.auto_teams.unwrap_or_default(),
        external_info: args.external_info.unwrap_or_default(),
        operating_system_version: non_zero(args.version),
        parent_system: non_zero(args.parent),
        kind: args.kind.unwrap_or_default(),
        auto_networks,
    };

    let system = client.create_system(&request)?;
    info!(id = system.id, name = %system.name, "created system");
    output::print_created(
        ctx.output,
        &format!("Created system {} (ID {})", system.name, system.id),
        &system,
    )
}

/// Zero means "let the API decide" for sizing and reference flags.
fn non_zero(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

fn run_ssh_keys(ctx: &Context, command: SshKeyCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        SshKeyCommand::Get { system, list } => {
            let id = resolve::system(client, &system)?;
            let keys = client.system_ssh_keys(id, &list.query())?;
            output::print_list(ctx.output, &keys, &ssh_key_columns())
        }
        SshKeyCommand::Add { system, key } => {
            let id = resolve::system(client, &system)?;
            let Some(key_id) = addable_ssh_key(ctx, id, &key)? else {
                println!("SSH key already exists on system!");
                return Ok(());
            };
            client.add_system_ssh_key(id, key_id)?;
            info!(system = id, key = key_id, "added SSH key");
            Ok(())
        }
        SshKeyCommand::Remove { system, key } => {
            let id = resolve::system(client, &system)?;
            let key_id = match key.trim().parse::<i64>() {
                Ok(key_id) => key_id,
                Err(_) => {
                    let keys = client.system_ssh_keys(id, &ListQuery::filtered(&key))?;
                    find_ssh_key(keys, &key)?
                        .ok_or_else(|| anyhow!("Unable to find SSH key to remove!"))?
                }
            };
            client.remove_system_ssh_key(id, key_id)?;
            info!(system = id, key = key_id, "removed SSH key");
            Ok(())
        }
    }
}

/// Resolves a key to add. `None` means the key is already on the system.
fn addable_ssh_key(ctx: &Context, system: i64, key: &str) -> Result<Option<i64>> {
    if let Ok(id) = key.trim().parse::<i64>() {
        return Ok(Some(id));
    }
    let (Some(organisation), Some(user)) = (ctx.org_id, ctx.user_id) else {
        bail!("adding SSH keys by description needs org_id and user_id; set them with `lvl configure`");
    };

    let query = ListQuery::filtered(key);
    let candidates = ctx
        .client
        .nonadded_ssh_keys(system, organisation, user, &query)?;
    if let Some(id) = find_ssh_key(candidates, key)? {
        return Ok(Some(id));
    }
    let existing = ctx.client.system_ssh_keys(system, &query)?;
    match find_ssh_key(existing, key)? {
        Some(_) => Ok(None),
        None => bail!("Unable to find SSH key to add"),
    }
}

fn find_ssh_key(keys: Vec<SshKey>, description: &str) -> Result<Option<i64>> {
    let matches: Vec<SshKey> = keys
        .into_iter()
        .filter(|k| k.description == description)
        .collect();
    if matches.is_empty() {
        return Ok(None);
    }
    let found = resolve::resolve_shared(matches, description, "SSH key", |k| {
        format!("{} ({})", k.description, k.id)
    })?;
    Ok(Some(found.id))
}

fn run_access(ctx: &Context, command: AccessCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        AccessCommand::Get { system } => {
            let id = resolve::system(client, &system)?;
            let organisations = client.system_acls(id)?;
            output::print_list(ctx.output, &organisations, &access_columns())
        }
        AccessCommand::Add {
            system,
            organisation,
        } => {
            let id = resolve::system(client, &system)?;
            let organisation = resolve::organisation(client, &organisation)?;
            client.add_system_acl(id, organisation)?;
            info!(system = id, organisation, "granted access");
            Ok(())
        }
        AccessCommand::Remove {
            system,
            organisation,
        } => {
            let id = resolve::system(client, &system)?;
            let organisation = resolve::organisation(client, &organisation)?;
            client.remove_system_acl(id, organisation)?;
            info!(system = id, organisation, "revoked access");
            Ok(())
        }
    }
}

fn columns() -> Vec<Column<System>> {
    vec![
        Column::path("ID", "id"),
        Column::path("NAME", "name"),
        Column::path("STATUS", "status"),
        Column::path("RUNNING", "runningStatus"),
        Column::with("OS", |s: &System| s.operating_system_version.display()),
        Column::path("ORGANISATION", "organisation.name"),
    ]
}

fn ssh_key_columns() -> Vec<Column<SshKey>> {
    vec![
        Column::path("ID", "id"),
        Column::path("DESCRIPTION", "description"),
        Column::path("STATUS", "shsStatus"),
        Column::path("FINGERPRINT", "fingerprint"),
    ]
}

fn access_columns() -> Vec<Column<OrganisationAccess>> {
    vec![
        Column::path("ID", "id"),
        Column::path("NAME", "name"),
        Column::path("TYPE", "type"),
        Column::count("MEMBERS", "users"),
    ]
}
