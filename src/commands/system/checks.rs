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

use crate::commands::{ConfirmArgs, Context, ListArgs, ParameterArgs};
use crate::output::{self, Column};
use crate::params;
use crate::resolve;
use crate::settings::{Settings, merge_maps};
use crate::types::system::{CheckParameterValue, ParameterSpec, SystemCheck};
use anyhow::{Result, anyhow};
use clap::Subcommand;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// List the checks of a system
    Get {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add a check to a system
    Add {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(long = "type", short = 't', help = "Check type (cannot be changed later)")]
        check_type: String,
        #[command(flatten)]
        parameters: ParameterArgs,
    },
    /// Show detailed information about a check
    Describe {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "CHECK_ID")]
        check: String,
    },
    /// Delete a check from a system
    Delete {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "CHECK_ID")]
        check: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Change the parameters of a check
    Update {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "CHECK_ID")]
        check: String,
        #[command(flatten)]
        parameters: ParameterArgs,
    },
    /// Show the parameters a check type accepts
    Parameters {
        #[arg(long = "type", short = 't')]
        check_type: String,
    },
}

pub fn run(ctx: &Context, command: CheckCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        CheckCommand::Get { system, list } => {
            let id = resolve::system(client, &system)?;
            let checks = client.system_checks(id, &list.query())?;
            output::print_list(ctx.output, &checks, &columns())
        }
        CheckCommand::Add {
            system,
            check_type,
            parameters,
        } => {
            let id = resolve::system(client, &system)?;
            let schema = check_type_parameters(ctx, &check_type)?;
            let given = params::parse_custom_parameters(&parameters.parameters)?;
            let fields = params::validate_known_parameters(
                schema.iter().map(|p| p.name.as_str()),
                "checktype",
                &check_type,
                &given,
            )?;
            let mut body = Settings::new();
            body.insert("checktype".into(), Value::from(check_type));
            let check = client.create_system_check(id, &merge_maps(&body, &fields))?;
            info!(system = id, check = check.id, "created check");
            output::print_created(
                ctx.output,
                &format!("Created {} check (ID {})", check.check_type, check.id),
                &check,
            )
        }
        CheckCommand::Describe { system, check } => {
            let id = resolve::system(client, &system)?;
            let check = resolve::parse_id(&check, "check")?;
            output::print_describe(ctx.output, &client.system_check(id, check)?)
        }
        CheckCommand::Delete {
            system,
            check,
            confirm,
        } => {
            let id = resolve::system(client, &system)?;
            let check = resolve::parse_id(&check, "check")?;
            if confirm.confirmed(&format!("Delete check {check} from system {system}?"))? {
                client.delete_system_check(id, check)?;
                info!(system = id, check, "deleted check");
            }
            Ok(())
        }
        CheckCommand::Update {
            system,
            check,
            parameters,
        } => {
            let id = resolve::system(client, &system)?;
            let check = resolve::parse_id(&check, "check")?;
            let current = client.system_check(id, check)?;
            let given = params::parse_custom_parameters(&parameters.parameters)?;
            let fields = params::validate_known_parameters(
                current.check_parameters.keys().map(String::as_str),
                "checktype",
                &current.check_type,
                &given,
            )?;
            let baseline = parameter_baseline(
                "checktype",
                &current.check_type,
                &current.check_parameters,
            );
            client.update_system_check(id, check, &merge_maps(&baseline, &fields))?;
            info!(system = id, check, "updated check");
            Ok(())
        }
        CheckCommand::Parameters { check_type } => {
            let schema = check_type_parameters(ctx, &check_type)?;
            output::print_list(ctx.output, &schema, &parameter_columns())
        }
    }
}

fn check_type_parameters(ctx: &Context, check_type: &str) -> Result<Vec<ParameterSpec>> {
    let mut types = ctx.client.check_types()?;
    types
        .remove(check_type)
        .map(|kind| kind.service_type.parameters)
        .ok_or_else(|| anyhow!("Unknown checktype: {check_type}"))
}

/// The type plus every parameter that no longer has its default value.
/// These have to be sent again on update or they reset.
pub(super) fn parameter_baseline(
    type_key: &str,
    type_name: &str,
    current: &BTreeMap<String, CheckParameterValue>,
) -> Settings {
    let mut baseline = Settings::new();
    baseline.insert(type_key.to_string(), Value::from(type_name));
    for (key, parameter) in current.iter().filter(|(_, p)| !p.default) {
        baseline.insert(key.clone(), parameter.value.clone());
    }
    baseline
}

pub(super) fn parameter_columns() -> Vec<Column<ParameterSpec>> {
    vec![
        Column::path("NAME", "name"),
        Column::path("TYPE", "type"),
        Column::path("DESCRIPTION", "description"),
        Column::path("DEFAULT", "defaultValue"),
    ]
}

fn columns() -> Vec<Column<SystemCheck>> {
    vec![
        Column::path("ID", "id"),
        Column::path("CHECKTYPE", "checktype"),
        Column::path("STATUS", "status"),
        Column::time("LAST STATUS CHANGE", "dtLastStatusChange"),
        Column::path("INFORMATION", "statusInformation"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn baseline_keeps_only_changed_parameters() {
        let check: SystemCheck = serde_json::from_value(json!({
            "id": 3,
            "checktype": "http",
            "checkparameters": {
                "url": {"value": "/health", "default": false},
                "port": {"value": 80, "default": true}
            }
        }))
        .unwrap();

        let baseline = parameter_baseline("checktype", &check.check_type, &check.check_parameters);
        assert_eq!(
            Value::Object(baseline),
            json!({"checktype": "http", "url": "/health"})
        );
    }

    #[test]
    fn update_rejects_parameters_the_check_does_not_have() {
        let check: SystemCheck = serde_json::from_value(json!({
            "checktype": "ping",
            "checkparameters": {"timeout": {"value": 5, "default": true}}
        }))
        .unwrap();
        let given = params::parse_custom_parameters(&["url=/"]).unwrap();
        let err = params::validate_known_parameters(
            check.check_parameters.keys().map(String::as_str),
            "checktype",
            &check.check_type,
            &given,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Parameter 'url' NOT known for checktype ping");
    }
}
