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

use super::checks::{parameter_baseline, parameter_columns};
use crate::commands::{ConfirmArgs, Context, ParameterArgs};
use crate::output::{self, Column};
use crate::params;
use crate::resolve;
use crate::settings::{Settings, merge_maps};
use crate::types::system::Cookbook;
use anyhow::Result;
use clap::Subcommand;
use serde_json::Value;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum CookbookCommand {
    /// List the cookbooks of a system
    Get {
        #[arg(value_name = "SYSTEM")]
        system: String,
    },
    /// Add a cookbook to a system and apply it
    Add {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(
            long = "type",
            short = 't',
            help = "Cookbook type; each type can be added once per system"
        )]
        cookbook_type: String,
        #[command(flatten)]
        parameters: ParameterArgs,
    },
    /// Show detailed information about a cookbook
    Describe {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "COOKBOOK_ID")]
        cookbook: String,
    },
    /// Remove a cookbook from a system and apply the change
    Delete {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "COOKBOOK_ID")]
        cookbook: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Change the parameters of a cookbook and apply them
    Update {
        #[arg(value_name = "SYSTEM")]
        system: String,
        #[arg(value_name = "COOKBOOK_ID")]
        cookbook: String,
        #[command(flatten)]
        parameters: ParameterArgs,
    },
    /// Show the parameters a cookbook type accepts
    Parameters {
        #[arg(long = "type", short = 't')]
        cookbook_type: String,
    },
}

pub fn run(ctx: &Context, command: CookbookCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        CookbookCommand::Get { system } => {
            let id = resolve::system(client, &system)?;
            let cookbooks = client.system_cookbooks(id)?;
            output::print_list(ctx.output, &cookbooks, &columns())
        }
        CookbookCommand::Add {
            system,
            cookbook_type,
            parameters,
        } => {
            let id = resolve::system(client, &system)?;
            let fields = validated_parameters(ctx, id, &cookbook_type, &parameters)?;
            let mut body = Settings::new();
            body.insert("cookbooktype".into(), Value::from(cookbook_type.as_str()));
            let cookbook = client.create_system_cookbook(id, &merge_maps(&body, &fields))?;
            client.apply_cookbook_changes(id)?;
            info!(system = id, cookbook = cookbook.id, "added cookbook");
            output::print_created(
                ctx.output,
                &format!("Added {} cookbook (ID {})", cookbook_type, cookbook.id),
                &cookbook,
            )
        }
        CookbookCommand::Describe { system, cookbook } => {
            let id = resolve::system(client, &system)?;
            let cookbook = resolve::parse_id(&cookbook, "cookbook")?;
            output::print_describe(ctx.output, &client.system_cookbook(id, cookbook)?)
        }
        CookbookCommand::Delete {
            system,
            cookbook,
            confirm,
        } => {
            let id = resolve::system(client, &system)?;
            let cookbook = resolve::parse_id(&cookbook, "cookbook")?;
            if confirm.confirmed(&format!("Delete cookbook {cookbook} from system {system}?"))? {
                client.delete_system_cookbook(id, cookbook)?;
                client.apply_cookbook_changes(id)?;
                info!(system = id, cookbook, "deleted cookbook");
            }
            Ok(())
        }
        CookbookCommand::Update {
            system,
            cookbook,
            parameters,
        } => {
            let id = resolve::system(client, &system)?;
            let cookbook = resolve::parse_id(&cookbook, "cookbook")?;
            let current: Cookbook = client.system_cookbook(id, cookbook)?;
            let fields = validated_parameters(ctx, id, &current.cookbook_type, &parameters)?;
            let baseline = parameter_baseline(
                "cookbooktype",
                &current.cookbook_type,
                &current.cookbook_parameters,
            );
            client.update_system_cookbook(id, cookbook, &merge_maps(&baseline, &fields))?;
            client.apply_cookbook_changes(id)?;
            info!(system = id, cookbook, "updated cookbook");
            Ok(())
        }
        CookbookCommand::Parameters { cookbook_type } => {
            let schema = client.cookbook_type(&cookbook_type)?;
            output::print_list(
                ctx.output,
                &schema.cookbook_type.parameters,
                &parameter_columns(),
            )
        }
    }
}

/// Validates `-p` parameters against the cookbook type and the OS the
/// system runs.
fn validated_parameters(
    ctx: &Context,
    system: i64,
    cookbook_type: &str,
    parameters: &ParameterArgs,
) -> Result<Settings> {
    let given = params::parse_custom_parameters(&parameters.parameters)?;
    if given.is_empty() {
        return Ok(Settings::new());
    }
    let os = ctx.client.system(system)?.operating_system_version.display();
    let schema = ctx.client.cookbook_type(cookbook_type)?;
    Ok(params::validate_cookbook_parameters(
        &schema,
        cookbook_type,
        &given,
        &os,
    )?)
}

fn columns() -> Vec<Column<Cookbook>> {
    vec![
        Column::path("ID", "id"),
        Column::path("COOKBOOKTYPE", "cookbooktype"),
        Column::path("STATUS", "status"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::output::OutputFormat;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn parameters_are_checked_against_system_os() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/systems/4");
            then.status(200).json_body(json!({"system": {
                "id": 4,
                "operatingsystemVersion": {"osName": "Ubuntu", "osVersion": "22.04"}
            }}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/cookbooktypes/php");
            then.status(200).json_body(json!({
                "cookbooktype": {"parameters": [{"name": "versions", "type": "select"}]},
                "parameterOptions": {"versions": {
                    "7.4": {"operatingsystem_versions": [{"name": "Ubuntu 20.04"}]},
                    "8.1": {"operatingsystem_versions": [{"name": "Ubuntu 22.04"}]}
                }}
            }));
        });
        let ctx = Context {
            client: ApiClient::new(&server.base_url(), "key").unwrap(),
            output: OutputFormat::Text,
            user_id: None,
            org_id: None,
        };

        let ok = ParameterArgs {
            parameters: vec!["versions=8.1".into()],
        };
        let fields = validated_parameters(&ctx, 4, "php", &ok).unwrap();
        assert_eq!(fields["versions"], json!(["8.1"]));

        let old = ParameterArgs {
            parameters: vec!["versions=7.4".into()],
        };
        let err = validated_parameters(&ctx, 4, "php", &old).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Given value '7.4' can not be installed on current OS: 'Ubuntu 22.04'"
        );
    }
}
