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

//! Command tree, one module per resource.

pub mod app;
pub mod domain;
pub mod network;
pub mod organisation;
pub mod system;

use crate::client::{ApiClient, ApiError, ListQuery};
use crate::output::OutputFormat;
use crate::prompt;
use crate::resolve::{self, ResolveError};
use crate::settings::Settings;
use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

/// What every command needs besides its own arguments.
pub struct Context {
    pub client: ApiClient,
    pub output: OutputFormat,
    pub user_id: Option<i64>,
    pub org_id: Option<i64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, short = 'n', value_name = "N", help = "How many resources to retrieve")]
    pub number: Option<u32>,
    #[arg(long, short = 'f', value_name = "TEXT", help = "Filter API results")]
    pub filter: Option<String>,
}

impl ListArgs {
    pub fn query(&self) -> ListQuery {
        ListQuery {
            limit: self.number,
            filter: self.filter.clone(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfirmArgs {
    #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
    pub yes: bool,
}

impl ConfirmArgs {
    /// Asks `question` unless `--yes` was given. Prints a notice when declined.
    pub fn confirmed(&self, question: &str) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        let confirmed = prompt::confirm(question)?;
        if !confirmed {
            println!("Cancelled.");
        }
        Ok(confirmed)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SettingsFileArg {
    #[arg(
        long = "settings-file",
        short = 's',
        value_name = "FILE",
        help = "JSON file with settings to apply ('-' reads stdin)"
    )]
    pub settings_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    #[arg(
        long = "parameters",
        short = 'p',
        value_name = "KEY=VALUE",
        help = "Custom parameter, repeatable; separate multiple values with commas"
    )]
    pub parameters: Vec<String>,
}

/// Lists through `list`, or fetches each comma separated ID in `ids`.
pub fn get_by_ids<T>(
    ids: &[String],
    entity: &str,
    list: impl FnOnce() -> Result<Vec<T>, ApiError>,
    one: impl Fn(i64) -> Result<T, ApiError>,
) -> Result<Vec<T>> {
    let ids = resolve::split_ids(ids, entity)?;
    if ids.is_empty() {
        return Ok(list()?);
    }
    Ok(ids
        .into_iter()
        .map(one)
        .collect::<Result<Vec<T>, ApiError>>()?)
}

/// Replaces an organisation name in merged settings with its ID.
pub fn resolve_organisation_setting(
    client: &ApiClient,
    settings: &mut Settings,
) -> Result<(), ResolveError> {
    if let Some(Value::String(name)) = settings.get("organisation") {
        let id = resolve::organisation(client, name)?;
        settings.insert("organisation".into(), Value::from(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn list_args_build_query() {
        let args = ListArgs {
            number: Some(5),
            filter: Some("web".into()),
        };
        assert_eq!(
            args.query().pairs(),
            vec![("limit", "5".to_string()), ("filter", "web".to_string())]
        );
    }

    #[test]
    fn get_by_ids_lists_without_ids() {
        let rows = get_by_ids(&[], "app", || Ok(vec![1, 2]), |id| Ok(id * 10)).unwrap();
        assert_eq!(rows, vec![1, 2]);

        let ids = vec!["3,4".to_string(), "5".to_string()];
        let rows = get_by_ids(&ids, "app", || Ok(vec![]), |id| Ok(id * 10)).unwrap();
        assert_eq!(rows, vec![30, 40, 50]);

        let bad = vec!["shop".to_string()];
        let err = get_by_ids(&bad, "app", || Ok(vec![]), |id| Ok(id)).unwrap_err();
        assert_eq!(err.to_string(), "Not a valid app ID!");
    }

    #[test]
    fn organisation_names_are_resolved_after_merge() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/organisations")
                .query_param("filter", "Acme");
            then.status(200)
                .json_body(json!({"organisations": [{"id": 7, "name": "Acme"}]}));
        });
        let client = ApiClient::new(&server.base_url(), "key").unwrap();

        let mut settings = json!({"organisation": "Acme", "name": "web01"})
            .as_object()
            .cloned()
            .unwrap();
        resolve_organisation_setting(&client, &mut settings).unwrap();
        assert_eq!(settings["organisation"], 7);

        // numeric values are left alone without a lookup
        let mut settings = json!({"organisation": 3}).as_object().cloned().unwrap();
        resolve_organisation_setting(&client, &mut settings).unwrap();
        assert_eq!(settings["organisation"], 3);
    }
}
