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

use super::{
    ConfirmArgs, Context, ListArgs, ParameterArgs, SettingsFileArg, get_by_ids,
    resolve_organisation_setting,
};
use crate::output::{self, Column};
use crate::params;
use crate::resolve;
use crate::settings::{self, Settings};
use crate::types::app::{
    App, AppComponent, AppPostRequest, AppPutRequest, COMPONENT_CATEGORIES, ComponentServiceType,
    SslCertificate, SslCertificateRequest,
};
use anyhow::{Result, anyhow, bail};
use clap::{ArgAction, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum AppCommand {
    /// List apps, or show the given IDs
    Get {
        #[arg(value_name = "ID")]
        ids: Vec<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show detailed information about an app
    Describe {
        #[arg(value_name = "APP")]
        app: String,
    },
    /// Create a new app
    Create {
        #[arg(long, short = 'n')]
        name: String,
        #[arg(long, help = "Owning organisation, by name or ID")]
        organisation: String,
        #[arg(long = "autoTeams", value_delimiter = ',', value_name = "IDS")]
        auto_teams: Vec<i64>,
        #[arg(
            long = "externalInfo",
            help = "Required when billable item info exists for the organisation"
        )]
        external_info: Option<String>,
    },
    /// Update settings on an app
    Update {
        #[arg(value_name = "APP")]
        app: String,
        #[command(flatten)]
        patch: AppPatch,
        #[command(flatten)]
        file: SettingsFileArg,
    },
    /// Delete an app
    Delete {
        #[arg(value_name = "APP")]
        app: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Run an action on an app
    #[command(subcommand)]
    Action(AppAction),
    /// Manage the components of an app
    #[command(subcommand)]
    Component(ComponentCommand),
    /// Manage the SSL certificates of an app
    #[command(subcommand)]
    Ssl(SslCommand),
}

/// Flags of `app update`; only the ones given are sent.
#[derive(clap::Args, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppPatch {
    #[arg(long, short = 'n')]
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[arg(long, help = "Owning organisation, by name or ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    organisation: Option<String>,
    #[arg(long = "autoTeams", value_delimiter = ',', value_name = "IDS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_teams: Option<Vec<String>>,
}

#[derive(Subcommand, Debug)]
pub enum AppAction {
    /// Activate an app
    Activate {
        #[arg(value_name = "APP")]
        app: String,
    },
    /// Deactivate an app
    Deactivate {
        #[arg(value_name = "APP")]
        app: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ComponentCommand {
    /// List the components of an app, or show the given IDs
    Get {
        #[arg(value_name = "APP")]
        app: String,
        #[arg(value_name = "ID")]
        ids: Vec<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add a component to an app
    Create {
        #[arg(value_name = "APP")]
        app: String,
        #[arg(long, short = 'n')]
        name: String,
        #[arg(long = "type", short = 't', help = "Component type, see `component types`")]
        component_type: String,
        #[command(flatten)]
        parameters: ParameterArgs,
    },
    /// List the component categories
    Categories,
    /// List the available component types
    Types,
}

#[derive(Subcommand, Debug)]
pub enum SslCommand {
    /// List the SSL certificates of an app
    Get {
        #[arg(value_name = "APP")]
        app: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add an SSL certificate to an app
    Add(SslAddArgs),
}

#[derive(clap::Args, Debug)]
pub struct SslAddArgs {
    #[arg(value_name = "APP")]
    app: String,
    #[arg(long, short = 'n')]
    name: String,
    #[arg(
        long = "type",
        short = 't',
        value_parser = ["letsencrypt", "xolphin", "own"]
    )]
    ssl_type: String,
    #[arg(
        long = "certificateUrl",
        short = 'c',
        value_delimiter = ',',
        help = "URL to secure, repeatable (required for letsencrypt)"
    )]
    urls: Vec<String>,
    #[arg(long, short = 'k', help = "Private key (required for type own)")]
    key: Option<String>,
    #[arg(long, help = "Certificate (required for type own)")]
    crt: Option<String>,
    #[arg(long, help = "CA bundle (required for type own)")]
    cabundle: Option<String>,
    #[arg(
        long = "autoUrl",
        help = "Link the app's URLs that have no certificate yet once issued"
    )]
    auto_url_link: bool,
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    force: bool,
}

pub fn run(ctx: &Context, command: AppCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        AppCommand::Get { ids, list } => {
            let apps = get_by_ids(
                &ids,
                "app",
                || client.apps(&list.query()),
                |id| client.app(id),
            )?;
            output::print_list(ctx.output, &apps, &columns())
        }
        AppCommand::Describe { app } => {
            let id = resolve::app(client, &app)?;
            output::print_describe(ctx.output, &client.app(id)?)
        }
        AppCommand::Create {
            name,
            organisation,
            auto_teams,
            external_info,
        } => {
            if name.trim().is_empty() {
                bail!("app name cannot be empty");
            }
            let request = AppPostRequest {
                name,
                organisation: resolve::organisation(client, &organisation)?,
                auto_teams,
                external_info,
            };
            let app = client.create_app(&request)?;
            info!(id = app.id, name = %app.name, "created app");
            output::print_created(
                ctx.output,
                &format!("Created app {} (ID {})", app.name, app.id),
                &app,
            )
        }
        AppCommand::Update { app, patch, file } => {
            let id = resolve::app(client, &app)?;
            let current = client.app(id)?;
            let mut payload = settings::merge_settings(
                &AppPutRequest::from(&current),
                file.settings_file.as_deref(),
                &patch,
            )?;
            resolve_organisation_setting(client, &mut payload)?;
            client.update_app(id, &payload)?;
            info!(id, "updated app");
            Ok(())
        }
        AppCommand::Delete { app, confirm } => {
            let id = resolve::app(client, &app)?;
            let app = client.app(id)?;
            if confirm.confirmed(&format!("Delete app {} ({id})?", app.name))? {
                client.delete_app(id)?;
                info!(id, "deleted app");
            }
            Ok(())
        }
        AppCommand::Action(action) => {
            let (app, action) = match action {
                AppAction::Activate { app } => (app, "activate"),
                AppAction::Deactivate { app } => (app, "deactivate"),
            };
            let id = resolve::app(client, &app)?;
            client.app_action(id, action)?;
            info!(id, action, "ran app action");
            Ok(())
        }
        AppCommand::Component(command) => run_component(ctx, command),
        AppCommand::Ssl(command) => run_ssl(ctx, command),
    }
}

fn run_component(ctx: &Context, command: ComponentCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        ComponentCommand::Get { app, ids, list } => {
            let app = resolve::app(client, &app)?;
            let components = get_by_ids(
                &ids,
                "component",
                || client.app_components(app, &list.query()),
                |id| client.app_component(app, id),
            )?;
            output::print_list(ctx.output, &components, &component_columns())
        }
        ComponentCommand::Create {
            app,
            name,
            component_type,
            parameters,
        } => {
            let app = resolve::app(client, &app)?;
            let types = client.app_component_types()?;
            let schema = types
                .get(&component_type)
                .ok_or_else(|| anyhow!("Unknown app component type: {component_type}"))?;
            let given = params::parse_custom_parameters(&parameters.parameters)?;
            let fields = params::validate_known_parameters(
                schema.service_type.parameters.iter().map(|p| p.name.as_str()),
                "appcomponenttype",
                &component_type,
                &given,
            )?;
            let body = component_body(&name, &component_type, fields);
            let component = client.create_app_component(app, &body)?;
            info!(app, id = component.id, "created app component");
            output::print_created(
                ctx.output,
                &format!("Created component {} (ID {})", component.name, component.id),
                &component,
            )
        }
        ComponentCommand::Categories => {
            let categories: Vec<Value> = COMPONENT_CATEGORIES
                .iter()
                .map(|name| json!({ "name": name }))
                .collect();
            output::print_list(ctx.output, &categories, &[Column::path("CATEGORY", "name")])
        }
        ComponentCommand::Types => {
            let types: Vec<ComponentServiceType> = client
                .app_component_types()?
                .into_iter()
                .map(|(name, kind)| ComponentServiceType {
                    name,
                    ..kind.service_type
                })
                .collect();
            output::print_list(ctx.output, &types, &type_columns())
        }
    }
}

/// Request body of a new component: its name and type plus the validated
/// parameters.
fn component_body(name: &str, component_type: &str, fields: Settings) -> Settings {
    let mut body = Settings::new();
    body.insert("name".into(), Value::from(name));
    body.insert("appcomponenttype".into(), Value::from(component_type));
    body.extend(fields);
    body
}

fn run_ssl(ctx: &Context, command: SslCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        SslCommand::Get { app, list } => {
            let app = resolve::app(client, &app)?;
            let certificates = client.app_certificates(app, &list.query())?;
            output::print_list(ctx.output, &certificates, &ssl_columns())
        }
        SslCommand::Add(args) => {
            let app = resolve::app(client, &args.app)?;
            let request = ssl_request(args)?;
            let certificate = client.create_app_certificate(app, &request)?;
            info!(app, id = certificate.id, "added SSL certificate");
            output::print_created(
                ctx.output,
                &format!(
                    "Added SSL certificate {} (ID {})",
                    certificate.name, certificate.id
                ),
                &certificate,
            )
        }
    }
}

fn ssl_request(args: SslAddArgs) -> Result<SslCertificateRequest> {
    match args.ssl_type.as_str() {
        "own" if args.key.is_none() || args.crt.is_none() => {
            bail!("--key and --crt are required for certificates of type own")
        }
        "letsencrypt" if args.urls.is_empty() => {
            bail!("--certificateUrl is required for certificates of type letsencrypt")
        }
        _ => {}
    }
    let own = args.ssl_type == "own";
    Ok(SslCertificateRequest {
        name: args.name,
        auto_ssl_certificate_urls: args.urls.join(","),
        auto_url_link: args.auto_url_link,
        ssl_force: args.force,
        ssl_key: args.key.filter(|_| own),
        ssl_crt: args.crt.filter(|_| own),
        ssl_cabundle: args.cabundle.filter(|_| own),
        ssl_type: args.ssl_type,
    })
}

fn columns() -> Vec<Column<App>> {
    vec![
        Column::path("ID", "id"),
        Column::path("NAME", "name"),
        Column::path("STATUS", "status"),
        Column::path("ORGANISATION", "organisation.name"),
        Column::count("COMPONENTS", "components"),
    ]
}

fn component_columns() -> Vec<Column<AppComponent>> {
    vec![
        Column::path("ID", "id"),
        Column::path("NAME", "name"),
        Column::path("TYPE", "appcomponenttype"),
        Column::path("CATEGORY", "category"),
        Column::path("STATUS", "status"),
    ]
}

fn type_columns() -> Vec<Column<ComponentServiceType>> {
    vec![
        Column::path("NAME", "name"),
        Column::path("CATEGORY", "category"),
        Column::path("DISPLAY NAME", "displayName"),
        Column::count("PARAMETERS", "parameters"),
    ]
}

fn ssl_columns() -> Vec<Column<SslCertificate>> {
    vec![
        Column::path("ID", "id"),
        Column::path("NAME", "name"),
        Column::path("TYPE", "sslType"),
        Column::path("STATUS", "sslStatus"),
        Column::time("EXPIRES", "dtExpires"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ssl_args(ssl_type: &str) -> SslAddArgs {
        SslAddArgs {
            app: "shop".into(),
            name: "cert".into(),
            ssl_type: ssl_type.into(),
            urls: vec![],
            key: Some("KEY".into()),
            crt: Some("CRT".into()),
            cabundle: None,
            auto_url_link: false,
            force: true,
        }
    }

    #[test]
    fn update_sends_only_given_flags_over_baseline() {
        let app: App = serde_json::from_value(json!({
            "id": 1,
            "name": "shop",
            "organisation": {"id": 3},
            "teams": [{"id": 10}]
        }))
        .unwrap();
        let patch = AppPatch {
            name: Some("webshop".into()),
            ..AppPatch::default()
        };

        let payload =
            settings::merge_layers(&AppPutRequest::from(&app), None, &patch).unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"name": "webshop", "organisation": 3, "autoTeams": ["10"]})
        );
    }

    #[test]
    fn component_body_carries_name_type_and_parameters() {
        let mut fields = Settings::new();
        fields.insert("pass".into(), json!("secret"));
        let body = component_body("db", "mysql", fields);
        assert_eq!(
            Value::Object(body),
            json!({"name": "db", "appcomponenttype": "mysql", "pass": "secret"})
        );
    }

    #[test]
    fn ssl_own_needs_key_and_certificate() {
        let request = ssl_request(ssl_args("own")).unwrap();
        assert_eq!(request.ssl_key.as_deref(), Some("KEY"));

        let mut missing = ssl_args("own");
        missing.crt = None;
        assert!(ssl_request(missing).is_err());
    }

    #[test]
    fn ssl_letsencrypt_drops_own_material() {
        assert!(ssl_request(ssl_args("letsencrypt")).is_err());

        let mut args = ssl_args("letsencrypt");
        args.urls = vec!["shop.example".into(), "www.shop.example".into()];
        let request = ssl_request(args).unwrap();
        assert_eq!(request.auto_ssl_certificate_urls, "shop.example,www.shop.example");
        assert_eq!(request.ssl_key, None);
    }
}
