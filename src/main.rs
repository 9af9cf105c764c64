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

mod api;
mod client;
mod commands;
mod config;
mod logging;
mod output;
mod params;
mod prompt;
mod resolve;
mod settings;
mod types;

use crate::client::ApiClient;
use crate::commands::Context as CommandContext;
use crate::commands::app::{self, AppCommand};
use crate::commands::domain::{self, DomainCommand};
use crate::commands::network::{self, NetworkCommand};
use crate::commands::organisation::{self, OrganisationCommand};
use crate::commands::system::{self, SystemCommand};
use crate::config::{Scope, save};
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "lvl",
    version,
    about = "CLI for the Level27 hosting management API"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "API key override for this invocation (otherwise read from config)"
    )]
    api_key: Option<String>,

    #[arg(
        long,
        global = true,
        value_name = "URL",
        help = "Base URL for the API (defaults to https://api.level27.eu/v1)"
    )]
    api_url: Option<String>,

    #[arg(
        long,
        short = 'o',
        value_enum,
        default_value_t = OutputFormat::Text,
        global = true,
        help = "Output format (propagates to subcommands)"
    )]
    output: OutputFormat,

    #[arg(
        long,
        short = 'v',
        action = ArgAction::Count,
        global = true,
        help = "More diagnostics on stderr (-v info, -vv debug, -vvv trace)"
    )]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Persist an API key and account IDs to the chosen scope
    Configure {
        #[arg(long)]
        key: String,
        #[arg(
            long,
            value_name = "URL",
            help = "Optional API URL to store alongside the key"
        )]
        url: Option<String>,
        #[arg(long, value_name = "ID", help = "Your user ID, used to find SSH keys")]
        user_id: Option<i64>,
        #[arg(long, value_name = "ID", help = "Your organisation ID, used to find SSH keys")]
        org_id: Option<i64>,
        #[arg(
            long,
            value_enum,
            default_value_t = ScopeArg::User,
            help = "Where to write the config (local project dir or user config dir)"
        )]
        scope: ScopeArg,
    },
    /// Show current configuration (secrets masked)
    ConfigShow,
    /// Generate shell completion scripts
    Completion {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
    /// Organisation operations
    #[command(subcommand)]
    Organisation(OrganisationCommand),
    /// Network operations
    #[command(subcommand)]
    Network(NetworkCommand),
    /// Domain and DNS record operations
    #[command(subcommand)]
    Domain(DomainCommand),
    /// App, component and certificate operations
    #[command(subcommand)]
    App(AppCommand),
    /// System operations
    #[command(subcommand)]
    System(SystemCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScopeArg {
    Local,
    User,
}

impl From<ScopeArg> for Scope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::Local => Scope::Local,
            ScopeArg::User => Scope::User,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let cwd = std::env::current_dir().context("reading current directory")?;

    let command = match cli.command {
        Commands::Configure {
            key,
            url,
            user_id,
            org_id,
            scope,
        } => {
            let mut existing = config::load_scope(scope.into(), &cwd)?;
            existing.api_key = Some(key);
            if url.is_some() {
                existing.api_url = url;
            }
            if user_id.is_some() {
                existing.user_id = user_id;
            }
            if org_id.is_some() {
                existing.org_id = org_id;
            }

            let path = save(scope.into(), &existing, &cwd)?;
            println!("Saved API key to {}", path.display());
            return Ok(());
        }
        Commands::ConfigShow => {
            let merged = config::load(&cwd)?;
            println!("{}", serde_json::to_string_pretty(&config::masked(&merged))?);
            return Ok(());
        }
        Commands::Completion { shell } => {
            use clap_complete::{generate, shells};
            let mut cmd = Cli::command();
            let bin = cmd.get_name().to_string();
            match shell {
                CompletionShell::Bash => {
                    generate(shells::Bash, &mut cmd, bin, &mut std::io::stdout())
                }
                CompletionShell::Zsh => {
                    generate(shells::Zsh, &mut cmd, bin, &mut std::io::stdout())
                }
                CompletionShell::Fish => {
                    generate(shells::Fish, &mut cmd, bin, &mut std::io::stdout())
                }
                CompletionShell::PowerShell => {
                    generate(shells::PowerShell, &mut cmd, bin, &mut std::io::stdout())
                }
            }
            return Ok(());
        }
        command => command,
    };

    let effective = config::resolve(&cwd, cli.api_key, cli.api_url)?;
    debug!(url = %effective.api_url, "resolved configuration");
    let ctx = CommandContext {
        client: ApiClient::new(&effective.api_url, &effective.api_key)?,
        output: cli.output,
        user_id: effective.user_id,
        org_id: effective.org_id,
    };

    match command {
        Commands::Organisation(command) => organisation::run(&ctx, command),
        Commands::Network(command) => network::run(&ctx, command),
        Commands::Domain(command) => domain::run(&ctx, command),
        Commands::App(command) => app::run(&ctx, command),
        Commands::System(command) => system::run(&ctx, command),
        Commands::Configure { .. } | Commands::ConfigShow | Commands::Completion { .. } => {
            unreachable!("handled before the client is built")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_counts_and_output_is_global() {
        let cli = Cli::try_parse_from(["lvl", "-vv", "system", "get", "-o", "json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::System(_)));
    }

    #[test]
    fn configure_scope_maps_to_config_scope() {
        let cli = Cli::try_parse_from(["lvl", "configure", "--key", "k", "--scope", "local"])
            .unwrap();
        let Commands::Configure { scope, .. } = cli.command else {
            panic!("expected configure");
        };
        assert_eq!(Scope::from(scope), Scope::Local);
    }

    #[test]
    fn system_actions_use_api_names() {
        for name in ["emergencyPowerOff", "autoInstall", "reboot"] {
            let parsed = Cli::try_parse_from(["lvl", "system", "actions", name, "web01"]);
            assert!(parsed.is_ok(), "{name}");
        }
    }
}
