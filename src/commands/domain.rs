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

use super::{ConfirmArgs, Context, ListArgs, get_by_ids};
use crate::output::{self, Column};
use crate::resolve;
use crate::types::domain::{Domain, DomainRecord, DomainRecordRequest, DomainRequest};
use anyhow::{Result, bail};
use clap::{ArgAction, Subcommand};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum DomainCommand {
    /// List domains, or show the given IDs
    Get {
        #[arg(value_name = "ID")]
        ids: Vec<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show detailed information about a domain
    Describe {
        #[arg(value_name = "DOMAIN")]
        domain: String,
    },
    /// Register, transfer or add a domain
    Create(CreateArgs),
    /// Delete a domain
    Delete {
        #[arg(value_name = "DOMAIN")]
        domain: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Manage DNS records of a domain
    #[command(subcommand)]
    Record(RecordCommand),
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    #[arg(long, help = "Domain name without extension")]
    name: String,
    #[arg(long = "type", value_name = "EXT|ID", help = "Domain type, by extension or ID")]
    domain_type: String,
    #[arg(long, help = "Owning organisation, by name or ID")]
    organisation: String,
    #[arg(
        long,
        default_value = "none",
        value_parser = ["none", "create", "transfer", "internal_transfer"]
    )]
    action: String,
    #[arg(long)]
    ttl: Option<i64>,
    #[arg(long = "handleDns", action = ArgAction::Set, default_value_t = true)]
    handle_dns: bool,
    #[arg(long = "eppCode", help = "Transfer code, required for transfers")]
    epp_code: Option<String>,
    #[arg(long)]
    nameserver1: Option<String>,
    #[arg(long)]
    nameserver2: Option<String>,
    #[arg(long)]
    nameserver3: Option<String>,
    #[arg(long)]
    nameserver4: Option<String>,
    #[arg(long = "licensee", value_name = "CONTACT_ID")]
    licensee: Option<i64>,
    #[arg(long = "autoTeams", value_name = "IDS", help = "Comma separated team IDs")]
    auto_teams: Option<String>,
    #[arg(long = "externalInfo")]
    external_info: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// List the records of a domain
    Get {
        #[arg(value_name = "DOMAIN")]
        domain: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add a record to a domain
    Create {
        #[arg(value_name = "DOMAIN")]
        domain: String,
        #[arg(long = "type", value_name = "TYPE", help = "Record type (A, AAAA, CNAME, MX, TXT, ...)")]
        kind: String,
        #[arg(long, default_value = "", help = "Record name, empty for the apex")]
        name: String,
        #[arg(long)]
        content: String,
        #[arg(long, help = "Priority, for MX and SRV records")]
        priority: Option<i64>,
    },
    /// Delete a record from a domain
    Delete {
        #[arg(value_name = "DOMAIN")]
        domain: String,
        #[arg(value_name = "RECORD_ID")]
        record: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

pub fn run(ctx: &Context, command: DomainCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        DomainCommand::Get { ids, list } => {
            let domains = get_by_ids(
                &ids,
                "domain",
                || client.domains(&list.query()),
                |id| client.domain(id),
            )?;
            output::print_list(ctx.output, &domains, &columns())
        }
        DomainCommand::Describe { domain } => {
            let id = resolve::domain(client, &domain)?;
            output::print_describe(ctx.output, &client.domain(id)?)
        }
        DomainCommand::Create(args) => create(ctx, args),
        DomainCommand::Delete { domain, confirm } => {
            let id = resolve::domain(client, &domain)?;
            let domain = client.domain(id)?;
            if confirm.confirmed(&format!("Delete domain {} ({id})?", domain.fullname))? {
                client.delete_domain(id)?;
                info!(id, "deleted domain");
            }
            Ok(())
        }
        DomainCommand::Record(command) => run_record(ctx, command),
    }
}

fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    if args.name.trim().is_empty() {
        bail!("domain name cannot be empty");
    }
    let request = DomainRequest {
        name: args.name,
        domain_type: resolve::domain_type(&ctx.client, &args.domain_type)?,
        organisation: resolve::organisation(&ctx.client, &args.organisation)?,
        action: args.action,
        ttl: args.ttl,
        handle_dns: args.handle_dns,
        epp_code: args.epp_code,
        nameserver1: args.nameserver1,
        nameserver2: args.nameserver2,
        nameserver3: args.nameserver3,
        nameserver4: args.nameserver4,
        domain_contact_licensee: args.licensee,
        auto_teams: args.auto_teams,
        external_info: args.external_info,
    };
    let domain = ctx.client.create_domain(&request)?;
    info!(id = domain.id, name = %domain.fullname, "created domain");
    output::print_created(
        ctx.output,
        &format!("Created domain {} (ID {})", domain.fullname, domain.id),
        &domain,
    )
}

fn run_record(ctx: &Context, command: RecordCommand) -> Result<()> {
    let client = &ctx.client;
    match command {
        RecordCommand::Get { domain, list } => {
            let id = resolve::domain(client, &domain)?;
            let records = client.domain_records(id, &list.query())?;
            output::print_list(ctx.output, &records, &record_columns())
        }
        RecordCommand::Create {
            domain,
            kind,
            name,
            content,
            priority,
        } => {
            let id = resolve::domain(client, &domain)?;
            let request = DomainRecordRequest {
                name,
                kind,
                content,
                priority,
            };
            let record = client.create_domain_record(id, &request)?;
            info!(domain = id, record = record.id, "created record");
            output::print_created(
                ctx.output,
                &format!("Created {} record (ID {})", record.kind, record.id),
                &record,
            )
        }
        RecordCommand::Delete {
            domain,
            record,
            confirm,
        } => {
            let id = resolve::domain(client, &domain)?;
            let record = resolve::parse_id(&record, "record")?;
            if confirm.confirmed(&format!("Delete record {record} from domain {domain}?"))? {
                client.delete_domain_record(id, record)?;
                info!(domain = id, record, "deleted record");
            }
            Ok(())
        }
    }
}

fn columns() -> Vec<Column<Domain>> {
    vec![
        Column::path("ID", "id"),
        Column::path("NAME", "fullname"),
        Column::path("STATUS", "status"),
        Column::path("ORGANISATION", "organisation.name"),
        Column::time("EXPIRES", "dtExpires"),
    ]
}

fn record_columns() -> Vec<Column<DomainRecord>> {
    vec![
        Column::path("ID", "id"),
        Column::path("TYPE", "type"),
        Column::path("NAME", "name"),
        Column::path("CONTENT", "content"),
        Column::path("PRIORITY", "priority"),
    ]
}
