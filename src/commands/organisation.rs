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

use super::{Context, ListArgs, get_by_ids};
use crate::output::{self, Column};
use crate::types::organisation::Organisation;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum OrganisationCommand {
    /// List organisations, or show the given IDs
    Get {
        #[arg(value_name = "ID")]
        ids: Vec<String>,
        #[command(flatten)]
        list: ListArgs,
    },
}

pub fn run(ctx: &Context, command: OrganisationCommand) -> Result<()> {
    match command {
        OrganisationCommand::Get { ids, list } => {
            let organisations = get_by_ids(
                &ids,
                "organisation",
                || ctx.client.organisations(&list.query()),
                |id| ctx.client.organisation(id),
            )?;
            output::print_list(ctx.output, &organisations, &columns())
        }
    }
}

fn columns() -> Vec<Column<Organisation>> {
    vec![
        Column::path("ID", "id"),
        Column::path("NAME", "name"),
        Column::path("CITY", "city"),
        Column::path("COUNTRY", "country.name"),
        Column::count("USERS", "users"),
    ]
}
