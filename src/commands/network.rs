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

use super::{Context, ListArgs};
use crate::output::{self, Column};
use crate::types::network::Network;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum NetworkCommand {
    /// List networks
    Get {
        #[command(flatten)]
        list: ListArgs,
    },
}

pub fn run(ctx: &Context, command: NetworkCommand) -> Result<()> {
    match command {
        NetworkCommand::Get { list } => {
            let networks = ctx.client.networks(&list.query())?;
            output::print_list(ctx.output, &networks, &columns())
        }
    }
}

fn columns() -> Vec<Column<Network>> {
    vec![
        Column::path("ID", "id"),
        Column::with("TYPE", |n: &Network| n.kind().to_string()),
        Column::path("NAME", "name"),
        Column::path("VLAN", "vlan"),
        Column::path("ORGANISATION", "organisation.name"),
        Column::path("ZONE", "zone.name"),
    ]
}
