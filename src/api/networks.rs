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

use crate::client::{ApiClient, ApiError, ListQuery};
use crate::types::network::{Network, NetworkLocate};

impl ApiClient {
    pub fn networks(&self, query: &ListQuery) -> Result<Vec<Network>, ApiError> {
        self.get_list("networks", "networks", &query.pairs())
    }

    /// Free IPv4 and IPv6 addresses on a network.
    pub fn network_locate(&self, id: i64) -> Result<NetworkLocate, ApiError> {
        self.get(&format!("networks/{id}/locate"), &[])
    }
}
