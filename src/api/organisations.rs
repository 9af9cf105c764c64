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
use crate::types::organisation::Organisation;

impl ApiClient {
    pub fn organisations(&self, query: &ListQuery) -> Result<Vec<Organisation>, ApiError> {
        self.get_list("organisations", "organisations", &query.pairs())
    }

    pub fn organisation(&self, id: i64) -> Result<Organisation, ApiError> {
        self.get_one(&format!("organisations/{id}"), "organisation")
    }
}
