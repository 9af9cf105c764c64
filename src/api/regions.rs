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

use crate::client::{ApiClient, ApiError};
use crate::types::system::{Region, SystemImage, SystemProviderConfiguration, Zone};

impl ApiClient {
    pub fn regions(&self) -> Result<Vec<Region>, ApiError> {
        self.get_list("regions", "regions", &[])
    }

    pub fn zones(&self, region: i64) -> Result<Vec<Zone>, ApiError> {
        self.get_list(&format!("regions/{region}/zones"), "zones", &[])
    }

    pub fn images(&self, region: i64) -> Result<Vec<SystemImage>, ApiError> {
        self.get_list(&format!("regions/{region}/images"), "systemImages", &[])
    }

    pub fn provider_configurations(&self) -> Result<Vec<SystemProviderConfiguration>, ApiError> {
        self.get_list("systemproviderconfigurations", "systemproviderConfigurations", &[])
    }
}
