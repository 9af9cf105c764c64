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
use crate::types::job::Job;
use tracing::debug;

impl ApiClient {
    /// Jobs recorded for an entity, newest first, without sub-jobs.
    pub fn entity_jobs(&self, entity: &str, id: i64) -> Result<Vec<Job>, ApiError> {
        self.get(&format!("jobs/history/{entity}/{id}"), &[])
    }

    /// A root job with its full tree of sub-jobs.
    pub fn root_job(&self, id: i64) -> Result<Job, ApiError> {
        self.get(&format!("jobs/history/root/{id}"), &[])
    }

    /// History of an entity with each root job expanded into its tree.
    pub fn job_history(&self, entity: &str, id: i64) -> Result<Vec<Job>, ApiError> {
        let roots = self.entity_jobs(entity, id)?;
        debug!(entity, id, count = roots.len(), "expanding job history");
        roots.iter().map(|job| self.root_job(job.id)).collect()
    }
}
