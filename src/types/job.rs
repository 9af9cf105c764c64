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

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Background job run by the API against an entity. Root jobs fetched from
/// the history endpoint carry their sub-jobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub status: i64,
    pub conc: i64,
    pub msg: String,
    pub dt: Value,
    pub eclass: String,
    pub estatus: i64,
    pub system: i64,
    pub service: String,
    pub exception_msg: String,
    pub jobs: Vec<Job>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_nested_job_tree() {
        let job: Job = serde_json::from_value(json!({
            "id": 1,
            "msg": "root",
            "jobs": [
                {"id": 2, "jobs": [{"id": 3}]},
                {"id": 4, "status": 50}
            ]
        }))
        .unwrap();

        assert_eq!(job.jobs.len(), 2);
        assert_eq!(job.jobs[0].jobs[0].id, 3);
        assert_eq!(job.jobs[1].status, 50);
    }
}
