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
use crate::types::domain::{Domain, DomainProvider, DomainRecord, DomainRecordRequest, DomainRequest};

impl ApiClient {
    pub fn domains(&self, query: &ListQuery) -> Result<Vec<Domain>, ApiError> {
        self.get_list("domains", "domains", &query.pairs())
    }

    pub fn domain(&self, id: i64) -> Result<Domain, ApiError> {
        self.get_one(&format!("domains/{id}"), "domain")
    }

    pub fn create_domain(&self, request: &DomainRequest) -> Result<Domain, ApiError> {
        self.create("domains", "domain", request)
    }

    pub fn delete_domain(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("domains/{id}"))
    }

    pub fn domain_providers(&self) -> Result<Vec<DomainProvider>, ApiError> {
        self.get_list("domains/providers", "providers", &[])
    }

    pub fn domain_records(&self, domain: i64, query: &ListQuery) -> Result<Vec<DomainRecord>, ApiError> {
        self.get_list(&format!("domains/{domain}/records"), "records", &query.pairs())
    }

    pub fn create_domain_record(
        &self,
        domain: i64,
        request: &DomainRecordRequest,
    ) -> Result<DomainRecord, ApiError> {
        self.create(&format!("domains/{domain}/records"), "record", request)
    }

    pub fn delete_domain_record(&self, domain: i64, record: i64) -> Result<(), ApiError> {
        self.delete(&format!("domains/{domain}/records/{record}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn creates_record_and_returns_it() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/domains/12/records")
                .json_body(json!({"name": "www", "type": "CNAME", "content": "example.be."}));
            then.status(200)
                .json_body(json!({"record": {"id": 77, "name": "www", "type": "CNAME"}}));
        });

        let client = ApiClient::new(&server.base_url(), "key").unwrap();
        let record = client
            .create_domain_record(
                12,
                &DomainRecordRequest {
                    name: "www".into(),
                    kind: "CNAME".into(),
                    content: "example.be.".into(),
                    priority: None,
                },
            )
            .unwrap();

        mock.assert();
        assert_eq!(record.id, 77);
        assert_eq!(record.kind, "CNAME");
    }
}
