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

use crate::types;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT_VALUE: &str = concat!("lvl/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{field} : {message}")]
    Field { field: String, message: String },
    #[error("{message} (code {code})")]
    Envelope { code: i64, message: String },
    #[error("unknown error, status code: {0}")]
    Unknown(u16),
    #[error("invalid endpoint `{0}`")]
    Endpoint(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decoding response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
}

/// Query parameters shared by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub filter: Option<String>,
}

impl ListQuery {
    pub fn filtered(filter: &str) -> Self {
        Self {
            limit: None,
            filter: Some(filter.to_string()),
        }
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(filter) = self.filter.as_ref().filter(|f| !f.is_empty()) {
            pairs.push(("filter", filter.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        // Url::join drops the last segment unless the base ends with '/'.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalized).context("parsing API URL")?;
        let http = Client::builder()
            .user_agent(HeaderValue::from_static(USER_AGENT_VALUE))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            base_url: parsed,
            http,
            api_key: api_key.to_string(),
        })
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.invoke(Method::GET, path, query, Option::<&()>::None)
    }

    pub fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.invoke(Method::POST, path, &[], Some(body))
    }

    /// POST where the response body is not interesting.
    pub fn post_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(Method::POST, path, &[], Some(body)).map(|_| ())
    }

    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(Method::PUT, path, &[], Some(body)).map(|_| ())
    }

    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, &[], Option::<&()>::None)
            .map(|_| ())
    }

    fn invoke<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let text = self.send(method, path, query, body)?.unwrap_or_default();
        let text = if text.trim().is_empty() { "null" } else { &text };
        let decode = |source| ApiError::Decode {
            endpoint: path.to_string(),
            source,
        };
        let value: Value = serde_json::from_str(text).map_err(decode)?;
        types::decode(value).map_err(decode)
    }

    /// Issues the request and returns the raw body, or `None` when the
    /// server answered `204 No Content`.
    fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Option<String>, ApiError> {
        let normalized = path.trim_start_matches('/');
        let url = self
            .base_url
            .join(normalized)
            .map_err(|_| ApiError::Endpoint(path.to_string()))?;

        debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(AUTHORIZATION, &self.api_key)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status();
        debug!(status = status.as_u16(), "received response");

        if method == update_method() && status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text()?;
        if !status.is_success() {
            return Err(decode_error(status, &text));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(text))
    }
}

/// The API's custom `UPDATE` verb.
fn update_method() -> Method {
    Method::from_bytes(b"UPDATE").unwrap_or(Method::PATCH)
}

/// Maps an error body to the most specific error it can be read as.
pub fn decode_error(status: StatusCode, body: &str) -> ApiError {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return ApiError::Unknown(status.as_u16());
    };

    if let Some(children) = json
        .get("errors")
        .and_then(|e| e.get("children"))
        .and_then(Value::as_object)
    {
        for (field, child) in children {
            let first = child
                .get("errors")
                .and_then(Value::as_array)
                .and_then(|errors| errors.first());
            if let Some(message) = first {
                let message = match message {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return ApiError::Field {
                    field: field.clone(),
                    message,
                };
            }
        }
    }

    if let Some(message) = json.get("message").and_then(Value::as_str) {
        let code = json
            .get("code")
            .and_then(Value::as_i64)
            .unwrap_or_else(|| i64::from(status.as_u16()));
        return ApiError::Envelope {
            code,
            message: message.to_string(),
        };
    }

    ApiError::Unknown(status.as_u16())
}
