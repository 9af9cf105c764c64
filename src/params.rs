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

//! `-p key=value` parameters for checks, cookbooks and app components, and
//! their validation against the parameter schema the API publishes per type.

use crate::settings::Settings;
use crate::types::system::{CookbookParameterOption, CookbookType};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(value) => vec![value.as_str()],
            ParamValue::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            ParamValue::Single(value) => Value::String(value.clone()),
            ParamValue::Multi(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

pub type Params = BTreeMap<String, ParamValue>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("Wrong way of defining parameter is used for: '{0}'. (use: [ -p key=value ])")]
    Malformed(String),
    #[error("Parameter '{key}' NOT known for {kind} {type_name}")]
    Unknown {
        key: String,
        kind: &'static str,
        type_name: String,
    },
    #[error("No parameter options found for '{0}'")]
    NoOptions(String),
    #[error("'{value}' NOT an option for '{key}'")]
    NotAnOption { key: String, value: String },
    #[error("Given value '{value}' can not be installed on current OS: '{os}'")]
    UnsupportedOs { value: String, os: String },
    #[error("Given value '{0}' NOT possible for multiselect")]
    Exclusive(String),
}

/// Parses `key=value` entries. A value holding commas becomes a multi value.
pub fn parse_custom_parameters<S: AsRef<str>>(entries: &[S]) -> Result<Params, ParamError> {
    let mut params = Params::new();
    for entry in entries {
        let entry = entry.as_ref();
        let Some((key, value)) = entry.split_once('=') else {
            return Err(ParamError::Malformed(entry.to_string()));
        };
        let value = if value.contains(',') {
            ParamValue::Multi(value.split(',').map(|v| v.trim().to_string()).collect())
        } else {
            ParamValue::Single(value.trim().to_string())
        };
        params.insert(key.trim().to_string(), value);
    }
    Ok(params)
}

/// Whether `option` may be installed on a system running `os`.
///
/// An empty `os` means the system's OS is unknown and nothing is filtered.
pub fn option_available_for_os(option: &CookbookParameterOption, os: &str) -> bool {
    os.is_empty()
        || option.operating_system_versions.is_empty()
        || option
            .operating_system_versions
            .iter()
            .any(|version| version.name == os)
}

/// Checks `params` against a cookbook type and returns the JSON fields to
/// send. `select` parameters are always sent as arrays.
pub fn validate_cookbook_parameters(
    cookbook_type: &CookbookType,
    type_name: &str,
    params: &Params,
    os: &str,
) -> Result<Settings, ParamError> {
    let mut fields = Settings::new();
    for (key, value) in params {
        let spec = cookbook_type
            .cookbook_type
            .parameters
            .iter()
            .find(|p| &p.name == key)
            .ok_or_else(|| ParamError::Unknown {
                key: key.clone(),
                kind: "cookbooktype",
                type_name: type_name.to_string(),
            })?;

        if spec.kind != "select" {
            fields.insert(key.clone(), value.to_json());
            continue;
        }

        let options = cookbook_type
            .parameter_options
            .get(key)
            .ok_or_else(|| ParamError::NoOptions(key.clone()))?;

        let values = value.values();
        for v in &values {
            let option = options.get(*v).ok_or_else(|| ParamError::NotAnOption {
                key: key.clone(),
                value: v.to_string(),
            })?;
            if !option_available_for_os(option, os) {
                return Err(ParamError::UnsupportedOs {
                    value: v.to_string(),
                    os: os.to_string(),
                });
            }
            if option.exclusive && values.len() > 1 {
                return Err(ParamError::Exclusive(v.to_string()));
            }
        }

        fields.insert(
            key.clone(),
            Value::Array(values.into_iter().map(Value::from).collect()),
        );
    }
    Ok(fields)
}

/// Checks that every key of `params` is one of `allowed` and returns the
/// JSON fields to send. `kind` names the schema in errors (`checktype`, ...).
pub fn validate_known_parameters<'a>(
    allowed: impl IntoIterator<Item = &'a str>,
    kind: &'static str,
    type_name: &str,
    params: &Params,
) -> Result<Settings, ParamError> {
    let allowed: Vec<&str> = allowed.into_iter().collect();
    let mut fields = Settings::new();
    for (key, value) in params {
        if !allowed.contains(&key.as_str()) {
            return Err(ParamError::Unknown {
                key: key.clone(),
                kind,
                type_name: type_name.to_string(),
            });
        }
        fields.insert(key.clone(), value.to_json());
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::system::OptionOs;
    use serde_json::json;

    fn option(os: &[&str], exclusive: bool) -> CookbookParameterOption {
        CookbookParameterOption {
            name: String::new(),
            exclusive,
            operating_system_versions: os
                .iter()
                .map(|name| OptionOs {
                    id: 0,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn php_cookbook() -> CookbookType {
        serde_json::from_value(json!({
            "cookbooktype": {
                "parameters": [
                    {"name": "versions", "type": "select"},
                    {"name": "modules", "type": "select"},
                    {"name": "memory_limit", "type": "string"}
                ]
            },
            "parameterOptions": {
                "versions": {
                    "7.4": {"exclusive": false, "operatingsystem_versions": [{"name": "Ubuntu 20.04"}]},
                    "8.1": {"exclusive": false, "operatingsystem_versions": [{"name": "Ubuntu 20.04"}, {"name": "Ubuntu 22.04"}]},
                    "5.6": {"exclusive": true, "operatingsystem_versions": [{"name": "Centos 7"}]}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn parses_single_and_multi_values() {
        let params = parse_custom_parameters(&["a=1,2,3", " b = x ", "c=k=v"]).unwrap();
        assert_eq!(
            params["a"],
            ParamValue::Multi(vec!["1".into(), "2".into(), "3".into()])
        );
        assert_eq!(params["b"], ParamValue::Single("x".into()));
        assert_eq!(params["c"], ParamValue::Single("k=v".into()));

        let single = parse_custom_parameters(&["a=1"]).unwrap();
        assert_eq!(serde_json::to_value(&single).unwrap(), json!({"a": "1"}));
    }

    #[test]
    fn rejects_entry_without_equals() {
        let err = parse_custom_parameters(&["a=1", "oops"]).unwrap_err();
        assert_eq!(err, ParamError::Malformed("oops".into()));
        assert_eq!(
            err.to_string(),
            "Wrong way of defining parameter is used for: 'oops'. (use: [ -p key=value ])"
        );
    }

    #[test]
    fn os_filter_only_applies_to_known_os() {
        let centos = option(&["centos7"], false);
        assert!(!option_available_for_os(&centos, "ubuntu20"));
        assert!(option_available_for_os(&centos, ""));
        assert!(option_available_for_os(&centos, "centos7"));
        assert!(option_available_for_os(&option(&[], false), "ubuntu20"));
    }

    #[test]
    fn select_values_are_sent_as_arrays() {
        let params = parse_custom_parameters(&["versions=7.4", "memory_limit=256M"]).unwrap();
        let fields =
            validate_cookbook_parameters(&php_cookbook(), "php", &params, "Ubuntu 20.04").unwrap();
        assert_eq!(fields["versions"], json!(["7.4"]));
        assert_eq!(fields["memory_limit"], json!("256M"));
    }

    #[test]
    fn rejects_exclusive_value_in_multiselect() {
        let params = parse_custom_parameters(&["versions=5.6,8.1"]).unwrap();
        let err = validate_cookbook_parameters(&php_cookbook(), "php", &params, "").unwrap_err();
        assert_eq!(err, ParamError::Exclusive("5.6".into()));

        // alone it is fine
        let params = parse_custom_parameters(&["versions=5.6"]).unwrap();
        assert!(validate_cookbook_parameters(&php_cookbook(), "php", &params, "").is_ok());
    }

    #[test]
    fn reports_cookbook_schema_violations() {
        let cookbook = php_cookbook();
        let cases = [
            ("colour=red", "Ubuntu 20.04", "Parameter 'colour' NOT known for cookbooktype php"),
            ("modules=gd", "Ubuntu 20.04", "No parameter options found for 'modules'"),
            ("versions=9.9", "Ubuntu 20.04", "'9.9' NOT an option for 'versions'"),
            (
                "versions=7.4",
                "Ubuntu 22.04",
                "Given value '7.4' can not be installed on current OS: 'Ubuntu 22.04'",
            ),
        ];
        for (entry, os, message) in cases {
            let params = parse_custom_parameters(&[entry]).unwrap();
            let err = validate_cookbook_parameters(&cookbook, "php", &params, os).unwrap_err();
            assert_eq!(err.to_string(), message, "for {entry}");
        }
    }

    #[test]
    fn known_parameters_pass_through() {
        let params = parse_custom_parameters(&["url=/health", "port=80,443"]).unwrap();
        let fields =
            validate_known_parameters(["url", "port"], "checktype", "http", &params).unwrap();
        assert_eq!(fields["port"], json!(["80", "443"]));

        let err = validate_known_parameters(["url"], "checktype", "http", &params).unwrap_err();
        assert_eq!(err.to_string(), "Parameter 'port' NOT known for checktype http");
    }
}
