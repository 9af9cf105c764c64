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

//! Partial-update payloads.
//!
//! An update request is built from three layers: the live entity (turned
//! into its PUT shape and serialized), an optional JSON settings file, and
//! the flags the user actually passed. Later layers win key by key.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use std::{fs, io};

pub type Settings = Map<String, Value>;

/// Serializes `value` into a JSON object map.
pub fn to_settings<T: Serialize>(value: &T) -> Result<Settings> {
    match serde_json::to_value(value).context("serializing settings")? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("expected an object, got `{other}`")),
    }
}

/// Copies every key of `overrides` onto a copy of `base`.
pub fn merge_maps(base: &Settings, overrides: &Settings) -> Settings {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Reads a settings file; `-` means stdin.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading settings from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?
    };
    parse_settings(&contents).with_context(|| format!("parsing settings file {}", path.display()))
}

pub fn parse_settings(contents: &str) -> Result<Settings> {
    match serde_json::from_str::<Value>(contents)? {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow!("settings must be a JSON object")),
    }
}

/// Builds the payload for a partial update: `baseline`, then the settings
/// file, then the explicitly set flags in `patch`.
pub fn merge_settings<B: Serialize, P: Serialize>(
    baseline: &B,
    file: Option<&Path>,
    patch: &P,
) -> Result<Settings> {
    let file = file.map(load_settings_file).transpose()?;
    merge_layers(baseline, file.as_ref(), patch)
}

pub fn merge_layers<B: Serialize, P: Serialize>(
    baseline: &B,
    file: Option<&Settings>,
    patch: &P,
) -> Result<Settings> {
    let mut merged = to_settings(baseline)?;
    if let Some(file) = file {
        merged = merge_maps(&merged, file);
    }
    Ok(merge_maps(&merged, &to_settings(patch)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Baseline {
        name: String,
        cpu: i64,
        management_type: String,
    }

    #[derive(Serialize, Default)]
    struct Patch {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cpu: Option<i64>,
    }

    fn baseline() -> Baseline {
        Baseline {
            name: "web01".into(),
            cpu: 2,
            management_type: "basic".into(),
        }
    }

    #[test]
    fn unset_patch_keeps_baseline() {
        let merged = merge_layers(&baseline(), None, &Patch::default()).unwrap();
        assert_eq!(
            Value::Object(merged),
            json!({"name": "web01", "cpu": 2, "managementType": "basic"})
        );
    }

    #[test]
    fn flags_win_over_file_and_file_over_baseline() {
        let file = parse_settings(r#"{"name": "from-file", "cpu": 8, "remarks": "x"}"#).unwrap();
        let patch = Patch {
            cpu: Some(4),
            ..Patch::default()
        };

        let merged = merge_layers(&baseline(), Some(&file), &patch).unwrap();

        assert_eq!(merged["name"], "from-file");
        assert_eq!(merged["cpu"], 4);
        assert_eq!(merged["managementType"], "basic");
        // unknown keys pass through untouched
        assert_eq!(merged["remarks"], "x");
    }

    #[test]
    fn patch_that_is_not_an_object_is_an_error() {
        let err = merge_layers(&baseline(), None, &vec![1, 2]).unwrap_err();
        assert!(err.to_string().contains("expected an object"), "{err}");
    }

    #[test]
    fn merge_is_keywise_override_for_arbitrary_maps() {
        let cases = [
            (json!({}), json!({}), json!({})),
            (json!({"a": 1}), json!({"a": 2}), json!({"b": 3})),
            (json!({"a": 1, "b": 1}), json!({"b": 2}), json!({"a": 3})),
            (json!({"a": [1]}), json!({}), json!({"a": null})),
        ];
        for (b, f, o) in cases {
            let (b, f, o) = (
                b.as_object().unwrap().clone(),
                f.as_object().unwrap().clone(),
                o.as_object().unwrap().clone(),
            );
            let merged = merge_layers(&b, Some(&f), &o).unwrap();
            let expected = merge_maps(&merge_maps(&b, &f), &o);
            assert_eq!(merged, expected);
            for (key, value) in &merged {
                let want = o.get(key).or_else(|| f.get(key)).or_else(|| b.get(key));
                assert_eq!(Some(value), want);
            }
        }
    }

    #[test]
    fn loads_settings_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"memory": 16}}"#).unwrap();

        let merged = merge_settings(&baseline(), Some(file.path()), &Patch::default()).unwrap();
        assert_eq!(merged["memory"], 16);
        assert_eq!(merged["cpu"], 2);
    }

    #[test]
    fn rejects_non_object_settings() {
        let err = parse_settings("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
        assert!(parse_settings("not json").is_err());
    }
}
