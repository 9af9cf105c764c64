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

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.level27.eu/v1";

pub const CONFIG_DIR_ENV: &str = "LVL_CONFIG_DIR";
pub const API_KEY_ENV: &str = "LVL_API_KEY";
pub const API_URL_ENV: &str = "LVL_API_URL";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub user_id: Option<i64>,
    pub org_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Local,
    User,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate a writable config directory for the current user")]
    MissingConfigDir,
    #[error("API key is required; set it with `lvl configure --key <key>` or {API_KEY_ENV}")]
    MissingApiKey,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub api_key: String,
    pub api_url: String,
    pub user_id: Option<i64>,
    pub org_id: Option<i64>,
}

pub fn config_path(scope: Scope, cwd: &Path) -> Result<PathBuf> {
    match scope {
        Scope::Local => Ok(cwd.join(".lvl.yaml")),
        Scope::User => {
            if let Ok(custom) = env::var(CONFIG_DIR_ENV) {
                return Ok(PathBuf::from(custom).join("config.yaml"));
            }
            let base = config_dir().ok_or(ConfigError::MissingConfigDir)?;
            Ok(base.join("lvl").join("config.yaml"))
        }
    }
}

/// User file overlaid with the project-local file.
pub fn load(cwd: &Path) -> Result<Config> {
    let user = read_if_exists(&config_path(Scope::User, cwd)?)?.unwrap_or_default();
    let local = read_if_exists(&config_path(Scope::Local, cwd)?)?.unwrap_or_default();
    Ok(merge(user, local))
}

pub fn load_scope(scope: Scope, cwd: &Path) -> Result<Config> {
    Ok(read_if_exists(&config_path(scope, cwd)?)?.unwrap_or_default())
}

pub fn save(scope: Scope, config: &Config, cwd: &Path) -> Result<PathBuf> {
    let path = config_path(scope, cwd)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let serialized = serde_yaml::to_string(config).context("serializing config")?;
    fs::write(&path, serialized).with_context(|| format!("writing {:?}", path))?;
    Ok(path)
}

/// Resolves the credentials for this invocation: files, then environment,
/// then explicit flags.
pub fn resolve(
    cwd: &Path,
    api_key_override: Option<String>,
    api_url_override: Option<String>,
) -> Result<EffectiveConfig> {
    let mut merged = merge(load(cwd)?, from_env());

    if let Some(key) = api_key_override {
        merged.api_key = Some(key);
    }
    if let Some(url) = api_url_override {
        merged.api_url = Some(url);
    }

    let api_key = merged
        .api_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    let api_url = merged
        .api_url
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    Ok(EffectiveConfig {
        api_key,
        api_url,
        user_id: merged.user_id,
        org_id: merged.org_id,
    })
}

/// Copy of `config` that is safe to print.
pub fn masked(config: &Config) -> Config {
    let mut masked = config.clone();
    if masked.api_key.is_some() {
        masked.api_key = Some("*****".into());
    }
    masked
}

fn from_env() -> Config {
    Config {
        api_key: env::var(API_KEY_ENV).ok(),
        api_url: env::var(API_URL_ENV).ok(),
        user_id: None,
        org_id: None,
    }
}

fn read_if_exists(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    let config = serde_yaml::from_str(&contents).with_context(|| format!("parsing {:?}", path))?;
    Ok(Some(config))
}

fn merge(base: Config, over: Config) -> Config {
    Config {
        api_key: over.api_key.or(base.api_key),
        api_url: over.api_url.or(base.api_url),
        user_id: over.user_id.or(base.user_id),
        org_id: over.org_id.or(base.org_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};
    use std::{env, fs};
    use tempfile::tempdir;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn isolate(dir: &Path) {
        unsafe {
            env::set_var(CONFIG_DIR_ENV, dir.join("config"));
            env::remove_var(API_KEY_ENV);
            env::remove_var(API_URL_ENV);
        }
        fs::create_dir_all(dir.join("config")).unwrap();
    }

    #[test]
    fn merges_user_and_local_and_overrides() {
        let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap();
        let cwd = tempdir().unwrap();
        isolate(cwd.path());

        let user_cfg = Config {
            api_key: Some("user-key".into()),
            api_url: Some("https://example.test/v1".into()),
            user_id: Some(12),
            org_id: Some(34),
        };
        save(Scope::User, &user_cfg, cwd.path()).unwrap();

        let local_cfg = Config {
            api_key: Some("local-key".into()),
            ..Config::default()
        };
        save(Scope::Local, &local_cfg, cwd.path()).unwrap();

        let effective = resolve(cwd.path(), None, None).unwrap();
        assert_eq!(effective.api_key, "local-key");
        assert_eq!(effective.api_url, "https://example.test/v1");
        assert_eq!(effective.user_id, Some(12));
        assert_eq!(effective.org_id, Some(34));

        let overridden = resolve(
            cwd.path(),
            Some("override".into()),
            Some("https://override.test".into()),
        )
        .unwrap();
        assert_eq!(overridden.api_key, "override");
        assert_eq!(overridden.api_url, "https://override.test");
    }

    #[test]
    fn environment_beats_files_but_not_flags() {
        let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap();
        let cwd = tempdir().unwrap();
        isolate(cwd.path());

        let user_cfg = Config {
            api_key: Some("file-key".into()),
            ..Config::default()
        };
        save(Scope::User, &user_cfg, cwd.path()).unwrap();
        unsafe {
            env::set_var(API_KEY_ENV, "env-key");
        }

        let effective = resolve(cwd.path(), None, None).unwrap();
        assert_eq!(effective.api_key, "env-key");
        assert_eq!(effective.api_url, DEFAULT_API_URL);

        let flagged = resolve(cwd.path(), Some("flag-key".into()), None).unwrap();
        assert_eq!(flagged.api_key, "flag-key");

        unsafe {
            env::remove_var(API_KEY_ENV);
        }
    }

    #[test]
    fn errors_when_missing_key() {
        let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap();
        let cwd = tempdir().unwrap();
        isolate(cwd.path());

        let err = resolve(cwd.path(), None, None).unwrap_err();
        assert!(err.to_string().contains("API key is required"));

        let blank = resolve(cwd.path(), Some("   ".into()), None).unwrap_err();
        assert!(blank.to_string().contains("API key is required"));
    }

    #[test]
    fn masks_api_key() {
        let cfg = Config {
            api_key: Some("secret".into()),
            ..Config::default()
        };
        assert_eq!(masked(&cfg).api_key.as_deref(), Some("*****"));
        assert_eq!(masked(&Config::default()).api_key, None);
    }
}
