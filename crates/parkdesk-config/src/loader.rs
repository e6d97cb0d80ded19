// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./parkdesk.toml` > `~/.config/parkdesk/parkdesk.toml` >
//! `/etc/parkdesk/parkdesk.toml`, then `PARKDESK_*` environment overrides and
//! finally `PARKDESK_API_URL` for the backend base URL.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ParkdeskConfig;

/// Name of the config file looked up in each directory of the hierarchy.
pub const CONFIG_FILE_NAME: &str = "parkdesk.toml";

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "PARKDESK_API_URL";

/// Config files in merge order (later overrides earlier).
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/parkdesk").join(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("parkdesk").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/parkdesk/parkdesk.toml`
/// 3. `~/.config/parkdesk/parkdesk.toml`
/// 4. `./parkdesk.toml`
/// 5. `PARKDESK_*` environment variables
/// 6. `PARKDESK_API_URL`
pub fn load_config() -> Result<ParkdeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<ParkdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParkdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
///
/// The file replaces the hierarchy; it must exist.
pub fn load_config_from_path(path: &Path) -> Result<ParkdeskConfig, figment::Error> {
    if !path.is_file() {
        return Err(figment::Error::from(format!(
            "config file `{}` does not exist",
            path.display()
        )));
    }

    Figment::new()
        .merge(Serialized::defaults(ParkdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(api_url_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(ParkdeskConfig::default()));
    for path in config_file_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider()).merge(api_url_provider())
}

/// `PARKDESK_<SECTION>_<KEY>` overrides, e.g. `PARKDESK_DESK_LOG_LEVEL`.
///
/// Uses an explicit section prefix mapping rather than `split("_")`, because
/// keys such as `base_url` contain underscores.
fn env_provider() -> Env {
    Env::prefixed("PARKDESK_")
        .filter(|key| !key.as_str().eq_ignore_ascii_case("api_url"))
        .map(|key| {
            key.as_str()
                .to_ascii_lowercase()
                .replacen("api_", "api.", 1)
                .replacen("desk_", "desk.", 1)
                .into()
        })
}

/// The single documented variable for pointing the console at a backend.
fn api_url_provider() -> Env {
    Env::raw()
        .only(&[API_URL_ENV])
        .map(|_| "api.base_url".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_is_merged_last() {
        let paths = config_file_paths();
        assert_eq!(paths.first().unwrap(), &PathBuf::from("/etc/parkdesk/parkdesk.toml"));
        assert_eq!(paths.last().unwrap(), &PathBuf::from(CONFIG_FILE_NAME));
    }

    #[test]
    fn str_loader_ignores_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(API_URL_ENV, "http://from-env:9000");
            let config = load_config_from_str("").expect("defaults");
            assert_eq!(config.api.base_url, "http://localhost:3000");
            Ok(())
        });
    }
}
