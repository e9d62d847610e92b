// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mashwar.toml` > `~/.config/mashwar/mashwar.toml`
//! > `/etc/mashwar/mashwar.toml` with environment variable overrides via the
//! `MASHWAR_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MashwarConfig;

/// System-wide config file location.
const SYSTEM_CONFIG_PATH: &str = "/etc/mashwar/mashwar.toml";

/// Local (working directory) config file name.
const LOCAL_CONFIG_FILE: &str = "mashwar.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mashwar/mashwar.toml` (system-wide)
/// 3. `~/.config/mashwar/mashwar.toml` (user XDG config)
/// 4. `./mashwar.toml` (local directory)
/// 5. `MASHWAR_*` environment variables
pub fn load_config() -> Result<MashwarConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MashwarConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MashwarConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MashwarConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MashwarConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MashwarConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The user-level XDG config file path, when a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mashwar/mashwar.toml"))
}

/// Config file locations in merge order, paired with whether each exists.
///
/// Backs `mashwar config path`.
pub fn config_search_paths() -> Vec<(PathBuf, bool)> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(user) = user_config_path() {
        paths.push(user);
    }
    paths.push(PathBuf::from(LOCAL_CONFIG_FILE));

    paths
        .into_iter()
        .map(|p| {
            let exists = p.exists();
            (p, exists)
        })
        .collect()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example,
/// `MASHWAR_SHEETS_ACCESS_TOKEN` must map to `sheets.access_token`, not
/// `sheets.access.token`.
fn env_provider() -> Env {
    Env::prefixed("MASHWAR_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: MASHWAR_WHATSAPP_TWILIO_AUTH_TOKEN -> "whatsapp_twilio_auth_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("company_", "company.", 1)
            .replacen("sheets_", "sheets.", 1)
            .replacen("email_", "email.", 1)
            .replacen("whatsapp_", "whatsapp.", 1);
        mapped.into()
    })
}
