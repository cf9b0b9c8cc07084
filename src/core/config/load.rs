//! Configuration loading with env-var overrides.
//!
//! Reads TOML files, supports `[meta] base = "..."` inheritance chains,
//! and applies `PORTFOLIO_*` / `SUPABASE_*` env overrides.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::AppError;

use super::raw::{self, RawConfig};
use super::types::*;

/// Values taken from the environment rather than the TOML file.
///
/// Tests build this directly instead of mutating process env vars.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub bind: Option<String>,
    pub writing_dir: Option<String>,
    pub reading_url: Option<String>,
    pub reading_key: Option<String>,
}

impl Overrides {
    /// Collect overrides from the process environment.
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("PORTFOLIO_LOG_LEVEL").ok(),
            bind: env::var("PORTFOLIO_BIND").ok(),
            writing_dir: env::var("PORTFOLIO_CONTENT_DIR").ok(),
            reading_url: env::var("SUPABASE_URL").ok().filter(|s| !s.is_empty()),
            reading_key: env::var("SUPABASE_KEY").ok().filter(|s| !s.is_empty()),
        }
    }
}

/// Deep-merge two TOML values.
/// Tables are merged recursively: the overlay only needs to specify keys that
/// differ from the base. For every other type (string, integer, array, …)
/// the overlay value replaces the base value wholesale.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_tbl), toml::Value::Table(overlay_tbl)) => {
            for (key, ov_val) in overlay_tbl {
                let merged = match base_tbl.remove(&key) {
                    Some(base_val) => merge_toml(base_val, ov_val),
                    None => ov_val,
                };
                base_tbl.insert(key, merged);
            }
            toml::Value::Table(base_tbl)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file, follow any `[meta] base = "..."` chain, and return the
/// fully merged `toml::Value`. `visited` carries canonicalized paths already
/// seen in this chain so circular references are caught early.
fn load_raw_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<toml::Value, AppError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(AppError::Config(format!(
            "circular base reference detected at: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let overlay_val: toml::Value = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    if let Some(base_str) = overlay_val
        .get("meta")
        .and_then(|m| m.get("base"))
        .and_then(|b| b.as_str())
    {
        let base_path = if Path::new(base_str).is_absolute() {
            PathBuf::from(base_str)
        } else {
            path.parent().unwrap_or(Path::new(".")).join(base_str)
        };
        let base_val = load_raw_merged(&base_path, visited)?;
        Ok(merge_toml(base_val, overlay_val))
    } else {
        Ok(overlay_val)
    }
}

/// Load config from the given path, or `config/default.toml`, then apply env-var overrides.
/// If no path is given and `config/default.toml` does not exist, returns a hardcoded minimal default.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = Overrides::from_env();

    if let Some(path) = config_path {
        return load_from(Path::new(path), &overrides);
    }

    let default_path = Path::new("config/default.toml");
    if default_path.exists() {
        load_from(default_path, &overrides)
    } else {
        Ok(builtin_default(&overrides))
    }
}

/// Hardcoded configuration used when no file is present.
pub fn builtin_default(overrides: &Overrides) -> Config {
    let writing_dir = overrides
        .writing_dir
        .clone()
        .unwrap_or_else(raw::default_writing_dir);

    Config {
        site_name: "Sagar Harsora".to_string(),
        log_level: overrides.log_level.clone().unwrap_or_else(raw::default_log_level),
        log_file: None,
        server: ServerConfig {
            bind: overrides.bind.clone().unwrap_or_else(raw::default_bind),
            max_terminal_sessions: raw::default_max_terminal_sessions(),
        },
        content: ContentConfig {
            writing_dir: expand_home(&writing_dir),
        },
        reading: ReadingConfig {
            enabled: true,
            url: overrides.reading_url.clone(),
            api_key: overrides.reading_key.clone(),
            table: raw::default_reading_table(),
            timeout_seconds: raw::default_reading_timeout_seconds(),
            timezone: chrono_tz::America::Los_Angeles,
        },
        projects: Vec::new(),
    }
}

/// Internal loader: accepts an explicit path and resolved overrides.
/// Follows `[meta] base = "..."` inheritance chains before resolving.
pub fn load_from(path: &Path, overrides: &Overrides) -> Result<Config, AppError> {
    let merged_val = load_raw_merged(path, &mut HashSet::new())?;

    let parsed: RawConfig = Deserialize::deserialize(merged_val).map_err(|e: toml::de::Error| {
        AppError::Config(format!("config error in {}: {e}", path.display()))
    })?;

    let site = parsed.site;
    let log_level = overrides.log_level.clone().unwrap_or(site.log_level);
    crate::logger::parse_level(&log_level)
        .map_err(|e| AppError::Config(format!("config error in {}: {e}", path.display())))?;
    let writing_dir = overrides
        .writing_dir
        .clone()
        .unwrap_or(parsed.content.writing_dir);

    let timezone: Tz = parsed.reading.timezone.trim().parse().map_err(|_| {
        AppError::Config(format!(
            "reading.timezone '{}' is not an IANA zone name",
            parsed.reading.timezone
        ))
    })?;

    if parsed.server.max_terminal_sessions == 0 {
        return Err(AppError::Config(
            "server.max_terminal_sessions must be at least 1".into(),
        ));
    }

    Ok(Config {
        site_name: site.name,
        log_level,
        log_file: site.log_file.as_deref().map(expand_home),
        server: ServerConfig {
            bind: overrides.bind.clone().unwrap_or(parsed.server.bind),
            max_terminal_sessions: parsed.server.max_terminal_sessions,
        },
        content: ContentConfig {
            writing_dir: expand_home(&writing_dir),
        },
        reading: ReadingConfig {
            enabled: parsed.reading.enabled,
            url: overrides
                .reading_url
                .clone()
                .or(parsed.reading.url)
                .map(|u| u.trim_end_matches('/').to_string()),
            api_key: overrides.reading_key.clone(),
            table: parsed.reading.table,
            timeout_seconds: parsed.reading.timeout_seconds.max(1),
            timezone,
        },
        projects: parsed
            .projects
            .into_iter()
            .map(|p| ProjectConfig {
                name: p.name,
                date: p.date,
                tagline: p.tagline,
                link: p.link,
            })
            .collect(),
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
