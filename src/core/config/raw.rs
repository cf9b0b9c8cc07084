//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape: serde target before resolution.
#[derive(Deserialize)]
pub(super) struct RawConfig {
    pub site: RawSite,
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub content: RawContent,
    #[serde(default)]
    pub reading: RawReading,
    #[serde(default)]
    pub projects: Vec<RawProject>,
}

#[derive(Deserialize)]
pub(super) struct RawSite {
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

// ── Server ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_max_terminal_sessions")]
    pub max_terminal_sessions: usize,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_terminal_sessions: default_max_terminal_sessions(),
        }
    }
}

// ── Content ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawContent {
    #[serde(default = "default_writing_dir")]
    pub writing_dir: String,
}

impl Default for RawContent {
    fn default() -> Self {
        Self { writing_dir: default_writing_dir() }
    }
}

// ── Reading ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawReading {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_reading_table")]
    pub table: String,
    #[serde(default = "default_reading_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_reading_timezone")]
    pub timezone: String,
}

impl Default for RawReading {
    fn default() -> Self {
        Self {
            enabled: true,
            url: None,
            table: default_reading_table(),
            timeout_seconds: default_reading_timeout_seconds(),
            timezone: default_reading_timezone(),
        }
    }
}

// ── Projects ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawProject {
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tagline: String,
    pub link: String,
}

// ── Defaults ────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

pub(super) fn default_max_terminal_sessions() -> usize {
    256
}

pub(super) fn default_writing_dir() -> String {
    "content/writing".to_string()
}

pub(super) fn default_reading_table() -> String {
    "links".to_string()
}

pub(super) fn default_reading_timeout_seconds() -> u64 {
    10
}

pub(super) fn default_reading_timezone() -> String {
    "America/Los_Angeles".to_string()
}
