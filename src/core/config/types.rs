//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs that subsystems consume.
//! Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;

use chrono_tz::Tz;

// ── Server ──────────────────────────────────────────────────────────────────

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the site listens on.
    pub bind: String,
    /// Upper bound on concurrently open terminal overlays.
    pub max_terminal_sessions: usize,
}

// ── Content ─────────────────────────────────────────────────────────────────

/// Writing section configuration.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Directory scanned for `*.md` / `*.mdx` posts at startup.
    pub writing_dir: PathBuf,
}

// ── Reading ─────────────────────────────────────────────────────────────────

/// Reading list (remote link table) configuration.
#[derive(Debug, Clone)]
pub struct ReadingConfig {
    pub enabled: bool,
    /// Project URL of the hosted table, e.g. `https://xyz.supabase.co`.
    pub url: Option<String>,
    /// Anonymous API key. Sourced from `SUPABASE_KEY` only, never TOML.
    pub api_key: Option<String>,
    pub table: String,
    pub timeout_seconds: u64,
    /// Zone used when rendering record dates.
    pub timezone: Tz,
}

// ── Projects ────────────────────────────────────────────────────────────────

/// One row on the projects page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    pub date: String,
    pub tagline: String,
    pub link: String,
}

// ── Top-level ───────────────────────────────────────────────────────────────

/// Resolved site configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub site_name: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub reading: ReadingConfig,
    pub projects: Vec<ProjectConfig>,
}

impl Config {
    /// Whether the reading list can reach its remote table at all.
    pub fn reading_should_fetch(&self) -> bool {
        self.reading.enabled && self.reading.url.is_some() && self.reading.api_key.is_some()
    }
}
