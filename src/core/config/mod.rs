//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `PORTFOLIO_LOG_LEVEL`, `PORTFOLIO_BIND` and
//! `PORTFOLIO_CONTENT_DIR`. `SUPABASE_URL` overrides `[reading].url`; the
//! API key comes only from `SUPABASE_KEY` and is never read from TOML.
//!
//! # Module layout
//!
//! - **types**: Public configuration structs consumed by subsystems.
//! - **raw**: Raw TOML deserialization types, kept private.
//! - **load**: `merge_toml`, `load`, `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{Overrides, builtin_default, expand_home, load, load_from};
pub use types::*;

impl Config {
    /// Safe `Config` for tests: no remote table, content under `writing_dir`.
    pub fn test_default(writing_dir: &std::path::Path) -> Self {
        Self {
            site_name: "test".into(),
            log_level: "info".into(),
            log_file: None,
            server: ServerConfig {
                bind: "127.0.0.1:0".into(),
                max_terminal_sessions: 8,
            },
            content: ContentConfig {
                writing_dir: writing_dir.to_path_buf(),
            },
            reading: ReadingConfig {
                enabled: false,
                url: None,
                api_key: None,
                table: "links".into(),
                timeout_seconds: 1,
                timezone: chrono_tz::UTC,
            },
            projects: Vec::new(),
        }
    }
}
