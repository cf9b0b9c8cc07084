//! Portfolio site: entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > RUST_LOG > config)
//!   4. Init logger once
//!   5. Index writing, build the reading list and terminal registry
//!   6. Spawn Ctrl-C → shutdown signal watcher
//!   7. Run the web component until shutdown

use std::io::Write as _;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use sagarh_portfolio::config::{self, Config};
use sagarh_portfolio::error::AppError;
use sagarh_portfolio::logger;
use sagarh_portfolio::subsystems::reading::{ReadingList, store};
use sagarh_portfolio::subsystems::runtime::{Component, spawn_components};
use sagarh_portfolio::subsystems::web::{SiteState, WebChannel};
use sagarh_portfolio::subsystems::writing::WritingStore;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // .env is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();
    let config = config::load(args.config_path.as_deref())?;

    let (level, prefer_level) = logger::effective_level(args.log_level, &config.log_level);
    logger::init(level, prefer_level, config.log_file.as_deref())?;

    info!(
        site = %config.site_name,
        configured_log_level = %config.log_level,
        effective_log_level = %level,
        "config loaded"
    );

    let writing = WritingStore::open(&config.content.writing_dir)?;
    let link_store = store::build(&config);
    if !config.reading_should_fetch() {
        warn!(store = link_store.kind(), "reading list has no remote table; it will render empty");
    }
    let reading = ReadingList::new(link_store);

    print_startup_summary(&config, writing.len(), reading.store_kind());

    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
            ctrlc_token.cancel();
        }
    });

    let bind = config.server.bind.clone();
    let state = SiteState::new(config, reading, writing);
    let components: Vec<Box<dyn Component>> = vec![Box::new(WebChannel::new(bind, state))];

    let result = spawn_components(components, shutdown.clone()).join().await;
    shutdown.cancel();

    println!("\nBye :) ...");
    let _ = std::io::stdout().flush();
    result
}

fn print_startup_summary(config: &Config, posts: usize, reading_store: &str) {
    const WIDTH: usize = 58;
    let fit = |s: String| -> String {
        let len = s.chars().count();
        if len > WIDTH {
            let mut out: String = s.chars().take(WIDTH - 1).collect();
            out.push('…');
            out
        } else {
            format!("{s}{}", " ".repeat(WIDTH - len))
        }
    };

    let reading_line = match &config.reading.url {
        Some(url) if config.reading_should_fetch() => {
            format!("{reading_store}: {url} (table {})", config.reading.table)
        }
        _ => format!("{reading_store}: renders empty"),
    };

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {}   ║", fit(format!("Portfolio: {}", config.site_name)));
    println!("╟──────────────────────────────────────────────────────────────╢");
    println!("║ {}   ║", fit(format!("PID:      {}", std::process::id())));
    println!("║ {}   ║", fit(format!("Bind:     http://{}", config.server.bind)));
    println!(
        "║ {}   ║",
        fit(format!("Writing:  {posts} post(s) from {}", config.content.writing_dir.display()))
    );
    println!("║ {}   ║", fit(format!("Reading:  {reading_line}")));
    println!("║ {}   ║", fit(format!("Projects: {}", config.projects.len())));
    println!(
        "║ {}   ║",
        fit(format!("Terminal: up to {} session(s)", config.server.max_terminal_sessions))
    );
    println!("╚══════════════════════════════════════════════════════════════╝");
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: sagarh-portfolio [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            other => eprintln!("warning: ignoring unknown argument '{other}'"),
        }
    }

    //   -v    → warn
    //   -vv   → info
    //   -vvv  → debug (fetches, cache hits, session lifecycle)
    //   -vvvv → trace
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path }
}
