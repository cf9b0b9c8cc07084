//! Terminal subsystem: the novelty command line behind the backtick key.
//!
//! The browser only draws the overlay; every line typed is posted to the web
//! layer, which runs it through a [`TerminalSession`] held in
//! [`TerminalSessions`]. Sessions live exactly as long as the overlay is open.
//!
//! - **files**: the fixed virtual files read by `ls` / `cat`.
//! - **commands**: the command table and interpreter.
//! - **history**: clamped arrow-key history.
//! - **session**: scrollback log plus history for one overlay.
//! - **registry**: bounded id → session table.

pub mod commands;
pub mod files;
pub mod history;
pub mod registry;
pub mod session;

pub use commands::{Reply, run};
pub use history::History;
pub use registry::TerminalSessions;
pub use session::{CollectedLinks, Line, LineKind, LinkOpener, SubmitOutcome, TerminalSession};
