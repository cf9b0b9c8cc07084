use std::sync::Arc;

use crate::config::Config;
use crate::subsystems::reading::ReadingList;
use crate::subsystems::terminal::TerminalSessions;
use crate::subsystems::writing::WritingStore;

/// Router state injected into every handler.
///
/// Cheap to clone, every field is reference-counted.
#[derive(Clone)]
pub struct SiteState {
    pub config: Arc<Config>,
    pub reading: Arc<ReadingList>,
    pub writing: Arc<WritingStore>,
    pub terminals: Arc<TerminalSessions>,
}

impl SiteState {
    pub fn new(config: Config, reading: ReadingList, writing: WritingStore) -> Self {
        let terminals = TerminalSessions::new(config.server.max_terminal_sessions);
        Self {
            config: Arc::new(config),
            reading: Arc::new(reading),
            writing: Arc::new(writing),
            terminals: Arc::new(terminals),
        }
    }
}
