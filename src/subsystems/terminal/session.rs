//! One open terminal overlay: its scrollback, history and lifecycle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::profile;

use super::commands::{self, Reply};
use super::history::History;

/// Which side of the conversation a scrollback line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn input(text: impl Into<String>) -> Self {
        Self { kind: LineKind::Input, text: text.into() }
    }

    fn output(text: impl Into<String>) -> Self {
        Self { kind: LineKind::Output, text: text.into() }
    }
}

/// Side-effect seam for `open <target>`.
pub trait LinkOpener {
    fn open(&mut self, url: &str);
}

/// Opener that records URLs for the caller to act on later.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectedLinks(pub Vec<String>);

impl LinkOpener for CollectedLinks {
    fn open(&mut self, url: &str) {
        self.0.push(url.to_string());
    }
}

/// What a submitted line did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Printed,
    Cleared,
    Closed,
}

#[derive(Debug, Clone)]
pub struct TerminalSession {
    lines: Vec<Line>,
    history: History,
    closed: bool,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSession {
    pub fn new() -> Self {
        Self {
            lines: banner(),
            history: History::default(),
            closed: false,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn submit(&mut self, input: &str, opener: &mut dyn LinkOpener) -> SubmitOutcome {
        self.submit_at(input, Utc::now(), opener)
    }

    /// Interpret `input` as if typed at `now`.
    pub fn submit_at(
        &mut self,
        input: &str,
        now: DateTime<Utc>,
        opener: &mut dyn LinkOpener,
    ) -> SubmitOutcome {
        let trimmed = input.trim();
        let output = match commands::run(trimmed, now) {
            Reply::Exit => {
                self.close();
                return SubmitOutcome::Closed;
            }
            Reply::Clear => {
                self.lines.clear();
                self.history.reset_cursor();
                return SubmitOutcome::Cleared;
            }
            Reply::Open { target, url } => {
                debug!(%target, %url, "terminal open");
                opener.open(url);
                format!("Opening {target}...")
            }
            Reply::Text(text) => text,
        };

        self.lines.push(Line::input(trimmed));
        if !output.is_empty() {
            self.lines.push(Line::output(output));
        }
        self.history.push(trimmed);
        SubmitOutcome::Printed
    }

    pub fn history_previous(&mut self) -> String {
        self.history.previous()
    }

    pub fn history_next(&mut self) -> String {
        self.history.next()
    }

    /// Ctrl-L: wipe the screen but keep history and cursor.
    pub fn clear_screen(&mut self) {
        self.lines.clear();
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}

fn banner() -> Vec<Line> {
    vec![
        Line::output(format!("{}@portfolio ~ % ", profile::OWNER_HANDLE)),
        Line::output("Welcome. Type 'help' for available commands.\n"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(s: &mut TerminalSession, input: &str) -> (SubmitOutcome, Vec<String>) {
        let mut links = CollectedLinks::default();
        let outcome = s.submit(input, &mut links);
        (outcome, links.0)
    }

    #[test]
    fn new_session_shows_banner() {
        let s = TerminalSession::new();
        assert_eq!(s.lines().len(), 2);
        assert!(s.lines().iter().all(|l| l.kind == LineKind::Output));
        assert_eq!(s.lines()[0].text, "sagar@portfolio ~ % ");
    }

    #[test]
    fn command_appends_input_then_output() {
        let mut s = TerminalSession::new();
        submit(&mut s, "  pwd ");
        let tail = &s.lines()[2..];
        assert_eq!(tail, [Line::input("pwd"), Line::output("/home/sagar")]);
    }

    #[test]
    fn empty_output_adds_only_input_line() {
        let mut s = TerminalSession::new();
        submit(&mut s, "echo");
        assert_eq!(&s.lines()[2..], [Line::input("echo")]);
        submit(&mut s, "");
        assert_eq!(s.lines().last(), Some(&Line::input("")));
        // blank line not recorded in history
        assert_eq!(s.history_previous(), "echo");
    }

    #[test]
    fn open_calls_opener_with_exact_url() {
        let mut s = TerminalSession::new();
        let (outcome, opened) = submit(&mut s, "open github");
        assert_eq!(outcome, SubmitOutcome::Printed);
        assert_eq!(opened, ["https://github.com/sagarrh"]);
        assert_eq!(s.lines().last().unwrap().text, "Opening github...");
    }

    #[test]
    fn open_unknown_opens_nothing() {
        let mut s = TerminalSession::new();
        let (_, opened) = submit(&mut s, "open nonsense");
        assert!(opened.is_empty());
        assert!(s.lines().last().unwrap().text.contains("Try: github, twitter, instagram, email"));
    }

    #[test]
    fn clear_wipes_lines_without_recording() {
        let mut s = TerminalSession::new();
        submit(&mut s, "ls");
        let (outcome, _) = submit(&mut s, "clear");
        assert_eq!(outcome, SubmitOutcome::Cleared);
        assert!(s.lines().is_empty());
        assert_eq!(s.history_previous(), "ls");
        assert_eq!(s.history_previous(), "ls");
    }

    #[test]
    fn exit_closes_and_keeps_log() {
        let mut s = TerminalSession::new();
        let before = s.lines().len();
        let (outcome, _) = submit(&mut s, "exit");
        assert_eq!(outcome, SubmitOutcome::Closed);
        assert!(s.is_closed());
        assert_eq!(s.lines().len(), before);
    }

    #[test]
    fn history_across_commands() {
        let mut s = TerminalSession::new();
        for cmd in ["whoami", "pwd", "ls"] {
            submit(&mut s, cmd);
        }
        assert_eq!(s.history_previous(), "ls");
        assert_eq!(s.history_previous(), "pwd");
        assert_eq!(s.history_previous(), "whoami");
        assert_eq!(s.history_previous(), "whoami");
        assert_eq!(s.history_next(), "pwd");
    }

    #[test]
    fn ctrl_l_keeps_history() {
        let mut s = TerminalSession::new();
        submit(&mut s, "pwd");
        s.clear_screen();
        assert!(s.lines().is_empty());
        assert_eq!(s.history_previous(), "pwd");
    }

    #[test]
    fn line_kind_serializes_lowercase() {
        let json = serde_json::to_string(&Line::input("ls")).unwrap();
        assert_eq!(json, r#"{"kind":"input","text":"ls"}"#);
    }
}
