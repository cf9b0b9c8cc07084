//! Command interpreter for the terminal overlay.
//!
//! A line is trimmed and split on whitespace. The first token, lowercased,
//! selects a row of [`COMMANDS`]; the remaining tokens are arguments. Every
//! handler is a plain function returning a [`Reply`]; nothing here performs
//! I/O: opening a link is requested through [`Reply::Open`] and carried out
//! by the session.

use chrono::{DateTime, Utc};

use crate::profile;

use super::files;

/// Result of interpreting one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print. May be empty, in which case nothing is printed.
    Text(String),
    /// Wipe the screen.
    Clear,
    /// Close the overlay.
    Exit,
    /// Open `url` in a new browsing context and confirm with `target`.
    Open { target: String, url: &'static str },
}

impl Reply {
    fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }
}

/// Parsed invocation handed to a handler.
pub struct Invocation<'a> {
    pub args: &'a [&'a str],
    pub now: DateTime<Utc>,
}

type Handler = fn(&Invocation<'_>) -> Reply;

/// One row of the command table.
pub struct CommandSpec {
    pub names: &'static [&'static str],
    /// Left column of `help`.
    pub usage: &'static str,
    /// Right column of `help`; `None` keeps the command out of the listing.
    pub summary: Option<&'static str>,
    handler: Handler,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        names: &["help"],
        usage: "help",
        summary: Some("show this message"),
        handler: help,
    },
    CommandSpec {
        names: &["whoami"],
        usage: "whoami",
        summary: Some("who are you talking to"),
        handler: whoami,
    },
    CommandSpec {
        names: &["ls"],
        usage: "ls",
        summary: Some("list files"),
        handler: ls,
    },
    CommandSpec {
        names: &["cat"],
        usage: "cat <file>",
        summary: Some("read a file"),
        handler: cat,
    },
    CommandSpec {
        names: &["pwd"],
        usage: "pwd",
        summary: Some("current directory"),
        handler: pwd,
    },
    CommandSpec {
        names: &["echo"],
        usage: "echo <text>",
        summary: Some("echo text back"),
        handler: echo,
    },
    CommandSpec {
        names: &["date"],
        usage: "date",
        summary: Some("current date and time"),
        handler: date,
    },
    CommandSpec {
        names: &["clear"],
        usage: "clear",
        summary: Some("clear the terminal"),
        handler: |_| Reply::Clear,
    },
    CommandSpec {
        names: &["exit"],
        usage: "exit",
        summary: Some("close the terminal"),
        handler: |_| Reply::Exit,
    },
    CommandSpec {
        names: &["open"],
        usage: "open <link>",
        summary: Some("open a link (github, twitter, email, instagram)"),
        handler: open,
    },
    // Easter eggs.
    CommandSpec {
        names: &["sudo"],
        usage: "sudo",
        summary: None,
        handler: |_| Reply::text("Nice try."),
    },
    CommandSpec {
        names: &["rm"],
        usage: "rm",
        summary: None,
        handler: |_| Reply::text("rm: cannot remove '/home/sagar': Permission denied"),
    },
    CommandSpec {
        names: &["git"],
        usage: "git",
        summary: None,
        handler: |_| Reply::text("On branch main\nnothing to commit, working tree clean"),
    },
    CommandSpec {
        names: &["vim", "nano", "emacs"],
        usage: "vim",
        summary: None,
        handler: |_| Reply::text("error: no time for that"),
    },
    CommandSpec {
        names: &["curl"],
        usage: "curl",
        summary: None,
        handler: |_| {
            Reply::text(r#"{"name":"Sagar Harsora","role":"Software Engineer","status":"available"}"#)
        },
    },
];

/// Column width of the usage field in `help`.
const USAGE_WIDTH: usize = 14;

fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.names.contains(&name))
}

/// Interpret one raw input line at time `now`.
pub fn run(input: &str, now: DateTime<Utc>) -> Reply {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some((first, args)) = parts.split_first() else {
        return Reply::text("");
    };
    let name = first.to_lowercase();

    match lookup(&name) {
        Some(spec) => (spec.handler)(&Invocation { args, now }),
        None => Reply::text(format!(
            "{name}: command not found\nType 'help' to see available commands."
        )),
    }
}

// ── Handlers ────────────────────────────────────────────────────────────────

fn help(_: &Invocation<'_>) -> Reply {
    let rows: Vec<String> = COMMANDS
        .iter()
        .filter_map(|c| c.summary.map(|s| format!("  {:<USAGE_WIDTH$}{s}", c.usage)))
        .collect();
    Reply::text(format!("Available commands:\n\n{}", rows.join("\n")))
}

fn whoami(_: &Invocation<'_>) -> Reply {
    Reply::text("sagar — engineer, sidequester, LLM builder.")
}

fn pwd(_: &Invocation<'_>) -> Reply {
    Reply::text(format!("/home/{}", profile::OWNER_HANDLE))
}

fn ls(_: &Invocation<'_>) -> Reply {
    Reply::text(files::names().collect::<Vec<_>>().join("  "))
}

fn cat(inv: &Invocation<'_>) -> Reply {
    let Some(name) = inv.args.first() else {
        return Reply::text("cat: missing operand\nUsage: cat <filename>");
    };
    match files::read(name) {
        Some(text) => Reply::text(text),
        None => Reply::text(format!("cat: {name}: No such file or directory")),
    }
}

fn echo(inv: &Invocation<'_>) -> Reply {
    Reply::text(inv.args.join(" "))
}

fn date(inv: &Invocation<'_>) -> Reply {
    let local = inv.now.with_timezone(&profile::ist_offset());
    Reply::text(local.format("%A, %-d %B %Y at %-I:%M %P").to_string())
}

fn open(inv: &Invocation<'_>) -> Reply {
    let arg = inv.args.first().copied().unwrap_or("");
    let target = arg.to_lowercase();
    match profile::open_target(&target) {
        Some(url) => Reply::Open { target, url },
        None => {
            let names: Vec<&str> = profile::OPEN_TARGETS.iter().map(|(n, _)| *n).collect();
            Reply::text(format!("open: unknown target '{arg}'\nTry: {}", names.join(", ")))
        }
    }
}
