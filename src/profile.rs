//! Static owner profile: who the site is about and where to reach them.
//!
//! Everything here is fixed at build time. The home page, the terminal's
//! `open` command and the page-level keyboard shortcuts all read from the
//! same tables so a link only ever lives in one place.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use rand_core::{OsRng, RngCore};

pub const OWNER_NAME: &str = "Sagar Harsora";
pub const OWNER_HANDLE: &str = "sagar";
pub const LOCATION: &str = "Mumbai";
pub const EMPLOYER: (&str, &str) = ("Vibe Engine", "https://vibe-engine.ai/");
pub const EMAIL: &str = "harsorasagar04@gmail.com";
pub const SPOTIFY_EMBED: &str =
    "https://open.spotify.com/embed/playlist/2a18vHH0uJsjNHgcUE2nVX?utm_source=generator";
pub const COPYRIGHT_YEAR: u16 = 2026;

pub const GREETINGS: &[&str] = &["Hey", "Hola", "Ciao", "नमस्ते", "Hei", "Salut", "やあ"];

/// India Standard Time, UTC+05:30, no DST.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// A labelled outbound link row on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRow {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub href: &'static str,
    /// Page shortcut key shown beside the row, if any.
    pub shortcut: Option<char>,
    /// Clicking copies the address instead of navigating.
    pub copyable: bool,
}

pub const WORK: &[LinkRow] = &[
    LinkRow {
        title: "Vibe Engine",
        subtitle: "Generative Engine Optimization",
        href: "https://vibe-engine.ai/",
        shortcut: None,
        copyable: false,
    },
    LinkRow {
        title: "Network Science",
        subtitle: "AI Productivity Suite",
        href: "https://networkscience.ai/",
        shortcut: None,
        copyable: false,
    },
    LinkRow {
        title: "Arcon",
        subtitle: "Securing Data, Systems & Identities",
        href: "https://arconnet.com/",
        shortcut: None,
        copyable: false,
    },
];

pub const DIGITAL: &[LinkRow] = &[
    LinkRow {
        title: "Email",
        subtitle: EMAIL,
        href: "mailto:harsorasagar04@gmail.com",
        shortcut: Some('E'),
        copyable: true,
    },
    LinkRow {
        title: "GitHub",
        subtitle: "sagarrh",
        href: "https://github.com/sagarrh",
        shortcut: Some('G'),
        copyable: false,
    },
    LinkRow {
        title: "Twitter",
        subtitle: "@SagarHarsora13",
        href: "https://twitter.com/SagarHarsora13",
        shortcut: Some('T'),
        copyable: false,
    },
    LinkRow {
        title: "Instagram",
        subtitle: "sagarr.h",
        href: "https://instagram.com/sagarr.h",
        shortcut: Some('I'),
        copyable: false,
    },
];

/// Named targets accepted by the terminal's `open` command, in help order.
pub const OPEN_TARGETS: &[(&str, &str)] = &[
    ("github", "https://github.com/sagarrh"),
    ("twitter", "https://twitter.com/SagarHarsora13"),
    ("instagram", "https://instagram.com/sagarr.h"),
    ("email", "mailto:harsorasagar04@gmail.com"),
];

/// Look up an `open` target by name (case-insensitive).
pub fn open_target(name: &str) -> Option<&'static str> {
    OPEN_TARGETS
        .iter()
        .find(|(target, _)| target.eq_ignore_ascii_case(name))
        .map(|(_, url)| *url)
}

// ── Keyboard shortcuts ──────────────────────────────────────────────────────

/// Key that toggles the terminal overlay.
pub const TERMINAL_TOGGLE_KEY: &str = "`";

/// Single-letter page shortcuts, active only while the overlay is closed.
pub const SHORTCUTS: &[(char, &str, &str)] = &[
    ('g', "GitHub", "https://github.com/sagarrh"),
    ('t', "Twitter", "https://twitter.com/SagarHarsora13"),
    ('i', "Instagram", "https://instagram.com/sagarr.h"),
    ('e', "Email", "mailto:harsorasagar04@gmail.com"),
];

/// What a page-level key press should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleTerminal,
    Open(&'static str),
    Ignore,
}

/// Map a key press on the home page to an action.
///
/// Keys typed into a text field never trigger anything. The backtick toggles
/// the overlay in both directions; letter shortcuts fire only while it is closed.
pub fn key_action(key: &str, terminal_open: bool, in_text_field: bool) -> KeyAction {
    if in_text_field {
        return KeyAction::Ignore;
    }
    if key == TERMINAL_TOGGLE_KEY {
        return KeyAction::ToggleTerminal;
    }
    if terminal_open {
        return KeyAction::Ignore;
    }
    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return KeyAction::Ignore;
    };
    let c = c.to_ascii_lowercase();
    SHORTCUTS
        .iter()
        .find(|(k, _, _)| *k == c)
        .map(|(_, _, url)| KeyAction::Open(*url))
        .unwrap_or(KeyAction::Ignore)
}

/// Keys the home page reacts to for one overlay state, each resolved through
/// [`key_action`]. Keys that resolve to `Ignore` are left out.
pub fn home_keymap(terminal_open: bool) -> Vec<(String, KeyAction)> {
    let keys = std::iter::once(TERMINAL_TOGGLE_KEY.to_string()).chain(
        SHORTCUTS
            .iter()
            .flat_map(|(k, _, _)| [k.to_string(), k.to_ascii_uppercase().to_string()]),
    );
    keys.filter_map(|key| match key_action(&key, terminal_open, false) {
        KeyAction::Ignore => None,
        action => Some((key, action)),
    })
    .collect()
}

// ── Greeting / clock ────────────────────────────────────────────────────────

/// Pick a random greeting for the bio line; the first one if the OS
/// entropy source is unavailable.
pub fn pick_greeting() -> &'static str {
    greeting_from(&mut OsRng)
}

fn greeting_from<R: RngCore>(rng: &mut R) -> &'static str {
    let mut buf = [0u8; 4];
    let idx = match rng.try_fill_bytes(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf) as usize % GREETINGS.len(),
        Err(e) => {
            tracing::warn!(error = %e, "entropy source failed; using default greeting");
            0
        }
    };
    GREETINGS[idx]
}

pub fn ist_offset() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Wall-clock time in Mumbai, e.g. `03:04 pm IST`.
pub fn ist_clock(now: DateTime<Utc>) -> String {
    format!("{} IST", now.with_timezone(&ist_offset()).format("%I:%M %P"))
}
