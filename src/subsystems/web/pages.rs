//! Server-rendered HTML pages.
//!
//! Every dynamic value passes through [`escape`] except post bodies, which
//! the markdown renderer has already made safe.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::profile::{self, KeyAction, LinkRow};
use crate::subsystems::reading::{FaviconChain, FaviconState, ReadingItem};
use crate::subsystems::writing::Post;

use super::SiteState;
use super::assets::{GLOBE_GLYPH, SCRIPT, STYLE};

pub(crate) const NOT_FOUND_TEXT: &str = "404 - Not Found :(";

/// Escape text for HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ── Layout ────────────────────────────────────────────────────────────────────

fn page_title(site_name: &str, title: Option<&str>) -> String {
    match title {
        Some(t) => format!("{t} | {site_name}"),
        None => site_name.to_string(),
    }
}

fn keymap_json(terminal_open: bool) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = profile::home_keymap(terminal_open)
        .into_iter()
        .filter_map(|(key, action)| match action {
            KeyAction::ToggleTerminal => Some((key, json!("toggle"))),
            KeyAction::Open(url) => Some((key, json!(url))),
            KeyAction::Ignore => None,
        })
        .collect();
    serde_json::Value::Object(map)
}

/// Data the inline script reads on load. Only the home page carries a keymap.
fn site_blob(with_keys: bool) -> String {
    let mut blob = json!({ "glyph": GLOBE_GLYPH });
    if with_keys {
        blob["keys"] = json!({ "closed": keymap_json(false), "open": keymap_json(true) });
    }
    // Keep `</script>` out of the inline block.
    blob.to_string().replace("</", "<\\/")
}

fn layout(site_name: &str, title: Option<&str>, main_class: &str, body: &str) -> String {
    render_layout(site_name, title, main_class, body, false)
}

fn render_layout(
    site_name: &str,
    title: Option<&str>,
    main_class: &str,
    body: &str,
    with_keys: bool,
) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <style>{STYLE}</style>
  <script>window.SITE = {blob};</script>
  <script>{SCRIPT}</script>
</head>
<body>
  <nav class="site">
    <a class="brand" href="/">{name}</a>
    <div class="links">
      <a href="/projects">Projects</a>
      <a href="/writing">Writing</a>
      <a href="/reading">Reading</a>
    </div>
  </nav>
  <main class="{main_class}">
{body}
  </main>
</body>
</html>
"#,
        title = escape(&page_title(site_name, title)),
        blob = site_blob(with_keys),
        name = escape(site_name),
    )
}

// ── Home ──────────────────────────────────────────────────────────────────────

fn table_row(row: &LinkRow) -> String {
    let copy = if row.copyable {
        let address = row.href.strip_prefix("mailto:").unwrap_or(row.href);
        format!(r#" data-copy="{}""#, escape(address))
    } else {
        r#" target="_blank""#.to_string()
    };
    let shortcut = row
        .shortcut
        .map(|k| format!("<kbd>{k}</kbd>"))
        .unwrap_or_default();
    format!(
        r#"      <a class="table-row" href="{href}" rel="noopener noreferrer"{copy}><span class="title">{title}</span><span class="rule"></span><span class="subtitle">{subtitle}</span>{shortcut}</a>
"#,
        href = escape(row.href),
        title = escape(row.title),
        subtitle = escape(row.subtitle),
    )
}

fn terminal_overlay() -> String {
    format!(
        r#"<div id="terminal" hidden>
  <div class="terminal-window" role="dialog" aria-label="terminal">
    <div class="terminal-bar"><span>{handle}@portfolio</span><button type="button" data-terminal-close aria-label="close">&times;</button></div>
    <pre id="terminal-log"></pre>
    <form id="terminal-form"><span>$</span><input id="terminal-input" autocomplete="off" spellcheck="false" /></form>
  </div>
</div>"#,
        handle = escape(profile::OWNER_HANDLE),
    )
}

pub(crate) fn home_page(site_name: &str, greeting: &str, clock: &str) -> String {
    let (employer, employer_url) = profile::EMPLOYER;
    let mut body = String::new();

    body.push_str(&format!(
        r#"<header>
  <h1>{owner}</h1>
  <p class="label">{location} · <span id="clock">{clock}</span></p>
</header>
<section>
  <p class="bio">{greeting}, I'm Sagar — Software Engineer at <a href="{employer_url}" target="_blank" rel="noopener noreferrer">{employer}</a>. I enjoy sidequesting and building things. <a href="mailto:{email}">Reach out</a> if you want to chat.:-/</p>
</section>
"#,
        owner = escape(profile::OWNER_NAME),
        location = escape(profile::LOCATION),
        clock = escape(clock),
        greeting = escape(greeting),
        employer_url = escape(employer_url),
        employer = escape(employer),
        email = escape(profile::EMAIL),
    ));

    for (label, rows) in [("Work", profile::WORK), ("Digital", profile::DIGITAL)] {
        body.push_str(&format!("<section>\n  <p class=\"label\">{label}</p>\n"));
        for row in rows {
            body.push_str(&table_row(row));
        }
        body.push_str("</section>\n");
    }

    body.push_str(&format!(
        r#"<section>
  <p class="label">Music</p>
  <iframe src="{src}" width="100%" height="380" allowfullscreen allow="autoplay; clipboard-write; encrypted-media; fullscreen; picture-in-picture" style="display:block;border:0"></iframe>
</section>
"#,
        src = escape(profile::SPOTIFY_EMBED),
    ));

    body.push_str("<footer>\n  <div class=\"hints\">\n");
    for (key, label, _) in profile::SHORTCUTS {
        body.push_str(&format!(
            "    <span class=\"hint\" data-hint=\"{key}\"><kbd>{upper}</kbd> {label}</span>\n",
            upper = key.to_ascii_uppercase(),
        ));
    }
    body.push_str(&format!(
        "    <span class=\"hint\"><kbd>{}</kbd> terminal</span>\n  </div>\n",
        escape(profile::TERMINAL_TOGGLE_KEY)
    ));
    body.push_str(&format!(
        "  <p class=\"label\">&copy; {} {}.</p>\n</footer>\n",
        profile::COPYRIGHT_YEAR,
        escape(profile::OWNER_NAME)
    ));
    body.push_str(&terminal_overlay());

    render_layout(site_name, None, "narrow", &body, true)
}

// ── Listings ──────────────────────────────────────────────────────────────────

fn list_row(href: &str, name: &str, tagline: &str, date: &str) -> String {
    format!(
        "<a class=\"list-row\" href=\"{}\"><strong>{}</strong><span class=\"tagline\">{}</span><span>{}</span></a>\n",
        escape(href),
        escape(name),
        escape(tagline),
        escape(date),
    )
}

fn projects_page(state: &SiteState) -> String {
    let mut body = String::from(
        "<p class=\"intro\">My favorite hobby is doing side projects, ranging from writing my own \
         textbook to making my own productivity tools to browsing the web autonomously.</p>\n",
    );
    if state.config.projects.is_empty() {
        body.push_str("<p class=\"muted\">Coming soon...</p>\n");
    }
    for p in &state.config.projects {
        body.push_str(&list_row(&p.link, &p.name, &p.tagline, &p.date));
    }
    layout(&state.config.site_name, Some("Projects"), "", &body)
}

fn writing_page(state: &SiteState) -> String {
    let mut body = String::from(
        "<p class=\"intro\">Thoughts on tech. Everything here is written by me without AI assistance!</p>\n",
    );
    let entries = state.writing.entries();
    if entries.is_empty() {
        body.push_str("<p class=\"muted\">Coming soon...</p>\n");
    }
    for e in &entries {
        body.push_str(&list_row(&format!("/writing/{}", e.slug), &e.title, &e.tagline, &e.date));
    }
    layout(&state.config.site_name, Some("Writing"), "", &body)
}

fn post_page(site_name: &str, post: &Post) -> String {
    let mut body = String::from(
        "<div class=\"post-header\">\n  <a href=\"/writing\" class=\"muted\" data-back>&larr; Back</a>\n",
    );
    body.push_str(&format!("  <h1>{}</h1>\n", escape(post.page_title())));
    if let Some(date) = &post.date {
        body.push_str(&format!("  <p class=\"mono muted\">{}</p>\n", escape(date)));
    }
    if let Some(tagline) = &post.tagline {
        body.push_str(&format!("  <p class=\"intro\">{}</p>\n", escape(tagline)));
    }
    body.push_str("</div>\n<article class=\"post-body\">\n");
    body.push_str(&post.body_html);
    body.push_str("\n</article>\n");

    let title = post.title.as_deref().unwrap_or("Writing");
    layout(site_name, Some(title), "narrow", &body)
}

/// The image starts at the chain's first state; `faviconFallback` steps
/// through the rest in order and swaps in the glyph once they run out.
fn favicon(item: &ReadingItem) -> String {
    let mut chain = FaviconChain::new(item.favicons.clone());
    let first = match chain.current() {
        FaviconState::Image(url) => url.to_string(),
        FaviconState::Glyph => return GLOBE_GLYPH.to_string(),
    };
    let mut fallbacks = Vec::new();
    while let FaviconState::Image(url) = chain.on_error() {
        fallbacks.push(url.to_string());
    }
    format!(
        r#"<img class="favicon" src="{}" alt="" data-fallbacks="{}" onerror="faviconFallback(this)" />"#,
        escape(&first),
        escape(&fallbacks.join(" ")),
    )
}

fn reading_page(site_name: &str, items: &[ReadingItem]) -> String {
    let mut body =
        String::from("<p class=\"intro\">Articles, papers, and blog posts I&#39;ve been reading.</p>\n");
    if items.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    }
    for item in items {
        body.push_str(&format!(
            r#"<a class="list-row reading-row" href="{link}" target="_blank" rel="noopener noreferrer"><span class="title">{icon}<strong>{title}</strong></span><span class="meta"><span>{base}</span><span>{date}</span></span></a>
"#,
            link = escape(&item.link),
            icon = favicon(item),
            title = escape(&item.title),
            base = escape(&item.base_domain),
            date = escape(&item.date),
        ));
    }
    layout(site_name, Some("Reading"), "", &body)
}

pub(crate) fn not_found_page(site_name: &str) -> String {
    let body = format!(
        "<div class=\"not-found\"><p>{NOT_FOUND_TEXT}<br />The page you are looking for does not exist. <a href=\"/\">Home</a></p></div>\n"
    );
    layout(site_name, Some("Not Found"), "", &body)
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /
pub(super) async fn home(State(state): State<SiteState>) -> Html<String> {
    let clock = profile::ist_clock(Utc::now());
    Html(home_page(&state.config.site_name, profile::pick_greeting(), &clock))
}

/// GET /projects
pub(super) async fn projects(State(state): State<SiteState>) -> Html<String> {
    Html(projects_page(&state))
}

/// GET /writing
pub(super) async fn writing_index(State(state): State<SiteState>) -> Html<String> {
    Html(writing_page(&state))
}

/// GET /writing/{slug}
pub(super) async fn writing_post(
    State(state): State<SiteState>,
    Path(slug): Path<String>,
) -> Response {
    match state.writing.post(&slug) {
        Ok(post) => Html(post_page(&state.config.site_name, post)).into_response(),
        Err(e) => {
            debug!(%slug, error = %e, "writing post not found");
            not_found_response(&state)
        }
    }
}

/// GET /reading
pub(super) async fn reading(State(state): State<SiteState>) -> Html<String> {
    let items = state.reading.items(state.config.reading.timezone).await;
    Html(reading_page(&state.config.site_name, &items))
}

/// Any unmatched path.
pub(super) async fn fallback(State(state): State<SiteState>) -> Response {
    not_found_response(&state)
}

fn not_found_response(state: &SiteState) -> Response {
    (StatusCode::NOT_FOUND, Html(not_found_page(&state.config.site_name))).into_response()
}
