//! Integration tests for the HTTP surface, driven through the router with
//! `tower::ServiceExt::oneshot`.
//!
//! Run with:
//!   cargo test --test site_routes

use std::fs;
use std::path::Path;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use sagarh_portfolio::config::Config;
use sagarh_portfolio::subsystems::reading::{FixedStore, LinkRecord, LinkStore, ReadingList};
use sagarh_portfolio::subsystems::web::{SiteState, build_router};
use sagarh_portfolio::subsystems::writing::WritingStore;

// ── helpers ──────────────────────────────────────────────────────────────────

fn records() -> Vec<LinkRecord> {
    vec![
        LinkRecord::new("https://arxiv.org/pdf/1706.03762v7", "2025-03-01T12:00:00Z", "Attention"),
        LinkRecord::new("https://www.example.com/post", "2025-02-01T12:00:00Z", "Example post"),
        LinkRecord::new("https://blog.rust-lang.org/x", "2025-01-01T12:00:00Z", "Rust blog"),
    ]
}

fn write_posts(dir: &Path) {
    fs::write(
        dir.join("hello-world.mdx"),
        "---\ntitle: Hello World\ndate: 2025-06-01\ntagline: first post\n---\n# Hi\n\nSome **bold** text.\n",
    )
    .expect("write post");
}

fn app_with(dir: &Path, store: FixedStore) -> Router {
    let config = Config::test_default(dir);
    let writing = WritingStore::open(dir).expect("open writing");
    let reading = ReadingList::new(LinkStore::Fixed(store));
    build_router(SiteState::new(config, reading, writing))
}

fn app() -> (TempDir, Router) {
    let tmp = TempDir::new().expect("tempdir");
    write_posts(tmp.path());
    let router = app_with(tmp.path(), FixedStore::new(records()));
    (tmp, router)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, String) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).expect("request")).await.expect("response");
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Method::GET, uri, None).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, text) = send(app, Method::POST, uri, Some(body)).await;
    (status, serde_json::from_str(&text).unwrap_or(Value::Null))
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack.find(needle).unwrap_or_else(|| panic!("{needle:?} not in page"))
}

// ── pages ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn home_page_renders() {
    let (_tmp, app) = app();
    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>test</title>"));
    assert!(html.contains("https://github.com/sagarrh"));
    assert!(html.contains(" IST</span>"));
    assert!(html.contains(r#"id="terminal""#));
}

#[tokio::test]
async fn keymap_is_emitted_only_on_home() {
    let (_tmp, app) = app();
    let (_, home) = get(&app, "/").await;
    assert!(home.contains(r#""keys":"#));
    assert!(home.contains(r#""g":"https://github.com/sagarrh""#));

    for uri in ["/reading", "/projects", "/writing", "/writing/hello-world", "/nope"] {
        let (_, html) = get(&app, uri).await;
        assert!(!html.contains(r#""keys":"#), "{uri} carries a keymap");
        assert!(!html.contains(r#""g":"https://github.com/sagarrh""#), "{uri} carries shortcuts");
    }
}

#[tokio::test]
async fn unknown_path_is_not_found_page() {
    let (_tmp, app) = app();
    let (status, html) = get(&app, "/does/not/exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("404 - Not Found :("));
}

#[tokio::test]
async fn favicon_is_no_content() {
    let (_tmp, app) = app();
    let (status, _) = get(&app, "/favicon.ico").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn projects_page_without_projects() {
    let (_tmp, app) = app();
    let (status, html) = get(&app, "/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Projects | test</title>"));
    assert!(html.contains("Coming soon..."));
}

// ── writing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn writing_index_lists_posts() {
    let (_tmp, app) = app();
    let (status, html) = get(&app, "/writing").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"href="/writing/hello-world""#));
    assert!(html.contains("first post"));
}

#[tokio::test]
async fn writing_index_empty_says_coming_soon() {
    let tmp = TempDir::new().expect("tempdir");
    let app = app_with(&tmp.path().join("missing"), FixedStore::new(Vec::new()));
    let (_, html) = get(&app, "/writing").await;
    assert!(html.contains("Coming soon..."));
}

#[tokio::test]
async fn writing_post_renders_markdown() {
    let (_tmp, app) = app();
    let (status, html) = get(&app, "/writing/hello-world").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Hello World | test</title>"));
    assert!(html.contains("<strong>bold</strong>"));
    assert!(html.contains("2025-06-01"));
}

#[tokio::test]
async fn missing_post_is_not_found_page() {
    let (_tmp, app) = app();
    let (status, html) = get(&app, "/writing/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("404 - Not Found :("));

    let (status, _) = get(&app, "/writing/..%2Fhello-world").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── reading ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reading_page_keeps_fetch_order() {
    let (_tmp, app) = app();
    let (status, html) = get(&app, "/reading").await;
    assert_eq!(status, StatusCode::OK);
    let a = position(&html, "Attention");
    let b = position(&html, "Example post");
    let c = position(&html, "Rust blog");
    assert!(a < b && b < c);
    assert!(html.contains("https://arxiv.org/abs/1706.03762"));
    assert!(html.contains("rust-lang.org"));
}

#[tokio::test]
async fn reading_page_favicons_walk_candidates() {
    let (_tmp, app) = app();
    let (_, html) = get(&app, "/reading").await;
    let s2 = "https://www.google.com/s2/favicons?domain=";
    assert!(html.contains(&format!(r#"src="{s2}rust-lang.org&amp;sz=128""#)));
    assert!(html.contains(&format!(
        r#"data-fallbacks="{s2}www.rust-lang.org&amp;sz=128 {s2}blog.rust-lang.org&amp;sz=128""#
    )));
    assert!(html.contains(r#"onerror="faviconFallback(this)""#));
}

#[tokio::test]
async fn reading_failure_renders_empty() {
    let tmp = TempDir::new().expect("tempdir");
    let app = app_with(tmp.path(), FixedStore::failing("network down"));
    let (status, html) = get(&app, "/reading").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No entries found."));
}

#[tokio::test]
async fn reading_api_returns_items_and_caches() {
    let (_tmp, app) = app();
    let (status, body) = get(&app, "/api/reading").await;
    assert_eq!(status, StatusCode::OK);
    let items: Value = serde_json::from_str(&body).expect("json");
    let titles: Vec<&str> = items
        .as_array()
        .expect("array")
        .iter()
        .map(|i| i["title"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(titles, ["Attention", "Example post", "Rust blog"]);
    assert_eq!(items[1]["base_domain"], "example.com");
    assert_eq!(items[0]["favicons"].as_array().map(Vec::len), Some(3));

    get(&app, "/reading").await;
    let (_, health) = get(&app, "/api/health").await;
    let health: Value = serde_json::from_str(&health).expect("json");
    assert_eq!(health["status"], "ok");
    assert_eq!(health["reading"]["fetches"], 1);
    assert_eq!(health["reading"]["state"], "loaded");
    assert_eq!(health["writing"]["posts"], 1);
}

// ── terminal ─────────────────────────────────────────────────────────────────

fn output_texts(snapshot: &Value) -> Vec<String> {
    snapshot["lines"]
        .as_array()
        .map(|lines| {
            lines
                .iter()
                .filter(|l| l["kind"] == "output")
                .filter_map(|l| l["text"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn terminal_session_flow() {
    let (_tmp, app) = app();

    let (status, snap) = post_json(&app, "/api/terminal/sessions", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = snap["id"].as_str().expect("id").to_string();
    assert_eq!(snap["closed"], false);
    assert!(output_texts(&snap).iter().any(|t| t.starts_with("Welcome.")));

    let base = format!("/api/terminal/sessions/{id}");
    let input = format!("{base}/input");
    let history = format!("{base}/history");

    let (status, snap) = post_json(&app, &input, json!({ "line": "pwd" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(output_texts(&snap).last().map(String::as_str), Some("/home/sagar"));
    assert_eq!(snap["open"], json!([]));

    let (_, snap) = post_json(&app, &input, json!({ "line": "open github" })).await;
    assert_eq!(snap["open"], json!(["https://github.com/sagarrh"]));
    assert_eq!(output_texts(&snap).last().map(String::as_str), Some("Opening github..."));

    let (_, snap) = post_json(&app, &input, json!({ "line": "open nonsense" })).await;
    assert_eq!(snap["open"], json!([]));
    assert!(output_texts(&snap).last().is_some_and(|t| t.contains("unknown target 'nonsense'")));

    // History is most recent first and clamps at the oldest entry.
    let mut seen = Vec::new();
    for _ in 0..4 {
        let (_, r) = post_json(&app, &history, json!({ "direction": "previous" })).await;
        seen.push(r["input"].as_str().unwrap_or_default().to_string());
    }
    assert_eq!(seen, ["open nonsense", "open github", "pwd", "pwd"]);

    let (_, r) = post_json(&app, &history, json!({ "direction": "next" })).await;
    assert_eq!(r["input"], "open github");

    let (status, snap) = post_json(&app, &format!("{base}/clear"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["lines"], json!([]));

    let (_, snap) = post_json(&app, &input, json!({ "line": "exit" })).await;
    assert_eq!(snap["closed"], true);

    let (status, err) = post_json(&app, &input, json!({ "line": "pwd" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "not_found");
}

#[tokio::test]
async fn clear_command_empties_log() {
    let (_tmp, app) = app();
    let (_, snap) = post_json(&app, "/api/terminal/sessions", json!({})).await;
    let id = snap["id"].as_str().expect("id").to_string();

    let input = format!("/api/terminal/sessions/{id}/input");
    let (_, snap) = post_json(&app, &input, json!({ "line": "clear" })).await;
    assert_eq!(snap["lines"], json!([]));
    assert_eq!(snap["closed"], false);
}

#[tokio::test]
async fn unknown_or_malformed_session_is_404() {
    let (_tmp, app) = app();
    let (status, err) = post_json(
        &app,
        "/api/terminal/sessions/6a2f41a3-c54c-4b2e-8f1a-3c7b5f2e9d10/input",
        json!({ "line": "ls" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "not_found");

    let malformed = "/api/terminal/sessions/not-a-uuid/history";
    let (status, _) = post_json(&app, malformed, json!({ "direction": "next" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_closes_session() {
    let (_tmp, app) = app();
    let (_, snap) = post_json(&app, "/api/terminal/sessions", json!({})).await;
    let id = snap["id"].as_str().expect("id").to_string();
    let uri = format!("/api/terminal/sessions/{id}");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
