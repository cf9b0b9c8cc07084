//! Handlers for `/api/*` routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::subsystems::reading::LoadState;
use crate::subsystems::terminal::{CollectedLinks, Line, SubmitOutcome, TerminalSession};

use super::SiteState;

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct InputRequest {
    line: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum Direction {
    Previous,
    Next,
}

#[derive(Deserialize)]
pub(super) struct HistoryRequest {
    direction: Direction,
}

/// Everything the overlay needs to redraw after a request.
#[derive(Serialize)]
struct Snapshot {
    id: Uuid,
    lines: Vec<Line>,
    closed: bool,
    /// URLs the browser should open in new tabs.
    open: Vec<String>,
}

impl Snapshot {
    fn of(id: Uuid, session: &TerminalSession, open: Vec<String>) -> Self {
        Self { id, lines: session.lines().to_vec(), closed: session.is_closed(), open }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn json_error(code: &str, msg: impl std::fmt::Display) -> Json<serde_json::Value> {
    Json(json!({ "error": code, "message": format!("{msg}") }))
}

fn unknown_session() -> Response {
    (StatusCode::NOT_FOUND, json_error("not_found", "unknown terminal session")).into_response()
}

/// Malformed ids are treated like unknown ones.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

fn respond<T: Serialize>(result: Result<Option<T>, AppError>) -> Response {
    match result {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => unknown_session(),
        Err(e) => {
            warn!(error = %e, "terminal request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, json_error("internal", e)).into_response()
        }
    }
}

fn load_state_label(state: LoadState) -> &'static str {
    match state {
        LoadState::Idle => "idle",
        LoadState::Loading => "loading",
        LoadState::Loaded(_) => "loaded",
        LoadState::Empty => "empty",
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /api/health
pub(super) async fn health(State(state): State<SiteState>) -> Json<serde_json::Value> {
    let reading = state.reading.state();
    let cached = match reading {
        LoadState::Loaded(n) => n,
        _ => 0,
    };
    Json(json!({
        "status": "ok",
        "site": state.config.site_name,
        "reading": {
            "store": state.reading.store_kind(),
            "state": load_state_label(reading),
            "cached": cached,
            "fetches": state.reading.fetch_count(),
        },
        "writing": { "posts": state.writing.len() },
        "terminal": { "sessions": state.terminals.len() },
    }))
}

/// GET /api/reading: display-ready items, newest first.
pub(super) async fn reading(State(state): State<SiteState>) -> Response {
    let items = state.reading.items(state.config.reading.timezone).await;
    (StatusCode::OK, Json(items)).into_response()
}

/// POST /api/terminal/sessions
pub(super) async fn terminal_open(State(state): State<SiteState>) -> Response {
    match state.terminals.open() {
        Ok((id, session)) => {
            debug!(session_id = %id, "terminal session opened");
            (StatusCode::CREATED, Json(Snapshot::of(id, &session, Vec::new()))).into_response()
        }
        Err(e) => respond::<Snapshot>(Err(e)),
    }
}

/// POST /api/terminal/sessions/{id}/input
pub(super) async fn terminal_input(
    State(state): State<SiteState>,
    Path(raw_id): Path<String>,
    Json(req): Json<InputRequest>,
) -> Response {
    let Some(id) = parse_id(&raw_id) else {
        return unknown_session();
    };
    respond(state.terminals.with(&id, |session| {
        let mut opener = CollectedLinks::default();
        let outcome = session.submit(&req.line, &mut opener);
        if outcome == SubmitOutcome::Closed {
            debug!(session_id = %id, "terminal exited");
        }
        Snapshot::of(id, session, opener.0)
    }))
}

/// POST /api/terminal/sessions/{id}/history
pub(super) async fn terminal_history(
    State(state): State<SiteState>,
    Path(raw_id): Path<String>,
    Json(req): Json<HistoryRequest>,
) -> Response {
    let Some(id) = parse_id(&raw_id) else {
        return unknown_session();
    };
    respond(state.terminals.with(&id, |session| {
        let input = match req.direction {
            Direction::Previous => session.history_previous(),
            Direction::Next => session.history_next(),
        };
        json!({ "input": input })
    }))
}

/// POST /api/terminal/sessions/{id}/clear: Ctrl-L.
pub(super) async fn terminal_clear(
    State(state): State<SiteState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&raw_id) else {
        return unknown_session();
    };
    respond(state.terminals.with(&id, |session| {
        session.clear_screen();
        Snapshot::of(id, session, Vec::new())
    }))
}

/// DELETE /api/terminal/sessions/{id}: overlay dismissed.
pub(super) async fn terminal_close(
    State(state): State<SiteState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&raw_id) else {
        return unknown_session();
    };
    match state.terminals.remove(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => unknown_session(),
        Err(e) => respond::<()>(Err(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_are_unknown() {
        assert!(parse_id("not-a-uuid").is_none());
        assert!(parse_id("6a2f41a3-c54c-4b2e-8f1a-3c7b5f2e9d10").is_some());
    }

    #[test]
    fn direction_parses_lowercase() {
        let req: HistoryRequest = serde_json::from_str(r#"{"direction":"previous"}"#).unwrap();
        assert!(matches!(req.direction, Direction::Previous));
        assert!(serde_json::from_str::<HistoryRequest>(r#"{"direction":"up"}"#).is_err());
    }

    #[test]
    fn load_state_labels() {
        assert_eq!(load_state_label(LoadState::Loaded(3)), "loaded");
        assert_eq!(load_state_label(LoadState::Idle), "idle");
    }
}
