use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::monitor::{ActionDispatcher, ActionOutcome, ControlAction, Decision, Monitor};

#[derive(Clone)]
pub struct AppState {
    pub monitor: Monitor,
    pub dispatcher: ActionDispatcher,
}

/// Build the Axum router for the console.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/matches", get(board_handler))
        .route("/api/matches/:id/finish", post(finish_handler))
        .route("/api/matches/:id/reset", post(reset_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Carried in action POST bodies; the browser's confirmation prompt sets it.
/// The gate is enforced here too so an unconfirmed request never reaches
/// the backend.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub outcome: &'static str,
}

async fn index_handler() -> impl IntoResponse {
    Html(CONSOLE_HTML)
}

/// GET /api/matches — current render model
async fn board_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.monitor.board())
}

/// POST /api/matches/:id/finish
async fn finish_handler(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<i64>,
    Json(req): Json<ActionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    run_action(&state, ControlAction::ForceFinish { match_id }, req).await
}

/// POST /api/matches/:id/reset
async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<i64>,
    Json(req): Json<ActionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    run_action(&state, ControlAction::Reset { match_id }, req).await
}

async fn run_action(
    state: &AppState,
    action: ControlAction,
    req: ActionRequest,
) -> Result<Json<ActionResponse>, (StatusCode, String)> {
    let decision = if req.confirmed {
        Decision::Accepted
    } else {
        Decision::Rejected
    };
    match state.dispatcher.dispatch(action, decision).await {
        Ok(ActionOutcome::Completed) => Ok(Json(ActionResponse {
            outcome: "completed",
        })),
        Ok(ActionOutcome::Cancelled) => Ok(Json(ActionResponse {
            outcome: "cancelled",
        })),
        Err(e) => Err((StatusCode::BAD_GATEWAY, e.to_string())),
    }
}

/// Embedded single-file console page (HTML + CSS + JS)
const CONSOLE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Live Match Monitoring</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  .status-dot { width: 10px; height: 10px; border-radius: 50%; background: var(--green); display: inline-block; animation: pulse 1.5s infinite; }
  @keyframes pulse { 0%,100% { opacity: 1; } 50% { opacity: .3; } }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; }
  .banner { background: rgba(255,79,106,.12); border: 1px solid var(--red); color: var(--red); border-radius: 8px; padding: .8rem 1.2rem; display: none; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .65rem 1rem; font-size: .88rem; border-bottom: 1px solid #1e2130; }
  tr:last-child td { border-bottom: none; }
  .pill { display: inline-block; padding: .15rem .55rem; border-radius: 20px; font-size: .75rem; font-weight: 600; }
  .pill.live { background: rgba(255,79,106,.15); color: var(--red); }
  .pill.finished { background: rgba(136,136,170,.15); color: var(--muted); }
  .score { text-align: center; font-weight: 700; }
  .team { font-weight: 600; }
  .empty { color: var(--muted); text-align: center; padding: 2rem; font-size: .9rem; }
  .action-btn { background: none; border: 1px solid var(--border); color: var(--muted); padding: .25rem .7rem; border-radius: 6px; cursor: pointer; font-size: .78rem; margin-right: .4rem; }
  .action-btn:hover { border-color: var(--accent); color: var(--accent); }
  .action-btn.danger:hover { border-color: var(--red); color: var(--red); }
</style>
</head>
<body>
<header>
  <span class="status-dot"></span>
  <h1>Live Match Monitoring</h1>
  <span style="margin-left:auto;color:var(--muted);font-size:.8rem;" id="last-updated"></span>
</header>

<main>
  <div class="banner" id="error-banner"></div>

  <div class="panel">
    <div class="panel-header">Live Matches (<span id="live-count">0</span>)</div>
    <table>
      <thead><tr><th>ID</th><th>Start Time</th><th>Home</th><th>Score</th><th>Away</th><th>Minute</th><th>Status</th><th>Actions</th></tr></thead>
      <tbody id="live-tbody"><tr><td colspan="8" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>

  <div class="panel">
    <div class="panel-header">Finished Matches (<span id="finished-count">0</span>)</div>
    <table>
      <thead><tr><th>ID</th><th>Start Time</th><th>Home</th><th>Score</th><th>Away</th><th>Minute</th><th>Status</th><th>Actions</th></tr></thead>
      <tbody id="finished-tbody"><tr><td colspan="8" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>
</main>

<script>
const PROMPTS = {
  finish: id => `Force-finish match ${id}? The simulation ends immediately and cannot be resumed.`,
  reset: id => `Reset match ${id}? The simulation restarts from kickoff and current progress is lost.`,
};

function row(m, live) {
  const actions = live
    ? `<button class="action-btn danger" onclick="sendAction(${m.matchId},'finish')">Force finish</button>` +
      `<button class="action-btn" onclick="sendAction(${m.matchId},'reset')">Reset</button>`
    : `<button class="action-btn" onclick="sendAction(${m.matchId},'reset')">Reset</button>`;
  return `<tr>
    <td>${m.matchId}</td>
    <td>${new Date(m.startTime).toLocaleString()}</td>
    <td class="team">${m.homeTeamName}</td>
    <td class="score">${m.homeScore} – ${m.awayScore}</td>
    <td class="team">${m.awayTeamName}</td>
    <td>${m.currentMinute}'</td>
    <td><span class="pill ${live ? 'live' : 'finished'}">${live ? 'LIVE' : 'Finished'}</span></td>
    <td>${actions}</td>
  </tr>`;
}

function fillTable(tbodyId, matches, live, emptyText) {
  const tbody = document.getElementById(tbodyId);
  if (!matches.length) {
    tbody.innerHTML = `<tr><td colspan="8" class="empty">${emptyText}</td></tr>`;
    return;
  }
  tbody.innerHTML = matches.map(m => row(m, live)).join('');
}

async function loadBoard() {
  let board;
  try {
    const r = await fetch('/api/matches');
    if (!r.ok) return;
    board = await r.json();
  } catch (e) {
    return; // console itself unreachable; keep showing what we have
  }

  const banner = document.getElementById('error-banner');
  if (board.error) {
    banner.textContent = board.error;
    banner.style.display = 'block';
  } else {
    banner.style.display = 'none';
  }

  if (board.loading) return; // keep the initial Loading… placeholders

  document.getElementById('live-count').textContent = board.live.length;
  document.getElementById('finished-count').textContent = board.finished.length;
  fillTable('live-tbody', board.live, true, 'No matches found.');
  fillTable('finished-tbody', board.finished, false, 'No matches found.');
  document.getElementById('last-updated').textContent = 'Updated ' + new Date().toLocaleTimeString();
}

async function sendAction(id, kind) {
  if (!confirm(PROMPTS[kind](id))) return;
  try {
    const r = await fetch(`/api/matches/${id}/${kind}`, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ confirmed: true }),
    });
    if (!r.ok) {
      alert(`Action failed: ${await r.text()}`);
      return;
    }
    await loadBoard(); // server already resynced with the backend
  } catch (e) {
    alert(`Action failed: ${e}`);
  }
}

loadBoard();
setInterval(loadBoard, 5000);
</script>
</body>
</html>"#;
