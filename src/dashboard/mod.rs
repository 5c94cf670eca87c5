use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error};

use crate::catalog::{sorted_cities, sorted_teams};
use crate::predictor::{MatchState, PredictError, Predictor};

/// Outcome of the one-time model load at startup.
#[derive(Clone)]
pub enum ModelStatus {
    Ready(Predictor),
    /// Load failed; the form stays disabled until restart.
    Unavailable(String),
}

#[derive(Clone)]
pub struct AppState {
    pub model: ModelStatus,
    pub model_path: String,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub teams: Vec<&'static str>,
    pub cities: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub batting_team: String,
    pub bowling_team: String,
    pub batting_win_probability: f64,
    pub bowling_win_probability: f64,
    pub batting_percent: u32,
    pub bowling_percent: u32,
    pub lines: [String; 2],
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

/// Build the Axum router for the prediction form.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/options", get(options_handler))
        .route("/api/predict", post(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serve the form with dropdowns filled in. A failed model load replaces the
/// form with its diagnostic.
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let html = match &state.model {
        ModelStatus::Ready(_) => FORM_HTML
            .replace("{{TEAM_OPTIONS}}", &options_html(&sorted_teams()))
            .replace("{{CITY_OPTIONS}}", &options_html(&sorted_cities())),
        ModelStatus::Unavailable(reason) => {
            UNAVAILABLE_HTML.replace("{{REASON}}", &escape_html(reason))
        }
    };
    Html(html.replace("{{STYLE}}", PAGE_STYLE))
}

/// GET /api/options
async fn options_handler() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        teams: sorted_teams(),
        cities: sorted_cities(),
    })
}

/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (code, status) = match &state.model {
        ModelStatus::Ready(_) => (StatusCode::OK, "ok"),
        ModelStatus::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "model_unavailable"),
    };
    (
        code,
        Json(HealthResponse {
            status,
            model: state.model_path.clone(),
        }),
    )
}

/// POST /api/predict
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MatchState>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(match_state) = payload.map_err(|rejection| {
        debug!("Malformed predict request: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorBody {
                error: rejection.body_text(),
                kind: "malformed_request",
            }),
        )
    })?;

    let predictor = match &state.model {
        ModelStatus::Ready(p) => p,
        ModelStatus::Unavailable(reason) => {
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody {
                    error: reason.clone(),
                    kind: "model_unavailable",
                }),
            ))
        }
    };

    match predictor.predict(&match_state) {
        Ok(result) => Ok(Json(PredictResponse {
            batting_percent: result.batting_percent(),
            bowling_percent: result.bowling_percent(),
            lines: result.lines(),
            batting_team: result.batting_team,
            bowling_team: result.bowling_team,
            batting_win_probability: result.batting_win_probability,
            bowling_win_probability: result.bowling_win_probability,
        })),
        Err(PredictError::Invalid(e)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                error: e.to_string(),
                kind: e.kind(),
            }),
        )),
        Err(e @ PredictError::Oracle(_)) => {
            error!("Prediction failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: e.to_string(),
                    kind: "oracle_failure",
                }),
            ))
        }
    }
}

fn options_html(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| {
            let v = escape_html(v);
            format!(r#"<option value="{v}">{v}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const PAGE_STYLE: &str = r#"<style>
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
  header { padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  main { padding: 1.5rem 2rem; max-width: 760px; display: grid; gap: 1.5rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.2rem; display: grid; gap: 1rem; }
  .row { display: grid; gap: 1rem; }
  .row.two { grid-template-columns: 1fr 1fr; }
  .row.three { grid-template-columns: 1fr 1fr 1fr; }
  @media (max-width: 640px) { .row.two, .row.three { grid-template-columns: 1fr; } }
  label { display: grid; gap: .35rem; color: var(--muted); font-size: .8rem; text-transform: uppercase; letter-spacing: .06em; }
  select, input { background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .5rem .6rem; font-size: .95rem; }
  button { background: var(--accent); border: none; color: #fff; padding: .6rem 1.2rem; border-radius: 6px; cursor: pointer; font-weight: 600; justify-self: start; }
  .error { color: var(--red); font-size: .9rem; }
  .result h2 { font-size: 1.15rem; font-weight: 600; }
</style>"#;

/// Embedded single-page form (HTML + CSS + JS)
const FORM_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>IPL Win Probability Predictor</title>
{{STYLE}}
</head>
<body>
<header><h1>🏏 IPL Win Probability Predictor</h1></header>
<main>
  <form class="panel" id="predict-form">
    <div class="row two">
      <label>Select the Batting Team<select id="batting_team">{{TEAM_OPTIONS}}</select></label>
      <label>Select the Bowling Team<select id="bowling_team">{{TEAM_OPTIONS}}</select></label>
    </div>
    <label>Select Host City<select id="host_city">{{CITY_OPTIONS}}</select></label>
    <label>Target Score<input id="target" type="number" min="1" step="1" value="1"></label>
    <div class="row three">
      <label>Current Score<input id="current_score" type="number" min="0" step="1" value="0"></label>
      <label>Overs Completed<input id="overs_completed" type="number" min="0" max="20" step="0.1" value="0.0"></label>
      <label>Wickets Lost<input id="wickets_fallen" type="number" min="0" max="10" step="1" value="0"></label>
    </div>
    <button type="submit">Predict Probability</button>
    <div class="error" id="error"></div>
  </form>
  <div class="panel result" id="result" hidden>
    <h2 id="line-batting"></h2>
    <h2 id="line-bowling"></h2>
  </div>
</main>
<script>
const val = id => document.getElementById(id).value;

document.getElementById('predict-form').addEventListener('submit', async ev => {
  ev.preventDefault();
  const errEl = document.getElementById('error');
  const resultEl = document.getElementById('result');
  errEl.textContent = '';
  resultEl.hidden = true;

  const body = {
    batting_team: val('batting_team'),
    bowling_team: val('bowling_team'),
    host_city: val('host_city'),
    target: parseInt(val('target'), 10) || 0,
    current_score: parseInt(val('current_score'), 10) || 0,
    overs_completed: parseFloat(parseFloat(val('overs_completed') || '0').toFixed(1)),
    wickets_fallen: parseInt(val('wickets_fallen'), 10) || 0,
  };

  const r = await fetch('/api/predict', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  const data = await r.json().catch(() => ({ error: 'Unexpected response (' + r.status + ')' }));
  if (!r.ok) { errEl.textContent = data.error; return; }

  document.getElementById('line-batting').textContent = '🏏 ' + data.lines[0];
  document.getElementById('line-bowling').textContent = '🏏 ' + data.lines[1];
  resultEl.hidden = false;
});
</script>
</body>
</html>"#;

const UNAVAILABLE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>IPL Win Probability Predictor</title>
{{STYLE}}
</head>
<body>
<header><h1>🏏 IPL Win Probability Predictor</h1></header>
<main>
  <div class="panel"><p class="error" id="model-error">{{REASON}}</p></div>
</main>
</body>
</html>"#;
