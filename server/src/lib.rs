use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use keytags::{AnalyseConfig, IdfLookup, TagExtractor, TextRanker, WeightedTerm, DEFAULT_ALLOW_POS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct TagsParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}

#[derive(Deserialize)]
pub struct TextRankParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
    /// Comma-separated POS tags; the default set when absent.
    pub pos: Option<String>,
    #[serde(default)]
    pub single: bool,
}

fn default_k() -> usize { 20 }

#[derive(Serialize)]
pub struct TagsResponse {
    pub query: String,
    pub took_s: f64,
    pub tags: Vec<WeightedTerm>,
}

#[derive(Deserialize)]
pub struct NewWord {
    pub word: String,
    pub frequency: f64,
    #[serde(default)]
    pub pos: String,
}

#[derive(Clone)]
pub struct AppState {
    pub tags: Arc<TagExtractor>,
    pub ranker: Arc<TextRanker>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn from_config(config: &AnalyseConfig, admin_token: Option<String>) -> Result<Self> {
        let ex = config.build()?;
        Ok(Self { tags: Arc::new(ex.tags), ranker: Arc::new(ex.ranker), admin_token })
    }
}

/// Loads dictionaries and wires routes. Reads `ADMIN_TOKEN` and
/// `CORS_ALLOW_ORIGIN` from the environment.
pub fn build_app(config: &AnalyseConfig) -> Result<Router> {
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let state = AppState::from_config(config, admin_token)?;
    Ok(router(state).layer(cors_from_env()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/tags", get(tags_handler))
        .route("/textrank", get(textrank_handler))
        .route("/idf/:term", get(idf_handler))
        .route("/dict/words", post(add_word))
        .route("/dict/words/:word", delete(delete_word))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_from_env() -> CorsLayer {
    // CORS_ALLOW_ORIGIN is comma-separated; anything unparsable falls back to Any
    let origins: Vec<HeaderValue> = std::env::var("CORS_ALLOW_ORIGIN")
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn tags_handler(State(state): State<AppState>, Query(params): Query<TagsParams>) -> Json<TagsResponse> {
    let start = std::time::Instant::now();
    let tags = state.tags.extract_tags(&params.q, params.k);
    Json(TagsResponse { query: params.q, took_s: start.elapsed().as_secs_f64(), tags })
}

pub async fn textrank_handler(State(state): State<AppState>, Query(params): Query<TextRankParams>) -> Json<TagsResponse> {
    let start = std::time::Instant::now();
    let tags = match params.pos.as_deref() {
        Some(list) if !list.trim().is_empty() => {
            let pos: Vec<&str> = list.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
            state.ranker.text_rank_with_pos(&params.q, params.k, pos.as_slice(), params.single)
        }
        _ => state.ranker.text_rank_with_pos(&params.q, params.k, DEFAULT_ALLOW_POS, params.single),
    };
    Json(TagsResponse { query: params.q, took_s: start.elapsed().as_secs_f64(), tags })
}

pub async fn idf_handler(State(state): State<AppState>, Path(term): Path<String>) -> Json<IdfLookup> {
    Json(state.tags.get_idf(&term))
}

// --- Dictionary edits (admin) ---
async fn add_word(State(state): State<AppState>, headers: HeaderMap, Json(new): Json<NewWord>) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    authorize(&state, &headers)?;
    if new.word.trim().is_empty() || !new.frequency.is_finite() || new.frequency < 0.0 {
        return Err((StatusCode::BAD_REQUEST, "word must be non-empty and frequency non-negative".into()));
    }
    state.ranker.add_word(&new.word, new.frequency, &new.pos);
    tracing::info!(word = %new.word, frequency = new.frequency, "word added");
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "word": new.word, "frequency": new.frequency, "pos": new.pos }))))
}

async fn delete_word(State(state): State<AppState>, headers: HeaderMap, Path(word): Path<String>) -> Result<StatusCode, (StatusCode, String)> {
    authorize(&state, &headers)?;
    state.ranker.delete_word(&word);
    tracing::info!(%word, "word deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
