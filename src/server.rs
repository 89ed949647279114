//! JSON HTTP server.
//!
//! Exposes post search for both audiences and the rule-based analysis
//! components. The audience is fixed by the route, never by the payload.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/aluno/posts/search?q=` | Student search (active posts only) |
//! | `GET`  | `/professor/posts/search?q=` | Author search (every status) |
//! | `POST` | `/ai/analyze` | Tags, summary, classification, reading time |
//! | `POST` | `/ai/moderate` | Denylist moderation verdict |
//! | `POST` | `/ai/respond` | Templated comment acknowledgment |
//! | `POST` | `/ai/generate` | Templated post draft from a title |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "invalid_query", "message": "invalid query: search text must not be empty" } }
//! ```
//!
//! Error codes: `invalid_query`, `invalid_input`, `empty_comment` (400),
//! `search_unavailable` (503), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the blog's browser
//! front end can call the API directly.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use edublog_core::analysis::moderator::ModerationVerdict;
use edublog_core::analysis::responder::AutoResponder;
use edublog_core::analysis::suggest::{ContentSuggester, Suggestion};
use edublog_core::analysis::{Analysis, AnalysisOrchestrator, ContentInput};
use edublog_core::models::{Audience, PostRecord};
use edublog_core::store::PostStore;
use edublog_core::Error;

use crate::config::Config;
use crate::db;
use crate::search::search_posts;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn PostStore>,
    pub orchestrator: Arc<AnalysisOrchestrator>,
    pub responder: Arc<AutoResponder>,
    pub suggester: Arc<ContentSuggester>,
}

impl AppState {
    /// Build state with the configured analysis tables and thread-RNG
    /// template selection.
    pub fn new(config: Config, store: Arc<dyn PostStore>) -> anyhow::Result<Self> {
        let tables = config.analysis.tables()?;
        Ok(Self {
            config: Arc::new(config),
            store,
            orchestrator: Arc::new(AnalysisOrchestrator::new(&tables)),
            responder: Arc::new(AutoResponder::default()),
            suggester: Arc::new(ContentSuggester::default()),
        })
    }
}

/// Build the router over `state`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/aluno/posts/search", get(handle_student_search))
        .route("/professor/posts/search", get(handle_author_search))
        .route("/ai/analyze", post(handle_analyze))
        .route("/ai/moderate", post(handle_moderate))
        .route("/ai/respond", post(handle_respond))
        .route("/ai/generate", post(handle_generate))
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server.
///
/// Opens (and if needed initializes) the SQLite database, binds to
/// `[server].bind`, and serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let pool = db::connect(config).await?;
    crate::migrate::apply(&pool).await?;
    let store: Arc<dyn PostStore> = Arc::new(SqliteStore::new(pool));

    let state = AppState::new(config.clone(), store)?;
    tracing::info!(
        version = %state.config.analysis.version.as_deref().unwrap_or("builtin"),
        "analysis tables loaded"
    );
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("edublog server listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        AppError {
            status,
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidInput(rejection.body_text()).into()
    }
}

fn invalid_input(message: &str) -> AppError {
    Error::InvalidInput(message.to_string()).into()
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /{aluno,professor}/posts/search ============

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn handle_student_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PostRecord>>, AppError> {
    run_route_search(&state, params, Audience::Student).await
}

async fn handle_author_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PostRecord>>, AppError> {
    run_route_search(&state, params, Audience::Author).await
}

async fn run_route_search(
    state: &AppState,
    params: SearchParams,
    audience: Audience,
) -> Result<Json<Vec<PostRecord>>, AppError> {
    let q = params.q.ok_or(Error::InvalidQuery)?;
    let results = search_posts(state.store.as_ref(), &q, audience, &state.config.search).await?;
    Ok(Json(results))
}

// ============ POST /ai/analyze ============

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    title: Option<String>,
    #[serde(alias = "content")]
    body: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    analysis: Analysis,
}

async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(req) = payload?;
    let input = ContentInput::new(req.title, req.body)?;
    let analysis = state.orchestrator.analyze(&input)?;
    Ok(Json(AnalyzeResponse { analysis }))
}

// ============ POST /ai/moderate ============

#[derive(Debug, Deserialize)]
struct ModerateRequest {
    content: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Serialize)]
struct ModerateResponse {
    moderation: ModerationVerdict,
}

async fn handle_moderate(
    State(state): State<AppState>,
    payload: Result<Json<ModerateRequest>, JsonRejection>,
) -> Result<Json<ModerateResponse>, AppError> {
    let Json(req) = payload?;
    let content = req.content.ok_or_else(|| invalid_input("content is required"))?;
    tracing::debug!(kind = req.kind.as_deref().unwrap_or("post"), "moderating content");
    let moderation = state.orchestrator.moderate(&content);
    Ok(Json(ModerateResponse { moderation }))
}

// ============ POST /ai/respond ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RespondRequest {
    comment_text: Option<String>,
    post_id: Option<String>,
}

#[derive(Serialize)]
struct RespondResponse {
    response: String,
}

async fn handle_respond(
    State(state): State<AppState>,
    payload: Result<Json<RespondRequest>, JsonRejection>,
) -> Result<Json<RespondResponse>, AppError> {
    let Json(req) = payload?;
    let comment = req
        .comment_text
        .ok_or_else(|| invalid_input("commentText is required"))?;
    let response = state.responder.respond(&comment)?;
    tracing::debug!(post_id = req.post_id.as_deref().unwrap_or("-"), "auto-response sent");
    Ok(Json(RespondResponse { response }))
}

// ============ POST /ai/generate ============

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    title: Option<String>,
}

async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Suggestion>, AppError> {
    let Json(req) = payload?;
    let title = req.title.ok_or_else(|| invalid_input("title is required"))?;
    let suggestion = state.suggester.suggest(&title)?;
    Ok(Json(suggestion))
}
