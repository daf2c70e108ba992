//! HTTP server: router, handlers, and the JSON error envelope

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use eyre::Result;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::config::Config;
use crate::llm::{LlmClient, LlmError, create_client};
use crate::plan::{ActionPlan, PlanError, PlanGenerator, PlanRequest};

/// The two-state form/results page, compiled into the binary
const INDEX_HTML: &str = include_str!("../assets/index.html");

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Shared handler state
///
/// The client slot is normally empty and a provider client is constructed
/// per request, so a missing credential surfaces as a request-time error
/// with setup guidance instead of a startup crash.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    llm: Option<Arc<dyn LlmClient>>,
}

impl AppState {
    /// State that constructs a provider client per request from config
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            llm: None,
        }
    }

    /// State with a pre-built client (tests inject a mock here)
    pub fn with_client(config: Config, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            config: Arc::new(config),
            llm: Some(llm),
        }
    }

    fn client(&self) -> Result<Arc<dyn LlmClient>, LlmError> {
        match &self.llm {
            Some(client) => Ok(client.clone()),
            None => create_client(&self.config.llm),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Error carried out of a handler, rendered as `{ "error": ... }`
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match &err {
            PlanError::InvalidInput(msg) => {
                warn!(%msg, "generate-plan rejected: invalid input");
                AppError::bad_request(msg.clone())
            }
            PlanError::Llm(llm_err) if llm_err.is_config() => {
                error!(error = %llm_err, "generate-plan failed: provider credential not configured");
                AppError::internal(llm_err.to_string())
            }
            PlanError::Llm(llm_err) => {
                error!(error = %llm_err, "generate-plan failed: provider error");
                AppError::internal(llm_err.to_string())
            }
            PlanError::Format { reason } => {
                // Reason stays in the log; the caller gets the generic message
                error!(%reason, "generate-plan failed: malformed model output");
                AppError::internal(err.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/generate-plan", post(generate_plan))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("unblock listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("unblock shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl+C handler");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn generate_plan(
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<ActionPlan>, AppError> {
    // Input validation happens before any client is constructed, so bad
    // input never reaches the provider
    let (goal, barrier) = req.validate()?;

    let llm = state.client().map_err(PlanError::from)?;
    let generator = PlanGenerator::new(llm, &state.config.llm);

    let plan = generator.generate(&goal, &barrier).await?;
    Ok(Json(plan))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
