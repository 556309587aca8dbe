use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::middleware::EngineConfig;
use crate::engines::{breakdown, code, ideas, learning, progress, roles};

// ============================================================
// Envelopes
// ============================================================

type EngineResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn success<T: serde::Serialize>(key: &str, payload: T) -> EngineResult {
    let mut body = serde_json::Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(
        key.to_string(),
        serde_json::to_value(payload).unwrap_or(Value::Null),
    );
    Ok(Json(Value::Object(body)))
}

/// Log a processing error and build the failure envelope. The underlying
/// message is only exposed outside production configuration.
fn engine_failure(
    config: &EngineConfig,
    error: &str,
    cause: impl std::fmt::Display,
) -> (StatusCode, Json<Value>) {
    tracing::error!("{}: {}", error, cause);

    let message = if config.production {
        "Internal server error".to_string()
    } else {
        cause.to_string()
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": error,
            "message": message,
        })),
    )
}

// ============================================================
// Health and fallback
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now(),
        "service": "ProgexAI AI Engine",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "AI endpoint not found",
        })),
    )
}

// ============================================================
// Engine endpoints
// ============================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateIdeasRequest {
    user_profile: ideas::UserProfile,
    preferences: ideas::IdeaPreferences,
}

pub async fn generate_ideas(Json(request): Json<GenerateIdeasRequest>) -> EngineResult {
    let ideas = ideas::generate_ideas(&request.user_profile, &request.preferences);
    success("ideas", ideas)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignRolesRequest {
    project_details: roles::ProjectDetails,
    team_members: Vec<roles::TeamMember>,
}

pub async fn assign_roles(Json(request): Json<AssignRolesRequest>) -> EngineResult {
    let assignments = roles::assign_roles(&request.project_details, &request.team_members);
    success("assignments", assignments)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreakdownTasksRequest {
    project_details: breakdown::ProjectDetails,
    team_roles: Vec<breakdown::TeamRole>,
    timeline: breakdown::TimelineRequest,
}

pub async fn breakdown_tasks(Json(request): Json<BreakdownTasksRequest>) -> EngineResult {
    let breakdown = breakdown::breakdown_project(
        &request.project_details,
        &request.team_roles,
        &request.timeline,
        Utc::now(),
    );
    success("breakdown", breakdown)
}

pub async fn learning_help(Json(request): Json<learning::HelpRequest>) -> EngineResult {
    let assistance = learning::provide_help(&request);
    success("assistance", assistance)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeCodeRequest {
    code: String,
    language: String,
    context: String,
}

pub async fn analyze_code(Json(request): Json<AnalyzeCodeRequest>) -> EngineResult {
    let analysis = code::analyze_code(&request.code, &request.language, &request.context);
    success("analysis", analysis)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeProgressRequest {
    project_data: progress::ProjectData,
    team_data: progress::TeamData,
    timeline_data: Option<progress::TimelineData>,
}

pub async fn analyze_progress(
    State(config): State<EngineConfig>,
    Json(request): Json<AnalyzeProgressRequest>,
) -> EngineResult {
    let Some(timeline_data) = request.timeline_data else {
        return Err(engine_failure(
            &config,
            "Failed to analyze progress",
            "timeline data with start and end dates is required",
        ));
    };

    progress::analyze_progress(
        &request.project_data,
        &request.team_data,
        &timeline_data,
        Utc::now(),
    )
    .map_err(|e| engine_failure(&config, "Failed to analyze progress", e))
    .and_then(|insights| success("insights", insights))
}
