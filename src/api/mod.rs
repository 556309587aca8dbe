mod handlers;
pub mod middleware;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use middleware::EngineConfig;

pub fn create_router(config: EngineConfig) -> Router {
    let mut ai = Router::new()
        .route("/generate-ideas", post(handlers::generate_ideas))
        .route("/assign-roles", post(handlers::assign_roles))
        .route("/breakdown-tasks", post(handlers::breakdown_tasks))
        .route("/learning-help", post(handlers::learning_help))
        .route("/analyze-code", post(handlers::analyze_code))
        .route("/analyze-progress", post(handlers::analyze_progress));

    // The limit covers the engine endpoints only; /health stays open.
    if let Some(limiter) = config.rate_limiter.clone() {
        ai = ai.layer(from_fn_with_state(limiter, middleware::rate_limit_middleware));
    }

    Router::new()
        .nest("/ai", ai)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config)),
        )
        .with_state(config)
}

/// Explicit allow-list CORS with credentials, mirroring the configured
/// origins. Origins that fail to parse as header values are skipped.
fn cors_layer(config: &EngineConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
