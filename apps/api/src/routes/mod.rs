pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::history;
use crate::jobs;
use crate::optimize::handlers as optimize_handlers;
use crate::state::AppState;
use crate::upload;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard flow
        .route("/api/v1/resumes/upload", post(upload::handle_upload))
        .route("/api/v1/resumes/:id", get(upload::handle_get_resume))
        .route("/api/v1/jobs/analyze", post(jobs::handle_analyze_job))
        .route("/api/v1/optimize", post(optimize_handlers::handle_optimize))
        // Derived records
        .route(
            "/api/v1/keyword-analysis",
            post(history::handle_create_keyword_analysis),
        )
        .route(
            "/api/v1/improvement-suggestions",
            post(history::handle_create_suggestions),
        )
        // History
        .route("/api/v1/history", get(history::handle_history))
        .route("/api/v1/history/:id", get(history::handle_history_detail))
        .with_state(state)
}
