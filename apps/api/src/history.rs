//! Optimization history: list/detail reads plus the record-creation endpoints
//! for keyword analyses and improvement suggestions.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::models::records::{ImprovementSuggestionRow, KeywordAnalysisRow, OptimizationJobRow};
use crate::state::AppState;

const SUGGESTION_TYPES: &[&str] = &["content", "format", "keyword", "structure"];

/// Summary row for the history list view.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRecord {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub match_score: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDetailResponse {
    pub optimization: OptimizationJobRow,
    pub keyword_analysis: Option<KeywordAnalysisRow>,
    pub suggestions: Vec<ImprovementSuggestionRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeywordAnalysisRequest {
    pub optimization_id: Uuid,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub added_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSuggestion {
    pub optimization_id: Uuid,
    pub suggestion_type: String,
    pub suggestion_text: String,
    pub priority: i16,
}

#[derive(Debug, Deserialize)]
pub struct CreateSuggestionsRequest {
    pub suggestions: Vec<NewSuggestion>,
}

/// GET /api/v1/history
pub async fn handle_history(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<OptimizationRecord>>, AppError> {
    let records = sqlx::query_as::<_, OptimizationRecord>(
        r#"
        SELECT id, job_title, company, match_score, status, created_at
        FROM optimization_jobs
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(records))
}

/// GET /api/v1/history/:id
///
/// Returns the full record with its derived analyses. Another user's record
/// is indistinguishable from a missing one.
pub async fn handle_history_detail(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryDetailResponse>, AppError> {
    let optimization = sqlx::query_as::<_, OptimizationJobRow>(
        "SELECT * FROM optimization_jobs WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Optimization {id} not found")))?;

    let keyword_analysis = sqlx::query_as::<_, KeywordAnalysisRow>(
        "SELECT * FROM keyword_analyses WHERE optimization_id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?;

    let suggestions = sqlx::query_as::<_, ImprovementSuggestionRow>(
        "SELECT * FROM improvement_suggestions WHERE optimization_id = $1 ORDER BY priority, created_at",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(HistoryDetailResponse {
        optimization,
        keyword_analysis,
        suggestions,
    }))
}

/// POST /api/v1/keyword-analysis
pub async fn handle_create_keyword_analysis(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(request): Json<CreateKeywordAnalysisRequest>,
) -> Result<Json<KeywordAnalysisRow>, AppError> {
    ensure_owned(&state, request.optimization_id, user_id).await?;

    let row = sqlx::query_as::<_, KeywordAnalysisRow>(
        r#"
        INSERT INTO keyword_analyses
            (optimization_id, matched_keywords, added_keywords, missing_keywords, suggestions)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(request.optimization_id)
    .bind(&request.matched_keywords)
    .bind(&request.added_keywords)
    .bind(&request.missing_keywords)
    .bind(&request.suggestions)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// POST /api/v1/improvement-suggestions
pub async fn handle_create_suggestions(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(request): Json<CreateSuggestionsRequest>,
) -> Result<Json<Vec<ImprovementSuggestionRow>>, AppError> {
    if request.suggestions.is_empty() {
        return Err(AppError::Validation(
            "At least one suggestion is required".to_string(),
        ));
    }

    for suggestion in &request.suggestions {
        validate_suggestion(suggestion)?;
        ensure_owned(&state, suggestion.optimization_id, user_id).await?;
    }

    let mut rows = Vec::with_capacity(request.suggestions.len());
    for suggestion in &request.suggestions {
        let row = sqlx::query_as::<_, ImprovementSuggestionRow>(
            r#"
            INSERT INTO improvement_suggestions
                (optimization_id, suggestion_type, suggestion_text, priority)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(suggestion.optimization_id)
        .bind(&suggestion.suggestion_type)
        .bind(&suggestion.suggestion_text)
        .bind(suggestion.priority)
        .fetch_one(&state.db)
        .await?;
        rows.push(row);
    }

    Ok(Json(rows))
}

fn validate_suggestion(suggestion: &NewSuggestion) -> Result<(), AppError> {
    if !SUGGESTION_TYPES.contains(&suggestion.suggestion_type.as_str()) {
        return Err(AppError::Validation(format!(
            "Unknown suggestion type '{}'",
            suggestion.suggestion_type
        )));
    }
    if !(1..=3).contains(&suggestion.priority) {
        return Err(AppError::Validation(
            "Suggestion priority must be 1 (high), 2 (medium), or 3 (low)".to_string(),
        ));
    }
    if suggestion.suggestion_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Suggestion text cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Confirms the optimization record exists and belongs to the caller.
async fn ensure_owned(
    state: &AppState,
    optimization_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    let exists: Option<Uuid> = sqlx::query_scalar(
        "SELECT id FROM optimization_jobs WHERE id = $1 AND user_id = $2",
    )
    .bind(optimization_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;

    exists
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Optimization {optimization_id} not found")))
}
