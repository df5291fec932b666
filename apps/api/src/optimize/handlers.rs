//! Axum route handler for the optimization endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::jobs::analyze_job_description;
use crate::models::resume::{OptimizationResult, ResumeData};
use crate::optimize::language::Language;
use crate::optimize::optimizer::optimize;
use crate::optimize::parser::ParseOrigin;
use crate::state::AppState;
use crate::validation::validate_job_description;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub resume_content: ResumeData,
    pub job_description: String,
    /// Response language when the job description carries no detectable script.
    #[serde(default)]
    pub language: Language,
    /// Set when the resume came through the upload endpoint.
    pub resume_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimization_id: Uuid,
    pub result: OptimizationResult,
    /// "model" when the result came from parsed model output, "fallback" when
    /// the output was unparseable and the canned default was substituted.
    pub result_origin: &'static str,
}

/// POST /api/v1/optimize
///
/// Full optimization run: validate → record row (processing) → prompt build →
/// one completion call → parse/normalize → persist result + derived keyword
/// analysis → respond.
pub async fn handle_optimize(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let validation = validate_job_description(&request.job_description);
    if !validation.is_valid {
        return Err(AppError::Validation(
            validation
                .error
                .unwrap_or_else(|| "Invalid job description".to_string()),
        ));
    }

    // The deterministic analysis supplies the record's display fields.
    let analysis = analyze_job_description(&request.job_description)?;

    let optimization_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO optimization_jobs
            (id, user_id, resume_id, job_title, company, job_description, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'processing')
        "#,
    )
    .bind(optimization_id)
    .bind(user_id)
    .bind(request.resume_id)
    .bind(&analysis.title)
    .bind(&analysis.company)
    .bind(&request.job_description)
    .execute(&state.db)
    .await?;

    let parsed = match optimize(
        &request.resume_content,
        &request.job_description,
        request.language,
        state.completions.as_ref(),
    )
    .await
    {
        Ok(parsed) => parsed,
        Err(e) => {
            mark_failed(&state, optimization_id).await;
            return Err(e);
        }
    };

    let result_origin = match &parsed.origin {
        ParseOrigin::Model { .. } => "model",
        ParseOrigin::Fallback => "fallback",
    };

    let content = serde_json::to_value(&parsed.result)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize result: {e}")))?;

    sqlx::query(
        r#"
        UPDATE optimization_jobs
        SET status = 'completed', optimized_content = $1, match_score = $2,
            result_origin = $3, updated_at = now()
        WHERE id = $4
        "#,
    )
    .bind(&content)
    .bind(parsed.result.match_score as i32)
    .bind(result_origin)
    .bind(optimization_id)
    .execute(&state.db)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO keyword_analyses
            (optimization_id, matched_keywords, added_keywords, missing_keywords, suggestions)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(optimization_id)
    .bind(&parsed.result.matched_keywords)
    .bind(&parsed.result.added_keywords)
    .bind(Vec::<String>::new())
    .bind(&parsed.result.optimization_suggestions)
    .execute(&state.db)
    .await?;

    info!(
        "Optimization {} completed for user {} (score {}, origin {})",
        optimization_id, user_id, parsed.result.match_score, result_origin
    );

    Ok(Json(OptimizeResponse {
        optimization_id,
        result: parsed.result,
        result_origin,
    }))
}

/// Best-effort status update when the completion call fails; the original
/// error is what the caller needs to see, not a secondary database error.
async fn mark_failed(state: &AppState, optimization_id: Uuid) {
    if let Err(e) = sqlx::query(
        "UPDATE optimization_jobs SET status = 'failed', updated_at = now() WHERE id = $1",
    )
    .bind(optimization_id)
    .execute(&state.db)
    .await
    {
        error!("Failed to mark optimization {optimization_id} as failed: {e}");
    }
}
