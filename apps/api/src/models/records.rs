use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One optimization run. `status` lifecycle: processing → completed | failed.
/// `result_origin` records whether the stored result came from the model or
/// from the parser's fallback.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OptimizationJobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub job_title: String,
    pub company: String,
    pub job_description: String,
    pub optimized_content: Option<Value>,
    pub match_score: Option<i32>,
    pub status: String,
    pub result_origin: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KeywordAnalysisRow {
    pub id: Uuid,
    pub optimization_id: Uuid,
    pub matched_keywords: Vec<String>,
    pub added_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A single actionable improvement tied to an optimization run.
/// `suggestion_type` is one of: content, format, keyword, structure.
/// `priority`: 1 = high, 2 = medium, 3 = low.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImprovementSuggestionRow {
    pub id: Uuid,
    pub optimization_id: Uuid,
    pub suggestion_type: String,
    pub suggestion_text: String,
    pub priority: i16,
    pub created_at: DateTime<Utc>,
}
