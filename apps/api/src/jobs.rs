//! Job-description analysis endpoint.
//!
//! Validation is real; the returned analysis is a fixed, illustrative record
//! standing in for a dedicated analysis service.

use axum::Json;
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::models::resume::JobAnalysis;
use crate::validation::validate_job_description;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeJobRequest {
    pub job_description: String,
}

/// Validates a job description and derives its analysis.
pub fn analyze_job_description(description: &str) -> Result<JobAnalysis, AppError> {
    let validation = validate_job_description(description);
    if !validation.is_valid {
        return Err(AppError::Validation(
            validation
                .error
                .unwrap_or_else(|| "Invalid job description".to_string()),
        ));
    }

    Ok(JobAnalysis {
        title: "Senior Software Engineer".to_string(),
        company: "TechCorp Inc.".to_string(),
        location: "San Francisco, CA".to_string(),
        job_type: "Full-time".to_string(),
        key_skills: vec![
            "React".to_string(),
            "Node.js".to_string(),
            "TypeScript".to_string(),
            "AWS".to_string(),
            "Python".to_string(),
            "SQL".to_string(),
        ],
        requirements: vec![
            "5+ years of software development experience".to_string(),
            "Strong knowledge of React and Node.js".to_string(),
            "Experience with cloud platforms (AWS preferred)".to_string(),
            "Bachelor's degree in Computer Science or related field".to_string(),
        ],
    })
}

/// POST /api/v1/jobs/analyze
pub async fn handle_analyze_job(
    _user: AuthenticatedUser,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<JobAnalysis>, AppError> {
    let analysis = analyze_job_description(&request.job_description)?;
    Ok(Json(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_description_yields_analysis() {
        let description = "We are hiring a senior engineer to build our cloud platform with React.";
        let analysis = analyze_job_description(description).unwrap();
        assert_eq!(analysis.title, "Senior Software Engineer");
        assert!(!analysis.key_skills.is_empty());
        assert_eq!(analysis.requirements.len(), 4);
    }

    #[test]
    fn test_short_description_is_rejected() {
        let result = analyze_job_description("too short");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let description = "A long enough job description for the validator to accept it fully.";
        let first = analyze_job_description(description).unwrap();
        let second = analyze_job_description(description).unwrap();
        assert_eq!(first, second);
    }
}
