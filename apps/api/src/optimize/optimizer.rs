//! Optimization orchestrator: prompt build → one completion call → parse.
//!
//! Stateless; every invocation issues exactly one outbound request. Transport
//! failures propagate to the caller, unparseable model output degrades to the
//! parser's fallback with its origin marked.

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::CompletionClient;
use crate::models::resume::ResumeData;
use crate::optimize::language::Language;
use crate::optimize::parser::{parse_completion, ParsedCompletion, ParseOrigin};
use crate::optimize::prompts::build_prompt;

/// Runs one optimization: renders the prompt, calls the completion endpoint
/// once, and normalizes whatever comes back.
pub async fn optimize(
    resume: &ResumeData,
    job_description: &str,
    language: Language,
    completions: &dyn CompletionClient,
) -> Result<ParsedCompletion, AppError> {
    let prompt = build_prompt(resume, job_description, language).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to serialize resume for prompt: {e}"))
    })?;

    debug!("Optimization prompt rendered ({} chars)", prompt.len());

    let content = completions
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Completion(e.to_string()))?;

    let parsed = parse_completion(&content);
    if parsed.origin == ParseOrigin::Fallback {
        warn!("Model output contained no parseable JSON object; substituting fallback result");
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
    use serde_json::{json, Value};

    use crate::llm_client::OpenRouterClient;
    use crate::models::resume::PersonalInfo;

    async fn stub_handler(State((status, body)): State<(StatusCode, Value)>) -> impl IntoResponse {
        (status, Json(body))
    }

    /// Spawns a stub chat-completion server on an ephemeral port and returns
    /// its base URL.
    async fn spawn_stub(status: StatusCode, body: Value) -> String {
        let app = Router::new()
            .route("/chat/completions", post(stub_handler))
            .with_state((status, body));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn stub_client(base_url: String) -> OpenRouterClient {
        OpenRouterClient::with_base_url(
            base_url,
            "test-key".to_string(),
            "http://localhost:3000".to_string(),
        )
    }

    fn sample_resume() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: None,
                location: None,
                linkedin: None,
                summary: "Frontend engineer".to_string(),
            },
            experience: vec![],
            education: vec![],
            skills: vec!["JavaScript".to_string(), "React".to_string()],
            achievements: vec![],
        }
    }

    /// A ~120-character English job description used by the end-to-end test.
    const JOB_DESCRIPTION: &str = "We are looking for a frontend engineer with Kubernetes \
        experience to run our container platform and ship UI features fast.";

    fn completion_body(content: String) -> Value {
        json!({
            "choices": [
                {"message": {"role": "assistant", "content": content}}
            ]
        })
    }

    #[tokio::test]
    async fn test_optimize_end_to_end_against_stub_endpoint() {
        let resume = sample_resume();
        let model_json = json!({
            "jobLanguage": "en",
            "optimizedResume": serde_json::to_value(&resume).unwrap(),
            "matchScore": 81,
            "improvementItems": 5,
            "keywordMatches": 12,
            "matchedKeywords": ["React", "JavaScript"],
            "addedKeywords": ["Kubernetes"],
            "optimizationSuggestions": ["Mention container orchestration"],
            "optimizationImprovements": ["keywordIntegration"]
        });
        let base = spawn_stub(
            StatusCode::OK,
            completion_body(model_json.to_string()),
        )
        .await;
        let client = stub_client(base);

        let parsed = optimize(&resume, JOB_DESCRIPTION, Language::En, &client)
            .await
            .unwrap();

        assert_eq!(parsed.result.match_score, 81);
        // The model echoed the resume back unchanged, so the skill list is preserved.
        assert_eq!(
            parsed.result.optimized_resume.skills,
            vec!["JavaScript".to_string(), "React".to_string()]
        );
        assert!(matches!(parsed.origin, ParseOrigin::Model { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_carries_status_text() {
        let base = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;
        let client = stub_client(base);

        let result = optimize(&sample_resume(), JOB_DESCRIPTION, Language::En, &client).await;

        match result {
            Err(AppError::Completion(msg)) => assert!(msg.contains("Internal Server Error")),
            other => panic!("expected completion error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_model_output_degrades_to_fallback() {
        let base = spawn_stub(
            StatusCode::OK,
            completion_body("Sorry, I cannot produce JSON today.".to_string()),
        )
        .await;
        let client = stub_client(base);

        let parsed = optimize(&sample_resume(), JOB_DESCRIPTION, Language::En, &client)
            .await
            .unwrap();

        assert_eq!(parsed.origin, ParseOrigin::Fallback);
        assert_eq!(parsed.result.match_score, 75);
    }
}
