//! Completion client — the single point of entry for all chat-completion
//! calls in the Tailor API. No other module talks to the provider directly.
//!
//! Each optimization run issues exactly one outbound request: no retry, no
//! backoff. A failed call surfaces to the caller; a degraded-but-parseable
//! response is the parser's problem, not the transport's.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";

/// The model used for all completion calls.
pub const MODEL: &str = "qwen/qwen3-30b-a3b:free";

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 4000;

/// Attribution title sent with every request, per the provider's contract.
const APP_TITLE: &str = "Resume Tailor";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status_text}")]
    Api { status: u16, status_text: String },

    #[error("Completion returned no choices")]
    EmptyChoices,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Anything that can turn a rendered prompt into raw model text.
/// Carried in `AppState` as `Arc<dyn CompletionClient>` so tests can swap in
/// a client pointed at a stub server.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Production client for the OpenRouter chat-completions API.
pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    api_key: String,
    site_url: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String, site_url: String) -> Self {
        Self::with_base_url(OPENROUTER_API_URL.to_string(), api_key, site_url)
    }

    /// Overridable base URL, used by tests to point at a local stub.
    pub fn with_base_url(base_url: String, api_key: String, site_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
            site_url,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", APP_TITLE)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Single attempt only: surface the status text and let the caller
            // report it to the user.
            return Err(CompletionError::Api {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        debug!("Completion call succeeded ({} choices)", parsed.choices.len());

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyChoices)
    }
}
