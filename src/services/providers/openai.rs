/// OpenAI chat-completions provider
///
/// Sends the system instruction and prompt as a two-message conversation to
/// `{api_url}/chat/completions` and maps each returned choice to a candidate.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    services::providers::{Candidate, GenerationRequest, TextGenerator},
};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl From<ChatCompletionResponse> for Vec<Candidate> {
    fn from(response: ChatCompletionResponse) -> Self {
        response
            .choices
            .into_iter()
            .map(|choice| Candidate {
                text: choice.message.and_then(|m| m.content),
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct OpenAiGenerator {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiGenerator {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, model: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            model,
        })
    }

    fn build_body<'a>(&'a self, request: &'a GenerationRequest) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn parse_response(response_text: &str) -> AppResult<Vec<Candidate>> {
        let response: ChatCompletionResponse =
            serde_json::from_str(response_text).map_err(|e| {
                tracing::error!(error = %e, "Failed to deserialize OpenAI response");
                AppError::ExternalApi(format!("Failed to parse OpenAI response: {}", e))
            })?;

        Ok(response.into())
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<Candidate>> {
        let url = format!("{}/chat/completions", self.api_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(provider = self.name(), "Generation request timed out");
                }
                AppError::HttpClient(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OpenAI API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let candidates = Self::parse_response(&response_text)?;

        tracing::debug!(
            provider = self.name(),
            model = %self.model,
            candidates = candidates.len(),
            "Generation completed"
        );

        Ok(candidates)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
