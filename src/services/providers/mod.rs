/// Text-generation provider abstraction
///
/// The fact service only needs "system instruction + prompt in, candidate
/// completions out". Providers wrap a concrete language-model API behind that
/// shape so the service can be exercised with fixed substitutes.
use crate::error::AppResult;

pub mod openai;

pub use openai::OpenAiGenerator;

/// Parameters for one generation round trip
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Fixed instructional context sent as the system turn
    pub system: String,
    /// User-turn prompt
    pub prompt: String,
    /// Upper bound on the completion length, in tokens
    pub max_tokens: u32,
    /// Sampling temperature; above zero so repeat calls may differ
    pub temperature: f32,
}

/// One completion returned by a provider
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Candidate {
    /// `None` when the provider returned a choice without content
    pub text: Option<String>,
}

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }
}

/// Trait for text-generation providers
///
/// Failures of the underlying call (network, auth, quota, timeout) are returned
/// as errors and are never retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Runs one generation; candidates are returned in provider order
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<Candidate>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
