//! AI service: shared plumbing for the prompt-based flows.
//!
//! DESIGN
//! ======
//! Each flow (influencer matching, campaign summary) validates its own input,
//! renders a prompt, and hands it to [`AiService::complete_json`]. That call
//! checks the LLM is configured, applies the per-user and global rate limits,
//! sends a single completion request, and parses the reply as JSON into the
//! flow's output type. Flows then validate the parsed output.
//!
//! ERROR HANDLING
//! ==============
//! No retries and no partial results: transport failures, non-JSON replies,
//! and schema violations all surface to the caller as an [`AiError`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::validation::ValidationErrors;
use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};
use crate::rate_limit::{RateLimitError, RateLimiter};

pub const DEFAULT_AI_MAX_TOKENS: u32 = 2048;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("AI returned invalid output: {0}")]
    InvalidOutput(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
}

impl crate::error::ErrorCode for AiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LlmNotConfigured => "E_LLM_NOT_CONFIGURED",
            Self::Validation(_) => "E_VALIDATION",
            Self::Llm(_) => "E_LLM_ERROR",
            Self::InvalidOutput(_) => "E_AI_INVALID_OUTPUT",
            Self::RateLimited(_) => "E_RATE_LIMITED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Llm(e) if e.retryable()) || matches!(self, Self::RateLimited(_))
    }
}

impl From<RateLimitError> for AiError {
    fn from(e: RateLimitError) -> Self {
        Self::RateLimited(e.to_string())
    }
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Clone)]
pub struct AiService {
    llm: Option<Arc<dyn LlmChat>>,
    limiter: RateLimiter,
    max_tokens: u32,
}

impl AiService {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, limiter: RateLimiter, max_tokens: u32) -> Self {
        Self { llm, limiter, max_tokens }
    }

    /// Send `prompt` on behalf of `user_id` and parse the reply as `T`.
    ///
    /// # Errors
    ///
    /// `LlmNotConfigured`, `RateLimited`, `Llm` for provider failures, or
    /// `InvalidOutput` when the reply is not JSON of the expected shape.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        user_id: Uuid,
        flow: &'static str,
        system: &str,
        prompt: String,
    ) -> Result<T, AiError> {
        let llm = self.llm.as_ref().ok_or(AiError::LlmNotConfigured)?;
        self.limiter.check_and_record(user_id)?;

        info!(%user_id, flow, prompt_len = prompt.len(), "ai: request");
        let response = llm
            .chat(self.max_tokens, system, &[Message::user(prompt)])
            .await
            .inspect_err(|e| warn!(%user_id, flow, error = %e, "ai: completion failed"))?;
        info!(
            %user_id,
            flow,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            stop_reason = %response.stop_reason,
            "ai: response"
        );

        serde_json::from_str(extract_json(&response.text)).map_err(|e| {
            warn!(%user_id, flow, error = %e, "ai: reply is not valid JSON for the output schema");
            AiError::InvalidOutput(e.to_string())
        })
    }
}

/// Strip a Markdown code fence or surrounding prose from a JSON reply.
pub(crate) fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
        return body.trim_end().trim_end_matches("```").trim();
    }
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use super::*;
    use crate::llm::types::ChatResponse;

    /// Returns a canned reply and records every prompt it receives.
    pub struct MockLlm {
        reply: Result<String, u16>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl MockLlm {
        pub fn replying(text: impl Into<String>) -> Arc<Self> {
            Arc::new(Self { reply: Ok(text.into()), prompts: Mutex::new(Vec::new()) })
        }

        pub fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self { reply: Err(status), prompts: Mutex::new(Vec::new()) })
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl LlmChat for MockLlm {
        async fn chat(&self, _max_tokens: u32, _system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
            self.prompts
                .lock()
                .unwrap()
                .extend(messages.iter().map(|m| m.content.clone()));
            match &self.reply {
                Ok(text) => Ok(ChatResponse {
                    text: text.clone(),
                    model: "mock".into(),
                    stop_reason: "end_turn".into(),
                    input_tokens: 10,
                    output_tokens: 20,
                }),
                Err(status) => Err(LlmError::ApiResponse { status: *status, body: "mock failure".into() }),
            }
        }
    }

    pub fn service(llm: Arc<MockLlm>) -> AiService {
        AiService::new(Some(llm), RateLimiter::default(), DEFAULT_AI_MAX_TOKENS)
    }
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
