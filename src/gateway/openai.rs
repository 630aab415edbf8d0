//! OpenAI-backed generation client
//!
//! Maps the chat completions API onto [`Generation`]: content-policy
//! rejections of the prompt become `PromptBlocked`, a `content_filter`
//! finish becomes `ContentFiltered`, missing or blank payloads become
//! `Empty`. Anything else, including the request timeout, surfaces as a
//! transport error.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use tokio::time::{timeout, Duration};

use super::{Generation, GenerationClient};

/// Upper bound on a single generation call; expiry maps to the transport
/// error path so a slow upstream never wedges a chat.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

pub struct OpenAiClient {
    model: String,
}

impl OpenAiClient {
    /// The `openai` crate reads its API key from the environment; the
    /// binary exports it before building the client.
    pub fn new(model: String) -> Self {
        OpenAiClient { model }
    }
}

#[async_trait]
impl GenerationClient for OpenAiClient {
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<Generation> {
        let messages = vec![
            ChatCompletionMessage {
                role: ChatCompletionMessageRole::System,
                content: Some(system_prompt.to_string()),
                name: None,
                function_call: None,
                tool_call_id: None,
                tool_calls: None,
            },
            ChatCompletionMessage {
                role: ChatCompletionMessageRole::User,
                content: Some(prompt.to_string()),
                name: None,
                function_call: None,
                tool_call_id: None,
                tool_calls: None,
            },
        ];

        let completion = match timeout(
            REQUEST_TIMEOUT,
            ChatCompletion::builder(&self.model, messages).create(),
        )
        .await
        .map_err(|_| anyhow!("generation request timed out after {REQUEST_TIMEOUT:?}"))?
        {
            Ok(completion) => completion,
            Err(e) if is_policy_rejection(&e.to_string()) => {
                debug!("Upstream rejected the prompt: {e}");
                return Ok(Generation::PromptBlocked);
            }
            Err(e) => return Err(anyhow!("OpenAI API error: {e}")),
        };

        let choice = match completion.choices.first() {
            Some(choice) => choice,
            None => return Ok(Generation::Empty),
        };

        if choice.finish_reason == "content_filter" {
            debug!("Generated output was cut by the content filter");
            return Ok(Generation::ContentFiltered);
        }

        let text = choice.message.content.clone().unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(Generation::Empty);
        }
        Ok(Generation::Text(text))
    }
}

/// The API reports prompt-level refusals as content-policy errors rather
/// than a completion, so they are recognized by message text.
fn is_policy_rejection(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("content_policy")
        || message.contains("content management policy")
        || message.contains("invalid_prompt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rejection_detection() {
        assert!(is_policy_rejection(
            "Your request was rejected as a result of our safety system. \
             content_policy_violation"
        ));
        assert!(is_policy_rejection(
            "The prompt violates our Content Management Policy."
        ));
        assert!(!is_policy_rejection("connection reset by peer"));
        assert!(!is_policy_rejection("429 too many requests"));
    }
}
