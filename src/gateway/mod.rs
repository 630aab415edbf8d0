//! # Persona Response Gateway
//!
//! Every generation request goes through here. The gateway owns the persona
//! system prompt, invokes a [`GenerationClient`] and collapses whatever came
//! back into user-facing text, so raw upstream error shapes never leak into
//! the chat. Each call site has its own fixed in-persona fallback strings
//! for a rejected prompt, for a safety-cut or empty result, and for
//! transport failures. The truth-question variant is the exception: it
//! reports absence instead of text so the conversation layer can show its
//! own error message.

pub mod openai;

use anyhow::Result;
use async_trait::async_trait;
use log::{error, warn};
use std::sync::Arc;

use crate::features::persona::Persona;

/// Normalized outcome of a single generation request.
///
/// Transport and service-level failures are carried as `Err` by the client;
/// everything the service actually decided is one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Usable generated text.
    Text(String),
    /// Upstream rejected the prompt itself before generating.
    PromptBlocked,
    /// Generation ran but the output was cut by a safety filter.
    ContentFiltered,
    /// Successful call with no usable text in the payload.
    Empty,
}

/// Seam to the external generation service.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<Generation>;
}

// Free-form chat replies.
pub const CHAT_BLOCKED_MSG: &str = "Pfft. Not even going to answer that one. Boring.";
pub const CHAT_EMPTY_MSG: &str = "Quiet. I'm not in the mood.";
pub const CHAT_ERROR_MSG: &str = "My dark powers are having an outage. Pester me later.";

// Joke requests.
pub const JOKE_BLOCKED_MSG: &str =
    "Jokes? For you? I'm not in the business of amusing turnips. Shoo.";
pub const JOKE_EMPTY_MSG: &str = "The joke got stuck in my throat. Much like your last message.";
pub const JOKE_ERROR_MSG: &str = "The comedy void is closed for maintenance. Tragic, I know.";

// Dare tasks.
pub const DARE_BLOCKED_MSG: &str =
    "That dare was vetoed by powers even darker than mine. Pick truth next time.";
pub const DARE_EMPTY_MSG: &str =
    "I can't think of anything humiliating enough for you. Count yourself lucky.";
pub const DARE_ERROR_MSG: &str = "The dare forge is cold today. Come back and grovel later.";

const JOKE_PROMPT: &str = "Tell me a joke.";
const TRUTH_PROMPT: &str =
    "We're playing truth or dare and I picked truth. Ask me one probing question. \
     Reply with the question only.";
const DARE_PROMPT: &str =
    "We're playing truth or dare and I picked dare. Give me one task to perform. \
     Reply with the task only.";

/// Wraps a [`GenerationClient`] with the bot persona and per-call-site
/// outcome mapping.
pub struct PersonaGateway {
    client: Arc<dyn GenerationClient>,
    persona: Persona,
}

impl PersonaGateway {
    pub fn new(client: Arc<dyn GenerationClient>, persona: Persona) -> Self {
        PersonaGateway { client, persona }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Free-form reply to whatever the user typed. Always yields text.
    pub async fn chat_reply(&self, text: &str) -> String {
        self.generate_or(text, "chat", CHAT_BLOCKED_MSG, CHAT_EMPTY_MSG, CHAT_ERROR_MSG)
            .await
    }

    /// A joke on demand. Always yields text.
    pub async fn joke(&self) -> String {
        self.generate_or(JOKE_PROMPT, "joke", JOKE_BLOCKED_MSG, JOKE_EMPTY_MSG, JOKE_ERROR_MSG)
            .await
    }

    /// A dare task. Always yields text.
    pub async fn dare_task(&self) -> String {
        self.generate_or(DARE_PROMPT, "dare", DARE_BLOCKED_MSG, DARE_EMPTY_MSG, DARE_ERROR_MSG)
            .await
    }

    /// A truth question, or `None` on any non-Ok outcome. The caller detects
    /// the absence and substitutes its own message.
    pub async fn truth_question(&self) -> Option<String> {
        match self.client.generate(&self.persona.system_prompt, TRUTH_PROMPT).await {
            Ok(Generation::Text(text)) => Some(text.trim().to_string()),
            Ok(outcome) => {
                warn!("Truth question yielded no text: {outcome:?}");
                None
            }
            Err(e) => {
                error!("Truth question generation failed: {e:#}");
                None
            }
        }
    }

    async fn generate_or(
        &self,
        prompt: &str,
        call_site: &str,
        blocked: &str,
        empty: &str,
        transport: &str,
    ) -> String {
        match self.client.generate(&self.persona.system_prompt, prompt).await {
            Ok(Generation::Text(text)) => text.trim().to_string(),
            Ok(Generation::PromptBlocked) => {
                warn!("Prompt blocked upstream for {call_site} request");
                blocked.to_string()
            }
            Ok(Generation::ContentFiltered) | Ok(Generation::Empty) => {
                warn!("No usable text for {call_site} request");
                empty.to_string()
            }
            Err(e) => {
                error!("Generation failed for {call_site} request: {e:#}");
                transport.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;

    /// Client that replays one scripted outcome and records what was asked.
    struct ScriptedClient {
        outcome: Option<Generation>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedClient {
        fn ok(outcome: Generation) -> Self {
            ScriptedClient {
                outcome: Some(outcome),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            ScriptedClient {
                outcome: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationClient for ScriptedClient {
        async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<Generation> {
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), prompt.to_string()));
            match &self.outcome {
                Some(outcome) => Ok(outcome.clone()),
                None => Err(anyhow!("connection reset")),
            }
        }
    }

    fn gateway(client: ScriptedClient) -> (Arc<ScriptedClient>, PersonaGateway) {
        let client = Arc::new(client);
        let gateway = PersonaGateway::new(client.clone(), Persona::imp());
        (client, gateway)
    }

    #[tokio::test]
    async fn test_chat_reply_passes_persona_prompt_and_user_text() {
        let (client, gateway) = gateway(ScriptedClient::ok(Generation::Text("fine.".into())));

        let reply = gateway.chat_reply("what is rust").await;
        assert_eq!(reply, "fine.");

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Persona::imp().system_prompt);
        assert_eq!(calls[0].1, "what is rust");
    }

    #[tokio::test]
    async fn test_successful_text_is_trimmed() {
        let (_, gateway) = gateway(ScriptedClient::ok(Generation::Text(
            "  a perfectly good answer \n".into(),
        )));
        assert_eq!(gateway.chat_reply("hi").await, "a perfectly good answer");
    }

    #[tokio::test]
    async fn test_chat_outcome_mapping() {
        let (_, gw) = gateway(ScriptedClient::ok(Generation::PromptBlocked));
        assert_eq!(gw.chat_reply("x").await, CHAT_BLOCKED_MSG);

        let (_, gw) = gateway(ScriptedClient::ok(Generation::ContentFiltered));
        assert_eq!(gw.chat_reply("x").await, CHAT_EMPTY_MSG);

        let (_, gw) = gateway(ScriptedClient::ok(Generation::Empty));
        assert_eq!(gw.chat_reply("x").await, CHAT_EMPTY_MSG);

        let (_, gw) = gateway(ScriptedClient::failing());
        assert_eq!(gw.chat_reply("x").await, CHAT_ERROR_MSG);
    }

    #[tokio::test]
    async fn test_joke_outcome_mapping() {
        let (_, gw) = gateway(ScriptedClient::ok(Generation::PromptBlocked));
        assert_eq!(gw.joke().await, JOKE_BLOCKED_MSG);

        let (_, gw) = gateway(ScriptedClient::ok(Generation::Empty));
        assert_eq!(gw.joke().await, JOKE_EMPTY_MSG);

        let (_, gw) = gateway(ScriptedClient::failing());
        assert_eq!(gw.joke().await, JOKE_ERROR_MSG);
    }

    #[tokio::test]
    async fn test_dare_always_yields_text() {
        for client in [
            ScriptedClient::ok(Generation::Text("lick a doorknob".into())),
            ScriptedClient::ok(Generation::PromptBlocked),
            ScriptedClient::ok(Generation::ContentFiltered),
            ScriptedClient::ok(Generation::Empty),
            ScriptedClient::failing(),
        ] {
            let (_, gw) = gateway(client);
            assert!(!gw.dare_task().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_truth_question_is_absent_on_every_failure() {
        let (_, gw) = gateway(ScriptedClient::ok(Generation::Text(" who hurt you? ".into())));
        assert_eq!(gw.truth_question().await.as_deref(), Some("who hurt you?"));

        for client in [
            ScriptedClient::ok(Generation::PromptBlocked),
            ScriptedClient::ok(Generation::ContentFiltered),
            ScriptedClient::ok(Generation::Empty),
            ScriptedClient::failing(),
        ] {
            let (_, gw) = gateway(client);
            assert!(gw.truth_question().await.is_none());
        }
    }

    #[test]
    fn test_fallback_strings_are_pairwise_distinct() {
        let all = [
            CHAT_BLOCKED_MSG,
            CHAT_EMPTY_MSG,
            CHAT_ERROR_MSG,
            JOKE_BLOCKED_MSG,
            JOKE_EMPTY_MSG,
            JOKE_ERROR_MSG,
            DARE_BLOCKED_MSG,
            DARE_EMPTY_MSG,
            DARE_ERROR_MSG,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b, "fallback strings must not be shared");
            }
        }
    }
}
