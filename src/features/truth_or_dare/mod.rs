//! # Feature: Truth or Dare
//!
//! A short-lived per-chat game. The trigger phrase opens a session and
//! presents two buttons; picking one generates a question or a task and
//! ends the session. Sessions live in a map keyed by channel id. Absence
//! from the map IS the terminal state, and `DashMap::remove` makes the
//! first button press win when presses overlap. A fresh trigger while a
//! session is pending replaces it.

use anyhow::Result;
use dashmap::DashMap;
use log::{debug, info};
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::ChannelId;
use serenity::prelude::Context;
use std::time::{Duration, Instant};

use crate::commands::context::CommandContext;

/// Button callback identifiers, fixed label/callback pairs.
pub const TRUTH_CALLBACK_ID: &str = "choice=truth";
pub const DARE_CALLBACK_ID: &str = "choice=dare";
pub const TRUTH_BUTTON_LABEL: &str = "Truth";
pub const DARE_BUTTON_LABEL: &str = "Dare";

pub const GAME_PROMPT: &str =
    "Truth... or dare? Choose, mortal. And choose carefully. I bite either way.";
pub const TRUTH_SEARCHING_MSG: &str =
    "Oh, you'll regret this. Digging up my nastiest question...";
pub const DARE_SEARCHING_MSG: &str =
    "Excellent. Let me forge something you'll spend a week living down...";
pub const TRUTH_ERROR_MSG: &str = "My crystal ball is cloudy. No truth for you today.";
pub const CANCEL_MSG: &str = "Pfft, coward. Bailed as usual. I expected nothing less.";
pub const STALE_CHOICE_MSG: &str = "That game ended ages ago. Start a new one, if you dare.";

/// Pending sessions older than this are treated as over.
const SESSION_TIMEOUT: Duration = Duration::from_secs(600);

/// The player's pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Truth,
    Dare,
}

impl Choice {
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            TRUTH_CALLBACK_ID => Some(Choice::Truth),
            DARE_CALLBACK_ID => Some(Choice::Dare),
            _ => None,
        }
    }
}

struct Session {
    started_at: Instant,
}

/// Pending choice prompts, one per channel.
pub struct SessionMap {
    sessions: DashMap<u64, Session>,
    timeout: Duration,
}

impl Default for SessionMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMap {
    pub fn new() -> Self {
        Self::with_timeout(SESSION_TIMEOUT)
    }

    /// Timeout injection point for tests.
    pub fn with_timeout(timeout: Duration) -> Self {
        SessionMap {
            sessions: DashMap::new(),
            timeout,
        }
    }

    /// Open a session for `chat_id`. A pending session is replaced; the
    /// newest prompt's buttons are the live ones. Returns true when a
    /// pending session was replaced.
    pub fn begin(&self, chat_id: u64) -> bool {
        self.sessions
            .insert(
                chat_id,
                Session {
                    started_at: Instant::now(),
                },
            )
            .is_some()
    }

    /// Claim the pending session for `chat_id`. Removal is the terminal
    /// transition; of two overlapping presses only one gets `true`.
    /// Expired sessions are dropped and reported as absent.
    pub fn take(&self, chat_id: u64) -> bool {
        match self.sessions.remove(&chat_id) {
            Some((_, session)) => session.started_at.elapsed() < self.timeout,
            None => false,
        }
    }

    /// End the session for `chat_id` regardless of state or age.
    pub fn cancel(&self, chat_id: u64) -> bool {
        self.sessions.remove(&chat_id).is_some()
    }

    pub fn is_awaiting(&self, chat_id: u64) -> bool {
        self.sessions.contains_key(&chat_id)
    }
}

/// The two-button choice row.
pub fn create_choice_buttons() -> CreateComponents {
    CreateComponents::default()
        .create_action_row(|row| {
            row.create_button(|button| {
                button
                    .custom_id(TRUTH_CALLBACK_ID)
                    .label(TRUTH_BUTTON_LABEL)
                    .style(ButtonStyle::Primary)
            })
            .create_button(|button| {
                button
                    .custom_id(DARE_CALLBACK_ID)
                    .label(DARE_BUTTON_LABEL)
                    .style(ButtonStyle::Danger)
            })
        })
        .to_owned()
}

pub fn format_truth_challenge(question: &str) -> String {
    format!(
        "❓ **Ready for the truth, mortal?**\n\n{question}\n\nAnswer up. Don't keep me waiting."
    )
}

pub fn format_dare_challenge(task: &str) -> String {
    format!("🔥 **Think you're brave enough?**\n\n{task}\n\nDo it, or I curse your shoelaces.")
}

/// Open a session and present the choice prompt in `channel_id`.
pub async fn start_session(
    serenity_ctx: &Context,
    channel_id: ChannelId,
    ctx: &CommandContext,
) -> Result<()> {
    if ctx.sessions.begin(channel_id.0) {
        debug!("Replacing pending truth-or-dare session in channel {}", channel_id.0);
    }
    channel_id
        .send_message(&serenity_ctx.http, |message| {
            message
                .content(GAME_PROMPT)
                .set_components(create_choice_buttons())
        })
        .await?;
    info!("Truth-or-dare session opened in channel {}", channel_id.0);
    Ok(())
}

/// Resolve a Truth/Dare button press.
pub async fn handle_choice(
    serenity_ctx: &Context,
    interaction: &MessageComponentInteraction,
    ctx: &CommandContext,
    choice: Choice,
) -> Result<()> {
    let chat_id = interaction.channel_id.0;

    if !ctx.sessions.take(chat_id) {
        // No live session: this press lost a race or outlived the game.
        interaction
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.content(STALE_CHOICE_MSG).ephemeral(true)
                    })
            })
            .await?;
        return Ok(());
    }

    info!("Truth-or-dare choice {choice:?} in channel {chat_id}");

    // Acknowledge by swapping the prompt for the transitional line and
    // stripping the buttons, then fill in the challenge once generated.
    let searching = match choice {
        Choice::Truth => TRUTH_SEARCHING_MSG,
        Choice::Dare => DARE_SEARCHING_MSG,
    };
    interaction
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::UpdateMessage)
                .interaction_response_data(|message| {
                    message.content(searching).components(|components| components)
                })
        })
        .await?;

    interaction
        .channel_id
        .broadcast_typing(&serenity_ctx.http)
        .await?;

    let challenge = match choice {
        Choice::Truth => match ctx.gateway.truth_question().await {
            Some(question) => format_truth_challenge(&question),
            None => TRUTH_ERROR_MSG.to_string(),
        },
        Choice::Dare => format_dare_challenge(&ctx.gateway.dare_task().await),
    };

    interaction
        .edit_original_interaction_response(&serenity_ctx.http, |response| {
            response.content(challenge)
        })
        .await?;

    Ok(())
}
