//! # Message Dispatcher
//!
//! Turns a routed action into Discord traffic: store toggles with their
//! feedback lines, the typing indicator, gateway calls, dice rolls and
//! game sessions. Also dispatches slash commands through the registry.
//! Errors propagate to the event-handler boundary, which answers with a
//! fixed in-persona line.

use anyhow::Result;
use log::{debug, info};
use rand::Rng;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::handlers::{CancelHandler, UtilityHandler};
use crate::commands::{CommandContext, CommandRegistry};
use crate::core::chunk_for_message;
use crate::features::truth_or_dare;
use crate::router::{
    route, RouteAction, ALREADY_ACTIVE_MSG, ALREADY_MUTED_MSG, NOW_ACTIVE_MSG, NOW_MUTED_MSG,
};

/// Answer when a handler fails; raw errors never reach the chat.
pub const HANDLER_ERROR_MSG: &str = "Something broke. Probably your fault. Try again.";

pub const UNKNOWN_COMMAND_MSG: &str = "Never heard of that command. And I hear everything.";

/// Local die roll; Discord has no animated dice of its own.
pub fn dice_reply() -> String {
    let roll = { rand::rng().random_range(1..=6) };
    format!("🎲 The die clatters across the floor... **{roll}**. Make of that what you will.")
}

pub struct MessageHandler {
    ctx: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl MessageHandler {
    pub fn new(ctx: Arc<CommandContext>) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(UtilityHandler));
        registry.register(Arc::new(CancelHandler));
        MessageHandler { ctx, registry }
    }

    pub async fn handle_message(&self, serenity_ctx: &Context, msg: &Message) -> Result<()> {
        let request_id = Uuid::new_v4();
        let user_id = msg.author.id.0;

        info!(
            "[{}] 📥 Message received | User: {} | Channel: {} | Content: '{}'",
            request_id,
            user_id,
            msg.channel_id.0,
            msg.content.chars().take(100).collect::<String>()
        );

        // A storage failure fails the whole action; it must never read as
        // "not muted".
        let muted = self.ctx.database.is_muted(user_id).await?;

        match route(&msg.content, muted) {
            RouteAction::Mute => {
                let newly_muted = self.ctx.database.mute(user_id).await?;
                info!("[{request_id}] 🔇 Mute request (newly muted: {newly_muted})");
                let feedback = if newly_muted { NOW_MUTED_MSG } else { ALREADY_MUTED_MSG };
                msg.channel_id.say(&serenity_ctx.http, feedback).await?;
            }
            RouteAction::Unmute => {
                let newly_active = self.ctx.database.unmute(user_id).await?;
                info!("[{request_id}] 🔊 Unmute request (newly active: {newly_active})");
                let feedback = if newly_active { NOW_ACTIVE_MSG } else { ALREADY_ACTIVE_MSG };
                msg.channel_id.say(&serenity_ctx.http, feedback).await?;
            }
            RouteAction::TellJoke => {
                debug!("[{request_id}] 🎭 Joke request");
                msg.channel_id.broadcast_typing(&serenity_ctx.http).await?;
                let joke = self.ctx.gateway.joke().await;
                msg.channel_id.say(&serenity_ctx.http, joke).await?;
            }
            RouteAction::RollDice => {
                debug!("[{request_id}] 🎲 Dice roll");
                msg.channel_id.say(&serenity_ctx.http, dice_reply()).await?;
            }
            RouteAction::StartTruthOrDare => {
                debug!("[{request_id}] 😈 Opening truth-or-dare session");
                truth_or_dare::start_session(serenity_ctx, msg.channel_id, &self.ctx).await?;
            }
            RouteAction::Drop => {
                debug!("[{request_id}] 🤐 User is muted, dropping message");
            }
            RouteAction::PersonaReply(text) => {
                debug!("[{request_id}] 💬 Free-form reply");
                msg.channel_id.broadcast_typing(&serenity_ctx.http).await?;
                let reply = self.ctx.gateway.chat_reply(text).await;
                for chunk in chunk_for_message(&reply) {
                    msg.channel_id.say(&serenity_ctx.http, chunk).await?;
                }
                info!("[{request_id}] ✅ Reply sent");
            }
        }

        Ok(())
    }

    pub async fn handle_slash_command(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match self.registry.get(&command.data.name) {
            Some(handler) => {
                handler
                    .handle(Arc::clone(&self.ctx), serenity_ctx, command)
                    .await
            }
            None => {
                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(UNKNOWN_COMMAND_MSG).ephemeral(true)
                            })
                    })
                    .await?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    #[test]
    fn test_dice_reply_always_names_a_face() {
        for _ in 0..64 {
            let reply = dice_reply();
            let rolled = (1..=6).any(|n| reply.contains(&format!("**{n}**")));
            assert!(rolled, "reply should contain a die face: {reply}");
        }
    }

    // The full mute round trip as a user sees it: first trigger mutes and
    // gets the "now muted" line, the second gets "already muted", free-form
    // text goes silent while the control and joke triggers keep working.
    #[tokio::test]
    async fn test_mute_round_trip_for_user() {
        let db = Database::new(":memory:").await.unwrap();
        let user_id = 42;

        let muted = db.is_muted(user_id).await.unwrap();
        assert!(!muted);
        assert_eq!(route("mute yourself", muted), RouteAction::Mute);

        // First trigger records the mute (the "now muted" line), the
        // repeat is a no-op (the "already muted" line).
        assert!(db.mute(user_id).await.unwrap());
        assert!(!db.mute(user_id).await.unwrap());

        let muted = db.is_muted(user_id).await.unwrap();
        assert!(muted);
        assert_eq!(route("so, any thoughts?", muted), RouteAction::Drop);
        assert_eq!(route("tell a joke", muted), RouteAction::TellJoke);
        assert_eq!(route("unmute yourself", muted), RouteAction::Unmute);

        assert!(db.unmute(user_id).await.unwrap());
        let muted = db.is_muted(user_id).await.unwrap();
        assert_eq!(
            route("so, any thoughts?", muted),
            RouteAction::PersonaReply("so, any thoughts?")
        );
    }
}
