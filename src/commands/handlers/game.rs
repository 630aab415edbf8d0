//! Truth-or-dare cancel command handler

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::features::truth_or_dare::CANCEL_MSG;

/// Handler for /cancel
pub struct CancelHandler;

#[async_trait]
impl SlashCommandHandler for CancelHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["cancel"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let chat_id = command.channel_id.0;
        let had_session = ctx.sessions.cancel(chat_id);
        info!("Cancel in channel {chat_id} (pending session: {had_session})");

        // Same taunt whether or not a game was pending; the command is
        // harmless when idle.
        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(CANCEL_MSG))
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_handler_command() {
        let handler = CancelHandler;
        assert_eq!(handler.command_names(), &["cancel"]);
    }
}
