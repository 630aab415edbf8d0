//! Greeting and help command handlers

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::mention::Mentionable;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::message_components::create_main_menu_buttons;
use crate::router::{DICE_TRIGGER, GAME_TRIGGER, JOKE_TRIGGER, MUTE_TRIGGER, UNMUTE_TRIGGER};

pub const GREETING_MSG: &str =
    "Well, well. Look who summoned me. Speak, and I may even answer. \
     The buttons below are for mortals who can't type.";

/// Handler for /hello and /help
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["hello", "help"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        info!(
            "Utility command /{} from user {}",
            command.data.name, command.user.id
        );
        match command.data.name.as_str() {
            "hello" => {
                let greeting = format!("{} {GREETING_MSG}", command.user.mention());
                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message
                                    .content(greeting)
                                    .set_components(create_main_menu_buttons())
                            })
                    })
                    .await?;
            }
            "help" => {
                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| message.content(help_text()))
                    })
                    .await?;
            }
            _ => {}
        }
        Ok(())
    }
}

fn help_text() -> String {
    format!(
        "Things I deign to respond to:\n\
         • **{JOKE_TRIGGER}**: a joke, at your expense if possible\n\
         • **{DICE_TRIGGER}**: I roll, you watch\n\
         • **{GAME_TRIGGER}**: the game. You will lose.\n\
         • **{MUTE_TRIGGER}** / **{UNMUTE_TRIGGER}**: silence me, or beg me back\n\
         • `/cancel`: flee a running game\n\
         Anything else you type, I answer. Reluctantly."
    )
}
