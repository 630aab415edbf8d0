//! Button interaction routing
//!
//! Two button families exist: the main-menu row attached to the greeting,
//! where each press is equivalent to typing the matching trigger phrase,
//! and the truth-or-dare choice row, whose callback ids are fixed
//! label/callback pairs.

use anyhow::Result;
use log::{info, warn};
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::features::truth_or_dare::{self, Choice};
use crate::handler::dice_reply;

pub const MENU_JOKE_ID: &str = "menu=joke";
pub const MENU_DICE_ID: &str = "menu=dice";
pub const MENU_GAME_ID: &str = "menu=tod";

pub const UNKNOWN_COMPONENT_MSG: &str = "That button does nothing. Much like you.";

/// The main-menu row shown with the greeting.
pub fn create_main_menu_buttons() -> CreateComponents {
    CreateComponents::default()
        .create_action_row(|row| {
            row.create_button(|button| {
                button
                    .custom_id(MENU_JOKE_ID)
                    .label("🎭 A joke")
                    .style(ButtonStyle::Secondary)
            })
            .create_button(|button| {
                button
                    .custom_id(MENU_DICE_ID)
                    .label("🎲 Roll the dice")
                    .style(ButtonStyle::Secondary)
            })
            .create_button(|button| {
                button
                    .custom_id(MENU_GAME_ID)
                    .label("😈 Truth or dare")
                    .style(ButtonStyle::Secondary)
            })
        })
        .to_owned()
}

/// Handler for all message component interactions
pub struct MessageComponentHandler {
    ctx: Arc<CommandContext>,
}

impl MessageComponentHandler {
    pub fn new(ctx: Arc<CommandContext>) -> Self {
        Self { ctx }
    }

    pub async fn handle_component_interaction(
        &self,
        serenity_ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let custom_id = interaction.data.custom_id.as_str();
        info!(
            "Processing component interaction: {custom_id} from user: {}",
            interaction.user.id
        );

        if let Some(choice) = Choice::from_custom_id(custom_id) {
            return truth_or_dare::handle_choice(serenity_ctx, interaction, &self.ctx, choice)
                .await;
        }

        match custom_id {
            MENU_JOKE_ID => self.handle_menu_joke(serenity_ctx, interaction).await?,
            MENU_DICE_ID => {
                interaction
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| message.content(dice_reply()))
                    })
                    .await?;
            }
            MENU_GAME_ID => {
                self.ctx.sessions.begin(interaction.channel_id.0);
                interaction
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message
                                    .content(truth_or_dare::GAME_PROMPT)
                                    .set_components(truth_or_dare::create_choice_buttons())
                            })
                    })
                    .await?;
            }
            _ => {
                warn!("Unknown component custom_id: {custom_id}");
                interaction
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(UNKNOWN_COMPONENT_MSG).ephemeral(true)
                            })
                    })
                    .await?;
            }
        }

        Ok(())
    }

    /// Joke generation can outlive the 3-second interaction window, so the
    /// response is deferred and edited in once the text arrives.
    async fn handle_menu_joke(
        &self,
        serenity_ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        interaction
            .create_interaction_response(&serenity_ctx.http, |response| {
                response.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await?;

        let joke = self.ctx.gateway.joke().await;

        interaction
            .edit_original_interaction_response(&serenity_ctx.http, |response| {
                response.content(joke)
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_ids_do_not_collide_with_choice_ids() {
        for id in [MENU_JOKE_ID, MENU_DICE_ID, MENU_GAME_ID] {
            assert!(Choice::from_custom_id(id).is_none());
        }
    }

    #[test]
    fn test_main_menu_has_all_three_buttons() {
        let components = create_main_menu_buttons();
        let rendered = format!("{:?}", components.0);
        for id in [MENU_JOKE_ID, MENU_DICE_ID, MENU_GAME_ID] {
            assert!(rendered.contains(id));
        }
    }
}
