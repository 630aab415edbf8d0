//! Slash command definitions and registration
//!
//! Guild registration is instant and used during development; global
//! registration can take up to an hour to propagate and is the production
//! path.

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::Command;
use serenity::model::id::GuildId;
use serenity::prelude::Context;

/// All slash command definitions.
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = Vec::new();

    commands.push(
        CreateApplicationCommand::default()
            .name("hello")
            .description("Summon the imp and get the main menu")
            .to_owned(),
    );
    commands.push(
        CreateApplicationCommand::default()
            .name("help")
            .description("What the imp answers to")
            .to_owned(),
    );
    commands.push(
        CreateApplicationCommand::default()
            .name("cancel")
            .description("Chicken out of the current truth-or-dare game")
            .to_owned(),
    );

    commands
}

/// Register all slash commands globally.
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    let definitions = create_slash_commands();
    let count = definitions.len();

    Command::set_global_application_commands(&ctx.http, |commands| {
        for definition in definitions {
            commands.add_application_command(definition);
        }
        commands
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Register all slash commands for a single guild (instant, for development).
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    let definitions = create_slash_commands();
    let count = definitions.len();

    guild_id
        .set_application_commands(&ctx.http, |commands| {
            for definition in definitions {
                commands.add_application_command(definition);
            }
            commands
        })
        .await?;

    info!("Guild slash commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_set_is_complete() {
        let commands = create_slash_commands();
        assert_eq!(commands.len(), 3);

        let names: Vec<String> = commands
            .iter()
            .filter_map(|c| c.0.get("name").and_then(|v| v.as_str()).map(String::from))
            .collect();
        assert!(names.contains(&"hello".to_string()));
        assert!(names.contains(&"help".to_string()));
        assert!(names.contains(&"cancel".to_string()));
    }
}
