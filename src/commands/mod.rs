//! # Command System
//!
//! Slash command (/) definitions, registration and dispatch.

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;

pub use context::CommandContext;
pub use handler::SlashCommandHandler;
pub use registry::CommandRegistry;
pub use slash::{create_slash_commands, register_global_commands, register_guild_commands};
