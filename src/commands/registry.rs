//! Command handler registry
//!
//! Maps command names to handlers. Several names may share one handler;
//! dispatch is a plain lookup, so the routing order is the match in the
//! event handler, not registration order.

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::SlashCommandHandler;

#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under every name it declares.
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Number of registered command names (not unique handlers).
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use anyhow::Result;
    use async_trait::async_trait;
    use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
    use serenity::prelude::Context;

    struct MockHandler {
        names: &'static [&'static str],
    }

    #[async_trait]
    impl SlashCommandHandler for MockHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _serenity_ctx: &Context,
            _command: &ApplicationCommandInteraction,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("hello").is_none());
    }

    #[test]
    fn test_register_covers_all_declared_names() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler {
            names: &["hello", "help"],
        }));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("hello").is_some());
        assert!(registry.get("help").is_some());
        assert!(registry.get("cancel").is_none());
    }

    #[test]
    fn test_later_registration_wins_for_shared_name() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler { names: &["hello"] }));
        registry.register(Arc::new(MockHandler {
            names: &["hello", "cancel"],
        }));

        assert_eq!(registry.len(), 2);
        let handler = registry.get("hello").unwrap();
        assert_eq!(handler.command_names(), &["hello", "cancel"]);
    }
}
