//! Shared context for message and command handlers

use crate::database::Database;
use crate::features::truth_or_dare::SessionMap;
use crate::gateway::PersonaGateway;

/// Everything a handler needs: the mute store, the generation gateway and
/// the per-channel game sessions. Shared behind an `Arc` by the event
/// handler, the slash registry and the component router.
pub struct CommandContext {
    pub database: Database,
    pub gateway: PersonaGateway,
    pub sessions: SessionMap,
}

impl CommandContext {
    pub fn new(database: Database, gateway: PersonaGateway, sessions: SessionMap) -> Self {
        Self {
            database,
            gateway,
            sessions,
        }
    }
}
