//! # Feature: Persona
//!
//! The bot speaks with a single fixed personality, Imp — a snarky little
//! demon. The system prompt is embedded at compile time from prompt/imp.md
//! and sent with every generation request.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub system_prompt: String,
    pub description: String,
}

impl Persona {
    /// The bot's one and only personality.
    pub fn imp() -> Self {
        Persona {
            name: "Imp".to_string(),
            system_prompt: include_str!("../../../prompt/imp.md").to_string(),
            description: "A snarky theatrical demon bound to this chat against its will"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imp_prompt_loaded() {
        let persona = Persona::imp();
        assert_eq!(persona.name, "Imp");
        assert!(persona.system_prompt.contains("Imp"));
        assert!(persona.system_prompt.contains("Snarky"));
        assert!(
            persona.system_prompt.len() > 100,
            "Prompt should be substantial"
        );
        assert!(!persona.description.is_empty());
    }
}
