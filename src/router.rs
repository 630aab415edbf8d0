//! # Message Router
//!
//! Decides what a plain text message means. Triggers are literal phrases,
//! matched case-insensitively on the trimmed text, in a fixed priority
//! order; the mute gate sits below every trigger, so control phrases and
//! the game/joke/dice phrases keep working while the bot is ignoring a
//! user. Only free-form conversation is silenced.

/// Literal trigger phrases. The main-menu buttons emit the same actions.
pub const MUTE_TRIGGER: &str = "mute yourself";
pub const UNMUTE_TRIGGER: &str = "unmute yourself";
pub const JOKE_TRIGGER: &str = "tell a joke";
pub const DICE_TRIGGER: &str = "roll the dice";
pub const GAME_TRIGGER: &str = "truth or dare";

// Mute toggle feedback.
pub const NOW_MUTED_MSG: &str = "Fine. Silencing myself for you. Enjoy the quiet, mortal.";
pub const ALREADY_MUTED_MSG: &str = "I'm already ignoring you, genius.";
pub const NOW_ACTIVE_MSG: &str = "Back by unpopular demand.";
pub const ALREADY_ACTIVE_MSG: &str = "I never left. Unfortunately for you.";

/// What to do with one inbound message. Exactly one action per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction<'a> {
    /// "mute yourself": stop replying to this user's free-form text.
    Mute,
    /// "unmute yourself": resume replying.
    Unmute,
    /// "tell a joke": joke generation, never gated by mute.
    TellJoke,
    /// "roll the dice": a local die roll.
    RollDice,
    /// "truth or dare": open a game session for this chat.
    StartTruthOrDare,
    /// Muted user, non-trigger text: no reply at all.
    Drop,
    /// Forward the original text (casing intact) to the persona reply.
    PersonaReply(&'a str),
}

/// Priority-ordered routing. First match wins.
pub fn route(text: &str, muted: bool) -> RouteAction<'_> {
    let trimmed = text.trim();
    let normalized = trimmed.to_lowercase();

    match normalized.as_str() {
        MUTE_TRIGGER => RouteAction::Mute,
        UNMUTE_TRIGGER => RouteAction::Unmute,
        JOKE_TRIGGER => RouteAction::TellJoke,
        DICE_TRIGGER => RouteAction::RollDice,
        GAME_TRIGGER => RouteAction::StartTruthOrDare,
        _ if muted => RouteAction::Drop,
        _ => RouteAction::PersonaReply(trimmed),
    }
}
