//! Slash command handler implementations

pub mod game;
pub mod utility;

pub use game::CancelHandler;
pub use utility::UtilityHandler;
