//! Core data models for the pairing engine.

mod format;
mod game;
mod ids;
mod pairing;
mod player;
mod standing;

pub use format::*;
pub use game::*;
pub use ids::*;
pub use pairing::*;
pub use player::*;
pub use standing::*;
