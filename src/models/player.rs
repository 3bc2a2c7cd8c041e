//! Player models: roster entries and per-computation tournament aggregates.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Piece colour assigned to a player for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A roster entry supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Numeric rating used for seeding
    pub rating: u32,

    /// Withdrawn players keep their history but are never paired
    #[serde(default)]
    pub withdrew: bool,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, rating: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating,
            withdrew: false,
        }
    }

    /// Builder method to mark the player as withdrawn.
    pub fn withdrawn(mut self) -> Self {
        self.withdrew = true;
        self
    }
}

/// Tournament-scoped view of a player, rebuilt from the game log on every
/// pairing or standings computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentPlayer {
    pub player: Player,
    pub points: f64,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub games_played: u32,
    pub buchholz: f64,
    pub sonneborn_berger: f64,

    /// Opponents faced, in game-log order
    pub opponents: Vec<PlayerId>,

    /// Colours played, in game-log order
    pub colors: Vec<Color>,

    pub withdrew: bool,
}

impl TournamentPlayer {
    pub fn new(player: Player) -> Self {
        let withdrew = player.withdrew;
        Self {
            player,
            points: 0.0,
            wins: 0,
            draws: 0,
            losses: 0,
            games_played: 0,
            buchholz: 0.0,
            sonneborn_berger: 0.0,
            opponents: Vec::new(),
            colors: Vec::new(),
            withdrew,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.player.id
    }

    pub fn rating(&self) -> u32 {
        self.player.rating
    }

    pub fn is_active(&self) -> bool {
        !self.withdrew
    }
}

/// Whites minus blacks for a colour history.
pub fn color_balance(colors: &[Color]) -> i32 {
    colors.iter().fold(0, |acc, c| match c {
        Color::White => acc + 1,
        Color::Black => acc - 1,
    })
}
