//! Pairing model: the engine's proposal for one board of a new round.

use serde::{Deserialize, Serialize};

use super::{Game, PlayerId, TournamentId};

/// A single board assignment produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// Round this pairing belongs to
    pub round: u32,

    /// Board number (1-based, dense within a round)
    pub board: u32,

    /// Player with the white pieces, or the bye recipient
    pub white: PlayerId,

    /// Player with the black pieces; `None` means a bye for `white`
    pub black: Option<PlayerId>,
}

impl Pairing {
    pub fn new(round: u32, board: u32, white: PlayerId, black: PlayerId) -> Self {
        Self {
            round,
            board,
            white,
            black: Some(black),
        }
    }

    pub fn bye(round: u32, board: u32, player: PlayerId) -> Self {
        Self {
            round,
            board,
            white: player,
            black: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.black.is_none()
    }

    pub fn involves(&self, player: &PlayerId) -> bool {
        &self.white == player || self.black.as_ref() == Some(player)
    }

    /// Convert into a pending game row for the caller to persist.
    pub fn to_game(&self, tournament_id: TournamentId) -> Game {
        Game::new(
            tournament_id,
            self.round,
            self.board,
            Some(self.white.clone()),
            self.black.clone(),
        )
    }

    /// Canonical one-line form used for fingerprints and plain-text output.
    pub fn canonical(&self) -> String {
        match &self.black {
            Some(black) => format!("{}:{}:{}-{}", self.round, self.board, self.white, black),
            None => format!("{}:{}:{}-bye", self.round, self.board, self.white),
        }
    }
}
