//! Pairing generators.
//!
//! Each generator is a pure function of the folded roster and the game log:
//! - **swiss**: rating-seeded first round, then score-ordered greedy matching
//! - **round_robin**: circle-method schedule
//! - **elimination**: fold-seeded bracket advancing winners

pub mod elimination;
pub mod round_robin;
pub mod swiss;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EntityId, Pairing, PlayerId, TournamentFormat, TournamentPlayer};

/// Errors that reject a pairing request outright.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairingError {
    #[error("Unsupported tournament format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid round number {0}: rounds start at 1")]
    InvalidRound(u32),

    #[error("Round {round} is outside the {total}-round schedule")]
    RoundOutOfRange { round: u32, total: u32 },
}

/// Pairings for one round plus anyone the generator could not place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundPairings {
    pub round: u32,
    pub pairings: Vec<Pairing>,

    /// Active players left out of the round; needs manual intervention
    #[serde(default)]
    pub unpaired: Vec<PlayerId>,
}

impl RoundPairings {
    pub fn empty(round: u32) -> Self {
        Self {
            round,
            pairings: Vec::new(),
            unpaired: Vec::new(),
        }
    }

    /// True when every active player was placed.
    pub fn is_complete(&self) -> bool {
        self.unpaired.is_empty()
    }

    pub fn byes(&self) -> impl Iterator<Item = &Pairing> {
        self.pairings.iter().filter(|p| p.is_bye())
    }

    /// Content hash of the round. Identical inputs always give the same
    /// fingerprint, so a caller can detect a duplicate round-advance.
    pub fn fingerprint(&self) -> EntityId {
        let mut lines: Vec<String> = self.pairings.iter().map(Pairing::canonical).collect();
        lines.extend(self.unpaired.iter().map(|id| format!("unpaired:{}", id)));
        let fields: Vec<&str> = lines.iter().map(String::as_str).collect();
        EntityId::generate(&fields)
    }
}

/// Collects a round's boards and numbers them densely on `finish`.
///
/// Two-player boards come first in insertion order, byes after them.
#[derive(Debug)]
pub(crate) struct RoundBuilder {
    round: u32,
    boards: Vec<(PlayerId, PlayerId)>,
    byes: Vec<PlayerId>,
    unpaired: Vec<PlayerId>,
}

impl RoundBuilder {
    pub(crate) fn new(round: u32) -> Self {
        Self {
            round,
            boards: Vec::new(),
            byes: Vec::new(),
            unpaired: Vec::new(),
        }
    }

    pub(crate) fn pair(&mut self, white: &PlayerId, black: &PlayerId) {
        self.boards.push((white.clone(), black.clone()));
    }

    pub(crate) fn bye(&mut self, player: &PlayerId) {
        self.byes.push(player.clone());
    }

    pub(crate) fn leave_unpaired(&mut self, player: &PlayerId) {
        self.unpaired.push(player.clone());
    }

    pub(crate) fn finish(self) -> RoundPairings {
        let round = self.round;
        let boards = self
            .boards
            .into_iter()
            .map(|(white, black)| (white, Some(black)))
            .chain(self.byes.into_iter().map(|player| (player, None)));

        let pairings = boards
            .enumerate()
            .map(|(i, (white, black))| Pairing {
                round,
                board: i as u32 + 1,
                white,
                black,
            })
            .collect();

        RoundPairings {
            round,
            pairings,
            unpaired: self.unpaired,
        }
    }
}

/// Seeding order: rating descending, then id ascending.
pub(crate) fn seed_order(a: &TournamentPlayer, b: &TournamentPlayer) -> Ordering {
    b.rating()
        .cmp(&a.rating())
        .then_with(|| a.id().cmp(b.id()))
}

/// Active players in seeding order.
pub(crate) fn seeded(players: &[TournamentPlayer]) -> Vec<&TournamentPlayer> {
    let mut active: Vec<&TournamentPlayer> = players.iter().filter(|p| p.is_active()).collect();
    active.sort_by(|a, b| seed_order(a, b));
    active
}

/// ceil(log2(n)), zero for n <= 1.
pub(crate) fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// Expected total number of rounds for a field of `player_count`.
pub fn estimate_rounds(format: TournamentFormat, player_count: usize) -> u32 {
    match format {
        TournamentFormat::Swiss => ceil_log2(player_count),
        TournamentFormat::RoundRobin => round_robin::round_count(player_count),
        TournamentFormat::SingleElimination => elimination::single_elimination_rounds(player_count),
        TournamentFormat::DoubleElimination => elimination::double_elimination_rounds(player_count),
    }
}
