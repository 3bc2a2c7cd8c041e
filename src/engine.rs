//! Pairing engine facade.
//!
//! Dispatches by tournament format and orchestrates standings. Every call
//! rebuilds its player aggregates from the roster and game log, so the
//! engine holds no tournament state and can be shared freely.

use tracing::{debug, info};

use crate::calculate;
use crate::config::EngineConfig;
use crate::models::{Game, Pairing, Player, Standing, TournamentFormat, TournamentPlayer};
use crate::pairing::{self, elimination, round_robin, swiss, PairingError, RoundPairings};

#[derive(Debug, Clone, Default)]
pub struct PairingEngine {
    config: EngineConfig,
}

impl PairingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fold the roster and log into fresh tournament aggregates, ordered by id.
    pub fn tournament_players(&self, roster: &[Player], games: &[Game]) -> Vec<TournamentPlayer> {
        calculate::fold_stats(roster, games, &self.config.scoring)
            .into_values()
            .collect()
    }

    /// Generate the next round, including anyone who could not be placed.
    pub fn generate_round(
        &self,
        format: TournamentFormat,
        roster: &[Player],
        round: u32,
        games: &[Game],
    ) -> Result<RoundPairings, PairingError> {
        if round == 0 {
            return Err(PairingError::InvalidRound(round));
        }

        let players = self.tournament_players(roster, games);
        if !players.iter().any(TournamentPlayer::is_active) {
            debug!("No active players; round {} is empty", round);
            return Ok(RoundPairings::empty(round));
        }

        let result = match format {
            TournamentFormat::Swiss => {
                swiss::pair_round(&players, round, games, self.config.swiss.bye_fallback)
            }
            TournamentFormat::RoundRobin => round_robin::round_pairings(&players, round)?,
            TournamentFormat::SingleElimination => elimination::pair_round(&players, round, games),
            TournamentFormat::DoubleElimination => {
                debug!("Double elimination follows the single bracket lineage");
                elimination::pair_round(&players, round, games)
            }
        };

        info!(
            "Generated {} round {}: {} pairings, {} unpaired",
            format,
            round,
            result.pairings.len(),
            result.unpaired.len()
        );
        Ok(result)
    }

    /// Generate the next round's pairings.
    pub fn generate_pairings(
        &self,
        format: TournamentFormat,
        roster: &[Player],
        round: u32,
        games: &[Game],
    ) -> Result<Vec<Pairing>, PairingError> {
        self.generate_round(format, roster, round, games)
            .map(|result| result.pairings)
    }

    /// Recompute Buchholz and Sonneborn-Berger in place.
    pub fn calculate_tiebreaks(&self, players: &mut [TournamentPlayer], games: &[Game]) {
        calculate::calculate_tiebreaks(players, games);
    }

    pub fn estimate_rounds(&self, format: TournamentFormat, player_count: usize) -> u32 {
        pairing::estimate_rounds(format, player_count)
    }

    /// Sort players by points, Buchholz, Sonneborn-Berger and rating.
    pub fn sort_standings(&self, players: &mut [TournamentPlayer]) {
        calculate::sort_standings(players);
    }

    /// Full standings table for the roster and game log.
    pub fn standings(&self, roster: &[Player], games: &[Game]) -> Vec<Standing> {
        calculate::compute_standings(roster, games, &self.config.scoring)
    }
}
