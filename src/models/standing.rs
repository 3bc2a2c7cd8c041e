//! Ranked standings rows.
//!
//! Built by `calculate::rank_standings` from an already sorted player list.

use serde::{Deserialize, Serialize};

use super::TournamentPlayer;

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position after the tiebreak sort
    pub rank: u32,
    pub player: TournamentPlayer,
}

impl Standing {
    /// Wins/draws/losses in the usual `W-D-L` notation.
    pub fn record(&self) -> String {
        format!(
            "{}-{}-{}",
            self.player.wins, self.player.draws, self.player.losses
        )
    }
}
