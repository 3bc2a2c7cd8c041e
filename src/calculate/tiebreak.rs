//! Buchholz and Sonneborn-Berger tiebreaks.
//!
//! Runs after `fold_stats` has settled every player's points. Only played
//! games count; byes and pending games add nothing to either score.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Color, Game, GameKind, PlayerId, TournamentPlayer};

/// Recompute Buchholz and Sonneborn-Berger for every player from scratch.
///
/// `points` must already be folded from the game log. Opponents missing from
/// `players` contribute nothing.
pub fn calculate_tiebreaks(players: &mut [TournamentPlayer], games: &[Game]) {
    let points: HashMap<PlayerId, f64> = players
        .iter()
        .map(|p| (p.id().clone(), p.points))
        .collect();
    let index: HashMap<PlayerId, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id().clone(), i))
        .collect();

    for player in players.iter_mut() {
        player.buchholz = 0.0;
        player.sonneborn_berger = 0.0;
    }

    for game in games {
        let GameKind::Played {
            white,
            black,
            result,
        } = game.kind()
        else {
            continue;
        };

        let winner = result.winning_color();
        for (me, opponent, color) in [(white, black, Color::White), (black, white, Color::Black)] {
            let Some(&i) = index.get(me) else {
                continue;
            };
            let opponent_points = points.get(opponent).copied().unwrap_or(0.0);
            let player = &mut players[i];

            player.buchholz += opponent_points;
            match winner {
                Some(c) if c == color => player.sonneborn_berger += opponent_points,
                Some(_) => {}
                None => player.sonneborn_berger += opponent_points / 2.0,
            }
        }
    }

    debug!("Computed tiebreaks for {} players", players.len());
}
