//! Standings calculation.
//!
//! Pure reductions over the game log:
//! - Per-player points, record and history (`fold_stats`)
//! - Buchholz and Sonneborn-Berger tiebreaks
//! - Deterministic standings order and ranking

mod tiebreak;

pub use tiebreak::*;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::models::{Color, Game, GameKind, Player, PlayerId, Standing, TournamentPlayer};

/// Fold the game log into per-player aggregates in a single pass.
///
/// Every roster entry appears in the result, withdrawn players included.
/// Pending games contribute nothing.
pub fn fold_stats(
    roster: &[Player],
    games: &[Game],
    scoring: &ScoringConfig,
) -> BTreeMap<PlayerId, TournamentPlayer> {
    let mut stats: BTreeMap<PlayerId, TournamentPlayer> = roster
        .iter()
        .map(|p| (p.id.clone(), TournamentPlayer::new(p.clone())))
        .collect();

    for game in games {
        match game.kind() {
            GameKind::Played {
                white,
                black,
                result,
            } => {
                let winner = result.winning_color();
                for (me, opponent, color) in
                    [(white, black, Color::White), (black, white, Color::Black)]
                {
                    let Some(player) = stats.get_mut(me) else {
                        continue;
                    };
                    player.opponents.push(opponent.clone());
                    player.colors.push(color);
                    player.games_played += 1;
                    match winner {
                        Some(c) if c == color => {
                            player.wins += 1;
                            player.points += scoring.win;
                        }
                        Some(_) => {
                            player.losses += 1;
                            player.points += scoring.loss;
                        }
                        None => {
                            player.draws += 1;
                            player.points += scoring.draw;
                        }
                    }
                }
            }
            GameKind::Bye { player } => {
                if let Some(player) = stats.get_mut(player) {
                    player.wins += 1;
                    player.games_played += 1;
                    player.points += scoring.bye;
                }
            }
            GameKind::Ignored => {
                if game.result.is_some() {
                    warn!(
                        "Ignoring inconsistent game record in round {} board {}",
                        game.round, game.board
                    );
                }
            }
        }
    }

    debug!(
        "Folded {} games into {} player aggregates",
        games.len(),
        stats.len()
    );
    stats
}

/// Standings order: points, Buchholz, Sonneborn-Berger and rating, all
/// descending, then player id ascending.
pub fn standings_order(a: &TournamentPlayer, b: &TournamentPlayer) -> Ordering {
    b.points
        .total_cmp(&a.points)
        .then_with(|| b.buchholz.total_cmp(&a.buchholz))
        .then_with(|| b.sonneborn_berger.total_cmp(&a.sonneborn_berger))
        .then_with(|| b.rating().cmp(&a.rating()))
        .then_with(|| a.id().cmp(b.id()))
}

/// Sort players into standings order.
pub fn sort_standings(players: &mut [TournamentPlayer]) {
    players.sort_by(standings_order);
}

/// Assign 1-based ranks to an already sorted list.
pub fn rank_standings(players: Vec<TournamentPlayer>) -> Vec<Standing> {
    players
        .into_iter()
        .enumerate()
        .map(|(i, player)| Standing {
            rank: i as u32 + 1,
            player,
        })
        .collect()
}

/// Fold, compute tiebreaks, sort and rank.
pub fn compute_standings(
    roster: &[Player],
    games: &[Game],
    scoring: &ScoringConfig,
) -> Vec<Standing> {
    let mut players: Vec<TournamentPlayer> =
        fold_stats(roster, games, scoring).into_values().collect();
    calculate_tiebreaks(&mut players, games);
    sort_standings(&mut players);
    rank_standings(players)
}
