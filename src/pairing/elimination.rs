//! Knockout brackets.
//!
//! Round 1 fold-seeds the field by rating. Later rounds pair the previous
//! round's winners in board order. Double elimination follows the same single
//! lineage; there is no losers' bracket yet.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::{ceil_log2, seeded, RoundBuilder, RoundPairings};
use crate::models::{Game, GameResult, PlayerId, TournamentPlayer};

/// ceil(log2(n)) rounds.
pub fn single_elimination_rounds(player_count: usize) -> u32 {
    ceil_log2(player_count)
}

/// Approximated as twice the single-elimination rounds minus one.
pub fn double_elimination_rounds(player_count: usize) -> u32 {
    match single_elimination_rounds(player_count) {
        0 => 0,
        single => 2 * single - 1,
    }
}

/// Generate bracket pairings for `round` (1-based).
pub fn pair_round(players: &[TournamentPlayer], round: u32, games: &[Game]) -> RoundPairings {
    if round <= 1 {
        seed_bracket(players, round)
    } else {
        advance_winners(players, round, games)
    }
}

/// Rank i plays rank n-1-i; an odd field gives the lowest seed a bye.
fn seed_bracket(players: &[TournamentPlayer], round: u32) -> RoundPairings {
    let mut order = seeded(players);
    let mut builder = RoundBuilder::new(round);

    if order.len() % 2 == 1 {
        if let Some(lowest) = order.pop() {
            debug!("Round {}: bye to lowest seed {}", round, lowest.id());
            builder.bye(lowest.id());
        }
    }

    let n = order.len();
    for i in 0..n / 2 {
        let (high, low) = (order[i].id(), order[n - 1 - i].id());
        if i % 2 == 0 {
            builder.pair(high, low);
        } else {
            builder.pair(low, high);
        }
    }

    let result = builder.finish();
    info!("Bracket seeded: {} boards", result.pairings.len());
    result
}

fn advance_winners(players: &[TournamentPlayer], round: u32, games: &[Game]) -> RoundPairings {
    let active: HashSet<&PlayerId> = players
        .iter()
        .filter(|p| p.is_active())
        .map(|p| p.id())
        .collect();

    let mut previous: Vec<&Game> = games.iter().filter(|g| g.round == round - 1).collect();
    previous.sort_by_key(|g| g.board);

    let mut seen = HashSet::new();
    let mut winners: Vec<&PlayerId> = Vec::new();
    for game in previous {
        let Some(winner) = game.advancing_player() else {
            if game.result.is_none() {
                warn!(
                    "Round {} board {} has no result; nobody advances from it",
                    game.round, game.board
                );
            }
            continue;
        };
        if game.result == Some(GameResult::Draw) {
            warn!(
                "Round {} board {} was drawn; advancing white ({})",
                game.round, game.board, winner
            );
        }
        if !active.contains(winner) {
            debug!("Dropping {}: not an active player", winner);
            continue;
        }
        if seen.insert(winner) {
            winners.push(winner);
        }
    }

    let mut builder = RoundBuilder::new(round);
    if winners.len() <= 1 {
        info!(
            "Bracket complete after round {}: {} player(s) remain",
            round - 1,
            winners.len()
        );
        return builder.finish();
    }

    for pair in winners.chunks(2) {
        match pair {
            [first, second] if round % 2 == 1 => builder.pair(first, second),
            [first, second] => builder.pair(second, first),
            [last] => builder.bye(last),
            _ => {}
        }
    }

    let result = builder.finish();
    info!(
        "Bracket round {}: {} winners into {} boards",
        round,
        winners.len(),
        result.pairings.len()
    );
    result
}
