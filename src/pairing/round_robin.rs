//! Round-robin scheduling by the circle method.
//!
//! The whole cycle is generated from the seeded active field and a single
//! round is read out of it, so the schedule ignores results entirely.

use tracing::debug;

use super::{seeded, PairingError, RoundBuilder, RoundPairings};
use crate::models::{PlayerId, TournamentPlayer};

/// Number of rounds for a full cycle: n-1 for even fields, n for odd ones.
pub fn round_count(player_count: usize) -> u32 {
    match player_count {
        0 => 0,
        n if n % 2 == 0 => (n - 1) as u32,
        n => n as u32,
    }
}

/// Generate every round of the cycle up front.
///
/// Slot 0 is the anchor. After each round the last slot moves to index 1.
/// An odd field gets an empty slot; whoever meets it has a bye.
pub fn generate_full_schedule(players: &[TournamentPlayer]) -> Vec<RoundPairings> {
    let mut slots: Vec<Option<PlayerId>> = seeded(players)
        .into_iter()
        .map(|p| Some(p.id().clone()))
        .collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    let rounds = n.saturating_sub(1);
    let mut schedule = Vec::with_capacity(rounds);

    for r in 0..rounds {
        let round = r as u32 + 1;
        let mut builder = RoundBuilder::new(round);

        for i in 0..n / 2 {
            match (&slots[i], &slots[n - 1 - i]) {
                (Some(top), Some(bottom)) => {
                    let top_white = if i == 0 { r % 2 == 0 } else { true };
                    if top_white {
                        builder.pair(top, bottom);
                    } else {
                        builder.pair(bottom, top);
                    }
                }
                (Some(player), None) | (None, Some(player)) => builder.bye(player),
                (None, None) => {}
            }
        }

        schedule.push(builder.finish());

        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    debug!(
        "Generated round-robin schedule: {} rounds for {} slots",
        schedule.len(),
        n
    );
    schedule
}

/// Pairings for one round (1-based) of the cycle.
pub fn round_pairings(
    players: &[TournamentPlayer],
    round: u32,
) -> Result<RoundPairings, PairingError> {
    if round == 0 {
        return Err(PairingError::InvalidRound(round));
    }

    let mut schedule = generate_full_schedule(players);
    if schedule.is_empty() {
        return Ok(RoundPairings::empty(round));
    }

    let total = schedule.len() as u32;
    if round > total {
        return Err(PairingError::RoundOutOfRange { round, total });
    }

    Ok(schedule.swap_remove(round as usize - 1))
}
