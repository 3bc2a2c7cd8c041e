//! Swiss system pairing.
//!
//! Round 1 splits the rating-seeded field into halves and plays the top half
//! against the bottom half. Later rounds walk the field in score order and
//! pair each player with the nearest unpaired player they have not met,
//! balancing colours from the game history.
//!
//! In an odd field the bye is settled before matching: it goes to the lowest
//! ranked player who has not had one, skipping candidates whose absence would
//! force a rematch. Only when every player already had a bye does the
//! configured `ByeFallback` decide between a second bye and leaving the
//! player unpaired.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use super::{seeded, RoundBuilder, RoundPairings};
use crate::config::ByeFallback;
use crate::models::{color_balance, Color, Game, GameKind, PlayerId, TournamentPlayer};

/// Opponent, colour and bye history rebuilt from the game log.
#[derive(Debug, Default)]
pub struct SwissHistory {
    opponents: HashMap<PlayerId, HashSet<PlayerId>>,
    colors: HashMap<PlayerId, Vec<Color>>,
    byes: HashSet<PlayerId>,
}

impl SwissHistory {
    pub fn from_games(games: &[Game]) -> Self {
        let mut history = Self::default();

        for game in games {
            if game.is_bye_slot() {
                if let Some(player) = game.white.as_ref().or(game.black.as_ref()) {
                    history.byes.insert(player.clone());
                }
            }

            if let GameKind::Played { white, black, .. } = game.kind() {
                history
                    .opponents
                    .entry(white.clone())
                    .or_default()
                    .insert(black.clone());
                history
                    .opponents
                    .entry(black.clone())
                    .or_default()
                    .insert(white.clone());
                history
                    .colors
                    .entry(white.clone())
                    .or_default()
                    .push(Color::White);
                history
                    .colors
                    .entry(black.clone())
                    .or_default()
                    .push(Color::Black);
            }
        }

        history
    }

    pub fn have_met(&self, a: &PlayerId, b: &PlayerId) -> bool {
        self.opponents.get(a).is_some_and(|set| set.contains(b))
    }

    pub fn had_bye(&self, player: &PlayerId) -> bool {
        self.byes.contains(player)
    }

    /// Whites minus blacks.
    pub fn color_balance(&self, player: &PlayerId) -> i32 {
        self.colors
            .get(player)
            .map(|colors| color_balance(colors))
            .unwrap_or(0)
    }

    /// Order a pair as (white, black). The player further from an even colour
    /// split gets the colour that evens them out; ties give `first` white.
    pub fn assign_colors<'a>(
        &self,
        first: &'a PlayerId,
        second: &'a PlayerId,
    ) -> (&'a PlayerId, &'a PlayerId) {
        let a = self.color_balance(first);
        let b = self.color_balance(second);

        match a.abs().cmp(&b.abs()) {
            Ordering::Greater if a > 0 => (second, first),
            Ordering::Less if b < 0 => (second, first),
            _ => (first, second),
        }
    }
}

/// Score order for rounds after the first: points, then rating, both
/// descending, then id ascending.
fn score_order(a: &TournamentPlayer, b: &TournamentPlayer) -> Ordering {
    b.points
        .total_cmp(&a.points)
        .then_with(|| b.rating().cmp(&a.rating()))
        .then_with(|| a.id().cmp(b.id()))
}

/// Generate Swiss pairings for `round` (1-based).
pub fn pair_round(
    players: &[TournamentPlayer],
    round: u32,
    games: &[Game],
    fallback: ByeFallback,
) -> RoundPairings {
    if round <= 1 {
        first_round(players, round)
    } else {
        later_round(players, round, games, fallback)
    }
}

fn first_round(players: &[TournamentPlayer], round: u32) -> RoundPairings {
    let mut order = seeded(players);
    let mut builder = RoundBuilder::new(round);

    if order.len() % 2 == 1 {
        if let Some(lowest) = order.pop() {
            debug!("Round {}: bye to lowest seed {}", round, lowest.id());
            builder.bye(lowest.id());
        }
    }

    let half = order.len() / 2;
    let (top, bottom) = order.split_at(half);
    for (board, (high, low)) in top.iter().zip(bottom).enumerate() {
        if board % 2 == 0 {
            builder.pair(high.id(), low.id());
        } else {
            builder.pair(low.id(), high.id());
        }
    }

    let result = builder.finish();
    info!(
        "Swiss round {}: {} boards from {} seeded players",
        round,
        result.pairings.len(),
        players.iter().filter(|p| p.is_active()).count()
    );
    result
}

fn later_round(
    players: &[TournamentPlayer],
    round: u32,
    games: &[Game],
    fallback: ByeFallback,
) -> RoundPairings {
    let history = SwissHistory::from_games(games);
    let mut ranked: Vec<&TournamentPlayer> = players.iter().filter(|p| p.is_active()).collect();
    ranked.sort_by(|a, b| score_order(a, b));
    let mut order: Vec<&PlayerId> = ranked.into_iter().map(|p| p.id()).collect();

    let mut builder = RoundBuilder::new(round);
    let mut exhausted = None;

    if order.len() % 2 == 1 {
        match choose_bye(&order, &history) {
            Some(i) => {
                let player = order.remove(i);
                debug!("Round {}: bye to {}", round, player);
                builder.bye(player);
            }
            None => exhausted = order.pop(),
        }
    }

    let matching = match_players(&order, &history, Some(fallback), round)
        .expect("matching with a fallback always completes");
    for (white, black) in matching.pairs {
        builder.pair(white, black);
    }
    for player in matching.unpaired {
        builder.leave_unpaired(player);
    }

    if let Some(player) = exhausted {
        match fallback {
            ByeFallback::RepeatPairing => {
                warn!(
                    "Round {}: granting {} a second bye (every player has had one)",
                    round, player
                );
                builder.bye(player);
            }
            ByeFallback::LeaveUnpaired => {
                warn!(
                    "Round {}: leaving {} unpaired; every player has had a bye",
                    round, player
                );
                builder.leave_unpaired(player);
            }
        }
    }

    let result = builder.finish();
    info!(
        "Swiss round {}: {} boards, {} unpaired",
        round,
        result.pairings.len(),
        result.unpaired.len()
    );
    result
}

/// Index of the bye recipient in an odd field, or `None` when everyone has
/// already had a bye.
///
/// Candidates are players without a bye, lowest ranked first. The first
/// candidate whose removal lets the rest pair without a rematch wins; failing
/// that, the lowest ranked candidate takes the bye anyway.
fn choose_bye(order: &[&PlayerId], history: &SwissHistory) -> Option<usize> {
    let mut candidates = (0..order.len())
        .rev()
        .filter(|&i| !history.had_bye(order[i]));
    let lowest = candidates.next()?;

    let pairs_cleanly = |i: usize| match_players(&without(order, i), history, None, 0).is_some();
    if pairs_cleanly(lowest) {
        return Some(lowest);
    }
    candidates.find(|&i| pairs_cleanly(i)).or(Some(lowest))
}

fn without<'a>(order: &[&'a PlayerId], skip: usize) -> Vec<&'a PlayerId> {
    order
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != skip)
        .map(|(_, id)| *id)
        .collect()
}

#[derive(Debug, Default)]
struct Matching<'a> {
    pairs: Vec<(&'a PlayerId, &'a PlayerId)>,
    unpaired: Vec<&'a PlayerId>,
}

/// Greedy score-order matching: each player takes the nearest unpaired
/// player below them they have not met.
///
/// With no fallback the first player left without an unplayed opponent
/// aborts the matching.
fn match_players<'a>(
    order: &[&'a PlayerId],
    history: &SwissHistory,
    fallback: Option<ByeFallback>,
    round: u32,
) -> Option<Matching<'a>> {
    let mut matching = Matching::default();
    let mut paired = vec![false; order.len()];

    for i in 0..order.len() {
        if paired[i] {
            continue;
        }
        paired[i] = true;
        let me = order[i];

        let fresh = (i + 1..order.len()).find(|&j| !paired[j] && !history.have_met(me, order[j]));
        if let Some(j) = fresh {
            paired[j] = true;
            matching.pairs.push(history.assign_colors(me, order[j]));
            continue;
        }

        match fallback? {
            ByeFallback::RepeatPairing => match (i + 1..order.len()).find(|&j| !paired[j]) {
                Some(j) => {
                    paired[j] = true;
                    warn!(
                        "Round {}: forcing repeat pairing {} vs {} (no unplayed opponent left)",
                        round, me, order[j]
                    );
                    matching.pairs.push(history.assign_colors(me, order[j]));
                }
                None => matching.unpaired.push(me),
            },
            ByeFallback::LeaveUnpaired => {
                warn!(
                    "Round {}: leaving {} unpaired; manual pairing required",
                    round, me
                );
                matching.unpaired.push(me);
            }
        }
    }

    Some(matching)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameResult, Player};
    use crate::pairing::test_support::{assert_well_formed, boards, field, ids, record};
    use pretty_assertions::assert_eq;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(w, b)| (w.to_string(), b.to_string()))
            .collect()
    }

    /// Fold points for the Swiss generator the same way the engine does.
    fn with_points(players: &[TournamentPlayer], games: &[Game]) -> Vec<TournamentPlayer> {
        let roster: Vec<Player> = players.iter().map(|p| p.player.clone()).collect();
        crate::calculate::fold_stats(&roster, games, &Default::default())
            .into_values()
            .collect()
    }

    /// Play `rounds` Swiss rounds with a fixed result rule.
    fn simulate(
        n: usize,
        rounds: u32,
        result: impl Fn(&PlayerId, &PlayerId) -> GameResult,
    ) -> (Vec<RoundPairings>, Vec<Game>) {
        let base = field(n);
        let mut games: Vec<Game> = Vec::new();
        let mut generated = Vec::new();
        for round in 1..=rounds {
            let players = with_points(&base, &games);
            let pairings = pair_round(&players, round, &games, ByeFallback::RepeatPairing);
            games.extend(record(&pairings, &result));
            generated.push(pairings);
        }
        (generated, games)
    }

    #[test]
    fn test_first_round_top_half_vs_bottom_half() {
        let round = pair_round(&field(4), 1, &[], ByeFallback::default());

        assert_eq!(boards(&round), pairs(&[("p1", "p3"), ("p4", "p2")]));
        assert_well_formed(&round);
    }

    #[test]
    fn test_first_round_odd_gives_lowest_seed_bye() {
        let round = pair_round(&field(5), 1, &[], ByeFallback::default());

        assert_eq!(
            boards(&round),
            pairs(&[("p1", "p3"), ("p4", "p2"), ("p5", "-")])
        );
        assert_eq!(round.pairings[2].board, 3);
    }

    #[test]
    fn test_first_round_ignores_withdrawn() {
        let mut players = field(4);
        players[3].withdrew = true;

        let round = pair_round(&players, 1, &[], ByeFallback::default());

        assert_eq!(boards(&round), pairs(&[("p1", "p2"), ("p3", "-")]));
    }

    #[test]
    fn test_empty_field() {
        let round = pair_round(&[], 3, &[], ByeFallback::default());
        assert!(round.pairings.is_empty());
        assert!(round.is_complete());
    }

    #[test]
    fn test_later_round_avoids_rematch() {
        let base = field(4);
        let first = pair_round(&base, 1, &[], ByeFallback::default());
        // Higher seed wins every game: p1 and p2 lead on 1 point.
        let games = record(&first, |w, b| {
            if w < b {
                GameResult::WhiteWin
            } else {
                GameResult::BlackWin
            }
        });

        let players = with_points(&base, &games);
        let round = pair_round(&players, 2, &games, ByeFallback::default());

        // p1 balance +1 and p2 -1 tie on magnitude: p1 keeps white.
        assert_eq!(boards(&round), pairs(&[("p1", "p2"), ("p3", "p4")]));
        assert_well_formed(&round);
    }

    #[test]
    fn test_colors_rebalance_lopsided_player() {
        let history = SwissHistory::from_games(&[
            Game::new("t1".into(), 1, 1, Some("a".into()), Some("x".into()))
                .with_result(GameResult::Draw),
            Game::new("t1".into(), 2, 1, Some("a".into()), Some("y".into()))
                .with_result(GameResult::Draw),
            Game::new("t1".into(), 2, 2, Some("b".into()), Some("z".into()))
                .with_result(GameResult::Draw),
        ]);
        let (a, b, c, x) = (
            PlayerId::from("a"),
            PlayerId::from("b"),
            PlayerId::from("c"),
            PlayerId::from("x"),
        );

        assert_eq!(history.color_balance(&a), 2);
        // a is further from even and had white twice: a gets black.
        assert_eq!(history.assign_colors(&a, &b), (&b, &a));
        // x had black once and c nothing: x gets white even as second.
        assert_eq!(history.assign_colors(&c, &x), (&x, &c));
        // b at +1 and x at -1 tie on magnitude: first player keeps white.
        assert_eq!(history.assign_colors(&b, &x), (&b, &x));
    }

    #[test]
    fn test_history_ignores_pending_and_tracks_bye_slots() {
        let history = SwissHistory::from_games(&[
            Game::new("t1".into(), 1, 1, Some("a".into()), Some("b".into())),
            Game::new("t1".into(), 1, 2, None, Some("c".into())),
        ]);

        assert!(!history.have_met(&"a".into(), &"b".into()));
        assert_eq!(history.color_balance(&"a".into()), 0);
        assert!(history.had_bye(&"c".into()));
    }

    #[test]
    fn test_eight_player_event_never_repeats() {
        // Lower id always wins.
        let (rounds, games) = simulate(8, 4, |w, b| {
            if w < b {
                GameResult::WhiteWin
            } else {
                GameResult::BlackWin
            }
        });

        for round in &rounds {
            assert_well_formed(round);
            assert_eq!(round.pairings.len(), 4);
            assert_eq!(round.byes().count(), 0);
        }

        let mut met = HashSet::new();
        for game in &games {
            if let (Some(w), Some(b)) = (&game.white, &game.black) {
                let key = if w < b { (w.clone(), b.clone()) } else { (b.clone(), w.clone()) };
                assert!(met.insert(key), "{} and {} met twice", w, b);
            }
        }
    }

    #[test]
    fn test_seven_player_event_byes_are_unique() {
        let (rounds, _) = simulate(7, 5, |_, _| GameResult::WhiteWin);

        let mut bye_recipients = HashSet::new();
        for round in &rounds {
            assert_well_formed(round);
            assert!(round.is_complete());
            let byes: Vec<_> = round.byes().collect();
            assert_eq!(byes.len(), 1);
            assert!(bye_recipients.insert(byes[0].white.clone()));
        }
        assert_eq!(bye_recipients.len(), 5);
    }

    #[test]
    fn test_deterministic_output() {
        let (first, _) = simulate(9, 4, |_, _| GameResult::Draw);
        let (second, _) = simulate(9, 4, |_, _| GameResult::Draw);

        assert_eq!(first, second);
        let prints: Vec<_> = first.iter().map(RoundPairings::fingerprint).collect();
        let again: Vec<_> = second.iter().map(RoundPairings::fingerprint).collect();
        assert_eq!(prints, again);
    }

    /// Play rounds 1 and 2 of a five-player event where p5 and p4 take the
    /// first two byes.
    fn five_player_log() -> (Vec<TournamentPlayer>, Vec<Game>) {
        let base = field(5);
        let mut games: Vec<Game> = Vec::new();

        let first = pair_round(&base, 1, &games, ByeFallback::default());
        assert_eq!(
            boards(&first),
            pairs(&[("p1", "p3"), ("p4", "p2"), ("p5", "-")])
        );
        games.extend(record(&first, |w, _| {
            if w.as_str() == "p1" {
                GameResult::WhiteWin
            } else {
                GameResult::BlackWin
            }
        }));

        let players = with_points(&base, &games);
        let second = pair_round(&players, 2, &games, ByeFallback::default());
        assert_eq!(
            boards(&second),
            pairs(&[("p1", "p2"), ("p3", "p5"), ("p4", "-")])
        );
        games.extend(record(&second, |w, _| {
            if w.as_str() == "p1" {
                GameResult::Draw
            } else {
                GameResult::WhiteWin
            }
        }));

        (with_points(&base, &games), games)
    }

    #[test]
    fn test_bye_goes_to_player_without_one() {
        let (players, games) = five_player_log();

        // p5 is ranked last but already had a bye; p3 is the lowest without one.
        for fallback in [ByeFallback::RepeatPairing, ByeFallback::LeaveUnpaired] {
            let round = pair_round(&players, 3, &games, fallback);

            assert_eq!(
                boards(&round),
                pairs(&[("p4", "p1"), ("p2", "p5"), ("p3", "-")])
            );
            assert!(round.is_complete());
            assert_well_formed(&round);
        }
    }

    #[test]
    fn test_bye_skips_candidate_that_forces_rematch() {
        let (rounds, games) = simulate(5, 3, |_, _| GameResult::BlackWin);

        // p2 is the lowest ranked player without a bye, but sitting p2 out
        // leaves p1 facing p5 again. p1 takes the bye instead.
        assert_eq!(
            boards(&rounds[2]),
            pairs(&[("p3", "p4"), ("p2", "p5"), ("p1", "-")])
        );

        let earlier: Vec<Game> = games.into_iter().filter(|g| g.round < 3).collect();
        let history = SwissHistory::from_games(&earlier);
        for pairing in &rounds[2].pairings {
            if let Some(black) = &pairing.black {
                assert!(!history.have_met(&pairing.white, black));
            }
        }
    }

    #[test]
    fn test_byes_unique_across_mixed_results() {
        for n in [5, 7, 9, 11, 13] {
            let rounds = crate::pairing::ceil_log2(n);
            // Result depends on the pair so every score group mixes.
            let (generated, _) = simulate(n, rounds, |w, b| {
                let seed: usize = w
                    .as_str()
                    .bytes()
                    .chain(b.as_str().bytes())
                    .map(usize::from)
                    .sum();
                match seed % 3 {
                    0 => GameResult::WhiteWin,
                    1 => GameResult::BlackWin,
                    _ => GameResult::Draw,
                }
            });

            let mut recipients = HashSet::new();
            for round in &generated {
                assert_well_formed(round);
                assert!(round.is_complete());
                for bye in round.byes() {
                    assert!(
                        recipients.insert(bye.white.clone()),
                        "n = {}: {} had two byes",
                        n,
                        bye.white
                    );
                }
            }
        }
    }

    fn three_player_log() -> (Vec<TournamentPlayer>, Vec<Game>) {
        let base: Vec<TournamentPlayer> = [("a", 2000), ("b", 1900), ("c", 1800)]
            .into_iter()
            .map(|(id, rating)| TournamentPlayer::new(Player::new(id, id, rating)))
            .collect();
        let mut games: Vec<Game> = Vec::new();
        for round in 1..=3 {
            let players = with_points(&base, &games);
            let pairings = pair_round(&players, round, &games, ByeFallback::RepeatPairing);
            games.extend(record(&pairings, |_, _| GameResult::WhiteWin));
        }
        (with_points(&base, &games), games)
    }

    #[test]
    fn test_three_player_bye_rotation() {
        let (_, games) = three_player_log();
        let byes: Vec<_> = games
            .iter()
            .filter(|g| g.is_bye_slot())
            .map(|g| (g.round, g.white.clone()))
            .collect();

        assert_eq!(
            byes,
            vec![
                (1, Some(PlayerId::from("c"))),
                (2, Some(PlayerId::from("b"))),
                (3, Some(PlayerId::from("a"))),
            ]
        );
    }

    #[test]
    fn test_exhausted_bye_forces_repeat() {
        let (players, games) = three_player_log();

        let round = pair_round(&players, 4, &games, ByeFallback::RepeatPairing);

        // c leads with 3 points and +2 colour balance, so takes black.
        assert_eq!(boards(&round), pairs(&[("a", "c"), ("b", "-")]));
        assert!(round.is_complete());
        assert_well_formed(&round);
    }

    #[test]
    fn test_exhausted_bye_left_unpaired() {
        let (players, games) = three_player_log();

        let round = pair_round(&players, 4, &games, ByeFallback::LeaveUnpaired);

        assert!(round.pairings.is_empty());
        assert_eq!(round.unpaired, ids(&["c", "a", "b"]));
        assert!(!round.is_complete());
    }
}
