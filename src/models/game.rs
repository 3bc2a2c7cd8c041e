//! Game model: the historical record of one board in one round.

use serde::{Deserialize, Serialize};

use super::{Color, PlayerId, TournamentId};

/// Recorded outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    WhiteWin,
    BlackWin,
    Draw,
    Bye,
    /// White forfeited; black is credited the win.
    ForfeitWhite,
    /// Black forfeited; white is credited the win.
    ForfeitBlack,
}

impl GameResult {
    /// Colour credited with the win, if the result is decisive.
    pub fn winning_color(&self) -> Option<Color> {
        match self {
            GameResult::WhiteWin | GameResult::ForfeitBlack => Some(Color::White),
            GameResult::BlackWin | GameResult::ForfeitWhite => Some(Color::Black),
            GameResult::Draw | GameResult::Bye => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WhiteWin => write!(f, "1-0"),
            GameResult::BlackWin => write!(f, "0-1"),
            GameResult::Draw => write!(f, "1/2-1/2"),
            GameResult::Bye => write!(f, "bye"),
            GameResult::ForfeitWhite => write!(f, "-/+"),
            GameResult::ForfeitBlack => write!(f, "+/-"),
        }
    }
}

/// How a single game participates in standings and history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind<'a> {
    /// Both sides present with a recorded result.
    Played {
        white: &'a PlayerId,
        black: &'a PlayerId,
        result: GameResult,
    },
    /// One side present with a recorded result.
    Bye { player: &'a PlayerId },
    /// Pending, empty, or inconsistent record.
    Ignored,
}

/// A game row as supplied by the game-log provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub tournament_id: TournamentId,
    pub round: u32,
    pub white: Option<PlayerId>,
    pub black: Option<PlayerId>,

    /// `None` while the game is pending
    #[serde(default)]
    pub result: Option<GameResult>,

    pub board: u32,
}

impl Game {
    pub fn new(
        tournament_id: TournamentId,
        round: u32,
        board: u32,
        white: Option<PlayerId>,
        black: Option<PlayerId>,
    ) -> Self {
        Self {
            tournament_id,
            round,
            white,
            black,
            result: None,
            board,
        }
    }

    /// Builder method to record a result.
    pub fn with_result(mut self, result: GameResult) -> Self {
        self.result = Some(result);
        self
    }

    /// Classify the game for folding into standings.
    pub fn kind(&self) -> GameKind<'_> {
        let Some(result) = self.result else {
            return GameKind::Ignored;
        };
        match (&self.white, &self.black) {
            (Some(_), Some(_)) if result == GameResult::Bye => GameKind::Ignored,
            (Some(white), Some(black)) => GameKind::Played {
                white,
                black,
                result,
            },
            (Some(player), None) | (None, Some(player)) => GameKind::Bye { player },
            (None, None) => GameKind::Ignored,
        }
    }

    /// True when exactly one side is present, regardless of result.
    pub fn is_bye_slot(&self) -> bool {
        self.white.is_some() != self.black.is_some()
    }

    /// The side that advances in knockout play, if decided.
    ///
    /// A draw advances white. That rule is a placeholder carried over from the
    /// existing bracket behaviour and has no tiebreak game behind it.
    pub fn advancing_player(&self) -> Option<&PlayerId> {
        match self.kind() {
            GameKind::Played {
                white,
                black,
                result,
            } => match result.winning_color() {
                Some(Color::White) => Some(white),
                Some(Color::Black) => Some(black),
                None => Some(white),
            },
            GameKind::Bye { player } => Some(player),
            GameKind::Ignored => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(white: Option<&str>, black: Option<&str>, result: Option<GameResult>) -> Game {
        let mut g = Game::new(
            TournamentId::from("t1"),
            1,
            1,
            white.map(PlayerId::from),
            black.map(PlayerId::from),
        );
        g.result = result;
        g
    }

    #[test]
    fn test_pending_game_is_ignored() {
        let g = game(Some("a"), Some("b"), None);
        assert_eq!(g.kind(), GameKind::Ignored);
        assert_eq!(g.advancing_player(), None);
    }

    #[test]
    fn test_bye_either_side() {
        let a = PlayerId::from("a");
        assert_eq!(
            game(Some("a"), None, Some(GameResult::Bye)).kind(),
            GameKind::Bye { player: &a }
        );
        assert_eq!(
            game(None, Some("a"), Some(GameResult::Bye)).kind(),
            GameKind::Bye { player: &a }
        );
    }

    #[test]
    fn test_two_sided_bye_is_ignored() {
        let g = game(Some("a"), Some("b"), Some(GameResult::Bye));
        assert_eq!(g.kind(), GameKind::Ignored);
    }

    #[test]
    fn test_advancing_player() {
        let cases = [
            (GameResult::WhiteWin, "a"),
            (GameResult::BlackWin, "b"),
            (GameResult::Draw, "a"),
            (GameResult::ForfeitWhite, "b"),
            (GameResult::ForfeitBlack, "a"),
        ];
        for (result, expected) in cases {
            let g = game(Some("a"), Some("b"), Some(result));
            assert_eq!(
                g.advancing_player().map(|p| p.as_str()),
                Some(expected),
                "{:?}",
                result
            );
        }
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_string(&GameResult::ForfeitWhite).unwrap();
        assert_eq!(json, "\"forfeit_white\"");
        let parsed: Game = serde_json::from_str(
            r#"{"tournament_id":"t1","round":2,"white":"a","black":null,"board":4}"#,
        )
        .unwrap();
        assert_eq!(parsed.result, None);
        assert!(parsed.is_bye_slot());
    }
}
