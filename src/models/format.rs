//! Tournament format.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::pairing::PairingError;

/// Supported tournament formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    Swiss,
    RoundRobin,
    SingleElimination,
    /// Tracks a single advancing bracket; there is no losers' bracket.
    DoubleElimination,
}

impl FromStr for TournamentFormat {
    type Err = PairingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "swiss" => Ok(TournamentFormat::Swiss),
            "round_robin" => Ok(TournamentFormat::RoundRobin),
            "single_elimination" => Ok(TournamentFormat::SingleElimination),
            "double_elimination" => Ok(TournamentFormat::DoubleElimination),
            _ => Err(PairingError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentFormat::Swiss => write!(f, "swiss"),
            TournamentFormat::RoundRobin => write!(f, "round_robin"),
            TournamentFormat::SingleElimination => write!(f, "single_elimination"),
            TournamentFormat::DoubleElimination => write!(f, "double_elimination"),
        }
    }
}
