//! # Pairing Engine
//!
//! Deterministic pairings and standings for Swiss, round-robin and
//! elimination tournaments.
//!
//! ## Architecture
//!
//! - **models**: Roster, game log, pairing and standings types
//! - **calculate**: Stats fold, tiebreaks and standings order
//! - **pairing**: Swiss, round-robin and elimination generators
//! - **engine**: Facade dispatching by tournament format
//! - **config**: Scoring and pairing policy configuration
//! - **storage**: JSONL input files for the command-line harness
//!
//! The engine is a pure function of the roster and game log. Callers must
//! serialize round advancement per tournament themselves; the engine offers
//! no at-most-once guarantee.

pub mod calculate;
pub mod config;
pub mod engine;
pub mod models;
pub mod pairing;
pub mod storage;

pub use engine::PairingEngine;
pub use models::*;
pub use pairing::{PairingError, RoundPairings};
