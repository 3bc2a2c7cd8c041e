use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pairing_engine::config::EngineConfig;
use pairing_engine::storage::StorageConfig;
use pairing_engine::{
    PairingEngine, Player, PlayerId, RoundPairings, Standing, TournamentFormat,
};

#[derive(Parser)]
#[command(name = "pairing-engine")]
#[command(about = "Tournament pairing and standings engine")]
#[command(version)]
struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tournament directory holding roster.jsonl and games.jsonl
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate pairings for a round
    Pair {
        /// Tournament format (swiss, round_robin, single_elimination, double_elimination)
        #[arg(long)]
        format: TournamentFormat,

        /// Round to pair (1-based)
        #[arg(long)]
        round: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the standings table
    Standings {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Estimate the number of rounds for a field size
    Rounds {
        #[arg(long)]
        format: TournamentFormat,

        /// Number of players
        #[arg(long)]
        players: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => EngineConfig::default(),
    };

    // Initialize tracing; logs go to stderr so stdout stays clean for output
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting pairing-engine v{}", env!("CARGO_PKG_VERSION"));

    let engine = PairingEngine::new(config);

    match cli.command {
        Commands::Pair {
            format,
            round,
            json,
        } => {
            let storage = StorageConfig::new(cli.data_dir);
            let (roster, games) = storage.load().context("Failed to load tournament")?;

            let result = engine
                .generate_round(format, &roster, round, &games)
                .with_context(|| format!("Failed to pair round {}", round))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_pairings(&result, &roster);
            }

            if !result.is_complete() {
                tracing::warn!(
                    "{} player(s) could not be paired and need manual pairing",
                    result.unpaired.len()
                );
            }
        }

        Commands::Standings { json } => {
            let storage = StorageConfig::new(cli.data_dir);
            let (roster, games) = storage.load().context("Failed to load tournament")?;

            let standings = engine.standings(&roster, &games);

            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                print_standings(&standings);
            }
        }

        Commands::Rounds { format, players } => {
            println!("{}", engine.estimate_rounds(format, players));
        }
    }

    Ok(())
}

fn print_pairings(result: &RoundPairings, roster: &[Player]) {
    let names: HashMap<&PlayerId, &str> = roster
        .iter()
        .map(|p| (&p.id, p.name.as_str()))
        .collect();
    let name = |id: &PlayerId| names.get(id).copied().unwrap_or(id.as_str()).to_string();

    println!("\n=== Round {} ===", result.round);
    println!("{:>5}  {:<30} {:<30}", "Board", "White", "Black");
    println!("{}", "-".repeat(67));
    for pairing in &result.pairings {
        let black = match &pairing.black {
            Some(black) => name(black),
            None => "(bye)".to_string(),
        };
        println!("{:>5}  {:<30} {:<30}", pairing.board, name(&pairing.white), black);
    }
    for id in &result.unpaired {
        println!("{:>5}  {:<30} {:<30}", "-", name(id), "(unpaired)");
    }
    println!("\nFingerprint: {}", result.fingerprint());
}

fn print_standings(standings: &[Standing]) {
    println!("\n=== Standings ===");
    println!(
        "{:>4}  {:<30} {:>6} {:>8} {:>8} {:>8} {:>6}",
        "Rank", "Player", "Pts", "W-D-L", "Buch", "SB", "Rating"
    );
    println!("{}", "-".repeat(78));
    for standing in standings {
        let player = &standing.player;
        let marker = if player.withdrew { " (wd)" } else { "" };
        println!(
            "{:>4}  {:<30} {:>6.1} {:>8} {:>8.2} {:>8.2} {:>6}",
            standing.rank,
            format!("{}{}", player.player.name, marker),
            player.points,
            standing.record(),
            player.buchholz,
            player.sonneborn_berger,
            player.rating()
        );
    }
    println!();
}
