// Re-runs a decision log through the current selection policy
//
//   replay battlesnake_debug.jsonl
//   replay battlesnake_debug.jsonl --turns 5,10 --verbose
//   replay battlesnake_debug.jsonl --validate 5:up,10:left|right

use std::path::PathBuf;
use std::process;

use clap::Parser;
use floodfill_snake::config::Config;
use floodfill_snake::replay::{load_log, render_report, Replayer};
use floodfill_snake::types::Direction;

#[derive(Debug, Parser)]
#[command(name = "replay", about = "Re-run logged Battlesnake decisions")]
struct Cli {
    /// JSONL decision log written with [debug] enabled
    log_file: PathBuf,

    /// Only replay these turns (comma-separated)
    #[arg(long = "turns", value_delimiter = ',')]
    turns: Vec<i32>,

    /// Replay these turns and require one of the listed moves, e.g. 5:up,10:left|right
    #[arg(long = "validate", value_delimiter = ',', value_parser = parse_expectation)]
    validate: Vec<Expectation>,

    /// Print the reachable area behind every direction for each turn
    #[arg(long = "verbose")]
    verbose: bool,

    /// Config whose [selection] policy is replayed
    #[arg(long = "config", default_value = "Snake.toml")]
    config: PathBuf,
}

#[derive(Debug, Clone)]
struct Expectation {
    turn: i32,
    moves: Vec<Direction>,
}

fn parse_expectation(s: &str) -> Result<Expectation, String> {
    let (turn, moves) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("'{}' is not turn:move", s))?;

    let turn = turn
        .parse::<i32>()
        .map_err(|e| format!("Invalid turn number '{}': {}", turn, e))?;
    let moves = moves
        .split('|')
        .map(|m| m.trim().parse::<Direction>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Expectation { turn, moves })
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::from_file(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: {} ({}), using defaults", e, cli.config.display());
        Config::default_hardcoded()
    });
    let replayer = Replayer::new(config.selection);

    let entries = match load_log(&cli.log_file) {
        Ok(entries) if entries.is_empty() => {
            eprintln!("Error: {} holds no decisions", cli.log_file.display());
            process::exit(1);
        }
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };
    println!("Loaded {} log entries", entries.len());

    if !cli.validate.is_empty() {
        let expected: Vec<(i32, Vec<Direction>)> = cli
            .validate
            .into_iter()
            .map(|e| (e.turn, e.moves))
            .collect();

        match replayer.check_expectations(&entries, &expected) {
            Ok(()) => println!("✓ {} expected move(s) reproduced", expected.len()),
            Err(e) => {
                eprintln!("✗ Validation failed: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let turns = if cli.turns.is_empty() {
        None
    } else {
        Some(cli.turns.as_slice())
    };

    match replayer.replay_log(&entries, turns) {
        Ok(replays) => print!("{}", render_report(&replays, cli.verbose)),
        Err(e) => {
            eprintln!("Error during replay: {}", e);
            process::exit(1);
        }
    }
}
