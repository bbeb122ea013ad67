// Re-runs the move engine over a JSONL turn log written by the server's debug logger
//
// Usage:
//   cargo run --bin replay -- <log_file> (--all | --turns 3,7 | --validate 3:up,7:left|down)
//                            [--verbose] [--config Snake.toml]

use std::env;
use std::process;

use centerline_snake::config::Config;
use centerline_snake::replay::{LogEntry, ReplayEngine};
use centerline_snake::types::Direction;

enum Mode {
    All,
    Turns(Vec<i32>),
    Validate(Vec<(i32, Vec<Direction>)>),
}

struct Args {
    log_file: String,
    config_path: String,
    verbose: bool,
    mode: Mode,
}

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --validate <T:M,...>    Check logged moves (format: turn:move, alternatives with '|')");
    eprintln!("  --verbose               Show per-turn output");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(i32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let (turn, moves) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("Invalid format '{}'. Expected 'turn:move'", pair))?;

            let turn = turn
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", turn, e))?;

            let moves = moves
                .split('|')
                .map(|m| m.parse::<Direction>().map_err(|e| e.to_string()))
                .collect::<Result<Vec<_>, _>>()?;

            Ok((turn, moves))
        })
        .collect()
}

fn parse_args(raw: &[String]) -> Result<Args, String> {
    let log_file = raw.get(1).ok_or("Missing log file")?.clone();
    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut rest = raw.iter().skip(2);
    while let Some(arg) = rest.next() {
        let mut value = |flag: &str| {
            rest.next()
                .cloned()
                .ok_or_else(|| format!("{} requires an argument", flag))
        };
        match arg.as_str() {
            "--all" => mode = Some(Mode::All),
            "--turns" => mode = Some(Mode::Turns(parse_turns(&value("--turns")?)?)),
            "--validate" => {
                mode = Some(Mode::Validate(parse_expected_moves(&value("--validate")?)?))
            }
            "--config" => config_path = value("--config")?,
            "--verbose" => verbose = true,
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }

    let mode = mode.ok_or("Must specify --all, --turns, or --validate")?;
    Ok(Args {
        log_file,
        config_path,
        verbose,
        mode,
    })
}

fn run(args: Args) -> Result<(), String> {
    let config = Config::from_file(&args.config_path).unwrap_or_else(|e| {
        eprintln!("Warning: {}", e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Replay log file: {}", args.log_file);

    let engine = ReplayEngine::new(config, args.verbose);
    let entries: Vec<LogEntry> = engine
        .load_log_file(&args.log_file)
        .map_err(|e| e.to_string())?;

    if entries.is_empty() {
        return Err("Log file is empty".to_string());
    }

    match args.mode {
        Mode::All => {
            println!("Replaying all {} turns...", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Turns(turns) => {
            println!("Replaying {} specific turn(s)...", turns.len());
            let results = engine
                .replay_turns(&entries, &turns)
                .map_err(|e| e.to_string())?;
            engine.print_report(&results);
        }
        Mode::Validate(expected) => {
            println!("Validating {} expected move(s)...", expected.len());
            engine
                .validate_expected_moves(&entries, &expected)
                .map_err(|e| format!("✗ Validation failed: {}", e))?;
            println!("✓ All expected moves validated successfully!");
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let raw: Vec<String> = env::args().collect();
    if raw.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(0);
    }

    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
