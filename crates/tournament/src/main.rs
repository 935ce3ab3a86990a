//! Tournament CLI
//!
//! Run matches between Othello engines.

use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tournament::{EngineSpec, MatchRunner, TournamentConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Othello Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament match [<engine1> <engine2>] [options]");
    println!();
    println!("Options:");
    println!("  --games N, -g N      Number of games (default 10)");
    println!("  --deadline MS        Think time per move in ms (default 2000)");
    println!("  --max-plies N        Adjudicate on discs after N plies");
    println!("  --seed S             Seed the engines' random choices");
    println!("  --config FILE        Read settings from a TOML file first");
    println!("  --verbose, -v        Print every finished game");
    println!();
    println!("Engines:");
    println!("  negamax:<level>  - Alpha-beta search, level 1 (weak) to 6 (strong)");
    println!("  random           - Uniformly random legal moves");
    println!();
    println!("Examples:");
    println!("  tournament match negamax:4 random --games 20");
    println!("  tournament match negamax:2 negamax:5 --deadline 500");
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{flag} needs a value"))
}

fn parse_config(args: &[String]) -> Result<TournamentConfig> {
    // The file is the base layer; flags and positional specs override it.
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = value(args, i, "--config")?;
            TournamentConfig::load(Path::new(path))
                .with_context(|| format!("loading match config {path}"))?
        }
        None => TournamentConfig::default(),
    };

    let mut positional = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-g" => {
                config.games = value(args, i, "--games")?.parse().context("--games")?;
                i += 1;
            }
            "--deadline" | "-t" => {
                config.deadline_ms = value(args, i, "--deadline")?.parse().context("--deadline")?;
                i += 1;
            }
            "--max-plies" => {
                config.max_plies = value(args, i, "--max-plies")?.parse().context("--max-plies")?;
                i += 1;
            }
            "--seed" => {
                config.seed = Some(value(args, i, "--seed")?.parse().context("--seed")?);
                i += 1;
            }
            "--config" => i += 1,
            "--verbose" | "-v" => config.verbose = true,
            flag if flag.starts_with('-') => bail!("unknown option {flag}"),
            spec => positional.push(spec.to_string()),
        }
        i += 1;
    }

    match positional.as_slice() {
        [] => {}
        [engine1, engine2] => {
            config.engine1 = engine1.clone();
            config.engine2 = engine2.clone();
        }
        _ => bail!("match takes two engine specs, got {}", positional.len()),
    }

    config.validate()?;
    Ok(config)
}

fn run_match(args: &[String]) -> Result<()> {
    let config = parse_config(args)?;
    let (spec1, spec2): (EngineSpec, EngineSpec) = config.engine_specs()?;

    println!("=== Match: {spec1} vs {spec2} ===");
    println!(
        "Games: {}, Deadline: {} ms, Max plies: {}",
        config.games, config.deadline_ms, config.max_plies
    );
    println!();

    let (seed1, seed2) = config.engine_seeds();
    let mut engine1 = spec1.build(seed1);
    let mut engine2 = spec2.build(seed2);
    info!(engine1 = engine1.name(), engine2 = engine2.name(), "starting match");

    let runner = MatchRunner::new(config);
    let result = runner.run_match(engine1.as_mut(), engine2.as_mut());

    println!();
    println!("=== Final Result ===");
    println!(
        "{spec1}: {} wins, {} losses, {} draws",
        result.wins, result.losses, result.draws
    );
    println!("Discs: {}-{}", result.discs_for, result.discs_against);
    println!("Score: {:.1}%", result.score() * 100.0);
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "match" => run_match(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            bail!("unknown command: {other}")
        }
    }
}
