//! Terminal driver: a human against the negamax engine.
//!
//! ```bash
//! cargo run -p othello_cli -- --human white --config engine.toml
//! ```

use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use negamax_engine::{EngineConfig, SearchEngine};
use othello_core::{BoardEvent, GameSession, Pos, Stone};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

struct Options {
    engine: EngineConfig,
    human: Stone,
}

fn print_usage() {
    println!("Usage: othello [--config engine.toml] [--human black|white] [--level N]");
    println!();
    println!("Commands during play:");
    println!("  d3      place a disc (column a-h, row 1-8)");
    println!("  pass    pass when you have no legal move");
    println!("  undo    take back your last move");
    println!("  moves   list your legal moves");
    println!("  quit    leave the game");
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut engine = EngineConfig::default();
    let mut human = Stone::Black;
    let mut level = None;

    let mut i = 0;
    while i < args.len() {
        let value = || {
            args.get(i + 1)
                .with_context(|| format!("{} needs a value", args[i]))
        };
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = value()?;
                engine = EngineConfig::load(Path::new(path))
                    .with_context(|| format!("loading engine config {path}"))?;
                i += 1;
            }
            "--human" => {
                human = match value()?.to_ascii_lowercase().as_str() {
                    "black" | "b" => Stone::Black,
                    "white" | "w" => Stone::White,
                    other => bail!("--human expects black or white, got {other}"),
                };
                i += 1;
            }
            "--level" | "-l" => {
                level = Some(value()?.parse().context("--level")?);
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument {other}"),
        }
        i += 1;
    }

    if let Some(level) = level {
        engine.difficulty = level;
    }
    Ok(Some(Options { engine, human }))
}

fn print_board(session: &GameSession) {
    println!();
    println!("  a b c d e f g h");
    for (row, line) in session.board().to_string().lines().enumerate() {
        let cells: Vec<String> = line.chars().map(String::from).collect();
        println!("{} {}", row + 1, cells.join(" "));
    }
    let (black, white) = session.get_score();
    println!("Black {black} - White {white}");
}

fn drain_events(events: &mut UnboundedReceiver<BoardEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            BoardEvent::StonePlaced { pos, color } => println!("{color} plays {pos}"),
            BoardEvent::StonesFlipped { positions, to } if !positions.is_empty() => {
                let cells: Vec<String> = positions.iter().map(Pos::to_string).collect();
                println!("  flipped to {to}: {}", cells.join(" "));
            }
            BoardEvent::StonesFlipped { .. } => {}
            BoardEvent::ScoreChanged { black, white } => debug!(black, white, "score"),
        }
    }
}

fn print_result(session: &GameSession) {
    let (black, white) = session.get_score();
    match session.board().winner() {
        Some(color) => println!("Game over: {color} wins {black}-{white}"),
        None => println!("Game over: draw {black}-{white}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };
    options.engine.validate()?;

    let human = options.human;
    let ai = human.opponent();
    let level = options.engine.difficulty;
    let engine = SearchEngine::new(options.engine);
    info!(%human, level, deadline_ms = engine.config().deadline_ms, "new game");

    let mut session = GameSession::new();
    let (tx, mut events) = mpsc::unbounded_channel();
    session.subscribe(move |event| {
        // Receiver lives until main returns
        let _ = tx.send(event.clone());
    });
    session.initialize();
    drain_events(&mut events);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if session.is_game_over() {
            print_board(&session);
            print_result(&session);
            break;
        }

        let side = session.side_to_move();
        if side == ai {
            let mv = engine.best_move(&session.snapshot(), ai, level).await?;
            if !session.play(mv) {
                bail!("engine returned an unplayable move {mv}");
            }
            if mv.pos().is_none() {
                println!("{ai} passes");
            }
            drain_events(&mut events);
            continue;
        }

        print_board(&session);
        print!("{human} to move> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "" => {}
            "quit" | "q" | "exit" => break,
            "help" | "?" => print_usage(),
            "moves" => {
                let moves: Vec<String> =
                    session.valid_moves(human).iter().map(Pos::to_string).collect();
                println!("Legal: {}", moves.join(" "));
            }
            "pass" => {
                if !session.pass() {
                    println!("You have a legal move; passing is not allowed.");
                }
            }
            "undo" => {
                // Take back the engine's replies as well as the human move
                let before = session.board().history_len();
                while session.board().history_len() > 0 {
                    session.undo();
                    if session.side_to_move() == human {
                        break;
                    }
                }
                if session.board().history_len() == before {
                    println!("Nothing to undo.");
                }
                drain_events(&mut events);
            }
            text => match Pos::parse(text) {
                Some(pos) if session.place_stone(pos, human) => drain_events(&mut events),
                Some(pos) => println!("{pos} is not a legal move."),
                None => println!("Unrecognized input '{text}'. Type 'help' for commands."),
            },
        }
    }

    Ok(())
}
