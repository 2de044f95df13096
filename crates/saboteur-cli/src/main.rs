//! Saboteur hotseat terminal game.

use anyhow::Context;
use saboteur_core::{
    clamp_player_count, CardId, GameConfig, GameObserver, GameOutcome, GameState, PlayerId, Target,
};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod command;
mod render;
mod session;

use command::Command;
use session::{Reply, Session};

/// Announces engine notifications on stdout
struct ConsoleObserver {
    names: Vec<String>,
}

impl ConsoleObserver {
    fn name(&self, player: PlayerId) -> &str {
        self.names.get(player).map_or("?", String::as_str)
    }
}

impl GameObserver for ConsoleObserver {
    fn turn_changed(&mut self, player: PlayerId) {
        println!("\n--- {}'s turn ---", self.name(player));
    }

    fn selection_changed(&mut self, card: Option<CardId>, targets: &[Target]) {
        if card.is_none() {
            println!("selection cleared");
        } else {
            info!(?card, targets = targets.len(), "card selected");
        }
    }

    fn game_ended(&mut self, outcome: &GameOutcome) {
        println!("\n=== The {} win! ===", outcome.winner.side_name());
        if let Some(gold) = outcome.gold {
            println!("Gold revealed: {gold}");
        }
    }
}

fn config_from_env() -> anyhow::Result<GameConfig> {
    let requested: usize = match std::env::var("SABOTEUR_PLAYERS") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("SABOTEUR_PLAYERS is not a number: {value}"))?,
        Err(_) => 4,
    };

    let count = clamp_player_count(requested);
    if count.clamped {
        warn!(requested, using = count.count, "player count out of range");
    }

    let mut config = GameConfig::new(count.count);
    if let Ok(value) = std::env::var("SABOTEUR_SEED") {
        let seed = value
            .parse()
            .with_context(|| format!("SABOTEUR_SEED is not a number: {value}"))?;
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = config_from_env()?;
    let debug = std::env::var("SABOTEUR_DEBUG").is_ok_and(|v| v == "1");
    if debug {
        warn!("debug mode: the state command prints hidden roles and hands");
    }
    let mut session = Session::new(GameState::new(config)).with_debug(debug);
    let names = session.game().players().iter().map(|p| p.name.clone()).collect();
    session.subscribe(Box::new(ConsoleObserver { names }));

    println!("{}", command::HELP);
    println!("\n{}", session.board());
    println!("{}", session.hand());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", session.prompt());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match session.execute(command) {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Done) => {}
            Ok(Reply::Quit) => break,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        }

        if session.is_finished() {
            println!("{}", session.board());
            break;
        }
        if matches!(
            command,
            Command::Play { .. } | Command::Target { .. } | Command::Discard { .. }
        ) {
            println!("{}", session.board());
            println!("{}", session.hand());
        }
    }

    info!("Goodbye");
    Ok(())
}
