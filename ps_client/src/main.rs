//! A plain terminal client for the poker viewer sync engine.
//!
//! Connects to a room, prints every view command as a text line, and turns
//! stdin commands into player intents. One process, one connection, one
//! session; when the server closes the connection the session is torn down
//! and the process exits.

use anyhow::{Context, Result};
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use poker_sync::interaction::{CHECK_BET, FOLD_BET};
use poker_sync::session::{LocalPlayer, SessionContext};
use poker_sync::{PlayerIntent, ViewCommand, run_session};

mod display;

const HELP: &str = "\
Connect to a poker room and mirror its state

USAGE:
  ps_client [OPTIONS]

OPTIONS:
  --server URL          WebSocket server base URL  [default: ws://localhost:8000]
  --room ID             Room identifier  [default: default-room]
  --player-id ID        Local player id  [default: the player name]
  --name NAME           Local player name  [default: your login name]

FLAGS:
  -h, --help            Print help information

COMMANDS (at the prompt):
  bet <amount>          Place a bet
  check                 Bet nothing
  fold | pass           Give up the hand (or pass the round)
  swap <index...>       Exchange the cards at these indices
  start                 Ask the server to start a hand
  quit                  Disconnect and exit
";

struct Args {
    server_url: String,
    room: String,
    player_id: String,
    name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut pargs = Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let name: String = pargs
        .opt_value_from_str("--name")?
        .unwrap_or_else(whoami::username);
    let args = Args {
        server_url: pargs
            .value_from_str("--server")
            .unwrap_or_else(|_| "ws://localhost:8000".to_string()),
        room: pargs
            .value_from_str("--room")
            .unwrap_or_else(|_| "default-room".to_string()),
        player_id: pargs
            .opt_value_from_str("--player-id")?
            .unwrap_or_else(|| name.clone()),
        name,
    };

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let url = format!(
        "{}/ws/Services/game_room_{}/",
        args.server_url.trim_end_matches('/'),
        args.room
    );
    println!("Connecting to {url} as {}...", args.name);

    let session = SessionContext::new(
        LocalPlayer {
            id: args.player_id.as_str().into(),
            name: args.name.clone(),
        },
        args.room.clone(),
    );

    let (view_tx, mut view_rx) = mpsc::unbounded_channel::<ViewCommand>();
    let (intent_tx, intent_rx) = mpsc::unbounded_channel::<PlayerIntent>();

    let connection = tokio::spawn(async move {
        let mut session = session;
        run_session(&url, &mut session, view_tx, intent_rx).await
    });

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            command = view_rx.recv() => {
                let Some(command) = command else {
                    // Connection task finished and drained its teardown.
                    break;
                };
                display::render(&command);
            }
            line = stdin.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let input = line.trim();
                        if input.is_empty() {
                            continue;
                        }
                        if input == "quit" || input == "exit" {
                            break;
                        }
                        if let Some(intent) = parse_intent(input)
                            && intent_tx.send(intent).is_err()
                        {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(error) => {
                        eprintln!("Error reading input: {error}");
                        break;
                    }
                }
            }
        }
    }

    // Dropping the intent sender closes the connection task's input side.
    drop(intent_tx);
    while let Some(command) = view_rx.recv().await {
        display::render(&command);
    }
    connection
        .await
        .context("connection task panicked")?
        .context("connection failed")?;

    println!("Disconnected from room.");
    Ok(())
}

fn parse_intent(input: &str) -> Option<PlayerIntent> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts[0].to_lowercase().as_str() {
        "bet" => {
            let Some(amount) = parts.get(1).and_then(|a| a.parse::<i64>().ok()) else {
                eprintln!("Usage: bet <amount>");
                return None;
            };
            Some(PlayerIntent::Bet(amount))
        }
        "check" => Some(PlayerIntent::Bet(CHECK_BET)),
        "fold" | "pass" => Some(PlayerIntent::Bet(FOLD_BET)),
        "swap" | "exchange" => {
            let mut indices = Vec::new();
            for part in &parts[1..] {
                match part.parse::<usize>() {
                    Ok(index) => indices.push(index),
                    Err(_) => {
                        eprintln!("Usage: swap <index...>");
                        return None;
                    }
                }
            }
            Some(PlayerIntent::CardsChange(indices))
        }
        "start" => Some(PlayerIntent::StartGame),
        "help" | "?" => {
            print!("{HELP}");
            None
        }
        other => {
            eprintln!("Unknown command: '{other}'. Type 'help' for available commands.");
            None
        }
    }
}
