use anyhow::Result;
use clap::Parser;
use client_core::{ClientError, GameSessionController, HttpGameApi};
use shared::domain::ScoringMode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod session;
mod terminal;

use commands::{parse_line, Command, HELP};
use session::Session;
use terminal::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "numguess", about = "Guess the server's secret number")]
struct Args {
    /// Base url of the game server.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server_url: String,
    /// Number of digits in the secret.
    #[arg(long, default_value_t = 4)]
    digits: u32,
    /// Count repeated digits only as often as they occur in the secret.
    #[arg(long)]
    traditional: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mode = ScoringMode::from_traditional_flag(args.traditional);
    let api = HttpGameApi::new(&args.server_url)?;
    let controller = GameSessionController::new(api, TerminalView::new(std::io::stdout()));

    let mut session = Session::new(controller, args.digits, mode);
    session.new_game(None).await?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        debug!(?command, "input");

        let outcome = match command {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::New(requested) => session.new_game(requested).await.map(|_| ()),
            Command::Guess(guess) => session.guess(&guess).await.map(|_| ()),
        };

        if let Err(err) = outcome {
            report(&err);
        }
    }

    Ok(())
}

fn report(err: &ClientError) {
    match err {
        ClientError::Api { error, .. } => eprintln!("server refused: {}", error.message),
        ClientError::Rejected { message } => eprintln!("{message}"),
        other => {
            warn!(error = %other, "request failed");
            eprintln!("error: {other}");
        }
    }
}
