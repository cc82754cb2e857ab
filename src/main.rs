use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::HumanDuration;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, BufRead, Write};
use std::time::Instant;

use connect4_bot::{
    arena,
    board::{Board, PlayerId},
    policy::{choose_move, Turn},
    protocol::Session,
};

#[derive(Parser, Debug)]
#[command(name = "connect4_bot", about = "A Connect 4 bot that never misses a one-move win")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Talk to a game engine over stdin/stdout (the default)
    Bot {
        /// Seed for the random fallback move
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play against the bot in the terminal
    Play {
        #[arg(long, default_value_t = connect4_bot::WIDTH)]
        columns: usize,
        #[arg(long, default_value_t = connect4_bot::HEIGHT)]
        rows: usize,
        /// Let the human player drop the first disc
        #[arg(long)]
        human_first: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Pit the bot against a random player
    Arena {
        #[arg(long, default_value_t = 1000)]
        games: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn init_tracing(default_filter: &str) {
    // stdout belongs to the engine protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command.unwrap_or(Command::Bot { seed: None }) {
        Command::Bot { seed } => {
            info!("starting bot session");
            let stdin = stdin();
            Session::new(rng_from(seed)).run(stdin.lock(), stdout())
        }
        Command::Play {
            columns,
            rows,
            human_first,
            seed,
        } => play(Board::new(columns, rows)?, human_first, rng_from(seed)),
        Command::Arena { games, seed } => {
            let start = Instant::now();
            let report = arena::run(games, seed, true)?;
            println!(
                "{} games in {}: bot won {}, random player won {}, {} draws ({} wins and {} blocks confirmed)",
                report.games,
                HumanDuration(start.elapsed()),
                report.bot_wins,
                report.random_wins,
                report.draws,
                report.threats_confirmed,
                report.blocks_confirmed
            );
            Ok(())
        }
    }
}

fn play(mut board: Board, human_first: bool, mut rng: StdRng) -> Result<()> {
    let (human, bot) = if human_first {
        (PlayerId::ONE, PlayerId::TWO)
    } else {
        (PlayerId::TWO, PlayerId::ONE)
    };
    let stdin = stdin();
    let mut current = PlayerId::ONE;
    let mut moves = 0;

    println!("Welcome to Connect 4\n");

    // game loop
    loop {
        board.display().context("failed to draw board")?;

        if board.is_full() {
            println!("Draw!");
            break;
        }

        let column = if current == bot {
            let turn = Turn {
                round: moves / 2 + 1,
                player: bot,
                opponent: human,
            };
            let (next, reason) = choose_move(&board, turn, &mut rng)
                .context("bot found no legal move")?;
            println!("Bot plays {} ({:?})", next.column, reason);
            next.column

        // human player
        } else {
            print!("Move input > ");
            stdout().flush().context("failed to flush to stdout")?;
            let mut input_str = String::new();
            if stdin.lock().read_line(&mut input_str)? == 0 {
                return Ok(());
            }

            let checked = input_str
                .trim()
                .parse::<i64>()
                .map_err(anyhow::Error::from)
                .and_then(|column| Ok(board.checked_column(column)?));
            match checked {
                Err(err) => {
                    println!("Invalid move '{}': {}", input_str.trim(), err);
                    continue;
                }
                Ok(column) => column,
            }
        };

        let row = match board.drop_disc(column, current) {
            Ok(row) => row,
            Err(err) => {
                println!("{}", err);
                // try the move again
                continue;
            }
        };
        moves += 1;

        if board.connects(column, row) {
            board.display().context("failed to draw board")?;
            println!("Player {} wins!", current);
            break;
        }
        current = current.opponent().unwrap_or(PlayerId::ONE);
    }
    Ok(())
}
