//! Self-play between the bot policy and a uniformly random opponent
//!
//! Every game runs on its own board with its own seeded generator, so batches
//! are spread over all cores and replay identically for the same seed.

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    board::{Board, PlayerId},
    policy::{choose_move, Reason, Turn},
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    BotWin,
    RandomWin,
    Draw,
}

/// Result of a single game
#[derive(Copy, Clone, Debug)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub moves: usize,
    /// Winning moves announced by the threat detector, all confirmed on the board
    pub threats_confirmed: usize,
    /// Blocks whose column would have won for the opponent, all confirmed
    pub blocks_confirmed: usize,
}

/// Totals over a batch of games
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct ArenaReport {
    pub games: usize,
    pub bot_wins: usize,
    pub random_wins: usize,
    pub draws: usize,
    pub threats_confirmed: usize,
    pub blocks_confirmed: usize,
}

impl ArenaReport {
    fn record(mut self, game: GameRecord) -> Self {
        self.games += 1;
        self.threats_confirmed += game.threats_confirmed;
        self.blocks_confirmed += game.blocks_confirmed;
        match game.outcome {
            Outcome::BotWin => self.bot_wins += 1,
            Outcome::RandomWin => self.random_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
        self
    }
}

/// Fails unless a disc of `player` dropped into `column` completes a line
pub fn confirm_win(board: &Board, column: usize, player: PlayerId) -> Result<()> {
    let mut next = board.clone();
    let row = next.drop_disc(column, player)?;
    if !next.connects(column, row) {
        bail!(
            "column {} was reported as a win for player {} but does not connect\n{}",
            column,
            player,
            board
        );
    }
    Ok(())
}

/// Plays one game on a standard board, the bot playing as `bot`
///
/// Player one always moves first. Fails if the detector ever announces a
/// winning column, for the bot or for its opponent, that does not complete a line.
pub fn play_game(seed: u64, bot: PlayerId) -> Result<GameRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::standard();
    let mut current = PlayerId::ONE;
    let mut moves = 0;
    let mut threats_confirmed = 0;
    let mut blocks_confirmed = 0;
    let opponent = bot.opponent().unwrap_or(PlayerId::TWO);

    while !board.is_full() {
        let (column, reason) = if current == bot {
            let turn = Turn {
                round: moves / 2 + 1,
                player: bot,
                opponent,
            };
            match choose_move(&board, turn, &mut rng) {
                Some((next, reason)) => (next.column, Some(reason)),
                None => break,
            }
        } else {
            match board.valid_moves().choose(&mut rng) {
                Some(column) => (column, None),
                None => break,
            }
        };

        match reason {
            Some(Reason::Win) => {
                confirm_win(&board, column, bot).with_context(|| format!("seed {}", seed))?;
                threats_confirmed += 1;
            }
            Some(Reason::Block) => {
                confirm_win(&board, column, opponent)
                    .with_context(|| format!("seed {}", seed))?;
                blocks_confirmed += 1;
            }
            _ => {}
        }

        let row = board.drop_disc(column, current)?;
        moves += 1;
        let connected = board.connects(column, row);

        if connected {
            let outcome = if current == bot {
                Outcome::BotWin
            } else {
                Outcome::RandomWin
            };
            debug!(seed, moves, ?outcome, "game over");
            return Ok(GameRecord {
                outcome,
                moves,
                threats_confirmed,
                blocks_confirmed,
            });
        }
        current = current.opponent().unwrap_or(PlayerId::ONE);
    }

    debug!(seed, moves, "game drawn");
    Ok(GameRecord {
        outcome: Outcome::Draw,
        moves,
        threats_confirmed,
        blocks_confirmed,
    })
}

/// Plays `games` games in parallel, alternating which side the bot takes
pub fn run(games: usize, seed: u64, show_progress: bool) -> Result<ArenaReport> {
    let progress = if show_progress {
        ProgressBar::new(games as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let records = (0..games)
        .into_par_iter()
        .map(|game| {
            let bot = if game % 2 == 0 {
                PlayerId::ONE
            } else {
                PlayerId::TWO
            };
            let record = play_game(seed.wrapping_add(game as u64), bot);
            progress.inc(1);
            record
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish();

    let report = records
        .into_iter()
        .fold(ArenaReport::default(), ArenaReport::record);
    info!(
        games = report.games,
        bot_wins = report.bot_wins,
        random_wins = report.random_wins,
        draws = report.draws,
        "arena finished"
    );
    Ok(report)
}
