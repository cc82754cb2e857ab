//! Line based engine protocol
//!
//! The engine sends one command per line on stdin:
//!
//! ```text
//! settings your_botid 1
//! settings field_columns 7
//! settings field_rows 6
//! update game round 1
//! update game field 0,0,0,0,0,0,0;0,0,0,0,0,0,0;...
//! action move 10000
//! ```
//!
//! and expects `place_disc <column>` on stdout after every `action move`.

use anyhow::{anyhow, bail, Context, Result};
use rand::Rng;
use tracing::{debug, info, warn};

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::{
    board::{Board, PlayerId},
    policy::{choose_move, Turn},
    serializer,
};

/// A single `settings` line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Setting {
    Timebank(u64),
    TimePerMove(u64),
    PlayerNames(Vec<String>),
    YourBot(String),
    YourBotId(PlayerId),
    FieldColumns(usize),
    FieldRows(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Settings(Setting),
    Round(usize),
    Field(String),
    /// Asks for a move within the given time in milliseconds
    Move(u64),
    /// Recognised but irrelevant to the bot, e.g. `update player1 ...`
    Ignored,
}

fn value<'a>(words: &[&'a str], idx: usize, line: &str) -> Result<&'a str> {
    words
        .get(idx)
        .copied()
        .ok_or_else(|| anyhow!("missing argument in '{}'", line))
}

fn number<T>(words: &[&str], idx: usize, line: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let word = value(words, idx, line)?;
    word.parse::<T>()
        .with_context(|| format!("invalid number '{}' in '{}'", word, line))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["settings", key, ..] => {
                let setting = match *key {
                    "timebank" => Setting::Timebank(number(&words, 2, line)?),
                    "time_per_move" => Setting::TimePerMove(number(&words, 2, line)?),
                    "player_names" => Setting::PlayerNames(
                        value(&words, 2, line)?
                            .split(',')
                            .map(str::to_owned)
                            .collect(),
                    ),
                    "your_bot" => Setting::YourBot(value(&words, 2, line)?.to_owned()),
                    "your_botid" => {
                        let id: u8 = number(&words, 2, line)?;
                        Setting::YourBotId(
                            PlayerId::new(id).ok_or_else(|| anyhow!("bot id 0 is reserved"))?,
                        )
                    }
                    "field_columns" => Setting::FieldColumns(number(&words, 2, line)?),
                    "field_rows" => Setting::FieldRows(number(&words, 2, line)?),
                    _ => bail!("unknown setting '{}'", key),
                };
                Ok(Command::Settings(setting))
            }
            ["update", "game", "round", ..] => Ok(Command::Round(number(&words, 3, line)?)),
            ["update", "game", "field", ..] => {
                Ok(Command::Field(value(&words, 3, line)?.to_owned()))
            }
            ["update", ..] => Ok(Command::Ignored),
            ["action", "move", ..] => Ok(Command::Move(number(&words, 2, line)?)),
            _ => bail!("unknown command '{}'", line),
        }
    }
}

/// Values received through `settings` lines
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub timebank: Option<u64>,
    pub time_per_move: Option<u64>,
    pub player_names: Vec<String>,
    pub your_bot: Option<String>,
    pub your_botid: Option<PlayerId>,
}

/// State of one bot connected to the engine
pub struct Session<R: Rng> {
    board: Board,
    settings: Settings,
    round: usize,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(rng: R) -> Self {
        Self {
            board: Board::standard(),
            settings: Settings::default(),
            round: 0,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn round(&self) -> usize {
        self.round
    }

    /// Applies one line of input, returning the reply to send back if there is one
    pub fn handle(&mut self, line: &str) -> Result<Option<String>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        match line.parse::<Command>()? {
            Command::Settings(setting) => self.apply_setting(setting)?,
            Command::Round(round) => self.round = round,
            Command::Field(field) => {
                serializer::parse(&mut self.board, &field).context("rejected field update")?
            }
            Command::Move(time) => {
                let column = self.next_column()?;
                debug!(time, column, "answering move request");
                return Ok(Some(format!("place_disc {}", column)));
            }
            Command::Ignored => {}
        }
        Ok(None)
    }

    fn apply_setting(&mut self, setting: Setting) -> Result<()> {
        match setting {
            Setting::Timebank(time) => self.settings.timebank = Some(time),
            Setting::TimePerMove(time) => self.settings.time_per_move = Some(time),
            Setting::PlayerNames(names) => self.settings.player_names = names,
            Setting::YourBot(name) => self.settings.your_bot = Some(name),
            Setting::YourBotId(id) => {
                info!(%id, "playing as bot");
                self.settings.your_botid = Some(id)
            }
            Setting::FieldColumns(columns) => self.board.resize_columns(columns)?,
            Setting::FieldRows(rows) => self.board.resize_rows(rows)?,
        }
        Ok(())
    }

    fn next_column(&mut self) -> Result<usize> {
        let player = self
            .settings
            .your_botid
            .ok_or_else(|| anyhow!("asked to move before receiving a bot id"))?;
        let opponent = player
            .opponent()
            .ok_or_else(|| anyhow!("bot id {} has no opponent id", player))?;

        let turn = Turn {
            round: self.round,
            player,
            opponent,
        };
        let (next, reason) = choose_move(&self.board, turn, &mut self.rng)
            .ok_or_else(|| anyhow!("no legal move on a full board"))?;
        debug!(round = self.round, ?reason, column = next.column, "chose move");
        Ok(next.column)
    }

    /// Reads commands until the input ends, writing replies as they are produced
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read from the engine")?;
            match self.handle(&line) {
                Ok(Some(reply)) => {
                    writeln!(output, "{}", reply)?;
                    output.flush()?;
                }
                Ok(None) => {}
                Err(err) => warn!(error = %format!("{:#}", err), "skipping command"),
            }
        }
        info!("engine closed the input");
        Ok(())
    }
}
