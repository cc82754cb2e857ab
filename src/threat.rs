//! Detection of single-move wins
//!
//! A column only counts as a win when the next disc dropped into it lands on
//! the cell that completes the line, so every candidate cell has to be both
//! empty and supported (the bottom row, or resting on another disc).

use crate::{
    board::{Board, PlayerId},
    CONNECT,
};

/// Number of aligned discs a single drop can turn into a win
const RUN: usize = CONNECT - 1;

/// Orientation of a completable line
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Line {
    Vertical,
    Horizontal,
    /// Climbs towards the right hand side of the board
    RisingRight,
    /// Climbs towards the left hand side of the board
    RisingLeft,
}

/// A drop that completes a line for the scanned player
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Threat {
    pub column: usize,
    /// The row the winning disc lands on
    pub row: usize,
    pub line: Line,
}

/// Finds a column where `player` wins with their next disc
///
/// Vertical lines are checked first, then horizontal, then diagonal lines,
/// each from the bottom of the board upwards; the first hit is returned.
pub fn check_immediate_win(board: &Board, player: PlayerId) -> Option<Threat> {
    vertical(board, player)
        .or_else(|| horizontal(board, player))
        .or_else(|| diagonal(board, player))
}

/// The winning column for `player`, if any
pub fn winning_column(board: &Board, player: PlayerId) -> Option<usize> {
    check_immediate_win(board, player).map(|threat| threat.column)
}

fn vertical(board: &Board, player: PlayerId) -> Option<Threat> {
    for column in 0..board.columns() {
        let mut connected = 0;
        for row in (0..board.rows()).rev() {
            if !board.get(column, row).is(player) {
                connected = 0;
                continue;
            }
            connected += 1;
            // room for one more disc directly on top of the run
            if connected == RUN
                && row > 0
                && board.is_valid_move(column)
                && board.get(column, row - 1).is_empty()
            {
                return Some(Threat {
                    column,
                    row: row - 1,
                    line: Line::Vertical,
                });
            }
        }
    }
    None
}

fn horizontal(board: &Board, player: PlayerId) -> Option<Threat> {
    // the top row is never scanned
    for row in (1..board.rows()).rev() {
        let mut connected = 0;
        for column in 0..board.columns() {
            if !board.get(column, row).is(player) {
                connected = 0;
                continue;
            }
            connected += 1;
            if connected != RUN {
                continue;
            }

            let left = (column + 1).checked_sub(CONNECT);
            let right = Some(column + 1).filter(|&x| x < board.columns());
            for candidate in left.into_iter().chain(right) {
                if board.is_reachable(candidate, row) {
                    return Some(Threat {
                        column: candidate,
                        row,
                        line: Line::Horizontal,
                    });
                }
            }
        }
    }
    None
}

fn diagonal(board: &Board, player: PlayerId) -> Option<Threat> {
    for row in (0..board.rows()).rev() {
        for column in 0..board.columns() {
            if !board.get(column, row).is(player) {
                continue;
            }
            for &(line, step_x) in [(Line::RisingRight, 1i64), (Line::RisingLeft, -1)].iter() {
                if let Some(threat) = diagonal_from(board, player, column, row, step_x, line) {
                    return Some(threat);
                }
            }
        }
    }
    None
}

/// Checks the diagonal run starting at (column, row) and climbing one row per `step_x` columns
fn diagonal_from(
    board: &Board,
    player: PlayerId,
    column: usize,
    row: usize,
    step_x: i64,
    line: Line,
) -> Option<Threat> {
    let run_complete = (1..RUN as i64).all(|i| {
        offset(board, column, row, i * step_x, -i)
            .is_some_and(|(x, y)| board.get(x, y).is(player))
    });
    if !run_complete {
        return None;
    }

    // the upper end first, then the lower end
    let upper = offset(board, column, row, RUN as i64 * step_x, -(RUN as i64));
    let lower = offset(board, column, row, -step_x, 1);
    upper
        .into_iter()
        .chain(lower)
        .find(|&(x, y)| board.is_reachable(x, y))
        .map(|(x, y)| Threat {
            column: x,
            row: y,
            line,
        })
}

/// Moves (column, row) by the given deltas, `None` when that leaves the board
fn offset(board: &Board, column: usize, row: usize, dx: i64, dy: i64) -> Option<(usize, usize)> {
    let x = column as i64 + dx;
    let y = row as i64 + dy;
    if x < 0 || y < 0 || x >= board.columns() as i64 || y >= board.rows() as i64 {
        None
    } else {
        Some((x as usize, y as usize))
    }
}
