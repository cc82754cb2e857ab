//! Turn-by-turn move choice
//!
//! Opens in the center, takes an immediate win when one exists, blocks the
//! opponent's immediate win otherwise, and plays a random legal column as a
//! last resort.

use rand::{seq::IteratorRandom, Rng};
use tracing::debug;

use crate::{
    board::{Board, Move, PlayerId},
    threat::check_immediate_win,
};

/// Why a column was picked
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Reason {
    Opening,
    Win,
    Block,
    Random,
}

/// Everything the policy needs to know about the current turn
#[derive(Copy, Clone, Debug)]
pub struct Turn {
    /// Game round as reported by the engine, starting at 1
    pub round: usize,
    pub player: PlayerId,
    pub opponent: PlayerId,
}

/// Picks the column to play this turn, or `None` when the board is full
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    turn: Turn,
    rng: &mut R,
) -> Option<(Move, Reason)> {
    let play = |column| Move {
        column,
        player: turn.player,
    };

    // place the first disc in the middle
    let center = board.columns() / 2;
    if turn.round <= 2 && board.is_valid_move(center) {
        debug!(column = center, round = turn.round, "opening move");
        return Some((play(center), Reason::Opening));
    }

    if let Some(threat) = check_immediate_win(board, turn.player) {
        debug!(column = threat.column, line = ?threat.line, "winning move");
        return Some((play(threat.column), Reason::Win));
    }

    if let Some(threat) = check_immediate_win(board, turn.opponent) {
        debug!(column = threat.column, line = ?threat.line, "blocking opponent");
        return Some((play(threat.column), Reason::Block));
    }

    let column = board.valid_moves().choose(rng)?;
    debug!(column, "random move");
    Some((play(column), Reason::Random))
}
