//! Flat text snapshots of a board, as exchanged with the game engine
//!
//! Cells are listed row by row from the top, left to right within a row,
//! each as its integer code (`0` for empty, the player id otherwise).

use std::fmt;

use crate::{
    board::{Board, Cell},
    error::BoardError,
};

/// Creates a comma separated string with every cell
pub fn to_text(board: &Board) -> String {
    let mut codes = Vec::with_capacity(board.columns() * board.rows());
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            codes.push(board.get(column, row).code().to_string());
        }
    }
    codes.join(",")
}

/// Overwrites every cell of `board` from a snapshot
///
/// Semicolons are accepted as separators as well as commas. The board keeps
/// its previous contents when the snapshot is rejected.
pub fn parse(board: &mut Board, text: &str) -> Result<(), BoardError> {
    let expected = board.columns() * board.rows();
    let normalised = text.replace(';', ",");

    let codes = normalised
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<u8>().map_err(|_| {
                BoardError::MalformedInput(format!("'{}' is not a valid cell code", token))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if codes.len() != expected {
        return Err(BoardError::MalformedInput(format!(
            "expected {} cells for a {}x{} board, found {}",
            expected,
            board.columns(),
            board.rows(),
            codes.len()
        )));
    }

    let columns = board.columns();
    for (idx, &code) in codes.iter().enumerate() {
        board.set(idx % columns, idx / columns, Cell::from_code(code));
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_text(self))
    }
}
