use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};
use std::num::NonZeroU8;

use crate::{error::BoardError, CONNECT, HEIGHT, WIDTH};

/// Identifies one of the competitors. `0` is reserved for empty cells.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PlayerId(NonZeroU8);

impl PlayerId {
    pub const ONE: PlayerId = match NonZeroU8::new(1) {
        Some(id) => PlayerId(id),
        None => panic!("1 is non-zero"),
    };
    pub const TWO: PlayerId = match NonZeroU8::new(2) {
        Some(id) => PlayerId(id),
        None => panic!("2 is non-zero"),
    };

    /// Returns `None` for the reserved empty code `0`
    pub fn new(id: u8) -> Option<Self> {
        NonZeroU8::new(id).map(PlayerId)
    }

    pub fn get(self) -> u8 {
        self.0.get()
    }

    /// The other player of a game between ids 1 and 2
    pub fn opponent(self) -> Option<Self> {
        match self.get() {
            1 => Some(Self::TWO),
            2 => Some(Self::ONE),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Disc(PlayerId),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is(&self, player: PlayerId) -> bool {
        *self == Cell::Disc(player)
    }

    /// Integer code used by board snapshots
    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Disc(player) => player.get(),
        }
    }

    pub fn from_code(code: u8) -> Self {
        PlayerId::new(code).map_or(Cell::Empty, Cell::Disc)
    }
}

/// A column to play and the player whose disc lands in it
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub column: usize,
    pub player: PlayerId,
}

/// Largest number of columns or rows a board accepts
pub const MAX_DIMENSION: usize = 1024;

#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<Cell>, // cells are stored column by column, top-to-bottom
    columns: usize,
    rows: usize,
    last_column: Option<usize>,
}

impl Board {
    pub fn new(columns: usize, rows: usize) -> Result<Self, BoardError> {
        let valid = 1..=MAX_DIMENSION;
        if !valid.contains(&columns) || !valid.contains(&rows) {
            return Err(BoardError::InvalidDimension { columns, rows });
        }
        Ok(Self {
            cells: vec![Cell::Empty; columns * rows],
            columns,
            rows,
            last_column: None,
        })
    }

    /// An empty board of the standard 7x6 size
    pub fn standard() -> Self {
        Self {
            cells: vec![Cell::Empty; WIDTH * HEIGHT],
            columns: WIDTH,
            rows: HEIGHT,
            last_column: None,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The column of the last successful drop, forgotten on resize
    pub fn last_column(&self) -> Option<usize> {
        self.last_column
    }

    /// Sets the number of columns, clearing the board
    pub fn resize_columns(&mut self, columns: usize) -> Result<(), BoardError> {
        *self = Self::new(columns, self.rows)?;
        Ok(())
    }

    /// Sets the number of rows, clearing the board
    pub fn resize_rows(&mut self, rows: usize) -> Result<(), BoardError> {
        *self = Self::new(self.columns, rows)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Empty);
        self.last_column = None;
    }

    fn index(&self, column: usize, row: usize) -> usize {
        assert!(
            column < self.columns && row < self.rows,
            "cell ({}, {}) outside {}x{} board",
            column,
            row,
            self.columns,
            self.rows
        );
        column * self.rows + row
    }

    /// Returns the cell at the given position, panicking when it is off the board
    pub fn get(&self, column: usize, row: usize) -> Cell {
        self.cells[self.index(column, row)]
    }

    pub(crate) fn set(&mut self, column: usize, row: usize, cell: Cell) {
        let idx = self.index(column, row);
        self.cells[idx] = cell;
    }

    /// Maps an externally supplied column number onto the board
    pub fn checked_column(&self, column: i64) -> Result<usize, BoardError> {
        usize::try_from(column)
            .ok()
            .filter(|&c| c < self.columns)
            .ok_or(BoardError::OutOfBounds {
                column,
                columns: self.columns,
            })
    }

    /// Drops a disc into `column`, returning the row it lands on
    pub fn drop_disc(&mut self, column: usize, player: PlayerId) -> Result<usize, BoardError> {
        if column >= self.columns {
            return Err(BoardError::OutOfBounds {
                column: column as i64,
                columns: self.columns,
            });
        }
        let row = self
            .landing_row(column)
            .ok_or(BoardError::ColumnFull { column })?;
        self.set(column, row, Cell::Disc(player));
        self.last_column = Some(column);
        Ok(row)
    }

    pub fn apply(&mut self, next: Move) -> Result<usize, BoardError> {
        self.drop_disc(next.column, next.player)
    }

    /// The row the next disc dropped into `column` would occupy
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        // from the bottom of the column up
        (0..self.rows)
            .rev()
            .find(|&row| self.get(column, row).is_empty())
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        self.get(column, 0).is_empty()
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        !self.is_valid_move(column)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn valid_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.columns).filter(move |&column| self.is_valid_move(column))
    }

    /// Whether a disc dropped now could come to rest at (column, row)
    pub fn is_reachable(&self, column: usize, row: usize) -> bool {
        self.get(column, row).is_empty()
            && (row == self.rows - 1 || !self.get(column, row + 1).is_empty())
    }

    /// Checks whether the disc at (column, row) belongs to an alignment of `CONNECT` discs
    pub fn connects(&self, column: usize, row: usize) -> bool {
        let owner = self.get(column, row);
        if owner.is_empty() {
            return false;
        }

        // vertical, horizontal and both diagonals
        for (step_x, step_y) in [(0i64, 1i64), (1, 0), (1, 1), (1, -1)].iter() {
            let mut run = 1;
            for direction in [-1i64, 1].iter() {
                let mut x = column as i64 + direction * step_x;
                let mut y = row as i64 + direction * step_y;
                loop {
                    if x < 0
                        || x >= self.columns as i64
                        || y < 0
                        || y >= self.rows as i64
                        || self.get(x as usize, y as usize) != owner
                    {
                        break;
                    }
                    x += direction * step_x;
                    y += direction * step_y;
                    run += 1;
                }
            }
            if run >= CONNECT {
                return true;
            }
        }

        false
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (0..self.columns).map(|x| (x % 10).to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..self.rows {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        // the cursor now sits on the line of the bottom row
        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for column in 0..self.columns {
            for row in 0..self.rows {
                let (pos_x, pos_y) = (
                    origin_x + column as u16,
                    origin_y - (self.rows - 1 - row) as u16,
                );

                stdout
                    .queue(MoveTo(pos_x, pos_y))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(match self.get(column, row).code() {
                                0 => Color::DarkBlue,
                                1 => Color::Red,
                                2 => Color::Yellow,
                                _ => Color::Magenta,
                            }),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x + self.columns as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

impl PartialEq for Board {
    // boards are equal when they hold the same discs
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.rows == other.rows && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
