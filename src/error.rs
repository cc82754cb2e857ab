/// Errors produced by board mutation and snapshot parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error(
        "invalid board dimensions {columns}x{rows}, both must be between 1 and {max}",
        max = crate::board::MAX_DIMENSION
    )]
    InvalidDimension { columns: usize, rows: usize },

    #[error("move out of bounds, column {column} not in 0..{columns}")]
    OutOfBounds { column: i64, columns: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("malformed board snapshot: {0}")]
    MalformedInput(String),
}
