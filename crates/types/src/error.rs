use thiserror::Error;

/// Failure to interpret a name or a textual board description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown shape `{0}`")]
    UnknownShape(String),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("row {row} has {len} cells, expected {expected}")]
    RowWidth {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("{rows} rows do not fit in a grid of {max}")]
    TooManyRows { rows: usize, max: usize },
}
