use thiserror::Error;

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;

/// Reasons a grid of characters cannot be used as a board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board has no rows")]
    Empty,
    #[error("Board row {row} has no cells")]
    EmptyRow { row: usize },
    #[error("Board row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Cell ({row}, {col}) must hold exactly one character, found {value:?}")]
    InvalidCell {
        row: usize,
        col: usize,
        value: String,
    },
}

/// Errors that can occur while building or running a solver
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SolverError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }
}
