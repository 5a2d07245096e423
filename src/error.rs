use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

/// Everything that can go wrong while building grids or running a search.
///
/// `Exhausted` is an expected outcome rather than a fault: callers are meant to
/// match on it and report "no solution".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("coordinate ({row}, {col}) is outside a {size}x{size} grid")]
    InvalidCoordinate { row: usize, col: usize, size: usize },
    #[error("goal state is {rows}x{cols}, expected {expected}x{expected}")]
    InvalidGoalState {
        expected: usize,
        rows: usize,
        cols: usize,
    },
    #[error("transition set was built for size {found}, grid has size {expected}")]
    TransitionSetMismatch { expected: usize, found: usize },
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },
    #[error("search space exhausted after expanding {expanded} nodes")]
    Exhausted { expanded: usize },
}

////////////////////////////////////////////////////////////////////////////////

pub type SearchResult<T> = Result<T, SearchError>;
