use thiserror::Error;

/// Rejected maze layouts. Raised once, when a [`crate::maze::Maze`] is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout must contain at least one row")]
    Empty,
    #[error("layout row {row} has inconsistent width ({found} != {expected})")]
    InconsistentWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("layout must contain a player start position 'P'")]
    MissingPlayerStart,
}
