//! Error types shared by the path, transform and context modules.

use thiserror::Error;

/// Errors raised by path construction, queries and authoring scopes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("the radius for a rect must be either a number or an (x, y) pair")]
    InvalidRadius,
    #[error("polygons must have at least 3 sides (got {0})")]
    TooFewSides(usize),
    #[error("stars must have at least 1 point (got {0})")]
    TooFewPoints(usize),
    #[error("unknown arrow style {0:?}: available styles are \"normal\" and \"fortyfive\"")]
    UnknownArrowStyle(String),
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    #[error("already defining a bezier path, authoring scopes cannot be nested")]
    RecursivePath,
    #[error("bezier already complete, only open a scope on a path still being defined")]
    PathComplete,
    #[error("the given path is empty")]
    EmptyPath,
    #[error("settings error: {0}")]
    Settings(String),
}

/// Result type for path operations.
pub type PathResult<T> = Result<T, PathError>;
