use thiserror::Error;

/// Result type alias using [`SkirmishError`]
pub type Result<T> = std::result::Result<T, SkirmishError>;

#[derive(Debug, Error, PartialEq, Eq)]
/// Everything that can go wrong while configuring a search
///
/// The search itself is total, so these all happen before any tree is built
pub enum SkirmishError {
    /// The number of plies to search has to be at least one
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(i64),

    /// A move ordering name that we don't know about
    #[error("unknown move ordering '{0}', expected one of best-first, worst-first, unordered")]
    UnknownMoveOrdering(String),
}
