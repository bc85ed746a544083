use thiserror::Error;

/// Errors that can occur while building or checking a skip list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkipListError {
    /// The requested maximum level is zero or above the supported limit
    #[error("Invalid max level {max_level}, must be in range [1, {limit}]")]
    InvalidMaxLevel { max_level: usize, limit: usize },
    /// A structural invariant does not hold at the given level
    #[error("Skip list corrupted at level {level}: {reason}")]
    Corrupted { level: usize, reason: String },
}

/// A type alias for the result of skip list operations
pub type Result<T> = std::result::Result<T, SkipListError>;
