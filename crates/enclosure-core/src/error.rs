//! Error types for enclosure search

use thiserror::Error;

/// Main error type for enclosure operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnclosureError {
    /// The grid description is malformed (start count, dimensions, layer sizes)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A wall set names a cell that cannot hold a wall
    #[error("Invalid wall set: {0}")]
    InvalidWallSet(String),

    /// Error in strategy configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for enclosure operations
pub type Result<T> = std::result::Result<T, EnclosureError>;
