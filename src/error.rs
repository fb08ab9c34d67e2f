//! Error types for building a game and loading word lists.

use thiserror::Error;

/// Reasons a [`crate::game::Game`] cannot be constructed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("word list is empty")]
    NoWords,

    #[error("word at position {index} is empty")]
    EmptyWord { index: usize },

    #[error("maximum errors per word must be at least 1")]
    ZeroMaxErrors,
}

/// Errors surfaced while reading an embedded word list.
#[derive(Debug, Error)]
pub enum WordListError {
    #[error("word list not found: {0}")]
    NotFound(String),

    #[error("word list {0} is not valid UTF-8")]
    Utf8(String),

    #[error("unable to parse word list {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("word list {0} contains no words")]
    Empty(String),
}
