use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Word bank for {language:?} has {found} words, at least 25 are needed")]
    InsufficientWordBank { language: String, found: usize },
    #[error("Malformed word bank: {0}")]
    MalformedWordBank(String),
    #[error("Unknown language {0:?}")]
    UnknownLanguage(String),
    #[error("Role counts do not add up to a full board with a single trap")]
    InvalidRules,
    #[error("Board does not match the configured layout")]
    InvalidBoard,
    #[error("Invalid card index")]
    InvalidCard,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Action is not available with the current rules")]
    NotSupported,
    #[error("No game in progress")]
    NoSession,
}

pub type Result<T> = core::result::Result<T, GameError>;
