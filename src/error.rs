//! Errors from everything around the games: configuration, profile files
//! and the terminal. Wrong answers are not errors, they are feedback.

use crate::config::GameId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error
{
    #[error("invalid {game} configuration: {reason}")]
    InvalidConfig
    {
        game: GameId,
        reason: String,
    },

    #[error("failed to read profiles from {}: {source}", .path.display())]
    ProfileIo
    {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse profiles in {}: {source}", .path.display())]
    ProfileParse
    {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("profile '{0}' already exists")]
    DuplicateProfile(String),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("{game} is not available for profile '{profile}'")]
    GameUnavailable
    {
        profile: String,
        game: GameId,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
