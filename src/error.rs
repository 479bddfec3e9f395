use crate::chart::Difficulty;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JSON error in '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Course '{0}' not found in chart")]
    CourseNotFound(Difficulty),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Unknown format profile: {0}")]
    UnknownProfile(String),

    #[error("Unsupported chart file: {0}")]
    UnsupportedFile(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
