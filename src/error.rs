use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a `gen` or `upload` run.
///
/// Filenames that do not parse are not errors; they are tallied in the
/// run reports instead.
#[derive(Error, Debug)]
pub enum ClgError {
    #[error("source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("repository does not exist: {}", .0.display())]
    RepoMissing(PathBuf),

    #[error("not a git working copy (no .git directory): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("this command requires git, but no git executable was found")]
    GitMissing,

    #[error("git add failed: {0}")]
    StageFailed(String),

    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("selection {index} is out of range for {choices} choices")]
    InvalidSelection { index: usize, choices: usize },

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl ClgError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ClgError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClgError>;
