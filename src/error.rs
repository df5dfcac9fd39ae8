use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing one of the JSON data files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Failure talking to the leaderboard record store.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("player name must not be empty")]
    EmptyPlayer,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("leaderboard worker has shut down")]
    Disconnected,
}
