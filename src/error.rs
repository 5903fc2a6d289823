use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure reported by a background task back to the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("model request failed: {0}")]
    Transport(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("the file '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),
}

impl SessionError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::AlreadyExists {
            return Self::AlreadyExists(path.to_path_buf());
        }
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error parsing config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Gemini API key is not set. Set GEMINI_API_KEY or gemini.api_key in the config file.")]
    MissingApiKey,
}

/// Conditions that stop the process before the session loop starts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("error initializing AI client: {0}")]
    Client(SessionError),
    #[error("error opening log file '{}': {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
