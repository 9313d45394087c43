use std::path::PathBuf;

use thiserror::Error;

use super::config::Theme;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("theme folder {path} is missing or unreadable")]
    MissingTheme {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read card image {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported card image {path}: {reason}")]
    Unsupported { path: PathBuf, reason: String },
}

/// Reasons a board could not be dealt. The session stays idle on any of these.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("theme {} needs {needed} images but only {found} were found", .theme.name())]
    InsufficientAssets {
        theme: Theme,
        needed: usize,
        found: usize,
    },
    #[error(transparent)]
    Assets(#[from] AssetError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
