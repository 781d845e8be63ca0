use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

/// Result type returned from functions that can have our `Error`s.
pub type Result<T, E = BacklightNotifyError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BacklightNotifyError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Config(String),

    #[error("Unable to monitor {}: {source}", path.display())]
    Subscription {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("{0}")]
    DBus(#[from] zbus::Error),

    #[error("Invalid max brightness {value} in {}", path.display())]
    InvalidMaxBrightness { path: PathBuf, value: i64 },

    #[error("{0}")]
    Other(String),
}

impl BacklightNotifyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error only affects a single change event.
    pub fn is_per_event(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::InvalidMaxBrightness { .. })
    }
}

/// Attach a short description to a foreign error.
pub trait ResultExt<T> {
    fn error(self, message: &str) -> Result<T>;
}

impl<T, E: Display> ResultExt<T> for std::result::Result<T, E> {
    fn error(self, message: &str) -> Result<T> {
        self.map_err(|e| BacklightNotifyError::Other(format!("{message}: {e}")))
    }
}
