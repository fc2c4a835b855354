//! Error types for the command line front end.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use gherkin_pickles::StreamError;
use thiserror::Error;

/// Exit status for an invalid configuration.
pub const EXIT_INVALID_CONFIG: u8 = 2;
/// Exit status for any I/O or stream failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors that stop the command line tool.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A feature file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The offending path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be walked.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// The directory being walked.
        path: Utf8PathBuf,
        /// The underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// A discovered path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// Reading or writing the event stream failed.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl CliError {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidConfig(_) => EXIT_INVALID_CONFIG,
            Self::Read { .. } | Self::Walk { .. } | Self::NonUtf8Path(_) | Self::Stream(_) => {
                EXIT_FAILURE
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Stream(StreamError::Io(err))
    }
}
