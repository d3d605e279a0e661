//! Conversion error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for batch conversion
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting sheets
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a sheet failed
    #[error("{}: {source}", path.display())]
    Sheet {
        path: PathBuf,
        #[source]
        source: tabdax_csv::CsvError,
    },

    /// Listing or creating a directory failed
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn sheet(path: impl Into<PathBuf>, source: tabdax_csv::CsvError) -> Self {
        Error::Sheet {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
