use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for a scrape run.
///
/// Only `Usage` and the directory-creation flavor of `Filesystem` terminate a
/// run; every other error is contained at the item or page boundary by the
/// caller, which logs and moves on.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The input URL is neither a thread nor a category URL, or the
    /// configuration cannot produce a working client.
    #[error("{0}")]
    Usage(String),

    /// Timeout, connection failure, or an unusable response body.
    #[error("transport error on {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Missing or unparsable data in an otherwise delivered response.
    #[error("{0}")]
    Format(String),

    /// Output directory or destination file trouble.
    #[error("{message}: {path}")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Unparsable size shorthand.
    #[error(transparent)]
    Units(#[from] UnitsError),
}

/// Errors from the shorthand filesize codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    /// No known unit suffix in the input.
    #[error("no known size unit in {0:?}")]
    InvalidFormat(String),

    /// A unit suffix was found but the magnitude does not parse.
    #[error("invalid magnitude in {0:?}")]
    InvalidMagnitude(String),
}
