//! Errors that can happen while fetching, storing or loading calendar data

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used across this crate
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Everything that can go wrong in this crate.
///
/// Malformed VEVENT blocks and missing years are not errors: they are logged and skipped,
/// or expressed as an `Option`.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// No active network transport (WiFi, cellular or ethernet)
    #[error("Brak połączenia z internetem.")]
    NoConnectivity,

    /// The server did not answer in time
    #[error("Przekroczono limit czasu odpowiedzi serwera.")]
    Timeout,

    /// The server answered with something else than `200 OK`
    #[error("Serwer odpowiedział kodem {code} dla roku {year}.")]
    ServerError { year: i32, code: u16 },

    /// Any other transport error
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The configured URL template does not produce a valid URL
    #[error("Invalid ICS URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Reading, writing or deleting a file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A year file could not be (de)serialized
    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CalendarError {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn json<P: Into<PathBuf>>(path: P, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }

    /// Whether this error comes from the network rather than from the local store
    pub fn is_network(&self) -> bool {
        matches!(self,
            Self::NoConnectivity | Self::Timeout | Self::ServerError{..} | Self::Http(_))
    }
}

impl From<reqwest::Error> for CalendarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            // Unresolvable host or refused connection: same outcome as being offline
            Self::NoConnectivity
        } else {
            Self::Http(err)
        }
    }
}
