//! Error types for the API client.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a usable response: bad URL, network
    /// failure, unreadable body, or a body that did not decode.
    #[error("{context}")]
    Transport {
        context: &'static str,
        #[source]
        source: BoxError,
    },
    /// An id lookup was answered with 404.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    NotFound,
    /// The server rejected the payload (400 or 422).
    Validation,
}

impl Error {
    pub(crate) fn transport(context: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            context,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::HttpStatus { status, .. } if *status == 400 || *status == 422 => {
                ErrorKind::Validation
            }
            Self::HttpStatus { .. } => ErrorKind::Transport,
        }
    }
}
