use reqwest::StatusCode;

/// Shorthand for results produced by client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`Client`](crate::Client) operations.
///
/// Every failure is returned to the immediate caller; nothing is swallowed
/// or retried internally. Each variant corresponds to one distinct failure
/// class of the wire contract, so callers can match on the phase that went
/// wrong.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The event payload could not be encoded as JSON. Reported before any
    /// network I/O takes place.
    #[error("failed to serialize event payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The request URL could not be built from the configured endpoint.
    /// Reported before any network I/O takes place.
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    /// The HTTP transport could not be constructed
    /// ([`ClientBuilder::build`](crate::ClientBuilder::build) only).
    #[error("failed to build http transport: {0}")]
    Builder(#[source] reqwest::Error),

    /// Network-level failure: connection refused, timeout, DNS, TLS.
    #[error("request to the auditable api failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a status outside the expected success code
    /// for the operation (201 for event submission, 200 for viewer links).
    #[error("unexpected status {status} from the auditable api")]
    UnexpectedStatus {
        /// The observed response status.
        status: StatusCode,
    },

    /// The response body could not be read in full. The operation is
    /// aborted; a partial body is never handed to the decoder.
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The response body was read but is not valid JSON for the expected
    /// shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// The HTTP status carried by an [`Error::UnexpectedStatus`], `None`
    /// for every other variant.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
