//! Inference transport error types.

/// Ways a call to the inference server can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure, or any other send failure
    #[display("Failed to connect to inference server: {}", _0)]
    Unreachable(String),
    /// No response within the configured timeout
    #[display("Inference request timed out after {} seconds", _0)]
    Timeout(u64),
    /// Server answered with a non-success status
    #[display("Inference server returned status {}: {}", status, body)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },
    /// Response body was not the expected JSON payload
    #[display("Failed to decode inference response: {}", _0)]
    Decode(String),
    /// HTTP client could not be constructed
    #[display("Failed to build HTTP client: {}", _0)]
    ClientBuild(String),
}

impl TransportErrorKind {
    /// HTTP status reported by the inference server, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Inference transport error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Status {
///     status: 500,
///     body: "model crashed".to_string(),
/// });
/// assert!(err.to_string().contains("500"));
/// assert!(err.to_string().contains("model crashed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new transport error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
