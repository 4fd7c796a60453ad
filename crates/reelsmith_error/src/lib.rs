//! Error types for the Reelsmith proxy.
//!
//! Every error records the source location where it was created. The
//! umbrella [`ReelsmithError`] wraps the per-family errors so that
//! application code can propagate any of them with `?`.

mod config;
mod server;
mod transport;
mod validation;

pub use config::ConfigError;
pub use server::ServerError;
pub use transport::{TransportError, TransportErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum ReelsmithErrorKind {
    /// Request rejected before dispatch
    Validation(ValidationError),
    /// Inference server call failed
    Transport(TransportError),
    /// Configuration error
    Config(ConfigError),
    /// HTTP listener error
    Server(ServerError),
}

impl std::fmt::Display for ReelsmithErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReelsmithErrorKind::Validation(e) => write!(f, "{}", e),
            ReelsmithErrorKind::Transport(e) => write!(f, "{}", e),
            ReelsmithErrorKind::Config(e) => write!(f, "{}", e),
            ReelsmithErrorKind::Server(e) => write!(f, "{}", e),
        }
    }
}

/// Reelsmith error with kind discrimination.
#[derive(Debug)]
pub struct ReelsmithError(Box<ReelsmithErrorKind>);

impl ReelsmithError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelsmithErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelsmithErrorKind {
        &self.0
    }

    /// Whether the caller is at fault (bad or incomplete request).
    pub fn is_client_error(&self) -> bool {
        matches!(*self.0, ReelsmithErrorKind::Validation(_))
    }

    /// Message suitable for a response body, without source location.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_error::{ReelsmithError, ValidationError};
    ///
    /// let err = ReelsmithError::from(ValidationError::missing("niche"));
    /// assert_eq!(err.public_message(), "niche is required");
    /// ```
    pub fn public_message(&self) -> String {
        match &*self.0 {
            ReelsmithErrorKind::Validation(e) => e.kind.to_string(),
            ReelsmithErrorKind::Transport(e) => e.kind.to_string(),
            ReelsmithErrorKind::Config(e) => e.message.clone(),
            ReelsmithErrorKind::Server(e) => e.message.clone(),
        }
    }
}

impl std::fmt::Display for ReelsmithError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Reelsmith Error: {}", self.0)
    }
}

impl std::error::Error for ReelsmithError {}

// Generic From implementation for any type that converts to ReelsmithErrorKind
impl<T> From<T> for ReelsmithError
where
    T: Into<ReelsmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Reelsmith operations.
pub type ReelsmithResult<T> = std::result::Result<T, ReelsmithError>;
