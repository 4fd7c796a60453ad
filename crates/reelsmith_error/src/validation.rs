//! Request validation error types.

/// Reasons an operation request is rejected before any inference call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// One or more required fields were absent or empty
    MissingFields(Vec<String>),
    /// The request body was not a JSON object
    MalformedBody(String),
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationErrorKind::MissingFields(fields) => match fields.as_slice() {
                [] => write!(f, "Required fields are missing"),
                [only] => write!(f, "{} is required", only),
                [init @ .., last] => write!(f, "{} and {} are required", init.join(", "), last),
            },
            ValidationErrorKind::MalformedBody(msg) => {
                write!(f, "Request body must be a JSON object: {}", msg)
            }
        }
    }
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::MissingFields(vec![
///     "previous_strategy".to_string(),
///     "feedback".to_string(),
/// ]));
/// assert_eq!(
///     err.kind.to_string(),
///     "previous_strategy and feedback are required"
/// );
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a single missing field.
    #[track_caller]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::MissingFields(vec![field.into()]))
    }
}
