//! Model invocation errors and retry classification.

/// Specific error conditions for a single model invocation.
///
/// Transport failures and malformed structured output share this type: from the
/// pipeline's point of view both mean "the invocation did not produce a usable
/// result".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelsErrorKind {
    /// API key environment variable not set
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Failed to construct the HTTP client
    #[display("Failed to create model client: {}", _0)]
    ClientCreation(String),
    /// Request never produced an HTTP response (connect, timeout, body read)
    #[display("Request failed: {}", _0)]
    Http(String),
    /// Provider returned a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
    /// Provider rate limit hit
    #[display("Rate limit exceeded")]
    RateLimit,
    /// Response could not be decoded into provider types
    #[display("Failed to parse provider response: {}", _0)]
    ResponseParsing(String),
    /// A stage received an empty text result
    #[display("Model returned empty output for stage '{}'", _0)]
    EmptyOutput(String),
    /// Structured output did not match the expected shape
    #[display("Malformed structured output: {}", _0)]
    MalformedOutput(String),
    /// Builder error while assembling a request or response
    #[display("Builder error: {}", _0)]
    Builder(String),
}

impl ModelsErrorKind {
    /// Check if this error type should be retried by the invoker.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelsErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            ModelsErrorKind::RateLimit => true,
            ModelsErrorKind::Http(_) => true,
            _ => false,
        }
    }
}

/// Model invocation error with location tracking.
///
/// # Examples
///
/// ```
/// use animatic_error::{ModelsError, ModelsErrorKind};
///
/// let err = ModelsError::new(ModelsErrorKind::MissingApiKey("OPENROUTER_API_KEY".into()));
/// assert!(format!("{}", err).contains("OPENROUTER_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use animatic_error::{ModelsError, ModelsErrorKind, RetryableError};
///
/// let err = ModelsError::new(ModelsErrorKind::Api {
///     status: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ModelsError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_permanent() {
        let unauthorized = ModelsErrorKind::Api {
            status: 401,
            message: "bad key".to_string(),
        };
        assert!(!unauthorized.is_retryable());
        assert!(!ModelsErrorKind::MalformedOutput("x".to_string()).is_retryable());
        assert!(!ModelsErrorKind::MissingApiKey("KEY".to_string()).is_retryable());
    }

    #[test]
    fn test_transient_errors_are_retryable() {
        assert!(ModelsErrorKind::RateLimit.is_retryable());
        assert!(ModelsErrorKind::Http("timed out".to_string()).is_retryable());
        let overloaded = ModelsErrorKind::Api {
            status: 502,
            message: String::new(),
        };
        assert!(overloaded.is_retryable());
    }
}
