//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, ModelsError, PipelineError};

/// Every error condition surfaced by Animatic crates.
///
/// # Examples
///
/// ```
/// use animatic_error::{AnimaticError, JsonError};
///
/// let err: AnimaticError = JsonError::new("trailing comma").into();
/// assert!(format!("{}", err).contains("trailing comma"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AnimaticErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Model invocation error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Pipeline assembly or I/O error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Animatic error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Animatic Error: {}", _0)]
pub struct AnimaticError(Box<AnimaticErrorKind>);

impl AnimaticError {
    /// Create a new error from a kind.
    pub fn new(kind: AnimaticErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AnimaticErrorKind {
        &self.0
    }

    /// Whether this error came from a model invocation (transport failure or
    /// malformed output).
    pub fn is_invocation_failure(&self) -> bool {
        matches!(self.kind(), AnimaticErrorKind::Models(_))
    }
}

// Generic From implementation for any type that converts to AnimaticErrorKind
impl<T> From<T> for AnimaticError
where
    T: Into<AnimaticErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Animatic operations.
pub type AnimaticResult<T> = std::result::Result<T, AnimaticError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ModelsErrorKind, PipelineErrorKind};

    #[test]
    fn test_models_errors_are_invocation_failures() {
        let err: AnimaticError =
            ModelsError::new(ModelsErrorKind::MalformedOutput("missing field".into())).into();
        assert!(err.is_invocation_failure());

        let err: AnimaticError =
            PipelineError::new(PipelineErrorKind::StageNotConfigured("viewer".into())).into();
        assert!(!err.is_invocation_failure());
    }

    #[test]
    fn test_display_carries_location() {
        let err: AnimaticError = ConfigError::new("bad value").into();
        let rendered = err.to_string();
        assert!(rendered.starts_with("Animatic Error: Configuration Error: bad value"));
        assert!(rendered.contains("error.rs"));
    }
}
