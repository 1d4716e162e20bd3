//! Pipeline error types.

/// Specific error conditions for pipeline assembly and I/O.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// A stage was invoked without a configured agent
    #[display("Stage '{}' is not configured (no prompt file mapped)", _0)]
    StageNotConfigured(String),
    /// Failed to read a prompt file
    #[display("Failed to read prompt file {}: {}", path, message)]
    PromptRead {
        /// Prompt file path
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Failed to read a reference template
    #[display("Failed to read template {}: {}", path, message)]
    TemplateRead {
        /// Template file path
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Failed to create or list a template directory
    #[display("Template directory error: {}", _0)]
    TemplateDirectory(String),
    /// Failed to write exported results
    #[display("Export failed: {}", _0)]
    Export(String),
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use animatic_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::StageNotConfigured("viewer".into()));
/// assert!(format!("{}", err).contains("viewer"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
