//! Error types for the Animatic storyboard pipeline.
//!
//! This crate provides the error types shared by every Animatic crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use animatic_error::{AnimaticResult, ConfigError};
//!
//! fn load_prompt_dir() -> AnimaticResult<String> {
//!     Err(ConfigError::new("prompts_dir is empty"))?
//! }
//!
//! let err = load_prompt_dir().unwrap_err();
//! assert!(!err.is_invocation_failure());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod models;
mod pipeline;

pub use config::ConfigError;
pub use error::{AnimaticError, AnimaticErrorKind, AnimaticResult};
pub use json::JsonError;
pub use models::{ModelsError, ModelsErrorKind, ModelsResult, RetryableError};
pub use pipeline::{PipelineError, PipelineErrorKind};
