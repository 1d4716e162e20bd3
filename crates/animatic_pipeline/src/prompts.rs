//! Stage prompt files.

use animatic_error::{AnimaticResult, PipelineError, PipelineErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads system prompts from a directory of Markdown files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLibrary {
    dir: PathBuf,
}

impl PromptLibrary {
    /// Library rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a prompt file.
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Read a prompt, trimmed.
    ///
    /// # Errors
    ///
    /// Returns `PromptRead` if the file cannot be read.
    pub fn read_prompt(&self, file: &str) -> AnimaticResult<String> {
        let path = self.path(file);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            PipelineError::new(PipelineErrorKind::PromptRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        debug!(path = %path.display(), length = content.len(), "Loaded prompt");
        Ok(content.trim().to_string())
    }
}
