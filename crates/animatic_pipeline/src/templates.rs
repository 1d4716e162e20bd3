//! Reference templates attached to a run.
//!
//! Templates live under `{templates_dir}/story/*.md` and
//! `{templates_dir}/storyboard/*.md`.

use animatic_error::{AnimaticResult, PipelineError, PipelineErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Which template family.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TemplateKind {
    /// Guides story optimization
    Story,
    /// Guides storyboard design
    Storyboard,
}

/// Directory-backed template store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLibrary {
    base_dir: PathBuf,
}

impl TemplateLibrary {
    /// Open the library, creating both template directories if needed.
    ///
    /// # Errors
    ///
    /// Returns `TemplateDirectory` if a directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> AnimaticResult<Self> {
        let library = Self {
            base_dir: base_dir.into(),
        };
        for kind in [TemplateKind::Story, TemplateKind::Storyboard] {
            let dir = library.dir(kind);
            std::fs::create_dir_all(&dir).map_err(|e| {
                PipelineError::new(PipelineErrorKind::TemplateDirectory(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }
        info!(base_dir = %library.base_dir.display(), "Template library ready");
        Ok(library)
    }

    /// Base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory for one template family.
    pub fn dir(&self, kind: TemplateKind) -> PathBuf {
        self.base_dir.join(kind.to_string())
    }

    /// Full path of a template file.
    pub fn path(&self, kind: TemplateKind, file: &str) -> PathBuf {
        self.dir(kind).join(file)
    }

    /// Markdown file names of one family, sorted.
    ///
    /// # Errors
    ///
    /// Returns `TemplateDirectory` if the directory cannot be listed.
    pub fn list(&self, kind: TemplateKind) -> AnimaticResult<Vec<String>> {
        let dir = self.dir(kind);
        let entries = std::fs::read_dir(&dir).map_err(|e| {
            PipelineError::new(PipelineErrorKind::TemplateDirectory(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".md"))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Read a template, trimmed. A missing file is `None`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateRead` for I/O failures other than not-found.
    pub fn read(&self, kind: TemplateKind, file: &str) -> AnimaticResult<Option<String>> {
        let path = self.path(kind, file);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Template file not found");
                Ok(None)
            }
            Err(e) => Err(PipelineError::new(PipelineErrorKind::TemplateRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_creates_both_directories() {
        let dir = tempfile::tempdir().unwrap();
        let library = TemplateLibrary::new(dir.path().join("templates")).unwrap();
        assert!(library.dir(TemplateKind::Story).is_dir());
        assert!(library.dir(TemplateKind::Storyboard).is_dir());
        assert!(library.list(TemplateKind::Story).unwrap().is_empty());
    }

    #[test]
    fn test_list_only_markdown_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let library = TemplateLibrary::new(dir.path()).unwrap();
        let story_dir = library.dir(TemplateKind::Story);
        std::fs::write(story_dir.join("b_fable.md"), "寓言").unwrap();
        std::fs::write(story_dir.join("a_hero.md"), "英雄").unwrap();
        std::fs::write(story_dir.join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(story_dir.join("drafts.md")).unwrap();

        assert_eq!(
            library.list(TemplateKind::Story).unwrap(),
            vec!["a_hero.md".to_string(), "b_fable.md".to_string()]
        );
        assert!(library.list(TemplateKind::Storyboard).unwrap().is_empty());
    }

    #[test]
    fn test_read_trims_and_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let library = TemplateLibrary::new(dir.path()).unwrap();
        std::fs::write(library.path(TemplateKind::Storyboard, "wide.md"), "\n远景开场\n").unwrap();

        assert_eq!(
            library.read(TemplateKind::Storyboard, "wide.md").unwrap().as_deref(),
            Some("远景开场")
        );
        assert_eq!(library.read(TemplateKind::Storyboard, "absent.md").unwrap(), None);
    }

    #[test]
    fn test_kind_parses_case_insensitively() {
        assert_eq!(TemplateKind::from_str("Storyboard").unwrap(), TemplateKind::Storyboard);
        assert_eq!(TemplateKind::Story.to_string(), "story");
    }
}
