//! Pipeline configuration.
//!
//! Sources, lowest precedence first:
//! - `MODEL_PROVIDER` / `PROXY` environment variables (fallbacks only)
//! - Bundled defaults (include_str! from animatic.toml)
//! - `~/.config/animatic/animatic.toml`
//! - `./animatic.toml`
//! - An explicit file passed by the caller
//! - `ANIMATIC__*` environment overrides (`ANIMATIC__MAX_ITERATIONS=5`)

use crate::StageKind;
use animatic_error::{AnimaticError, AnimaticResult, ConfigError};
use animatic_models::{DEFAULT_MODEL, ProviderSettings};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../animatic.toml");

/// Prompt file and model for one stage.
///
/// A stage without a prompt file is left unconfigured.
///
/// ```toml
/// [stages.reviewer]
/// prompt_file = "reviewer.md"
/// model = "gemini-2.5-pro"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize, derive_getters::Getters)]
pub struct StageConfig {
    /// Prompt file name, relative to `prompts_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prompt_file: Option<String>,

    /// Model identifier; falls back to [`DEFAULT_MODEL`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
}

impl StageConfig {
    /// Stage mapped to a prompt file, default model.
    pub fn new(prompt_file: impl Into<String>) -> Self {
        Self {
            prompt_file: Some(prompt_file.into()),
            model: None,
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Configured model or the default.
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

/// Everything needed to assemble an [`AnimationPipeline`](crate::AnimationPipeline).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, derive_getters::Getters)]
pub struct PipelineConfig {
    /// Directory holding stage prompt files
    #[serde(default = "default_prompts_dir")]
    prompts_dir: PathBuf,

    /// Directory holding `story/` and `storyboard/` reference templates
    #[serde(default = "default_templates_dir")]
    templates_dir: PathBuf,

    /// Storyboard refinement rounds allowed per run
    #[serde(default = "default_max_iterations")]
    max_iterations: usize,

    /// Model provider connection settings
    #[serde(default)]
    provider: ProviderSettings,

    /// Per-stage prompt and model, keyed by stage name
    #[serde(default)]
    stages: HashMap<String, StageConfig>,
}

fn default_prompts_dir() -> PathBuf {
    PathBuf::from("prompts")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_max_iterations() -> usize {
    3
}

impl PipelineConfig {
    /// Load configuration from every source, see the module docs for precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file is invalid or a value has the wrong type.
    pub fn load() -> AnimaticResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration with an additional explicit file above the discovered ones.
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` is missing or any source is invalid.
    #[instrument(skip_all, fields(explicit = ?explicit))]
    pub fn load_with(explicit: Option<&Path>) -> AnimaticResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults");

        let mut builder = env_fallbacks(Config::builder())?
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/animatic/animatic.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("animatic").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ANIMATIC")
                .separator("__")
                .try_parsing(true),
        );

        Self::build(builder)
    }

    /// Load bundled defaults overlaid with a single file, ignoring the
    /// environment and discovered files.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid.
    pub fn from_file(path: impl AsRef<Path>) -> AnimaticResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()).required(true));
        Self::build(builder)
    }

    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file is invalid.
    pub fn bundled() -> AnimaticResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> AnimaticResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                AnimaticError::from(ConfigError::new(format!("Failed to build configuration: {}", e)))
            })?
            .try_deserialize()
            .map_err(|e| {
                AnimaticError::from(ConfigError::new(format!(
                    "Failed to deserialize configuration: {}",
                    e
                )))
            })?;

        debug!(
            max_iterations = config.max_iterations,
            provider = %config.provider.kind(),
            stages = config.stages.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Configuration for a stage, if it has an entry.
    pub fn stage(&self, kind: StageKind) -> Option<&StageConfig> {
        self.stages.get(<&'static str>::from(kind))
    }

    /// Replace the provider settings.
    pub fn with_provider(mut self, provider: ProviderSettings) -> Self {
        self.provider = provider;
        self
    }

    /// Set the prompts directory.
    pub fn with_prompts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompts_dir = dir.into();
        self
    }

    /// Set the templates directory.
    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = dir.into();
        self
    }

    /// Set the iteration bound.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set or replace one stage entry.
    pub fn with_stage(mut self, kind: StageKind, stage: StageConfig) -> Self {
        self.stages.insert(kind.to_string(), stage);
        self
    }
}

/// `MODEL_PROVIDER` and `PROXY` as defaults beneath every file.
fn env_fallbacks(
    mut builder: ConfigBuilder<DefaultState>,
) -> AnimaticResult<ConfigBuilder<DefaultState>> {
    let fallbacks = [("provider.kind", "MODEL_PROVIDER"), ("provider.proxy", "PROXY")];
    for (key, var) in fallbacks {
        if let Some(value) = std::env::var(var).ok().filter(|v| !v.trim().is_empty()) {
            debug!(key, var, "Using environment fallback");
            builder = builder.set_default(key, value.trim().to_lowercase()).map_err(|e| {
                AnimaticError::from(ConfigError::new(format!("Invalid {}: {}", var, e)))
            })?;
        }
    }
    Ok(builder)
}
