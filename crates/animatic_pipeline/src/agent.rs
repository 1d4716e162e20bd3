//! Stage agents: a driver bound to a system prompt.

use crate::extraction::{extract_json, parse_json, preview};
use crate::{PipelineConfig, PromptLibrary, StageKind};
use animatic_core::{GenerateRequest, Message, StructuredOutput};
use animatic_error::{AnimaticResult, ModelsError, ModelsErrorKind, PipelineError, PipelineErrorKind};
use animatic_interface::AnimaticDriver;
use animatic_models::ModelFactory;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// One stage's model, system prompt and output handling.
#[derive(Clone)]
pub struct Agent {
    stage: StageKind,
    driver: Arc<dyn AnimaticDriver>,
    system_prompt: String,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("stage", &self.stage)
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("system_prompt_length", &self.system_prompt.len())
            .finish()
    }
}

impl Agent {
    /// Bind a driver and system prompt to a stage.
    pub fn new(
        stage: StageKind,
        driver: Arc<dyn AnimaticDriver>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            driver,
            system_prompt: system_prompt.into(),
        }
    }

    /// Stage this agent serves.
    pub fn stage(&self) -> StageKind {
        self.stage
    }

    /// Underlying driver.
    pub fn driver(&self) -> &Arc<dyn AnimaticDriver> {
        &self.driver
    }

    /// System prompt as configured.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Run the model and return its text reply.
    ///
    /// # Errors
    ///
    /// Propagates driver errors unchanged.
    #[instrument(skip(self, input), fields(stage = %self.stage, model = self.driver.model_name(), input_length = input.len()))]
    pub async fn run_text(&self, input: &str) -> AnimaticResult<String> {
        self.invoke(self.system_prompt.clone(), input).await
    }

    /// Run the model and deserialize its reply into `T`.
    ///
    /// The system prompt is extended with a JSON-only instruction showing
    /// `T::shape_hint()`.
    ///
    /// # Errors
    ///
    /// Propagates driver errors; a reply without valid `T` JSON is
    /// `MalformedOutput`.
    #[instrument(skip(self, input), fields(stage = %self.stage, model = self.driver.model_name(), output = T::NAME, input_length = input.len()))]
    pub async fn run_structured<T: StructuredOutput>(&self, input: &str) -> AnimaticResult<T> {
        let system = with_output_instructions::<T>(&self.system_prompt);
        let reply = self.invoke(system, input).await?;
        let json = extract_json(&reply)?;
        let value = parse_json::<T>(&json)?;
        debug!(json_length = json.len(), "Parsed structured output");
        Ok(value)
    }

    async fn invoke(&self, system: String, input: &str) -> AnimaticResult<String> {
        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(input));

        let request = GenerateRequest::builder()
            .messages(messages)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;

        let response = self.driver.generate(&request).await?;
        let text = response.text();
        debug!(response_length = text.len(), response_preview = %preview(&text), "Agent reply");
        Ok(text)
    }
}

fn with_output_instructions<T: StructuredOutput>(system_prompt: &str) -> String {
    let hint = T::shape_hint();
    let hint = serde_json::to_string_pretty(&hint).unwrap_or_else(|_| hint.to_string());
    let instructions = format!(
        "Output ONLY valid JSON for a {} with exactly this structure, no explanation:\n```json\n{}\n```",
        T::NAME,
        hint
    );
    if system_prompt.is_empty() {
        instructions
    } else {
        format!("{}\n\n{}", system_prompt, instructions)
    }
}

/// One optional agent per stage.
///
/// # Examples
///
/// ```
/// use animatic_pipeline::{StageAgents, StageKind};
///
/// let agents = StageAgents::new();
/// assert!(agents.require(StageKind::Viewer).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StageAgents {
    agents: BTreeMap<StageKind, Agent>,
}

impl StageAgents {
    /// No stages configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the agent for its stage.
    pub fn with(mut self, agent: Agent) -> Self {
        self.insert(agent);
        self
    }

    /// Add or replace the agent for its stage.
    pub fn insert(&mut self, agent: Agent) -> Option<Agent> {
        self.agents.insert(agent.stage(), agent)
    }

    /// Agent for a stage, if configured.
    pub fn get(&self, stage: StageKind) -> Option<&Agent> {
        self.agents.get(&stage)
    }

    /// Agent for a stage.
    ///
    /// # Errors
    ///
    /// Returns `StageNotConfigured` if the stage has no agent.
    pub fn require(&self, stage: StageKind) -> AnimaticResult<&Agent> {
        self.get(stage).ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::StageNotConfigured(stage.to_string())).into()
        })
    }

    /// Configured stages in pipeline order.
    pub fn configured(&self) -> Vec<StageKind> {
        self.agents.keys().copied().collect()
    }

    /// Configured agents in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Build agents from configuration.
    ///
    /// A stage is configured when its entry names a prompt file; its model is
    /// created through `factory`.
    ///
    /// # Errors
    ///
    /// Returns `PromptRead` if a named prompt file cannot be read.
    #[instrument(skip_all, fields(prompts_dir = %prompts.dir().display()))]
    pub fn from_config(
        config: &PipelineConfig,
        prompts: &PromptLibrary,
        factory: &ModelFactory,
    ) -> AnimaticResult<Self> {
        let mut agents = Self::new();
        for stage in StageKind::iter() {
            let Some(stage_config) = config.stage(stage) else {
                warn!(%stage, "No configuration entry for stage");
                continue;
            };
            let Some(prompt_file) = stage_config.prompt_file() else {
                warn!(%stage, "No prompt file mapped, stage left unconfigured");
                continue;
            };

            let system_prompt = prompts.read_prompt(prompt_file)?;
            let model = stage_config.model_or_default();
            agents.insert(Agent::new(stage, factory.create(model), system_prompt));
            debug!(%stage, model, prompt_file = %prompt_file, "Stage configured");
        }

        info!(configured = agents.agents.len(), "Stage agents initialised");
        Ok(agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animatic_core::ScriptDesign;

    #[test]
    fn test_output_instructions_follow_prompt() {
        let system = with_output_instructions::<ScriptDesign>("你是编剧。");
        assert!(system.starts_with("你是编剧。\n\n"));
        assert!(system.contains("\"plot_points\""));
        assert!(system.contains("ScriptDesign"));

        let bare = with_output_instructions::<ScriptDesign>("");
        assert!(bare.starts_with("Output ONLY valid JSON"));
    }
}
