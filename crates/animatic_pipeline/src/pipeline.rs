//! The storyboard refinement pipeline.
//!
//! `optimize → design_script → [design_storyboard → simulate_viewing → review]*`
//!
//! Stage calls are strictly sequential. The loop stops on the first approving
//! review or after `max_iterations` unapproved rounds.

use crate::extraction::preview;
use crate::render::{
    StoryboardInput, render_review_input, render_viewer_input, with_story_template,
    with_storyboard_template,
};
use crate::{PipelineConfig, PromptLibrary, ReviewVerdict, StageAgents, StageKind};
use animatic_core::{ScriptDesign, Storyboard};
use animatic_error::{AnimaticResult, ModelsError, ModelsErrorKind};
use animatic_models::ModelFactory;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

/// Iteration bound used when none is given.
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Per-run options.
///
/// # Examples
///
/// ```
/// use animatic_pipeline::RunOptions;
///
/// let options = RunOptions::new(2).with_story_template("起承转合");
/// assert_eq!(*options.max_iterations(), 2);
/// assert!(options.storyboard_template().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RunOptions {
    /// Storyboard rounds allowed without approval
    max_iterations: usize,
    /// Reference template appended to the story optimization input
    story_template: Option<String>,
    /// Reference template appended to the first storyboard input
    storyboard_template: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

impl RunOptions {
    /// Options with an iteration bound and no templates.
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            story_template: None,
            storyboard_template: None,
        }
    }

    /// Attach a story template.
    pub fn with_story_template(mut self, template: impl Into<String>) -> Self {
        self.story_template = Some(template.into());
        self
    }

    /// Attach a storyboard template.
    pub fn with_storyboard_template(mut self, template: impl Into<String>) -> Self {
        self.storyboard_template = Some(template.into());
        self
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PipelineOutput {
    /// Last storyboard produced; `None` only when no round ran
    storyboard: Option<Storyboard>,
    /// Script design from the single design call
    script_design: ScriptDesign,
    /// Optimized story the reviews compared against
    optimized_story: String,
    /// Storyboard rounds executed
    rounds: usize,
    /// Whether the last review approved
    approved: bool,
}

impl PipelineOutput {
    /// Split into `(storyboard, script_design)`.
    pub fn into_parts(self) -> (Option<Storyboard>, ScriptDesign) {
        (self.storyboard, self.script_design)
    }
}

/// Sequences the five stages and owns the refinement loop.
///
/// Each pipeline owns its agents; independent pipelines can run concurrently.
#[derive(Debug, Clone)]
pub struct AnimationPipeline {
    agents: StageAgents,
    max_iterations: usize,
}

impl AnimationPipeline {
    /// Pipeline over pre-built agents.
    pub fn new(agents: StageAgents) -> Self {
        Self {
            agents,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the default iteration bound used by [`run`](Self::run).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Assemble a pipeline from configuration: provider, prompts and stage models.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the HTTP client cannot be
    /// built or a prompt file cannot be read.
    #[instrument(skip_all)]
    pub fn from_config(config: &PipelineConfig) -> AnimaticResult<Self> {
        let factory = ModelFactory::new(config.provider().clone())?;
        let prompts = PromptLibrary::new(config.prompts_dir());
        let agents = StageAgents::from_config(config, &prompts, &factory)?;
        info!(
            configured = ?agents.configured(),
            max_iterations = config.max_iterations(),
            "Animation pipeline initialised"
        );
        Ok(Self::new(agents).with_max_iterations(*config.max_iterations()))
    }

    /// Stage agents.
    pub fn agents(&self) -> &StageAgents {
        &self.agents
    }

    /// Default iteration bound.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Rewrite the raw story into a clearer, complete one.
    ///
    /// # Errors
    ///
    /// Propagates invocation errors; a blank reply is `EmptyOutput`.
    pub async fn optimize_story(&self, raw_story: &str) -> AnimaticResult<String> {
        self.optimize_story_with(raw_story, None).await
    }

    #[instrument(skip_all, fields(stage = %StageKind::StoryOptimization, input_length = raw_story.len(), template = template.is_some()))]
    async fn optimize_story_with(
        &self,
        raw_story: &str,
        template: Option<&str>,
    ) -> AnimaticResult<String> {
        info!("Optimizing story");
        let agent = self.agents.require(StageKind::StoryOptimization)?;
        let optimized = agent
            .run_text(&with_story_template(raw_story, template))
            .await?;

        if optimized.trim().is_empty() {
            error!("Story optimization returned empty output");
            return Err(ModelsError::new(ModelsErrorKind::EmptyOutput(
                StageKind::StoryOptimization.to_string(),
            ))
            .into());
        }

        info!(preview = %preview(&optimized), "Story optimized");
        Ok(optimized)
    }

    /// Derive characters and plot points from the optimized story.
    ///
    /// # Errors
    ///
    /// Propagates invocation and malformed-output errors.
    #[instrument(skip_all, fields(stage = %StageKind::ScriptDesign, input_length = optimized_story.len()))]
    pub async fn design_script(&self, optimized_story: &str) -> AnimaticResult<ScriptDesign> {
        info!("Designing script");
        let agent = self.agents.require(StageKind::ScriptDesign)?;
        let script: ScriptDesign = agent.run_structured(optimized_story).await?;
        info!(
            characters = script.characters.len(),
            plot_points = script.plot_points.len(),
            "Script designed"
        );
        Ok(script)
    }

    /// Produce a storyboard from the script or revise the previous one.
    ///
    /// # Errors
    ///
    /// Propagates invocation and malformed-output errors.
    pub async fn design_storyboard(&self, input: StoryboardInput<'_>) -> AnimaticResult<Storyboard> {
        self.design_storyboard_with(input, None).await
    }

    #[instrument(skip_all, fields(stage = %StageKind::StoryboardDesign, revision = input.is_revision(), template = template.is_some()))]
    async fn design_storyboard_with(
        &self,
        input: StoryboardInput<'_>,
        template: Option<&str>,
    ) -> AnimaticResult<Storyboard> {
        let text = match input {
            StoryboardInput::Fresh(_) => {
                info!("Designing storyboard from script");
                with_storyboard_template(&input.render()?, template)
            }
            StoryboardInput::Revision { .. } => {
                info!("Revising storyboard from review feedback");
                input.render()?
            }
        };

        let agent = self.agents.require(StageKind::StoryboardDesign)?;
        match agent.run_structured::<Storyboard>(&text).await {
            Ok(storyboard) => {
                info!(shots = storyboard.len(), "Storyboard designed");
                Ok(storyboard)
            }
            Err(e) => {
                error!(error = %e, "Storyboard design failed");
                Err(e)
            }
        }
    }

    /// Retell the story from the storyboard's visuals alone.
    ///
    /// # Errors
    ///
    /// Propagates invocation errors.
    #[instrument(skip_all, fields(stage = %StageKind::Viewer, shots = storyboard.len()))]
    pub async fn simulate_viewing(&self, storyboard: &Storyboard) -> AnimaticResult<String> {
        info!("Simulating viewer");
        let agent = self.agents.require(StageKind::Viewer)?;
        let narrative = agent.run_text(&render_viewer_input(storyboard)).await?;
        info!(preview = %preview(&narrative), "Viewer narrative produced");
        Ok(narrative)
    }

    /// Compare the retelling against the optimized story.
    ///
    /// # Errors
    ///
    /// Propagates invocation errors. A reply without the approval marker is
    /// not an error.
    #[instrument(skip_all, fields(stage = %StageKind::Reviewer, shots = storyboard.len()))]
    pub async fn review(
        &self,
        optimized_story: &str,
        viewer_narrative: &str,
        storyboard: &Storyboard,
    ) -> AnimaticResult<ReviewVerdict> {
        info!("Reviewing storyboard");
        let agent = self.agents.require(StageKind::Reviewer)?;
        let input = render_review_input(optimized_story, viewer_narrative, storyboard)?;
        let verdict = ReviewVerdict::from_feedback(agent.run_text(&input).await?);
        info!(
            needs_revision = verdict.needs_revision(),
            preview = %preview(verdict.feedback()),
            "Review complete"
        );
        Ok(verdict)
    }

    /// Run the pipeline with the configured iteration bound.
    ///
    /// # Errors
    ///
    /// See [`process_story_with`](Self::process_story_with).
    pub async fn run(&self, raw_story: &str) -> AnimaticResult<PipelineOutput> {
        self.process_story(raw_story, self.max_iterations).await
    }

    /// Run the pipeline.
    ///
    /// # Errors
    ///
    /// See [`process_story_with`](Self::process_story_with).
    pub async fn process_story(
        &self,
        raw_story: &str,
        max_iterations: usize,
    ) -> AnimaticResult<PipelineOutput> {
        self.process_story_with(raw_story, &RunOptions::new(max_iterations))
            .await
    }

    /// Run the pipeline with reference templates.
    ///
    /// # Errors
    ///
    /// The first stage error aborts the run and is returned unchanged; no
    /// partial output is produced. Exhausting the iterations is not an error.
    #[instrument(skip_all, fields(max_iterations = options.max_iterations(), story_length = raw_story.len()))]
    pub async fn process_story_with(
        &self,
        raw_story: &str,
        options: &RunOptions,
    ) -> AnimaticResult<PipelineOutput> {
        let max_iterations = *options.max_iterations();
        info!("Processing animation story");

        let optimized_story = self
            .optimize_story_with(raw_story, options.story_template().as_deref())
            .await?;
        let script_design = self.design_script(&optimized_story).await?;

        if max_iterations == 0 {
            warn!("max_iterations is 0, skipping storyboard design");
        }

        let mut iteration = 0;
        let mut storyboard: Option<Storyboard> = None;
        let mut review_feedback: Option<String> = None;
        let mut rounds = 0;
        let mut approved = false;

        while iteration < max_iterations {
            let input = match (&storyboard, &review_feedback) {
                (Some(prior), Some(feedback)) => StoryboardInput::Revision {
                    prior_storyboard: prior,
                    feedback: feedback.as_str(),
                },
                _ => StoryboardInput::Fresh(&script_design),
            };
            let current = self
                .design_storyboard_with(input, options.storyboard_template().as_deref())
                .await?;
            rounds += 1;

            let viewer_narrative = self.simulate_viewing(&current).await?;
            let verdict = self
                .review(&optimized_story, &viewer_narrative, &current)
                .await?;
            storyboard = Some(current);

            if verdict.is_approved() {
                info!(iteration, "Reviewer approved storyboard");
                approved = true;
                break;
            }

            iteration += 1;
            if iteration >= max_iterations {
                info!(iteration, max_iterations, "Reached max iterations without approval");
                break;
            }
            review_feedback = Some(verdict.into_feedback());
        }

        info!(rounds, approved, "Animation story processed");
        Ok(PipelineOutput {
            storyboard,
            script_design,
            optimized_story,
            rounds,
            approved,
        })
    }
}
