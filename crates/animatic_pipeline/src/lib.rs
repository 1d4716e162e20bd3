//! Storyboard refinement pipeline for Animatic.
//!
//! Turns a short story into an animation shot list through five model-backed
//! stages:
//!
//! 1. **Story optimization**: rewrite the raw idea into a complete story
//! 2. **Script design**: characters and plot points (structured)
//! 3. **Storyboard design**: the shot list (structured), fresh or revised
//! 4. **Viewer simulation**: retell the story from shot visuals only
//! 5. **Review**: compare the retelling with the story; approve or critique
//!
//! Stages 3 to 5 repeat until the reviewer's reply starts with
//! [`APPROVAL_MARKER`] or `max_iterations` rounds have run.
//!
//! # Example
//!
//! ```no_run
//! use animatic_pipeline::{AnimationPipeline, PipelineConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::load()?;
//! let pipeline = AnimationPipeline::from_config(&config)?;
//!
//! let output = pipeline
//!     .process_story("一个孤独的灯塔看守人在海边发现了一个漂流瓶", 3)
//!     .await?;
//! let (storyboard, script) = output.into_parts();
//! println!("{} characters, {:?} shots", script.characters.len(), storyboard.map(|s| s.len()));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod config;
mod extraction;
mod pipeline;
mod prompts;
mod render;
mod stage;
mod templates;
mod verdict;

pub use agent::{Agent, StageAgents};
pub use config::{PipelineConfig, StageConfig};
pub use extraction::{extract_json, parse_json};
pub use pipeline::{AnimationPipeline, DEFAULT_MAX_ITERATIONS, PipelineOutput, RunOptions};
pub use prompts::PromptLibrary;
pub use render::{
    StoryboardInput, render_review_input, render_revision, render_script_design,
    render_viewer_input, with_story_template, with_storyboard_template,
};
pub use stage::StageKind;
pub use templates::{TemplateKind, TemplateLibrary};
pub use verdict::{APPROVAL_MARKER, ReviewVerdict, needs_revision};
