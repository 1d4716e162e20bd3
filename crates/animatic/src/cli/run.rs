//! Pipeline run command handler.

use animatic::{
    AnimaticResult, AnimationPipeline, ConfigError, ExportFormat, PipelineConfig, RunOptions,
    ShotListExporter, TemplateKind, TemplateLibrary,
};
use std::path::{Path, PathBuf};

/// Arguments of the `run` command.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub story: Option<String>,
    pub file: Option<PathBuf>,
    pub max_iterations: Option<usize>,
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    pub story_template: Option<String>,
    pub storyboard_template: Option<String>,
}

impl RunRequest {
    fn read_story(&self) -> AnimaticResult<String> {
        let story = match (&self.story, &self.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
                ConfigError::new(format!("Failed to read story file {}: {}", path.display(), e))
            })?,
            (None, None) => return Err(ConfigError::new("Provide --story or --file").into()),
        };

        let story = story.trim().to_string();
        if story.is_empty() {
            return Err(ConfigError::new("Story is empty").into());
        }
        Ok(story)
    }
}

/// Run the pipeline, export the results and print a summary.
pub async fn run_story(config_path: Option<&Path>, request: RunRequest) -> AnimaticResult<()> {
    let config = PipelineConfig::load_with(config_path)?;
    let story = request.read_story()?;

    let max_iterations = request
        .max_iterations
        .unwrap_or(*config.max_iterations());
    let mut options = RunOptions::new(max_iterations);

    if request.story_template.is_some() || request.storyboard_template.is_some() {
        let templates = TemplateLibrary::new(config.templates_dir())?;
        if let Some(file) = &request.story_template {
            if let Some(template) = templates.read(TemplateKind::Story, file)? {
                tracing::info!(template = %file, "Using story template");
                options = options.with_story_template(template);
            }
        }
        if let Some(file) = &request.storyboard_template {
            if let Some(template) = templates.read(TemplateKind::Storyboard, file)? {
                tracing::info!(template = %file, "Using storyboard template");
                options = options.with_storyboard_template(template);
            }
        }
    }

    let pipeline = AnimationPipeline::from_config(&config)?;

    tracing::info!(max_iterations, story_length = story.len(), "Running pipeline");
    let output = pipeline.process_story_with(&story, &options).await?;

    let exporter = ShotListExporter::new(&request.output_dir);
    let paths = exporter.export(
        output.storyboard().as_ref(),
        output.script_design(),
        request.format,
    )?;

    println!("\nStoryboard Summary:");
    println!("===================");
    println!("Characters: {}", output.script_design().characters.len());
    println!("Plot points: {}", output.script_design().plot_points.len());
    println!(
        "Shots: {}",
        output.storyboard().as_ref().map(|s| s.len()).unwrap_or(0)
    );
    println!("Rounds: {}", output.rounds());
    println!("Approved: {}", output.approved());
    for path in &paths {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
