//! Animatic CLI binary.
//!
//! - Run the storyboard pipeline on a story and export the result
//! - List reference templates
//! - Check that configured models respond

use animatic::{LoggingConfig, init_logging};
use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, RunRequest, list_templates, ping_models, run_story};

    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    init_logging(
        &LoggingConfig::new()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )
    .map_err(|e| e as Box<dyn std::error::Error>)?;

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run {
            story,
            file,
            max_iterations,
            output_dir,
            format,
            story_template,
            storyboard_template,
        } => {
            let request = RunRequest {
                story,
                file,
                max_iterations,
                output_dir,
                format: format.into(),
                story_template,
                storyboard_template,
            };
            run_story(config_path, request).await?;
        }

        Commands::Templates { kind } => {
            list_templates(config_path, kind.map(Into::into))?;
        }

        Commands::Ping { prompt, max_tokens } => {
            ping_models(config_path, &prompt, max_tokens).await?;
        }
    }

    Ok(())
}
