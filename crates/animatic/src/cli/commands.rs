//! CLI command definitions.

use animatic::{ExportFormat, TemplateKind};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Animatic - turn a short story into an animation storyboard
#[derive(Parser, Debug)]
#[command(name = "animatic")]
#[command(about = "Turn a short story into an animation storyboard with an LLM review loop", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the discovered ones
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the storyboard pipeline on a story
    Run {
        /// Story text
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        story: Option<String>,

        /// Read the story from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Storyboard rounds allowed without approval (defaults to the configured value)
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Directory for exported results
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,

        /// Export format
        #[arg(long, value_enum, default_value_t = FormatArg::Both)]
        format: FormatArg,

        /// Story template file name (under templates/story)
        #[arg(long)]
        story_template: Option<String>,

        /// Storyboard template file name (under templates/storyboard)
        #[arg(long)]
        storyboard_template: Option<String>,
    },

    /// List reference templates
    Templates {
        /// Only list one template family
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Send a probe prompt to every configured stage model
    Ping {
        /// Prompt to send
        #[arg(long, default_value = "你好你是谁？")]
        prompt: String,

        /// Cap on reply length, in tokens
        #[arg(long)]
        max_tokens: Option<u32>,
    },
}

/// Export format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    /// JSON document
    Json,
    /// Markdown tables
    Markdown,
    /// Both files
    Both,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Markdown => ExportFormat::Markdown,
            FormatArg::Both => ExportFormat::Both,
        }
    }
}

/// Template family options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    /// Story templates
    Story,
    /// Storyboard templates
    Storyboard,
}

impl From<KindArg> for TemplateKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Story => TemplateKind::Story,
            KindArg::Storyboard => TemplateKind::Storyboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_requires_story_or_file() {
        assert!(Cli::try_parse_from(["animatic", "run"]).is_err());
        assert!(
            Cli::try_parse_from(["animatic", "run", "--story", "x", "--file", "story.txt"])
                .is_err()
        );

        let cli = Cli::try_parse_from([
            "animatic",
            "-v",
            "run",
            "--story",
            "灯塔",
            "--max-iterations",
            "0",
            "--format",
            "markdown",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Run {
                story,
                max_iterations,
                format,
                ..
            } => {
                assert_eq!(story.as_deref(), Some("灯塔"));
                assert_eq!(max_iterations, Some(0));
                assert_eq!(ExportFormat::from(format), ExportFormat::Markdown);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_ping_defaults_and_token_cap() {
        let cli = Cli::try_parse_from(["animatic", "ping"]).unwrap();
        match cli.command {
            Commands::Ping { prompt, max_tokens } => {
                assert_eq!(prompt, "你好你是谁？");
                assert_eq!(max_tokens, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["animatic", "ping", "--max-tokens", "32"]).unwrap();
        match cli.command {
            Commands::Ping { max_tokens, .. } => assert_eq!(max_tokens, Some(32)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
