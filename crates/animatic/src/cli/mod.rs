//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the animatic binary.

mod commands;
mod ping;
mod run;
mod templates;

pub use commands::{Cli, Commands};
pub use ping::ping_models;
pub use run::{RunRequest, run_story};
pub use templates::list_templates;
