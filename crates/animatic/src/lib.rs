//! Animatic: short story in, animation storyboard out.
//!
//! A story idea goes through five language-model stages (optimize, script
//! design, storyboard design, viewer simulation, review). Storyboard design,
//! viewing and review repeat until a reviewer approves or the iteration budget
//! runs out.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use animatic::{AnimationPipeline, ExportFormat, PipelineConfig, ShotListExporter};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::load()?;
//! let pipeline = AnimationPipeline::from_config(&config)?;
//! let output = pipeline.run("一个孤独的灯塔看守人在海边发现了一个漂流瓶").await?;
//!
//! let exporter = ShotListExporter::new("output");
//! for path in exporter.export(output.storyboard().as_ref(), output.script_design(), ExportFormat::Both)? {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `animatic_error` - Error types
//! - `animatic_core` - Request/response types and the story data model
//! - `animatic_interface` - `AnimaticDriver` trait
//! - `animatic_models` - OpenAI-compatible provider client
//! - `animatic_pipeline` - Stages, agents and the refinement loop
//!
//! This crate re-exports everything and adds result export and logging setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod export;
mod logging;

pub use animatic_core::*;
pub use animatic_error::*;
pub use animatic_interface::*;
pub use animatic_models::*;
pub use animatic_pipeline::*;

pub use export::{ExportFormat, ShotListExporter, export_stem, render_export_json, render_markdown};
pub use logging::{LoggingConfig, init_logging};
