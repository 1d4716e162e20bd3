//! Core data types for the Animatic storyboard pipeline.
//!
//! This crate holds the request/response types exchanged with model drivers and
//! the story entities produced by the pipeline stages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod output;
mod request;
mod role;
mod script;
mod storyboard;
mod structured;

pub use message::Message;
pub use output::Output;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GenerateResponse,
};
pub use role::Role;
pub use script::{Character, PlotPoint, ScriptDesign};
pub use storyboard::{Shot, Storyboard};
pub use structured::StructuredOutput;
