//! Trait definitions for the Animatic storyboard pipeline.
//!
//! The pipeline only ever talks to language models through [`AnimaticDriver`];
//! transport, authentication and provider identity stay behind it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::AnimaticDriver;
