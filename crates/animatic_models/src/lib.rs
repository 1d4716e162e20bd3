//! Model provider integrations for Animatic.
//!
//! Every supported provider speaks the OpenAI chat-completions dialect, so a
//! single [`OpenAICompatibleClient`] covers them; [`ModelProvider`] picks the
//! endpoint and credentials.
//!
//! # Example
//!
//! ```no_run
//! use animatic_core::{GenerateRequest, Message};
//! use animatic_interface::AnimaticDriver;
//! use animatic_models::{ModelFactory, ProviderSettings};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = ModelFactory::new(ProviderSettings::default())?;
//! let driver = factory.create("gemini-2.5-flash");
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("你好你是谁？")])
//!     .build()?;
//! let response = driver.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod factory;
mod openai_compat;
mod provider;

pub use factory::ModelFactory;
pub use openai_compat::OpenAICompatibleClient;
pub use provider::{DEFAULT_MODEL, ModelProvider, ProviderSettings};
