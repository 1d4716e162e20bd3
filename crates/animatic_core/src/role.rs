//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message in a model conversation.
///
/// # Examples
///
/// ```
/// use animatic_core::Role;
///
/// assert_ne!(Role::System, Role::User);
/// assert_eq!(format!("{}", Role::System), "System");
/// assert_eq!(Role::Assistant.as_api_str(), "assistant");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// System instructions (the stage prompt)
    System,
    /// Input supplied by the pipeline
    User,
    /// Model replies
    Assistant,
}

impl Role {
    /// Lowercase role name used by chat-completion APIs.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
