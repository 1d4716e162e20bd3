//! Pipeline stage identities.

use serde::{Deserialize, Serialize};

/// The five model-backed stages, in pipeline order.
///
/// The string form is the configuration key for the stage.
///
/// # Examples
///
/// ```
/// use animatic_pipeline::StageKind;
/// use std::str::FromStr;
///
/// assert_eq!(StageKind::StoryboardDesign.to_string(), "storyboard_design");
/// assert_eq!(StageKind::from_str("viewer").unwrap(), StageKind::Viewer);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StageKind {
    /// Rewrites the raw story into a clearer, complete one
    StoryOptimization,
    /// Extracts characters and plot points
    ScriptDesign,
    /// Produces the shot list
    StoryboardDesign,
    /// Retells the story from shot visuals alone
    Viewer,
    /// Compares the retelling with the story and approves or critiques
    Reviewer,
}

impl StageKind {
    /// Default prompt file name for this stage.
    pub fn default_prompt_file(&self) -> String {
        format!("{}.md", self)
    }
}
