//! Script design: characters and plot points derived from the optimized story.

use crate::StructuredOutput;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A character introduced by the script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    /// Character name
    pub name: String,
    /// Personality traits
    pub characteristics: String,
    /// Visual appearance
    pub appearance: String,
}

impl Character {
    /// Create a character record.
    pub fn new(
        name: impl Into<String>,
        characteristics: impl Into<String>,
        appearance: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            characteristics: characteristics.into(),
            appearance: appearance.into(),
        }
    }
}

/// A beat of the narrative, in story order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlotPoint {
    /// Short title
    pub title: String,
    /// What happens
    pub description: String,
}

impl PlotPoint {
    /// Create a plot point record.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Characters in introduction order plus plot points in narrative order.
///
/// Both lists are required when deserializing but may be empty.
///
/// # Examples
///
/// ```
/// use animatic_core::ScriptDesign;
///
/// let design: ScriptDesign =
///     serde_json::from_str(r#"{"characters": [], "plot_points": []}"#).unwrap();
/// assert!(design.characters.is_empty());
///
/// assert!(serde_json::from_str::<ScriptDesign>(r#"{"characters": []}"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScriptDesign {
    /// Characters, in introduction order
    pub characters: Vec<Character>,
    /// Plot points, in narrative order
    pub plot_points: Vec<PlotPoint>,
}

impl StructuredOutput for ScriptDesign {
    const NAME: &'static str = "ScriptDesign";

    fn shape_hint() -> serde_json::Value {
        json!({
            "characters": [
                {
                    "name": "角色名称",
                    "characteristics": "角色性格特点",
                    "appearance": "角色外貌描述"
                }
            ],
            "plot_points": [
                {
                    "title": "情节点标题",
                    "description": "情节点详细描述"
                }
            ]
        })
    }
}
