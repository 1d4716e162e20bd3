//! Storyboard: the ordered shot list produced by each loop iteration.

use crate::StructuredOutput;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One continuous camera setup with its visual, audio and timing attributes.
///
/// `shot_id` and `duration` are free-form strings as written by the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shot {
    /// Shot number
    pub shot_id: String,
    /// Title of the plot point this shot belongs to
    pub plot_title: String,
    /// Opening composition
    pub scene_elements: String,
    /// Subsequent visual change
    pub actions: String,
    /// Background music
    pub bgm_description: String,
    /// Sound effects
    pub sound_effect: String,
    /// Suggested duration
    pub duration: String,
}

/// Shots in playback order.
///
/// Models may emit the list under `storyboards`, which is accepted as an alias.
///
/// # Examples
///
/// ```
/// use animatic_core::Storyboard;
///
/// let board: Storyboard = serde_json::from_str(r#"{"storyboards": []}"#).unwrap();
/// assert!(board.shots.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Storyboard {
    /// Shots, in playback order
    #[serde(alias = "storyboards")]
    pub shots: Vec<Shot>,
}

impl Storyboard {
    /// Create a storyboard from shots.
    pub fn new(shots: Vec<Shot>) -> Self {
        Self { shots }
    }

    /// Number of shots.
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// Whether the storyboard has no shots.
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Opening compositions, in playback order.
    pub fn scene_elements(&self) -> Vec<&str> {
        self.shots.iter().map(|s| s.scene_elements.as_str()).collect()
    }

    /// Visual changes, in playback order.
    pub fn actions(&self) -> Vec<&str> {
        self.shots.iter().map(|s| s.actions.as_str()).collect()
    }
}

impl StructuredOutput for Storyboard {
    const NAME: &'static str = "Storyboard";

    fn shape_hint() -> serde_json::Value {
        json!({
            "shots": [
                {
                    "shot_id": "镜号",
                    "plot_title": "情节标题",
                    "scene_elements": "画面一开始的构图描述",
                    "actions": "画面后续的动作",
                    "bgm_description": "BGM描述",
                    "sound_effect": "特效音描述",
                    "duration": "建议时长"
                }
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(id: &str, scene: &str, action: &str) -> Shot {
        Shot {
            shot_id: id.to_string(),
            plot_title: "开场".to_string(),
            scene_elements: scene.to_string(),
            actions: action.to_string(),
            bgm_description: "钢琴".to_string(),
            sound_effect: "海浪".to_string(),
            duration: "3s".to_string(),
        }
    }

    #[test]
    fn test_visual_fields_keep_playback_order() {
        let board = Storyboard::new(vec![shot("1", "灯塔", "灯亮"), shot("2", "海滩", "瓶子漂来")]);
        assert_eq!(board.scene_elements(), vec!["灯塔", "海滩"]);
        assert_eq!(board.actions(), vec!["灯亮", "瓶子漂来"]);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_shot_requires_every_field() {
        let partial = r#"{"shots": [{"shot_id": "1", "scene_elements": "x"}]}"#;
        assert!(serde_json::from_str::<Storyboard>(partial).is_err());
    }

    #[test]
    fn test_shape_hint_deserializes() {
        let hinted: Storyboard = serde_json::from_value(Storyboard::shape_hint()).unwrap();
        assert_eq!(hinted.len(), 1);
    }
}
