//! Text rendering of stage inputs.

use animatic_core::{ScriptDesign, Storyboard};
use animatic_error::{AnimaticResult, JsonError};

const STORY_TEMPLATE_HEADER: &str = "参考模板：";
const STORYBOARD_TEMPLATE_HEADER: &str = "参考分镜模板：";

/// What the storyboard stage works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryboardInput<'a> {
    /// First round: design from the script.
    Fresh(&'a ScriptDesign),
    /// Later rounds: revise the previous storyboard using reviewer feedback.
    Revision {
        /// Storyboard produced in the previous round
        prior_storyboard: &'a Storyboard,
        /// Reviewer feedback, verbatim
        feedback: &'a str,
    },
}

impl StoryboardInput<'_> {
    /// Render as the storyboard stage's user message.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the prior storyboard cannot be serialized.
    pub fn render(&self) -> AnimaticResult<String> {
        match self {
            StoryboardInput::Fresh(script) => Ok(render_script_design(script)),
            StoryboardInput::Revision {
                prior_storyboard,
                feedback,
            } => render_revision(prior_storyboard, feedback),
        }
    }

    /// Whether this is a revision round.
    pub fn is_revision(&self) -> bool {
        matches!(self, StoryboardInput::Revision { .. })
    }
}

/// Characters then plot points, one line each.
///
/// # Examples
///
/// ```
/// use animatic_core::{Character, PlotPoint, ScriptDesign};
/// use animatic_pipeline::render_script_design;
///
/// let design = ScriptDesign {
///     characters: vec![Character::new("老人", "孤独", "白胡子")],
///     plot_points: vec![PlotPoint::new("拾瓶", "老人在海边捡到漂流瓶")],
/// };
/// assert_eq!(
///     render_script_design(&design),
///     "角色设计:\n- 老人: 孤独, 外观: 白胡子\n\n情节点:\n- 拾瓶: 老人在海边捡到漂流瓶"
/// );
/// ```
pub fn render_script_design(script: &ScriptDesign) -> String {
    let mut lines = vec!["角色设计:".to_string()];
    lines.extend(script.characters.iter().map(|c| {
        format!("- {}: {}, 外观: {}", c.name, c.characteristics, c.appearance)
    }));
    lines.push(String::new());
    lines.push("情节点:".to_string());
    lines.extend(
        script
            .plot_points
            .iter()
            .map(|p| format!("- {}: {}", p.title, p.description)),
    );
    lines.join("\n")
}

/// Prior storyboard as pretty JSON followed by the feedback.
///
/// # Errors
///
/// Returns a JSON error if the storyboard cannot be serialized.
pub fn render_revision(prior: &Storyboard, feedback: &str) -> AnimaticResult<String> {
    let rendered = serde_json::to_string_pretty(prior)
        .map_err(|e| JsonError::new(format!("Failed to render storyboard: {}", e)))?;
    Ok(format!("原分镜设计：\n{}\n\n优化建议：\n{}", rendered, feedback))
}

/// Visual description of every shot, numbered from 1.
///
/// Only `scene_elements` and `actions` are included.
pub fn render_viewer_input(storyboard: &Storyboard) -> String {
    let mut input = String::from("分镜设计中的画面和动作：\n");
    for (i, shot) in storyboard.shots.iter().enumerate() {
        input.push_str(&format!(
            "分镜{}. 画面一开始的构图描述: {}\n   画面后续的视觉动态变化: {}\n",
            i + 1,
            shot.scene_elements,
            shot.actions
        ));
    }
    input
}

/// Optimized story, viewer retelling and the storyboard's visual fields.
///
/// # Errors
///
/// Returns a JSON error if the field lists cannot be serialized.
pub fn render_review_input(
    optimized_story: &str,
    viewer_narrative: &str,
    storyboard: &Storyboard,
) -> AnimaticResult<String> {
    let scenes = serde_json::to_string(&storyboard.scene_elements())
        .map_err(|e| JsonError::new(format!("Failed to render scene list: {}", e)))?;
    let actions = serde_json::to_string(&storyboard.actions())
        .map_err(|e| JsonError::new(format!("Failed to render action list: {}", e)))?;
    Ok(format!(
        "原始故事：\n{}\n\n观看者描述的故事：\n{}\n\n分镜设计中的关键信息：\n画面：{}\n动作：{}\n",
        optimized_story, viewer_narrative, scenes, actions
    ))
}

/// Raw story, with the story template appended when given.
pub fn with_story_template(raw_story: &str, template: Option<&str>) -> String {
    append_template(raw_story, STORY_TEMPLATE_HEADER, template)
}

/// Fresh storyboard input, with the storyboard template appended when given.
pub fn with_storyboard_template(input: &str, template: Option<&str>) -> String {
    append_template(input, STORYBOARD_TEMPLATE_HEADER, template)
}

fn append_template(text: &str, header: &str, template: Option<&str>) -> String {
    match template {
        Some(template) => format!("{}\n\n{}\n{}", text, header, template),
        None => text.to_string(),
    }
}
