//! Writing pipeline results to disk.
//!
//! Files are named `animation_script_{YYYYMMDD_HHMMSS}` with a `.json` or `.md`
//! extension.

use animatic_core::{ScriptDesign, Shot, Storyboard};
use animatic_error::{AnimaticResult, JsonError, PipelineError, PipelineErrorKind};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const SHOT_HEADERS: [&str; 7] = [
    "镜号",
    "情节标题",
    "画面描述",
    "动作设计",
    "BGM描述",
    "特效音描述",
    "建议时长",
];
const CHARACTER_HEADERS: [&str; 3] = ["角色名称", "性格特点", "形象设计"];
const NO_CHARACTERS: &str = "未检测到角色设计信息";

/// Which files to write.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    /// `.json` only
    Json,
    /// `.md` only
    Markdown,
    /// Both files
    #[default]
    Both,
}

impl ExportFormat {
    fn json(&self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::Both)
    }

    fn markdown(&self) -> bool {
        matches!(self, ExportFormat::Markdown | ExportFormat::Both)
    }
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    generated_at: String,
    storyboard: &'a [Shot],
    script_design: &'a ScriptDesign,
}

/// File name stem for a timestamp.
///
/// # Examples
///
/// ```
/// use animatic::export_stem;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(export_stem(&at), "animation_script_20250309_140507");
/// ```
pub fn export_stem(at: &DateTime<Local>) -> String {
    format!("animation_script_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Pretty JSON with the shot list and the script design.
///
/// An absent storyboard is written as an empty shot list.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn render_export_json(
    storyboard: Option<&Storyboard>,
    script: &ScriptDesign,
    at: &DateTime<Local>,
) -> AnimaticResult<String> {
    let document = ExportDocument {
        generated_at: at.to_rfc3339(),
        storyboard: storyboard.map(|s| s.shots.as_slice()).unwrap_or(&[]),
        script_design: script,
    };
    Ok(serde_json::to_string_pretty(&document)
        .map_err(|e| JsonError::new(format!("Failed to serialize export: {}", e)))?)
}

/// Markdown shot table followed by the character table.
pub fn render_markdown(
    storyboard: Option<&Storyboard>,
    script: &ScriptDesign,
    at: &DateTime<Local>,
) -> String {
    let mut out = String::from("# 动画脚本\n\n");
    out.push_str(&format!("生成时间：{}\n\n", at.format("%Y-%m-%d %H:%M:%S")));

    out.push_str("## 分镜脚本\n\n");
    push_row(&mut out, SHOT_HEADERS.iter().copied());
    push_row(&mut out, SHOT_HEADERS.iter().map(|_| "---"));
    for shot in storyboard.map(|s| s.shots.as_slice()).unwrap_or(&[]) {
        push_row(
            &mut out,
            [
                shot.shot_id.as_str(),
                shot.plot_title.as_str(),
                shot.scene_elements.as_str(),
                shot.actions.as_str(),
                shot.bgm_description.as_str(),
                shot.sound_effect.as_str(),
                shot.duration.as_str(),
            ],
        );
    }

    out.push_str("\n## 角色设计\n\n");
    if script.characters.is_empty() {
        out.push_str(NO_CHARACTERS);
        out.push('\n');
    } else {
        push_row(&mut out, CHARACTER_HEADERS.iter().copied());
        push_row(&mut out, CHARACTER_HEADERS.iter().map(|_| "---"));
        for character in &script.characters {
            push_row(
                &mut out,
                [
                    character.name.as_str(),
                    character.characteristics.as_str(),
                    character.appearance.as_str(),
                ],
            );
        }
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&escape_cell(cell));
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

/// Writes results into a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotListExporter {
    output_dir: PathBuf,
}

impl ShotListExporter {
    /// Exporter writing into `output_dir` (created on first export).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export with the current local time in the file names.
    ///
    /// # Errors
    ///
    /// Returns `Export` if the directory or a file cannot be written.
    pub fn export(
        &self,
        storyboard: Option<&Storyboard>,
        script: &ScriptDesign,
        format: ExportFormat,
    ) -> AnimaticResult<Vec<PathBuf>> {
        self.export_at(storyboard, script, format, &Local::now())
    }

    /// Export with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns `Export` if the directory or a file cannot be written.
    #[instrument(skip(self, storyboard, script), fields(output_dir = %self.output_dir.display()))]
    pub fn export_at(
        &self,
        storyboard: Option<&Storyboard>,
        script: &ScriptDesign,
        format: ExportFormat,
        at: &DateTime<Local>,
    ) -> AnimaticResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            PipelineError::new(PipelineErrorKind::Export(format!(
                "{}: {}",
                self.output_dir.display(),
                e
            )))
        })?;

        let stem = export_stem(at);
        let mut written = Vec::new();

        if format.json() {
            let path = self.output_dir.join(format!("{stem}.json"));
            write_file(&path, &render_export_json(storyboard, script, at)?)?;
            written.push(path);
        }
        if format.markdown() {
            let path = self.output_dir.join(format!("{stem}.md"));
            write_file(&path, &render_markdown(storyboard, script, at))?;
            written.push(path);
        }

        info!(
            files = written.len(),
            shots = storyboard.map(Storyboard::len).unwrap_or(0),
            "Results exported"
        );
        Ok(written)
    }
}

fn write_file(path: &Path, content: &str) -> AnimaticResult<()> {
    std::fs::write(path, content).map_err(|e| {
        PipelineError::new(PipelineErrorKind::Export(format!("{}: {}", path.display(), e)))
    })?;
    debug!(path = %path.display(), bytes = content.len(), "Wrote export file");
    Ok(())
}
