//! Pulling JSON documents out of free-form model replies.
//!
//! Models asked for JSON still wrap it in code fences or surround it with
//! commentary. Every failure here is a [`ModelsErrorKind::MalformedOutput`].

use animatic_error::{ModelsError, ModelsErrorKind, ModelsResult};
use serde::de::DeserializeOwned;

const PREVIEW_CHARS: usize = 100;

/// Locate the JSON document in a reply.
///
/// Candidates, in order: ```json fenced blocks, any other fenced block, then
/// every balanced `{...}` or `[...]` span in order of its opening delimiter.
/// The first candidate that is syntactically valid JSON wins.
///
/// # Errors
///
/// Returns `MalformedOutput` if no candidate is valid JSON.
///
/// # Examples
///
/// ```
/// use animatic_pipeline::extract_json;
///
/// let reply = "好的，以下是剧本设计：\n```json\n{\"characters\": [], \"plot_points\": []}\n```";
/// let json = extract_json(reply).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> ModelsResult<String> {
    let blocks = fenced_blocks(response);
    let (tagged, untagged): (Vec<_>, Vec<_>) = blocks
        .into_iter()
        .partition(|block| block.tag.eq_ignore_ascii_case("json"));

    let fenced = tagged.into_iter().chain(untagged).map(|block| block.content);
    let spans = response
        .char_indices()
        .filter(|(_, ch)| matches!(ch, '{' | '['))
        .filter_map(|(start, _)| balanced_span(response, start));

    if let Some(json) = fenced.chain(spans).find(|candidate| is_json(candidate)) {
        return Ok(json.to_string());
    }

    tracing::error!(
        response_length = response.len(),
        response_preview = %preview(response),
        "No JSON found in model response"
    );

    Err(ModelsError::new(ModelsErrorKind::MalformedOutput(format!(
        "no JSON found in response (length: {})",
        response.len()
    ))))
}

/// A fenced code block: its language tag and trimmed body.
struct FencedBlock<'a> {
    tag: &'a str,
    content: &'a str,
}

/// Every fenced code block in the reply.
///
/// An unterminated fence yields everything after it (truncated replies).
fn fenced_blocks(response: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = response;

    while let Some(start) = rest.find("```") {
        let after = &rest[start + 3..];
        let tag_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(after.len());
        let (tag, body) = after.split_at(tag_len);

        match body.find("```") {
            Some(end) => {
                blocks.push(FencedBlock {
                    tag,
                    content: body[..end].trim(),
                });
                rest = &body[end + 3..];
            }
            None => {
                blocks.push(FencedBlock {
                    tag,
                    content: body.trim(),
                });
                break;
            }
        }
    }

    blocks
}

/// Balanced span opening at byte `start`, ignoring delimiters inside strings.
fn balanced_span(response: &str, start: usize) -> Option<&str> {
    let tail = &response[start..];
    let open = tail.chars().next()?;
    let close = match open {
        '{' => '}',
        '[' => ']',
        _ => return None,
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in tail.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&tail[..i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

fn is_json(candidate: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(candidate).is_ok()
}

/// Deserialize an extracted document into `T`.
///
/// # Errors
///
/// Returns `MalformedOutput` carrying the serde message and a preview of the
/// document.
pub fn parse_json<T>(json_str: &str) -> ModelsResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = preview(json_str);
        tracing::error!(error = %e, json_preview = %preview, "JSON parsing failed");
        ModelsError::new(ModelsErrorKind::MalformedOutput(format!(
            "{} (JSON: {}...)",
            e, preview
        )))
    })
}

/// First 100 characters of a text, for logs.
pub(crate) fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use animatic_core::{ScriptDesign, Storyboard};

    #[test]
    fn test_extract_json_from_tagged_fence() {
        let response = r#"
设计如下：

```json
{
  "characters": [{"name": "老人", "characteristics": "孤独", "appearance": "白胡子"}],
  "plot_points": []
}
```

如需调整请告诉我。
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        let design: ScriptDesign = parse_json(&json).unwrap();
        assert_eq!(design.characters[0].name, "老人");
    }

    #[test]
    fn test_extract_json_from_bare_fence() {
        let response = "```\n{\"shots\": []}\n```";
        assert_eq!(extract_json(response).unwrap(), "{\"shots\": []}");
    }

    #[test]
    fn test_extract_balanced_ignores_braces_in_strings() {
        let response = r#"Result: {"text": "a } inside", "nested": {"v": 1}} trailing"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"text": "a } inside", "nested": {"v": 1}}"#);
    }

    #[test]
    fn test_extract_balanced_handles_escaped_quotes() {
        let response = r#"{"text": "She said \"hi\" {", "n": 1}"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_array_first_when_it_opens_first() {
        let response = r#"[{"id": 1}, {"id": 2}] and {"other": true}"#;
        assert!(extract_json(response).unwrap().starts_with('['));
    }

    #[test]
    fn test_skips_non_json_fence() {
        let response = "说明：\n```text\n仅供参考\n```\n{\"characters\": [], \"plot_points\": []}";
        let json = extract_json(response).unwrap();
        let design: ScriptDesign = parse_json(&json).unwrap();
        assert!(design.characters.is_empty());
    }

    #[test]
    fn test_prefers_json_tagged_fence_over_earlier_fence() {
        let response = "```\n{\"draft\": true}\n```\n```json\n{\"shots\": []}\n```";
        assert_eq!(extract_json(response).unwrap(), "{\"shots\": []}");
    }

    #[test]
    fn test_skips_bracketed_prose_before_object() {
        let response = "分镜如下 [共0镜]：\n{\"shots\": []}";
        let json = extract_json(response).unwrap();
        let board: Storyboard = parse_json(&json).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_invalid_fence_falls_back_to_balanced_span() {
        let response = "```json\n{\"shots\": [\n```\n最终结果：{\"shots\": []}";
        assert_eq!(extract_json(response).unwrap(), "{\"shots\": []}");
    }

    #[test]
    fn test_no_json_is_malformed_output() {
        let err = extract_json("抱歉，我无法完成这个请求。").unwrap_err();
        assert!(matches!(err.kind, ModelsErrorKind::MalformedOutput(_)));
    }

    #[test]
    fn test_parse_json_missing_field_is_malformed_output() {
        let err = parse_json::<ScriptDesign>(r#"{"characters": []}"#).unwrap_err();
        match err.kind {
            ModelsErrorKind::MalformedOutput(message) => assert!(message.contains("plot_points")),
            other => panic!("unexpected error kind: {other}"),
        }
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "镜".repeat(150);
        assert_eq!(preview(&text).chars().count(), 100);
    }
}
