//! Review verdict and the approval test.

use serde::{Deserialize, Serialize};

/// Prefix a reviewer reply must start with to approve the storyboard.
pub const APPROVAL_MARKER: &str = "【审核通过】";

/// Whether reviewer feedback asks for another storyboard revision.
///
/// The test is a literal prefix match: leading whitespace, other brackets or a
/// marker later in the text all count as "needs revision".
///
/// # Examples
///
/// ```
/// use animatic_pipeline::needs_revision;
///
/// assert!(!needs_revision("【审核通过】画面与故事一致。"));
/// assert!(needs_revision(" 【审核通过】"));
/// assert!(needs_revision("第三个镜头缺少瓶子的特写。"));
/// ```
pub fn needs_revision(feedback: &str) -> bool {
    !feedback.starts_with(APPROVAL_MARKER)
}

/// Reviewer output paired with the derived continue/stop decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ReviewVerdict {
    /// Raw reviewer reply
    feedback: String,
    /// True unless the reply starts with [`APPROVAL_MARKER`]
    needs_revision: bool,
}

impl ReviewVerdict {
    /// Derive a verdict from the reviewer's reply.
    pub fn from_feedback(feedback: impl Into<String>) -> Self {
        let feedback = feedback.into();
        let needs_revision = needs_revision(&feedback);
        Self {
            feedback,
            needs_revision,
        }
    }

    /// True when the reviewer approved.
    pub fn is_approved(&self) -> bool {
        !self.needs_revision
    }

    /// Take ownership of the feedback text.
    pub fn into_feedback(self) -> String {
        self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_must_be_exact_prefix() {
        assert!(!needs_revision(APPROVAL_MARKER));
        assert!(needs_revision(""));
        assert!(needs_revision("[审核通过] close but not the marker"));
        assert!(needs_revision("意见：【审核通过】"));
        assert!(needs_revision("\n【审核通过】"));
    }

    #[test]
    fn test_verdict_keeps_feedback_verbatim() {
        let verdict = ReviewVerdict::from_feedback("【审核通过】\n整体流畅");
        assert!(verdict.is_approved());
        assert!(!*verdict.needs_revision());
        assert_eq!(verdict.into_feedback(), "【审核通过】\n整体流畅");

        let verdict = ReviewVerdict::from_feedback("镜头2节奏太快");
        assert!(*verdict.needs_revision());
    }
}
