//! Prompt builder for the remote English-tutor feedback API.
//!
//! [`PromptBuilder::build_chat`] returns a `(system_msg, user_msg)` pair for
//! any OpenAI-compatible `/v1/chat/completions` endpoint.  The system message
//! pins the JSON shape the response is parsed into; the user message carries
//! the practice mode and the learner's text.

use crate::feedback::{AnalysisRequest, Mode};

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

const SYSTEM_INSTRUCTION: &str = "\
You are an English tutor giving feedback on a learner's text.
Reply with ONLY a JSON object, no explanation and no code fences:

{
  \"scores\": {\"pronunciation\": 0-100, \"grammar\": 0-100, \"vocabulary\": 0-100, \"fluency\": 0-100},
  \"suggestions\": [\"short improvement tip\", ...],
  \"strengths\": [\"short strength statement\", ...],
  \"corrections\": [{\"original\": \"...\", \"corrected\": \"...\", \"explanation\": \"...\", \"rule\": \"...\"}]
}

Rules:
1. At most 5 suggestions and at most 3 corrections, in sentence order.
2. One correction per sentence; if a sentence has no fix, set corrected equal to original.
3. Name the rule with a short label such as \"Capitalization\" or \"Spelling\".
4. Be encouraging and concrete.";

// ---------------------------------------------------------------------------
// Mode hints
// ---------------------------------------------------------------------------

fn mode_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Speaking => {
            "The text is a speech transcript; weigh pronunciation and fluency, ignore punctuation."
        }
        Mode::Writing => "The text is a written answer; check grammar and spelling closely.",
        Mode::Reading => "The text was read aloud from a passage; focus on pronunciation.",
    }
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds feedback prompts in chat-message format.
///
/// # Example
/// ```rust
/// use english_coach::feedback::{AnalysisRequest, Mode};
/// use english_coach::provider::PromptBuilder;
///
/// let (system, user) = PromptBuilder::new()
///     .build_chat(&AnalysisRequest::new("i like coffee", Mode::Speaking));
/// assert!(system.contains("JSON"));
/// assert!(user.contains("i like coffee"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a **(system_msg, user_msg)** pair.
    pub fn build_chat(&self, request: &AnalysisRequest) -> (String, String) {
        let system_msg = SYSTEM_INSTRUCTION.to_string();

        let mut user_msg = String::with_capacity(request.text.len() + 256);
        user_msg.push_str(&format!("Mode: {}\n", request.mode.as_str()));
        user_msg.push_str(mode_hint(request.mode));
        if request.is_detailed() {
            user_msg.push_str("\nGive a detailed grammar review.");
        }
        user_msg.push_str(&format!("\n\nLearner text:\n{}\n", request.text));

        (system_msg, user_msg)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
