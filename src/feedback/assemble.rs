//! Assembles scores and corrections into the final [`FeedbackResult`].

use std::collections::BTreeSet;

use super::patterns::CORRECT_USAGE;
use super::types::{
    Correction, FeedbackResult, FeedbackSource, ScoreSet, MAX_CORRECTIONS, MAX_SUGGESTIONS,
};

/// Sub-scores below this get an improvement suggestion.
pub const IMPROVEMENT_THRESHOLD: u8 = 80;
/// Sub-scores above this get a strength statement.
pub const STRENGTH_THRESHOLD: u8 = 85;

struct SkillTemplates {
    improvement: &'static str,
    strength: &'static str,
}

const GRAMMAR_TEXT: SkillTemplates = SkillTemplates {
    improvement: "Review basic sentence structure and subject-verb agreement.",
    strength: "Your grammar is accurate and well controlled.",
};
const VOCABULARY_TEXT: SkillTemplates = SkillTemplates {
    improvement: "Try using a wider range of vocabulary and more descriptive words.",
    strength: "You use a rich and varied vocabulary.",
};
const PRONUNCIATION_TEXT: SkillTemplates = SkillTemplates {
    improvement: "Practice pronouncing difficult sounds slowly and clearly.",
    strength: "Your pronunciation is clear and easy to understand.",
};
const FLUENCY_TEXT: SkillTemplates = SkillTemplates {
    improvement: "Work on speaking more smoothly with fewer pauses.",
    strength: "You express your ideas fluently and naturally.",
};

const GENERIC_SUGGESTIONS: [&str; 3] = [
    "Keep practicing regularly to build confidence.",
    "Read English texts aloud to improve rhythm and intonation.",
    "Try to use new words from today's lesson in your own sentences.",
];

/// Build the result contract consumed by the UI.
///
/// The score set is taken verbatim, including any overridden `overall`.
pub fn assemble(scores: ScoreSet, corrections: &[Correction]) -> FeedbackResult {
    let skills = [
        (scores.grammar, &GRAMMAR_TEXT),
        (scores.vocabulary, &VOCABULARY_TEXT),
        (scores.pronunciation, &PRONUNCIATION_TEXT),
        (scores.fluency, &FLUENCY_TEXT),
    ];

    let mut improvements: Vec<String> = Vec::new();
    let mut strengths: Vec<String> = Vec::new();
    for (score, text) in skills {
        if score < IMPROVEMENT_THRESHOLD {
            improvements.push(text.improvement.to_string());
        }
        if score > STRENGTH_THRESHOLD {
            strengths.push(text.strength.to_string());
        }
    }

    if improvements.is_empty() && strengths.is_empty() {
        improvements = GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
    }

    let suggestions = improvements
        .into_iter()
        .chain(strengths.iter().cloned())
        .take(MAX_SUGGESTIONS)
        .collect();

    let error_patterns: BTreeSet<String> = corrections
        .iter()
        .filter_map(|c| c.rule.as_deref())
        .filter(|rule| *rule != CORRECT_USAGE)
        .map(str::to_string)
        .collect();

    FeedbackResult {
        scores,
        suggestions,
        corrections: corrections.iter().take(MAX_CORRECTIONS).cloned().collect(),
        error_patterns,
        strengths,
        source: FeedbackSource::Local,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
