//! Data types shared by every stage of the feedback pipeline.
//!
//! All types derive `Serialize`/`Deserialize` so results can be stored in the
//! record store and exchanged with the remote feedback API unchanged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which practice activity produced the text being analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Speaking,
    Writing,
    Reading,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Speaking
    }
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Mode; 3] = [Mode::Speaking, Mode::Writing, Mode::Reading];

    /// Lowercase tag used on the wire and in the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Speaking => "speaking",
            Mode::Writing => "writing",
            Mode::Reading => "reading",
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisRequest
// ---------------------------------------------------------------------------

/// One request for feedback on a piece of learner text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    pub mode: Mode,
    /// Run the grammar-rule table in addition to the common-error table.
    /// `None` means "use the mode default" (see [`AnalysisRequest::is_detailed`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed: Option<bool>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, mode: Mode) -> Self {
        Self {
            text: text.into(),
            mode,
            detailed: None,
        }
    }

    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = Some(detailed);
        self
    }

    /// Effective detail level: explicit flag, else `true` only for writing.
    pub fn is_detailed(&self) -> bool {
        self.detailed.unwrap_or(self.mode == Mode::Writing)
    }
}

// ---------------------------------------------------------------------------
// Correction
// ---------------------------------------------------------------------------

/// One flagged sentence with a possible fix and an explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub original: String,
    /// Equal to `original` when the rule has no automatic fix.
    pub corrected: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl Correction {
    pub fn has_rule(&self, name: &str) -> bool {
        self.rule.as_deref() == Some(name)
    }
}

// ---------------------------------------------------------------------------
// ScoreSet
// ---------------------------------------------------------------------------

/// Upper bound shared by every score.
pub const MAX_SCORE: u8 = 100;

/// The four sub-scores plus the weighted overall score, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub pronunciation: u8,
    pub grammar: u8,
    pub vocabulary: u8,
    pub fluency: u8,
    pub overall: u8,
}

impl ScoreSet {
    /// Build a score set whose `overall` is derived from the sub-scores.
    pub fn new(pronunciation: u8, grammar: u8, vocabulary: u8, fluency: u8) -> Self {
        let pronunciation = pronunciation.min(MAX_SCORE);
        let grammar = grammar.min(MAX_SCORE);
        let vocabulary = vocabulary.min(MAX_SCORE);
        let fluency = fluency.min(MAX_SCORE);
        Self {
            pronunciation,
            grammar,
            vocabulary,
            fluency,
            overall: weighted_overall(pronunciation, grammar, vocabulary, fluency),
        }
    }

    /// Replace the derived overall score with a caller-supplied value.
    ///
    /// Downstream stages keep the override as-is.
    pub fn with_overall(mut self, overall: u8) -> Self {
        self.overall = overall.min(MAX_SCORE);
        self
    }

    /// `overall` recomputed from the current sub-scores.
    pub fn derived_overall(&self) -> u8 {
        weighted_overall(self.pronunciation, self.grammar, self.vocabulary, self.fluency)
    }
}

/// `round(0.2 p + 0.3 g + 0.3 v + 0.2 f)`.
pub fn weighted_overall(pronunciation: u8, grammar: u8, vocabulary: u8, fluency: u8) -> u8 {
    let sum = 0.2 * f64::from(pronunciation)
        + 0.3 * f64::from(grammar)
        + 0.3 * f64::from(vocabulary)
        + 0.2 * f64::from(fluency);
    sum.round().clamp(0.0, f64::from(MAX_SCORE)) as u8
}

// ---------------------------------------------------------------------------
// FeedbackResult
// ---------------------------------------------------------------------------

/// Where a [`FeedbackResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackSource {
    /// Produced by the in-process rule pipeline.
    Local,
    /// Produced by the remote feedback API.
    Remote,
}

impl Default for FeedbackSource {
    fn default() -> Self {
        Self::Local
    }
}

/// Maximum number of suggestions in a result.
pub const MAX_SUGGESTIONS: usize = 5;
/// Maximum number of corrections in a result.
pub const MAX_CORRECTIONS: usize = 3;

/// Final output of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResult {
    pub scores: ScoreSet,
    pub suggestions: Vec<String>,
    pub corrections: Vec<Correction>,
    #[serde(default)]
    pub error_patterns: BTreeSet<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub source: FeedbackSource,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
