//! Language-feedback pipeline.
//!
//! This module provides:
//! * [`segment`] — splits text into sentences.
//! * [`match_errors`] — common-error and grammar-rule detection.
//! * [`synthesize`] — bounded, jittered sub-scores plus the weighted overall.
//! * [`assemble`] — packages scores and corrections into a [`FeedbackResult`].
//! * [`FeedbackEngine`] — runs the four stages for an [`AnalysisRequest`].
//!
//! ```text
//! text ──segment──▶ sentences ──match_errors──▶ corrections
//!                                      │
//!                 text + corrections ──synthesize──▶ ScoreSet
//!                                      │
//!                scores + corrections ──assemble──▶ FeedbackResult
//! ```

pub mod assemble;
pub mod engine;
pub mod patterns;
pub mod score;
pub mod segment;
pub mod types;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use assemble::assemble;
pub use engine::{analyze_with, FeedbackEngine};
pub use patterns::{match_errors, match_sentence, CORRECT_USAGE, SPELLING};
pub use score::{synthesize, TextStats};
pub use segment::segment;
pub use types::{
    AnalysisRequest, Correction, FeedbackResult, FeedbackSource, Mode, ScoreSet, MAX_CORRECTIONS,
    MAX_SCORE, MAX_SUGGESTIONS,
};
