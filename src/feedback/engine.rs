//! Stateless text → [`FeedbackResult`] pipeline.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::assemble::assemble;
use super::patterns::match_errors;
use super::score::synthesize;
use super::segment::segment;
use super::types::{AnalysisRequest, FeedbackResult};

/// Runs segment → match → score → assemble for one request.
///
/// The engine holds no per-request state, so one instance can serve
/// concurrent callers.  With a seed, every call draws from a fresh
/// `StdRng::seed_from_u64(seed)` and identical requests give identical
/// results; without one, jitter comes from the thread-local generator.
///
/// ```rust
/// use english_coach::feedback::{AnalysisRequest, FeedbackEngine, Mode};
///
/// let engine = FeedbackEngine::seeded(42);
/// let result = engine.analyze(&AnalysisRequest::new("i like coffee.", Mode::Speaking));
/// assert_eq!(result.corrections[0].rule.as_deref(), Some("Capitalization"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackEngine {
    seed: Option<u64>,
}

impl FeedbackEngine {
    /// Engine with non-deterministic jitter.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Engine whose jitter is reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> FeedbackResult {
        match self.seed {
            Some(seed) => analyze_with(request, &mut StdRng::seed_from_u64(seed)),
            None => analyze_with(request, &mut rand::thread_rng()),
        }
    }
}

/// Run the pipeline with an explicit random source.
pub fn analyze_with<R: Rng + ?Sized>(request: &AnalysisRequest, rng: &mut R) -> FeedbackResult {
    let sentences = segment(&request.text);
    let corrections = match_errors(&sentences, request.is_detailed(), rng);
    let scores = synthesize(&request.text, &corrections, rng);

    log::debug!(
        "feedback: {} mode, {} sentences, {} corrections, overall {}",
        request.mode.as_str(),
        sentences.len(),
        corrections.len(),
        scores.overall
    );

    assemble(scores, &corrections)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
