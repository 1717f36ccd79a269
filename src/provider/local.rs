//! In-process provider backed by the rule pipeline.

use async_trait::async_trait;

use crate::feedback::{AnalysisRequest, FeedbackEngine, FeedbackResult};
use crate::provider::api::{FeedbackProvider, ProviderError};

/// Wraps a [`FeedbackEngine`]; never returns an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider {
    engine: FeedbackEngine,
}

impl LocalProvider {
    pub fn new(engine: FeedbackEngine) -> Self {
        Self { engine }
    }

    /// Synchronous analysis, for callers outside an async context.
    pub fn analyze_now(&self, request: &AnalysisRequest) -> FeedbackResult {
        self.engine.analyze(request)
    }
}

#[async_trait]
impl FeedbackProvider for LocalProvider {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<FeedbackResult, ProviderError> {
        Ok(self.analyze_now(request))
    }
}
