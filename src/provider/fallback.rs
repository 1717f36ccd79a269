//! Fallback provider — wraps any [`FeedbackProvider`] and answers from the
//! local rule pipeline when it fails.
//!
//! When the remote call fails for any reason (`Request`, `Timeout`, `Parse`,
//! `EmptyResponse`, `Disabled`) [`FallbackProvider`] returns a locally
//! generated result of the same shape.  The result keeps
//! `source = Local`, so the UI can tell the learner it is demo feedback.

use async_trait::async_trait;

use crate::feedback::{AnalysisRequest, FeedbackResult};
use crate::provider::api::{FeedbackProvider, ProviderError};
use crate::provider::local::LocalProvider;

// ---------------------------------------------------------------------------
// FallbackProvider
// ---------------------------------------------------------------------------

/// A wrapper around any [`FeedbackProvider`] that never returns an error.
///
/// # Example
/// ```rust
/// use english_coach::config::ApiConfig;
/// use english_coach::feedback::FeedbackEngine;
/// use english_coach::provider::{ApiProvider, FallbackProvider, LocalProvider};
///
/// let remote = ApiProvider::from_config(&ApiConfig::default());
/// let provider = FallbackProvider::new(remote, LocalProvider::new(FeedbackEngine::new()));
/// // `provider` is safe to use even when the API is unreachable.
/// ```
pub struct FallbackProvider<P: FeedbackProvider> {
    inner: P,
    local: LocalProvider,
}

impl<P: FeedbackProvider> FallbackProvider<P> {
    pub fn new(inner: P, local: LocalProvider) -> Self {
        Self { inner, local }
    }
}

#[async_trait]
impl<P: FeedbackProvider> FeedbackProvider for FallbackProvider<P> {
    /// This implementation **never** returns `Err(_)`.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<FeedbackResult, ProviderError> {
        match self.inner.analyze(request).await {
            Ok(result) => Ok(result),
            Err(ProviderError::Disabled) => Ok(self.local.analyze_now(request)),
            Err(err) => {
                log::warn!(
                    "remote feedback failed ({err}); using local analysis (len={})",
                    request.text.len()
                );
                Ok(self.local.analyze_now(request))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{FeedbackEngine, FeedbackSource, Mode, ScoreSet};
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Always succeeds with a fixed remote result.
    struct AlwaysOk;

    #[async_trait]
    impl FeedbackProvider for AlwaysOk {
        async fn analyze(&self, _req: &AnalysisRequest) -> Result<FeedbackResult, ProviderError> {
            Ok(FeedbackResult {
                scores: ScoreSet::new(90, 90, 90, 90).with_overall(77),
                suggestions: vec!["remote".into()],
                corrections: Vec::new(),
                error_patterns: Default::default(),
                strengths: Vec::new(),
                source: FeedbackSource::Remote,
            })
        }
    }

    enum Failure {
        Request,
        Timeout,
        Parse,
        Empty,
        Disabled,
    }

    /// Always returns the given error.
    struct AlwaysFails(Failure);

    #[async_trait]
    impl FeedbackProvider for AlwaysFails {
        async fn analyze(&self, _req: &AnalysisRequest) -> Result<FeedbackResult, ProviderError> {
            Err(match self.0 {
                Failure::Request => ProviderError::Request("connection refused".into()),
                Failure::Timeout => ProviderError::Timeout,
                Failure::Parse => ProviderError::Parse("bad json".into()),
                Failure::Empty => ProviderError::EmptyResponse,
                Failure::Disabled => ProviderError::Disabled,
            })
        }
    }

    fn local() -> LocalProvider {
        LocalProvider::new(FeedbackEngine::seeded(5))
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("i like coffee.", Mode::Speaking)
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn passes_through_success() {
        let provider = FallbackProvider::new(AlwaysOk, local());
        let result = provider.analyze(&request()).await.unwrap();
        assert_eq!(result.source, FeedbackSource::Remote);
        assert_eq!(result.scores.overall, 77);
    }

    #[tokio::test]
    async fn every_failure_falls_back_to_local_pipeline() {
        for failure in [
            Failure::Request,
            Failure::Timeout,
            Failure::Parse,
            Failure::Empty,
            Failure::Disabled,
        ] {
            let provider = FallbackProvider::new(AlwaysFails(failure), local());
            let result = provider.analyze(&request()).await.unwrap();
            assert_eq!(result.source, FeedbackSource::Local);
            assert_eq!(result, local().analyze_now(&request()));
        }
    }

    /// FallbackProvider<P> must itself be a valid FeedbackProvider (object-safe).
    #[test]
    fn fallback_is_object_safe() {
        let _: Box<dyn FeedbackProvider> = Box::new(FallbackProvider::new(AlwaysOk, local()));
    }
}
