//! Feedback providers.
//!
//! This module provides:
//! * [`FeedbackProvider`] — async trait implemented by all feedback backends.
//! * [`LocalProvider`] — the in-process rule pipeline; never fails.
//! * [`ApiProvider`] — OpenAI-compatible REST API tutor.
//! * [`FallbackProvider`] — wraps any provider; answers locally on failure.
//! * [`PromptBuilder`] — builds the tutor prompts.
//! * [`ProviderError`] — error variants for remote feedback.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use english_coach::config::AppConfig;
//! use english_coach::feedback::{AnalysisRequest, FeedbackEngine, Mode};
//! use english_coach::provider::{ApiProvider, FallbackProvider, FeedbackProvider, LocalProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let local = LocalProvider::new(FeedbackEngine::with_seed(config.feedback.seed));
//!     let provider = FallbackProvider::new(ApiProvider::from_config(&config.api), local);
//!
//!     let request = AnalysisRequest::new("i like coffee.", Mode::Speaking);
//!     let result = provider.analyze(&request).await.unwrap();
//!     println!("overall {}", result.scores.overall);
//! }
//! ```

pub mod api;
pub mod fallback;
pub mod local;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use api::{parse_feedback, ApiProvider, FeedbackProvider, ProviderError};
pub use fallback::FallbackProvider;
pub use local::LocalProvider;
pub use prompt::PromptBuilder;
