//! Core `FeedbackProvider` trait and the remote `ApiProvider`.
//!
//! `ApiProvider` calls any OpenAI-compatible `/v1/chat/completions` endpoint
//! — Ollama (OpenAI mode), OpenAI, Groq, LM Studio, vLLM, etc.
//! All connection details come from [`ApiConfig`]; nothing is hardcoded.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::feedback::{
    AnalysisRequest, Correction, FeedbackResult, FeedbackSource, ScoreSet, CORRECT_USAGE,
    MAX_CORRECTIONS, MAX_SUGGESTIONS,
};
use crate::provider::prompt::PromptBuilder;

// ---------------------------------------------------------------------------
// ProviderError
// ---------------------------------------------------------------------------

/// Errors that can occur while obtaining feedback.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("feedback request timed out")]
    Timeout,

    /// The response could not be parsed as the expected JSON.
    #[error("failed to parse feedback response: {0}")]
    Parse(String),

    /// The API returned a response with no usable content.
    #[error("feedback API returned an empty response")]
    EmptyResponse,

    /// The remote API is switched off in the configuration.
    #[error("remote feedback API is disabled")]
    Disabled,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// FeedbackProvider trait
// ---------------------------------------------------------------------------

/// Async source of [`FeedbackResult`]s.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn FeedbackProvider>`).
#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<FeedbackResult, ProviderError>;
}

// ---------------------------------------------------------------------------
// ApiProvider
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint and parses its
/// JSON answer into a [`FeedbackResult`].
pub struct ApiProvider {
    client: reqwest::Client,
    config: ApiConfig,
    prompt_builder: PromptBuilder,
}

impl ApiProvider {
    /// Build an `ApiProvider` from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is used if the builder fails.
    pub fn from_config(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            prompt_builder: PromptBuilder::new(),
        }
    }
}

#[async_trait]
impl FeedbackProvider for ApiProvider {
    /// The `Authorization: Bearer …` header is attached only when
    /// `config.api_key` is a non-empty string.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<FeedbackResult, ProviderError> {
        if !self.config.enabled {
            return Err(ProviderError::Disabled);
        }

        let (system_msg, user_msg) = self.prompt_builder.build_chat(request);
        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "stream":      false,
            "temperature": self.config.temperature,
            "max_tokens":  768
        });

        let mut req = self.client.post(&url).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?.error_for_status()?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ProviderError::EmptyResponse)?;

        parse_feedback(content)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RemoteScores {
    pronunciation: f64,
    grammar: f64,
    vocabulary: f64,
    fluency: f64,
    #[serde(default)]
    overall: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RemoteFeedback {
    scores: RemoteScores,
    #[serde(default)]
    suggestions: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    corrections: Vec<Correction>,
}

fn to_score(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Strip an optional Markdown code fence around the model's JSON.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

/// Parse and sanitise the model's JSON answer.
///
/// Scores are clamped to `0..=100`; a supplied `overall` is kept as-is,
/// otherwise it is derived.  Lists are cut to the result caps.
pub fn parse_feedback(content: &str) -> Result<FeedbackResult, ProviderError> {
    let body = strip_code_fence(content);
    if body.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let remote: RemoteFeedback =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let s = &remote.scores;
    let mut scores = ScoreSet::new(
        to_score(s.pronunciation),
        to_score(s.grammar),
        to_score(s.vocabulary),
        to_score(s.fluency),
    );
    if let Some(overall) = s.overall {
        scores = scores.with_overall(to_score(overall));
    }

    let error_patterns: BTreeSet<String> = remote
        .corrections
        .iter()
        .filter_map(|c| c.rule.clone())
        .filter(|rule| rule != CORRECT_USAGE)
        .collect();

    let mut corrections = remote.corrections;
    corrections.truncate(MAX_CORRECTIONS);
    let mut suggestions = remote.suggestions;
    suggestions.extend(remote.strengths.iter().cloned());
    suggestions.truncate(MAX_SUGGESTIONS);

    Ok(FeedbackResult {
        scores,
        suggestions,
        corrections,
        error_patterns,
        strengths: remote.strengths,
        source: FeedbackSource::Remote,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
