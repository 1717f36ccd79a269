//! Practice state machine and shared application state.
//!
//! [`PracticeState`] drives the orchestrator.  The UI reads it through
//! [`SharedState`] each frame to decide which view to render.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::AppConfig;
use crate::feedback::{FeedbackResult, Mode};
use crate::store::UserProfile;

// ---------------------------------------------------------------------------
// PracticeState
// ---------------------------------------------------------------------------

/// States of one practice round.
///
/// ```text
/// Idle ──StartListening──▶ Listening ──transcript──▶ Analyzing ──▶ Result
///      ──SubmitText──────────────────────────────▶ Analyzing ──▶ Result
/// any state ──error──▶ Error
/// Result / Error ──next command──▶ Listening / Analyzing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PracticeState {
    #[default]
    Idle,
    /// The recognizer is running; fragments accumulate in `transcript`.
    Listening,
    /// Feedback is being produced.
    Analyzing,
    /// `feedback` holds the result of the last round.
    Result,
    /// `error_message` says what went wrong.
    Error,
}

impl PracticeState {
    /// `true` while a round is in flight; the UI disables its buttons.
    ///
    /// ```
    /// use english_coach::practice::PracticeState;
    ///
    /// assert!(PracticeState::Listening.is_busy());
    /// assert!(PracticeState::Analyzing.is_busy());
    /// assert!(!PracticeState::Result.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, PracticeState::Listening | PracticeState::Analyzing)
    }

    /// Short label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            PracticeState::Idle => "Ready",
            PracticeState::Listening => "Listening",
            PracticeState::Analyzing => "Analyzing",
            PracticeState::Result => "Done",
            PracticeState::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Everything the practice window shows.
///
/// Mutated by the orchestrator, read by the egui update loop.
pub struct AppState {
    pub practice: PracticeState,
    /// Mode of the current (or last) round.
    pub mode: Mode,
    /// Text being analysed, or the live transcript while listening.
    pub transcript: String,
    pub feedback: Option<FeedbackResult>,
    /// Id of the session record stored for `feedback`.
    pub session_id: Option<String>,
    /// Points earned across every stored reward.
    pub total_points: u32,
    /// Learner profile loaded (or created) from the store at startup.
    pub profile: Option<UserProfile>,
    pub error_message: Option<String>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            practice: PracticeState::Idle,
            mode: config.feedback.default_mode,
            transcript: String::new(),
            feedback: None,
            session_id: None,
            total_points: 0,
            profile: None,
            error_message: None,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`AppState`].  Do not hold the lock across `.await`.
pub type SharedState = Arc<Mutex<AppState>>;

pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(AppState::new(config)))
}

/// Lock `state`, recovering the data if a previous holder panicked.
pub fn lock_state(state: &SharedState) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_states() {
        assert!(!PracticeState::Idle.is_busy());
        assert!(PracticeState::Listening.is_busy());
        assert!(PracticeState::Analyzing.is_busy());
        assert!(!PracticeState::Result.is_busy());
        assert!(!PracticeState::Error.is_busy());
    }

    #[test]
    fn labels() {
        assert_eq!(PracticeState::Idle.label(), "Ready");
        assert_eq!(PracticeState::Result.label(), "Done");
        assert_eq!(PracticeState::Error.label(), "Error");
    }

    #[test]
    fn default_state_is_idle_with_config_mode() {
        let mut config = AppConfig::default();
        config.feedback.default_mode = Mode::Writing;
        let state = AppState::new(config);
        assert_eq!(state.practice, PracticeState::Idle);
        assert_eq!(state.mode, Mode::Writing);
        assert!(state.feedback.is_none());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state(AppConfig::default());
        let state2 = Arc::clone(&state);

        lock_state(&state).practice = PracticeState::Analyzing;
        assert_eq!(lock_state(&state2).practice, PracticeState::Analyzing);
    }
}
