//! Practice session orchestration.
//!
//! * [`PracticeState`] — Idle → Listening → Analyzing → Result, or Error.
//! * [`AppState`] / [`SharedState`] — what the practice window renders.
//! * [`PracticeOrchestrator`] — async loop turning [`PracticeCommand`]s into
//!   stored, scored practice sessions.

pub mod runner;
pub mod state;

pub use runner::{PracticeCommand, PracticeOrchestrator};
pub use state::{lock_state, new_shared_state, AppState, PracticeState, SharedState};
