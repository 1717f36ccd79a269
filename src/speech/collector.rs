//! Accumulates transcript fragments across recognizer restarts.
//!
//! Continuous dictation ends the moment a recognizer hits silence or a
//! dropped connection.  The collector turns recoverable errors into a
//! restart request (up to `max_restarts`) so the user can keep talking.

use crate::speech::events::{SpeechErrorKind, SpeechListener};

/// What the owner of the collector should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorStatus {
    /// Still receiving events.
    Listening,
    /// The recognizer ended after a recoverable error; start it again.
    RestartRequested,
    /// Listening finished; the joined transcript (may be empty).
    Finished(String),
    /// A fatal error, or the restart budget ran out.
    Failed(SpeechErrorKind),
}

pub struct TranscriptCollector {
    parts: Vec<String>,
    max_restarts: u32,
    restarts: u32,
    restart_pending: bool,
    status: CollectorStatus,
}

impl TranscriptCollector {
    pub fn new(max_restarts: u32) -> Self {
        Self {
            parts: Vec::new(),
            max_restarts,
            restarts: 0,
            restart_pending: false,
            status: CollectorStatus::Listening,
        }
    }

    /// Fragments so far, joined with single spaces.
    pub fn transcript(&self) -> String {
        self.parts.join(" ")
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn status(&self) -> &CollectorStatus {
        &self.status
    }

    /// Acknowledge a [`CollectorStatus::RestartRequested`] once the
    /// recognizer has been started again.
    pub fn resume(&mut self) {
        if self.status == CollectorStatus::RestartRequested {
            self.status = CollectorStatus::Listening;
        }
    }

    fn is_done(&self) -> bool {
        matches!(
            self.status,
            CollectorStatus::Finished(_) | CollectorStatus::Failed(_)
        )
    }
}

impl SpeechListener for TranscriptCollector {
    fn on_transcript(&mut self, text: &str) {
        if self.is_done() {
            return;
        }
        let text = text.trim();
        if !text.is_empty() {
            self.parts.push(text.to_string());
        }
    }

    fn on_error(&mut self, kind: SpeechErrorKind) {
        if self.is_done() {
            return;
        }
        if kind.is_recoverable() && self.restarts < self.max_restarts {
            log::debug!("speech: recoverable error ({kind}), restart pending");
            self.restart_pending = true;
        } else {
            log::warn!("speech: giving up after {} restarts: {kind}", self.restarts);
            self.status = CollectorStatus::Failed(kind);
        }
    }

    fn on_end(&mut self) {
        if self.status != CollectorStatus::Listening {
            return;
        }
        if self.restart_pending {
            self.restart_pending = false;
            self.restarts += 1;
            self.status = CollectorStatus::RestartRequested;
        } else {
            self.status = CollectorStatus::Finished(self.transcript());
        }
    }
}
