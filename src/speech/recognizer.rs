//! Speech recognizer trait and the built-in backends.
//!
//! No platform engine ships with the crate.  [`ScriptedRecognizer`] replays
//! pre-recorded event sequences (demos and tests); [`UnavailableRecognizer`]
//! is used when nothing else is configured.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use thiserror::Error;

use crate::speech::events::{SpeechEvent, SpeechSink};

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    /// The backend cannot listen or speak at all.
    #[error("speech backend unavailable: {0}")]
    Unavailable(String),

    /// The event receiver was dropped.
    #[error("speech event channel closed")]
    ChannelClosed,
}

// ---------------------------------------------------------------------------
// SpeechRecognizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech-to-text backends.
///
/// `start` begins one listening attempt whose events (fragments, errors,
/// and a closing [`SpeechEvent::End`]) arrive on `sink`.
pub trait SpeechRecognizer: Send + Sync {
    fn start(&self, sink: SpeechSink) -> Result<(), SpeechError>;
    fn stop(&self);
}

// Compile-time assertion: Box<dyn SpeechRecognizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechRecognizer>) {}
};

// ---------------------------------------------------------------------------
// ScriptedRecognizer
// ---------------------------------------------------------------------------

/// Replays one scripted attempt per [`start`](SpeechRecognizer::start) call.
///
/// ```rust
/// use english_coach::speech::{ScriptedRecognizer, SpeechEvent, SpeechRecognizer};
///
/// let recognizer = ScriptedRecognizer::new(vec![vec![
///     SpeechEvent::Transcript("hello".into()),
///     SpeechEvent::End,
/// ]]);
/// let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
/// recognizer.start(tx).unwrap();
/// assert_eq!(rx.try_recv().unwrap(), SpeechEvent::Transcript("hello".into()));
/// ```
pub struct ScriptedRecognizer {
    attempts: Mutex<VecDeque<Vec<SpeechEvent>>>,
    stopped: AtomicBool,
}

impl ScriptedRecognizer {
    pub fn new(attempts: Vec<Vec<SpeechEvent>>) -> Self {
        Self {
            attempts: Mutex::new(attempts.into()),
            stopped: AtomicBool::new(false),
        }
    }

    /// One attempt that yields `text` and ends.
    pub fn saying(text: &str) -> Self {
        Self::new(vec![vec![
            SpeechEvent::Transcript(text.to_string()),
            SpeechEvent::End,
        ]])
    }

    /// Whether [`stop`](SpeechRecognizer::stop) was called since the last start.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn remaining_attempts(&self) -> usize {
        self.attempts.lock().map(|a| a.len()).unwrap_or(0)
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn start(&self, sink: SpeechSink) -> Result<(), SpeechError> {
        self.stopped.store(false, Ordering::SeqCst);
        let attempt = self
            .attempts
            .lock()
            .map_err(|_| SpeechError::Unavailable("script lock poisoned".into()))?
            .pop_front()
            .ok_or_else(|| SpeechError::Unavailable("script exhausted".into()))?;

        for event in attempt {
            sink.send(event).map_err(|_| SpeechError::ChannelClosed)?;
        }
        Ok(())
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// UnavailableRecognizer
// ---------------------------------------------------------------------------

/// Refuses to start; the practice window then only accepts typed text.
#[derive(Debug, Default)]
pub struct UnavailableRecognizer;

impl SpeechRecognizer for UnavailableRecognizer {
    fn start(&self, _sink: SpeechSink) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable(
            "no speech recognizer configured".into(),
        ))
    }

    fn stop(&self) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
