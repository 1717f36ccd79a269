//! Platform-independent speech events and the callback interface.
//!
//! Recognizer backends emit [`SpeechEvent`]s over a channel.  Consumers that
//! prefer callbacks implement [`SpeechListener`] and feed events through
//! [`dispatch`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Why a recognizer stopped producing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechErrorKind {
    /// Silence until the recognizer gave up.
    NoSpeech,
    /// The recognition service was unreachable.
    Network,
    /// The session was interrupted by the platform.
    Aborted,
    /// The user refused microphone access.
    PermissionDenied,
    /// No usable input device.
    AudioCapture,
}

impl SpeechErrorKind {
    /// Recoverable errors restart the recognizer; the others end the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SpeechErrorKind::NoSpeech | SpeechErrorKind::Network | SpeechErrorKind::Aborted
        )
    }
}

impl fmt::Display for SpeechErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SpeechErrorKind::NoSpeech => "no speech detected",
            SpeechErrorKind::Network => "speech service unreachable",
            SpeechErrorKind::Aborted => "listening was interrupted",
            SpeechErrorKind::PermissionDenied => "microphone permission denied",
            SpeechErrorKind::AudioCapture => "no microphone available",
        };
        f.write_str(msg)
    }
}

/// One message from a recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// A final transcript fragment.
    Transcript(String),
    Error(SpeechErrorKind),
    /// The recognizer stopped; always follows the last fragment or error.
    End,
}

/// Channel end recognizers push events into.
pub type SpeechSink = mpsc::UnboundedSender<SpeechEvent>;

/// Callback form of [`SpeechEvent`].
pub trait SpeechListener {
    fn on_transcript(&mut self, text: &str);
    fn on_error(&mut self, kind: SpeechErrorKind);
    fn on_end(&mut self);
}

/// Deliver `event` to the matching callback of `listener`.
pub fn dispatch<L: SpeechListener + ?Sized>(event: &SpeechEvent, listener: &mut L) {
    match event {
        SpeechEvent::Transcript(text) => listener.on_transcript(text),
        SpeechEvent::Error(kind) => listener.on_error(*kind),
        SpeechEvent::End => listener.on_end(),
    }
}
