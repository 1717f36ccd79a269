//! Speech input and output adapters.
//!
//! Recognizers report through [`SpeechEvent`] messages on a channel;
//! [`SpeechListener`] + [`dispatch`] offer the same events as callbacks.
//! [`TranscriptCollector`] applies the restart policy for continuous
//! listening.

pub mod collector;
pub mod events;
pub mod recognizer;
pub mod synth;

pub use collector::{CollectorStatus, TranscriptCollector};
pub use events::{dispatch, SpeechErrorKind, SpeechEvent, SpeechListener, SpeechSink};
pub use recognizer::{ScriptedRecognizer, SpeechError, SpeechRecognizer, UnavailableRecognizer};
pub use synth::{LogSynthesizer, RecordingSynthesizer, SpeechSynthesizer};
