//! Text-to-speech output.

use std::sync::Mutex;

use crate::speech::recognizer::SpeechError;

/// Reads feedback aloud.  Implementations must not block for long; callers
/// invoke `speak` from async tasks.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

/// Writes utterances to the log instead of an audio device.
#[derive(Debug, Clone)]
pub struct LogSynthesizer {
    language: String,
}

impl LogSynthesizer {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl SpeechSynthesizer for LogSynthesizer {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        log::info!("tts[{}]: {text}", self.language);
        Ok(())
    }
}

/// Keeps every utterance in memory.
#[derive(Debug, Default)]
pub struct RecordingSynthesizer {
    spoken: Mutex<Vec<String>>,
}

impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        self.spoken
            .lock()
            .map_err(|_| SpeechError::Unavailable("synthesizer lock poisoned".into()))?
            .push(text.to_string());
        Ok(())
    }
}
