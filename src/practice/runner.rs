//! Practice orchestrator: drives listen → analyse → store → speak.
//!
//! [`PracticeOrchestrator`] owns the [`SharedState`] and reacts to
//! [`PracticeCommand`]s from the UI plus [`SpeechEvent`]s from the
//! recognizer, both delivered over `tokio::sync::mpsc` channels.
//!
//! # Flow
//!
//! ```text
//! StartListening(mode)
//!   └─▶ recognizer.start(sink)                       [Listening]
//!         ├─ recoverable error + End → start again (bounded)
//!         ├─ fatal error / budget spent              [Error]
//!         └─ End → transcript ─┐
//! SubmitText { text, mode } ───┴─▶ provider.analyze  [Analyzing]
//!                                   └─▶ store session + reward,
//!                                       read top suggestion aloud [Result]
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::feedback::{AnalysisRequest, Mode};
use crate::provider::FeedbackProvider;
use crate::speech::{
    dispatch, CollectorStatus, SpeechEvent, SpeechRecognizer, SpeechSink, SpeechSynthesizer,
    TranscriptCollector,
};
use crate::store::{
    total_points, PracticeSession, RecordData, RecordFilter, RecordKind, Reward, Store,
    UserProfile,
};

use super::state::{lock_state, PracticeState, SharedState};

// ---------------------------------------------------------------------------
// PracticeCommand
// ---------------------------------------------------------------------------

/// Requests from the UI (or any other front end).
#[derive(Debug, Clone, PartialEq)]
pub enum PracticeCommand {
    /// Start the recognizer; the transcript is analysed when it ends.
    StartListening(Mode),
    /// Analyse typed text immediately.
    SubmitText { text: String, mode: Mode },
    /// Feed a recognizer event from outside (platform callbacks).
    Speech(SpeechEvent),
    /// Abandon the current round.
    Cancel,
}

/// One listening round.  Each round owns its event channel, so events a
/// recognizer emits after the round was replaced are never delivered to it.
struct ListeningSession {
    mode: Mode,
    collector: TranscriptCollector,
    sink: SpeechSink,
    events: mpsc::UnboundedReceiver<SpeechEvent>,
}

/// Next event of the active round; pending forever when not listening.
async fn next_speech(session: Option<&mut ListeningSession>) -> Option<SpeechEvent> {
    match session {
        Some(session) => session.events.recv().await,
        None => std::future::pending().await,
    }
}

// ---------------------------------------------------------------------------
// PracticeOrchestrator
// ---------------------------------------------------------------------------

/// Create with [`PracticeOrchestrator::new`], then spawn [`run`](Self::run)
/// on the tokio runtime.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use english_coach::config::AppConfig;
/// use english_coach::feedback::FeedbackEngine;
/// use english_coach::practice::{new_shared_state, PracticeOrchestrator};
/// use english_coach::provider::LocalProvider;
/// use english_coach::speech::{LogSynthesizer, UnavailableRecognizer};
/// use english_coach::store::JsonStore;
///
/// # async fn example() {
/// let state = new_shared_state(AppConfig::default());
/// let orchestrator = PracticeOrchestrator::new(
///     state,
///     Arc::new(LocalProvider::new(FeedbackEngine::new())),
///     Arc::new(JsonStore::in_memory()),
///     Arc::new(UnavailableRecognizer),
///     Arc::new(LogSynthesizer::new("en-US")),
/// );
/// let (command_tx, command_rx) = tokio::sync::mpsc::channel(16);
/// # drop(command_tx);
/// orchestrator.run(command_rx).await;
/// # }
/// ```
pub struct PracticeOrchestrator {
    state: SharedState,
    provider: Arc<dyn FeedbackProvider>,
    store: Arc<dyn Store>,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    session: Option<ListeningSession>,
}

impl PracticeOrchestrator {
    pub fn new(
        state: SharedState,
        provider: Arc<dyn FeedbackProvider>,
        store: Arc<dyn Store>,
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            state,
            provider,
            store,
            recognizer,
            synthesizer,
            session: None,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run until `commands` is closed.  Pending recognizer events are always
    /// handled before the next command.
    pub async fn run(mut self, mut commands: mpsc::Receiver<PracticeCommand>) {
        self.load_profile();
        self.refresh_total_points();

        loop {
            tokio::select! {
                biased;
                Some(event) = next_speech(self.session.as_mut()) => {
                    self.handle_speech(event).await;
                }
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
            }
        }

        if self.session.take().is_some() {
            self.recognizer.stop();
        }
        log::info!("practice: command channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handlers
    // -----------------------------------------------------------------------

    async fn handle_command(&mut self, command: PracticeCommand) {
        match command {
            PracticeCommand::StartListening(mode) => self.start_listening(mode),
            PracticeCommand::SubmitText { text, mode } => {
                self.stop_listening();
                self.analyze(text, mode).await;
            }
            PracticeCommand::Speech(event) => self.handle_speech(event).await,
            PracticeCommand::Cancel => {
                self.stop_listening();
                let mut st = lock_state(&self.state);
                st.practice = PracticeState::Idle;
                st.error_message = None;
                log::debug!("practice: cancelled → Idle");
            }
        }
    }

    fn start_listening(&mut self, mode: Mode) {
        self.stop_listening();

        let max_restarts = {
            let mut st = lock_state(&self.state);
            st.practice = PracticeState::Listening;
            st.mode = mode;
            st.transcript.clear();
            st.error_message = None;
            st.config.speech.max_restarts
        };
        log::debug!("practice: StartListening({}) → Listening", mode.as_str());

        let (sink, events) = mpsc::unbounded_channel();
        let started = self.recognizer.start(sink.clone());
        self.session = Some(ListeningSession {
            mode,
            collector: TranscriptCollector::new(max_restarts),
            sink,
            events,
        });
        if let Err(e) = started {
            self.session = None;
            self.set_error(format!("Could not start listening: {e}"));
        }
    }

    fn stop_listening(&mut self) {
        if self.session.take().is_some() {
            self.recognizer.stop();
        }
    }

    async fn handle_speech(&mut self, event: SpeechEvent) {
        let Some(session) = self.session.as_mut() else {
            log::debug!("practice: ignoring {event:?} while not listening");
            return;
        };

        dispatch(&event, &mut session.collector);

        match session.collector.status().clone() {
            CollectorStatus::Listening => {
                let transcript = session.collector.transcript();
                lock_state(&self.state).transcript = transcript;
            }
            CollectorStatus::RestartRequested => {
                log::info!(
                    "practice: restarting recognizer (attempt {})",
                    session.collector.restarts()
                );
                match self.recognizer.start(session.sink.clone()) {
                    Ok(()) => session.collector.resume(),
                    Err(e) => {
                        self.session = None;
                        self.set_error(format!("Could not resume listening: {e}"));
                    }
                }
            }
            CollectorStatus::Finished(transcript) => {
                let mode = session.mode;
                self.session = None;
                self.analyze(transcript, mode).await;
            }
            CollectorStatus::Failed(kind) => {
                self.session = None;
                self.set_error(format!("Listening stopped: {kind}"));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Analysis
    // -----------------------------------------------------------------------

    async fn analyze(&mut self, text: String, mode: Mode) {
        let text = text.trim().to_string();
        if text.is_empty() {
            self.set_error("Nothing to analyze yet. Type or say something first.".into());
            return;
        }

        let (detailed, read_aloud) = {
            let mut st = lock_state(&self.state);
            st.practice = PracticeState::Analyzing;
            st.mode = mode;
            st.transcript = text.clone();
            st.error_message = None;
            (st.config.feedback.detailed, st.config.speech.read_aloud)
        };

        let mut request = AnalysisRequest::new(text.clone(), mode);
        if let Some(detailed) = detailed {
            request = request.detailed(detailed);
        }

        let feedback = match self.provider.analyze(&request).await {
            Ok(feedback) => feedback,
            Err(e) => {
                self.set_error(format!("Feedback failed: {e}"));
                return;
            }
        };
        log::debug!(
            "practice: overall {} from {:?}",
            feedback.scores.overall,
            feedback.source
        );

        // Persistence failures are logged; the learner still sees the result.
        let session_id = match self.store.save(RecordData::Session(PracticeSession {
            mode,
            text,
            feedback: feedback.clone(),
        })) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("practice: could not store session: {e}");
                None
            }
        };
        let reward = Reward::for_session(&feedback, session_id.clone());
        if let Err(e) = self.store.save(RecordData::Reward(reward)) {
            log::warn!("practice: could not store reward: {e}");
        }

        if read_aloud {
            if let Some(first) = feedback.suggestions.first() {
                if let Err(e) = self.synthesizer.speak(first) {
                    log::warn!("practice: read-aloud failed: {e}");
                }
            }
        }

        {
            let mut st = lock_state(&self.state);
            st.practice = PracticeState::Result;
            st.feedback = Some(feedback);
            st.session_id = session_id;
        }
        self.refresh_total_points();
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Publish the stored learner profile, creating a default one on first run.
    fn load_profile(&self) {
        let profile = match self.store.list(&RecordFilter::kind(RecordKind::User)) {
            Ok(users) => match users.into_iter().find_map(|r| match r.data {
                RecordData::User(profile) => Some(profile),
                _ => None,
            }) {
                Some(profile) => profile,
                None => {
                    let profile = UserProfile::default();
                    if let Err(e) = self.store.save(RecordData::User(profile.clone())) {
                        log::warn!("practice: could not store learner profile: {e}");
                    }
                    profile
                }
            },
            Err(e) => {
                log::warn!("practice: could not read learner profile: {e}");
                return;
            }
        };
        log::debug!("practice: learner {} ({})", profile.name, profile.level);
        lock_state(&self.state).profile = Some(profile);
    }

    fn refresh_total_points(&self) {
        match self.store.list(&RecordFilter::kind(RecordKind::Reward)) {
            Ok(rewards) => lock_state(&self.state).total_points = total_points(&rewards),
            Err(e) => log::warn!("practice: could not read rewards: {e}"),
        }
    }

    fn set_error(&self, message: String) {
        let mut st = lock_state(&self.state);
        st.practice = PracticeState::Error;
        st.error_message = Some(message.clone());
        log::error!("practice error: {message}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::feedback::{FeedbackEngine, FeedbackResult, FeedbackSource};
    use crate::practice::state::new_shared_state;
    use crate::provider::{LocalProvider, ProviderError};
    use crate::speech::{
        LogSynthesizer, RecordingSynthesizer, ScriptedRecognizer, SpeechErrorKind,
        UnavailableRecognizer,
    };
    use crate::store::JsonStore;
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Keeps every sink it is started with; the test plays the recognizer.
    #[derive(Default)]
    struct HeldRecognizer {
        sinks: std::sync::Mutex<Vec<SpeechSink>>,
    }

    impl HeldRecognizer {
        fn sink(&self, attempt: usize) -> Option<SpeechSink> {
            self.sinks.lock().unwrap().get(attempt).cloned()
        }
    }

    impl SpeechRecognizer for HeldRecognizer {
        fn start(&self, sink: SpeechSink) -> Result<(), crate::speech::SpeechError> {
            self.sinks.lock().unwrap().push(sink);
            Ok(())
        }

        fn stop(&self) {}
    }

    struct FailingProvider;

    #[async_trait]
    impl FeedbackProvider for FailingProvider {
        async fn analyze(&self, _: &AnalysisRequest) -> Result<FeedbackResult, ProviderError> {
            Err(ProviderError::Timeout)
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    struct Harness {
        state: SharedState,
        store: Arc<JsonStore>,
    }

    fn orchestrator_with(
        config: AppConfig,
        provider: Arc<dyn FeedbackProvider>,
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> (PracticeOrchestrator, Harness) {
        let state = new_shared_state(config);
        let store = Arc::new(JsonStore::in_memory());
        let orc = PracticeOrchestrator::new(
            Arc::clone(&state),
            provider,
            store.clone(),
            recognizer,
            synthesizer,
        );
        (orc, Harness { state, store })
    }

    fn orchestrator(recognizer: Arc<dyn SpeechRecognizer>) -> (PracticeOrchestrator, Harness) {
        orchestrator_with(
            AppConfig::default(),
            Arc::new(LocalProvider::new(FeedbackEngine::seeded(7))),
            recognizer,
            Arc::new(LogSynthesizer::new("en-US")),
        )
    }

    async fn drive(orc: PracticeOrchestrator, commands: Vec<PracticeCommand>) {
        let (tx, rx) = mpsc::channel(16);
        for command in commands {
            tx.send(command).await.unwrap();
        }
        drop(tx);
        orc.run(rx).await;
    }

    fn submit(text: &str, mode: Mode) -> PracticeCommand {
        PracticeCommand::SubmitText {
            text: text.into(),
            mode,
        }
    }

    fn count(store: &JsonStore, kind: RecordKind) -> usize {
        store.list(&RecordFilter::kind(kind)).unwrap().len()
    }

    fn no_progress(store: &JsonStore) -> bool {
        count(store, RecordKind::Session) == 0 && count(store, RecordKind::Reward) == 0
    }

    // -----------------------------------------------------------------------
    // Typed text
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn submitted_text_is_analysed_and_stored() {
        let (orc, h) = orchestrator(Arc::new(UnavailableRecognizer));
        drive(orc, vec![submit("i like coffee.", Mode::Writing)]).await;

        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Result);
        assert_eq!(st.mode, Mode::Writing);
        assert_eq!(st.transcript, "i like coffee.");

        let feedback = st.feedback.as_ref().expect("feedback");
        assert_eq!(feedback.source, FeedbackSource::Local);
        assert!(feedback.error_patterns.contains("Capitalization"));

        assert_eq!(count(&h.store, RecordKind::Session), 1);
        assert_eq!(count(&h.store, RecordKind::Reward), 1);
        assert_eq!(st.total_points, u32::from(feedback.scores.overall / 10));

        let session_id = st.session_id.clone().expect("session id");
        let stored = h.store.get(&session_id).unwrap().expect("stored session");
        assert_eq!(stored.mode(), Some(Mode::Writing));
    }

    #[tokio::test]
    async fn empty_text_is_an_error_without_records() {
        let (orc, h) = orchestrator(Arc::new(UnavailableRecognizer));
        drive(orc, vec![submit("   ", Mode::Speaking)]).await;

        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Error);
        assert!(st.error_message.is_some());
        assert!(no_progress(&h.store));
    }

    #[tokio::test]
    async fn provider_failure_is_an_error() {
        let (orc, h) = orchestrator_with(
            AppConfig::default(),
            Arc::new(FailingProvider),
            Arc::new(UnavailableRecognizer),
            Arc::new(LogSynthesizer::new("en-US")),
        );
        drive(orc, vec![submit("Hello there.", Mode::Speaking)]).await;

        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Error);
        assert_eq!(
            st.error_message.as_deref(),
            Some("Feedback failed: feedback request timed out")
        );
        assert!(no_progress(&h.store));
    }

    #[tokio::test]
    async fn total_points_accumulate_across_rounds() {
        let (orc, h) = orchestrator(Arc::new(UnavailableRecognizer));
        drive(
            orc,
            vec![
                submit("Hello there.", Mode::Speaking),
                submit("We went home.", Mode::Reading),
            ],
        )
        .await;

        let rewards = h.store.list(&RecordFilter::kind(RecordKind::Reward)).unwrap();
        assert_eq!(rewards.len(), 2);
        assert_eq!(lock_state(&h.state).total_points, total_points(&rewards));
    }

    #[tokio::test]
    async fn read_aloud_speaks_first_suggestion() {
        let mut config = AppConfig::default();
        config.speech.read_aloud = true;
        let synth = Arc::new(RecordingSynthesizer::new());
        let (orc, h) = orchestrator_with(
            config,
            Arc::new(LocalProvider::new(FeedbackEngine::seeded(3))),
            Arc::new(UnavailableRecognizer),
            synth.clone(),
        );
        drive(orc, vec![submit("Hello there.", Mode::Speaking)]).await;

        let st = lock_state(&h.state);
        let first = st.feedback.as_ref().unwrap().suggestions[0].clone();
        assert_eq!(synth.spoken(), vec![first]);
    }

    #[tokio::test]
    async fn read_aloud_is_off_by_default() {
        let synth = Arc::new(RecordingSynthesizer::new());
        let (orc, _h) = orchestrator_with(
            AppConfig::default(),
            Arc::new(LocalProvider::new(FeedbackEngine::seeded(3))),
            Arc::new(UnavailableRecognizer),
            synth.clone(),
        );
        drive(orc, vec![submit("Hello there.", Mode::Speaking)]).await;
        assert!(synth.spoken().is_empty());
    }

    // -----------------------------------------------------------------------
    // Listening
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn spoken_transcript_is_analysed() {
        let (orc, h) = orchestrator(Arc::new(ScriptedRecognizer::saying("i like coffee.")));
        drive(orc, vec![PracticeCommand::StartListening(Mode::Speaking)]).await;

        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Result);
        assert_eq!(st.transcript, "i like coffee.");
        assert_eq!(count(&h.store, RecordKind::Session), 1);
    }

    #[tokio::test]
    async fn recoverable_errors_restart_the_recognizer() {
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![
            vec![
                SpeechEvent::Transcript("hello there".into()),
                SpeechEvent::Error(SpeechErrorKind::NoSpeech),
                SpeechEvent::End,
            ],
            vec![
                SpeechEvent::Transcript("how are you".into()),
                SpeechEvent::End,
            ],
        ]));
        let (orc, h) = orchestrator(recognizer.clone());
        drive(orc, vec![PracticeCommand::StartListening(Mode::Speaking)]).await;

        assert_eq!(recognizer.remaining_attempts(), 0);
        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Result);
        assert_eq!(st.transcript, "hello there how are you");
    }

    #[tokio::test]
    async fn fatal_speech_error_stops_the_round() {
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![vec![
            SpeechEvent::Error(SpeechErrorKind::PermissionDenied),
            SpeechEvent::End,
        ]]));
        let (orc, h) = orchestrator(recognizer);
        drive(orc, vec![PracticeCommand::StartListening(Mode::Speaking)]).await;

        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Error);
        assert!(st
            .error_message
            .as_deref()
            .unwrap()
            .contains("microphone permission denied"));
        assert!(no_progress(&h.store));
    }

    #[tokio::test]
    async fn silence_only_is_an_error() {
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![vec![SpeechEvent::End]]));
        let (orc, h) = orchestrator(recognizer);
        drive(orc, vec![PracticeCommand::StartListening(Mode::Speaking)]).await;

        assert_eq!(lock_state(&h.state).practice, PracticeState::Error);
        assert!(no_progress(&h.store));
    }

    #[tokio::test]
    async fn unavailable_recognizer_is_an_error() {
        let (orc, h) = orchestrator(Arc::new(UnavailableRecognizer));
        drive(orc, vec![PracticeCommand::StartListening(Mode::Speaking)]).await;

        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Error);
        assert!(st
            .error_message
            .as_deref()
            .unwrap()
            .starts_with("Could not start listening"));
    }

    #[tokio::test]
    async fn external_speech_events_complete_a_round() {
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![vec![SpeechEvent::Transcript(
            "we ate a apple".into(),
        )]]));
        let (orc, h) = orchestrator(recognizer);
        drive(
            orc,
            vec![
                PracticeCommand::StartListening(Mode::Writing),
                PracticeCommand::Speech(SpeechEvent::End),
            ],
        )
        .await;

        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Result);
        assert_eq!(st.transcript, "we ate a apple");
    }

    #[tokio::test]
    async fn cancel_stops_listening() {
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![vec![SpeechEvent::Transcript(
            "hello".into(),
        )]]));
        let (orc, h) = orchestrator(recognizer.clone());
        drive(
            orc,
            vec![
                PracticeCommand::StartListening(Mode::Speaking),
                PracticeCommand::Cancel,
            ],
        )
        .await;

        assert!(recognizer.is_stopped());
        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Idle);
        assert_eq!(st.transcript, "hello");
        assert!(no_progress(&h.store));
    }

    #[tokio::test]
    async fn speech_events_outside_listening_are_ignored() {
        let (orc, h) = orchestrator(Arc::new(UnavailableRecognizer));
        drive(
            orc,
            vec![
                PracticeCommand::Speech(SpeechEvent::Transcript("stray".into())),
                PracticeCommand::Speech(SpeechEvent::End),
            ],
        )
        .await;

        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Idle);
        assert!(st.transcript.is_empty());
        assert!(no_progress(&h.store));
    }

    #[tokio::test]
    async fn late_end_from_replaced_round_is_not_delivered() {
        let recognizer = Arc::new(HeldRecognizer::default());
        let (orc, h) = orchestrator(recognizer.clone());
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(orc.run(rx));

        tx.send(PracticeCommand::StartListening(Mode::Speaking)).await.unwrap();
        tx.send(PracticeCommand::Cancel).await.unwrap();
        tx.send(PracticeCommand::StartListening(Mode::Writing)).await.unwrap();
        while recognizer.sink(1).is_none() {
            tokio::task::yield_now().await;
        }

        let old = recognizer.sink(0).unwrap();
        assert!(old.send(SpeechEvent::End).is_err());
        assert_eq!(lock_state(&h.state).practice, PracticeState::Listening);

        let current = recognizer.sink(1).unwrap();
        current.send(SpeechEvent::Transcript("hello".into())).unwrap();
        current.send(SpeechEvent::End).unwrap();
        drop(tx);
        handle.await.unwrap();

        let st = lock_state(&h.state);
        assert_eq!(st.practice, PracticeState::Result);
        assert_eq!(st.mode, Mode::Writing);
        assert_eq!(st.transcript, "hello");
    }

    // -----------------------------------------------------------------------
    // Learner profile
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn first_run_creates_default_profile() {
        let (orc, h) = orchestrator(Arc::new(UnavailableRecognizer));
        drive(orc, vec![]).await;

        assert_eq!(count(&h.store, RecordKind::User), 1);
        let st = lock_state(&h.state);
        assert_eq!(st.profile, Some(UserProfile::default()));
    }

    #[tokio::test]
    async fn stored_profile_is_reused() {
        let store = Arc::new(JsonStore::in_memory());
        let learner = UserProfile {
            name: "Mai".into(),
            ..UserProfile::default()
        };
        store.save(RecordData::User(learner.clone())).unwrap();

        for _ in 0..2 {
            let state = new_shared_state(AppConfig::default());
            let orc = PracticeOrchestrator::new(
                Arc::clone(&state),
                Arc::new(LocalProvider::new(FeedbackEngine::seeded(7))),
                store.clone(),
                Arc::new(UnavailableRecognizer),
                Arc::new(LogSynthesizer::new("en-US")),
            );
            drive(orc, vec![]).await;
            assert_eq!(lock_state(&state).profile.as_ref(), Some(&learner));
        }
        assert_eq!(count(&store, RecordKind::User), 1);
    }
}
