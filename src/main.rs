//! Application entry point — English Coach.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (defaults on first run).
//! 3. Create the [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the feedback provider (remote API with local fallback).
//! 5. Open the record store.
//! 6. Spawn the practice orchestrator on the runtime.
//! 7. Run [`eframe::run_native`] — blocks until the window is closed.

use std::sync::Arc;

use eframe::egui;
use tokio::sync::mpsc;

use english_coach::{
    app::CoachApp,
    config::AppConfig,
    feedback::FeedbackEngine,
    practice::{new_shared_state, PracticeCommand, PracticeOrchestrator},
    provider::{ApiProvider, FallbackProvider, FeedbackProvider, LocalProvider},
    speech::{LogSynthesizer, SpeechRecognizer, SpeechSynthesizer, UnavailableRecognizer},
    store::{JsonStore, Store},
};

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let mut vp = egui::ViewportBuilder::default()
        .with_title("English Coach")
        .with_inner_size([width, height])
        .with_min_inner_size([360.0, 420.0]);

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn open_store(config: &AppConfig) -> Arc<dyn Store> {
    let path = config.store.resolved_path();
    match JsonStore::load_from(&path) {
        Ok(store) => {
            log::info!("Record store: {}", path.display());
            Arc::new(store)
        }
        Err(e) => {
            log::warn!(
                "Could not open record store ({}): {e}. Progress will not be saved.",
                path.display()
            );
            Arc::new(JsonStore::in_memory())
        }
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("English Coach starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    // 4. Feedback provider
    let local = LocalProvider::new(FeedbackEngine::with_seed(config.feedback.seed));
    let provider: Arc<dyn FeedbackProvider> = Arc::new(FallbackProvider::new(
        ApiProvider::from_config(&config.api),
        local,
    ));
    if config.api.enabled {
        log::info!("Remote tutor: {} ({})", config.api.base_url, config.api.model);
    }

    // 5. Store and speech adapters
    let store = open_store(&config);
    let recognizer: Arc<dyn SpeechRecognizer> = Arc::new(UnavailableRecognizer);
    let synthesizer: Arc<dyn SpeechSynthesizer> =
        Arc::new(LogSynthesizer::new(config.speech.language.clone()));

    // 6. Orchestrator
    let state = new_shared_state(config.clone());
    let (command_tx, command_rx) = mpsc::channel::<PracticeCommand>(16);
    let orchestrator = PracticeOrchestrator::new(
        Arc::clone(&state),
        provider,
        store,
        recognizer,
        synthesizer,
    );
    rt.spawn(orchestrator.run(command_rx));

    // 7. Window
    let app = CoachApp::new(state, command_tx);
    eframe::run_native(
        "English Coach",
        native_options(&config),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
