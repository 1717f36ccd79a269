//! English practice window — egui/eframe application.
//!
//! [`CoachApp`] is the top-level [`eframe::App`].  It holds a clone of the
//! [`SharedState`] written by the practice orchestrator and a
//! `command_tx` for sending [`PracticeCommand`]s back.
//!
//! | State | View |
//! |-------|------|
//! | `Idle` | Mode selector, text box, Analyze / Listen |
//! | `Listening` | Live transcript + Stop |
//! | `Analyzing` | Spinner |
//! | `Result` | Score bars, suggestions, corrections |
//! | `Error` | Message in orange + Dismiss |

use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::UiConfig;
use crate::feedback::{Correction, FeedbackResult, FeedbackSource, Mode, ScoreSet, MAX_SCORE};
use crate::practice::{lock_state, PracticeCommand, PracticeState, SharedState};

const GOOD: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);
const FAIR: egui::Color32 = egui::Color32::from_rgb(68, 136, 255);
const WEAK: egui::Color32 = egui::Color32::from_rgb(255, 136, 68);
const DIM: egui::Color32 = egui::Color32::from_rgb(140, 140, 140);

/// Everything one frame needs, copied out of the shared state so the lock is
/// not held while drawing.
struct Snapshot {
    practice: PracticeState,
    transcript: String,
    feedback: Option<FeedbackResult>,
    total_points: u32,
    /// `"name · level"` once the learner profile is loaded.
    learner: Option<String>,
    error_message: Option<String>,
    api_enabled: bool,
    show_transcript: bool,
}

// ---------------------------------------------------------------------------
// CoachApp
// ---------------------------------------------------------------------------

pub struct CoachApp {
    state: SharedState,
    command_tx: mpsc::Sender<PracticeCommand>,
    /// Mode chosen in the selector.
    mode: Mode,
    /// Contents of the text box.
    input: String,
    /// Last known window geometry, written back to the config on exit.
    outer_rect: Option<egui::Rect>,
    inner_rect: Option<egui::Rect>,
}

impl CoachApp {
    pub fn new(state: SharedState, command_tx: mpsc::Sender<PracticeCommand>) -> Self {
        let mode = lock_state(&state).config.feedback.default_mode;
        Self {
            state,
            command_tx,
            mode,
            input: String::new(),
            outer_rect: None,
            inner_rect: None,
        }
    }

    fn snapshot(&self) -> Snapshot {
        let st = lock_state(&self.state);
        Snapshot {
            practice: st.practice,
            transcript: st.transcript.clone(),
            feedback: st.feedback.clone(),
            total_points: st.total_points,
            learner: st
                .profile
                .as_ref()
                .map(|p| format!("{} · {}", p.name, p.level)),
            error_message: st.error_message.clone(),
            api_enabled: st.config.api.enabled,
            show_transcript: st.config.ui.show_transcript,
        }
    }

    fn send(&self, command: PracticeCommand) {
        if let Err(e) = self.command_tx.try_send(command) {
            log::warn!("ui: could not send command: {e}");
        }
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_header(&self, ui: &mut egui::Ui, view: &Snapshot) {
        ui.horizontal(|ui| {
            ui.heading("English Coach");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(format!("{} pts", view.total_points)).color(GOOD));
                ui.label(egui::RichText::new(view.practice.label()).color(DIM));
                if let Some(learner) = &view.learner {
                    ui.label(egui::RichText::new(learner).color(DIM));
                }
            });
        });
    }

    fn draw_input(&mut self, ui: &mut egui::Ui, view: &Snapshot) {
        let busy = view.practice.is_busy();

        ui.add_enabled_ui(!busy, |ui| {
            egui::ComboBox::from_label("Mode")
                .selected_text(self.mode.as_str())
                .show_ui(ui, |ui| {
                    for mode in Mode::ALL {
                        ui.selectable_value(&mut self.mode, mode, mode.as_str());
                    }
                });

            ui.add(
                egui::TextEdit::multiline(&mut self.input)
                    .hint_text("Type a few sentences in English…")
                    .desired_rows(5)
                    .desired_width(f32::INFINITY),
            );
        });

        ui.horizontal(|ui| {
            let can_analyze = !busy && !self.input.trim().is_empty();
            if ui
                .add_enabled(can_analyze, egui::Button::new("Analyze"))
                .clicked()
            {
                self.send(PracticeCommand::SubmitText {
                    text: self.input.clone(),
                    mode: self.mode,
                });
            }

            if view.practice == PracticeState::Listening {
                if ui.button("Stop").clicked() {
                    self.send(PracticeCommand::Speech(crate::speech::SpeechEvent::End));
                }
                if ui.button("Cancel").clicked() {
                    self.send(PracticeCommand::Cancel);
                }
            } else if ui.add_enabled(!busy, egui::Button::new("Listen")).clicked() {
                self.send(PracticeCommand::StartListening(self.mode));
            }
        });
    }

    fn draw_listening(&self, ui: &mut egui::Ui, view: &Snapshot) {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("Listening…").color(WEAK));
        });
        if view.show_transcript && !view.transcript.is_empty() {
            ui.label(egui::RichText::new(&view.transcript).italics().color(DIM));
        }
    }

    fn draw_result(&self, ui: &mut egui::Ui, view: &Snapshot, feedback: &FeedbackResult) {
        if show_demo_note(feedback, view.api_enabled) {
            ui.label(
                egui::RichText::new("Demo feedback: the tutor service is unreachable.")
                    .color(WEAK)
                    .size(11.0),
            );
        }
        if view.show_transcript {
            ui.label(egui::RichText::new(&view.transcript).italics().color(DIM));
        }

        ui.add_space(4.0);
        draw_scores(ui, &feedback.scores);

        if !feedback.suggestions.is_empty() {
            ui.add_space(6.0);
            ui.strong("Suggestions");
            for suggestion in &feedback.suggestions {
                ui.label(format!("• {suggestion}"));
            }
        }

        if !feedback.corrections.is_empty() {
            ui.add_space(6.0);
            ui.strong("Corrections");
            for correction in &feedback.corrections {
                draw_correction(ui, correction);
            }
        }
    }

    fn draw_error(&self, ui: &mut egui::Ui, view: &Snapshot) {
        let msg = view
            .error_message
            .as_deref()
            .unwrap_or("Something went wrong.");
        ui.label(egui::RichText::new(msg).color(WEAK));
        if ui.button("Dismiss").clicked() {
            self.send(PracticeCommand::Cancel);
        }
    }
}

// ── Free-standing widgets ───────────────────────────────────────────────────

fn draw_scores(ui: &mut egui::Ui, scores: &ScoreSet) {
    let rows = [
        ("Overall", scores.overall),
        ("Pronunciation", scores.pronunciation),
        ("Grammar", scores.grammar),
        ("Vocabulary", scores.vocabulary),
        ("Fluency", scores.fluency),
    ];
    egui::Grid::new("scores").num_columns(2).show(ui, |ui| {
        for (name, score) in rows {
            ui.label(name);
            ui.add(
                egui::ProgressBar::new(score_fraction(score))
                    .text(score.to_string())
                    .fill(score_color(score)),
            );
            ui.end_row();
        }
    });
}

fn draw_correction(ui: &mut egui::Ui, correction: &Correction) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(correction.original.trim()).strikethrough().color(WEAK));
        ui.label("→");
        ui.label(egui::RichText::new(correction.corrected.trim()).color(GOOD));
    });
    let note = match &correction.rule {
        Some(rule) => format!("{rule}: {}", correction.explanation),
        None => correction.explanation.clone(),
    };
    ui.label(egui::RichText::new(note).color(DIM).size(11.0));
}

fn score_fraction(score: u8) -> f32 {
    f32::from(score.min(MAX_SCORE)) / f32::from(MAX_SCORE)
}

fn score_color(score: u8) -> egui::Color32 {
    match score {
        85..=u8::MAX => GOOD,
        70..=84 => FAIR,
        _ => WEAK,
    }
}

/// Copy the window geometry into `ui`; unknown values keep their old setting.
fn remember_window(ui: &mut UiConfig, outer: Option<egui::Rect>, inner: Option<egui::Rect>) {
    if let Some(outer) = outer {
        ui.window_position = Some((outer.min.x, outer.min.y));
    }
    if let Some(inner) = inner {
        ui.window_size = (inner.width(), inner.height());
    }
}

/// Local feedback while the remote tutor is switched on means the call failed.
fn show_demo_note(feedback: &FeedbackResult, api_enabled: bool) -> bool {
    api_enabled && feedback.source == FeedbackSource::Local
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for CoachApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self.snapshot();
        let (outer, inner) = ctx.input(|i| (i.viewport().outer_rect, i.viewport().inner_rect));
        self.outer_rect = outer.or(self.outer_rect);
        self.inner_rect = inner.or(self.inner_rect);

        // The orchestrator updates state off-thread; keep polling while busy.
        if view.practice.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(66));
        } else {
            ctx.request_repaint_after(Duration::from_millis(500));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_header(ui, &view);
            ui.separator();
            self.draw_input(ui, &view);
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match view.practice {
                PracticeState::Idle => {
                    ui.label(egui::RichText::new("Pick a mode, then type or speak.").color(DIM));
                }
                PracticeState::Listening => self.draw_listening(ui, &view),
                PracticeState::Analyzing => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Analyzing…");
                    });
                }
                PracticeState::Result => {
                    if let Some(feedback) = &view.feedback {
                        self.draw_result(ui, &view, feedback);
                    }
                }
                PracticeState::Error => self.draw_error(ui, &view),
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let mut config = lock_state(&self.state).config.clone();
        remember_window(&mut config.ui, self.outer_rect, self.inner_rect);
        match config.save() {
            Ok(()) => log::info!("ui: settings saved"),
            Err(e) => log::warn!("ui: could not save settings: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
