//! English speaking/writing practice with instant scored feedback.
//!
//! * [`feedback`] — local rule pipeline: segment, match, score, assemble.
//! * [`provider`] — feedback backends (local, remote API, fallback).
//! * [`store`] — persisted users, sessions and rewards.
//! * [`speech`] — recognizer/synthesizer adapters.
//! * [`practice`] — orchestrator tying the above together.
//! * [`config`] — TOML settings and platform paths.
//! * [`app`] — the egui practice window.

pub mod app;
pub mod config;
pub mod feedback;
pub mod practice;
pub mod provider;
pub mod speech;
pub mod store;
