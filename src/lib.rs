//! Time-series range labeling (egui front end over a toolkit-agnostic core)
//! and a small audio-to-MIDI transcription web form.

pub mod app;
pub mod color;
pub mod data;
pub mod labeling;
pub mod render;
pub mod state;
pub mod transcribe;
pub mod ui;
