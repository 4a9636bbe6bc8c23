/// Audio-to-MIDI transcription behind the upload form.
///
/// ```text
///  WAV file ─► audio::read_wav ─► pitch::track_pitch ─► notes::segment_notes ─► midi::write_midi
/// ```

pub mod audio;
pub mod midi;
pub mod notes;
pub mod pitch;
pub mod web;

use std::path::Path;

use thiserror::Error;

use self::pitch::TrackerConfig;

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("unsupported or corrupt audio: {0}")]
    Decode(#[from] hound::Error),

    #[error("audio contains no samples")]
    EmptyAudio,

    #[error("spectral analysis failed: {0}")]
    Analysis(String),

    #[error("failed to write MIDI: {0}")]
    Midi(String),
}

impl TranscribeError {
    /// Whether the failure is caused by the uploaded file rather than the server.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::EmptyAudio)
    }
}

/// Turns an audio file into Standard MIDI File bytes.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &Path) -> Result<Vec<u8>, TranscribeError>;
}

/// Monophonic transcriber: dominant FFT peak per frame, merged into notes.
#[derive(Debug, Clone)]
pub struct PitchTranscriber {
    pub tracker: TrackerConfig,
    /// Notes shorter than this are dropped, seconds.
    pub min_note_secs: f64,
}

impl Default for PitchTranscriber {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            min_note_secs: 0.1,
        }
    }
}

impl Transcriber for PitchTranscriber {
    fn transcribe(&self, path: &Path) -> Result<Vec<u8>, TranscribeError> {
        let audio = audio::read_wav(path)?;
        let frames = pitch::track_pitch(&audio, &self.tracker)?;
        let hop_secs = self.tracker.hop_size as f64 / audio.sample_rate as f64;
        let notes = notes::segment_notes(&frames, hop_secs, self.min_note_secs);
        log::info!(
            "transcribed {:.2}s of audio into {} notes",
            audio.duration_secs(),
            notes.len()
        );
        midi::write_midi(&notes)
    }
}
