use super::pitch::FramePitch;

/// MIDI note number of A4.
const A4_NOTE: f32 = 69.0;
const A4_FREQ: f32 = 440.0;

/// A detected note, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pub pitch: u8,
    pub start: f64,
    pub end: f64,
    pub velocity: u8,
}

/// Nearest MIDI note for a frequency, `None` outside 0..=127.
pub fn frequency_to_midi(frequency: f32) -> Option<u8> {
    if frequency <= 0.0 || !frequency.is_finite() {
        return None;
    }
    let note = (A4_NOTE + 12.0 * (frequency / A4_FREQ).log2()).round();
    (0.0..=127.0).contains(&note).then_some(note as u8)
}

/// Merge runs of frames on the same MIDI note into note events.
///
/// Each frame lasts `hop_secs`. Runs shorter than `min_duration` are dropped.
/// Velocity is the run's mean RMS relative to the loudest voiced frame.
pub fn segment_notes(frames: &[FramePitch], hop_secs: f64, min_duration: f64) -> Vec<NoteEvent> {
    let loudest = frames
        .iter()
        .filter(|f| f.frequency.is_some())
        .map(|f| f.rms)
        .fold(0.0f32, f32::max);

    let mut notes = Vec::new();
    let mut run: Option<(u8, f64, f32, usize)> = None; // pitch, start, rms sum, frames

    let close = |run: Option<(u8, f64, f32, usize)>, end: f64, notes: &mut Vec<NoteEvent>| {
        let Some((pitch, start, rms_sum, count)) = run else {
            return;
        };
        if end - start < min_duration {
            return;
        }
        let mean_rms = rms_sum / count as f32;
        let velocity = if loudest > 0.0 {
            ((mean_rms / loudest) * 127.0).round().clamp(1.0, 127.0) as u8
        } else {
            64
        };
        notes.push(NoteEvent {
            pitch,
            start,
            end,
            velocity,
        });
    };

    for frame in frames {
        let pitch = frame.frequency.and_then(frequency_to_midi);
        match (run, pitch) {
            (Some((current, start, sum, count)), Some(p)) if p == current => {
                run = Some((current, start, sum + frame.rms, count + 1));
            }
            (_, next) => {
                close(run.take(), frame.time, &mut notes);
                run = next.map(|p| (p, frame.time, frame.rms, 1));
            }
        }
    }

    if let Some(last) = frames.last() {
        close(run, last.time + hop_secs, &mut notes);
    }

    notes
}
