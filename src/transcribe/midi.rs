// Standard MIDI File output for transcribed notes, written with midly.

use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

use super::notes::NoteEvent;
use super::TranscribeError;

/// Pulses per quarter note.
pub const PPQ: u16 = 480;
/// Fixed tempo; note times are converted to ticks at this rate.
pub const BPM: f64 = 120.0;

const TRACK_NAME: &[u8] = b"transcription";

/// Ticks per second at [`BPM`] / [`PPQ`].
fn ticks_per_second() -> f64 {
    PPQ as f64 * BPM / 60.0
}

fn to_tick(seconds: f64) -> u32 {
    (seconds.max(0.0) * ticks_per_second()).round() as u32
}

/// Encode notes as a single-track SMF and return the file bytes.
pub fn write_midi(notes: &[NoteEvent]) -> Result<Vec<u8>, TranscribeError> {
    let header = Header {
        format: Format::SingleTrack,
        timing: Timing::Metrical(PPQ.into()),
    };

    let mut track = Track::new();
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(TRACK_NAME)),
    });
    let us_per_quarter = (60_000_000.0 / BPM) as u32;
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(us_per_quarter.into())),
    });

    // (absolute tick, is_note_on, event); offs sort before ons at the same tick.
    let mut events: Vec<(u32, bool, TrackEventKind)> = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        let on = to_tick(note.start);
        let off = to_tick(note.end).max(on + 1);
        events.push((
            on,
            true,
            TrackEventKind::Midi {
                channel: 0.into(),
                message: MidiMessage::NoteOn {
                    key: note.pitch.into(),
                    vel: note.velocity.max(1).into(),
                },
            },
        ));
        events.push((
            off,
            false,
            TrackEventKind::Midi {
                channel: 0.into(),
                message: MidiMessage::NoteOff {
                    key: note.pitch.into(),
                    vel: 0.into(),
                },
            },
        ));
    }
    events.sort_by_key(|(tick, is_on, _)| (*tick, *is_on));

    let mut last_tick = 0;
    for (tick, _, kind) in events {
        track.push(TrackEvent {
            delta: (tick - last_tick).into(),
            kind,
        });
        last_tick = tick;
    }

    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let smf = Smf {
        header,
        tracks: vec![track],
    };

    let mut bytes = Vec::new();
    smf.write(&mut bytes)
        .map_err(|e| TranscribeError::Midi(e.to_string()))?;
    Ok(bytes)
}
