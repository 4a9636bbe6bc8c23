use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use super::TranscribeError;

/// Mono audio normalised to `[-1.0, 1.0]`.
#[derive(Debug, Clone)]
pub struct MonoAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl MonoAudio {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode a WAV file and mix it down to mono.
pub fn read_wav(path: &Path) -> Result<MonoAudio, TranscribeError> {
    decode(WavReader::open(path)?)
}

/// Same as [`read_wav`] for an in-memory or streamed source.
pub fn read_wav_from<R: Read>(source: R) -> Result<MonoAudio, TranscribeError> {
    decode(WavReader::new(source)?)
}

fn decode<R: Read>(mut reader: WavReader<R>) -> Result<MonoAudio, TranscribeError> {
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let samples: Vec<f32> = interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();

    if samples.is_empty() || spec.sample_rate == 0 {
        return Err(TranscribeError::EmptyAudio);
    }

    Ok(MonoAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}
