use std::f32::consts::PI;

use realfft::RealFftPlanner;

use super::audio::MonoAudio;
use super::TranscribeError;

// ---------------------------------------------------------------------------
// Frame-wise pitch tracking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Samples per analysis frame (FFT size).
    pub frame_size: usize,
    /// Samples between frame starts.
    pub hop_size: usize,
    /// Lowest detectable fundamental, Hz.
    pub min_freq: f32,
    /// Highest detectable fundamental, Hz.
    pub max_freq: f32,
    /// Frames quieter than this RMS are treated as silence.
    pub silence_rms: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            frame_size: 4096,
            hop_size: 1024,
            min_freq: 27.5,
            max_freq: 4186.0,
            silence_rms: 0.01,
        }
    }
}

/// Analysis result for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePitch {
    /// Frame start, seconds.
    pub time: f64,
    /// Dominant frequency, `None` for silent frames.
    pub frequency: Option<f32>,
    pub rms: f32,
}

/// Estimate the dominant frequency of every frame.
///
/// Audio shorter than one frame is zero-padded into a single frame.
pub fn track_pitch(
    audio: &MonoAudio,
    config: &TrackerConfig,
) -> Result<Vec<FramePitch>, TranscribeError> {
    let n = config.frame_size;
    let sample_rate = audio.sample_rate as f32;
    let bin_freq = sample_rate / n as f32;
    let min_bin = ((config.min_freq / bin_freq).floor() as usize).max(1);
    let max_bin = ((config.max_freq / bin_freq).ceil() as usize).min(n / 2 - 1);

    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n);
    let window: Vec<f32> = (0..n)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (n - 1) as f32).cos()))
        .collect();

    let mut input = fft.make_input_vec();
    let mut spectrum = fft.make_output_vec();
    let mut magnitudes = vec![0.0f32; spectrum.len()];
    let mut frames = Vec::new();

    let mut start = 0;
    loop {
        let end = (start + n).min(audio.samples.len());
        let chunk = &audio.samples[start..end];

        let rms = (chunk.iter().map(|s| s * s).sum::<f32>() / chunk.len().max(1) as f32).sqrt();
        let time = start as f64 / audio.sample_rate as f64;

        let frequency = if rms < config.silence_rms || min_bin >= max_bin {
            None
        } else {
            for (i, slot) in input.iter_mut().enumerate() {
                *slot = chunk.get(i).copied().unwrap_or(0.0) * window[i];
            }
            fft.process(&mut input, &mut spectrum)
                .map_err(|e| TranscribeError::Analysis(e.to_string()))?;
            for (m, c) in magnitudes.iter_mut().zip(&spectrum) {
                *m = c.norm();
            }
            peak_frequency(&magnitudes, min_bin, max_bin, bin_freq)
        };

        frames.push(FramePitch {
            time,
            frequency,
            rms,
        });

        if end >= audio.samples.len() {
            break;
        }
        start += config.hop_size;
    }

    Ok(frames)
}

/// Strongest bin in `[min_bin, max_bin]`, refined with parabolic interpolation.
fn peak_frequency(magnitudes: &[f32], min_bin: usize, max_bin: usize, bin_freq: f32) -> Option<f32> {
    let (peak, &peak_mag) = magnitudes[min_bin..=max_bin]
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, m)| (i + min_bin, m))?;

    if peak_mag <= 0.0 {
        return None;
    }

    let left = magnitudes[peak - 1];
    let right = magnitudes[peak + 1];
    let denom = left - 2.0 * peak_mag + right;
    let offset = if denom.abs() > f32::EPSILON {
        0.5 * (left - right) / denom
    } else {
        0.0
    };

    Some((peak as f32 + offset) * bin_freq)
}
