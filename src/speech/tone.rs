use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::config::SpeechScoringConfig;
use super::dsp;

/// Pitch statistics over the voiced frames of an utterance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneStats {
    pub average_pitch_hz: f64,
    pub pitch_variation_hz: f64,
    /// 1 minus normalized pitch variability, in [0, 1]
    pub tone_confidence: f64,
}

impl ToneStats {
    /// Stats for an utterance without any voiced frame
    pub fn unvoiced() -> Self {
        Self {
            average_pitch_hz: 0.0,
            pitch_variation_hz: 0.0,
            tone_confidence: 0.5,
        }
    }
}

pub(crate) fn analyze(signal: &[f64], sample_rate: u32, cfg: &SpeechScoringConfig) -> ToneStats {
    let track = pitch_track(signal, sample_rate, cfg);

    let (Some(average), Some(variation)) = (dsp::mean(&track), dsp::std_dev(&track)) else {
        return ToneStats::unvoiced();
    };

    let tone_confidence = if cfg.pitch_variation_normalizer > 0.0 {
        1.0 - (variation / cfg.pitch_variation_normalizer).min(1.0)
    } else {
        0.5
    };

    ToneStats {
        average_pitch_hz: average,
        pitch_variation_hz: variation,
        tone_confidence,
    }
}

/// Dominant in-range frequency of each Hann-windowed STFT frame, refined by
/// parabolic interpolation. Frames whose in-range peak is weaker than the
/// configured fraction of the frame maximum are skipped.
pub(crate) fn pitch_track(signal: &[f64], sample_rate: u32, cfg: &SpeechScoringConfig) -> Vec<f64> {
    let frame_len = cfg.pitch_frame_len;
    let hop = cfg.pitch_hop_len.max(1);
    if signal.is_empty() || sample_rate == 0 || frame_len < 4 {
        return Vec::new();
    }

    let bin_hz = sample_rate as f64 / frame_len as f64;
    let min_bin = ((cfg.pitch_min_hz / bin_hz).ceil() as usize).max(1);
    let max_bin = ((cfg.pitch_max_hz / bin_hz).floor() as usize).min(frame_len / 2 - 1);
    if min_bin > max_bin {
        return Vec::new();
    }

    let window: Vec<f64> = (0..frame_len)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / frame_len as f64).cos())
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(frame_len);
    let mut buffer = vec![Complex::new(0.0, 0.0); frame_len];

    let mut pitches = Vec::new();
    let mut start = 0;
    loop {
        for (i, slot) in buffer.iter_mut().enumerate() {
            let sample = signal.get(start + i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * window[i], 0.0);
        }
        fft.process(&mut buffer);

        let magnitudes: Vec<f64> = buffer[..=frame_len / 2].iter().map(|c| c.norm()).collect();
        let frame_max = magnitudes.iter().copied().fold(0.0, f64::max);

        let (peak_bin, peak) = (min_bin..=max_bin)
            .map(|k| (k, magnitudes[k]))
            .fold((min_bin, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if frame_max > 0.0 && peak > 0.0 && peak >= cfg.pitch_magnitude_threshold * frame_max {
            let offset = parabolic_offset(
                magnitudes[peak_bin - 1],
                magnitudes[peak_bin],
                magnitudes[peak_bin + 1],
            );
            pitches.push((peak_bin as f64 + offset) * bin_hz);
        }

        start += hop;
        if start + frame_len > signal.len() {
            break;
        }
    }

    pitches
}

/// Vertex offset in [-0.5, 0.5] of the parabola through three adjacent bins
fn parabolic_offset(left: f64, center: f64, right: f64) -> f64 {
    let denominator = left - 2.0 * center + right;
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    (0.5 * (left - right) / denominator).clamp(-0.5, 0.5)
}
