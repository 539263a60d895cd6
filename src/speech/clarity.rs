use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::SpeechScoringConfig;
use super::dsp;

/// Neutral value for a clarity term that cannot be measured
const NEUTRAL: f64 = 0.5;

/// The three terms blended into the clarity score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarityBreakdown {
    /// Estimated SNR in dB, when a non-zero noise floor exists
    pub snr_db: Option<f64>,
    pub snr_score: f64,
    pub volume_score: f64,
    pub spectral_score: f64,
    pub clarity: f64,
}

pub(crate) fn analyze(signal: &[f64], sample_rate: u32, cfg: &SpeechScoringConfig) -> ClarityBreakdown {
    let powers: Vec<f64> = signal.iter().map(|s| s * s).collect();

    let snr_db = estimate_snr_db(&powers, cfg.noise_floor_percentile);
    let snr_score = match snr_db {
        Some(db) if cfg.snr_range_db > 0.0 => (db / cfg.snr_range_db).clamp(0.0, 1.0),
        _ => NEUTRAL,
    };

    let volume_score = dsp::std_dev(signal)
        .filter(|_| cfg.volume_std_normalizer > 0.0)
        .map(|std| 1.0 - (std / cfg.volume_std_normalizer).min(1.0))
        .unwrap_or(NEUTRAL);

    let spectral_score = band_energy_fraction(
        signal,
        sample_rate,
        cfg.speech_band_min_hz,
        cfg.speech_band_max_hz,
    )
    .unwrap_or(NEUTRAL);

    let w = cfg.clarity_weights;
    let clarity =
        (snr_score * w.snr + volume_score * w.volume + spectral_score * w.spectral).clamp(0.0, 1.0);

    ClarityBreakdown {
        snr_db,
        snr_score,
        volume_score,
        spectral_score,
        clarity,
    }
}

/// Mean power against the low-percentile power floor, in dB
fn estimate_snr_db(powers: &[f64], floor_percentile: f64) -> Option<f64> {
    let signal_power = dsp::mean(powers)?;
    let noise_floor = dsp::percentile(powers, floor_percentile)?;
    if noise_floor <= 0.0 || signal_power <= 0.0 {
        debug!("Zero noise floor; SNR term defaulted");
        return None;
    }
    Some(10.0 * (signal_power / noise_floor).log10())
}

/// Fraction of total spectral energy (all bins) that falls in the
/// non-negative frequency bins inside `[min_hz, max_hz]`
pub(crate) fn band_energy_fraction(
    signal: &[f64],
    sample_rate: u32,
    min_hz: f64,
    max_hz: f64,
) -> Option<f64> {
    let n = signal.len();
    if n == 0 || sample_rate == 0 {
        return None;
    }

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let total: f64 = buffer.iter().map(|c| c.norm_sqr()).sum();
    if total <= 0.0 {
        return None;
    }

    let bin_hz = sample_rate as f64 / n as f64;
    let non_negative_bins = (n + 1) / 2;
    let band: f64 = buffer[..non_negative_bins]
        .iter()
        .enumerate()
        .filter(|(k, _)| {
            let freq = *k as f64 * bin_hz;
            freq >= min_hz && freq <= max_hz
        })
        .map(|(_, c)| c.norm_sqr())
        .sum();

    Some((band / total).clamp(0.0, 1.0))
}
