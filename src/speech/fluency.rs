use serde::{Deserialize, Serialize};

use super::config::{FluencyWeights, SpeechScoringConfig};
use super::dsp;

/// A filler token found in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerWord {
    pub word: String,
    /// Token index in the transcript
    pub position: usize,
    /// Surrounding tokens, filler included
    pub context: String,
}

fn tokens(transcript: &str) -> Vec<String> {
    transcript
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| c.is_ascii_punctuation())
                .to_lowercase()
        })
        .collect()
}

pub(crate) fn word_count(transcript: &str) -> usize {
    transcript.split_whitespace().count()
}

/// Exact lowercase token match against `fillers`, with a symmetric context window
pub fn detect_filler_words(transcript: &str, fillers: &[String], context_tokens: usize) -> Vec<FillerWord> {
    let words = tokens(transcript);

    words
        .iter()
        .enumerate()
        .filter(|(_, word)| fillers.iter().any(|f| f == *word))
        .map(|(i, word)| {
            let start = i.saturating_sub(context_tokens);
            let end = i.saturating_add(context_tokens).saturating_add(1).min(words.len());
            FillerWord {
                word: word.clone(),
                position: i,
                context: words[start..end].join(" "),
            }
        })
        .collect()
}

/// Fraction of energy-envelope frames below the configured energy percentile
pub(crate) fn pause_ratio(signal: &[f64], sample_rate: u32, cfg: &SpeechScoringConfig) -> Option<f64> {
    let frame_len = (cfg.pause_chunk_secs * sample_rate as f64) as usize;
    let energies = dsp::frame_energies(signal, frame_len);
    let threshold = dsp::percentile(&energies, cfg.pause_percentile)?;
    let pauses = energies.iter().filter(|&&e| e < threshold).count();
    Some(pauses as f64 / energies.len() as f64)
}

/// Step score around the 120-160 wpm optimum; `None` (unmeasurable) is neutral
pub fn speaking_rate_score(words_per_minute: Option<f64>) -> f64 {
    match words_per_minute {
        None => 0.5,
        Some(wpm) if (120.0..=160.0).contains(&wpm) => 1.0,
        Some(wpm) if (100.0..=180.0).contains(&wpm) => 0.8,
        Some(wpm) if (80.0..=200.0).contains(&wpm) => 0.6,
        Some(_) => 0.3,
    }
}

/// Step score around the 10-20% pause optimum; `None` (unmeasurable) is neutral
pub fn pause_ratio_score(pause_ratio: Option<f64>) -> f64 {
    match pause_ratio {
        None => 0.5,
        Some(r) if (0.1..=0.2).contains(&r) => 1.0,
        Some(r) if (0.05..=0.3).contains(&r) => 0.7,
        Some(r) if (0.02..=0.4).contains(&r) => 0.5,
        Some(_) => 0.2,
    }
}

/// Step score for the share of filler words (optimum below 5%)
pub fn filler_ratio_score(filler_ratio: f64) -> f64 {
    if filler_ratio < 0.05 {
        1.0
    } else if filler_ratio < 0.1 {
        0.7
    } else if filler_ratio < 0.15 {
        0.5
    } else {
        0.2
    }
}

/// Weighted blend of the three band scores, clamped to [0, 1]
pub fn fluency_score(
    words_per_minute: Option<f64>,
    pause_ratio: Option<f64>,
    filler_ratio: f64,
    weights: &FluencyWeights,
) -> f64 {
    let score = speaking_rate_score(words_per_minute) * weights.rate
        + pause_ratio_score(pause_ratio) * weights.pause
        + filler_ratio_score(filler_ratio) * weights.filler;
    score.clamp(0.0, 1.0)
}
