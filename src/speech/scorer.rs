use serde::{Deserialize, Serialize};
use tracing::debug;

use super::clarity::{self, ClarityBreakdown};
use super::config::SpeechScoringConfig;
use super::fluency::{self, FillerWord};
use super::tone::{self, ToneStats};
use super::utterance::AudioUtterance;

/// Scores derived from a single utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioScore {
    /// Clarity in [0, 1]
    pub clarity_score: f64,
    /// Fluency in [0, 1]; 0 without a transcript
    pub fluency_score: f64,
    pub filler_words: Vec<FillerWord>,
    pub word_count: usize,
    /// Words per minute; 0 without a transcript
    pub speaking_rate_wpm: f64,
    /// Share of low-energy frames, when measurable
    pub pause_ratio: Option<f64>,
    pub tone_stats: ToneStats,
    pub clarity_breakdown: ClarityBreakdown,
}

impl AudioScore {
    pub fn filler_count(&self) -> usize {
        self.filler_words.len()
    }
}

/// Stateless scorer for utterances; safe to share across threads
#[derive(Debug, Clone, Default)]
pub struct AudioScorer {
    config: SpeechScoringConfig,
}

impl AudioScorer {
    pub fn new(config: SpeechScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SpeechScoringConfig {
        &self.config
    }

    /// Score an utterance. Never fails: an utterance with no decodable audio
    /// yields the all-zero [`AudioScore::default`].
    pub fn score(&self, utterance: &AudioUtterance) -> AudioScore {
        if !utterance.is_analyzable() {
            debug!("Utterance has no analyzable audio; using zero score");
            return AudioScore::default();
        }

        let cfg = &self.config;
        let signal = utterance.mono_samples();
        let sample_rate = utterance.sample_rate;

        let clarity_breakdown = clarity::analyze(&signal, sample_rate, cfg);
        let tone_stats = tone::analyze(&signal, sample_rate, cfg);
        let pause_ratio = fluency::pause_ratio(&signal, sample_rate, cfg);

        let mut score = AudioScore {
            clarity_score: clarity_breakdown.clarity,
            pause_ratio,
            tone_stats,
            clarity_breakdown,
            ..AudioScore::default()
        };

        let Some(transcript) = utterance.transcript() else {
            debug!("No transcript; transcript-dependent metrics defaulted");
            return score;
        };

        let word_count = fluency::word_count(transcript);
        let filler_words =
            fluency::detect_filler_words(transcript, &cfg.filler_words, cfg.filler_context_tokens);

        let duration = utterance.duration_secs();
        let words_per_minute = (duration > 0.0).then(|| word_count as f64 / duration * 60.0);
        let filler_ratio = filler_words.len() as f64 / word_count.max(1) as f64;

        score.fluency_score = fluency::fluency_score(
            words_per_minute,
            pause_ratio,
            filler_ratio,
            &cfg.fluency_weights,
        );
        score.speaking_rate_wpm = words_per_minute.unwrap_or(0.0).max(0.0);
        score.word_count = word_count;
        score.filler_words = filler_words;
        score
    }
}
