use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::AggregatorConfig;
use super::history::RollingHistory;
use crate::face::FrameScore;
use crate::speech::AudioScore;

/// Returned when an update reaches an aggregator that was already finalized
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("aggregator is finalized")]
pub struct Finalized;

/// Threshold-based warnings over the smoothed metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warnings {
    pub low_eye_contact: bool,
    pub low_confidence: bool,
}

impl Warnings {
    pub fn any(&self) -> bool {
        self.low_eye_contact || self.low_confidence
    }

    /// Human-readable warning lines, in fixed order
    pub fn messages(&self) -> Vec<&'static str> {
        let mut messages = Vec::new();
        if self.low_eye_contact {
            messages.push("Low eye contact detected");
        }
        if self.low_confidence {
            messages.push("Low confidence detected");
        }
        messages
    }
}

/// Speech state from the most recent utterance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechMetrics {
    pub clarity: f64,
    pub fluency: f64,
    pub filler_count: usize,
    pub speaking_rate_wpm: f64,
}

impl From<&AudioScore> for SpeechMetrics {
    fn from(score: &AudioScore) -> Self {
        Self {
            clarity: score.clarity_score,
            fluency: score.fluency_score,
            filler_count: score.filler_count(),
            speaking_rate_wpm: score.speaking_rate_wpm,
        }
    }
}

/// Point-in-time copy of the smoothed metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Mean eye contact over the window, in [0, 100]
    pub eye_contact_mean: f64,
    /// Mean confidence over the window, in [0, 1]
    pub confidence_mean: f64,
    /// Frames currently in the window
    pub window_len: usize,
    /// Frames dispatched since the session started
    pub frames_seen: u64,
    pub speech: Option<SpeechMetrics>,
    pub warnings: Warnings,
}

/// Frozen aggregate handed to the report synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedSnapshot {
    pub eye_contact_mean: f64,
    pub confidence_mean: f64,
    pub speech: Option<SpeechMetrics>,
    /// Averages over every counted frame of the session
    pub session_eye_contact_mean: f64,
    pub session_confidence_mean: f64,
    pub frames_processed: u64,
    pub utterances_processed: u64,
}

impl FinalizedSnapshot {
    /// Latest clarity, 0 if no utterance was ever scored
    pub fn speech_clarity(&self) -> f64 {
        self.speech.map(|s| s.clarity).unwrap_or(0.0)
    }
}

/// Running totals over the whole session, outside the window
#[derive(Debug, Clone, Copy, Default)]
struct LifetimeTotals {
    frames: u64,
    eye_contact_sum: f64,
    confidence_sum: f64,
}

impl LifetimeTotals {
    fn mean(sum: f64, count: u64) -> f64 {
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

/// Bounded-memory aggregate of one session's score stream
#[derive(Debug, Clone)]
pub struct RollingAggregator {
    config: AggregatorConfig,
    eye_contact: RollingHistory,
    confidence: RollingHistory,
    latest_speech: Option<SpeechMetrics>,
    frames_seen: u64,
    utterances_seen: u64,
    totals: LifetimeTotals,
    warnings: Warnings,
    finalized: bool,
}

impl RollingAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            eye_contact: RollingHistory::new(config.history_capacity),
            confidence: RollingHistory::new(config.history_capacity),
            config,
            latest_speech: None,
            frames_seen: 0,
            utterances_seen: 0,
            totals: LifetimeTotals::default(),
            warnings: Warnings::default(),
            finalized: false,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Push a frame's scores into the window and recompute warnings
    pub fn update_frame(&mut self, score: &FrameScore) -> Result<(), Finalized> {
        if self.finalized {
            return Err(Finalized);
        }

        self.frames_seen += 1;
        if !score.face_detected && !self.config.count_faceless_frames {
            return Ok(());
        }

        let eye_contact = score.eye_contact_percentage.clamp(0.0, 100.0);
        let confidence = score.confidence_score.clamp(0.0, 1.0);

        self.eye_contact.push(eye_contact);
        self.confidence.push(confidence);
        self.totals.frames += 1;
        self.totals.eye_contact_sum += eye_contact;
        self.totals.confidence_sum += confidence;

        self.warnings = Warnings {
            low_eye_contact: self.eye_contact.mean() < self.config.low_eye_contact_threshold,
            low_confidence: self.confidence.mean() < self.config.low_confidence_threshold,
        };
        Ok(())
    }

    /// Replace the latest speech metrics; utterances are not windowed
    pub fn update_audio(&mut self, score: &AudioScore) -> Result<(), Finalized> {
        if self.finalized {
            return Err(Finalized);
        }

        let mut metrics = SpeechMetrics::from(score);
        metrics.clarity = metrics.clarity.clamp(0.0, 1.0);
        metrics.fluency = metrics.fluency.clamp(0.0, 1.0);
        self.latest_speech = Some(metrics);
        self.utterances_seen += 1;
        Ok(())
    }

    /// Current smoothed metrics. Warnings stay clear until a frame is counted.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            eye_contact_mean: self.eye_contact.mean(),
            confidence_mean: self.confidence.mean(),
            window_len: self.eye_contact.len(),
            frames_seen: self.frames_seen,
            speech: self.latest_speech,
            warnings: self.warnings,
        }
    }

    /// Freeze the aggregator; every later update is rejected
    pub fn finalize(&mut self) -> Result<FinalizedSnapshot, Finalized> {
        if self.finalized {
            return Err(Finalized);
        }
        self.finalized = true;

        Ok(FinalizedSnapshot {
            eye_contact_mean: self.eye_contact.mean(),
            confidence_mean: self.confidence.mean(),
            speech: self.latest_speech,
            session_eye_contact_mean: LifetimeTotals::mean(
                self.totals.eye_contact_sum,
                self.totals.frames,
            ),
            session_confidence_mean: LifetimeTotals::mean(
                self.totals.confidence_sum,
                self.totals.frames,
            ),
            frames_processed: self.frames_seen,
            utterances_processed: self.utterances_seen,
        })
    }
}
