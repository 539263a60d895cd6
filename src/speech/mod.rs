//! Signal scoring of spoken utterances
//!
//! This module turns one decoded utterance (plus an optional transcript from
//! an external speech-to-text service) into clarity, fluency and tone
//! metrics. Like the face scorer it is pure and total.

mod clarity;
mod config;
mod dsp;
mod fluency;
mod scorer;
mod tone;
mod utterance;

pub use clarity::ClarityBreakdown;
pub use config::{ClarityWeights, FluencyWeights, SpeechScoringConfig};
pub use fluency::{
    detect_filler_words, filler_ratio_score, fluency_score, pause_ratio_score,
    speaking_rate_score, FillerWord,
};
pub use scorer::{AudioScore, AudioScorer};
pub use tone::ToneStats;
pub use utterance::AudioUtterance;
