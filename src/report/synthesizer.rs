use serde::{Deserialize, Serialize};

use crate::session::{FinalizedSnapshot, SpeechMetrics};

pub const EYE_CONTACT_FEEDBACK: &str = "Work on maintaining better eye contact during interviews";
pub const CONFIDENCE_FEEDBACK: &str = "Practice to build more confidence in your responses";
pub const CLARITY_FEEDBACK: &str = "Focus on speaking clearly and reducing filler words";
pub const POSITIVE_FEEDBACK: &str = "Excellent performance! Keep up the good work.";
pub const POSITIVE_SPEECH_FEEDBACK: &str = "Excellent speech quality! Keep up the good work.";

/// Weights of the overall score; each metric is first scaled to [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportWeights {
    pub eye_contact: f64,
    pub confidence: f64,
    pub clarity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub weights: ReportWeights,
    /// Eye contact (percent) below which eye-contact feedback is given
    pub eye_contact_feedback_threshold: f64,
    /// Confidence (0-1) below which confidence feedback is given
    pub confidence_feedback_threshold: f64,
    /// Clarity (0-1) below which clarity feedback is given
    pub clarity_feedback_threshold: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            weights: ReportWeights {
                eye_contact: 0.3,
                confidence: 0.3,
                clarity: 0.4,
            },
            eye_contact_feedback_threshold: 50.0,
            confidence_feedback_threshold: 0.6,
            clarity_feedback_threshold: 0.7,
        }
    }
}

/// Final, human-facing summary of a completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub eye_contact_percentage: f64,
    pub confidence_score: f64,
    pub speech_clarity: f64,
    /// Weighted score in [0, 100], rounded to two decimals
    pub overall_score: f64,
    pub feedback: Vec<String>,
    pub speech_feedback: Vec<String>,
    pub session_eye_contact_mean: f64,
    pub session_confidence_mean: f64,
    pub frames_processed: u64,
    pub utterances_processed: u64,
    pub filler_words_count: usize,
    pub speaking_rate_wpm: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ReportSynthesizer {
    config: ReportConfig,
}

impl ReportSynthesizer {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn synthesize(&self, snapshot: &FinalizedSnapshot) -> FinalReport {
        let eye_contact = snapshot.eye_contact_mean;
        let confidence = snapshot.confidence_mean;
        let clarity = snapshot.speech_clarity();

        let w = self.config.weights;
        let overall = eye_contact * w.eye_contact
            + confidence * 100.0 * w.confidence
            + clarity * 100.0 * w.clarity;

        FinalReport {
            eye_contact_percentage: eye_contact,
            confidence_score: confidence,
            speech_clarity: clarity,
            overall_score: round2(overall.clamp(0.0, 100.0)),
            feedback: self.feedback(eye_contact, confidence, clarity),
            speech_feedback: speech_feedback(snapshot.speech.as_ref()),
            session_eye_contact_mean: snapshot.session_eye_contact_mean,
            session_confidence_mean: snapshot.session_confidence_mean,
            frames_processed: snapshot.frames_processed,
            utterances_processed: snapshot.utterances_processed,
            filler_words_count: snapshot.speech.map(|s| s.filler_count).unwrap_or(0),
            speaking_rate_wpm: snapshot.speech.map(|s| s.speaking_rate_wpm).unwrap_or(0.0),
        }
    }

    /// Additive rules in fixed order; the positive line only when none fire
    fn feedback(&self, eye_contact: f64, confidence: f64, clarity: f64) -> Vec<String> {
        let cfg = &self.config;
        let mut feedback = Vec::new();

        if eye_contact < cfg.eye_contact_feedback_threshold {
            feedback.push(EYE_CONTACT_FEEDBACK.to_string());
        }
        if confidence < cfg.confidence_feedback_threshold {
            feedback.push(CONFIDENCE_FEEDBACK.to_string());
        }
        if clarity < cfg.clarity_feedback_threshold {
            feedback.push(CLARITY_FEEDBACK.to_string());
        }
        if feedback.is_empty() {
            feedback.push(POSITIVE_FEEDBACK.to_string());
        }
        feedback
    }
}

/// Speech coaching lines from the latest utterance
fn speech_feedback(speech: Option<&SpeechMetrics>) -> Vec<String> {
    let speech = speech.copied().unwrap_or_default();
    let mut feedback = Vec::new();

    if speech.clarity < 0.5 {
        feedback.push("Speak more clearly and enunciate your words");
    } else if speech.clarity < 0.7 {
        feedback.push("Try to improve your pronunciation and articulation");
    }

    if speech.fluency < 0.5 {
        feedback.push("Work on speaking more fluently and reducing pauses");
    } else if speech.fluency < 0.7 {
        feedback.push("Practice speaking at a consistent pace");
    }

    if speech.filler_count > 5 {
        feedback.push("Reduce the use of filler words like 'um', 'uh', 'like'");
    } else if speech.filler_count > 2 {
        feedback.push("Try to minimize filler words in your speech");
    }

    // A zero rate means no transcript was available, not a slow speaker
    if speech.speaking_rate_wpm > 0.0 && speech.speaking_rate_wpm < 100.0 {
        feedback.push("Try to speak a bit faster to maintain engagement");
    } else if speech.speaking_rate_wpm > 180.0 {
        feedback.push("Slow down your speech for better clarity");
    }

    if feedback.is_empty() {
        feedback.push(POSITIVE_SPEECH_FEEDBACK);
    }
    feedback.into_iter().map(String::from).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(37.996), 38.0);
        assert_eq!(round2(12.344), 12.34);
    }

    #[test]
    fn test_speech_feedback_without_audio() {
        let feedback = speech_feedback(None);
        assert_eq!(
            feedback,
            vec![
                "Speak more clearly and enunciate your words".to_string(),
                "Work on speaking more fluently and reducing pauses".to_string(),
            ]
        );
    }

    #[test]
    fn test_speech_feedback_positive() {
        let speech = SpeechMetrics {
            clarity: 0.9,
            fluency: 0.9,
            filler_count: 1,
            speaking_rate_wpm: 140.0,
        };
        assert_eq!(speech_feedback(Some(&speech)), vec![POSITIVE_SPEECH_FEEDBACK.to_string()]);
    }

    #[test]
    fn test_speech_feedback_fast_and_filler_heavy() {
        let speech = SpeechMetrics {
            clarity: 0.8,
            fluency: 0.6,
            filler_count: 7,
            speaking_rate_wpm: 210.0,
        };
        let feedback = speech_feedback(Some(&speech));
        assert_eq!(feedback.len(), 3);
        assert!(feedback[0].contains("consistent pace"));
        assert!(feedback[1].contains("Reduce the use of filler words"));
        assert!(feedback[2].contains("Slow down"));
    }
}
