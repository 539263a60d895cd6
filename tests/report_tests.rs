use interview_engine::report::{
    ReportConfig, ReportSynthesizer, ReportWeights, CLARITY_FEEDBACK, CONFIDENCE_FEEDBACK,
    EYE_CONTACT_FEEDBACK, POSITIVE_FEEDBACK,
};
use interview_engine::session::{FinalizedSnapshot, SpeechMetrics};

fn finalized(eye_contact: f64, confidence: f64, clarity: Option<f64>) -> FinalizedSnapshot {
    FinalizedSnapshot {
        eye_contact_mean: eye_contact,
        confidence_mean: confidence,
        speech: clarity.map(|clarity| SpeechMetrics {
            clarity,
            fluency: 0.8,
            filler_count: 0,
            speaking_rate_wpm: 140.0,
        }),
        session_eye_contact_mean: eye_contact,
        session_confidence_mean: confidence,
        frames_processed: 30,
        utterances_processed: clarity.map_or(0, |_| 1),
    }
}

#[test]
fn test_all_thresholds_breached() {
    let report = ReportSynthesizer::default().synthesize(&finalized(20.0, 0.4, Some(0.5)));

    // 20 * 0.3 + 40 * 0.3 + 50 * 0.4
    assert_eq!(report.overall_score, 38.0);
    assert_eq!(
        report.feedback,
        vec![EYE_CONTACT_FEEDBACK, CONFIDENCE_FEEDBACK, CLARITY_FEEDBACK]
    );
}

#[test]
fn test_strong_session_gets_single_positive_line() {
    let report = ReportSynthesizer::default().synthesize(&finalized(85.0, 0.8, Some(0.9)));

    assert_eq!(report.feedback, vec![POSITIVE_FEEDBACK]);
    assert_eq!(report.overall_score, 85.5);
}

#[test]
fn test_rules_are_additive_and_ordered() {
    let report = ReportSynthesizer::default().synthesize(&finalized(40.0, 0.9, Some(0.65)));
    assert_eq!(report.feedback, vec![EYE_CONTACT_FEEDBACK, CLARITY_FEEDBACK]);
}

#[test]
fn test_thresholds_are_strict() {
    let report = ReportSynthesizer::default().synthesize(&finalized(50.0, 0.6, Some(0.7)));
    assert_eq!(report.feedback, vec![POSITIVE_FEEDBACK]);
}

#[test]
fn test_no_audio_counts_as_zero_clarity() {
    let report = ReportSynthesizer::default().synthesize(&finalized(100.0, 1.0, None));

    assert_eq!(report.speech_clarity, 0.0);
    assert_eq!(report.overall_score, 60.0);
    assert_eq!(report.feedback, vec![CLARITY_FEEDBACK]);
    assert_eq!(report.filler_words_count, 0);
    assert_eq!(report.speaking_rate_wpm, 0.0);
}

#[test]
fn test_weights_are_configurable() {
    let synthesizer = ReportSynthesizer::new(ReportConfig {
        weights: ReportWeights {
            eye_contact: 1.0,
            confidence: 0.0,
            clarity: 0.0,
        },
        ..ReportConfig::default()
    });
    let report = synthesizer.synthesize(&finalized(20.0, 0.4, Some(0.5)));
    assert_eq!(report.overall_score, 20.0);
}

#[test]
fn test_report_serializes_camel_case() {
    let report = ReportSynthesizer::default().synthesize(&finalized(20.0, 0.4, Some(0.5)));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["overallScore"], 38.0);
    assert_eq!(json["eyeContactPercentage"], 20.0);
    assert_eq!(json["framesProcessed"], 30);
    assert!(json["speechFeedback"].is_array());
}
