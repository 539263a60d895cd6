mod common;

use anyhow::Result;
use common::{speech_with_pauses, wav_bytes, SAMPLE_RATE};
use interview_engine::speech::{
    detect_filler_words, fluency_score, AudioScore, AudioScorer, AudioUtterance,
    SpeechScoringConfig,
};

// 28 words, none of them fillers
const ANSWER: &str = "I led a team of five engineers building a payments platform and we \
    shipped the first release in six months while keeping our error budget healthy across regions";

#[test]
fn test_all_optimal_bands_give_perfect_fluency() {
    let weights = SpeechScoringConfig::default().fluency_weights;
    let score = fluency_score(Some(140.0), Some(0.15), 0.0, &weights);
    assert!((score - 1.0).abs() < 1e-12);
}

#[test]
fn test_fluent_answer_end_to_end() -> Result<()> {
    // 12 s with 4 of 24 frames silent: 140 wpm, pause ratio 1/6
    let samples = speech_with_pauses(24, &[3, 9, 15, 21]);
    let utterance = AudioUtterance::from_wav_bytes(&wav_bytes(&samples, 1)?, Some(ANSWER.to_string()))?;
    assert!((utterance.duration_secs() - 12.0).abs() < 1e-9);

    let score = AudioScorer::default().score(&utterance);

    assert_eq!(score.word_count, 28);
    assert!(score.filler_words.is_empty());
    assert!((score.speaking_rate_wpm - 140.0).abs() < 1e-6);
    assert!((score.pause_ratio.unwrap() - 4.0 / 24.0).abs() < 1e-9);
    assert!((score.fluency_score - 1.0).abs() < 1e-9);

    // Band energy is counted on the non-negative half of the spectrum only,
    // so a pure in-band tone approaches 0.5
    assert!(score.clarity_breakdown.spectral_score > 0.4);
    assert!((0.0..=1.0).contains(&score.clarity_score));
    assert!((score.tone_stats.average_pitch_hz - 200.0).abs() < 5.0);
    Ok(())
}

#[test]
fn test_missing_transcript_defaults_transcript_metrics() -> Result<()> {
    let samples = speech_with_pauses(8, &[2]);
    let utterance = AudioUtterance::from_wav_bytes(&wav_bytes(&samples, 1)?, None)?;

    let score = AudioScorer::default().score(&utterance);

    assert_eq!(score.fluency_score, 0.0);
    assert_eq!(score.speaking_rate_wpm, 0.0);
    assert_eq!(score.word_count, 0);
    assert!(score.filler_words.is_empty());
    assert!(score.clarity_score > 0.0);
    Ok(())
}

#[test]
fn test_blank_transcript_counts_as_missing() -> Result<()> {
    let samples = speech_with_pauses(4, &[]);
    let utterance =
        AudioUtterance::from_wav_bytes(&wav_bytes(&samples, 1)?, Some("   ".to_string()))?;

    let score = AudioScorer::default().score(&utterance);
    assert_eq!(score.fluency_score, 0.0);
    assert_eq!(score.word_count, 0);
    Ok(())
}

#[test]
fn test_stereo_is_downmixed() -> Result<()> {
    let mono = speech_with_pauses(4, &[]);
    let stereo: Vec<i16> = mono.iter().flat_map(|&s| [s, s]).collect();
    let utterance = AudioUtterance::from_wav_bytes(&wav_bytes(&stereo, 2)?, None)?;

    assert_eq!(utterance.channels, 2);
    assert!((utterance.duration_secs() - 2.0).abs() < 1e-9);

    let from_stereo = AudioScorer::default().score(&utterance);
    let from_mono = AudioScorer::default().score(&AudioUtterance::new(mono, SAMPLE_RATE, 1));
    assert!((from_stereo.clarity_score - from_mono.clarity_score).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_filler_heavy_answer() -> Result<()> {
    let transcript = "Um, so I uh think um it was like fine";
    let config = SpeechScoringConfig::default();
    let fillers = detect_filler_words(transcript, &config.filler_words, config.filler_context_tokens);

    let words: Vec<&str> = fillers.iter().map(|f| f.word.as_str()).collect();
    assert_eq!(words, vec!["um", "so", "uh", "um", "like"]);
    assert_eq!(fillers[2].position, 3);
    assert_eq!(fillers[2].context, "so i uh think um");

    let samples = speech_with_pauses(8, &[1]);
    let utterance = AudioUtterance::new(samples, SAMPLE_RATE, 1).with_transcript(transcript);
    let score = AudioScorer::default().score(&utterance);

    assert_eq!(score.filler_count(), 5);
    // 150 wpm and 1/8 pauses are optimal, but half the words are fillers:
    // 0.4 + 0.3 + 0.2 * 0.3
    assert!((score.fluency_score - 0.76).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_unanalyzable_audio_scores_zero() {
    let scorer = AudioScorer::default();
    assert_eq!(scorer.score(&AudioUtterance::empty()), AudioScore::default());
    assert_eq!(
        scorer.score(&AudioUtterance::new(vec![100; 10], 0, 1).with_transcript("hello")),
        AudioScore::default()
    );
}

#[test]
fn test_corrupt_wav_is_invalid_input() {
    let result = AudioUtterance::from_wav_bytes(b"RIFF-not-really", None);
    assert!(matches!(
        result,
        Err(interview_engine::EngineError::InvalidInput(_))
    ));
}
