use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClarityWeights {
    pub snr: f64,
    pub volume: f64,
    pub spectral: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluencyWeights {
    pub rate: f64,
    pub pause: f64,
    pub filler: f64,
}

/// Tunable constants for the audio scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechScoringConfig {
    /// Single lowercase tokens counted as fillers
    pub filler_words: Vec<String>,

    /// Tokens on each side of a filler kept as context
    pub filler_context_tokens: usize,

    /// Energy-envelope frame length for pause detection (seconds)
    pub pause_chunk_secs: f64,

    /// Frames below this energy percentile count as pauses
    pub pause_percentile: f64,

    /// Percentile of squared amplitude taken as the noise floor
    pub noise_floor_percentile: f64,

    /// SNR (dB) that maps to a full SNR score
    pub snr_range_db: f64,

    /// Amplitude standard deviation (i16 units) that zeroes volume consistency
    pub volume_std_normalizer: f64,

    /// Voiced-speech band for spectral concentration (Hz)
    pub speech_band_min_hz: f64,
    pub speech_band_max_hz: f64,

    pub clarity_weights: ClarityWeights,
    pub fluency_weights: FluencyWeights,

    /// Pitch search range (Hz)
    pub pitch_min_hz: f64,
    pub pitch_max_hz: f64,

    /// STFT frame and hop length for pitch tracking (samples)
    pub pitch_frame_len: usize,
    pub pitch_hop_len: usize,

    /// Peaks weaker than this fraction of the frame maximum are unvoiced
    pub pitch_magnitude_threshold: f64,

    /// Pitch standard deviation (Hz) that zeroes tone confidence
    pub pitch_variation_normalizer: f64,
}

impl Default for SpeechScoringConfig {
    fn default() -> Self {
        let filler_words = [
            "um", "uh", "ah", "er", "like", "basically", "actually", "literally", "right",
            "okay", "so", "well", "now", "then", "just", "really", "very", "quite",
        ];

        Self {
            filler_words: filler_words.iter().map(|w| w.to_string()).collect(),
            filler_context_tokens: 2,
            pause_chunk_secs: 0.5,
            pause_percentile: 30.0,
            noise_floor_percentile: 10.0,
            snr_range_db: 60.0,
            volume_std_normalizer: 10_000.0,
            speech_band_min_hz: 85.0,
            speech_band_max_hz: 255.0,
            clarity_weights: ClarityWeights {
                snr: 0.4,
                volume: 0.3,
                spectral: 0.3,
            },
            fluency_weights: FluencyWeights {
                rate: 0.4,
                pause: 0.3,
                filler: 0.3,
            },
            pitch_min_hz: 75.0,
            pitch_max_hz: 500.0,
            pitch_frame_len: 2048,
            pitch_hop_len: 512,
            pitch_magnitude_threshold: 0.1,
            pitch_variation_normalizer: 50.0,
        }
    }
}
