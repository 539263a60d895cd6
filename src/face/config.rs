use serde::{Deserialize, Serialize};

/// Relative weight of eye openness versus gaze in the eye-contact blend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub ear: f64,
    pub gaze: f64,
}

/// Tunable constants for the geometric scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceScoringConfig {
    /// EAR below which the eyes count as closed (eye contact forced to 0)
    pub ear_closed_floor: f64,

    /// EAR range mapped onto [0, 1] for the eye-contact blend
    pub ear_contact_min: f64,
    pub ear_contact_max: f64,

    /// Blend used when iris landmarks are available
    pub iris_blend: BlendWeights,

    /// Blend used with the head-centering proxy
    pub fallback_blend: BlendWeights,

    /// Iris-to-eye-center distance, as a fraction of frame width, that scores 0
    pub iris_max_distance_fraction: f64,

    /// Multiplier on the normalized off-center distance of the eyes
    pub head_centering_penalty: f64,

    /// Expected face width as a fraction of frame width when facing the camera
    pub expected_head_width_ratio: f64,

    /// EAR range mapped onto [0, 1] for the eye-openness confidence factor
    pub openness_ear_min: f64,
    pub openness_ear_max: f64,

    /// Mouth-aspect-ratio band considered a relaxed, slightly open mouth
    pub mouth_band_min: f64,
    pub mouth_band_max: f64,

    /// Mouth factor assigned outside the band (closed or wide open)
    pub mouth_out_of_band_score: f64,
}

impl Default for FaceScoringConfig {
    fn default() -> Self {
        Self {
            ear_closed_floor: 0.15,
            ear_contact_min: 0.15,
            ear_contact_max: 0.30,
            iris_blend: BlendWeights { ear: 0.4, gaze: 0.6 },
            fallback_blend: BlendWeights { ear: 0.6, gaze: 0.4 },
            iris_max_distance_fraction: 0.03,
            head_centering_penalty: 1.5,
            expected_head_width_ratio: 0.3,
            openness_ear_min: 0.2,
            openness_ear_max: 0.3,
            mouth_band_min: 0.03,
            mouth_band_max: 0.25,
            mouth_out_of_band_score: 0.5,
        }
    }
}
