use serde::{Deserialize, Serialize};

/// Configuration for a session's rolling aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Number of most recent frames averaged into the smoothed metrics
    /// Default: 30
    pub history_capacity: usize,

    /// Smoothed eye contact (percent) below which `low_eye_contact` is raised
    pub low_eye_contact_threshold: f64,

    /// Smoothed confidence (0-1) below which `low_confidence` is raised
    pub low_confidence_threshold: f64,

    /// Whether frames without a detected face enter the history (as zeros)
    pub count_faceless_frames: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 30,
            low_eye_contact_threshold: 30.0,
            low_confidence_threshold: 0.5,
            count_faceless_frames: false,
        }
    }
}

/// Configuration for the live session registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Buffered metric updates per observer before old ones are dropped
    pub observer_capacity: usize,

    /// Number of recently closed session ids remembered to tell a repeated
    /// finalize apart from an unknown id
    pub tombstone_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            observer_capacity: 256,
            tombstone_capacity: 1024,
        }
    }
}
