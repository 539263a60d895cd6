//! Geometric scoring of facial-landmark frames
//!
//! This module turns one frame of normalized landmarks, as produced by an
//! external face-mesh detector, into:
//! - An eye-contact percentage (eye openness blended with a gaze proxy)
//! - A confidence score (head pose, symmetry, eye openness, mouth position)
//!
//! Scoring is pure and total: missing or malformed landmarks degrade to
//! neutral defaults instead of failing.

mod config;
mod landmarks;
pub mod mesh;
mod scorer;

pub use config::{BlendWeights, FaceScoringConfig};
pub use landmarks::{LandmarkFrame, Point};
pub use scorer::{eye_aspect_ratio, ConfidenceFactors, FrameScore, GazeSource, GeometricScorer};
