use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{BlendWeights, FaceScoringConfig};
use super::landmarks::{LandmarkFrame, Point};
use super::mesh;

/// Value substituted for a [0, 1] factor that cannot be computed
const NEUTRAL: f64 = 0.5;

const EPSILON: f64 = 1e-9;

/// Which gaze proxy fed the eye-contact blend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GazeSource {
    /// Iris centroids relative to the eye contours
    Iris,
    /// Eye midpoint relative to the frame center
    HeadCentering,
    /// Eye contact could not be scored for this frame
    Unavailable,
}

/// The four sub-scores averaged into the confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceFactors {
    pub head_pose: f64,
    pub symmetry: f64,
    pub eye_openness: f64,
    pub mouth: f64,
}

impl ConfidenceFactors {
    fn neutral() -> Self {
        Self {
            head_pose: NEUTRAL,
            symmetry: NEUTRAL,
            eye_openness: NEUTRAL,
            mouth: NEUTRAL,
        }
    }

    fn mean(&self) -> f64 {
        (self.head_pose + self.symmetry + self.eye_openness + self.mouth) / 4.0
    }
}

/// Scores derived from a single landmark frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameScore {
    /// Eye contact in [0, 100]
    pub eye_contact_percentage: f64,
    /// Confidence in [0, 1]
    pub confidence_score: f64,
    pub face_detected: bool,
    pub landmark_count: usize,
    pub gaze_source: GazeSource,
    pub factors: ConfidenceFactors,
}

impl FrameScore {
    /// Score for a frame without a detected face
    pub fn no_face() -> Self {
        Self {
            eye_contact_percentage: 0.0,
            confidence_score: 0.0,
            face_detected: false,
            landmark_count: 0,
            gaze_source: GazeSource::Unavailable,
            factors: ConfidenceFactors::neutral(),
        }
    }
}

/// Eye aspect ratio over a six-point subset (p1..p6):
/// `(|p2 - p6| + |p3 - p5|) / (2 * |p1 - p4|)`
pub fn eye_aspect_ratio(points: &[Point; 6]) -> Option<f64> {
    let vertical_a = points[1].distance(&points[5]);
    let vertical_b = points[2].distance(&points[4]);
    let horizontal = points[0].distance(&points[3]);
    ratio(vertical_a + vertical_b, 2.0 * horizontal)
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if !denominator.is_finite() || denominator.abs() < EPSILON {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Maps `value` from `[min, max]` onto `[0, 1]`
fn normalize(value: f64, min: f64, max: f64) -> Option<f64> {
    ratio(value - min, max - min).map(|v| v.clamp(0.0, 1.0))
}

fn mean_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Stateless scorer for landmark frames; safe to share across threads
#[derive(Debug, Clone, Default)]
pub struct GeometricScorer {
    config: FaceScoringConfig,
}

impl GeometricScorer {
    pub fn new(config: FaceScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FaceScoringConfig {
        &self.config
    }

    /// Score a frame. Never fails: an empty frame yields [`FrameScore::no_face`],
    /// and any factor that cannot be computed falls back to a neutral value.
    pub fn score(&self, frame: &LandmarkFrame) -> FrameScore {
        if frame.is_empty() {
            return FrameScore::no_face();
        }

        let (eye_contact, gaze_source) = self.eye_contact(frame);
        let factors = self.confidence_factors(frame);

        FrameScore {
            eye_contact_percentage: eye_contact.clamp(0.0, 100.0),
            confidence_score: factors.mean().clamp(0.0, 1.0),
            face_detected: true,
            landmark_count: frame.len(),
            gaze_source,
            factors,
        }
    }

    fn eye_contact(&self, frame: &LandmarkFrame) -> (f64, GazeSource) {
        if frame.len() < mesh::FACE_MESH_POINTS {
            debug!(
                "Insufficient landmarks for eye contact: {} < {}",
                frame.len(),
                mesh::FACE_MESH_POINTS
            );
            return (0.0, GazeSource::Unavailable);
        }

        let Some(ear) = self.mean_ear(frame) else {
            debug!("Eye aspect ratio unavailable; eye contact defaulted to 0");
            return (0.0, GazeSource::Unavailable);
        };

        let cfg = &self.config;
        let ear_score =
            normalize(ear, cfg.ear_contact_min, cfg.ear_contact_max).unwrap_or(NEUTRAL);

        let (gaze, source, blend) = match self.iris_score(frame) {
            Some(score) => (score, GazeSource::Iris, cfg.iris_blend),
            None => match self.head_centering_score(frame) {
                Some(score) => (score, GazeSource::HeadCentering, cfg.fallback_blend),
                None => return (0.0, GazeSource::Unavailable),
            },
        };

        if ear < cfg.ear_closed_floor {
            return (0.0, source);
        }

        (Self::blend(ear_score, gaze, blend) * 100.0, source)
    }

    fn blend(ear_score: f64, gaze: f64, weights: BlendWeights) -> f64 {
        ear_score * weights.ear + gaze * weights.gaze
    }

    /// Average EAR across both eyes, in pixel space
    fn mean_ear(&self, frame: &LandmarkFrame) -> Option<f64> {
        let right = frame
            .pixels(&mesh::RIGHT_EYE_EAR)
            .and_then(|p| eye_aspect_ratio(&p))?;
        let left = frame
            .pixels(&mesh::LEFT_EYE_EAR)
            .and_then(|p| eye_aspect_ratio(&p))?;
        Some((right + left) / 2.0)
    }

    /// How centered each iris sits inside its eye contour, averaged over the
    /// eyes that can be measured
    fn iris_score(&self, frame: &LandmarkFrame) -> Option<f64> {
        if !frame.has_iris() {
            return None;
        }

        let max_distance = frame.width as f64 * self.config.iris_max_distance_fraction;
        let eyes = [
            (&mesh::RIGHT_IRIS[..], &mesh::RIGHT_EYE_CONTOUR[..]),
            (&mesh::LEFT_IRIS[..], &mesh::LEFT_EYE_CONTOUR[..]),
        ];

        mean_of(eyes.iter().filter_map(|(iris, contour)| {
            let iris_center = frame.centroid(iris)?;
            let eye_center = frame.centroid(contour)?;
            let distance = iris_center.distance(&eye_center);
            ratio(distance, max_distance).map(|r| 1.0 - r.min(1.0))
        }))
    }

    /// Penalized distance of the eye midpoint from the frame center
    fn head_centering_score(&self, frame: &LandmarkFrame) -> Option<f64> {
        let right = frame.pixel(mesh::RIGHT_EYE_OUTER)?;
        let left = frame.pixel(mesh::LEFT_EYE_OUTER)?;
        let eyes = right.midpoint(&left);

        let half_width = frame.width as f64 / 2.0;
        let half_height = frame.height as f64 / 2.0;
        let dx = ratio((eyes.x - half_width).abs(), half_width)?;
        let dy = ratio((eyes.y - half_height).abs(), half_height)?;
        let distance = (dx * dx + dy * dy).sqrt();

        Some((1.0 - distance * self.config.head_centering_penalty).max(0.0))
    }

    fn confidence_factors(&self, frame: &LandmarkFrame) -> ConfidenceFactors {
        ConfidenceFactors {
            head_pose: self.head_pose_score(frame).unwrap_or(NEUTRAL).clamp(0.0, 1.0),
            symmetry: self.symmetry_score(frame).unwrap_or(NEUTRAL).clamp(0.0, 1.0),
            eye_openness: self.eye_openness_score(frame).unwrap_or(NEUTRAL),
            mouth: self.mouth_score(frame).unwrap_or(NEUTRAL).clamp(0.0, 1.0),
        }
    }

    /// Apparent face width against the width expected when facing forward;
    /// narrower (turned) or wider (leaning in) both lose score
    fn head_pose_score(&self, frame: &LandmarkFrame) -> Option<f64> {
        let right = frame.pixel(mesh::RIGHT_FACE_EDGE)?;
        let left = frame.pixel(mesh::LEFT_FACE_EDGE)?;
        let head_width = (right.x - left.x).abs();
        let expected = self.config.expected_head_width_ratio * frame.width as f64;
        let width_ratio = ratio(head_width, expected)?;
        Some(1.0 - (1.0 - width_ratio).abs())
    }

    /// Vertical alignment of paired left/right landmarks (normalized space)
    fn symmetry_score(&self, frame: &LandmarkFrame) -> Option<f64> {
        let pairs = [
            (mesh::RIGHT_EYE_OUTER, mesh::LEFT_EYE_OUTER),
            (mesh::RIGHT_MOUTH_CORNER, mesh::LEFT_MOUTH_CORNER),
        ];
        mean_of(pairs.iter().filter_map(|&(r, l)| {
            let right = frame.normalized(r)?;
            let left = frame.normalized(l)?;
            Some(1.0 - (right.y - left.y).abs())
        }))
    }

    fn eye_openness_score(&self, frame: &LandmarkFrame) -> Option<f64> {
        let ear = self.mean_ear(frame)?;
        normalize(ear, self.config.openness_ear_min, self.config.openness_ear_max)
    }

    /// Mouth aspect ratio: mean inner-lip opening over inner mouth width
    fn mouth_score(&self, frame: &LandmarkFrame) -> Option<f64> {
        let right = frame.pixel(mesh::RIGHT_INNER_LIP_CORNER)?;
        let left = frame.pixel(mesh::LEFT_INNER_LIP_CORNER)?;
        let opening = mean_of(mesh::INNER_LIP_PAIRS.iter().filter_map(|&(upper, lower)| {
            Some(frame.pixel(upper)?.distance(&frame.pixel(lower)?))
        }))?;
        let mar = ratio(opening, right.distance(&left))?;

        let cfg = &self.config;
        if mar > cfg.mouth_band_min && mar < cfg.mouth_band_max {
            Some(1.0)
        } else {
            Some(cfg.mouth_out_of_band_score)
        }
    }
}
