use serde::{Deserialize, Serialize};

use super::mesh;

/// A single landmark, normalized to the frame (x, y in [0, 1])
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One detector output: ordered landmarks plus the source frame size in pixels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkFrame {
    pub landmarks: Vec<Point>,
    pub width: u32,
    pub height: u32,
}

impl LandmarkFrame {
    pub fn new(landmarks: Vec<Point>, width: u32, height: u32) -> Self {
        Self {
            landmarks,
            width,
            height,
        }
    }

    /// Frame for an image in which the detector found no face
    pub fn empty(width: u32, height: u32) -> Self {
        Self::new(Vec::new(), width, height)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Whether the frame carries the refined iris rings
    pub fn has_iris(&self) -> bool {
        self.len() >= mesh::FACE_MESH_WITH_IRIS_POINTS
    }

    /// Normalized landmark, or `None` when absent or non-finite
    pub fn normalized(&self, index: usize) -> Option<Point> {
        self.landmarks.get(index).copied().filter(Point::is_finite)
    }

    /// Landmark in pixel space
    pub fn pixel(&self, index: usize) -> Option<Point> {
        self.normalized(index)
            .map(|p| Point::new(p.x * self.width as f64, p.y * self.height as f64))
    }

    /// All listed landmarks in pixel space; `None` if any one is missing
    pub fn pixels<const N: usize>(&self, indices: &[usize; N]) -> Option<[Point; N]> {
        let mut out = [Point::new(0.0, 0.0); N];
        for (slot, &index) in out.iter_mut().zip(indices.iter()) {
            *slot = self.pixel(index)?;
        }
        Some(out)
    }

    /// Pixel-space centroid of the listed landmarks
    pub fn centroid(&self, indices: &[usize]) -> Option<Point> {
        if indices.is_empty() {
            return None;
        }
        let mut sum = Point::new(0.0, 0.0);
        for &index in indices {
            let p = self.pixel(index)?;
            sum.x += p.x;
            sum.y += p.y;
        }
        let n = indices.len() as f64;
        Some(Point::new(sum.x / n, sum.y / n))
    }
}
