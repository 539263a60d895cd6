//! Fixtures shared by the integration tests
#![allow(dead_code)]

use anyhow::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use interview_engine::face::{mesh, LandmarkFrame, Point};
use std::f64::consts::PI;
use std::io::Cursor;

const EYE_Y: f64 = 0.5;
const RIGHT_EYE_X: f64 = 0.45;
const LEFT_EYE_X: f64 = 0.65;
const EYE_HALF_WIDTH: f64 = 0.04;
const LID_OFFSET: f64 = 0.02;

/// A forward-facing synthetic face on a square frame.
///
/// Both eyes are centered on their contour with EAR = `lid_height / 0.04`,
/// face edges are 30% of the frame apart, features are level, and the inner
/// lips give a mouth aspect ratio of 0.2. The eye midpoint sits 0.05 right of
/// the frame center.
pub fn synthetic_face(lid_height: f64, with_iris: bool, size: u32) -> LandmarkFrame {
    let count = if with_iris {
        mesh::FACE_MESH_WITH_IRIS_POINTS
    } else {
        mesh::FACE_MESH_POINTS
    };
    let mut points = vec![Point::new(0.5, 0.5); count];

    // Corners and lids are symmetric about the eye center, so the contour
    // centroid stays on it
    let mut eye = |contour: &[usize], ear: &[usize; 6], cx: f64| {
        for &i in contour {
            points[i] = Point::new(cx, EYE_Y);
        }
        points[ear[0]] = Point::new(cx - EYE_HALF_WIDTH, EYE_Y);
        points[ear[3]] = Point::new(cx + EYE_HALF_WIDTH, EYE_Y);
        points[ear[1]] = Point::new(cx - LID_OFFSET, EYE_Y - lid_height);
        points[ear[2]] = Point::new(cx + LID_OFFSET, EYE_Y - lid_height);
        points[ear[4]] = Point::new(cx + LID_OFFSET, EYE_Y + lid_height);
        points[ear[5]] = Point::new(cx - LID_OFFSET, EYE_Y + lid_height);
    };
    eye(&mesh::RIGHT_EYE_CONTOUR, &mesh::RIGHT_EYE_EAR, RIGHT_EYE_X);
    eye(&mesh::LEFT_EYE_CONTOUR, &mesh::LEFT_EYE_EAR, LEFT_EYE_X);

    if with_iris {
        for &i in &mesh::RIGHT_IRIS {
            points[i] = Point::new(RIGHT_EYE_X, EYE_Y);
        }
        for &i in &mesh::LEFT_IRIS {
            points[i] = Point::new(LEFT_EYE_X, EYE_Y);
        }
    }

    points[mesh::RIGHT_FACE_EDGE] = Point::new(0.40, 0.5);
    points[mesh::LEFT_FACE_EDGE] = Point::new(0.70, 0.5);

    points[mesh::RIGHT_MOUTH_CORNER] = Point::new(0.50, 0.7);
    points[mesh::LEFT_MOUTH_CORNER] = Point::new(0.60, 0.7);
    points[mesh::RIGHT_INNER_LIP_CORNER] = Point::new(0.50, 0.7);
    points[mesh::LEFT_INNER_LIP_CORNER] = Point::new(0.60, 0.7);
    for &(upper, lower) in &mesh::INNER_LIP_PAIRS {
        points[upper] = Point::new(0.55, 0.69);
        points[lower] = Point::new(0.55, 0.71);
    }

    LandmarkFrame::new(points, size, size)
}

pub const SAMPLE_RATE: u32 = 16000;
pub const FRAME_SAMPLES: usize = 8000; // 0.5 s pause frame

/// 200 Hz tone in 0.5 s frames, with the listed frames silent
pub fn speech_with_pauses(frames: usize, silent: &[usize]) -> Vec<i16> {
    let mut samples = Vec::with_capacity(frames * FRAME_SAMPLES);
    for frame in 0..frames {
        for n in 0..FRAME_SAMPLES {
            let value = if silent.contains(&frame) {
                0.0
            } else {
                8000.0 * (2.0 * PI * 200.0 * n as f64 / SAMPLE_RATE as f64).sin()
            };
            samples.push(value.round() as i16);
        }
    }
    samples
}

pub fn wav_bytes(samples: &[i16], channels: u16) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for &s in samples {
            writer.write_sample(s)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}
