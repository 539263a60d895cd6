use hound::{SampleFormat, WavReader};
use std::io::Cursor;

use crate::error::{EngineError, Result};

/// A decoded audio utterance (16-bit PCM, interleaved) with an optional
/// transcript from the external speech-to-text service
#[derive(Debug, Clone)]
pub struct AudioUtterance {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bytes per sample in the source container
    pub sample_width: u16,
    /// Number of channels
    pub channels: u16,
    /// Transcript, when the speech-to-text service was confident
    pub transcript: Option<String>,
}

impl AudioUtterance {
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            sample_width: 2,
            channels,
            transcript: None,
        }
    }

    /// Utterance that carries nothing to analyze; scores as all-zero
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0)
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    /// Decode a WAV container into 16-bit interleaved samples
    pub fn from_wav_bytes(bytes: &[u8], transcript: Option<String>) -> Result<Self> {
        let reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| EngineError::InvalidInput(format!("Failed to read WAV header: {}", e)))?;

        let spec = reader.spec();
        let samples: Vec<i16> = match spec.sample_format {
            SampleFormat::Int => {
                let bits = spec.bits_per_sample;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| rescale_int(v, bits)))
                    .collect::<std::result::Result<Vec<_>, _>>()
            }
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
                .collect::<std::result::Result<Vec<_>, _>>(),
        }
        .map_err(|e| EngineError::InvalidInput(format!("Failed to read audio samples: {}", e)))?;

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
            sample_width: spec.bits_per_sample.div_ceil(8),
            channels: spec.channels,
            transcript,
        })
    }

    /// Whether there is anything to analyze
    pub fn is_analyzable(&self) -> bool {
        !self.samples.is_empty() && self.sample_rate > 0 && self.channels > 0
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Transcript with surrounding whitespace removed, if non-empty
    pub fn transcript(&self) -> Option<&str> {
        self.transcript
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Mono signal in i16 units, averaging interleaved channels
    pub fn mono_samples(&self) -> Vec<f64> {
        let channels = self.channels.max(1) as usize;
        if channels == 1 {
            return self.samples.iter().map(|&s| s as f64).collect();
        }

        self.samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().map(|&s| s as f64).sum::<f64>() / channels as f64)
            .collect()
    }
}

fn rescale_int(value: i32, bits: u16) -> i16 {
    if bits > 16 {
        (value >> (bits - 16)) as i16
    } else {
        (value << (16 - bits)).clamp(i16::MIN as i32, i16::MAX as i32) as i16
    }
}
