//! Voice capture buffering and WAV encoding.
//!
//! Browsers deliver microphone audio as a sequence of PCM frames. [`AudioCapture`]
//! accumulates them and encodes one mono 16-bit WAV clip for transcription.

use std::{io::Cursor, time::Duration};

use hound::{SampleFormat, WavSpec, WavWriter};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transcription::{AudioClip, TranscriptionError};

/// Sample rate assumed when the client does not report one.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// PCM frames captured from one recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioCapture {
    pub sample_rate: u32,
    #[serde(default)]
    pub frames: Vec<Vec<f32>>,
}

impl Default for AudioCapture {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl AudioCapture {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            frames: Vec::new(),
        }
    }

    /// Appends one frame of samples in -1.0..=1.0.
    pub fn push_frame(&mut self, samples: &[f32]) {
        self.frames.push(samples.to_vec());
    }

    pub fn sample_count(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.sample_count() as f64 / self.sample_rate as f64)
    }

    /// Concatenates every frame into one WAV byte buffer.
    pub fn to_wav(&self) -> Result<Vec<u8>, TranscriptionError> {
        if self.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        if self.sample_rate == 0 {
            return Err(TranscriptionError::Audio("sample rate must be positive".into()));
        }

        let levels = self.levels();
        debug!(
            frames = self.frames.len(),
            samples = self.sample_count(),
            sample_rate = self.sample_rate,
            duration_ms = self.duration().as_millis() as u64,
            peak = levels.peak,
            rms = levels.rms,
            "Encoding captured audio"
        );

        let spec = WavSpec {
            channels: CHANNELS,
            sample_rate: self.sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec)?;
            for &sample in self.frames.iter().flatten() {
                writer.write_sample(to_pcm16(sample))?;
            }
            writer.finalize()?;
        }

        let bytes = cursor.into_inner();
        debug!("Encoded {} byte WAV clip", bytes.len());
        Ok(bytes)
    }

    pub fn into_clip(self) -> Result<AudioClip, TranscriptionError> {
        Ok(AudioClip::wav(self.to_wav()?))
    }

    /// Peak and RMS amplitude over the whole capture.
    pub fn levels(&self) -> AudioLevels {
        let count = self.sample_count();
        if count == 0 {
            return AudioLevels::default();
        }

        let mut peak = 0.0_f32;
        let mut sum_squares = 0.0_f64;
        for &sample in self.frames.iter().flatten() {
            peak = peak.max(sample.abs());
            sum_squares += f64::from(sample) * f64::from(sample);
        }

        AudioLevels {
            peak,
            rms: (sum_squares / count as f64).sqrt() as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioLevels {
    pub peak: f32,
    pub rms: f32,
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
