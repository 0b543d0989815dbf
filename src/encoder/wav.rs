use crate::core::{AudioSegment, Channels};
use crate::error::{AudioError, AudioResult};
use hound::{WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Sample encoding used inside the WAV container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavSampleFormat {
    /// 32-bit IEEE float
    Float32,
    /// 16-bit signed integer PCM
    Int16,
}

/// WAV audio encoder
pub struct WavEncoder {
    writer: Option<WavWriter<BufWriter<File>>>,
    sample_rate: u32,
    channels: Channels,
    sample_format: WavSampleFormat,
}

impl WavEncoder {
    /// Create a new WAV encoder to file
    pub fn new<P: AsRef<Path>>(
        path: P,
        sample_rate: u32,
        channels: Channels,
        sample_format: WavSampleFormat,
    ) -> AudioResult<Self> {
        let spec = match sample_format {
            WavSampleFormat::Float32 => WavSpec {
                channels: channels.count() as u16,
                sample_rate,
                bits_per_sample: 32,
                sample_format: hound::SampleFormat::Float,
            },
            WavSampleFormat::Int16 => WavSpec {
                channels: channels.count() as u16,
                sample_rate,
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            },
        };

        let writer = WavWriter::create(path, spec)?;

        Ok(WavEncoder {
            writer: Some(writer),
            sample_rate,
            channels,
            sample_format,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get the number of samples written
    pub fn samples_written(&self) -> u32 {
        self.writer.as_ref().map(|w| w.len()).unwrap_or(0)
    }

    fn to_i16(sample: f32) -> i16 {
        (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
    }
}

impl super::Encoder for WavEncoder {
    fn encode(&mut self, segment: &AudioSegment) -> AudioResult<()> {
        if segment.sample_rate() != self.sample_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: segment.sample_rate(),
            });
        }

        if segment.channels() != self.channels {
            return Err(AudioError::InvalidChannels {
                expected: self.channels.count(),
                got: segment.channels().count(),
            });
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AudioError::ProcessingError("Encoder already finalized".to_string()))?;

        match self.sample_format {
            WavSampleFormat::Float32 => {
                for &sample in segment.samples() {
                    writer.write_sample(sample)?;
                }
            }
            WavSampleFormat::Int16 => {
                let mut writer = writer.get_i16_writer(segment.samples().len() as u32);
                for &sample in segment.samples() {
                    writer.write_sample(Self::to_i16(sample));
                }
                writer.flush()?;
            }
        }

        Ok(())
    }

    fn finalize(&mut self) -> AudioResult<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
        }
        Ok(())
    }
}
