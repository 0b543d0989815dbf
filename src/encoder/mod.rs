//! Audio encoder implementations

/// WAV output via hound
pub mod wav;

pub use wav::{WavEncoder, WavSampleFormat};

use crate::core::AudioSegment;
use crate::error::{AudioError, AudioResult};
use log::debug;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Trait for audio encoders
pub trait Encoder {
    /// Encode an audio segment to output
    fn encode(&mut self, segment: &AudioSegment) -> AudioResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> AudioResult<()> {
        Ok(())
    }
}

/// Container and sample encoding of the exported file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// WAV, 32-bit float samples
    #[default]
    Wav,
    /// WAV, 16-bit integer PCM
    Wav16,
}

impl ExportFormat {
    /// Guess the format from a file extension; only `.wav` is recognized
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.eq_ignore_ascii_case("wav"))
            .map(|_| ExportFormat::Wav)
    }

    /// Open an encoder writing this format to `path`
    pub fn encoder<P: AsRef<Path>>(
        &self,
        path: P,
        segment: &AudioSegment,
    ) -> AudioResult<Box<dyn Encoder>> {
        let sample_format = match self {
            ExportFormat::Wav => WavSampleFormat::Float32,
            ExportFormat::Wav16 => WavSampleFormat::Int16,
        };
        let encoder = WavEncoder::new(
            path,
            segment.sample_rate(),
            segment.channels(),
            sample_format,
        )?;
        Ok(Box::new(encoder))
    }
}

impl FromStr for ExportFormat {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wav" | "f32" | "wav-f32" => Ok(ExportFormat::Wav),
            "wav16" | "pcm16" | "s16" | "wav-s16" => Ok(ExportFormat::Wav16),
            other => Err(AudioError::UnsupportedFormat(format!(
                "cannot export to '{other}' (supported: wav, wav16)"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Wav => f.write_str("wav"),
            ExportFormat::Wav16 => f.write_str("wav16"),
        }
    }
}

/// Write `segment` to `path` in `format`. Errors carry the path.
pub fn export<P: AsRef<Path>>(
    segment: &AudioSegment,
    path: P,
    format: ExportFormat,
) -> AudioResult<()> {
    let path = path.as_ref();
    debug!(
        "Exporting {} ms ({}) to {} as {}",
        segment.duration_ms(),
        segment.spec(),
        path.display(),
        format
    );

    let write = || -> AudioResult<()> {
        let mut encoder = format.encoder(path, segment)?;
        encoder.encode(segment)?;
        encoder.finalize()
    };
    write().map_err(|e| e.at_path(path))
}
