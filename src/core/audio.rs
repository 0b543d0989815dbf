use crate::error::{AudioError, AudioResult};
use std::fmt;

/// Channel configuration for audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Mono (1 channel)
    Mono = 1,
    /// Stereo (2 channels)
    Stereo = 2,
    /// Quad (4 channels)
    Quad = 4,
    /// 5.1 surround sound
    SurroundFivePointOne = 6,
    /// 7.1 surround sound
    SurroundSevenPointOne = 8,
}

impl Channels {
    /// Create Channels from channel count
    pub fn from_count(count: u32) -> AudioResult<Self> {
        match count {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            4 => Ok(Channels::Quad),
            6 => Ok(Channels::SurroundFivePointOne),
            8 => Ok(Channels::SurroundSevenPointOne),
            n => Err(AudioError::InvalidMetadata(format!(
                "unsupported channel count {n}"
            ))),
        }
    }

    /// Parse a channel layout name ("mono", "stereo") or a plain count ("6")
    pub fn parse(value: &str) -> AudioResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mono" => Ok(Channels::Mono),
            "stereo" => Ok(Channels::Stereo),
            "quad" => Ok(Channels::Quad),
            "5.1" => Ok(Channels::SurroundFivePointOne),
            "7.1" => Ok(Channels::SurroundSevenPointOne),
            other => other
                .parse::<u32>()
                .map_err(|_| AudioError::ConfigError(format!("Unknown channel layout: {value}")))
                .and_then(Channels::from_count),
        }
    }

    /// Get the number of channels
    pub fn count(&self) -> u32 {
        *self as u32
    }

    /// Get channel layout name
    pub fn name(&self) -> &'static str {
        match self {
            Channels::Mono => "Mono",
            Channels::Stereo => "Stereo",
            Channels::Quad => "Quad",
            Channels::SurroundFivePointOne => "5.1 Surround",
            Channels::SurroundSevenPointOne => "7.1 Surround",
        }
    }
}

/// Sample rate and channel layout shared by every segment in one buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSpec {
    /// Sample rate in Hz (e.g., 44100, 48000, 16000)
    pub sample_rate: u32,
    /// Channel layout
    pub channels: Channels,
}

impl SampleSpec {
    /// Create a spec, rejecting a zero sample rate
    pub fn new(sample_rate: u32, channels: Channels) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(SampleSpec {
            sample_rate,
            channels,
        })
    }

    /// Frames needed to cover `duration_ms`, rounded up
    pub fn frames_for_ms(&self, duration_ms: u64) -> usize {
        let frames = (duration_ms as u128 * self.sample_rate as u128).div_ceil(1000);
        frames as usize
    }

    /// Whole milliseconds covered by `frames`, rounded down
    pub fn ms_for_frames(&self, frames: usize) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (frames as u128 * 1000 / self.sample_rate as u128) as u64
    }
}

impl Default for SampleSpec {
    /// 44.1 kHz stereo, used when no input decodes
    fn default() -> Self {
        SampleSpec {
            sample_rate: 44100,
            channels: Channels::Stereo,
        }
    }
}

impl fmt::Display for SampleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz {}", self.sample_rate, self.channels.name())
    }
}

/// Decoded audio held in memory: interleaved f32 samples plus their spec.
///
/// Segments grow by appending other segments of the same spec; every
/// accumulated clip, including padding, is one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    /// Audio samples (interleaved for multiple channels, f32 from -1.0 to 1.0)
    samples: Vec<f32>,
    /// Sample rate and channel layout
    spec: SampleSpec,
}

impl AudioSegment {
    /// Create a new audio segment
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: Channels) -> AudioResult<Self> {
        let spec = SampleSpec::new(sample_rate, channels)?;

        if samples.len() % channels.count() as usize != 0 {
            return Err(AudioError::BufferError(
                "Sample count not divisible by channel count".to_string(),
            ));
        }

        Ok(AudioSegment { samples, spec })
    }

    /// Segment with no samples
    pub fn empty(spec: SampleSpec) -> Self {
        AudioSegment {
            samples: Vec::new(),
            spec,
        }
    }

    /// Digital silence lasting at least `duration_ms`
    pub fn silent(duration_ms: u64, spec: SampleSpec) -> AudioResult<Self> {
        Self::silent_frames(spec.frames_for_ms(duration_ms), spec)
    }

    /// Digital silence of exactly `frames` frames
    pub fn silent_frames(frames: usize, spec: SampleSpec) -> AudioResult<Self> {
        if spec.sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: 0 });
        }

        let len = frames
            .checked_mul(spec.channels.count() as usize)
            .ok_or_else(|| {
                AudioError::BufferError(format!("{frames} frames of silence is too long"))
            })?;

        Ok(AudioSegment {
            samples: vec![0.0; len],
            spec,
        })
    }

    /// Append another segment's samples after this one's
    pub fn append(&mut self, other: AudioSegment) -> AudioResult<()> {
        if other.spec.sample_rate != self.spec.sample_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: other.spec.sample_rate,
            });
        }

        if other.spec.channels != self.spec.channels {
            return Err(AudioError::InvalidChannels {
                expected: self.spec.channels.count(),
                got: other.spec.channels.count(),
            });
        }

        if self.samples.is_empty() {
            self.samples = other.samples;
        } else {
            self.samples.extend_from_slice(&other.samples);
        }
        Ok(())
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get the sample spec
    pub fn spec(&self) -> SampleSpec {
        self.spec
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    /// Get channel configuration
    pub fn channels(&self) -> Channels {
        self.spec.channels
    }

    /// Get number of samples per channel
    pub fn samples_per_channel(&self) -> usize {
        self.samples.len() / self.spec.channels.count() as usize
    }

    /// Length in whole milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.spec.ms_for_frames(self.samples_per_channel())
    }

    /// Check if segment is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::Mono);
        assert_eq!(Channels::from_count(2).unwrap(), Channels::Stereo);
        assert!(Channels::from_count(0).is_err());
        assert!(Channels::from_count(3).is_err());
    }

    #[test]
    fn test_unsupported_channel_count_names_count() {
        let err = Channels::from_count(3).unwrap_err();
        assert!(matches!(err, AudioError::InvalidMetadata(_)));
        assert!(err.to_string().contains("unsupported channel count 3"));
    }

    #[test]
    fn test_channels_parse() {
        assert_eq!(Channels::parse("Mono").unwrap(), Channels::Mono);
        assert_eq!(Channels::parse("stereo").unwrap(), Channels::Stereo);
        assert_eq!(Channels::parse("6").unwrap(), Channels::SurroundFivePointOne);
        assert!(Channels::parse("surround-ish").is_err());
        assert!(Channels::parse("3").is_err());
    }

    #[test]
    fn test_segment_creation() {
        let samples = vec![0.1, 0.2, 0.3, 0.4];
        let segment = AudioSegment::new(samples, 44100, Channels::Stereo).unwrap();

        assert_eq!(segment.sample_rate(), 44100);
        assert_eq!(segment.channels(), Channels::Stereo);
        assert_eq!(segment.samples_per_channel(), 2);
    }

    #[test]
    fn test_segment_invalid_samples() {
        // Odd number of samples for stereo should fail
        let samples = vec![0.1, 0.2, 0.3];
        let result = AudioSegment::new(samples, 44100, Channels::Stereo);
        assert!(result.is_err());
    }

    #[test]
    fn test_segment_zero_rate() {
        assert!(AudioSegment::new(vec![0.0], 0, Channels::Mono).is_err());
    }

    #[test]
    fn test_duration_ms_rounds_down() {
        // 44 frames at 44.1 kHz is 0.997 ms
        let segment = AudioSegment::new(vec![0.0; 44], 44100, Channels::Mono).unwrap();
        assert_eq!(segment.duration_ms(), 0);

        let segment = AudioSegment::new(vec![0.0; 16000], 8000, Channels::Stereo).unwrap();
        assert_eq!(segment.duration_ms(), 1000);
    }

    #[test]
    fn test_silent_covers_duration() {
        let spec = SampleSpec::new(48000, Channels::Stereo).unwrap();
        let silence = AudioSegment::silent(250, spec).unwrap();
        assert_eq!(silence.samples_per_channel(), 12000);
        assert_eq!(silence.duration_ms(), 250);
        assert!(silence.samples().iter().all(|&s| s == 0.0));

        // 1 ms at 44.1 kHz needs 44.1 frames; round up so nothing is short
        let spec = SampleSpec::new(44100, Channels::Mono).unwrap();
        let silence = AudioSegment::silent(1, spec).unwrap();
        assert_eq!(silence.samples_per_channel(), 45);
        assert_eq!(silence.duration_ms(), 1);
    }

    #[test]
    fn test_silent_frames_is_exact() {
        let spec = SampleSpec::new(44100, Channels::Stereo).unwrap();
        let silence = AudioSegment::silent_frames(22051, spec).unwrap();
        assert_eq!(silence.samples_per_channel(), 22051);
        assert_eq!(silence.samples().len(), 44102);
        assert!(AudioSegment::silent_frames(0, spec).unwrap().is_empty());
        assert!(AudioSegment::silent_frames(usize::MAX, spec).is_err());
    }

    #[test]
    fn test_silent_zero_is_empty() {
        let silence = AudioSegment::silent(0, SampleSpec::default()).unwrap();
        assert!(silence.is_empty());
        assert_eq!(silence.duration_ms(), 0);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut first = AudioSegment::new(vec![0.1, 0.2], 8000, Channels::Mono).unwrap();
        let second = AudioSegment::new(vec![0.3, 0.4], 8000, Channels::Mono).unwrap();
        first.append(second).unwrap();
        assert_eq!(first.samples(), &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_append_rejects_mismatched_spec() {
        let mut mono = AudioSegment::new(vec![0.1, 0.2], 8000, Channels::Mono).unwrap();

        let other_rate = AudioSegment::new(vec![0.3], 16000, Channels::Mono).unwrap();
        assert!(matches!(
            mono.append(other_rate),
            Err(AudioError::InvalidSampleRate { rate: 16000 })
        ));

        let stereo = AudioSegment::new(vec![0.3, 0.3], 8000, Channels::Stereo).unwrap();
        assert!(matches!(
            mono.append(stereo),
            Err(AudioError::InvalidChannels { expected: 1, got: 2 })
        ));
        assert_eq!(mono.samples(), &[0.1, 0.2]);
    }

    #[test]
    fn test_spec_display() {
        let spec = SampleSpec::new(48000, Channels::Stereo).unwrap();
        assert_eq!(spec.to_string(), "48000 Hz Stereo");
    }
}
