use crate::core::{AudioSegment, Channels};
use crate::error::{AudioError, AudioResult};

/// Audio channel remixer - converts between channel layouts
pub struct Remix {
    input_channels: Channels,
    output_channels: Channels,
}

impl Remix {
    /// Create a new channel remixer
    pub fn new(input_channels: Channels, output_channels: Channels) -> AudioResult<Self> {
        let remix = Remix {
            input_channels,
            output_channels,
        };
        if !remix.is_supported() {
            return Err(AudioError::ProcessingError(format!(
                "Remix from {} to {} not supported",
                input_channels.name(),
                output_channels.name()
            )));
        }
        Ok(remix)
    }

    fn is_supported(&self) -> bool {
        match (self.input_channels, self.output_channels) {
            (src, dst) if src == dst => true,
            (_, Channels::Mono) | (Channels::Mono, _) => true,
            (_, Channels::Stereo) => true,
            _ => false,
        }
    }

    /// Average every frame down to one channel
    fn downmix_to_mono(input: &[f32], channels: usize) -> Vec<f32> {
        input
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    }

    /// Copy a mono signal into every output channel
    fn upmix_from_mono(input: &[f32], channels: usize) -> Vec<f32> {
        let mut output = Vec::with_capacity(input.len() * channels);
        for &sample in input {
            output.extend(std::iter::repeat_n(sample, channels));
        }
        output
    }

    /// Fold quad (FL, FR, RL, RR) down to stereo
    fn quad_to_stereo(input: &[f32]) -> Vec<f32> {
        let mut output = Vec::with_capacity(input.len() / 2);
        for frame in input.chunks_exact(4) {
            output.push((frame[0] + frame[2]) / 2.0);
            output.push((frame[1] + frame[3]) / 2.0);
        }
        output
    }

    /// Fold 5.1 or 7.1 down to stereo.
    ///
    /// Layout is FL, FR, FC, LFE, then surround pairs. Center and surrounds
    /// go in at -3 dB; LFE is dropped.
    fn surround_to_stereo(input: &[f32], channels: usize) -> Vec<f32> {
        const ATTENUATION: f32 = std::f32::consts::FRAC_1_SQRT_2;
        let gain = 1.0 / (1.0 + ATTENUATION + ATTENUATION * ((channels - 4) / 2) as f32);

        let mut output = Vec::with_capacity(input.len() / channels * 2);
        for frame in input.chunks_exact(channels) {
            let center = frame[2] * ATTENUATION;
            let mut left = frame[0] + center;
            let mut right = frame[1] + center;
            for pair in frame[4..].chunks_exact(2) {
                left += pair[0] * ATTENUATION;
                right += pair[1] * ATTENUATION;
            }
            output.push((left * gain).clamp(-1.0, 1.0));
            output.push((right * gain).clamp(-1.0, 1.0));
        }
        output
    }
}

impl super::Filter for Remix {
    fn process(&mut self, segment: &AudioSegment) -> AudioResult<AudioSegment> {
        if segment.channels() != self.input_channels {
            return Err(AudioError::InvalidChannels {
                expected: self.input_channels.count(),
                got: segment.channels().count(),
            });
        }

        let samples = segment.samples();
        let in_count = self.input_channels.count() as usize;
        let out_count = self.output_channels.count() as usize;

        let output_samples = match (self.input_channels, self.output_channels) {
            (src, dst) if src == dst => samples.to_vec(),
            (_, Channels::Mono) => Self::downmix_to_mono(samples, in_count),
            (Channels::Mono, _) => Self::upmix_from_mono(samples, out_count),
            (Channels::Quad, Channels::Stereo) => Self::quad_to_stereo(samples),
            (Channels::SurroundFivePointOne | Channels::SurroundSevenPointOne, Channels::Stereo) => {
                Self::surround_to_stereo(samples, in_count)
            }
            _ => {
                return Err(AudioError::ProcessingError(format!(
                    "Remix from {} to {} not supported",
                    self.input_channels.name(),
                    self.output_channels.name()
                )));
            }
        };

        AudioSegment::new(output_samples, segment.sample_rate(), self.output_channels)
    }
}
