use crate::core::{AudioSegment, Channels};
use crate::error::{AudioError, AudioResult};
use log::debug;
use rubato::{FastFixedIn, PolynomialDegree, Resampler};

/// Audio resampler - converts from one sample rate to another with rubato
pub struct Resample {
    input_rate: u32,
    output_rate: u32,
    channels: Channels,
}

impl Resample {
    /// Create a new resampler
    ///
    /// # Arguments
    /// * `input_rate` - Input sample rate in Hz
    /// * `output_rate` - Output sample rate in Hz
    /// * `channels` - Channel layout of the segments to convert
    pub fn new(input_rate: u32, output_rate: u32, channels: Channels) -> AudioResult<Self> {
        if input_rate == 0 || output_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: 0 });
        }

        Ok(Resample {
            input_rate,
            output_rate,
            channels,
        })
    }

    /// Get the input sample rate
    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    /// Get the output sample rate
    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    /// Get the ratio of output to input sample rate
    pub fn ratio(&self) -> f64 {
        self.output_rate as f64 / self.input_rate as f64
    }

    /// Frames produced for `input_frames`, rounded to nearest
    pub fn output_frames(&self, input_frames: usize) -> usize {
        let scaled = input_frames as u128 * self.output_rate as u128;
        ((scaled + self.input_rate as u128 / 2) / self.input_rate as u128) as usize
    }

    /// Split interleaved samples into one vector per channel
    fn deinterleave(samples: &[f32], channels: usize) -> Vec<Vec<f32>> {
        let frames = samples.len() / channels;
        let mut planar = vec![Vec::with_capacity(frames); channels];
        for frame in samples.chunks_exact(channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                planar[ch].push(sample);
            }
        }
        planar
    }

    /// Interleave `frames` frames out of planar channels
    fn interleave(planar: &[Vec<f32>], frames: usize) -> Vec<f32> {
        let mut interleaved = Vec::with_capacity(frames * planar.len());
        for idx in 0..frames {
            for channel in planar {
                interleaved.push(channel[idx]);
            }
        }
        interleaved
    }

    /// Run the whole segment through rubato in a single chunk
    fn convert(&self, planar: &[Vec<f32>], input_frames: usize) -> AudioResult<Vec<Vec<f32>>> {
        let mut resampler = FastFixedIn::<f32>::new(
            self.ratio(),
            1.0,
            PolynomialDegree::Septic,
            input_frames,
            planar.len(),
        )
        .map_err(|e| AudioError::ResamplingError(format!("Failed to create resampler: {e}")))?;

        let delay = resampler.output_delay();
        let mut output = resampler
            .process(planar, None)
            .map_err(|e| AudioError::ResamplingError(e.to_string()))?;

        // Push the filter tail out so the end of the clip isn't lost
        let tail = resampler
            .process_partial(None::<&[Vec<f32>]>, None)
            .map_err(|e| AudioError::ResamplingError(e.to_string()))?;

        let expected = self.output_frames(input_frames);
        for (channel, rest) in output.iter_mut().zip(tail) {
            channel.extend(rest);
            channel.drain(..delay.min(channel.len()));
            channel.resize(expected, 0.0);
        }
        Ok(output)
    }
}

impl super::Filter for Resample {
    fn process(&mut self, segment: &AudioSegment) -> AudioResult<AudioSegment> {
        if segment.channels() != self.channels {
            return Err(AudioError::InvalidChannels {
                expected: self.channels.count(),
                got: segment.channels().count(),
            });
        }

        if segment.sample_rate() != self.input_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: segment.sample_rate(),
            });
        }

        if self.input_rate == self.output_rate {
            return Ok(segment.clone());
        }

        let input_frames = segment.samples_per_channel();
        let expected = self.output_frames(input_frames);
        debug!(
            "Resampling {} frames {} Hz -> {} Hz",
            input_frames, self.input_rate, self.output_rate
        );

        if input_frames == 0 {
            return AudioSegment::new(Vec::new(), self.output_rate, self.channels);
        }

        let planar = Self::deinterleave(segment.samples(), self.channels.count() as usize);
        let resampled = self.convert(&planar, input_frames)?;

        AudioSegment::new(
            Self::interleave(&resampled, expected),
            self.output_rate,
            self.channels,
        )
    }
}
