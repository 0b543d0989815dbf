//! Audio filter implementations

/// Channel layout conversion
pub mod remix;
/// Sample rate conversion
pub mod resample;

pub use remix::Remix;
pub use resample::Resample;

use crate::core::{AudioSegment, SampleSpec};
use crate::error::AudioResult;

/// Trait for audio filters
pub trait Filter {
    /// Process an audio segment through this filter
    fn process(&mut self, segment: &AudioSegment) -> AudioResult<AudioSegment>;
}

/// Convert `segment` to `spec` so it can be appended to a buffer of that spec.
///
/// Channels are remixed before resampling so the resampler runs on the
/// (usually smaller) target layout.
pub fn conform(segment: AudioSegment, spec: SampleSpec) -> AudioResult<AudioSegment> {
    if segment.spec() == spec {
        return Ok(segment);
    }

    let remixed = if segment.channels() != spec.channels {
        Remix::new(segment.channels(), spec.channels)?.process(&segment)?
    } else {
        segment
    };

    if remixed.sample_rate() != spec.sample_rate {
        Resample::new(remixed.sample_rate(), spec.sample_rate, spec.channels)?.process(&remixed)
    } else {
        Ok(remixed)
    }
}
