use crate::core::AudioSegment;
use crate::error::AudioResult;
use log::debug;

/// Milliseconds of silence needed to reach `target_ms`; zero when already long enough
pub fn shortfall_ms(current_ms: u64, target_ms: i64) -> u64 {
    let shortfall = target_ms as i128 - current_ms as i128;
    shortfall.clamp(0, u64::MAX as i128) as u64
}

/// Append silence so `segment` lasts exactly `target_ms`.
///
/// Never shortens: a segment already at or past the target, or a target of
/// zero or below, comes back unchanged. Silence uses the segment's own spec.
///
/// The shortfall is counted in frames against the frame count of the target,
/// so the fraction of a millisecond the segment already holds is not padded
/// twice.
pub fn pad_to_duration(mut segment: AudioSegment, target_ms: i64) -> AudioResult<AudioSegment> {
    let missing = shortfall_ms(segment.duration_ms(), target_ms);
    if missing == 0 {
        return Ok(segment);
    }

    let spec = segment.spec();
    let frames = spec
        .frames_for_ms(target_ms.unsigned_abs())
        .saturating_sub(segment.samples_per_channel());
    if frames == 0 {
        return Ok(segment);
    }

    debug!("Padding {} frames of silence ({})", frames, spec);
    let silence = AudioSegment::silent_frames(frames, spec)?;
    segment.append(silence)?;
    Ok(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Channels, SampleSpec};

    fn clip(ms: u64) -> AudioSegment {
        let spec = SampleSpec::new(8000, Channels::Mono).unwrap();
        let samples = vec![0.5; spec.frames_for_ms(ms)];
        AudioSegment::new(samples, 8000, Channels::Mono).unwrap()
    }

    #[test]
    fn test_shortfall() {
        assert_eq!(shortfall_ms(100, 250), 150);
        assert_eq!(shortfall_ms(250, 250), 0);
        assert_eq!(shortfall_ms(300, 250), 0);
        assert_eq!(shortfall_ms(0, -5), 0);
        assert_eq!(shortfall_ms(u64::MAX, i64::MIN), 0);
    }

    #[test]
    fn test_pads_short_segment() {
        let padded = pad_to_duration(clip(100), 250).unwrap();
        assert_eq!(padded.duration_ms(), 250);
        let samples = padded.samples();
        assert_eq!(samples[799], 0.5);
        assert!(samples[800..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_never_truncates() {
        let original = clip(300);
        let padded = pad_to_duration(original.clone(), 250).unwrap();
        assert_eq!(padded, original);
    }

    #[test]
    fn test_zero_and_negative_targets() {
        let original = clip(40);
        assert_eq!(pad_to_duration(original.clone(), 0).unwrap(), original);
        assert_eq!(pad_to_duration(original.clone(), -1000).unwrap(), original);

        let empty = AudioSegment::empty(SampleSpec::default());
        assert!(pad_to_duration(empty, -1).unwrap().is_empty());
    }

    #[test]
    fn test_pads_empty_to_exact_silence() {
        let empty = AudioSegment::empty(SampleSpec::new(16000, Channels::Stereo).unwrap());
        let padded = pad_to_duration(empty, 1500).unwrap();
        assert_eq!(padded.duration_ms(), 1500);
        assert_eq!(padded.samples().len(), 2 * 24000);
    }

    #[test]
    fn test_padding_is_exact_at_44_1_khz() {
        // 44100 + 44 frames is 1000.998 ms; the partial millisecond must count
        for target in [1501, 1503, 2007] {
            let segment = AudioSegment::new(vec![0.5; 44100 + 44], 44100, Channels::Mono).unwrap();
            let padded = pad_to_duration(segment, target).unwrap();
            assert_eq!(padded.duration_ms(), target as u64);
            assert_eq!(padded.samples()[44143], 0.5);
            assert!(padded.samples()[44144..].iter().all(|&s| s == 0.0));
        }

        let segment = AudioSegment::new(vec![0.5; 44], 44100, Channels::Mono).unwrap();
        let padded = pad_to_duration(segment, 1).unwrap();
        assert_eq!(padded.samples_per_channel(), 45);
        assert_eq!(padded.duration_ms(), 1);
    }

    #[test]
    fn test_padding_is_exact_at_odd_rates() {
        for rate in [11025, 22050, 44100, 88200] {
            let spec = SampleSpec::new(rate, Channels::Stereo).unwrap();
            for target in [1, 7, 333, 1001, 59_999] {
                let padded = pad_to_duration(AudioSegment::empty(spec), target).unwrap();
                assert_eq!(padded.duration_ms(), target as u64);
            }
        }
    }
}
