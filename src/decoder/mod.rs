//! Audio decoder implementations

/// Symphonia-backed decoding
pub mod symphonia;

pub use symphonia::SymphoniaDecoder;

use crate::core::{AudioSegment, SampleSpec};
use crate::error::AudioResult;
use log::debug;
use std::path::Path;

/// Trait for audio decoders
pub trait Decoder: Send {
    /// Get the next decoded chunk from the stream
    fn decode_segment(&mut self) -> AudioResult<Option<AudioSegment>>;

    /// Sample spec of every chunk this decoder yields
    fn spec(&self) -> SampleSpec;

    /// Check if decoder is finished
    fn is_finished(&self) -> bool;
}

/// Create a decoder from a file path
pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Box<dyn Decoder>> {
    let path = path.as_ref();
    SymphoniaDecoder::from_file(path).map(|d| Box::new(d) as Box<dyn Decoder>)
}

/// Decode a whole file into one in-memory segment
pub fn decode_file<P: AsRef<Path>>(path: P) -> AudioResult<AudioSegment> {
    let path = path.as_ref();
    let mut decoder = from_file(path)?;
    drain(decoder.as_mut()).inspect(|segment| {
        debug!(
            "Decoded {}: {} ms ({})",
            path.display(),
            segment.duration_ms(),
            segment.spec()
        );
    })
}

/// Pull every remaining chunk out of `decoder` and join them
pub fn drain(decoder: &mut dyn Decoder) -> AudioResult<AudioSegment> {
    let mut whole = AudioSegment::empty(decoder.spec());
    while let Some(chunk) = decoder.decode_segment()? {
        whole.append(chunk)?;
    }
    Ok(whole)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Channels;
    use crate::error::AudioError;
    use std::collections::VecDeque;

    struct ScriptedDecoder {
        chunks: VecDeque<AudioResult<AudioSegment>>,
        spec: SampleSpec,
    }

    impl Decoder for ScriptedDecoder {
        fn decode_segment(&mut self) -> AudioResult<Option<AudioSegment>> {
            self.chunks.pop_front().transpose()
        }

        fn spec(&self) -> SampleSpec {
            self.spec
        }

        fn is_finished(&self) -> bool {
            self.chunks.is_empty()
        }
    }

    #[test]
    fn test_drain_joins_chunks_in_order() {
        let spec = SampleSpec::new(8000, Channels::Mono).unwrap();
        let mut decoder = ScriptedDecoder {
            chunks: VecDeque::from(vec![
                AudioSegment::new(vec![0.1, 0.2], 8000, Channels::Mono),
                AudioSegment::new(vec![0.3], 8000, Channels::Mono),
            ]),
            spec,
        };

        let whole = drain(&mut decoder).unwrap();
        assert_eq!(whole.samples(), &[0.1, 0.2, 0.3]);
        assert_eq!(whole.spec(), spec);
        assert!(decoder.is_finished());
    }

    #[test]
    fn test_drain_propagates_errors() {
        let mut decoder = ScriptedDecoder {
            chunks: VecDeque::from(vec![
                AudioSegment::new(vec![0.1], 8000, Channels::Mono),
                Err(AudioError::DecodeError("truncated stream".to_string())),
            ]),
            spec: SampleSpec::new(8000, Channels::Mono).unwrap(),
        };
        assert!(matches!(drain(&mut decoder), Err(AudioError::DecodeError(_))));
    }

    #[test]
    fn test_decode_missing_file() {
        assert!(decode_file("/nonexistent/clip.wav").is_err());
    }
}
