use crate::core::{AudioSegment, Channels, SampleSpec};
use crate::error::{AudioError, AudioResult};
use log::{debug, warn};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based audio decoder
pub struct SymphoniaDecoder {
    /// Container reader for the audio source
    reader: Box<dyn FormatReader>,
    /// Track being decoded
    track_id: u32,
    /// Sample rate and channel layout of the track
    spec: SampleSpec,
    /// Packets skipped because they failed to decode
    skipped_packets: u64,
    /// Whether decoding is finished
    finished: bool,
    /// Codec state
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
    /// Reused conversion buffer
    sample_buf: Option<SampleBuffer<f32>>,
}

impl SymphoniaDecoder {
    /// Create decoder from file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();

        let file = Box::new(File::open(path)?);
        let mss = MediaSourceStream::new(file, Default::default());

        // The extension is only a hint; probing reads the stream itself
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

        let reader = probed.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::InvalidMetadata("No audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = &track.codec_params;

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| AudioError::InvalidMetadata("Unknown sample rate".to_string()))?;

        let channels = match codec_params.channels {
            Some(channels) => Channels::from_count(channels.count() as u32)?,
            None => {
                return Err(AudioError::InvalidMetadata(
                    "Unknown channel count".to_string(),
                ));
            }
        };

        let decoder = symphonia::default::get_codecs()
            .make(codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        let spec = SampleSpec::new(sample_rate, channels)?;
        debug!("Opened {} ({})", path.display(), spec);

        Ok(SymphoniaDecoder {
            reader,
            track_id,
            spec,
            skipped_packets: 0,
            finished: false,
            decoder,
            sample_buf: None,
        })
    }

    /// Get the track's sample spec
    pub fn spec(&self) -> SampleSpec {
        self.spec
    }

    /// Packets dropped after a recoverable decode error
    pub fn skipped_packets(&self) -> u64 {
        self.skipped_packets
    }

    fn finish(&mut self) {
        self.finished = true;
        if self.skipped_packets > 0 {
            warn!("{} corrupt packet(s) skipped", self.skipped_packets);
        }
    }
}

impl super::Decoder for SymphoniaDecoder {
    fn decode_segment(&mut self) -> AudioResult<Option<AudioSegment>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    self.finish();
                    return Ok(None);
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.finish();
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(reason)) => {
                    // A corrupt packet costs its own samples, not the whole file
                    debug!("Skipping undecodable packet: {}", reason);
                    self.skipped_packets += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if decoded.frames() == 0 {
                continue;
            }

            if self
                .sample_buf
                .as_ref()
                .is_some_and(|buf| buf.capacity() < decoded.capacity())
            {
                self.sample_buf = None;
            }

            let buf = self.sample_buf.get_or_insert_with(|| {
                SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec())
            });
            buf.copy_interleaved_ref(decoded);

            let segment = AudioSegment::new(
                buf.samples().to_vec(),
                self.spec.sample_rate,
                self.spec.channels,
            )?;

            return Ok(Some(segment));
        }
    }

    fn spec(&self) -> SampleSpec {
        self.spec
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
