//! Concatenate-and-pad pipeline

/// Decoding and joining inputs
pub mod concat;
/// Input list files
pub mod manifest;
/// Silence padding
pub mod pad;

pub use concat::{Concatenation, InputFailure, LoadOutcome, concatenate, concatenate_files, load_all};
pub use manifest::read_manifest;
pub use pad::{pad_to_duration, shortfall_ms};

use crate::core::{AudioSegment, SampleSpec};
use crate::encoder::{self, ExportFormat};
use crate::error::AudioResult;
use log::info;
use std::path::{Path, PathBuf};

/// Everything one merge run needs; no hidden defaults
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Inputs, in playback order
    pub inputs: Vec<PathBuf>,
    /// Output file
    pub output: PathBuf,
    /// Output encoding
    pub format: ExportFormat,
    /// Minimum output length in milliseconds; zero or below disables padding
    pub target_ms: i64,
    /// Force this spec instead of taking the first input's
    pub output_spec: Option<SampleSpec>,
}

/// Summary of a merge run
#[derive(Debug)]
pub struct MergeReport {
    /// Inputs that were joined
    pub inputs_merged: usize,
    /// Inputs that were skipped
    pub failures: Vec<InputFailure>,
    /// Length of the joined inputs
    pub content_ms: u64,
    /// Length of the appended silence
    pub silence_ms: u64,
    /// Length of the final buffer
    pub duration_ms: u64,
    /// Spec of the final buffer
    pub spec: SampleSpec,
}

/// Concatenate `inputs` and pad to `target_ms`, without writing anything
pub fn merge_segments<P: AsRef<Path>>(
    inputs: &[P],
    target_ms: i64,
    output_spec: Option<SampleSpec>,
) -> AudioResult<(AudioSegment, MergeReport)> {
    let joined = concatenate_files(inputs, output_spec);
    finish(joined, target_ms)
}

/// Pad an already concatenated buffer and build the report
pub fn finish(joined: Concatenation, target_ms: i64) -> AudioResult<(AudioSegment, MergeReport)> {
    let content_ms = joined.segment.duration_ms();
    let padded = pad_to_duration(joined.segment, target_ms)?;
    let duration_ms = padded.duration_ms();

    let report = MergeReport {
        inputs_merged: joined.merged,
        failures: joined.failures,
        content_ms,
        silence_ms: duration_ms - content_ms,
        duration_ms,
        spec: padded.spec(),
    };
    Ok((padded, report))
}

/// Run the whole pipeline: decode, join, pad, export
pub fn merge(config: &MergeConfig) -> AudioResult<MergeReport> {
    let (segment, report) = merge_segments(&config.inputs, config.target_ms, config.output_spec)?;

    encoder::export(&segment, &config.output, config.format)?;

    info!(
        "Wrote {}: {} ms ({} ms audio from {} of {} inputs, {} ms silence)",
        config.output.display(),
        report.duration_ms,
        report.content_ms,
        report.inputs_merged,
        config.inputs.len(),
        report.silence_ms
    );
    Ok(report)
}

#[cfg(test)]
pub(crate) mod testing {
    use hound::{WavSpec, WavWriter};
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Write a 16-bit WAV holding one constant value
    pub fn write_constant_wav(
        dir: &Path,
        name: &str,
        sample_rate: u32,
        channels: u16,
        duration_ms: u64,
        value: f32,
    ) -> PathBuf {
        let path = dir.join(name);
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        let frames = sample_rate as u64 * duration_ms / 1000;
        let sample = (value * 32768.0) as i16;
        for _ in 0..frames * channels as u64 {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    /// Write bytes no decoder will accept
    pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"definitely not audio, just some text bytes").unwrap();
        path
    }
}
