use crate::core::{AudioSegment, SampleSpec};
use crate::decoder;
use crate::error::{AudioError, AudioResult};
use crate::filter;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// What happened to one input
#[derive(Debug)]
pub enum LoadOutcome {
    /// Decoded and ready to append
    Loaded {
        /// Source file
        path: PathBuf,
        /// Decoded audio in the file's own spec
        segment: AudioSegment,
    },
    /// Could not be used; skipped
    Failed(InputFailure),
}

/// An input that was skipped, with the reason
#[derive(Debug)]
pub struct InputFailure {
    /// Position in the input list
    pub index: usize,
    /// Source file
    pub path: PathBuf,
    /// Why it was skipped
    pub error: AudioError,
}

/// Result of concatenating a list of inputs
#[derive(Debug)]
pub struct Concatenation {
    /// Every usable input, in order
    pub segment: AudioSegment,
    /// Number of inputs that made it into `segment`
    pub merged: usize,
    /// Inputs that were skipped, in order
    pub failures: Vec<InputFailure>,
}

/// Decode each input on its own, keeping input order
pub fn load_all<P: AsRef<Path>>(inputs: &[P]) -> Vec<LoadOutcome> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let path = path.as_ref();
            match decoder::decode_file(path) {
                Ok(segment) => LoadOutcome::Loaded {
                    path: path.to_path_buf(),
                    segment,
                },
                Err(error) => LoadOutcome::Failed(InputFailure {
                    index,
                    path: path.to_path_buf(),
                    error,
                }),
            }
        })
        .collect()
}

/// Join decoded inputs in order, skipping failures.
///
/// The output spec is `spec` when given, otherwise that of the first input
/// that decodes; later inputs are conformed to it. With nothing decoded the
/// result is empty in `spec` or [`SampleSpec::default`].
pub fn concatenate(outcomes: Vec<LoadOutcome>, spec: Option<SampleSpec>) -> Concatenation {
    let mut accumulator: Option<AudioSegment> = spec.map(AudioSegment::empty);
    let mut merged = 0;
    let mut failures = Vec::new();

    for (index, outcome) in outcomes.into_iter().enumerate() {
        let (path, segment) = match outcome {
            LoadOutcome::Loaded { path, segment } => (path, segment),
            LoadOutcome::Failed(failure) => {
                report(&failure);
                failures.push(failure);
                continue;
            }
        };

        let appended = match accumulator {
            Some(ref mut acc) => append_conformed(acc, segment),
            None => {
                debug!("Output spec taken from {}: {}", path.display(), segment.spec());
                accumulator = Some(segment);
                Ok(())
            }
        };

        match appended {
            Ok(()) => merged += 1,
            Err(error) => {
                let failure = InputFailure { index, path, error };
                report(&failure);
                failures.push(failure);
            }
        }
    }

    Concatenation {
        segment: accumulator.unwrap_or_else(|| AudioSegment::empty(SampleSpec::default())),
        merged,
        failures,
    }
}

/// Decode and join `inputs` in one step
pub fn concatenate_files<P: AsRef<Path>>(inputs: &[P], spec: Option<SampleSpec>) -> Concatenation {
    concatenate(load_all(inputs), spec)
}

fn append_conformed(acc: &mut AudioSegment, segment: AudioSegment) -> AudioResult<()> {
    let segment = filter::conform(segment, acc.spec())?;
    acc.append(segment)
}

fn report(failure: &InputFailure) {
    warn!(
        "Skipping input #{} {}: {}",
        failure.index + 1,
        failure.path.display(),
        failure.error
    );
}
