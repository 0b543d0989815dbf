#![warn(missing_docs)]

//! # audio-pad: join audio clips and pad them to a target length
//!
//! Decodes a list of clips in order, joins them into one in-memory buffer,
//! appends silence until the buffer reaches a target duration, and writes
//! the result out as WAV.
//!
//! ## Features
//!
//! - **Decode** - MP3, FLAC, WAV, OGG, AAC, ALAC via Symphonia
//! - **Conform** - inputs with other sample rates or layouts are remixed and resampled
//! - **Pad** - silence appended up to the target, never trimmed
//! - **Encode** - WAV (32-bit float or 16-bit PCM)
//! - **CLI** - `merge-pad` binary
//!
//! ## Quick Start
//!
//! ```ignore
//! use audio_pad::encoder::{self, ExportFormat};
//! use audio_pad::processor::merge_segments;
//!
//! let inputs = ["intro.mp3", "talk.flac", "outro.wav"];
//! let (segment, report) = merge_segments(&inputs, 600_000, None)?;
//! for failure in &report.failures {
//!     eprintln!("skipped {}: {}", failure.path.display(), failure.error);
//! }
//! encoder::export(&segment, "merged.wav", ExportFormat::Wav)?;
//! ```

/// Core audio types and structures
pub mod core;
/// Error types for audio operations
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Channel remixing and resampling
pub mod filter;
/// Audio encoder implementations
pub mod encoder;
/// Concatenate-and-pad pipeline
pub mod processor;

pub use core::{AudioSegment, Channels, SampleSpec};
pub use encoder::ExportFormat;
pub use error::{AudioError, AudioResult};
pub use processor::{MergeConfig, MergeReport, merge};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
