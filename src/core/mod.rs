//! Core audio types and structures

/// Audio segment and sample spec types
pub mod audio;

pub use audio::{AudioSegment, Channels, SampleSpec};
