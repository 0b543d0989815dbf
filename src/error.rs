use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for audio operations
pub type AudioResult<T> = Result<T, AudioError>;

/// Error types for decoding, conforming, padding and exporting audio
#[derive(Error, Debug)]
pub enum AudioError {
    /// IO error (file operations, disk access)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported audio or export format
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Invalid audio metadata
    #[error("Invalid audio metadata: {0}")]
    InvalidMetadata(String),

    /// Decoding failed
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Encoding failed
    #[error("Encode error: {0}")]
    EncodeError(String),

    /// Resampling operation failed
    #[error("Resampling error: {0}")]
    ResamplingError(String),

    /// Invalid channel configuration
    #[error("Invalid channel configuration: expected {expected}, got {got}")]
    InvalidChannels {
        /// Expected number of channels
        expected: u32,
        /// Got number of channels
        got: u32,
    },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate
        rate: u32,
    },

    /// Buffer-related error
    #[error("Buffer error: {0}")]
    BufferError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Audio processing error
    #[error("Processing error: {0}")]
    ProcessingError(String),

    /// Any of the above, tied to the file it happened on
    #[error("{}: {source}", path.display())]
    AtPath {
        /// File being read or written
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: Box<AudioError>,
    },
}

impl AudioError {
    /// Attach the offending path to this error
    pub fn at_path<P: Into<PathBuf>>(self, path: P) -> Self {
        match self {
            already @ AudioError::AtPath { .. } => already,
            other => AudioError::AtPath {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

impl From<symphonia::core::errors::Error> for AudioError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        match err {
            symphonia::core::errors::Error::IoError(e) => AudioError::Io(e),
            symphonia::core::errors::Error::Unsupported(what) => {
                AudioError::UnsupportedFormat(what.to_string())
            }
            e => AudioError::DecodeError(e.to_string()),
        }
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => AudioError::Io(e),
            e => AudioError::EncodeError(e.to_string()),
        }
    }
}
