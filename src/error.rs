use thiserror::Error;

use crate::types::ChannelLayout;

/// Errors reported by the comparison and its file I/O.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("number of audio channels is {0}, not 1-2")]
    UnsupportedChannelCount(usize),

    #[error("one file is {a} and the other is {b}")]
    ChannelLayoutMismatch { a: ChannelLayout, b: ChannelLayout },

    #[error("files have different sample rates ({a} Hz vs {b} Hz)")]
    SampleRateMismatch { a: u32, b: u32 },

    /// A cursor computation went negative. This is a defect in the search, not bad input.
    #[error("position out of bounds: {0}")]
    InvariantViolation(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("scan cancelled")]
    Cancelled,

    #[error("scan deadline exceeded")]
    DeadlineExceeded,

    #[error("no decodable audio track")]
    NoTrack,

    #[error(transparent)]
    Decode(#[from] symphonia::core::errors::Error),

    #[error(transparent)]
    Encode(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
