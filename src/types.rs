use std::fmt;

use crate::error::DiffError;

pub type Sample = i16;

/// Sample index into an interleaved sequence.
pub type Position = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    pub fn from_channels(channels: usize) -> Result<Self, DiffError> {
        match channels {
            1 => Ok(Self::Mono),
            2 => Ok(Self::Stereo),
            n => Err(DiffError::UnsupportedChannelCount(n)),
        }
    }

    /// Samples per frame.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }

    /// Rounds a sample offset up (toward positive infinity) to a frame boundary.
    #[inline]
    pub fn align_up(self, offset: isize) -> isize {
        match self {
            Self::Mono => offset,
            Self::Stereo => offset + offset.rem_euclid(2),
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mono => write!(f, "mono"),
            Self::Stereo => write!(f, "stereo"),
        }
    }
}

/// Result of a bounded search that may run off the end of the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    Found(T),
    EndOfData,
}

/// Where the two recordings stopped agreeing, and how far each must skip to agree again.
///
/// Both skip fields are `None` for an open divergence that runs to the end of the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivergenceRecord {
    pub start_a: Position,
    pub start_b: Position,
    pub resync_offset_a: Option<usize>,
    pub offset_b: Option<usize>,
}

impl DivergenceRecord {
    pub fn open(start_a: Position, start_b: Position) -> Self {
        Self {
            start_a,
            start_b,
            resync_offset_a: None,
            offset_b: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.resync_offset_a.is_none() && self.offset_b.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CutEnd {
    At(Position),
    EndOfSequence,
}

/// Half-open range `[start, end)` of samples to delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CutInterval {
    pub start: Position,
    pub end: CutEnd,
}

impl CutInterval {
    /// Resolves the end against a sequence of `len` samples.
    pub fn end_within(&self, len: usize) -> usize {
        match self.end {
            CutEnd::At(end) => end.min(len),
            CutEnd::EndOfSequence => len,
        }
    }
}

/// A decoded recording with the metadata the comparison needs.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// interleaved samples
    pub samples: Vec<Sample>,
    pub layout: ChannelLayout,
    pub sample_rate: u32,
    pub tags: Vec<(String, String)>,
}
