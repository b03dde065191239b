use crate::error::DiffError;

pub const DEFAULT_TOLERANCE: u32 = 1;
/// Longest divergence the search expects, and the shortest gap between two of them.
pub const DEFAULT_LOOKAHEAD_SECS: u32 = 5 * 60;
pub const DEFAULT_CONFIRM_FRAMES: usize = 100;
pub const DEFAULT_RUN_LENGTH: usize = 5000;
pub const DEFAULT_MIN_BOUNDARY_OFFSET: usize = 500;
const FALLBACK_SAMPLE_RATE: u32 = 44_100;

/// Tuning for the alignment search. Window sizes are in frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignConfig {
    /// Largest per-sample absolute difference still counted as a match.
    pub tolerance: u32,
    pub lookahead_frames: usize,
    /// Frames after the checkpoint that must also match before a resync offset is accepted.
    pub confirm_frames: usize,
    /// Consecutive matching frames that confirm a boundary.
    pub run_length: usize,
    /// The boundary scan must have moved past this many frames before a run is accepted.
    pub min_boundary_offset: usize,
    /// Cap on the resync offset magnitude; `None` uses the lookahead window.
    pub max_offset_frames: Option<usize>,
}

impl AlignConfig {
    pub fn for_sample_rate(sample_rate: u32) -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            lookahead_frames: sample_rate as usize * DEFAULT_LOOKAHEAD_SECS as usize,
            confirm_frames: DEFAULT_CONFIRM_FRAMES,
            run_length: DEFAULT_RUN_LENGTH,
            min_boundary_offset: DEFAULT_MIN_BOUNDARY_OFFSET,
            max_offset_frames: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_lookahead_secs(mut self, secs: u32, sample_rate: u32) -> Self {
        self.lookahead_frames = secs as usize * sample_rate as usize;
        self
    }

    pub fn max_offset_frames(&self) -> usize {
        self.max_offset_frames.unwrap_or(self.lookahead_frames)
    }

    pub fn validate(&self) -> Result<(), DiffError> {
        if self.run_length == 0 {
            return Err(DiffError::InvalidConfig("run length must be at least 1".into()));
        }
        if self.lookahead_frames == 0 {
            return Err(DiffError::InvalidConfig("lookahead must be at least 1 frame".into()));
        }
        Ok(())
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self::for_sample_rate(FALLBACK_SAMPLE_RATE)
    }
}
