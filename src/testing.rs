//! Deterministic signal fixtures for the unit tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::AlignConfig;
use crate::types::Sample;

/// Full-scale white noise; coincidental matches within a tolerance of 1 are rare.
pub fn noise(seed: u64, len: usize) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.r#gen::<Sample>()).collect()
}

pub fn insert_at(seq: &[Sample], at: usize, segment: &[Sample]) -> Vec<Sample> {
    replace_at(seq, at, 0, segment)
}

/// Replaces `removed` samples starting at `at` with `segment`.
pub fn replace_at(seq: &[Sample], at: usize, removed: usize, segment: &[Sample]) -> Vec<Sample> {
    let mut out = Vec::with_capacity(seq.len() + segment.len());
    out.extend_from_slice(&seq[..at]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&seq[(at + removed).min(seq.len())..]);
    out
}

/// Window sizes scaled to fixtures of a few thousand samples.
pub fn small_config() -> AlignConfig {
    AlignConfig {
        tolerance: 1,
        lookahead_frames: 64,
        confirm_frames: 8,
        run_length: 32,
        min_boundary_offset: 0,
        max_offset_frames: None,
    }
}
