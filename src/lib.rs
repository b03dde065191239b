pub mod align;
pub mod audio_io;
pub mod config;
pub mod control;
pub mod cuts;
pub mod error;
pub mod timestamp;
pub mod traits;
pub mod types;

#[cfg(test)]
mod testing;

use crate::align::scan_divergences;
use crate::config::AlignConfig;
use crate::cuts::build_cut_lists;
use crate::error::DiffError;
use crate::timestamp::sample_timestamp;
use crate::traits::Interrupt;
use crate::types::{ChannelLayout, CutInterval, DecodedAudio, DivergenceRecord};

/// Everything the comparison of two recordings produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub divergences: Vec<DivergenceRecord>,
    pub cuts_a: Vec<CutInterval>,
    pub cuts_b: Vec<CutInterval>,
}

/// Compares two decoded recordings and derives the cuts that re-synchronize them.
///
/// Layout and sample rate must agree; both are checked before any scanning.
pub fn diff_recordings<I: Interrupt + ?Sized>(
    a: &DecodedAudio,
    b: &DecodedAudio,
    cfg: &AlignConfig,
    interrupt: &I,
) -> Result<DiffReport, DiffError> {
    if a.layout != b.layout {
        return Err(DiffError::ChannelLayoutMismatch {
            a: a.layout,
            b: b.layout,
        });
    }
    if a.sample_rate != b.sample_rate {
        return Err(DiffError::SampleRateMismatch {
            a: a.sample_rate,
            b: b.sample_rate,
        });
    }

    let divergences = scan_divergences(&a.samples, &b.samples, a.layout, cfg, interrupt)?;
    let (cuts_a, cuts_b) = build_cut_lists(&divergences);
    Ok(DiffReport {
        divergences,
        cuts_a,
        cuts_b,
    })
}

/// Logs one line per divergence with human-readable times.
pub fn log_divergences(
    divergences: &[DivergenceRecord],
    sample_rate: u32,
    layout: ChannelLayout,
    show_millis: bool,
) {
    if divergences.is_empty() {
        log::info!("No mismatches found.");
    }
    let ts = |pos| sample_timestamp(pos, sample_rate, layout, show_millis);
    for d in divergences {
        log::info!(
            "Mismatch at {} in A, {} in B; resync by skipping {} in A, {} in B.",
            ts(Some(d.start_a)),
            ts(Some(d.start_b)),
            ts(d.resync_offset_a),
            ts(d.offset_b)
        );
    }
}
