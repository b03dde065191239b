use crate::types::{CutEnd, CutInterval, DivergenceRecord, Sample};

/// Above this many intervals, [`apply_cuts_auto`] rebuilds the sequence in one
/// pass instead of deleting in place.
pub const COPY_THRESHOLD: usize = 64;

/// Splits divergence records into per-sequence deletion lists `(cuts_a, cuts_b)`.
///
/// Records come from a scan whose cursors only move forward, so each list is
/// sorted by `start` and non-overlapping.
pub fn build_cut_lists(records: &[DivergenceRecord]) -> (Vec<CutInterval>, Vec<CutInterval>) {
    let cut = |start: usize, len: Option<usize>| CutInterval {
        start,
        end: match len {
            Some(len) => CutEnd::At(start + len),
            None => CutEnd::EndOfSequence,
        },
    };
    records
        .iter()
        .map(|r| (cut(r.start_a, r.resync_offset_a), cut(r.start_b, r.offset_b)))
        .unzip()
}

/// Deletes `cuts` (ascending) from `samples` in place, last interval first so
/// earlier indices stay valid.
pub fn apply_cuts(samples: &mut Vec<Sample>, cuts: &[CutInterval]) {
    debug_assert!(is_sorted(cuts), "cut intervals must be ascending");
    for c in cuts.iter().rev() {
        let end = c.end_within(samples.len());
        if c.start < end {
            samples.drain(c.start..end);
        }
    }
}

/// Same result as [`apply_cuts`], built by copying the kept ranges once.
pub fn apply_cuts_by_copy(samples: &[Sample], cuts: &[CutInterval]) -> Vec<Sample> {
    debug_assert!(is_sorted(cuts), "cut intervals must be ascending");
    let removed: usize = cuts
        .iter()
        .map(|c| c.end_within(samples.len()).saturating_sub(c.start))
        .sum();
    let mut out = Vec::with_capacity(samples.len().saturating_sub(removed));
    let mut kept_from = 0;
    for c in cuts {
        let start = c.start.min(samples.len());
        if start > kept_from {
            out.extend_from_slice(&samples[kept_from..start]);
        }
        kept_from = kept_from.max(c.end_within(samples.len()));
    }
    if kept_from < samples.len() {
        out.extend_from_slice(&samples[kept_from..]);
    }
    out
}

/// Picks the in-place or copying strategy by interval count.
pub fn apply_cuts_auto(samples: &mut Vec<Sample>, cuts: &[CutInterval]) {
    if cuts.len() > COPY_THRESHOLD {
        *samples = apply_cuts_by_copy(samples, cuts);
    } else {
        apply_cuts(samples, cuts);
    }
}

fn is_sorted(cuts: &[CutInterval]) -> bool {
    cuts.windows(2).all(|w| w[0].start <= w[1].start)
}
