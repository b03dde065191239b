use crate::align::compare::Comparator;
use crate::config::AlignConfig;
use crate::control::Poller;
use crate::error::DiffError;
use crate::traits::Interrupt;
use crate::types::{Position, Sample, SearchOutcome};

/// Pins down where the sustained match after a divergence begins.
///
/// Compares `A[pos_a + resync + k]` with `B[pos_b + k]` frame by frame and
/// returns the offset `k` (in samples, from `pos_b`) of the first frame of
/// the first run of `run_length` consecutive matches. Frames whose A side
/// would fall before `pos_a` were already consumed by the scan and are
/// skipped, so the returned offset is never below `-resync`.
pub fn find_boundary<I: Interrupt + ?Sized>(
    a: &[Sample],
    b: &[Sample],
    pos_a: Position,
    pos_b: Position,
    resync: isize,
    cmp: &Comparator,
    cfg: &AlignConfig,
    interrupt: &I,
) -> Result<SearchOutcome<usize>, DiffError> {
    let layout = cmp.layout();
    let channels = layout.channels();

    let skip = layout.align_up(resync.min(0).abs()) as usize;
    let base_a = usize::try_from(pos_a as isize + resync + skip as isize).map_err(|_| {
        DiffError::InvariantViolation(format!(
            "boundary scan would start before A (pos_a={pos_a}, resync={resync})"
        ))
    })?;

    let mut poller = Poller::new(interrupt);
    let mut scan = skip;
    let mut run = 0usize;
    loop {
        poller.tick()?;
        let ia = base_a + (scan - skip);
        match cmp.frame_matches(a, ia, b, pos_b + scan) {
            None => return Ok(SearchOutcome::EndOfData),
            Some(true) => run += 1,
            Some(false) => run = 0,
        }
        scan += channels;

        // scan > min_boundary_offset can never fail once run_length > min_boundary_offset
        if run >= cfg.run_length && scan / channels > cfg.min_boundary_offset {
            let boundary = scan - run * channels;
            return Ok(SearchOutcome::Found(layout.align_up(boundary as isize) as usize));
        }
    }
}
