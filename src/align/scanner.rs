use crate::align::compare::Comparator;
use crate::align::refine::find_boundary;
use crate::align::resync::find_resync_offset;
use crate::config::AlignConfig;
use crate::control::Poller;
use crate::error::DiffError;
use crate::traits::Interrupt;
use crate::types::{ChannelLayout, DivergenceRecord, Position, Sample, SearchOutcome};

/// Walks both sequences in lockstep and records every region where they diverge.
///
/// On a mismatch the resync search finds how far A must shift to agree with B
/// again, the boundary search finds where that agreement starts, and the scan
/// resumes one frame past the boundary. The scan ends when B is exhausted in
/// sync, or with an open record when either search runs off the end of the
/// data or one sequence ends while the other still has frames left.
pub fn scan_divergences<I: Interrupt + ?Sized>(
    a: &[Sample],
    b: &[Sample],
    layout: ChannelLayout,
    cfg: &AlignConfig,
    interrupt: &I,
) -> Result<Vec<DivergenceRecord>, DiffError> {
    cfg.validate()?;
    let cmp = Comparator::new(cfg.tolerance, layout);
    let channels = layout.channels();

    // trailing partial frames are ignored
    let a = &a[..a.len() - a.len() % channels];
    let b = &b[..b.len() - b.len() % channels];

    let mut records = Vec::new();
    let mut poller = Poller::new(interrupt);
    let mut pos_a: Position = 0;
    let mut pos_b: Position = 0;

    loop {
        while pos_a < a.len() && pos_b < b.len() {
            poller.tick()?;
            if cmp.frame_matches(a, pos_a, b, pos_b) != Some(true) {
                break;
            }
            pos_a += channels;
            pos_b += channels;
        }

        if pos_a >= a.len() || pos_b >= b.len() {
            if pos_a < a.len() || pos_b < b.len() {
                log::debug!("one input ended at samples {pos_a}/{pos_b}");
                records.push(DivergenceRecord::open(pos_a, pos_b));
            }
            return Ok(records);
        }

        log::debug!("mismatch found at samples {pos_a}/{pos_b}");
        let resync = match find_resync_offset(a, b, pos_a, pos_b, &cmp, cfg, interrupt)? {
            SearchOutcome::Found(offset) => offset,
            SearchOutcome::EndOfData => {
                log::debug!("end of file");
                records.push(DivergenceRecord::open(pos_a, pos_b));
                return Ok(records);
            }
        };

        let offset_b = match find_boundary(a, b, pos_a, pos_b, resync, &cmp, cfg, interrupt)? {
            SearchOutcome::Found(offset) => offset,
            SearchOutcome::EndOfData => {
                log::debug!("end of file");
                records.push(DivergenceRecord::open(pos_a, pos_b));
                return Ok(records);
            }
        };

        let skip_a = usize::try_from(resync + offset_b as isize).map_err(|_| {
            DiffError::InvariantViolation(format!(
                "A would move backwards from {pos_a} (resync={resync}, offset={offset_b})"
            ))
        })?;
        log::debug!(
            "...resynced after adjusting A by {resync} then offsetting both by {offset_b}"
        );

        records.push(DivergenceRecord {
            start_a: pos_a,
            start_b: pos_b,
            resync_offset_a: Some(skip_a),
            offset_b: Some(offset_b),
        });

        // the boundary frame itself is already known to match
        pos_a = advance(pos_a, skip_a + channels)?;
        pos_b = advance(pos_b, offset_b + channels)?;
    }
}

fn advance(pos: Position, by: usize) -> Result<Position, DiffError> {
    pos.checked_add(by)
        .ok_or_else(|| DiffError::InvariantViolation(format!("cursor overflow at {pos} + {by}")))
}
