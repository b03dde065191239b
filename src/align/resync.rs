use crate::align::compare::Comparator;
use crate::config::AlignConfig;
use crate::control::Poller;
use crate::error::DiffError;
use crate::traits::Interrupt;
use crate::types::{Position, Sample, SearchOutcome};

/// Finds the shift of A, relative to B, at which the two agree again one
/// lookahead window past the desync point.
///
/// Any divergence is assumed shorter than the lookahead window, and
/// divergences are assumed to be at least that far apart, so both sequences
/// should be back in sync at `pos + lookahead` once A is shifted by the length
/// difference of the divergent segments. The direction of that shift is
/// unknown, so offsets are tried outward: `0, +1, -1, +2, -2, ...` (in samples).
///
/// A candidate is accepted when the checkpoint and every sample of the
/// following `confirm_frames` frames match, which rejects one-off matches
/// from encoding noise. Stereo offsets are rounded up to a frame boundary.
///
/// Termination: `|offset|` grows by one every two candidates and the search
/// gives up once it passes `max_offset_frames`, so at most
/// `2 * max_offset + 1` candidates are tried. Running past the end of either
/// sequence also ends the search, with `EndOfData`.
pub fn find_resync_offset<I: Interrupt + ?Sized>(
    a: &[Sample],
    b: &[Sample],
    pos_a: Position,
    pos_b: Position,
    cmp: &Comparator,
    cfg: &AlignConfig,
    interrupt: &I,
) -> Result<SearchOutcome<isize>, DiffError> {
    let channels = cmp.layout().channels();
    let lookahead = cfg.lookahead_frames * channels;
    let span = cfg.confirm_frames * channels;
    let max_offset = cfg.max_offset_frames() * channels;

    let check_b = pos_b + lookahead;
    if check_b + span >= b.len() {
        return Ok(SearchOutcome::EndOfData);
    }
    let check_a = pos_a + lookahead;

    let mut poller = Poller::new(interrupt);
    let mut offset: isize = 0;
    loop {
        poller.tick()?;
        if offset.unsigned_abs() > max_offset {
            log::warn!(
                "no resync within {} samples of {}/{}; treating the rest as divergent",
                max_offset,
                pos_a,
                pos_b
            );
            return Ok(SearchOutcome::EndOfData);
        }

        // Negative candidates only occur when the cap exceeds the lookahead.
        if let Ok(cand) = usize::try_from(check_a as isize + offset) {
            if cand + span >= a.len() {
                return Ok(SearchOutcome::EndOfData);
            }
            if confirms(a, cand, b, check_b, span, cmp) {
                return Ok(SearchOutcome::Found(cmp.layout().align_up(offset)));
            }
        }

        offset = -offset;
        if offset >= 0 {
            offset += 1;
        }
    }
}

#[inline]
fn confirms(
    a: &[Sample],
    ia: Position,
    b: &[Sample],
    ib: Position,
    span: usize,
    cmp: &Comparator,
) -> bool {
    (0..=span).all(|i| cmp.matches(a, ia + i, b, ib + i) == Some(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::NeverInterrupt;
    use crate::testing::{insert_at, noise, small_config};
    use crate::types::ChannelLayout;

    #[test]
    fn identical_tails_resync_at_zero() {
        let a = noise(1, 400);
        let cmp = Comparator::new(1, ChannelLayout::Mono);
        let cfg = small_config();
        let found = find_resync_offset(&a, &a, 10, 10, &cmp, &cfg, &NeverInterrupt).unwrap();
        assert_eq!(found, SearchOutcome::Found(0));
    }

    #[test]
    fn insertion_in_b_gives_negative_shift() {
        let a = noise(2, 600);
        let b = insert_at(&a, 100, &noise(3, 17));
        let cmp = Comparator::new(1, ChannelLayout::Mono);
        let cfg = small_config();
        let found = find_resync_offset(&a, &b, 100, 100, &cmp, &cfg, &NeverInterrupt).unwrap();
        assert_eq!(found, SearchOutcome::Found(-17));
    }

    #[test]
    fn insertion_in_a_gives_positive_shift() {
        let b = noise(4, 600);
        let a = insert_at(&b, 100, &noise(5, 23));
        let cmp = Comparator::new(1, ChannelLayout::Mono);
        let cfg = small_config();
        let found = find_resync_offset(&a, &b, 100, 100, &cmp, &cfg, &NeverInterrupt).unwrap();
        assert_eq!(found, SearchOutcome::Found(23));
    }

    #[test]
    fn checkpoint_past_end_is_end_of_data() {
        let a = noise(6, 100);
        let cmp = Comparator::new(1, ChannelLayout::Mono);
        let cfg = small_config();
        let found = find_resync_offset(&a, &a, 90, 90, &cmp, &cfg, &NeverInterrupt).unwrap();
        assert_eq!(found, SearchOutcome::EndOfData);
    }

    #[test]
    fn unrelated_signals_hit_the_offset_cap() {
        let a = noise(7, 5000);
        let b = noise(8, 5000);
        let cmp = Comparator::new(0, ChannelLayout::Mono);
        let cfg = AlignConfig {
            max_offset_frames: Some(30),
            ..small_config()
        };
        let found = find_resync_offset(&a, &b, 0, 0, &cmp, &cfg, &NeverInterrupt).unwrap();
        assert_eq!(found, SearchOutcome::EndOfData);
    }

    #[test]
    fn stereo_offset_is_even() {
        let a = noise(9, 1200);
        // 11 stereo frames
        let b = insert_at(&a, 200, &noise(10, 22));
        let cmp = Comparator::new(1, ChannelLayout::Stereo);
        let cfg = small_config();
        let found = find_resync_offset(&a, &b, 200, 200, &cmp, &cfg, &NeverInterrupt).unwrap();
        match found {
            SearchOutcome::Found(off) => {
                assert_eq!(off.rem_euclid(2), 0);
                assert_eq!(off, -22);
            }
            SearchOutcome::EndOfData => panic!("expected a resync"),
        }
    }

    #[test]
    fn cancelled_search_stops() {
        let a = noise(11, 1 << 18);
        let b = noise(12, 1 << 18);
        let cmp = Comparator::new(0, ChannelLayout::Mono);
        let cfg = AlignConfig {
            lookahead_frames: 1 << 16,
            ..small_config()
        };
        let control = crate::control::ScanControl::new();
        control.cancel();
        let res = find_resync_offset(&a, &b, 0, 0, &cmp, &cfg, &control);
        assert!(matches!(res, Err(DiffError::Cancelled)));
    }
}
