use crate::types::{ChannelLayout, Position, Sample};

/// Tolerance-based sample equality. Every read is bounds-checked and reports
/// `None` past either end rather than a mismatch.
#[derive(Clone, Copy, Debug)]
pub struct Comparator {
    tolerance: u32,
    layout: ChannelLayout,
}

impl Comparator {
    pub fn new(tolerance: u32, layout: ChannelLayout) -> Self {
        Self { tolerance, layout }
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    #[inline]
    pub fn distance(a: &[Sample], ia: Position, b: &[Sample], ib: Position) -> Option<u32> {
        let sa = *a.get(ia)? as i32;
        let sb = *b.get(ib)? as i32;
        Some((sa - sb).unsigned_abs())
    }

    #[inline]
    pub fn matches(&self, a: &[Sample], ia: Position, b: &[Sample], ib: Position) -> Option<bool> {
        Self::distance(a, ia, b, ib).map(|d| d <= self.tolerance)
    }

    /// Matches a whole frame; for stereo both channels must be within tolerance.
    #[inline]
    pub fn frame_matches(
        &self,
        a: &[Sample],
        ia: Position,
        b: &[Sample],
        ib: Position,
    ) -> Option<bool> {
        match self.layout {
            ChannelLayout::Mono => self.matches(a, ia, b, ib),
            ChannelLayout::Stereo => {
                let left = self.matches(a, ia, b, ib)?;
                let right = self.matches(a, ia + 1, b, ib + 1)?;
                Some(left && right)
            }
        }
    }
}
