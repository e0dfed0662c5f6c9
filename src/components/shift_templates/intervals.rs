use crate::utils::time::{Minutes, MINUTES_PER_DAY};
use std::fmt;

/// Half-open range of minutes within one day
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MinuteRange {
    /// Inclusive.
    pub start: Minutes,

    /// Exclusive.
    pub end: Minutes,
}

impl fmt::Debug for MinuteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl MinuteRange {
    pub const fn new(start: Minutes, end: Minutes) -> Self {
        Self { start, end }
    }

    /// Ranges that only touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(self, other: MinuteRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Whether a block ends on the day it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSpan {
    Normal,
    WrapsMidnight,
}

/// A single contiguous block of a time slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBlock {
    pub start: Minutes,
    pub end: Minutes,
    pub span: BlockSpan,
}

impl TimeBlock {
    /// Build a block, treating `end <= start` as an end on the next day
    pub fn new(start: Minutes, end: Minutes) -> Self {
        let span = if end > start {
            BlockSpan::Normal
        } else {
            BlockSpan::WrapsMidnight
        };
        Self { start, end, span }
    }

    pub fn duration(&self) -> Minutes {
        match self.span {
            BlockSpan::Normal => self.end - self.start,
            BlockSpan::WrapsMidnight => self.end + MINUTES_PER_DAY - self.start,
        }
    }

    /// Canonical same-day ranges covered by this block
    pub fn ranges(&self) -> Vec<MinuteRange> {
        match self.span {
            BlockSpan::Normal => vec![MinuteRange::new(self.start, self.end)],
            BlockSpan::WrapsMidnight => {
                let mut ranges = vec![MinuteRange::new(self.start, MINUTES_PER_DAY)];
                if self.end > 0 {
                    ranges.push(MinuteRange::new(0, self.end));
                }
                ranges
            }
        }
    }
}

/// True if any range produced by `a` overlaps any range produced by `b`
pub fn blocks_overlap(a: &[TimeBlock], b: &[TimeBlock]) -> bool {
    let b_ranges: Vec<MinuteRange> = b.iter().flat_map(TimeBlock::ranges).collect();

    a.iter()
        .flat_map(TimeBlock::ranges)
        .any(|ra| b_ranges.iter().any(|rb| ra.overlaps(*rb)))
}
