//! Per-class vote counts.

use super::argmax::stable_argmax;

/// Votes collected from a set of trees, one counter per class.
///
/// Parallel workers each fill their own tally; tallies are combined with
/// [`VoteTally::merge`] at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTally {
    counts: Box<[u32]>,
}

impl VoteTally {
    /// Empty tally for `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        Self {
            counts: vec![0; n_classes].into_boxed_slice(),
        }
    }

    /// Record one vote. `class` must be below `n_classes`.
    #[inline]
    pub fn record(&mut self, class: usize) {
        self.counts[class] += 1;
    }

    /// Add another tally's counts into this one.
    pub fn merge(&mut self, other: &VoteTally) {
        debug_assert_eq!(self.counts.len(), other.counts.len());
        for (c, o) in self.counts.iter_mut().zip(other.counts.iter()) {
            *c += o;
        }
    }

    /// Consuming form of [`merge`](Self::merge), for reductions.
    pub fn merged(mut self, other: VoteTally) -> Self {
        self.merge(&other);
        self
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Votes for one class (0 for an unknown class).
    #[inline]
    pub fn count(&self, class: usize) -> u32 {
        self.counts.get(class).copied().unwrap_or(0)
    }

    /// Total number of votes recorded.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Share of votes for one class, in `[0, 1]`. Zero when nothing was recorded.
    pub fn fraction(&self, class: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => f64::from(self.count(class)) / f64::from(total),
        }
    }

    /// Winning class; ties go to the lowest index.
    #[inline]
    pub fn winner(&self) -> Option<usize> {
        stable_argmax(&self.counts)
    }
}
