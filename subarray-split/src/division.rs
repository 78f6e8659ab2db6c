use std::{cmp::Ordering, fmt::Display};

use im::Vector;
use itertools::Itertools;

use crate::{bounds::Bounds, counter::CandidateCounter, prefix::PrefixIndex};

/// Contiguous inclusive range of input positions forming one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subarray {
    pub start: usize,
    pub end: usize,
}

impl Subarray {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "subarray {start}..={end} is inverted");
        Self { start, end }
    }

    pub fn contains(&self, idx: usize) -> bool {
        (self.start..=self.end).contains(&idx)
    }
}

impl Display for Subarray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Which cursor a boundary search falls back to when the bound is not hit
/// exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback {
    High,
    Low,
}

/// Snapshot of a partially built split.
///
/// Transitions never mutate `self`, they return a new state sharing the
/// already placed subarrays and drops (`im::Vector` clones are O(1)).
/// Backtracking is dropping the child.
///
/// Until the first subarray is placed `lower..=upper` is the global range
/// from [`crate::bounds::calculate`], afterwards both hold the fixed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division<'a> {
    prefix: &'a PrefixIndex,
    lower: i64,
    upper: i64,
    n_subarrays: usize,
    n_drops: usize,
    subarrays: Vector<Subarray>,
    dropped: Vector<usize>,
}

impl<'a> Division<'a> {
    pub fn root(prefix: &'a PrefixIndex, bounds: Bounds, n_subarrays: usize) -> Self {
        Self {
            prefix,
            lower: bounds.lower,
            upper: bounds.upper,
            n_subarrays,
            n_drops: bounds.drops,
            subarrays: Vector::new(),
            dropped: Vector::new(),
        }
    }

    /// Only valid on a root, drops positions `0..count`.
    #[must_use]
    pub fn with_leading_drops(&self, count: usize) -> Self {
        debug_assert!(self.subarrays.is_empty() && self.dropped.is_empty());
        debug_assert!(count <= self.n_drops);
        Self {
            dropped: (0..count).collect(),
            ..self.clone()
        }
    }

    /// Appends `subarray`, the first one placed fixes the target sum.
    #[must_use]
    pub fn with_next_subarray(&self, subarray: Subarray) -> Self {
        debug_assert_eq!(subarray.start, self.frontier());
        let target = match self.target() {
            Some(target) => target,
            None => self.prefix.range_sum(subarray.start, subarray.end),
        };
        let mut subarrays = self.subarrays.clone();
        subarrays.push_back(subarray);
        Self {
            lower: target,
            upper: target,
            subarrays,
            ..self.clone()
        }
    }

    /// Drops the `count` positions right after the frontier. Every state
    /// built this way is a candidate and gets recorded.
    #[must_use]
    pub fn with_following_drops(&self, count: usize, counter: &CandidateCounter) -> Self {
        debug_assert!(count <= self.remaining_drops());
        let frontier = self.frontier();
        let mut dropped = self.dropped.clone();
        dropped.extend(frontier..frontier + count);
        let candidate = Self {
            dropped,
            ..self.clone()
        };

        counter.record();
        tracing::trace!(
            subarrays = %candidate.subarrays.iter().format(", "),
            dropped = ?candidate.dropped,
            target_sum = candidate.lower,
            "new candidate"
        );
        candidate
    }

    /// Next unused input position.
    pub fn frontier(&self) -> usize {
        let after_subarray = self.subarrays.last().map_or(0, |sub| sub.end + 1);
        let after_drop = self.dropped.last().map_or(0, |idx| idx + 1);
        after_subarray.max(after_drop)
    }

    pub fn remaining_drops(&self) -> usize {
        self.n_drops - self.dropped.len()
    }

    /// Number of positions in the input.
    pub fn input_len(&self) -> usize {
        self.prefix.len()
    }

    /// The required group sum, `None` until the first subarray is placed.
    pub fn target(&self) -> Option<i64> {
        if self.subarrays.is_empty() {
            None
        } else {
            Some(self.lower)
        }
    }

    pub fn lower_bound(&self) -> i64 {
        self.lower
    }

    pub fn upper_bound(&self) -> i64 {
        self.upper
    }

    pub fn subarrays(&self) -> &Vector<Subarray> {
        &self.subarrays
    }

    pub fn dropped(&self) -> &Vector<usize> {
        &self.dropped
    }

    pub fn prefix(&self) -> &'a PrefixIndex {
        self.prefix
    }

    pub fn is_successful(&self) -> bool {
        self.subarrays.len() == self.n_subarrays && self.dropped.len() == self.n_drops
    }

    pub fn has_all_subarrays(&self) -> bool {
        self.subarrays.len() >= self.n_subarrays
    }

    /// Whether a subarray with this sum may be placed next: exactly the
    /// target once it is fixed, inside the global bounds before that.
    pub fn admits(&self, sum: i64) -> bool {
        match self.target() {
            Some(target) => sum == target,
            None => (self.lower..=self.upper).contains(&sum),
        }
    }

    pub fn subarray_sums(&self) -> impl Iterator<Item = i64> + '_ {
        self.subarrays
            .iter()
            .map(move |sub| self.prefix.range_sum(sub.start, sub.end))
    }

    pub fn is_balanced(&self) -> bool {
        self.subarray_sums().all_equal()
    }

    /// End index whose cumulative sum from the frontier hits the lower bound.
    /// Without an exact hit this is wherever the `high` cursor stopped,
    /// which can be one position off in either direction.
    ///
    /// `None` once the frontier has run past the input.
    pub fn boundary_index_low(&self) -> Option<usize> {
        self.search_boundary(self.lower, Fallback::High)
    }

    /// Same as [`Self::boundary_index_low`] for the upper bound, falling
    /// back to the `low` cursor.
    pub fn boundary_index_high(&self) -> Option<usize> {
        self.search_boundary(self.upper, Fallback::Low)
    }

    fn search_boundary(&self, bound: i64, fallback: Fallback) -> Option<usize> {
        let frontier = self.frontier();
        if frontier >= self.prefix.len() {
            return None;
        }
        let offset = self.prefix.sum_before(frontier);
        let last = self.prefix.len() as isize - 1;

        let (mut low, mut high) = (frontier as isize, last);
        while low < high {
            let mid = (low + high) / 2;
            let sum = self.prefix.get(mid as usize) - offset;
            match sum.cmp(&bound) {
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid - 1,
                Ordering::Equal => return Some(mid as usize),
            }
        }

        let cursor = match fallback {
            Fallback::High => high,
            Fallback::Low => low,
        };
        // the cursors can step one past either end of the window
        Some(cursor.clamp(frontier as isize, last) as usize)
    }

    pub fn into_result(self) -> SplitResult {
        SplitResult {
            target: self.lower,
            subarrays: self.subarrays.into_iter().collect(),
            dropped: self.dropped.into_iter().collect(),
        }
    }
}

/// A successful split, detached from the search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SplitResult {
    pub subarrays: Vec<Subarray>,
    pub dropped: Vec<usize>,
    pub target: i64,
}

impl SplitResult {
    /// Positions neither dropped nor in a subarray, only ever a tail after
    /// the last subarray.
    pub fn uncovered(&self, input_len: usize) -> impl Iterator<Item = usize> + '_ {
        (0..input_len).filter(move |idx| {
            !self.dropped.contains(idx) && !self.subarrays.iter().any(|sub| sub.contains(*idx))
        })
    }
}

impl Display for SplitResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SplitResult {{ target: {}, subarrays: [{}], dropped: {:?} }}",
            self.target,
            self.subarrays.iter().format(", "),
            self.dropped
        )
    }
}

impl From<Division<'_>> for SplitResult {
    fn from(division: Division<'_>) -> Self {
        division.into_result()
    }
}

#[cfg(test)]
mod test {
    use super::{Division, Subarray};
    use crate::{bounds, counter::CandidateCounter, prefix::PrefixIndex};

    const VALUES: [i32; 11] = [10, 7, 2, 10, 5, 1, 1, 4, 1, 11, 5];

    fn scenario() -> (PrefixIndex, bounds::Bounds) {
        bounds::calculate(&VALUES, 3, 2).unwrap()
    }

    #[test]
    fn frontier_follows_subarrays_and_drops() {
        let (prefix, bounds) = scenario();
        let counter = CandidateCounter::new();
        let root = Division::root(&prefix, bounds, 3);
        assert_eq!(root.frontier(), 0);
        assert_eq!(root.remaining_drops(), 2);
        assert_eq!(root.target(), None);

        let leading = root.with_leading_drops(1);
        assert_eq!(leading.frontier(), 1);
        assert_eq!(leading.dropped().iter().copied().collect::<Vec<_>>(), vec![0]);

        let placed = leading.with_next_subarray(Subarray::new(1, 3));
        assert_eq!(placed.frontier(), 4);
        assert_eq!(placed.target(), Some(7 + 2 + 10));

        let dropped = placed.with_following_drops(1, &counter);
        assert_eq!(dropped.frontier(), 5);
        assert_eq!(dropped.remaining_drops(), 0);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn transitions_leave_parent_untouched() {
        let (prefix, bounds) = scenario();
        let counter = CandidateCounter::new();
        let root = Division::root(&prefix, bounds, 3);
        let before = root.clone();

        let child = root
            .with_next_subarray(Subarray::new(0, 1))
            .with_following_drops(2, &counter);
        assert_eq!(root, before);
        assert_eq!(child.subarrays().len(), 1);
        assert_eq!(child.dropped().len(), 2);
        assert_eq!((root.lower_bound(), root.upper_bound()), (12, 18));
        assert_eq!((child.lower_bound(), child.upper_bound()), (17, 17));
    }

    #[test]
    fn later_subarrays_keep_the_target() {
        let (prefix, bounds) = scenario();
        let counter = CandidateCounter::new();
        let state = Division::root(&prefix, bounds, 3)
            .with_next_subarray(Subarray::new(0, 1))
            .with_following_drops(0, &counter)
            .with_next_subarray(Subarray::new(2, 3));
        // 2 + 10 does not match, the target stays at the first sum
        assert_eq!(state.target(), Some(17));
        assert!(!state.is_balanced());
        assert!(state.admits(17));
        assert!(!state.admits(12));
    }

    #[test]
    fn boundary_search_exact_hits() {
        let (prefix, bounds) = scenario();
        let counter = CandidateCounter::new();
        let state = Division::root(&prefix, bounds, 3)
            .with_next_subarray(Subarray::new(0, 1))
            .with_following_drops(0, &counter);
        // 2 + 10 + 5 = 17
        assert_eq!(state.boundary_index_low(), Some(4));
        assert_eq!(state.boundary_index_high(), Some(4));
    }

    #[test]
    fn boundary_search_fallback_is_asymmetric() {
        let (prefix, bounds) = scenario();
        let root = Division::root(&prefix, bounds, 3).with_leading_drops(1);
        // sums from index 1: 7, 9, 19, 24 .. neither 12 nor 18 is hit
        assert_eq!(root.boundary_index_low(), Some(2));
        assert_eq!(root.boundary_index_high(), Some(3));

        let root = Division::root(&prefix, bounds, 3).with_leading_drops(2);
        // sums from index 2: 2, 12, 17, 18 .. the low search hits 12, the high
        // search stops on 18 without probing it
        assert_eq!(root.boundary_index_low(), Some(3));
        assert_eq!(root.boundary_index_high(), Some(5));
    }

    #[test]
    fn boundary_search_is_clamped_to_the_window() {
        let (prefix, bounds) = bounds::calculate(&[20, 1], 2, 0).unwrap();
        let root = Division::root(&prefix, bounds, 2);
        // 20 already exceeds the lower bound of 11, the high cursor ends up
        // before the frontier
        assert_eq!(root.boundary_index_low(), Some(0));

        let counter = CandidateCounter::new();
        let exhausted = root
            .with_next_subarray(Subarray::new(0, 1))
            .with_following_drops(0, &counter);
        assert_eq!(exhausted.frontier(), 2);
        assert_eq!(exhausted.boundary_index_low(), None);
        assert_eq!(exhausted.boundary_index_high(), None);
    }

    #[test]
    fn success_needs_exact_counts() {
        let (prefix, bounds) = scenario();
        let counter = CandidateCounter::new();
        let state = Division::root(&prefix, bounds, 3)
            .with_next_subarray(Subarray::new(0, 1))
            .with_following_drops(0, &counter)
            .with_next_subarray(Subarray::new(2, 4))
            .with_following_drops(1, &counter)
            .with_next_subarray(Subarray::new(6, 9));
        assert!(!state.is_successful());
        assert!(state.has_all_subarrays());

        let state = state.with_following_drops(1, &counter);
        assert!(state.is_successful());
        assert!(state.is_balanced());

        let result = state.into_result();
        assert_eq!(result.target, 17);
        assert_eq!(result.dropped, vec![5, 10]);
        assert_eq!(result.uncovered(VALUES.len()).count(), 0);
        assert_eq!(
            result.to_string(),
            "SplitResult { target: 17, subarrays: [0..=1, 2..=4, 6..=9], dropped: [5, 10] }"
        );
    }
}
