//! Splits a sequence of integers into `k` contiguous groups with equal sums
//! after dropping exactly `d` positions.
//!
//! The search first narrows the possible group sum to a range (see
//! [`bounds`]), then extends [`Division`] states subarray by subarray,
//! binary searching the prefix sums for where the next group has to end and
//! backtracking as soon as a group misses the target fixed by the first one.
//!
//! ```
//! use subarray_split::{find_first, Subarray};
//!
//! let values = [10, 7, 2, 10, 5, 1, 1, 4, 1, 11, 5];
//! let split = find_first(&values, 3, 2).unwrap().expect("a split exists");
//! assert_eq!(split.target, 17);
//! assert_eq!(split.subarrays[1], Subarray::new(2, 4));
//! assert_eq!(split.dropped, vec![5, 10]);
//! ```
//!
//! [`enumerate`] does not list every possible split. It runs one search per
//! number of leading drops (`0..=d`) and keeps the first success of each, so
//! it returns at most `d + 1` results. [`enumerate_exhaustive`] walks the
//! whole state space instead.

pub mod bounds;
pub mod counter;
pub mod division;
pub mod error;
pub mod prefix;
pub mod search;

pub use crate::bounds::Bounds;
pub use crate::counter::CandidateCounter;
pub use crate::division::{Division, SplitResult, Subarray};
pub use crate::error::InvalidArgument;
pub use crate::prefix::PrefixIndex;
pub use crate::search::{SearchMode, Searcher};

/// Owns everything a search over one input needs: the prefix index, the
/// target bounds and the candidate counter.
#[derive(Debug)]
pub struct Splitter {
    prefix: PrefixIndex,
    bounds: Bounds,
    n_subarrays: usize,
    counter: CandidateCounter,
}

impl Splitter {
    pub fn new(
        values: &[i32],
        n_subarrays: usize,
        n_drops: usize,
    ) -> Result<Self, InvalidArgument> {
        let (prefix, bounds) = bounds::calculate(values, n_subarrays, n_drops)?;
        if bounds.is_empty() {
            tracing::debug!(
                lower = bounds.lower,
                upper = bounds.upper,
                "no group sum fits the bounds, every root will fail"
            );
        }
        Ok(Self {
            prefix,
            bounds,
            n_subarrays,
            counter: CandidateCounter::new(),
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn prefix(&self) -> &PrefixIndex {
        &self.prefix
    }

    pub fn candidates_visited(&self) -> u64 {
        self.counter.get()
    }

    /// Returns the count before the reset.
    pub fn reset_candidates(&self) -> u64 {
        self.counter.reset()
    }

    fn root(&self) -> Division<'_> {
        Division::root(&self.prefix, self.bounds, self.n_subarrays)
    }

    /// At most one split per leading-drop count, lazily in ascending order.
    /// Roots that are never pulled are never searched.
    pub fn solutions(&self) -> impl Iterator<Item = SplitResult> + '_ {
        let searcher = Searcher::new(&self.counter);
        Searcher::roots(self.root()).filter_map(move |root| {
            let _span =
                tracing::debug_span!("leading_drops", count = root.dropped().len()).entered();
            searcher.descend(root).map(SplitResult::from)
        })
    }

    /// Every split reachable by the search transitions.
    pub fn exhaustive_solutions(&self) -> impl Iterator<Item = SplitResult> + '_ {
        let searcher = Searcher::new(&self.counter);
        Searcher::roots(self.root())
            .flat_map(move |root| searcher.descend_all(root))
            .map(SplitResult::from)
    }

    pub fn search(&self, mode: SearchMode) -> Box<dyn Iterator<Item = SplitResult> + '_> {
        match mode {
            SearchMode::FirstPerRoot => Box::new(self.solutions()),
            SearchMode::Exhaustive => Box::new(self.exhaustive_solutions()),
        }
    }
}

/// One split per leading-drop count that admits one, at most `d + 1`.
pub fn enumerate(
    values: &[i32],
    n_subarrays: usize,
    n_drops: usize,
) -> Result<Vec<SplitResult>, InvalidArgument> {
    let splitter = Splitter::new(values, n_subarrays, n_drops)?;
    let _span =
        tracing::info_span!("split_search", len = values.len(), n_subarrays, n_drops).entered();
    Ok(splitter.solutions().collect())
}

/// The first split [`enumerate`] would return, without searching the
/// remaining roots.
pub fn find_first(
    values: &[i32],
    n_subarrays: usize,
    n_drops: usize,
) -> Result<Option<SplitResult>, InvalidArgument> {
    let splitter = Splitter::new(values, n_subarrays, n_drops)?;
    let _span =
        tracing::info_span!("split_search", len = values.len(), n_subarrays, n_drops).entered();
    let first = splitter.solutions().next();
    Ok(first)
}

/// Every split the search transitions can reach, unbounded by `d + 1`.
pub fn enumerate_exhaustive(
    values: &[i32],
    n_subarrays: usize,
    n_drops: usize,
) -> Result<Vec<SplitResult>, InvalidArgument> {
    let splitter = Splitter::new(values, n_subarrays, n_drops)?;
    let _span =
        tracing::info_span!("split_search", len = values.len(), n_subarrays, n_drops).entered();
    Ok(splitter.exhaustive_solutions().collect())
}
