use std::iter;

use crate::{
    counter::CandidateCounter,
    division::{Division, Subarray},
};

/// How far a search goes per leading-drop root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Binary searched candidate window, stops at the first success per root.
    #[default]
    FirstPerRoot,
    /// Every admissible end index, every success.
    Exhaustive,
}

/// Branch and bound over [`Division`] transitions.
#[derive(Debug, Clone, Copy)]
pub struct Searcher<'a> {
    counter: &'a CandidateCounter,
}

impl<'a> Searcher<'a> {
    pub fn new(counter: &'a CandidateCounter) -> Self {
        Self { counter }
    }

    /// Roots for `0..=n_drops` leading drops, in that order.
    pub fn roots(root: Division<'a>) -> impl Iterator<Item = Division<'a>> {
        (0..=root.remaining_drops()).map(move |count| root.with_leading_drops(count))
    }

    /// First successful descendant of `state`, scanning candidate end
    /// indices and then following-drop counts in ascending order.
    pub fn descend(&self, state: Division<'a>) -> Option<Division<'a>> {
        if state.is_successful() {
            debug_assert!(state.is_balanced());
            tracing::debug!(target_sum = state.lower_bound(), "found a successful split");
            return Some(state);
        }
        // more subarrays can never succeed
        if state.has_all_subarrays() {
            tracing::trace!(dropped = state.dropped().len(), "all subarrays placed, rolling back");
            return None;
        }

        let frontier = state.frontier();
        let (Some(low), Some(high)) = (state.boundary_index_low(), state.boundary_index_high())
        else {
            tracing::trace!(frontier, "no positions left, rolling back");
            return None;
        };

        if let Some(target) = state.target() {
            if state.prefix().range_sum(frontier, low) != target {
                tracing::debug!(
                    frontier,
                    end = low,
                    target_sum = target,
                    "subarray does not hit the target, rolling back"
                );
                return None;
            }
        }

        let counter = self.counter;
        (low..=high)
            .filter(|&end| state.admits(state.prefix().range_sum(frontier, end)))
            .flat_map(|end| {
                let placed = state.with_next_subarray(Subarray::new(frontier, end));
                following_drop_counts(&placed)
                    .map(move |count| placed.with_following_drops(count, counter))
            })
            .find_map(|child| self.descend(child))
    }

    /// Every successful descendant of `state`, lazily, by ascending end
    /// index and then following-drop count.
    ///
    /// No binary searched window and no short circuit, any end index whose
    /// subarray sum is admissible gets placed.
    pub fn descend_all(self, state: Division<'a>) -> Box<dyn Iterator<Item = Division<'a>> + 'a> {
        if state.is_successful() {
            debug_assert!(state.is_balanced());
            return Box::new(iter::once(state));
        }
        // more subarrays can never succeed
        if state.has_all_subarrays() {
            return Box::new(iter::empty());
        }

        let frontier = state.frontier();
        let counter = self.counter;
        Box::new(
            (frontier..state.input_len())
                .filter_map(move |end| {
                    let sum = state.prefix().range_sum(frontier, end);
                    state
                        .admits(sum)
                        .then(|| state.with_next_subarray(Subarray::new(frontier, end)))
                })
                .flat_map(move |placed| {
                    following_drop_counts(&placed)
                        .map(move |count| placed.with_following_drops(count, counter))
                })
                .flat_map(move |child| self.descend_all(child)),
        )
    }
}

/// Following-drop counts that keep the drops inside the input.
fn following_drop_counts(placed: &Division<'_>) -> std::ops::RangeInclusive<usize> {
    let room = placed.input_len() - placed.frontier();
    0..=placed.remaining_drops().min(room)
}
