use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{
    error::{self, InvalidArgument},
    prefix::PrefixIndex,
};

/// Inclusive range every group sum of a valid split has to fall into.
///
/// Dropping the `drops` largest values minimizes the equal share, dropping
/// the `drops` smallest maximizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub lower: i64,
    pub upper: i64,
    pub drops: usize,
}

impl Bounds {
    pub fn contains(&self, sum: i64) -> bool {
        (self.lower..=self.upper).contains(&sum)
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }
}

/// Validates the arguments and computes the prefix index together with the
/// [`Bounds`] in one left to right pass.
pub fn calculate(
    values: &[i32],
    n_subarrays: usize,
    n_drops: usize,
) -> Result<(PrefixIndex, Bounds), InvalidArgument> {
    error::validate(values, n_subarrays, n_drops)?;

    let mut prefix = PrefixIndex::with_capacity(values.len());
    // the n_drops largest values seen so far, smallest of them on top
    let mut largest: BinaryHeap<Reverse<i32>> = BinaryHeap::with_capacity(n_drops);
    // the n_drops smallest values seen so far, largest of them on top
    let mut smallest: BinaryHeap<i32> = BinaryHeap::with_capacity(n_drops);

    for &value in values {
        prefix.push(value);

        if largest.len() < n_drops {
            largest.push(Reverse(value));
            smallest.push(value);
            continue;
        }
        if let Some(mut min_of_largest) = largest.peek_mut() {
            if value > min_of_largest.0 {
                *min_of_largest = Reverse(value);
            }
        }
        if let Some(mut max_of_smallest) = smallest.peek_mut() {
            if value < *max_of_smallest {
                *max_of_smallest = value;
            }
        }
    }

    debug_assert!(!prefix.is_empty());
    let total = prefix.total();
    let sum_largest: i64 = largest.iter().map(|Reverse(value)| *value as i64).sum();
    let sum_smallest: i64 = smallest.iter().map(|value| *value as i64).sum();
    let n_subarrays = n_subarrays as i64;

    let bounds = Bounds {
        lower: div_ceil(total - sum_largest, n_subarrays),
        upper: (total - sum_smallest).div_euclid(n_subarrays),
        drops: n_drops,
    };
    tracing::debug!(
        lower = bounds.lower,
        upper = bounds.upper,
        total,
        "calculated target bounds"
    );
    Ok((prefix, bounds))
}

/// `i64::div_ceil` is still unstable for signed integers
fn div_ceil(lhs: i64, rhs: i64) -> i64 {
    debug_assert!(rhs > 0);
    -((-lhs).div_euclid(rhs))
}
