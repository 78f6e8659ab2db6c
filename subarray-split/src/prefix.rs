/// Running sums of the input, `sums[i] = values[0] + .. + values[i]`.
///
/// Built once per search and shared by reference with every
/// [`Division`](crate::division::Division), so branching never copies it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrefixIndex {
    sums: Vec<i64>,
}

impl PrefixIndex {
    pub fn new(values: &[i32]) -> Self {
        let mut sums = Vec::with_capacity(values.len());
        let mut running = 0i64;
        for value in values {
            running += *value as i64;
            sums.push(running);
        }
        Self { sums }
    }

    /// Appends the next input value, used by the bound calculator so the
    /// index is filled during its single pass.
    pub(crate) fn push(&mut self, value: i32) {
        let running = self.total() + value as i64;
        self.sums.push(running);
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            sums: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Sum of the whole input, `0` for an empty index.
    pub fn total(&self) -> i64 {
        self.sums.last().copied().unwrap_or(0)
    }

    pub fn get(&self, idx: usize) -> i64 {
        self.sums[idx]
    }

    /// Sum of everything strictly before `idx`, i.e. the offset to subtract
    /// when summing a range that starts at `idx`.
    pub fn sum_before(&self, idx: usize) -> i64 {
        match idx {
            0 => 0,
            _ => self.sums[idx - 1],
        }
    }

    /// Inclusive range sum.
    pub fn range_sum(&self, start: usize, end: usize) -> i64 {
        debug_assert!(start <= end, "range {start}..={end} is inverted");
        self.sums[end] - self.sum_before(start)
    }
}
