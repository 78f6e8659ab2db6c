use std::fmt;

/// Rejected search arguments. Returned before any search state exists;
/// not finding a split is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    EmptyInput,
    NoSubarrays,
    TooManyDrops { drops: usize, len: usize },
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "input sequence is empty"),
            Self::NoSubarrays => write!(f, "number of subarrays must be at least 1"),
            Self::TooManyDrops { drops, len } => write!(
                f,
                "cannot drop {drops} elements from a sequence of length {len}"
            ),
        }
    }
}

impl std::error::Error for InvalidArgument {}

pub(crate) fn validate(
    values: &[i32],
    n_subarrays: usize,
    n_drops: usize,
) -> Result<(), InvalidArgument> {
    if values.is_empty() {
        return Err(InvalidArgument::EmptyInput);
    }
    if n_subarrays == 0 {
        return Err(InvalidArgument::NoSubarrays);
    }
    if n_drops >= values.len() {
        return Err(InvalidArgument::TooManyDrops {
            drops: n_drops,
            len: values.len(),
        });
    }
    Ok(())
}
