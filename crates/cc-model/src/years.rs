//! Consecutive year sequences used as the model time axis.

use crate::{ModelError, ModelResult};
use std::fmt;

/// Calendar year.
pub type Year = i32;

/// Non-empty run of consecutive years, strictly increasing by one.
///
/// Stored as inclusive bounds; every constructor guarantees `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearSequence {
    start: Year,
    end: Year,
}

impl YearSequence {
    /// Inclusive range `[start, end]`.
    pub fn range(start: Year, end: Year) -> ModelResult<Self> {
        if start > end {
            return Err(ModelError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Validate an explicit list of years.
    pub fn from_years(years: &[Year]) -> ModelResult<Self> {
        let (&first, rest) = years.split_first().ok_or(ModelError::EmptyYears)?;

        let mut previous = first;
        for (offset, &found) in rest.iter().enumerate() {
            if previous.checked_add(1) != Some(found) {
                return Err(ModelError::NonConsecutiveYears {
                    index: offset + 1,
                    previous,
                    found,
                });
            }
            previous = found;
        }

        Ok(Self {
            start: first,
            end: previous,
        })
    }

    pub fn start(&self) -> Year {
        self.start
    }

    pub fn end(&self) -> Year {
        self.end
    }

    pub fn len(&self) -> usize {
        (i64::from(self.end) - i64::from(self.start) + 1) as usize
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Year> + '_ {
        // RangeInclusive<i32> is not ExactSizeIterator, go through positions instead.
        (0..self.len()).map(move |t| (i64::from(self.start) + t as i64) as Year)
    }

    pub fn to_vec(&self) -> Vec<Year> {
        self.iter().collect()
    }
}

impl fmt::Display for YearSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({} years)", self.start, self.end, self.len())
    }
}
