use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for one ensemble member.
///
/// - `u32` keeps result rows small
/// - `NonZero` lets single-run rows carry `Option<RunIndex>` at no extra cost
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunIndex(NonZeroU32);

impl RunIndex {
    /// Create a run index from a 0-based draw position by storing index+1.
    ///
    /// Returns `None` only for `u32::MAX`, which has no successor.
    pub fn from_index(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Recover the 0-based draw position.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for RunIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Run({})", self.index())
    }
}

impl fmt::Display for RunIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_index_round_trip() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let run = RunIndex::from_index(i).unwrap();
            assert_eq!(run.index(), i);
        }
    }

    #[test]
    fn run_index_rejects_overflow() {
        assert!(RunIndex::from_index(u32::MAX).is_none());
    }

    #[test]
    fn option_run_index_is_small() {
        assert_eq!(
            core::mem::size_of::<RunIndex>(),
            core::mem::size_of::<Option<RunIndex>>()
        );
    }

    #[test]
    fn run_index_displays_zero_based() {
        let run = RunIndex::from_index(7).unwrap();
        assert_eq!(run.to_string(), "7");
        assert_eq!(format!("{run:?}"), "Run(7)");
    }
}
