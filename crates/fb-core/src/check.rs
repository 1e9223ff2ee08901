//! Compile-time access check policies.
//!
//! Every owner and view carries a policy type parameter. The policy decides
//! whether `at()` validates the logical index, whether it rejects
//! non-finite values, and which range checker the strided iterators carry.
//! Disabled checks compile away: [`NoRangeCheck`] is zero-sized and the
//! `const` flags fold into dead branches.

use core::fmt::Debug;

/// Validates raw positions visited by strided iterators.
pub trait RangeCheck: Copy + Debug {
    /// Builds a checker accepting raw positions in `[0, extent)`.
    fn new(extent: usize) -> Self;

    fn check(&self, pos: isize);
}

/// Zero-sized checker that accepts everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoRangeCheck;

impl RangeCheck for NoRangeCheck {
    #[inline(always)]
    fn new(_extent: usize) -> Self {
        Self
    }

    #[inline(always)]
    fn check(&self, _pos: isize) {}
}

/// Checker that panics when an iterator steps outside the borrowed extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRangeCheck {
    extent: usize,
}

impl RangeCheck for ActiveRangeCheck {
    #[inline]
    fn new(extent: usize) -> Self {
        Self { extent }
    }

    #[inline]
    fn check(&self, pos: isize) {
        assert!(
            pos >= 0 && (pos as usize) < self.extent,
            "strided iterator position {pos} outside extent {}",
            self.extent
        );
    }
}

#[cfg(debug_assertions)]
pub type DefaultRangeCheck = ActiveRangeCheck;
#[cfg(not(debug_assertions))]
pub type DefaultRangeCheck = NoRangeCheck;

pub trait CheckPolicy: Copy + Debug + Default + 'static {
    const BOUNDS: bool;
    const NUMERIC: bool;
    type Range: RangeCheck;
}

/// No logical checks. Slice indexing still keeps every access memory safe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unchecked;

/// Logical bounds checks on `at()`; iterator checks in debug builds only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundsChecked;

/// Bounds and NaN/Inf checks everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullyChecked;

impl CheckPolicy for Unchecked {
    const BOUNDS: bool = false;
    const NUMERIC: bool = false;
    type Range = NoRangeCheck;
}

impl CheckPolicy for BoundsChecked {
    const BOUNDS: bool = true;
    const NUMERIC: bool = false;
    type Range = DefaultRangeCheck;
}

impl CheckPolicy for FullyChecked {
    const BOUNDS: bool = true;
    const NUMERIC: bool = true;
    type Range = ActiveRangeCheck;
}
