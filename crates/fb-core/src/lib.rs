//! Strided storage primitives for filter-bank interpolation.
//!
//! Ownership is split the way the borrow checker wants it:
//! - [`Owner`] exclusively owns a reallocatable buffer and carries a logical
//!   `(offset, len, step)` layout on top of it, so reversal is O(1).
//! - [`View`] and [`ViewMut`] borrow any slice (or an owner) with an arbitrary
//!   non-zero step. Negative steps walk backwards; steps above one sub-sample.
//!   Views never allocate and cannot outlive what they borrow.
//! - [`Matrix`] and its views hand out rows and columns as 1D views.
//!
//! Every container takes a [`CheckPolicy`] type parameter. `at()` honours the
//! policy (bounds, bounds plus NaN/Inf) while plain indexing stays memory safe
//! regardless. Reads outside a signal during kernel application are resolved
//! by [`map_index`] with an [`Extrapolation`] mode.

mod check;
mod error;
mod extrapolation;
mod matrix;
mod owner;
mod scalar;
mod view;

pub use check::{
    ActiveRangeCheck, BoundsChecked, CheckPolicy, DefaultRangeCheck, FullyChecked, NoRangeCheck,
    RangeCheck, Unchecked,
};
pub use error::{Error, Result};
pub use extrapolation::{Extrapolation, map_index};
pub use matrix::{Matrix, MatrixView, MatrixViewMut};
pub use owner::Owner;
pub use scalar::Scalar;
pub use view::{StepIter, StepIterMut, View, ViewMut};
