//! Universal sub-sample interpolation over precomputed filter banks.
//!
//! A bank holds one kernel per fractional offset `i / n`. Queries snap the
//! offset-corrected position to the kernel below it and apply that kernel at
//! the integral part, so evaluation cost is one table lookup plus
//! `filter_order` multiply-adds.
//!
//! Quantization policy:
//! - The kernel index is `floor(frac(x) * n)`, clamped to `[0, n)`.
//! - Positions between grid points use the kernel of the grid point below;
//!   accuracy improves with `n`.
//!
//! Built banks are immutable and `Send + Sync`. [`registry`] keeps lazily
//! built process-wide banks for the common generators.

mod config;
mod interpolator;
mod interpolator2d;
mod oscillation;
pub mod registry;

pub use config::InterpolatorConfig;
pub use interpolator::UniversalInterpolator;
pub use interpolator2d::UniversalInterpolator2D;
pub use oscillation::{OscillatingInterpolator, Oscillation};
