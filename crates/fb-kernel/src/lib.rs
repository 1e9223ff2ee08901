//! FIR kernels and the generators that fill them.
//!
//! Coordinates follow the sample-center convention: `signal[i]` sits at
//! position `i`. A kernel is generated for a fractional offset `x` in
//! `[0, 1)` and later applied at the integral part of a query position.
//!
//! Generators come in two shapes:
//! - [`FilterGenerator`] fills a [`FilterKernel`]: [`BSpline`], [`ISpline`],
//!   [`Sinc`], [`SincDerivative`], [`Hilbert`] and [`ComplexCarrier`].
//! - [`FilterGenerator2D`] fills a [`FilterKernel2D`]: [`Bessel`],
//!   [`BesselDerivative`], [`QuasiSplineIsotropic`], [`Separable`] and
//!   [`ComplexCarrier2D`].
//!
//! Generators return an unscaled kernel and its normalizer; scaling happens
//! once per bank in `fb-interp`.

pub mod bessel;
pub mod carrier;
pub mod generator;
pub mod kernel;
pub mod kernel2d;
pub mod separable;
pub mod sinc;
pub mod special;
pub mod spline;
pub mod tap;

pub use bessel::{
    BESSEL_RADIUS_ISOTROPIC, BESSEL_RADIUS_MIN_LOST, Bessel, BesselDerivative, QuasiSplineIsotropic,
};
pub use carrier::{ComplexCarrier, ComplexCarrier2D, NEGATIVE_CARRIER, POSITIVE_CARRIER};
pub use generator::{
    FilterGenerator, FilterGenerator2D, offset_correction, strobe_width, tap_distance,
};
pub use kernel::FilterKernel;
pub use kernel2d::FilterKernel2D;
pub use separable::Separable;
pub use sinc::{Hilbert, HilbertPart, Sinc, SincDerivative};
pub use spline::{BSpline, ISpline};
pub use tap::{Tap, Weighted};
