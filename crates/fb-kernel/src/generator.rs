//! Filter generator traits and shared tap geometry.
//!
//! A generator is a stateless policy that fills one kernel for a fractional
//! offset `x` in `[0, 1)` and returns that kernel's normalizer. The bank
//! divides every kernel by the mean normalizer, so generators never scale
//! their own output.
//!
//! Geometry shared by every generator: a kernel of order `N` has origin
//! `(N - 1) / 2` and offset correction `0.5` for odd `N` (else `0`). Tap `k`
//! sits at signed distance `(k - origin) - (x - offset_correction)` from the
//! query.

use fb_core::{Error, Result};

use crate::kernel::FilterKernel;
use crate::kernel2d::FilterKernel2D;
use crate::tap::Tap;

pub trait FilterGenerator {
    type Tap: Tap;

    fn filter_order(&self) -> usize;

    fn offset_correction(&self) -> f64 {
        offset_correction(self.filter_order())
    }

    /// Fills `kernel` for fractional offset `x` and returns its normalizer.
    fn generate_filter(&self, kernel: &mut FilterKernel<Self::Tap>, x: f64) -> Result<f64>;
}

pub trait FilterGenerator2D {
    type Tap: Tap;

    fn filter_order_v(&self) -> usize;

    fn filter_order_h(&self) -> usize;

    fn offset_correction_v(&self) -> f64 {
        offset_correction(self.filter_order_v())
    }

    fn offset_correction_h(&self) -> f64 {
        offset_correction(self.filter_order_h())
    }

    fn generate_filter(
        &self,
        kernel: &mut FilterKernel2D<Self::Tap>,
        v: f64,
        h: f64,
    ) -> Result<f64>;
}

pub fn offset_correction(order: usize) -> f64 {
    if order % 2 == 1 { 0.5 } else { 0.0 }
}

pub fn tap_distance(order: usize, k: usize, x: f64) -> f64 {
    let origin = (order.saturating_sub(1) / 2) as f64;
    (k as f64 - origin) - (x - offset_correction(order))
}

/// Gaussian strobe width of the sinc family, in samples.
///
/// The empirical radius `0.8 + (N - 1) / 20` is scaled to the half support
/// and narrowed by `1 - 4 / N`; the result is only positive for `N > 4`.
pub fn strobe_width(order: usize) -> f64 {
    let n = order as f64;
    (0.8 + (n - 1.0) / 20.0) * (n / 2.0) * (1.0 - 4.0 / n)
}

#[inline]
pub(crate) fn strobe(d: f64, width: f64) -> f64 {
    let u = d / width;
    (-u * u).exp()
}

pub(crate) fn check_offset(x: f64) -> Result<()> {
    if !x.is_finite() {
        return Err(Error::invalid_argument(format!("fractional offset {x} is not finite")));
    }
    Ok(())
}

/// Smallest order the sinc family accepts.
pub const MIN_SINC_ORDER: usize = 6;

pub(crate) fn check_sinc_order(name: &str, order: usize) -> Result<()> {
    if order < MIN_SINC_ORDER {
        return Err(Error::construction(format!(
            "{name} order {order} is below {MIN_SINC_ORDER}"
        )));
    }
    Ok(())
}
