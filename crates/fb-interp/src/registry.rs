//! Process-wide banks for the common generators.
//!
//! Each bank is built on first access and then shared read-only by every
//! thread. A construction failure is cached too, and handed out (cloned) on
//! every later call. Banks use the default [`fb_core::Extrapolation`]; callers that
//! need another boundary mode use `interpolate_with` or clone the bank.

use std::sync::OnceLock;

use fb_core::Result;
use fb_kernel::{
    BSpline, Bessel, FilterGenerator, FilterGenerator2D, ISpline, Sinc, SincDerivative,
};
use tracing::debug;

use crate::interpolator::UniversalInterpolator;
use crate::interpolator2d::UniversalInterpolator2D;
use crate::oscillation::OscillatingInterpolator;

/// Kernels per unit offset in the shared 1D banks.
pub const REGISTRY_DIVISIONS: usize = 128;

/// Kernels per unit offset and axis in the shared 2D banks.
pub const REGISTRY_DIVISIONS_2D: usize = 32;

type Bank = UniversalInterpolator<f64>;

static SINC8: OnceLock<Result<Bank>> = OnceLock::new();
static SINC_DERIVATIVE8: OnceLock<Result<Bank>> = OnceLock::new();
static BSPLINE3: OnceLock<Result<Bank>> = OnceLock::new();
static ISPLINE3: OnceLock<Result<Bank>> = OnceLock::new();
static COMPLEX_SINC8: OnceLock<Result<OscillatingInterpolator>> = OnceLock::new();
static BESSEL_ISOTROPIC8: OnceLock<Result<UniversalInterpolator2D<f64>>> = OnceLock::new();

fn cached<T>(
    cell: &'static OnceLock<Result<T>>,
    init: impl FnOnce() -> Result<T>,
) -> Result<&'static T> {
    match cell.get_or_init(init) {
        Ok(bank) => Ok(bank),
        Err(err) => Err(err.clone()),
    }
}

fn build<G: FilterGenerator<Tap = f64>>(name: &str, generator: Result<G>) -> Result<Bank> {
    let mut bank = Bank::new();
    bank.init_filters(REGISTRY_DIVISIONS, &generator?)?;
    debug!(bank = name, divisions = REGISTRY_DIVISIONS, "registry bank initialized");
    Ok(bank)
}

/// Order-8 windowed sinc.
pub fn sinc8() -> Result<&'static UniversalInterpolator<f64>> {
    cached(&SINC8, || build("sinc8", Sinc::new(8)))
}

/// Order-8 sinc derivative (unit slope on ramps).
pub fn sinc_derivative8() -> Result<&'static UniversalInterpolator<f64>> {
    cached(&SINC_DERIVATIVE8, || build("sinc_derivative8", SincDerivative::new(8)))
}

/// Cubic smoothing B-spline.
pub fn bspline3() -> Result<&'static UniversalInterpolator<f64>> {
    cached(&BSPLINE3, || build("bspline3", BSpline::new(3)))
}

/// Cubic interpolating spline.
pub fn ispline3() -> Result<&'static UniversalInterpolator<f64>> {
    cached(&ISPLINE3, || build("ispline3", ISpline::new(3)))
}

/// Order-8 sinc for complex signals, all three oscillations.
pub fn complex_sinc8() -> Result<&'static OscillatingInterpolator> {
    cached(&COMPLEX_SINC8, || {
        let mut interp = OscillatingInterpolator::new();
        interp.init_filters(REGISTRY_DIVISIONS, &Sinc::new(8)?)?;
        debug!(
            bank = "complex_sinc8",
            divisions = REGISTRY_DIVISIONS,
            "registry bank initialized"
        );
        Ok(interp)
    })
}

/// Order-8 isotropic Bessel kernel on a `32 x 32` offset grid.
pub fn bessel_isotropic8() -> Result<&'static UniversalInterpolator2D<f64>> {
    cached(&BESSEL_ISOTROPIC8, || {
        let generator = Bessel::isotropic(8)?;
        let mut bank = UniversalInterpolator2D::new();
        bank.init_filters(REGISTRY_DIVISIONS_2D, REGISTRY_DIVISIONS_2D, &generator)?;
        debug!(
            bank = "bessel_isotropic8",
            divisions = REGISTRY_DIVISIONS_2D,
            order = generator.filter_order_v(),
            "registry bank initialized"
        );
        Ok(bank)
    })
}
