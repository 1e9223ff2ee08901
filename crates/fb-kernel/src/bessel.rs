use core::f64::consts::{FRAC_1_SQRT_2, PI};

use fb_core::{Error, Result};

use crate::generator::{
    FilterGenerator2D, check_offset, check_sinc_order, strobe, strobe_width, tap_distance,
};
use crate::kernel2d::FilterKernel2D;
use crate::special::{jinc, jinc_derivative};

/// Radius giving the most isotropic Bessel response.
pub const BESSEL_RADIUS_ISOTROPIC: f64 = FRAC_1_SQRT_2;

/// Radius trading some anisotropy for minimal detail loss.
pub const BESSEL_RADIUS_MIN_LOST: f64 = 1.1285;

fn check_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::construction(format!("Bessel radius {radius} must be positive")));
    }
    Ok(())
}

/// Radially symmetric `J1(pi r R) / (pi r R)` kernel on an `N x N` support.
///
/// Gaussian-strobed per axis with the sinc strobe width and cut to zero for
/// `R > N / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bessel {
    order: usize,
    radius: f64,
}

impl Bessel {
    pub fn new(order: usize, radius: f64) -> Result<Self> {
        check_sinc_order("Bessel", order)?;
        check_radius(radius)?;
        Ok(Self { order, radius })
    }

    pub fn isotropic(order: usize) -> Result<Self> {
        Self::new(order, BESSEL_RADIUS_ISOTROPIC)
    }

    pub fn min_lost(order: usize) -> Result<Self> {
        Self::new(order, BESSEL_RADIUS_MIN_LOST)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl FilterGenerator2D for Bessel {
    type Tap = f64;

    fn filter_order_v(&self) -> usize {
        self.order
    }

    fn filter_order_h(&self) -> usize {
        self.order
    }

    fn generate_filter(&self, kernel: &mut FilterKernel2D<f64>, v: f64, h: f64) -> Result<f64> {
        check_offset(v)?;
        check_offset(h)?;
        let n = self.order;
        let a = strobe_width(n);
        let scale = PI * self.radius;
        let cutoff = 0.5 * n as f64;
        kernel.reset(n, n);

        let mut sum = 0.0;
        for (idx, w) in kernel.taps_mut().iter_mut().enumerate() {
            let dv = tap_distance(n, idx / n, v);
            let dh = tap_distance(n, idx % n, h);
            let rho = dv.hypot(dh);
            *w = if rho > cutoff {
                0.0
            } else {
                jinc(scale * rho) * strobe(dv, a) * strobe(dh, a)
            };
            sum += *w;
        }
        Ok(sum)
    }
}

/// Strobe widths for orders 9 to 16.
const DERIVATIVE_STROBE_WIDTH: [f64; 8] = [1.9, 2.1, 2.2, 2.4, 2.5, 2.6, 2.7, 2.8];

/// Slope corrections for orders 9 to 16, relative to `2 / (pi r^2)`.
const DERIVATIVE_NORMALIZER: [f64; 8] = [
    0.98777, 0.99995, 1.00008, 0.99905, 0.99780, 0.99881, 1.00006, 1.00044,
];

pub const MIN_BESSEL_DERIVATIVE_ORDER: usize = 9;
pub const MAX_BESSEL_DERIVATIVE_ORDER: usize = 16;

/// Directional derivative of the strobed Bessel kernel.
///
/// `direction = 0` differentiates along `v`, `pi / 2` along `h`. Kernels are
/// made zero-sum; every kernel reports the same tabulated normalizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BesselDerivative {
    order: usize,
    radius: f64,
    direction: f64,
}

impl BesselDerivative {
    pub fn new(order: usize, radius: f64, direction: f64) -> Result<Self> {
        if !(MIN_BESSEL_DERIVATIVE_ORDER..=MAX_BESSEL_DERIVATIVE_ORDER).contains(&order) {
            return Err(Error::construction(format!(
                "Bessel derivative order {order} outside \
                 {MIN_BESSEL_DERIVATIVE_ORDER}..={MAX_BESSEL_DERIVATIVE_ORDER}"
            )));
        }
        check_radius(radius)?;
        if !direction.is_finite() {
            return Err(Error::construction("derivative direction must be finite"));
        }
        Ok(Self {
            order,
            radius,
            direction,
        })
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    fn strobe_width(&self) -> f64 {
        DERIVATIVE_STROBE_WIDTH[self.order - MIN_BESSEL_DERIVATIVE_ORDER]
    }

    pub fn normalizer(&self) -> f64 {
        DERIVATIVE_NORMALIZER[self.order - MIN_BESSEL_DERIVATIVE_ORDER] * 2.0
            / (PI * self.radius * self.radius)
    }
}

impl FilterGenerator2D for BesselDerivative {
    type Tap = f64;

    fn filter_order_v(&self) -> usize {
        self.order
    }

    fn filter_order_h(&self) -> usize {
        self.order
    }

    fn generate_filter(&self, kernel: &mut FilterKernel2D<f64>, v: f64, h: f64) -> Result<f64> {
        check_offset(v)?;
        check_offset(h)?;
        let n = self.order;
        let a = self.strobe_width();
        let scale = PI * self.radius;
        let cutoff = 0.5 * n as f64;
        let (sin_d, cos_d) = self.direction.sin_cos();
        kernel.reset(n, n);

        let w = kernel.taps_mut();
        for (idx, wk) in w.iter_mut().enumerate() {
            let dv = tap_distance(n, idx / n, v);
            let dh = tap_distance(n, idx % n, h);
            let rho = dv.hypot(dh);
            if rho > cutoff {
                *wk = 0.0;
                continue;
            }

            let g = strobe(dv, a) * strobe(dh, a);
            let f = jinc(scale * rho);
            let radial = if rho > 0.0 {
                scale * jinc_derivative(scale * rho) / rho
            } else {
                0.0
            };
            let k_dv = (radial * dv - 2.0 * dv / (a * a) * f) * g;
            let k_dh = (radial * dh - 2.0 * dh / (a * a) * f) * g;
            // tap distances move opposite to the query
            *wk = -(cos_d * k_dv + sin_d * k_dh);
        }

        let mean = w.iter().sum::<f64>() / w.len() as f64;
        for wk in w.iter_mut() {
            *wk -= mean;
        }
        Ok(self.normalizer())
    }
}

/// `(1 - rho^2)^(nu - 1)` on the disc `rho = R / (N / 2) < 1`.
///
/// The strobe uses the unshrunk sinc radius, which stays positive for every
/// order down to 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuasiSplineIsotropic {
    order: usize,
    nu: f64,
}

impl QuasiSplineIsotropic {
    pub fn new(order: usize, nu: f64) -> Result<Self> {
        if order < 2 {
            return Err(Error::construction(format!("quasi-spline order {order} is below 2")));
        }
        if !nu.is_finite() || nu < 1.0 {
            return Err(Error::construction(format!("quasi-spline exponent {nu} is below 1")));
        }
        Ok(Self { order, nu })
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }
}

impl FilterGenerator2D for QuasiSplineIsotropic {
    type Tap = f64;

    fn filter_order_v(&self) -> usize {
        self.order
    }

    fn filter_order_h(&self) -> usize {
        self.order
    }

    fn generate_filter(&self, kernel: &mut FilterKernel2D<f64>, v: f64, h: f64) -> Result<f64> {
        check_offset(v)?;
        check_offset(h)?;
        let n = self.order;
        let half = 0.5 * n as f64;
        let a = (0.8 + (n as f64 - 1.0) / 20.0) * half;
        kernel.reset(n, n);

        let mut sum = 0.0;
        for (idx, w) in kernel.taps_mut().iter_mut().enumerate() {
            let dv = tap_distance(n, idx / n, v);
            let dh = tap_distance(n, idx % n, h);
            let rho = dv.hypot(dh) / half;
            *w = if rho >= 1.0 {
                0.0
            } else {
                (1.0 - rho * rho).powf(self.nu - 1.0) * strobe(dv, a) * strobe(dh, a)
            };
            sum += *w;
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use fb_core::Error;

    use super::{Bessel, BesselDerivative, QuasiSplineIsotropic};
    use crate::generator::{FilterGenerator2D, tap_distance};
    use crate::kernel2d::FilterKernel2D;

    #[test]
    fn bessel_is_symmetric_and_cut_at_half_support() {
        let g = Bessel::isotropic(8).expect("valid");
        let mut k = FilterKernel2D::new(0, 0);
        let norm = g.generate_filter(&mut k, 0.5, 0.5).expect("generate");

        assert!((norm - k.tap_sum()).abs() < 1e-12);
        for kv in 0..8 {
            for kh in 0..8 {
                assert!((k.tap(kv, kh) - k.tap(kh, kv)).abs() < 1e-12);
                assert!((k.tap(kv, kh) - k.tap(7 - kv, kh)).abs() < 1e-12);
            }
        }

        g.generate_filter(&mut k, 0.0, 0.0).expect("generate");
        // corner tap sits at R = 3 * sqrt(2) > 4
        assert_eq!(k.tap(0, 0), 0.0);
        assert!(k.tap(3, 3) > k.tap(3, 4));
    }

    #[test]
    fn bessel_parameters_validated() {
        assert!(matches!(Bessel::new(5, 0.7), Err(Error::Construction(_))));
        assert!(matches!(Bessel::new(8, 0.0), Err(Error::Construction(_))));
        assert!(matches!(Bessel::new(8, f64::NAN), Err(Error::Construction(_))));
        assert!(Bessel::min_lost(6).is_ok());
    }

    #[test]
    fn bessel_derivative_order_range() {
        for order in [0, 8, 17, 32] {
            assert!(matches!(
                BesselDerivative::new(order, 0.7, 0.0),
                Err(Error::Construction(_))
            ));
        }
        for order in 9..=16 {
            assert!(BesselDerivative::new(order, 0.7, 0.0).is_ok());
        }
        assert!(BesselDerivative::new(9, 0.7, f64::INFINITY).is_err());
    }

    #[test]
    fn bessel_derivative_has_unit_ramp_slope() {
        let r = super::BESSEL_RADIUS_ISOTROPIC;
        for (order, direction) in [(9, 0.0), (12, FRAC_PI_2), (16, 0.3)] {
            let g = BesselDerivative::new(order, r, direction).expect("valid");
            let (s, c) = direction.sin_cos();
            let mut k = FilterKernel2D::new(0, 0);
            for (v, h) in [(0.0, 0.0), (0.25, 0.5), (0.75, 0.25)] {
                let norm = g.generate_filter(&mut k, v, h).expect("generate");
                assert!(k.tap_sum().abs() < 1e-10);

                let mut slope = 0.0;
                for kv in 0..order {
                    for kh in 0..order {
                        let ramp = c * tap_distance(order, kv, v) + s * tap_distance(order, kh, h);
                        slope += k.tap(kv, kh) * ramp;
                    }
                }
                let rel = slope / norm;
                assert!((rel - 1.0).abs() < 5e-3, "order {order}: {rel}");
            }
        }
    }

    #[test]
    fn quasi_spline_is_nonnegative_on_its_disc() {
        assert!(QuasiSplineIsotropic::new(1, 2.0).is_err());
        assert!(QuasiSplineIsotropic::new(4, 0.5).is_err());

        let g = QuasiSplineIsotropic::new(4, 3.0).expect("valid");
        let mut k = FilterKernel2D::new(0, 0);
        let norm = g.generate_filter(&mut k, 0.3, 0.6).expect("generate");
        assert!(norm > 0.0);
        assert!(k.taps().iter().all(|&w| w >= 0.0));
        assert_eq!(k.tap(0, 0), 0.0);
    }
}
