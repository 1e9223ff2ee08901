use core::f64::consts::FRAC_PI_2;

use fb_core::Result;
use serde::{Deserialize, Serialize};

use crate::generator::{
    FilterGenerator, check_offset, check_sinc_order, strobe, strobe_width, tap_distance,
};
use crate::kernel::FilterKernel;
use crate::special::{sinc, sinc_derivative};

/// Raw Gaussian-strobed sinc taps for offset `x`; returns their sum.
///
/// Shared by [`Sinc`] and any separable 2D use so that both see identical
/// raw weights before bank normalization.
pub fn strobed_sinc_taps(order: usize, x: f64, out: &mut [f64]) -> f64 {
    let a = strobe_width(order);
    let mut sum = 0.0;
    for (k, w) in out.iter_mut().enumerate().take(order) {
        let d = tap_distance(order, k, x);
        *w = sinc(d) * strobe(d, a);
        sum += *w;
    }
    sum
}

/// Windowed sinc interpolator of order `N >= 6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sinc {
    order: usize,
}

impl Sinc {
    pub fn new(order: usize) -> Result<Self> {
        check_sinc_order("sinc", order)?;
        Ok(Self { order })
    }
}

impl FilterGenerator for Sinc {
    type Tap = f64;

    fn filter_order(&self) -> usize {
        self.order
    }

    fn generate_filter(&self, kernel: &mut FilterKernel<f64>, x: f64) -> Result<f64> {
        check_offset(x)?;
        kernel.reset(self.order);
        Ok(strobed_sinc_taps(self.order, x, kernel.taps_mut()))
    }
}

/// First derivative of the strobed sinc with respect to the query position.
///
/// Each kernel is made zero-sum so constants differentiate to zero; the
/// normalizer is the first moment, giving unit slope on a ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SincDerivative {
    order: usize,
}

impl SincDerivative {
    pub fn new(order: usize) -> Result<Self> {
        check_sinc_order("sinc derivative", order)?;
        Ok(Self { order })
    }
}

impl FilterGenerator for SincDerivative {
    type Tap = f64;

    fn filter_order(&self) -> usize {
        self.order
    }

    fn generate_filter(&self, kernel: &mut FilterKernel<f64>, x: f64) -> Result<f64> {
        check_offset(x)?;
        let n = self.order;
        let a = strobe_width(n);
        kernel.reset(n);
        let w = kernel.taps_mut();

        // d = k - x, so d/dx = -d/dd
        for (k, wk) in w.iter_mut().enumerate() {
            let d = tap_distance(n, k, x);
            let g = strobe(d, a);
            let dg = -2.0 * d / (a * a) * g;
            *wk = -(sinc_derivative(d) * g + sinc(d) * dg);
        }

        let mean = w.iter().sum::<f64>() / n as f64;
        let mut moment = 0.0;
        for (k, wk) in w.iter_mut().enumerate() {
            *wk -= mean;
            moment += *wk * tap_distance(n, k, x);
        }
        Ok(moment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HilbertPart {
    Real,
    Imaginary,
}

/// One half of an approximate 90-degree phase shifter.
///
/// The strobed `sinc(d / 2)` is modulated by a quarter-rate carrier. The
/// real part passes the signal, the imaginary part returns its quadrature
/// (`cos` in, `sin` out). Both parts report the in-phase tap sum so a pair
/// of banks shares one scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hilbert {
    order: usize,
    part: HilbertPart,
}

impl Hilbert {
    pub fn new(order: usize, part: HilbertPart) -> Result<Self> {
        check_sinc_order("Hilbert", order)?;
        Ok(Self { order, part })
    }

    pub fn part(&self) -> HilbertPart {
        self.part
    }
}

impl FilterGenerator for Hilbert {
    type Tap = f64;

    fn filter_order(&self) -> usize {
        self.order
    }

    fn generate_filter(&self, kernel: &mut FilterKernel<f64>, x: f64) -> Result<f64> {
        check_offset(x)?;
        let n = self.order;
        let a = strobe_width(n);
        kernel.reset(n);

        let mut in_phase = 0.0;
        for (k, wk) in kernel.taps_mut().iter_mut().enumerate() {
            let d = tap_distance(n, k, x);
            let env = sinc(0.5 * d) * strobe(d, a);
            let re = env * (FRAC_PI_2 * d).cos();
            in_phase += re;
            *wk = match self.part {
                HilbertPart::Real => re,
                HilbertPart::Imaginary => -env * (FRAC_PI_2 * d).sin(),
            };
        }
        Ok(in_phase)
    }
}

#[cfg(test)]
mod tests {
    use fb_core::Error;

    use super::{Hilbert, HilbertPart, Sinc, SincDerivative};
    use crate::generator::{FilterGenerator, tap_distance};
    use crate::kernel::FilterKernel;

    #[test]
    fn sinc_is_an_impulse_on_the_grid() {
        let g = Sinc::new(8).expect("valid order");
        let mut k = FilterKernel::new(0);
        let norm = g.generate_filter(&mut k, 0.0).expect("generate");
        assert!((norm - 1.0).abs() < 1e-12);
        for (j, &w) in k.taps().iter().enumerate() {
            let expected = if j == 3 { 1.0 } else { 0.0 };
            assert!((w - expected).abs() < 1e-12, "tap {j}: {w}");
        }
    }

    #[test]
    fn sinc_half_sample_is_symmetric() {
        let g = Sinc::new(8).expect("valid order");
        let mut k = FilterKernel::new(0);
        let norm = g.generate_filter(&mut k, 0.5).expect("generate");
        let t = k.taps();
        for j in 0..4 {
            assert!((t[j] - t[7 - j]).abs() < 1e-12);
        }
        assert!((norm - k.tap_sum()).abs() < 1e-15);
        assert!(norm > 0.9 && norm < 1.1);
    }

    #[test]
    fn small_sinc_orders_rejected() {
        for order in 0..6 {
            assert!(matches!(Sinc::new(order), Err(Error::Construction(_))));
            assert!(matches!(SincDerivative::new(order), Err(Error::Construction(_))));
            assert!(matches!(
                Hilbert::new(order, HilbertPart::Real),
                Err(Error::Construction(_))
            ));
        }
    }

    #[test]
    fn derivative_kernels_are_zero_sum_with_unit_moment() {
        let g = SincDerivative::new(8).expect("valid order");
        let mut k = FilterKernel::new(0);
        for i in 0..10 {
            let x = i as f64 / 10.0;
            let norm = g.generate_filter(&mut k, x).expect("generate");
            assert!(k.tap_sum().abs() < 1e-12);
            let moment: f64 = k
                .taps()
                .iter()
                .enumerate()
                .map(|(j, &w)| w * tap_distance(8, j, x))
                .sum();
            assert!((moment - norm).abs() < 1e-12);
            assert!(norm > 0.8 && norm < 1.2, "x {x}: {norm}");
        }
    }

    #[test]
    fn hilbert_parts_on_the_grid() {
        let mut re = FilterKernel::new(0);
        let mut im = FilterKernel::new(0);
        let n_re = Hilbert::new(8, HilbertPart::Real)
            .expect("valid order")
            .generate_filter(&mut re, 0.0)
            .expect("generate");
        let n_im = Hilbert::new(8, HilbertPart::Imaginary)
            .expect("valid order")
            .generate_filter(&mut im, 0.0)
            .expect("generate");

        assert_eq!(n_re, n_im);
        assert!((n_re - 1.0).abs() < 1e-12);
        // real part is the identity, imaginary part is odd around the origin
        assert!((re.taps()[3] - 1.0).abs() < 1e-12);
        assert!(im.taps()[3].abs() < 1e-12);
        for j in 1..=3 {
            assert!((im.taps()[3 + j] + im.taps()[3 - j]).abs() < 1e-12);
        }
        assert!(im.taps()[2] > 0.0);
    }
}
