use fb_core::{Error, Result};

use crate::generator::{FilterGenerator, check_offset};
use crate::kernel::FilterKernel;

/// Smoothing B-spline of order 0 to 3.
///
/// Order `k` uses `k + 1` taps. The weights form a partition of unity, so
/// every kernel returns normalizer 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BSpline {
    order: usize,
}

impl BSpline {
    pub fn new(order: usize) -> Result<Self> {
        if order > 3 {
            return Err(Error::construction(format!("B-spline order {order} is not supported")));
        }
        Ok(Self { order })
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

impl FilterGenerator for BSpline {
    type Tap = f64;

    fn filter_order(&self) -> usize {
        self.order + 1
    }

    fn generate_filter(&self, kernel: &mut FilterKernel<f64>, x: f64) -> Result<f64> {
        check_offset(x)?;
        kernel.reset(self.filter_order());
        let w = kernel.taps_mut();
        let t = x;
        match self.order {
            0 => w[0] = 1.0,
            1 => {
                w[0] = 1.0 - t;
                w[1] = t;
            }
            2 => {
                // odd order: the grid offset is centered on the middle tap
                let d = t - 0.5;
                w[0] = 0.5 * (0.5 - d) * (0.5 - d);
                w[1] = 0.75 - d * d;
                w[2] = 0.5 * (0.5 + d) * (0.5 + d);
            }
            _ => {
                let t2 = t * t;
                let t3 = t2 * t;
                let s = 1.0 - t;
                w[0] = s * s * s / 6.0;
                w[1] = (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0;
                w[2] = (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0;
                w[3] = t3 / 6.0;
            }
        }
        Ok(1.0)
    }
}

/// Interpolating spline: linear (order 1) or cubic Catmull-Rom (order 3).
///
/// Kernels at `x = 0` are unit impulses, so the curve passes through the
/// samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ISpline {
    order: usize,
}

impl ISpline {
    pub fn new(order: usize) -> Result<Self> {
        if order != 1 && order != 3 {
            return Err(Error::construction(format!(
                "interpolating spline order {order} is not supported"
            )));
        }
        Ok(Self { order })
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

impl FilterGenerator for ISpline {
    type Tap = f64;

    fn filter_order(&self) -> usize {
        self.order + 1
    }

    fn generate_filter(&self, kernel: &mut FilterKernel<f64>, x: f64) -> Result<f64> {
        check_offset(x)?;
        kernel.reset(self.filter_order());
        let w = kernel.taps_mut();
        let t = x;
        if self.order == 1 {
            w[0] = 1.0 - t;
            w[1] = t;
        } else {
            let t2 = t * t;
            let t3 = t2 * t;
            w[0] = 0.5 * (-t3 + 2.0 * t2 - t);
            w[1] = 0.5 * (3.0 * t3 - 5.0 * t2 + 2.0);
            w[2] = 0.5 * (-3.0 * t3 + 4.0 * t2 + t);
            w[3] = 0.5 * (t3 - t2);
        }
        Ok(1.0)
    }
}

#[cfg(test)]
mod tests {
    use fb_core::Error;

    use super::{BSpline, ISpline};
    use crate::generator::{FilterGenerator, tap_distance};
    use crate::kernel::FilterKernel;

    #[test]
    fn bspline_partition_of_unity() {
        let mut k = FilterKernel::new(0);
        for order in 0..=3 {
            let g = BSpline::new(order).expect("supported order");
            for i in 0..16 {
                let x = i as f64 / 16.0;
                let norm = g.generate_filter(&mut k, x).expect("generate");
                assert_eq!(norm, 1.0);
                assert_eq!(k.order(), order + 1);
                assert!((k.tap_sum() - 1.0).abs() < 1e-12, "order {order} x {x}");
                assert!(k.taps().iter().all(|&w| w >= 0.0));
            }
        }
    }

    #[test]
    fn bspline_reproduces_linear_ramps() {
        // first moment equals the query offset for orders >= 1
        let mut k = FilterKernel::new(0);
        for order in 1..=3 {
            let g = BSpline::new(order).expect("supported order");
            let n = g.filter_order();
            for i in 0..8 {
                let x = i as f64 / 8.0;
                g.generate_filter(&mut k, x).expect("generate");
                let moment: f64 = k
                    .taps()
                    .iter()
                    .enumerate()
                    .map(|(j, &w)| w * tap_distance(n, j, x))
                    .sum();
                assert!(moment.abs() < 1e-12, "order {order} x {x}: {moment}");
            }
        }
    }

    #[test]
    fn cubic_bspline_is_not_interpolating() {
        let g = BSpline::new(3).expect("supported order");
        let mut k = FilterKernel::new(0);
        g.generate_filter(&mut k, 0.0).expect("generate");
        let expected = [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0];
        for (w, e) in k.taps().iter().zip(expected) {
            assert!((w - e).abs() < 1e-15);
        }
    }

    #[test]
    fn ispline_passes_through_samples() {
        for order in [1, 3] {
            let g = ISpline::new(order).expect("supported order");
            let mut k = FilterKernel::new(0);
            g.generate_filter(&mut k, 0.0).expect("generate");
            let origin = k.origin();
            for (j, &w) in k.taps().iter().enumerate() {
                assert_eq!(w, if j == origin { 1.0 } else { 0.0 });
            }

            g.generate_filter(&mut k, 0.3).expect("generate");
            assert!((k.tap_sum() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn unsupported_orders_fail_construction() {
        assert!(matches!(BSpline::new(4), Err(Error::Construction(_))));
        assert!(matches!(ISpline::new(0), Err(Error::Construction(_))));
        assert!(matches!(ISpline::new(2), Err(Error::Construction(_))));
    }

    #[test]
    fn non_finite_offset_rejected() {
        let g = BSpline::new(1).expect("supported order");
        let mut k = FilterKernel::new(0);
        assert!(matches!(
            g.generate_filter(&mut k, f64::NAN),
            Err(Error::InvalidArgument(_))
        ));
    }
}
