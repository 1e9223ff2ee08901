use core::f64::consts::PI;

use fb_core::{Error, Result};
use num_complex::Complex64;

use crate::generator::{FilterGenerator, FilterGenerator2D};
use crate::kernel::FilterKernel;
use crate::kernel2d::FilterKernel2D;

/// Carrier of a signal oscillating at +1/4 of the sampling rate.
///
/// Carriers are fractions of the Nyquist frequency.
pub const POSITIVE_CARRIER: f64 = 0.5;
/// Carrier of a signal oscillating at -1/4 of the sampling rate.
pub const NEGATIVE_CARRIER: f64 = -0.5;

fn check_carrier(carrier: f64) -> Result<()> {
    if !carrier.is_finite() {
        return Err(Error::construction(format!("carrier {carrier} is not finite")));
    }
    Ok(())
}

fn distance(order: usize, offset_correction: f64, k: usize, x: f64) -> f64 {
    let origin = (order.saturating_sub(1) / 2) as f64;
    (k as f64 - origin) - (x - offset_correction)
}

/// Shifts the passband of a real generator by multiplying every tap with
/// `exp(-i pi carrier d)`, centering it at `carrier / 2` cycles per sample.
///
/// The normalizer of the wrapped generator is kept, so the complex bank has
/// the same gain at the carrier as the real bank at DC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexCarrier<G> {
    inner: G,
    carrier: f64,
}

impl<G: FilterGenerator<Tap = f64>> ComplexCarrier<G> {
    pub fn new(inner: G, carrier: f64) -> Result<Self> {
        check_carrier(carrier)?;
        Ok(Self { inner, carrier })
    }

    pub fn positive(inner: G) -> Self {
        Self {
            inner,
            carrier: POSITIVE_CARRIER,
        }
    }

    pub fn negative(inner: G) -> Self {
        Self {
            inner,
            carrier: NEGATIVE_CARRIER,
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn carrier(&self) -> f64 {
        self.carrier
    }
}

impl<G: FilterGenerator<Tap = f64>> FilterGenerator for ComplexCarrier<G> {
    type Tap = Complex64;

    fn filter_order(&self) -> usize {
        self.inner.filter_order()
    }

    fn offset_correction(&self) -> f64 {
        self.inner.offset_correction()
    }

    fn generate_filter(&self, kernel: &mut FilterKernel<Complex64>, x: f64) -> Result<f64> {
        let mut real = FilterKernel::new(0);
        let norm = self.inner.generate_filter(&mut real, x)?;
        let n = real.order();
        let oc = self.inner.offset_correction();
        kernel.reset(n);

        for (k, (t, &w)) in kernel.taps_mut().iter_mut().zip(real.taps()).enumerate() {
            let d = distance(n, oc, k, x);
            *t = Complex64::cis(-PI * self.carrier * d) * w;
        }
        Ok(norm)
    }
}

/// 2D counterpart of [`ComplexCarrier`] with one carrier per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexCarrier2D<G> {
    inner: G,
    carrier_v: f64,
    carrier_h: f64,
}

impl<G: FilterGenerator2D<Tap = f64>> ComplexCarrier2D<G> {
    pub fn new(inner: G, carrier_v: f64, carrier_h: f64) -> Result<Self> {
        check_carrier(carrier_v)?;
        check_carrier(carrier_h)?;
        Ok(Self {
            inner,
            carrier_v,
            carrier_h,
        })
    }

    pub fn positive(inner: G) -> Self {
        Self {
            inner,
            carrier_v: POSITIVE_CARRIER,
            carrier_h: POSITIVE_CARRIER,
        }
    }

    pub fn negative(inner: G) -> Self {
        Self {
            inner,
            carrier_v: NEGATIVE_CARRIER,
            carrier_h: NEGATIVE_CARRIER,
        }
    }

    pub fn carriers(&self) -> (f64, f64) {
        (self.carrier_v, self.carrier_h)
    }
}

impl<G: FilterGenerator2D<Tap = f64>> FilterGenerator2D for ComplexCarrier2D<G> {
    type Tap = Complex64;

    fn filter_order_v(&self) -> usize {
        self.inner.filter_order_v()
    }

    fn filter_order_h(&self) -> usize {
        self.inner.filter_order_h()
    }

    fn offset_correction_v(&self) -> f64 {
        self.inner.offset_correction_v()
    }

    fn offset_correction_h(&self) -> f64 {
        self.inner.offset_correction_h()
    }

    fn generate_filter(
        &self,
        kernel: &mut FilterKernel2D<Complex64>,
        v: f64,
        h: f64,
    ) -> Result<f64> {
        let mut real = FilterKernel2D::new(0, 0);
        let norm = self.inner.generate_filter(&mut real, v, h)?;
        let (nv, nh) = (real.order_v(), real.order_h());
        let (ocv, och) = (self.offset_correction_v(), self.offset_correction_h());
        kernel.reset(nv, nh);

        for (idx, (t, &w)) in kernel.taps_mut().iter_mut().zip(real.taps()).enumerate() {
            let dv = distance(nv, ocv, idx / nh, v);
            let dh = distance(nh, och, idx % nh, h);
            let phase = -PI * (self.carrier_v * dv + self.carrier_h * dh);
            *t = Complex64::cis(phase) * w;
        }
        Ok(norm)
    }
}
