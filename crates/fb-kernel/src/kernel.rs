use fb_core::{CheckPolicy, Error, Extrapolation, Result, Scalar, View, map_index};
use num_traits::Zero;

use crate::tap::{Tap, Weighted};

/// One discretized FIR kernel.
///
/// Tap `k` weighs the sample at `base - origin + k`, where `base` is the
/// integral part of the (offset-corrected) query position and
/// `origin = (order - 1) / 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterKernel<K> {
    taps: Vec<K>,
    extrapolation: Extrapolation,
}

impl<K: Tap> Default for FilterKernel<K> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K: Tap> FilterKernel<K> {
    pub fn new(order: usize) -> Self {
        Self {
            taps: vec![K::zero(); order],
            extrapolation: Extrapolation::default(),
        }
    }

    pub fn from_taps(taps: Vec<K>) -> Self {
        Self {
            taps,
            extrapolation: Extrapolation::default(),
        }
    }

    /// Resizes to `order` zero taps, keeping the extrapolation mode.
    pub fn reset(&mut self, order: usize) {
        self.taps.clear();
        self.taps.resize(order, K::zero());
    }

    pub fn order(&self) -> usize {
        self.taps.len()
    }

    pub fn origin(&self) -> usize {
        self.taps.len().saturating_sub(1) / 2
    }

    pub fn taps(&self) -> &[K] {
        &self.taps
    }

    pub fn taps_mut(&mut self) -> &mut [K] {
        &mut self.taps
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    pub fn set_extrapolation(&mut self, mode: Extrapolation) {
        self.extrapolation = mode;
    }

    pub fn scale(&mut self, factor: f64) {
        for t in &mut self.taps {
            *t = t.scale(factor);
        }
    }

    pub fn tap_sum(&self) -> K {
        self.taps.iter().fold(K::zero(), |mut acc, &t| {
            acc += t;
            acc
        })
    }

    /// Dot product of the taps with the samples around `base`.
    pub fn apply<S, C>(
        &self,
        signal: &View<'_, S, C>,
        base: isize,
    ) -> Result<<K as Weighted<S>>::Output>
    where
        K: Weighted<S>,
        S: Scalar,
        C: CheckPolicy,
    {
        self.apply_with(signal, base, self.extrapolation)
    }

    /// [`apply`](Self::apply) with an explicit mode, for shared kernels.
    pub fn apply_with<S, C>(
        &self,
        signal: &View<'_, S, C>,
        base: isize,
        mode: Extrapolation,
    ) -> Result<<K as Weighted<S>>::Output>
    where
        K: Weighted<S>,
        S: Scalar,
        C: CheckPolicy,
    {
        let start = window_start(base, self.origin(), self.order())?;
        accumulate(&self.taps, signal, start, mode)
    }
}

/// First sample index of an `order`-tap window around `base`.
///
/// Fails when any index of the window would not fit in `isize`.
pub(crate) fn window_start(base: isize, origin: usize, order: usize) -> Result<isize> {
    let start = isize::try_from(origin)
        .ok()
        .and_then(|o| base.checked_sub(o));
    match start {
        Some(s) if isize::try_from(order).is_ok_and(|n| s.checked_add(n).is_some()) => Ok(s),
        _ => Err(Error::invalid_argument(format!(
            "kernel window of {order} taps at {base} leaves the index range"
        ))),
    }
}

/// Weighs `signal[start + k]` by `taps[k]`.
///
/// Windows fully inside the signal take the strided fast path; any other
/// window resolves every index through `mode`.
pub(crate) fn accumulate<K, S, C>(
    taps: &[K],
    signal: &View<'_, S, C>,
    start: isize,
    mode: Extrapolation,
) -> Result<<K as Weighted<S>>::Output>
where
    K: Weighted<S>,
    S: Scalar,
    C: CheckPolicy,
{
    let len = signal.len();
    let n = taps.len();
    let mut acc: <K as Weighted<S>>::Output = Zero::zero();

    if start >= 0 && start as usize + n <= len {
        let start = start as usize;
        if C::NUMERIC {
            for (k, &tap) in taps.iter().enumerate() {
                acc += tap.weigh(*signal.at(start + k)?);
            }
        } else {
            let window = signal.window(start, n)?;
            for (&tap, &s) in taps.iter().zip(window.iter()) {
                acc += tap.weigh(s);
            }
        }
        return Ok(acc);
    }

    for (k, &tap) in taps.iter().enumerate() {
        if let Some(idx) = map_index(start + k as isize, len, mode)? {
            acc += tap.weigh(*signal.at(idx)?);
        }
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use fb_core::{Error, Extrapolation, FullyChecked, View};
    use num_complex::{Complex32, Complex64};

    use super::FilterKernel;

    fn box3() -> FilterKernel<f64> {
        FilterKernel::from_taps(vec![1.0, 10.0, 100.0])
    }

    #[test]
    fn interior_window_is_centered_on_origin() {
        let data = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        let signal: View<'_, f64> = View::from_slice(&data);
        let k = box3();

        assert_eq!(k.origin(), 1);
        // taps on samples 1, 2, 3
        assert_eq!(k.apply(&signal, 2), Ok(2.0 + 30.0 + 400.0));
    }

    #[test]
    fn boundary_modes() {
        let data = [1.0f32, 2.0, 3.0];
        let signal: View<'_, f32> = View::from_slice(&data);
        let mut k = box3();

        k.set_extrapolation(Extrapolation::ByLastValue);
        assert_eq!(k.apply(&signal, 0), Ok(1.0 + 10.0 + 200.0));

        k.set_extrapolation(Extrapolation::ByZero);
        assert_eq!(k.apply(&signal, 0), Ok(10.0 + 200.0));

        k.set_extrapolation(Extrapolation::Cyclic);
        assert_eq!(k.apply(&signal, 2), Ok(2.0 + 30.0 + 100.0));

        k.set_extrapolation(Extrapolation::None);
        assert_eq!(
            k.apply(&signal, 2),
            Err(Error::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(k.apply_with(&signal, 2, Extrapolation::ByZero), Ok(2.0 + 30.0));
    }

    #[test]
    fn strided_and_reversed_signals() {
        let data = [0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let evens: View<'_, f64> = View::from_strided(&data, 4, 2).expect("valid layout");
        let k = box3();
        assert_eq!(k.apply(&evens, 1), Ok(0.0 + 20.0 + 400.0));

        let rev = evens.reversed();
        assert_eq!(k.apply(&rev, 1), Ok(6.0 + 40.0 + 200.0));
    }

    #[test]
    fn complex_promotion() {
        let data = [Complex32::new(1.0, 1.0), Complex32::new(0.0, 2.0)];
        let signal: View<'_, Complex32> = View::from_slice(&data);
        let k = FilterKernel::from_taps(vec![0.5f64, 0.5]);
        let out: Complex64 = k.apply(&signal, 0).expect("in range");
        assert_eq!(out, Complex64::new(0.5, 1.5));

        let ck = FilterKernel::from_taps(vec![Complex64::new(0.0, 1.0)]);
        let real = [2.0f64];
        let signal: View<'_, f64> = View::from_slice(&real);
        assert_eq!(ck.apply(&signal, 0), Ok(Complex64::new(0.0, 2.0)));
    }

    #[test]
    fn fully_checked_signal_rejects_nan() {
        let data = [1.0f64, f64::NAN, 3.0, 4.0];
        let signal: View<'_, f64, FullyChecked> = View::from_slice(&data);
        let k = box3();
        assert_eq!(k.apply(&signal, 1), Err(Error::InvalidNumeric { index: 1 }));
        // boundary path checks too
        assert_eq!(k.apply(&signal, 0), Err(Error::InvalidNumeric { index: 1 }));
    }

    #[test]
    fn windows_at_the_ends_of_the_index_range() {
        let data = [1.0f64, 2.0, 3.0];
        let signal: View<'_, f64> = View::from_slice(&data);
        let k = box3();

        assert!(matches!(k.apply(&signal, isize::MIN), Err(Error::InvalidArgument(_))));
        assert!(matches!(k.apply(&signal, isize::MAX), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            k.apply(&signal, isize::MAX - 1),
            Err(Error::InvalidArgument(_))
        ));
        // last window that still fits
        assert_eq!(k.apply(&signal, isize::MAX - 2), Ok(333.0));
        assert_eq!(k.apply(&signal, isize::MIN + 1), Ok(111.0));
        assert_eq!(
            k.apply_with(&signal, isize::MIN + 1, Extrapolation::ByZero),
            Ok(0.0)
        );
    }

    #[test]
    fn reset_keeps_extrapolation_and_scale() {
        let mut k = box3();
        k.set_extrapolation(Extrapolation::Cyclic);
        k.scale(0.5);
        assert_eq!(k.tap_sum(), 55.5);
        k.reset(4);
        assert_eq!(k.order(), 4);
        assert_eq!(k.origin(), 1);
        assert_eq!(k.extrapolation(), Extrapolation::Cyclic);
        assert!(k.taps().iter().all(|&t| t == 0.0));
    }
}
