use fb_core::{CheckPolicy, Extrapolation, MatrixView, Result, Scalar, map_index};
use num_traits::Zero;

use crate::kernel::{accumulate, window_start};
use crate::tap::{Tap, Weighted};

/// Row-major `order_v x order_h` kernel.
///
/// Tap `(kv, kh)` weighs the sample at
/// `(base_v - origin_v + kv, base_h - origin_h + kh)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterKernel2D<K> {
    order_v: usize,
    order_h: usize,
    taps: Vec<K>,
    extrapolation: Extrapolation,
}

impl<K: Tap> Default for FilterKernel2D<K> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<K: Tap> FilterKernel2D<K> {
    pub fn new(order_v: usize, order_h: usize) -> Self {
        Self {
            order_v,
            order_h,
            taps: vec![K::zero(); order_v * order_h],
            extrapolation: Extrapolation::default(),
        }
    }

    pub fn reset(&mut self, order_v: usize, order_h: usize) {
        self.order_v = order_v;
        self.order_h = order_h;
        self.taps.clear();
        self.taps.resize(order_v * order_h, K::zero());
    }

    pub fn order_v(&self) -> usize {
        self.order_v
    }

    pub fn order_h(&self) -> usize {
        self.order_h
    }

    pub fn origin_v(&self) -> usize {
        self.order_v.saturating_sub(1) / 2
    }

    pub fn origin_h(&self) -> usize {
        self.order_h.saturating_sub(1) / 2
    }

    pub fn tap(&self, kv: usize, kh: usize) -> K {
        assert!(kv < self.order_v && kh < self.order_h, "tap index out of bounds");
        self.taps[kv * self.order_h + kh]
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

    /// Applies the kernel row by row; extrapolation acts on each axis.
    pub fn apply<S, C>(
        &self,
        m: &MatrixView<'_, S, C>,
        base_v: isize,
        base_h: isize,
    ) -> Result<<K as Weighted<S>>::Output>
    where
        K: Weighted<S>,
        S: Scalar,
        C: CheckPolicy,
    {
        self.apply_with(m, base_v, base_h, self.extrapolation)
    }

    pub fn apply_with<S, C>(
        &self,
        m: &MatrixView<'_, S, C>,
        base_v: isize,
        base_h: isize,
        mode: Extrapolation,
    ) -> Result<<K as Weighted<S>>::Output>
    where
        K: Weighted<S>,
        S: Scalar,
        C: CheckPolicy,
    {
        let start_v = window_start(base_v, self.origin_v(), self.order_v)?;
        let start_h = window_start(base_h, self.origin_h(), self.order_h)?;
        let mut acc: <K as Weighted<S>>::Output = Zero::zero();
        if self.order_h == 0 {
            return Ok(acc);
        }

        for (kv, row_taps) in self.taps.chunks_exact(self.order_h).enumerate() {
            let Some(i) = map_index(start_v + kv as isize, m.rows(), mode)? else {
                continue;
            };
            acc += accumulate(row_taps, &m.row(i), start_h, mode)?;
        }
        Ok(acc)
    }
}
