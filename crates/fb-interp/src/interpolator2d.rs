use fb_core::{CheckPolicy, Error, Extrapolation, MatrixView, Result, Scalar};
use fb_kernel::{FilterGenerator2D, FilterKernel2D, Tap, Weighted};
use tracing::debug;

use crate::config::InterpolatorConfig;
use crate::interpolator::{bank_normalizer, split_position};

/// Discretized filter bank for 2D sub-sample evaluation.
///
/// Entry `iv * n_h + ih` holds the kernel for offsets `(iv / n_v, ih / n_h)`.
/// Normalization matches [`UniversalInterpolator`](crate::UniversalInterpolator):
/// one mean normalizer over the whole bank.
#[derive(Debug, Clone)]
pub struct UniversalInterpolator2D<K> {
    filters: Vec<FilterKernel2D<K>>,
    n_divisions_v: usize,
    n_divisions_h: usize,
    filter_order_v: usize,
    filter_order_h: usize,
    normalizer: f64,
    offset_correction_v: f64,
    offset_correction_h: f64,
    extrapolation: Extrapolation,
}

impl<K: Tap> Default for UniversalInterpolator2D<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Tap> UniversalInterpolator2D<K> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            n_divisions_v: 0,
            n_divisions_h: 0,
            filter_order_v: 0,
            filter_order_h: 0,
            normalizer: 0.0,
            offset_correction_v: 0.0,
            offset_correction_h: 0.0,
            extrapolation: Extrapolation::default(),
        }
    }

    pub fn with_config<G>(generator: &G, config: &InterpolatorConfig) -> Result<Self>
    where
        G: FilterGenerator2D<Tap = K>,
    {
        let mut interp = Self::new();
        interp.extrapolation = config.extrapolation;
        interp.init_filters(config.divisions, config.divisions_h, generator)?;
        Ok(interp)
    }

    pub fn init_filters<G>(
        &mut self,
        n_divisions_v: usize,
        n_divisions_h: usize,
        generator: &G,
    ) -> Result<()>
    where
        G: FilterGenerator2D<Tap = K>,
    {
        if n_divisions_v == 0 || n_divisions_h == 0 {
            return Err(Error::invalid_argument(format!(
                "filter bank needs at least one division per axis, got {n_divisions_v}x{n_divisions_h}"
            )));
        }

        let count = n_divisions_v * n_divisions_h;
        let mut filters = Vec::with_capacity(count);
        let mut total = 0.0;
        for iv in 0..n_divisions_v {
            let v = iv as f64 / n_divisions_v as f64;
            for ih in 0..n_divisions_h {
                let h = ih as f64 / n_divisions_h as f64;
                let mut kernel = FilterKernel2D::new(0, 0);
                kernel.set_extrapolation(self.extrapolation);
                let norm = generator.generate_filter(&mut kernel, v, h)?;
                if !norm.is_finite() {
                    return Err(Error::InvalidNumeric {
                        index: filters.len(),
                    });
                }
                total += norm;
                filters.push(kernel);
            }
        }

        let normalizer = bank_normalizer(total, count)?;
        let inv = 1.0 / normalizer;
        for (i, kernel) in filters.iter_mut().enumerate() {
            kernel.scale(inv);
            if !kernel.taps().iter().all(|t| t.is_finite_tap()) {
                return Err(Error::InvalidNumeric { index: i });
            }
        }

        self.n_divisions_v = n_divisions_v;
        self.n_divisions_h = n_divisions_h;
        self.filter_order_v = generator.filter_order_v();
        self.filter_order_h = generator.filter_order_h();
        self.offset_correction_v = generator.offset_correction_v();
        self.offset_correction_h = generator.offset_correction_h();
        self.normalizer = normalizer;
        self.filters = filters;
        debug!(
            n_divisions_v,
            n_divisions_h,
            filter_order_v = self.filter_order_v,
            filter_order_h = self.filter_order_h,
            normalizer,
            "2D filter bank built"
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn n_filters(&self) -> usize {
        self.filters.len()
    }

    pub fn n_divisions(&self) -> (usize, usize) {
        (self.n_divisions_v, self.n_divisions_h)
    }

    pub fn filter_order(&self) -> (usize, usize) {
        (self.filter_order_v, self.filter_order_h)
    }

    pub fn normalizer(&self) -> f64 {
        self.normalizer
    }

    pub fn offset_correction(&self) -> (f64, f64) {
        (self.offset_correction_v, self.offset_correction_h)
    }

    pub fn filters(&self) -> &[FilterKernel2D<K>] {
        &self.filters
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    pub fn set_extrapolation(&mut self, mode: Extrapolation) {
        self.extrapolation = mode;
        for kernel in &mut self.filters {
            kernel.set_extrapolation(mode);
        }
    }

    pub fn apply_offset_correction(&self, v: &mut f64, h: &mut f64) {
        *v += self.offset_correction_v;
        *h += self.offset_correction_h;
    }

    /// Integral bases and bank index for query `(v, h)`.
    pub fn locate(&self, v: f64, h: f64) -> Result<(isize, isize, usize)> {
        if self.filters.is_empty() {
            return Err(Error::NotInitialized);
        }
        let (mut v, mut h) = (v, h);
        self.apply_offset_correction(&mut v, &mut h);
        let (base_v, iv) = split_position(v, self.n_divisions_v)?;
        let (base_h, ih) = split_position(h, self.n_divisions_h)?;
        Ok((base_v, base_h, iv * self.n_divisions_h + ih))
    }

    pub fn needed_filter(&self, v: &mut f64, h: &mut f64) -> Result<&FilterKernel2D<K>> {
        if self.filters.is_empty() {
            return Err(Error::NotInitialized);
        }
        self.apply_offset_correction(v, h);
        let (_, iv) = split_position(*v, self.n_divisions_v)?;
        let (_, ih) = split_position(*h, self.n_divisions_h)?;
        Ok(&self.filters[iv * self.n_divisions_h + ih])
    }

    /// Value of `m` at sub-sample position `(v, h)` (row, column).
    pub fn interpolate<S, C>(
        &self,
        m: &MatrixView<'_, S, C>,
        v: f64,
        h: f64,
    ) -> Result<<K as Weighted<S>>::Output>
    where
        K: Weighted<S>,
        S: Scalar,
        C: CheckPolicy,
    {
        let (base_v, base_h, idx) = self.locate(v, h)?;
        self.filters[idx].apply(m, base_v, base_h)
    }

    pub fn interpolate_with<S, C>(
        &self,
        m: &MatrixView<'_, S, C>,
        v: f64,
        h: f64,
        mode: Extrapolation,
    ) -> Result<<K as Weighted<S>>::Output>
    where
        K: Weighted<S>,
        S: Scalar,
        C: CheckPolicy,
    {
        let (base_v, base_h, idx) = self.locate(v, h)?;
        self.filters[idx].apply_with(m, base_v, base_h, mode)
    }
}
