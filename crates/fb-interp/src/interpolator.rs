use fb_core::{CheckPolicy, Error, Extrapolation, Result, Scalar, View};
use fb_kernel::{FilterGenerator, FilterKernel, Tap, Weighted};
use tracing::{debug, warn};

use crate::config::InterpolatorConfig;

/// Discretized filter bank for 1D sub-sample evaluation.
///
/// Bank entry `i` holds the kernel for fractional offset `i / n`. Building is
/// done once; afterwards the bank is read-only and can be shared freely.
///
/// Normalization:
/// - every generator call returns a normalizer for its kernel;
/// - every tap of every kernel is divided by the mean of those normalizers.
///
/// Individual kernels may therefore keep a DC gain slightly off 1.
#[derive(Debug, Clone)]
pub struct UniversalInterpolator<K> {
    filters: Vec<FilterKernel<K>>,
    filter_order: usize,
    normalizer: f64,
    offset_correction: f64,
    extrapolation: Extrapolation,
}

impl<K: Tap> Default for UniversalInterpolator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Tap> UniversalInterpolator<K> {
    /// An empty bank; queries fail until [`init_filters`](Self::init_filters).
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            filter_order: 0,
            normalizer: 0.0,
            offset_correction: 0.0,
            extrapolation: Extrapolation::default(),
        }
    }

    pub fn with_config<G>(generator: &G, config: &InterpolatorConfig) -> Result<Self>
    where
        G: FilterGenerator<Tap = K>,
    {
        let mut interp = Self::new();
        interp.extrapolation = config.extrapolation;
        interp.init_filters(config.divisions, generator)?;
        Ok(interp)
    }

    /// Builds `n_divisions` kernels from `generator`.
    ///
    /// On error the previous bank, if any, is kept.
    pub fn init_filters<G>(&mut self, n_divisions: usize, generator: &G) -> Result<()>
    where
        G: FilterGenerator<Tap = K>,
    {
        if n_divisions == 0 {
            return Err(Error::invalid_argument("filter bank needs at least one division"));
        }

        let mut filters = Vec::with_capacity(n_divisions);
        let mut total = 0.0;
        for i in 0..n_divisions {
            let mut kernel = FilterKernel::new(0);
            kernel.set_extrapolation(self.extrapolation);
            let norm = generator.generate_filter(&mut kernel, i as f64 / n_divisions as f64)?;
            if !norm.is_finite() {
                return Err(Error::InvalidNumeric { index: i });
            }
            total += norm;
            filters.push(kernel);
        }

        let normalizer = bank_normalizer(total, n_divisions)?;
        let inv = 1.0 / normalizer;
        for (i, kernel) in filters.iter_mut().enumerate() {
            kernel.scale(inv);
            if !kernel.taps().iter().all(|t| t.is_finite_tap()) {
                return Err(Error::InvalidNumeric { index: i });
            }
        }

        self.filter_order = generator.filter_order();
        self.offset_correction = generator.offset_correction();
        self.normalizer = normalizer;
        self.filters = filters;
        debug!(
            n_divisions,
            filter_order = self.filter_order,
            normalizer,
            offset_correction = self.offset_correction,
            "filter bank built"
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn n_filters(&self) -> usize {
        self.filters.len()
    }

    pub fn filter_order(&self) -> usize {
        self.filter_order
    }

    /// Mean generator normalizer the bank was divided by.
    pub fn normalizer(&self) -> f64 {
        self.normalizer
    }

    pub fn offset_correction(&self) -> f64 {
        self.offset_correction
    }

    pub fn filters(&self) -> &[FilterKernel<K>] {
        &self.filters
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Sets the boundary mode of every kernel, including ones built later.
    pub fn set_extrapolation(&mut self, mode: Extrapolation) {
        self.extrapolation = mode;
        for kernel in &mut self.filters {
            kernel.set_extrapolation(mode);
        }
    }

    pub fn apply_offset_correction(&self, x: &mut f64) {
        *x += self.offset_correction;
    }

    /// Integral base and bank index for query position `x`.
    pub fn locate(&self, x: f64) -> Result<(isize, usize)> {
        if self.filters.is_empty() {
            return Err(Error::NotInitialized);
        }
        let mut pos = x;
        self.apply_offset_correction(&mut pos);
        split_position(pos, self.filters.len())
    }

    /// Offset-corrects `x` in place and returns the kernel to apply at
    /// `floor(x)`.
    pub fn needed_filter(&self, x: &mut f64) -> Result<&FilterKernel<K>> {
        if self.filters.is_empty() {
            return Err(Error::NotInitialized);
        }
        self.apply_offset_correction(x);
        let (_, idx) = split_position(*x, self.filters.len())?;
        Ok(&self.filters[idx])
    }

    /// Value of `signal` at sub-sample position `x`.
    pub fn interpolate<S, C>(
        &self,
        signal: &View<'_, S, C>,
        x: f64,
    ) -> Result<<K as Weighted<S>>::Output>
    where
        K: Weighted<S>,
        S: Scalar,
        C: CheckPolicy,
    {
        let (base, idx) = self.locate(x)?;
        self.filters[idx].apply(signal, base)
    }

    /// [`interpolate`](Self::interpolate) with an explicit boundary mode,
    /// for banks shared read-only.
    pub fn interpolate_with<S, C>(
        &self,
        signal: &View<'_, S, C>,
        x: f64,
        mode: Extrapolation,
    ) -> Result<<K as Weighted<S>>::Output>
    where
        K: Weighted<S>,
        S: Scalar,
        C: CheckPolicy,
    {
        let (base, idx) = self.locate(x)?;
        self.filters[idx].apply_with(signal, base, mode)
    }
}

/// Mean of the per-kernel normalizers; must be finite and non-zero.
pub(crate) fn bank_normalizer(total: f64, count: usize) -> Result<f64> {
    let mean = total / count as f64;
    if !mean.is_finite() || mean == 0.0 {
        return Err(Error::InvalidNumeric { index: count });
    }
    if mean < 0.0 {
        warn!(normalizer = mean, "negative bank normalizer flips the sign of every kernel");
    }
    Ok(mean)
}

/// Splits an offset-corrected position into `(floor, bank index)`.
///
/// The floor must be representable as `isize`. The clamp covers
/// `x - floor(x)` rounding up to exactly 1.0 for tiny negative inputs.
pub(crate) fn split_position(x: f64, n: usize) -> Result<(isize, usize)> {
    if !x.is_finite() {
        return Err(Error::invalid_argument(format!("query position {x} is not finite")));
    }
    let base = x.floor();
    // isize::MAX rounds up to 2^63 as f64; isize::MIN is exact
    if base < isize::MIN as f64 || base >= isize::MAX as f64 {
        return Err(Error::invalid_argument(format!(
            "query position {x} is outside the addressable sample range"
        )));
    }
    let frac = x - base;
    let idx = ((frac * n as f64).floor() as isize).clamp(0, n as isize - 1) as usize;
    Ok((base as isize, idx))
}
