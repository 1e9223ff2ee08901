use fb_core::Result;

use crate::generator::{FilterGenerator, FilterGenerator2D};
use crate::kernel::FilterKernel;
use crate::kernel2d::FilterKernel2D;

/// Outer product of two real 1D generators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separable<GV, GH> {
    vertical: GV,
    horizontal: GH,
}

impl<GV, GH> Separable<GV, GH>
where
    GV: FilterGenerator<Tap = f64>,
    GH: FilterGenerator<Tap = f64>,
{
    pub fn new(vertical: GV, horizontal: GH) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl<G: FilterGenerator<Tap = f64> + Clone> Separable<G, G> {
    /// The same generator on both axes.
    pub fn square(generator: G) -> Self {
        Self::new(generator.clone(), generator)
    }
}

impl<GV, GH> FilterGenerator2D for Separable<GV, GH>
where
    GV: FilterGenerator<Tap = f64>,
    GH: FilterGenerator<Tap = f64>,
{
    type Tap = f64;

    fn filter_order_v(&self) -> usize {
        self.vertical.filter_order()
    }

    fn filter_order_h(&self) -> usize {
        self.horizontal.filter_order()
    }

    fn offset_correction_v(&self) -> f64 {
        self.vertical.offset_correction()
    }

    fn offset_correction_h(&self) -> f64 {
        self.horizontal.offset_correction()
    }

    fn generate_filter(&self, kernel: &mut FilterKernel2D<f64>, v: f64, h: f64) -> Result<f64> {
        let mut kv = FilterKernel::new(0);
        let mut kh = FilterKernel::new(0);
        let norm_v = self.vertical.generate_filter(&mut kv, v)?;
        let norm_h = self.horizontal.generate_filter(&mut kh, h)?;

        kernel.reset(kv.order(), kh.order());
        let cols = kh.order();
        for (idx, w) in kernel.taps_mut().iter_mut().enumerate() {
            *w = kv.taps()[idx / cols] * kh.taps()[idx % cols];
        }
        Ok(norm_v * norm_h)
    }
}
