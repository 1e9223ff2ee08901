use core::fmt::Debug;
use core::ops::AddAssign;

use num_complex::{Complex32, Complex64};
use num_traits::Zero;

/// Element type of a kernel tap.
pub trait Tap: Copy + Debug + PartialEq + Zero + AddAssign + Send + Sync + 'static {
    fn scale(self, factor: f64) -> Self;

    fn is_finite_tap(self) -> bool;
}

impl Tap for f64 {
    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    #[inline]
    fn is_finite_tap(self) -> bool {
        self.is_finite()
    }
}

impl Tap for Complex64 {
    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    #[inline]
    fn is_finite_tap(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

/// A tap that can weigh samples of type `S`.
///
/// Real taps on real samples accumulate in `f64`. A complex tap or a
/// complex sample promotes the accumulator to `Complex64`.
pub trait Weighted<S>: Tap {
    type Output: Copy + Debug + Zero + AddAssign;

    fn weigh(self, sample: S) -> <Self as Weighted<S>>::Output;
}

macro_rules! impl_weighted {
    ($tap:ty, $sample:ty => $out:ty, |$t:ident, $s:ident| $body:expr) => {
        impl Weighted<$sample> for $tap {
            type Output = $out;

            #[inline(always)]
            fn weigh(self, $s: $sample) -> $out {
                let $t = self;
                $body
            }
        }
    };
}

#[inline(always)]
fn widen(s: Complex32) -> Complex64 {
    Complex64::new(s.re as f64, s.im as f64)
}

impl_weighted!(f64, f32 => f64, |t, s| t * s as f64);
impl_weighted!(f64, f64 => f64, |t, s| t * s);
impl_weighted!(f64, Complex32 => Complex64, |t, s| widen(s) * t);
impl_weighted!(f64, Complex64 => Complex64, |t, s| s * t);
impl_weighted!(Complex64, f32 => Complex64, |t, s| t * s as f64);
impl_weighted!(Complex64, f64 => Complex64, |t, s| t * s);
impl_weighted!(Complex64, Complex32 => Complex64, |t, s| t * widen(s));
impl_weighted!(Complex64, Complex64 => Complex64, |t, s| t * s);

#[cfg(test)]
mod tests {
    use num_complex::{Complex32, Complex64};

    use super::{Tap, Weighted};

    #[test]
    fn promotion_rules() {
        let r: f64 = 0.5f64.weigh(3.0f32);
        assert_eq!(r, 1.5);

        let c: Complex64 = 2.0f64.weigh(Complex32::new(1.0, -1.0));
        assert_eq!(c, Complex64::new(2.0, -2.0));

        let i = Complex64::new(0.0, 1.0);
        assert_eq!(i.weigh(i), Complex64::new(-1.0, 0.0));
        assert_eq!(i.weigh(2.0f64), Complex64::new(0.0, 2.0));
    }

    #[test]
    fn scale_and_finiteness() {
        assert_eq!(Complex64::new(1.0, 2.0).scale(0.5), Complex64::new(0.5, 1.0));
        assert!(!Complex64::new(f64::NAN, 0.0).is_finite_tap());
        assert!(1.0f64.is_finite_tap());
    }
}
