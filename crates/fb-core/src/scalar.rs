use num_complex::Complex;

/// Element capability used by the checked accessors.
///
/// Integer types are always finite; floating types report NaN and
/// infinities so that [`FullyChecked`](crate::FullyChecked) containers can
/// reject them on access.
pub trait Scalar: Copy {
    fn is_finite_value(&self) -> bool;
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {
        $(impl Scalar for $t {
            #[inline]
            fn is_finite_value(&self) -> bool {
                true
            }
        })*
    };
}

impl_scalar_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Scalar for f32 {
    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl Scalar for f64 {
    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl Scalar for Complex<f32> {
    #[inline]
    fn is_finite_value(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Scalar for Complex<f64> {
    #[inline]
    fn is_finite_value(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}
