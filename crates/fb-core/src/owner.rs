use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use crate::check::{BoundsChecked, CheckPolicy};
use crate::error::{Error, Result};
use crate::scalar::Scalar;
use crate::view::{StepIter, StepIterMut, View, ViewMut};

/// Exclusively owning strided buffer.
///
/// The buffer is contiguous; the logical layout on top of it (`offset`,
/// `len`, `step`) lets [`Owner::reverse`] run in O(1). The empty state has
/// `len == 0` and `step == 0`. Borrowing views are obtained with
/// [`Owner::view`] and friends and cannot outlive the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Owner<T, C = BoundsChecked> {
    data: Vec<T>,
    offset: usize,
    len: usize,
    step: isize,
    _checks: PhantomData<C>,
}

impl<T, C: CheckPolicy> Default for Owner<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: CheckPolicy> Owner<T, C> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            offset: 0,
            len: 0,
            step: 0,
            _checks: PhantomData,
        }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        let len = data.len();
        Self {
            data,
            offset: 0,
            len,
            step: if len == 0 { 0 } else { 1 },
            _checks: PhantomData,
        }
    }

    pub fn with_len(n: usize) -> Result<Self>
    where
        T: Default + Clone,
    {
        let mut owner = Self::new();
        owner.realloc(n)?;
        Ok(owner)
    }

    pub fn filled(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_vec(vec![value; n])
    }

    /// Destructive resize to `n` default elements.
    ///
    /// Same-size calls keep the current buffer and contents. On allocation
    /// failure the owner is left empty.
    pub fn realloc(&mut self, n: usize) -> Result<()>
    where
        T: Default + Clone,
    {
        if n == self.len && (n == 0 || self.step != 0) {
            return Ok(());
        }

        self.clear();
        let mut data = Vec::new();
        if data.try_reserve_exact(n).is_err() {
            return Err(Error::Allocation { requested: n });
        }
        data.resize(n, T::default());
        *self = Self::from_vec(data);
        Ok(())
    }

    /// Releases the buffer and returns to the empty state.
    pub fn clear(&mut self) {
        self.data = Vec::new();
        self.offset = 0;
        self.len = 0;
        self.step = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn step(&self) -> isize {
        self.step
    }

    pub fn view(&self) -> View<'_, T, C> {
        View::from_validated(&self.data, self.offset, self.len, self.step)
    }

    pub fn view_mut(&mut self) -> ViewMut<'_, T, C> {
        ViewMut::from_validated_mut(&mut self.data, self.offset, self.len, self.step)
    }

    pub fn fragment(&self, from: usize, to: usize, step: isize) -> Result<View<'_, T, C>> {
        self.view().fragment(from, to, step)
    }

    pub fn fragment_mut(
        &mut self,
        from: usize,
        to: usize,
        step: isize,
    ) -> Result<ViewMut<'_, T, C>> {
        let (offset, len, step) = {
            let frag = self.view().fragment(from, to, step)?;
            (frag.base_offset(), frag.len(), frag.step())
        };
        Ok(ViewMut::from_validated_mut(&mut self.data, offset, len, step))
    }

    /// O(1) logical reversal; see [`View::reverse`].
    pub fn reverse(&mut self) {
        let (offset, step) = {
            let v = self.view().reversed();
            (v.base_offset(), v.step())
        };
        self.offset = offset;
        self.step = step;
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.view().get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        if i >= self.len {
            return None;
        }
        let idx = (self.offset as isize + i as isize * self.step) as usize;
        self.data.get_mut(idx)
    }

    pub fn at(&self, i: usize) -> Result<&T>
    where
        T: Scalar,
    {
        self.view().at(i)
    }

    pub fn at_mut(&mut self, i: usize) -> Result<&mut T> {
        if C::BOUNDS && i >= self.len {
            return Err(Error::OutOfRange {
                index: i as isize,
                len: self.len,
            });
        }
        let idx = (self.offset as isize).wrapping_add((i as isize).wrapping_mul(self.step));
        Ok(&mut self.data[idx as usize])
    }

    pub fn iter(&self) -> StepIter<'_, T, C::Range> {
        self.view().iter()
    }

    pub fn iter_mut(&mut self) -> StepIterMut<'_, T, C::Range> {
        self.view_mut().into_iter_mut()
    }

    /// Contiguous ascending storage, if the owner is not reversed.
    pub fn as_slice(&self) -> Option<&[T]> {
        self.view().as_contiguous_slice()
    }

    /// Elements in logical order.
    pub fn into_vec(mut self) -> Vec<T> {
        if self.step < 0 {
            self.data.reverse();
        }
        self.data
    }
}

impl<T, C: CheckPolicy> Index<usize> for Owner<T, C> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        if C::BOUNDS {
            assert!(i < self.len, "index {i} out of range for length {}", self.len);
        }
        let idx = (self.offset as isize).wrapping_add((i as isize).wrapping_mul(self.step));
        &self.data[idx as usize]
    }
}

impl<T, C: CheckPolicy> IndexMut<usize> for Owner<T, C> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        if C::BOUNDS {
            assert!(i < self.len, "index {i} out of range for length {}", self.len);
        }
        let idx = (self.offset as isize).wrapping_add((i as isize).wrapping_mul(self.step));
        &mut self.data[idx as usize]
    }
}

impl<T, C: CheckPolicy> From<Vec<T>> for Owner<T, C> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

#[cfg(test)]
mod tests {
    use super::Owner;
    use crate::check::FullyChecked;
    use crate::error::Error;

    #[test]
    fn realloc_same_size_keeps_contents() {
        let mut o: Owner<f64> = Owner::from_vec(vec![1.0, 2.0, 3.0]);
        o.realloc(3).expect("same size");
        assert_eq!(o.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);

        o.realloc(4).expect("resize");
        assert_eq!(o.len(), 4);
        assert_eq!(o.step(), 1);
        assert!(o.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_owner_state() {
        let mut o: Owner<i32> = Owner::new();
        assert!(o.is_empty());
        assert_eq!(o.step(), 0);
        o.realloc(0).expect("no-op");
        assert_eq!(o.step(), 0);
        assert_eq!(o.at(0), Err(Error::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn reverse_is_o1_and_involutive() {
        let mut o: Owner<i32> = Owner::from_vec(vec![1, 2, 3, 4]);
        o.reverse();
        assert_eq!(o.step(), -1);
        assert_eq!(o[0], 4);
        assert_eq!(o.as_slice(), None);
        o.reverse();
        assert_eq!(o.step(), 1);
        assert_eq!(o.as_slice(), Some(&[1, 2, 3, 4][..]));
    }

    #[test]
    fn reversed_owner_into_vec_keeps_logical_order() {
        let mut o: Owner<i32> = Owner::from_vec(vec![1, 2, 3]);
        o.reverse();
        assert_eq!(o.into_vec(), vec![3, 2, 1]);
    }

    #[test]
    fn fragment_of_owner_aliases_data() {
        let mut o: Owner<i32> = Owner::from_vec((0..10).collect());
        {
            let mut f = o.fragment_mut(2, 8, 2).expect("valid fragment");
            f.fill(-1);
        }
        assert_eq!(o.into_vec(), vec![0, 1, -1, 3, -1, 5, -1, 7, 8, 9]);
    }

    #[test]
    fn fully_checked_owner_rejects_nan() {
        let o: Owner<f32, FullyChecked> = Owner::from_vec(vec![0.5, f32::NAN]);
        assert_eq!(o.at(0), Ok(&0.5));
        assert_eq!(o.at(1), Err(Error::InvalidNumeric { index: 1 }));
    }

    #[test]
    fn at_mut_and_index_mut() {
        let mut o: Owner<u16> = Owner::with_len(3).expect("alloc");
        *o.at_mut(1).expect("in range") = 5;
        o[2] = 9;
        assert_eq!(o.view().to_vec(), vec![0, 5, 9]);
        assert!(o.at_mut(3).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_panics_out_of_range() {
        let o: Owner<u8> = Owner::filled(2, 1);
        let _ = o[2];
    }
}
