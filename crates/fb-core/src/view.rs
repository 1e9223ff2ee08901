use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use crate::check::{BoundsChecked, CheckPolicy, RangeCheck};
use crate::error::{Error, Result};
use crate::owner::Owner;
use crate::scalar::Scalar;

/// Checks that `len` elements starting at raw `offset` with `step` stay
/// inside a buffer of `extent` elements.
pub(crate) fn validate_layout(extent: usize, offset: usize, len: usize, step: isize) -> Result<()> {
    if len == 0 {
        return Ok(());
    }
    if offset >= extent {
        return Err(Error::OutOfRange {
            index: offset as isize,
            len: extent,
        });
    }

    let span = isize::try_from(len - 1)
        .ok()
        .and_then(|n| n.checked_mul(step))
        .ok_or(Error::InvalidStride)?;
    let last = (offset as isize)
        .checked_add(span)
        .ok_or(Error::InvalidStride)?;
    if last < 0 || last as usize >= extent {
        return Err(Error::InvalidStride);
    }
    Ok(())
}

#[inline]
fn raw_position(offset: usize, step: isize, i: usize) -> isize {
    (offset as isize).wrapping_add((i as isize).wrapping_mul(step))
}

fn fragment_layout(
    offset: usize,
    len: usize,
    parent_step: isize,
    from: usize,
    to: usize,
    step: isize,
) -> Result<(usize, usize, isize)> {
    if step <= 0 || from >= to || to > len {
        return Err(Error::invalid_argument(format!(
            "fragment [{from}, {to}) with step {step} is invalid for length {len}"
        )));
    }
    let composed = parent_step.checked_mul(step).ok_or(Error::InvalidStride)?;
    let count = (to - from) / step as usize;
    let base = raw_position(offset, parent_step, from) as usize;
    Ok((base, count, composed))
}

/// Non-owning strided view.
///
/// Copying a view aliases the same data. `step` may be negative (logical
/// reversal) or larger than one (sub-sampling). All constructors validate
/// that every logical element lies inside the borrowed slice.
pub struct View<'a, T, C = BoundsChecked> {
    data: &'a [T],
    offset: usize,
    len: usize,
    step: isize,
    _checks: PhantomData<C>,
}

impl<T, C> Clone for View<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for View<'_, T, C> {}

impl<T: fmt::Debug, C: CheckPolicy> fmt::Debug for View<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("len", &self.len)
            .field("step", &self.step)
            .field("items", &DebugItems(*self))
            .finish()
    }
}

struct DebugItems<'a, T, C>(View<'a, T, C>);

impl<T: fmt::Debug, C: CheckPolicy> fmt::Debug for DebugItems<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a, T, C: CheckPolicy> View<'a, T, C> {
    pub fn empty() -> Self {
        Self {
            data: &[],
            offset: 0,
            len: 0,
            step: 0,
            _checks: PhantomData,
        }
    }

    /// Contiguous view over the whole slice.
    pub fn from_slice(data: &'a [T]) -> Self {
        Self {
            data,
            offset: 0,
            len: data.len(),
            step: 1,
            _checks: PhantomData,
        }
    }

    /// View of `len` elements spaced `step` apart.
    ///
    /// A negative step starts at the far end of the slice so that the view
    /// walks it backwards.
    pub fn from_strided(data: &'a [T], len: usize, step: isize) -> Result<Self> {
        let offset = if step < 0 && len > 0 {
            (len - 1)
                .checked_mul(step.unsigned_abs())
                .ok_or(Error::InvalidStride)?
        } else {
            0
        };
        Self::from_parts(data, offset, len, step)
    }

    /// View whose logical element 0 sits at `data[offset]`.
    pub fn from_parts(data: &'a [T], offset: usize, len: usize, step: isize) -> Result<Self> {
        validate_layout(data.len(), offset, len, step)?;
        Ok(Self {
            data,
            offset,
            len,
            step,
            _checks: PhantomData,
        })
    }

    pub(crate) fn from_validated(data: &'a [T], offset: usize, len: usize, step: isize) -> Self {
        debug_assert!(validate_layout(data.len(), offset, len, step).is_ok());
        Self {
            data,
            offset,
            len,
            step,
            _checks: PhantomData,
        }
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

    /// Raw index of logical element 0 inside the borrowed slice.
    pub fn base_offset(&self) -> usize {
        self.offset
    }

    #[inline]
    fn raw(&self, i: usize) -> usize {
        raw_position(self.offset, self.step, i) as usize
    }

    pub fn get(&self, i: usize) -> Option<&'a T> {
        if i >= self.len {
            return None;
        }
        self.data.get(self.raw(i))
    }

    /// Checked element access; what is checked depends on the policy `C`.
    pub fn at(&self, i: usize) -> Result<&'a T>
    where
        T: Scalar,
    {
        if C::BOUNDS && i >= self.len {
            return Err(Error::OutOfRange {
                index: i as isize,
                len: self.len,
            });
        }
        let value = &self.data[self.raw(i)];
        if C::NUMERIC && !value.is_finite_value() {
            return Err(Error::InvalidNumeric { index: i });
        }
        Ok(value)
    }

    pub fn iter(&self) -> StepIter<'a, T, C::Range> {
        StepIter {
            data: self.data,
            pos: self.offset as isize,
            step: self.step,
            remaining: self.len,
            checker: C::Range::new(self.data.len()),
        }
    }

    /// Sub-range `[from, to)` taking every `step`-th element.
    ///
    /// The result holds `(to - from) / step` elements and composes its step
    /// with the parent step.
    pub fn fragment(&self, from: usize, to: usize, step: isize) -> Result<Self> {
        let (offset, len, step) = fragment_layout(self.offset, self.len, self.step, from, to, step)?;
        Ok(Self::from_validated(self.data, offset, len, step))
    }

    /// `len` consecutive logical elements starting at `start`.
    pub fn window(&self, start: usize, len: usize) -> Result<Self> {
        let end = start.checked_add(len).ok_or(Error::InvalidStride)?;
        if end > self.len {
            return Err(Error::OutOfRange {
                index: end as isize - 1,
                len: self.len,
            });
        }
        let offset = if len == 0 { self.offset } else { self.raw(start) };
        Ok(Self::from_validated(self.data, offset, len, self.step))
    }

    /// Reverses the logical order in O(1): the step flips sign and the base
    /// moves to the last element. Applying it twice restores the view.
    pub fn reverse(&mut self) {
        if self.len > 0 {
            self.offset = self.raw(self.len - 1);
        }
        self.step = -self.step;
    }

    pub fn reversed(mut self) -> Self {
        self.reverse();
        self
    }

    /// Same data under a different check policy.
    pub fn with_policy<C2: CheckPolicy>(self) -> View<'a, T, C2> {
        View::from_validated(self.data, self.offset, self.len, self.step)
    }

    pub fn is_contiguous(&self) -> bool {
        self.step == 1 || self.len <= 1
    }

    pub fn as_contiguous_slice(&self) -> Option<&'a [T]> {
        if !self.is_contiguous() {
            return None;
        }
        self.data.get(self.offset..self.offset + self.len)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Deep copy into a contiguous owner.
    pub fn to_owner(&self) -> Owner<T, C>
    where
        T: Clone,
    {
        Owner::from_vec(self.to_vec())
    }
}

impl<T, C: CheckPolicy> Index<usize> for View<'_, T, C> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        if C::BOUNDS {
            assert!(i < self.len, "index {i} out of range for length {}", self.len);
        }
        &self.data[self.raw(i)]
    }
}

impl<'a, T, C: CheckPolicy> IntoIterator for View<'a, T, C> {
    type Item = &'a T;
    type IntoIter = StepIter<'a, T, C::Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, C: CheckPolicy> From<&'a [T]> for View<'a, T, C> {
    fn from(data: &'a [T]) -> Self {
        Self::from_slice(data)
    }
}

/// Mutable strided view. Mutable views never alias their own elements, so
/// a zero step is rejected whenever more than one element is addressed.
pub struct ViewMut<'a, T, C = BoundsChecked> {
    data: &'a mut [T],
    offset: usize,
    len: usize,
    step: isize,
    _checks: PhantomData<C>,
}

impl<T: fmt::Debug, C: CheckPolicy> fmt::Debug for ViewMut<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewMut")
            .field("len", &self.len)
            .field("step", &self.step)
            .field("items", &DebugItems(self.as_view()))
            .finish()
    }
}

impl<'a, T, C: CheckPolicy> ViewMut<'a, T, C> {
    pub fn from_slice_mut(data: &'a mut [T]) -> Self {
        let len = data.len();
        Self {
            data,
            offset: 0,
            len,
            step: 1,
            _checks: PhantomData,
        }
    }

    pub fn from_strided_mut(data: &'a mut [T], len: usize, step: isize) -> Result<Self> {
        let offset = if step < 0 && len > 0 {
            (len - 1)
                .checked_mul(step.unsigned_abs())
                .ok_or(Error::InvalidStride)?
        } else {
            0
        };
        Self::from_parts_mut(data, offset, len, step)
    }

    pub fn from_parts_mut(
        data: &'a mut [T],
        offset: usize,
        len: usize,
        step: isize,
    ) -> Result<Self> {
        if step == 0 && len > 1 {
            return Err(Error::InvalidStride);
        }
        validate_layout(data.len(), offset, len, step)?;
        Ok(Self {
            data,
            offset,
            len,
            step,
            _checks: PhantomData,
        })
    }

    pub(crate) fn from_validated_mut(
        data: &'a mut [T],
        offset: usize,
        len: usize,
        step: isize,
    ) -> Self {
        debug_assert!(validate_layout(data.len(), offset, len, step).is_ok());
        debug_assert!(step != 0 || len <= 1);
        Self {
            data,
            offset,
            len,
            step,
            _checks: PhantomData,
        }
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

    #[inline]
    fn raw(&self, i: usize) -> usize {
        raw_position(self.offset, self.step, i) as usize
    }

    pub fn as_view(&self) -> View<'_, T, C> {
        View::from_validated(&*self.data, self.offset, self.len, self.step)
    }

    pub fn reborrow(&mut self) -> ViewMut<'_, T, C> {
        ViewMut::from_validated_mut(&mut *self.data, self.offset, self.len, self.step)
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        if i >= self.len {
            return None;
        }
        self.data.get(self.raw(i))
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        if i >= self.len {
            return None;
        }
        let idx = self.raw(i);
        self.data.get_mut(idx)
    }

    pub fn at(&self, i: usize) -> Result<&T>
    where
        T: Scalar,
    {
        self.as_view().at(i)
    }

    /// Bounds-checked mutable access. Values are not NaN-checked here since
    /// the caller is about to overwrite them.
    pub fn at_mut(&mut self, i: usize) -> Result<&mut T> {
        if C::BOUNDS && i >= self.len {
            return Err(Error::OutOfRange {
                index: i as isize,
                len: self.len,
            });
        }
        let idx = self.raw(i);
        Ok(&mut self.data[idx])
    }

    pub fn iter(&self) -> StepIter<'_, T, C::Range> {
        self.as_view().iter()
    }

    pub fn iter_mut(&mut self) -> StepIterMut<'_, T, C::Range> {
        StepIterMut {
            ptr: self.data.as_mut_ptr(),
            pos: self.offset as isize,
            step: self.step,
            remaining: self.len,
            checker: C::Range::new(self.data.len()),
            _marker: PhantomData,
        }
    }

    /// Consumes the view into an iterator that keeps the full borrow.
    pub fn into_iter_mut(self) -> StepIterMut<'a, T, C::Range> {
        StepIterMut {
            ptr: self.data.as_mut_ptr(),
            pos: self.offset as isize,
            step: self.step,
            remaining: self.len,
            checker: C::Range::new(self.data.len()),
            _marker: PhantomData,
        }
    }

    pub fn fragment_mut(&mut self, from: usize, to: usize, step: isize) -> Result<ViewMut<'_, T, C>> {
        let (offset, len, step) = fragment_layout(self.offset, self.len, self.step, from, to, step)?;
        Ok(ViewMut::from_validated_mut(&mut *self.data, offset, len, step))
    }

    pub fn reverse(&mut self) {
        if self.len > 0 {
            self.offset = self.raw(self.len - 1);
        }
        self.step = -self.step;
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for v in self.iter_mut() {
            *v = value.clone();
        }
    }

    pub fn copy_from<C2: CheckPolicy>(&mut self, src: &View<'_, T, C2>) -> Result<()>
    where
        T: Clone,
    {
        if src.len() != self.len {
            return Err(Error::SizeMismatch {
                expected: self.len,
                actual: src.len(),
            });
        }
        for (dst, s) in self.iter_mut().zip(src.iter()) {
            *dst = s.clone();
        }
        Ok(())
    }
}

impl<T, C: CheckPolicy> Index<usize> for ViewMut<'_, T, C> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        if C::BOUNDS {
            assert!(i < self.len, "index {i} out of range for length {}", self.len);
        }
        &self.data[self.raw(i)]
    }
}

impl<T, C: CheckPolicy> IndexMut<usize> for ViewMut<'_, T, C> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        if C::BOUNDS {
            assert!(i < self.len, "index {i} out of range for length {}", self.len);
        }
        let idx = self.raw(i);
        &mut self.data[idx]
    }
}

impl<'a, T, C: CheckPolicy> IntoIterator for ViewMut<'a, T, C> {
    type Item = &'a mut T;
    type IntoIter = StepIterMut<'a, T, C::Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_iter_mut()
    }
}

impl<'a, T, C: CheckPolicy> From<&'a mut [T]> for ViewMut<'a, T, C> {
    fn from(data: &'a mut [T]) -> Self {
        Self::from_slice_mut(data)
    }
}

/// Stepped cursor plus range checker over a borrowed slice.
#[derive(Debug, Clone)]
pub struct StepIter<'a, T, R> {
    data: &'a [T],
    pos: isize,
    step: isize,
    remaining: usize,
    checker: R,
}

impl<'a, T, R: RangeCheck> Iterator for StepIter<'a, T, R> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.checker.check(self.pos);
        // SAFETY: view constructors validate that the `remaining` positions
        // `pos, pos + step, ...` all lie in `[0, data.len())`.
        let item = unsafe { self.data.get_unchecked(self.pos as usize) };
        self.remaining -= 1;
        self.pos = self.pos.wrapping_add(self.step);
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, R: RangeCheck> DoubleEndedIterator for StepIter<'_, T, R> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let pos = raw_position(self.pos as usize, self.step, self.remaining) as isize;
        self.checker.check(pos);
        // SAFETY: `pos` is one of the validated positions of this iterator.
        Some(unsafe { self.data.get_unchecked(pos as usize) })
    }
}

impl<T, R: RangeCheck> ExactSizeIterator for StepIter<'_, T, R> {}

/// Mutable counterpart of [`StepIter`].
#[derive(Debug)]
pub struct StepIterMut<'a, T, R> {
    ptr: *mut T,
    pos: isize,
    step: isize,
    remaining: usize,
    checker: R,
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: the iterator hands out disjoint `&mut T` exactly like
// `core::slice::IterMut`.
unsafe impl<T: Send, R: Send> Send for StepIterMut<'_, T, R> {}
// SAFETY: see above.
unsafe impl<T: Sync, R: Sync> Sync for StepIterMut<'_, T, R> {}

impl<'a, T, R: RangeCheck> Iterator for StepIterMut<'a, T, R> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.checker.check(self.pos);
        // SAFETY: positions were validated at construction, and a non-zero
        // step (enforced for mutable views) makes every yielded element
        // distinct, so no two live `&mut` alias.
        let item = unsafe { &mut *self.ptr.offset(self.pos) };
        self.remaining -= 1;
        self.pos = self.pos.wrapping_add(self.step);
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, R: RangeCheck> DoubleEndedIterator for StepIterMut<'_, T, R> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let pos = raw_position(self.pos as usize, self.step, self.remaining) as isize;
        self.checker.check(pos);
        // SAFETY: `pos` is a validated position not yet yielded from the front.
        Some(unsafe { &mut *self.ptr.offset(pos) })
    }
}

impl<T, R: RangeCheck> ExactSizeIterator for StepIterMut<'_, T, R> {}
