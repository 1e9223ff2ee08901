use core::marker::PhantomData;

use crate::check::{BoundsChecked, CheckPolicy};
use crate::error::{Error, Result};
use crate::scalar::Scalar;
use crate::view::{View, ViewMut};

/// Row-major owning 2D buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix by evaluating `f(i, j)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn as_view(&self) -> MatrixView<'_, T> {
        self.as_view_checked()
    }

    /// Whole-matrix view under check policy `C`.
    pub fn as_view_checked<C: CheckPolicy>(&self) -> MatrixView<'_, T, C> {
        MatrixView {
            rows: self.rows,
            cols: self.cols,
            stride: self.cols,
            data: &self.data,
            _checks: PhantomData,
        }
    }

    pub fn as_view_mut(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut {
            rows: self.rows,
            cols: self.cols,
            stride: self.cols,
            data: &mut self.data,
            _checks: PhantomData,
        }
    }
}

impl<T: Clone> Matrix<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        let len = rows.checked_mul(cols).expect("matrix size overflow");
        Self {
            rows,
            cols,
            data: vec![value; len],
        }
    }
}

/// Borrowed 2D window with a row stride of at least `cols`.
///
/// Rows and columns come out as 1D [`View`]s; a column is simply a view with
/// `step == stride`, so kernels can run along either axis without copying.
/// Those views inherit the matrix check policy `C`.
#[derive(Debug)]
pub struct MatrixView<'a, T, C = BoundsChecked> {
    rows: usize,
    cols: usize,
    stride: usize,
    data: &'a [T],
    _checks: PhantomData<C>,
}

impl<T, C> Clone for MatrixView<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for MatrixView<'_, T, C> {}

impl<'a, T, C: CheckPolicy> MatrixView<'a, T, C> {
    pub fn from_slice(rows: usize, cols: usize, stride: usize, data: &'a [T]) -> Result<Self> {
        validate_shape(rows, cols, stride, data.len())?;
        Ok(Self {
            rows,
            cols,
            stride,
            data,
            _checks: PhantomData,
        })
    }

    /// Same data under a different check policy.
    pub fn with_policy<C2: CheckPolicy>(self) -> MatrixView<'a, T, C2> {
        MatrixView {
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            data: self.data,
            _checks: PhantomData,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, i: usize) -> View<'a, T, C> {
        assert!(i < self.rows, "row index out of bounds");
        View::from_validated(self.data, i * self.stride, self.cols, 1)
    }

    pub fn col(&self, j: usize) -> View<'a, T, C> {
        assert!(j < self.cols, "column index out of bounds");
        View::from_validated(self.data, j, self.rows, self.stride as isize)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&'a T> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        self.data.get(i * self.stride + j)
    }

    /// Bounds-checked access; `C` adds the NaN/Inf check, reported at the
    /// row-major index `i * cols + j`.
    pub fn at(&self, i: usize, j: usize) -> Result<&'a T>
    where
        T: Scalar,
    {
        if i >= self.rows {
            return Err(Error::OutOfRange {
                index: i as isize,
                len: self.rows,
            });
        }
        if j >= self.cols {
            return Err(Error::OutOfRange {
                index: j as isize,
                len: self.cols,
            });
        }
        let value = &self.data[i * self.stride + j];
        if C::NUMERIC && !value.is_finite_value() {
            return Err(Error::InvalidNumeric {
                index: i * self.cols + j,
            });
        }
        Ok(value)
    }

    pub fn subview(
        &self,
        i: usize,
        j: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixView<'a, T, C>> {
        let start = sub_start(self.rows, self.cols, self.stride, i, j, rows, cols)?;
        let tail = self.data.get(start..).ok_or(Error::OutOfRange {
            index: start as isize,
            len: self.data.len(),
        })?;
        MatrixView::from_slice(rows, cols, self.stride, tail)
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.cols
    }

    pub fn as_contiguous_slice(&self) -> Option<&'a [T]> {
        if !self.is_contiguous() {
            return None;
        }
        self.data.get(0..self.rows * self.cols)
    }
}

#[derive(Debug)]
pub struct MatrixViewMut<'a, T, C = BoundsChecked> {
    rows: usize,
    cols: usize,
    stride: usize,
    data: &'a mut [T],
    _checks: PhantomData<C>,
}

impl<'a, T, C: CheckPolicy> MatrixViewMut<'a, T, C> {
    pub fn from_slice_mut(
        rows: usize,
        cols: usize,
        stride: usize,
        data: &'a mut [T],
    ) -> Result<Self> {
        validate_shape(rows, cols, stride, data.len())?;
        Ok(Self {
            rows,
            cols,
            stride,
            data,
            _checks: PhantomData,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn as_view(&self) -> MatrixView<'_, T, C> {
        MatrixView {
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            data: &*self.data,
            _checks: PhantomData,
        }
    }

    pub fn row(&self, i: usize) -> View<'_, T, C> {
        self.as_view().row(i)
    }

    pub fn col(&self, j: usize) -> View<'_, T, C> {
        self.as_view().col(j)
    }

    pub fn row_mut(&mut self, i: usize) -> ViewMut<'_, T, C> {
        assert!(i < self.rows, "row index out of bounds");
        ViewMut::from_validated_mut(&mut *self.data, i * self.stride, self.cols, 1)
    }

    pub fn col_mut(&mut self, j: usize) -> ViewMut<'_, T, C> {
        assert!(j < self.cols, "column index out of bounds");
        let step = self.stride as isize;
        ViewMut::from_validated_mut(&mut *self.data, j, self.rows, step)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        self.data.get(i * self.stride + j)
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        self.data.get_mut(i * self.stride + j)
    }

    pub fn at_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        let (rows, cols) = (self.rows, self.cols);
        self.get_mut(i, j).ok_or(Error::OutOfRange {
            index: if i >= rows { i as isize } else { j as isize },
            len: if i >= rows { rows } else { cols },
        })
    }

    pub fn subview_mut(
        &mut self,
        i: usize,
        j: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixViewMut<'_, T, C>> {
        let start = sub_start(self.rows, self.cols, self.stride, i, j, rows, cols)?;
        let len = self.data.len();
        if start > len {
            return Err(Error::OutOfRange {
                index: start as isize,
                len,
            });
        }
        let (_, tail) = self.data.split_at_mut(start);
        MatrixViewMut::from_slice_mut(rows, cols, self.stride, tail)
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.cols
    }
}

fn validate_shape(rows: usize, cols: usize, stride: usize, available: usize) -> Result<()> {
    if stride < cols {
        return Err(Error::InvalidStride);
    }
    let min_len = min_required_len(rows, cols, stride).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: available,
    })?;
    if available < min_len {
        return Err(Error::SizeMismatch {
            expected: min_len,
            actual: available,
        });
    }
    Ok(())
}

fn sub_start(
    parent_rows: usize,
    parent_cols: usize,
    stride: usize,
    i: usize,
    j: usize,
    rows: usize,
    cols: usize,
) -> Result<usize> {
    if i > parent_rows || rows > parent_rows - i {
        return Err(Error::OutOfRange {
            index: (i + rows) as isize,
            len: parent_rows,
        });
    }
    if j > parent_cols || cols > parent_cols - j {
        return Err(Error::OutOfRange {
            index: (j + cols) as isize,
            len: parent_cols,
        });
    }
    Ok(i * stride + j)
}

fn min_required_len(rows: usize, cols: usize, stride: usize) -> Option<usize> {
    if rows == 0 || cols == 0 {
        return Some(0);
    }

    let rows_before_last = rows.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(cols)
}
