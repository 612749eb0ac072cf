use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Element type storable in a [`Grid`].
///
/// `ZERO` is the gap-fill value used by [`crate::expand`].
pub trait Element: Copy + PartialEq + Debug {
    const ZERO: Self;
}

macro_rules! impl_element {
    ($zero:expr => $($t:ty),*) => {
        $(impl Element for $t {
            const ZERO: Self = $zero;
        })*
    };
}

impl_element!(0 => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_element!(0.0 => f32, f64);

/// `rows * cols`, rejecting empty and overflowing shapes.
pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize, GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::Empty { rows, cols });
    }
    rows.checked_mul(cols).ok_or(GridError::TooLarge { rows, cols })
}

fn check_shape(rows: usize, cols: usize, len: usize) -> Result<(), GridError> {
    let expected = cell_count(rows, cols)?;
    if len != expected {
        return Err(GridError::LengthMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Borrowed row-major grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a, T> {
    rows: usize,
    cols: usize,
    data: &'a [T], // row-major, len = rows*cols
}

impl<'a, T: Copy> GridView<'a, T> {
    pub fn new(rows: usize, cols: usize, data: &'a [T]) -> Result<Self, GridError> {
        check_shape(rows, cols, data.len())?;
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Row `row` as a slice, `None` when out of range.
    #[inline]
    pub fn row(&self, row: usize) -> Option<&'a [T]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    pub fn to_grid(&self) -> Grid<T> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.to_vec(),
        }
    }
}

/// Owned row-major grid with `rows >= 1` and `cols >= 1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>", bound(deserialize = "T: Copy + Deserialize<'de>"))]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

#[derive(Deserialize)]
struct RawGrid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        Grid::from_vec(raw.rows, raw.cols, raw.data)
    }
}

impl<T: Copy> Grid<T> {
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, GridError> {
        check_shape(rows, cols, data.len())?;
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != cols {
                return Err(GridError::Ragged {
                    row: idx,
                    expected: cols,
                    actual: r.len(),
                });
            }
            data.extend_from_slice(r);
        }
        Self::from_vec(rows.len(), cols, data)
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self, GridError> {
        let len = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![value; len],
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    pub fn view(&self) -> GridView<'_, T> {
        GridView {
            rows: self.rows,
            cols: self.cols,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.view().get(row, col)
    }

    #[inline]
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Nested-rows copy, the inverse of [`Grid::from_rows`].
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data.chunks(self.cols).map(<[T]>::to_vec).collect()
    }

    /// Number of cells equal to `value`.
    pub fn count(&self, value: T) -> usize
    where
        T: PartialEq,
    {
        self.data.iter().filter(|&&v| v == value).count()
    }
}

impl<T: Element> Grid<T> {
    /// Grid of `T::ZERO`.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::filled(rows, cols, T::ZERO)
    }
}

impl<'a, T: Copy> From<&'a Grid<T>> for GridView<'a, T> {
    fn from(grid: &'a Grid<T>) -> Self {
        grid.view()
    }
}
