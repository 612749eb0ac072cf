//! Strided scatter of a grid into a larger zero-filled grid.
//!
//! Source element `(i, j)` lands at `(i * step_rows, j * step_cols)` in the
//! target. A parallel `u8` mask carries 1 at exactly those positions.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{Axis, ExpandError};
use crate::grid::{Element, Grid, GridView};
use crate::params::ExpandParams;

/// Strides used to place source elements in the target grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strides {
    pub rows: usize,
    pub cols: usize,
}

/// Output of [`expand`]: the expanded grid, its presence mask and the
/// strides that produced them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Expanded<T> {
    pub data: Grid<T>,
    pub mask: Grid<u8>,
    pub strides: Strides,
}

impl<T: Copy> Expanded<T> {
    /// `(expanded_data, mask)`.
    pub fn into_parts(self) -> (Grid<T>, Grid<u8>) {
        (self.data, self.mask)
    }

    /// Target positions holding source data, row-major.
    pub fn written_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.mask.cols();
        self.mask
            .as_slice()
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m == 1)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }
}

/// Resolve the stride for one axis.
///
/// `None` derives `(target - 1) / (original - 1)` for `original > 1` and 1
/// otherwise. A stride of 0 falls back to 1.
#[inline]
pub fn resolve_stride(original: usize, target: usize, step: Option<usize>) -> usize {
    let step = step.unwrap_or_else(|| {
        if original > 1 {
            target.saturating_sub(1) / (original - 1)
        } else {
            1
        }
    });
    step.max(1)
}

/// Number of strided slots `0, step, 2*step, ...` below `target`.
#[inline]
fn slot_count(target: usize, step: usize) -> usize {
    target.div_ceil(step)
}

/// Cell count of a `rows x cols` target, `None` when the data buffer would
/// exceed `isize::MAX` bytes.
fn allocation_cells<T>(rows: usize, cols: usize) -> Option<usize> {
    let cells = rows.checked_mul(cols)?;
    let bytes = cells.checked_mul(std::mem::size_of::<T>().max(1))?;
    (bytes <= isize::MAX as usize).then_some(cells)
}

fn check_explicit_stride(
    axis: Axis,
    original: usize,
    target: usize,
    step: usize,
) -> Result<(), ExpandError> {
    // a single source row/col only ever touches index 0
    if original == 1 {
        return Ok(());
    }
    let slots = slot_count(target, step);
    if slots != original {
        return Err(ExpandError::ShapeMismatch {
            axis,
            source_len: original,
            slots,
            step,
        });
    }
    Ok(())
}

/// Expand `src` into a `target_rows x target_cols` grid.
///
/// Fails with [`ExpandError::InvalidSize`] if the target is smaller than the
/// source on either axis, and with [`ExpandError::ShapeMismatch`] if an
/// explicit stride does not give exactly one slot per source element.
/// Derived strides always fit. Targets whose buffer would not fit in the
/// address space give [`ExpandError::TooLarge`].
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(rows = src.rows(), cols = src.cols()))
)]
pub fn expand<T: Element>(
    src: &GridView<'_, T>,
    target_rows: usize,
    target_cols: usize,
    step_rows: Option<usize>,
    step_cols: Option<usize>,
) -> Result<Expanded<T>, ExpandError> {
    let (rows, cols) = src.shape();
    if target_rows < rows || target_cols < cols {
        return Err(ExpandError::InvalidSize {
            original: (rows, cols),
            target: (target_rows, target_cols),
        });
    }

    let strides = Strides {
        rows: resolve_stride(rows, target_rows, step_rows),
        cols: resolve_stride(cols, target_cols, step_cols),
    };
    if step_rows.is_some() {
        check_explicit_stride(Axis::Rows, rows, target_rows, strides.rows)?;
    }
    if step_cols.is_some() {
        check_explicit_stride(Axis::Cols, cols, target_cols, strides.cols)?;
    }
    debug!(
        "expand {}x{} -> {}x{} with strides ({}, {})",
        rows, cols, target_rows, target_cols, strides.rows, strides.cols
    );

    let too_large = ExpandError::TooLarge {
        target: (target_rows, target_cols),
    };
    let cells =
        allocation_cells::<T>(target_rows, target_cols).ok_or_else(|| too_large.clone())?;
    let mut data =
        Grid::filled(target_rows, target_cols, T::ZERO).map_err(|_| too_large.clone())?;
    let mut mask = Grid::filled(target_rows, target_cols, 0u8).map_err(|_| too_large)?;
    trace!("allocated 2 x {} cells", cells);

    for i in 0..rows {
        let Some(src_row) = src.row(i) else {
            continue;
        };
        let ti = i * strides.rows;
        for (j, &value) in src_row.iter().enumerate() {
            let tj = j * strides.cols;
            data.set(ti, tj, value);
            mask.set(ti, tj, 1);
        }
    }

    Ok(Expanded {
        data,
        mask,
        strides,
    })
}

/// [`expand`] driven by [`ExpandParams`].
pub fn expand_with_params<T: Element>(
    src: &GridView<'_, T>,
    params: &ExpandParams,
) -> Result<Expanded<T>, ExpandError> {
    expand(
        src,
        params.target_rows,
        params.target_cols,
        params.step_rows,
        params.step_cols,
    )
}
