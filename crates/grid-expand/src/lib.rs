//! Scatter a 2D grid into a larger zero-filled grid.
//!
//! Source values are placed at evenly spaced positions of the target grid
//! and every other cell keeps the zero value of the element type. A `u8`
//! presence mask marks the cells that received a source value. There is no
//! interpolation: gaps stay zero.
//!
//! ## Quickstart
//!
//! ```
//! use grid_expand::{expand, Grid};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let src = Grid::from_rows(&[[1, 2], [3, 4]])?;
//! let out = expand(&src.view(), 3, 3, None, None)?;
//!
//! assert_eq!(out.data.to_rows(), vec![vec![1, 0, 2], vec![0, 0, 0], vec![3, 0, 4]]);
//! assert_eq!(out.mask.to_rows(), vec![vec![1, 0, 1], vec![0, 0, 0], vec![1, 0, 1]]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Strides
//!
//! Without an override the stride along an axis is
//! `(target - 1) / (original - 1)`, or 1 when the source has a single
//! row/column. Explicit strides must give exactly one slot per source
//! element, otherwise [`ExpandError::ShapeMismatch`] is returned.

mod error;
mod expand;
mod grid;
mod logger;
mod params;

pub use error::{Axis, ExpandError, GridError};
pub use expand::{expand, expand_with_params, resolve_stride, Expanded, Strides};
pub use grid::{Element, Grid, GridView};
pub use params::ExpandParams;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
