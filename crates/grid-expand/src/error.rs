/// Grid axis, used in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Rows,
    Cols,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Rows => f.write_str("rows"),
            Axis::Cols => f.write_str("cols"),
        }
    }
}

/// Errors returned when building a [`crate::Grid`] or [`crate::GridView`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must be non-empty (got {rows}x{cols})")]
    Empty { rows: usize, cols: usize },
    #[error("buffer length {actual} does not match rows*cols = {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("grid of {rows}x{cols} cells does not fit in memory")]
    TooLarge { rows: usize, cols: usize },
    #[error("row {row} has {actual} elements, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Errors returned by [`crate::expand`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error(
        "target size must be greater than or equal to the original size \
         (original {}x{}, target {}x{})",
        .original.0, .original.1, .target.0, .target.1
    )]
    InvalidSize {
        original: (usize, usize),
        target: (usize, usize),
    },
    #[error(
        "step {step} along {axis} yields {slots} slots for {source_len} source elements"
    )]
    ShapeMismatch {
        axis: Axis,
        source_len: usize,
        slots: usize,
        step: usize,
    },
    #[error("target {}x{} is too large to allocate", .target.0, .target.1)]
    TooLarge { target: (usize, usize) },
}
