use serde::{Deserialize, Serialize};

/// Configuration for [`crate::expand_with_params`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandParams {
    /// Number of rows in the expanded grid.
    pub target_rows: usize,
    /// Number of columns in the expanded grid.
    pub target_cols: usize,
    /// Row stride override.
    ///
    /// `None` derives the stride as `(target_rows - 1) / (rows - 1)`, or 1
    /// for a single-row source. `Some(0)` is treated as 1.
    #[serde(default)]
    pub step_rows: Option<usize>,
    /// Column stride override, same rules as `step_rows`.
    #[serde(default)]
    pub step_cols: Option<usize>,
}

impl ExpandParams {
    /// Target shape with derived strides.
    pub fn new(target_rows: usize, target_cols: usize) -> Self {
        Self {
            target_rows,
            target_cols,
            step_rows: None,
            step_cols: None,
        }
    }

    pub fn with_steps(self, step_rows: usize, step_cols: usize) -> Self {
        Self {
            step_rows: Some(step_rows),
            step_cols: Some(step_cols),
            ..self
        }
    }

    pub fn with_step_rows(self, step_rows: usize) -> Self {
        Self {
            step_rows: Some(step_rows),
            ..self
        }
    }

    pub fn with_step_cols(self, step_cols: usize) -> Self {
        Self {
            step_cols: Some(step_cols),
            ..self
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
