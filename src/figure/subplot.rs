//! Subplot grid positions and argument checking.

use super::error::PlotError;

/// A cell in a subplot grid, with a 1-based `index` counted row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubplotPosition {
    pub nrows: usize,
    pub ncols: usize,
    pub index: usize,
}

impl SubplotPosition {
    /// Creates a position, checking that `index` lies within the grid.
    pub fn new(nrows: usize, ncols: usize, index: usize) -> Result<Self, PlotError> {
        if nrows == 0 || ncols == 0 {
            return Err(PlotError::invalid_subplot(format!(
                "grid dimensions must be positive, got {}x{}",
                nrows, ncols
            )));
        }
        let cells = Self::cell_count(nrows, ncols)?;
        if index == 0 || index > cells {
            return Err(PlotError::invalid_subplot(format!(
                "index must be within 1..={} for a {}x{} grid, got {}",
                cells,
                nrows,
                ncols,
                index
            )));
        }
        Ok(Self {
            nrows,
            ncols,
            index,
        })
    }

    /// The number of cells in an `nrows` x `ncols` grid.
    pub(crate) fn cell_count(nrows: usize, ncols: usize) -> Result<usize, PlotError> {
        nrows.checked_mul(ncols).ok_or_else(|| {
            PlotError::invalid_subplot(format!("a {}x{} grid is too large", nrows, ncols))
        })
    }

    /// Parses the three-digit shorthand, e.g. `211` for row 2 of a 2x1 grid.
    pub fn from_code(code: u32) -> Result<Self, PlotError> {
        if !(111..=999).contains(&code) {
            return Err(PlotError::invalid_subplot(format!(
                "integer subplot specification must be a three-digit number, not {}",
                code
            )));
        }
        let digit = |d: u32| (d % 10) as usize;
        Self::new(digit(code / 100), digit(code / 10), digit(code))
    }

    /// The zero-based (row, column) of the cell.
    pub fn cell(&self) -> (usize, usize) {
        ((self.index - 1) / self.ncols, (self.index - 1) % self.ncols)
    }
}

impl Default for SubplotPosition {
    fn default() -> Self {
        Self {
            nrows: 1,
            ncols: 1,
            index: 1,
        }
    }
}

impl std::fmt::Display for SubplotPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.nrows, self.ncols, self.index)
    }
}

/// Arguments to [`PlotState::subplot`](super::PlotState::subplot).
///
/// The grid is always given positionally (defaulting to `(1, 1, 1)`), so
/// the `nrows`/`ncols` keywords conflict with it whenever they are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubplotArgs {
    position: Option<SubplotPosition>,
    nrows: Option<usize>,
    ncols: Option<usize>,
}

impl SubplotArgs {
    /// Arguments for the default position `(1, 1, 1)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments for an explicit position.
    pub fn at(position: SubplotPosition) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Sets the `nrows` keyword.
    pub fn nrows(mut self, nrows: usize) -> Self {
        self.nrows = Some(nrows);
        self
    }

    /// Sets the `ncols` keyword.
    pub fn ncols(mut self, ncols: usize) -> Self {
        self.ncols = Some(ncols);
        self
    }

    /// Checks the arguments and returns the requested position.
    pub fn validate(&self) -> Result<SubplotPosition, PlotError> {
        let position = self.position.unwrap_or_default();
        let keyword = match (self.nrows, self.ncols) {
            (Some(_), _) => Some("nrows"),
            (None, Some(_)) => Some("ncols"),
            (None, None) => None,
        };
        if let Some(keyword) = keyword {
            return Err(PlotError::ArgumentConflict {
                function: "subplot",
                message: format!(
                    "the grid is given positionally as {}; keyword '{}' cannot also be given",
                    position, keyword
                ),
            });
        }
        Ok(position)
    }
}

impl From<SubplotPosition> for SubplotArgs {
    fn from(position: SubplotPosition) -> Self {
        Self::at(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        let pos = SubplotPosition::from_code(212).unwrap();
        assert_eq!(
            pos,
            SubplotPosition {
                nrows: 2,
                ncols: 1,
                index: 2
            }
        );
        assert_eq!(pos.cell(), (1, 0));
    }

    #[test]
    fn test_from_code_rejects() {
        assert!(SubplotPosition::from_code(11).is_err());
        assert!(SubplotPosition::from_code(1111).is_err());
        assert!(SubplotPosition::from_code(120).is_err());
        assert!(SubplotPosition::from_code(115).is_err());
    }

    #[test]
    fn test_new_rejects_out_of_grid() {
        assert!(SubplotPosition::new(2, 2, 5).is_err());
        assert!(SubplotPosition::new(0, 2, 1).is_err());
        assert!(SubplotPosition::new(2, 2, 4).is_ok());
    }

    #[test]
    fn test_new_rejects_overflowing_grid() {
        let err = SubplotPosition::new(usize::MAX, 2, 1).unwrap_err();
        assert!(matches!(err, PlotError::InvalidSubplot { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_cell_row_major() {
        let pos = SubplotPosition::new(2, 3, 5).unwrap();
        assert_eq!(pos.cell(), (1, 1));
    }

    #[test]
    fn test_default_args() {
        assert_eq!(
            SubplotArgs::new().validate().unwrap(),
            SubplotPosition::default()
        );
    }

    #[test]
    fn test_nrows_keyword_conflicts() {
        let err = SubplotArgs::new().nrows(1).validate().unwrap_err();
        assert!(matches!(
            err,
            PlotError::ArgumentConflict {
                function: "subplot",
                ..
            }
        ));
        assert!(err.to_string().contains("nrows"));
    }

    #[test]
    fn test_ncols_keyword_conflicts() {
        let err = SubplotArgs::new().ncols(1).validate().unwrap_err();
        assert!(err.to_string().contains("ncols"));
    }
}
