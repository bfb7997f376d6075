//! The encoded QR bit-matrix consumed by the renderer.

use crate::error::{MatrixDefect, RenderError};

/// Side length of a version 1 QR symbol, the smallest renderable matrix.
pub const MIN_MATRIX_SIZE: usize = 21;

/// An immutable N×N grid of dark (`true`) and light (`false`) modules.
///
/// Modules are stored row-major and indexed by `(row, col)`. Construction only
/// checks that the grid is square; the QR-specific invariants (odd side length,
/// at least [`MIN_MATRIX_SIZE`]) are checked by [`validate`](Self::validate),
/// which the compositor runs before drawing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Creates a matrix from `size * size` row-major modules.
    pub fn new(size: usize, modules: Vec<bool>) -> Result<Self, RenderError> {
        let expected = size * size;
        if modules.len() != expected {
            return Err(RenderError::InvalidMatrix {
                size,
                defect: MatrixDefect::LengthMismatch {
                    expected,
                    actual: modules.len(),
                },
            });
        }
        Ok(Self { size, modules })
    }

    /// Creates a matrix from a slice of equally long rows.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, RenderError> {
        let size = rows.len();
        let mut modules = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return Err(RenderError::InvalidMatrix {
                    size,
                    defect: MatrixDefect::LengthMismatch {
                        expected: size,
                        actual: row.len(),
                    },
                });
            }
            modules.extend_from_slice(row);
        }
        Ok(Self { size, modules })
    }

    /// Creates a matrix by evaluating `f(row, col)` for every module.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let modules = (0..size * size).map(|i| f(i / size, i % size)).collect();
        Self { size, modules }
    }

    /// Checks the invariants every renderable QR matrix satisfies.
    pub fn validate(&self) -> Result<(), RenderError> {
        let defect = if self.size < MIN_MATRIX_SIZE {
            MatrixDefect::TooSmall {
                min: MIN_MATRIX_SIZE,
            }
        } else if self.size % 2 == 0 {
            MatrixDefect::EvenSize
        } else {
            return Ok(());
        };
        Err(RenderError::InvalidMatrix {
            size: self.size,
            defect,
        })
    }

    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the module at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.size && col < self.size {
            Some(self.modules[row * self.size + col])
        } else {
            None
        }
    }

    /// Returns true if the module at `(row, col)` is dark. Out-of-range
    /// coordinates read as light.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// Iterates over `(row, col, dark)` for every module, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, &dark)| (i / self.size, i % self.size, dark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: usize) -> ModuleMatrix {
        ModuleMatrix::from_fn(size, |r, c| (r + c) % 2 == 0)
    }

    #[test]
    fn new_rejects_wrong_length() {
        let err = ModuleMatrix::new(21, vec![false; 20]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidMatrix {
                defect: MatrixDefect::LengthMismatch {
                    expected: 441,
                    actual: 20
                },
                ..
            }
        ));
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![vec![true; 3], vec![true; 2], vec![true; 3]];
        assert!(ModuleMatrix::from_rows(&rows).is_err());
    }

    #[test]
    fn from_rows_preserves_layout() {
        let rows = [[true, false, false], [false, true, false], [false, false, true]];
        let matrix = ModuleMatrix::from_rows(&rows).unwrap();
        assert!(matrix.is_dark(1, 1));
        assert!(!matrix.is_dark(0, 1));
        assert_eq!(matrix.dark_count(), 3);
    }

    #[test]
    fn validate_accepts_version_sizes() {
        for size in [21, 25, 29, 177] {
            assert!(checkerboard(size).validate().is_ok(), "size {size}");
        }
    }

    #[test]
    fn validate_rejects_even_and_small() {
        assert!(matches!(
            checkerboard(22).validate(),
            Err(RenderError::InvalidMatrix {
                defect: MatrixDefect::EvenSize,
                ..
            })
        ));
        assert!(matches!(
            checkerboard(19).validate(),
            Err(RenderError::InvalidMatrix {
                defect: MatrixDefect::TooSmall { min: 21 },
                ..
            })
        ));
    }

    #[test]
    fn out_of_range_reads_light() {
        let matrix = checkerboard(21);
        assert_eq!(matrix.get(21, 0), None);
        assert!(!matrix.is_dark(0, 40));
    }

    #[test]
    fn iter_visits_every_module_in_row_order() {
        let matrix = checkerboard(21);
        let visited: Vec<_> = matrix.iter().take(3).collect();
        assert_eq!(visited, vec![(0, 0, true), (0, 1, false), (0, 2, true)]);
        assert_eq!(matrix.iter().count(), 441);
    }
}
