use core::fmt;

use crate::binary_matrix::{BinaryMatrix, BinaryVector, Error as MatrixError};

#[derive(Debug, PartialEq)]
pub enum Error {
    Matrix(MatrixError),
    TooManyRows { rows: usize, cols: usize },
    Singular { column: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matrix(e) => write!(f, "{}", e),
            Self::TooManyRows { rows, cols } => write!(
                f,
                "check matrix has {} rows but only {} columns",
                rows, cols
            ),
            Self::Singular { column } => {
                write!(f, "no pivot in column {}, right block is singular", column)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Check matrix and syndrome after reduction
#[derive(Clone, Debug, PartialEq)]
pub struct Reduced {
    pub matrix: BinaryMatrix,
    pub syndrome: BinaryVector,
}

/// Perform Gauss-Jordan reduction on an `r x n` check matrix
///
/// Row operations turn the right-most `r x r` block into the identity,
/// giving `[Q | I]`. The same operations are applied to the syndrome, so
/// `H·e = s` holds exactly when `H'·e = s'`.
///
/// The inputs are left untouched.
///
/// errors: returns Error if the syndrome length differs from the row count,
/// if there are more rows than columns, or if the right block is singular
pub fn reduce(check_matrix: &BinaryMatrix, syndrome: &BinaryVector) -> Result<Reduced, Error> {
    let rows = check_matrix.rows();
    let cols = check_matrix.cols();

    if syndrome.len() != rows {
        return Err(Error::Matrix(MatrixError::DimensionMismatch {
            expected: rows,
            actual: syndrome.len(),
        }));
    }

    if rows > cols {
        return Err(Error::TooManyRows { rows, cols });
    }

    let k = cols - rows;
    let mut matrix = check_matrix.clone();
    let mut sums = syndrome.clone();

    for pivot in 0..rows {
        let col = k + pivot;

        // if pivot bit is zero, search for a later row with a non-zero pivot bit
        if matrix.get(pivot, col) == 0 {
            match (pivot + 1..rows).find(|&row| matrix.get(row, col) != 0) {
                Some(row) => {
                    matrix.swap_rows(pivot, row);
                    sums.swap(pivot, row);
                }
                None => return Err(Error::Singular { column: col }),
            }
        }

        // clear the pivot column in every other row
        for row in 0..rows {
            if row != pivot && matrix.get(row, col) != 0 {
                matrix.xor_rows(pivot, row);
                sums.xor_entry(pivot, row);
            }
        }
    }

    Ok(Reduced {
        matrix,
        syndrome: sums,
    })
}
