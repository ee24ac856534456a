use alloc::{vec, vec::Vec};
use core::fmt;

/// Ways a set of rows can fail to form a binary matrix
#[derive(Debug, PartialEq)]
pub enum ShapeError {
    Empty,
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    NonBinary {
        row: usize,
        col: usize,
        value: u8,
    },
}

#[derive(Debug, PartialEq)]
pub enum Error {
    Shape(ShapeError),
    DimensionMismatch { expected: usize, actual: usize },
    NonBinary { index: usize, value: u8 },
    InvalidPermutation,
    ColumnOutOfRange(usize),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "matrix has no rows or no columns"),
            Self::Ragged {
                row,
                expected,
                actual,
            } => write!(
                f,
                "row {} has {} columns, expected {}",
                row, actual, expected
            ),
            Self::NonBinary { row, col, value } => write!(
                f,
                "entry ({}, {}) is {}, expected 0 or 1",
                row, col, value
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(e) => write!(f, "shape error: {}", e),
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: matrix has {} columns, vector has length {}",
                expected, actual
            ),
            Self::NonBinary { index, value } => {
                write!(f, "vector entry {} is {}, expected 0 or 1", index, value)
            }
            Self::InvalidPermutation => write!(f, "not a permutation of the column indices"),
            Self::ColumnOutOfRange(col) => write!(f, "column index {} out of range", col),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Dense GF(2) matrix, one byte per entry, row-major
///
/// Entries are always 0 or 1. There is no public way to mutate a matrix
/// after construction, every transform returns a new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMatrix {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl BinaryMatrix {
    /// Build a matrix from a list of rows
    ///
    /// errors: returns Error on empty input, rows of unequal length, or non-binary entries
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, Error> {
        let cols = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(Error::Shape(ShapeError::Empty)),
        };

        let mut data = Vec::with_capacity(rows.len() * cols);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::Shape(ShapeError::Ragged {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                }));
            }

            if let Some((j, &value)) = row.iter().enumerate().find(|&(_, &b)| b > 1) {
                return Err(Error::Shape(ShapeError::NonBinary {
                    row: i,
                    col: j,
                    value,
                }));
            }

            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Identity matrix of the given size
    pub fn identity(size: usize) -> Self {
        let mut data = vec![0_u8; size * size];
        for i in 0..size {
            data[i * size + i] = 1;
        }

        Self {
            rows: size,
            cols: size,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at (row, col)
    ///
    /// Panics if either index is out of range
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        self.data[row * self.cols + col]
    }

    /// Borrow a full row
    pub fn row(&self, row: usize) -> &[u8] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[row * self.cols + col]);
            }
        }

        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Horizontally concatenate two matrices, [self | other]
    ///
    /// errors: returns Error if the row counts differ
    pub fn hstack(&self, other: &Self) -> Result<Self, Error> {
        if self.rows != other.rows {
            return Err(Error::DimensionMismatch {
                expected: self.rows,
                actual: other.rows,
            });
        }

        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in 0..self.rows {
            data.extend_from_slice(self.row(row));
            data.extend_from_slice(other.row(row));
        }

        Ok(Self {
            rows: self.rows,
            cols,
            data,
        })
    }

    /// Reorder the columns: column `j` of the result is column `permutation[j]` of self
    ///
    /// errors: returns Error if `permutation` is not a permutation of `0..cols`
    pub fn apply_permutation(&self, permutation: &[usize]) -> Result<Self, Error> {
        check_permutation(permutation, self.cols)?;

        let mut data = Vec::with_capacity(self.data.len());
        for row in 0..self.rows {
            let bits = self.row(row);
            data.extend(permutation.iter().map(|&src| bits[src]));
        }

        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// XOR of the selected columns
    ///
    /// errors: returns Error if any index is out of range
    pub fn sum_of_columns(&self, indexes: &[usize]) -> Result<BinaryVector, Error> {
        if let Some(&bad) = indexes.iter().find(|&&idx| idx >= self.cols) {
            return Err(Error::ColumnOutOfRange(bad));
        }

        let mut sum = vec![0_u8; self.rows];
        for (row, bit) in sum.iter_mut().enumerate() {
            let bits = self.row(row);
            for &idx in indexes {
                *bit ^= bits[idx];
            }
        }

        Ok(BinaryVector(sum))
    }

    pub(crate) fn swap_rows(&mut self, row_i: usize, row_j: usize) {
        if row_i == row_j {
            return;
        }

        for col in 0..self.cols {
            self.data.swap(row_i * self.cols + col, row_j * self.cols + col);
        }
    }

    /// Add (XOR) row `src` into row `dst`
    pub(crate) fn xor_rows(&mut self, src: usize, dst: usize) {
        for col in 0..self.cols {
            self.data[dst * self.cols + col] ^= self.data[src * self.cols + col];
        }
    }
}

/// Ordered sequence of bits: a codeword, error vector or syndrome
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryVector(Vec<u8>);

impl BinaryVector {
    /// errors: returns Error if any entry is not 0 or 1
    pub fn from_bits(bits: Vec<u8>) -> Result<Self, Error> {
        if let Some((index, &value)) = bits.iter().enumerate().find(|&(_, &b)| b > 1) {
            return Err(Error::NonBinary { index, value });
        }

        Ok(Self(bits))
    }

    pub fn zeros(len: usize) -> Self {
        Self(vec![0_u8; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> u8 {
        self.0[idx]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Permute entries the same way [`BinaryMatrix::apply_permutation`] permutes columns
    ///
    /// For a permuted check matrix `H' = H.apply_permutation(p)`, `H'·e.apply_permutation(p) = H·e`.
    pub fn apply_permutation(&self, permutation: &[usize]) -> Result<Self, Error> {
        check_permutation(permutation, self.len())?;
        Ok(Self(permutation.iter().map(|&src| self.0[src]).collect()))
    }

    /// Undo [`BinaryVector::apply_permutation`], mapping a vector found
    /// against a permuted matrix back to the original positions
    pub fn restore_permutation(&self, permutation: &[usize]) -> Result<Self, Error> {
        check_permutation(permutation, self.len())?;

        let mut bits = vec![0_u8; self.len()];
        for (j, &dst) in permutation.iter().enumerate() {
            bits[dst] = self.0[j];
        }

        Ok(Self(bits))
    }

    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    pub(crate) fn xor_entry(&mut self, src: usize, dst: usize) {
        self.0[dst] ^= self.0[src];
    }
}

fn check_permutation(permutation: &[usize], len: usize) -> Result<(), Error> {
    if permutation.len() != len {
        return Err(Error::InvalidPermutation);
    }

    let mut seen = vec![false; len];
    for &idx in permutation {
        if idx >= len || seen[idx] {
            return Err(Error::InvalidPermutation);
        }
        seen[idx] = true;
    }

    Ok(())
}

/// Convert a matrix of generator-style rows into systematic form
///
/// For an `r x c` input `M` the result is the `c x (c + r)` matrix `[I_c | M^T]`.
pub fn to_systematic_form(matrix: &BinaryMatrix) -> BinaryMatrix {
    let rows = matrix.cols();
    let cols = matrix.cols() + matrix.rows();

    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        // identity block
        data.extend((0..rows).map(|j| (i == j) as u8));
        // row i of the transpose is column i of the input
        data.extend((0..matrix.rows()).map(|r| matrix.get(r, i)));
    }

    BinaryMatrix { rows, cols, data }
}

/// Compute the syndrome `H·w mod 2`
///
/// Each row is accumulated as an ordinary integer dot product, the reduction
/// modulo 2 happens once at the end.
///
/// errors: returns Error if the codeword length differs from the column count
pub fn syndrome(matrix: &BinaryMatrix, codeword: &BinaryVector) -> Result<BinaryVector, Error> {
    if matrix.cols() != codeword.len() {
        return Err(Error::DimensionMismatch {
            expected: matrix.cols(),
            actual: codeword.len(),
        });
    }

    let bits = (0..matrix.rows())
        .map(|row| {
            let acc: u64 = matrix
                .row(row)
                .iter()
                .zip(codeword.as_slice().iter())
                .map(|(&m, &w)| m as u64 * w as u64)
                .sum();
            (acc % 2) as u8
        })
        .collect();

    Ok(BinaryVector(bits))
}
