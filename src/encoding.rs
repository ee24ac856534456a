use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::binary_matrix::{BinaryMatrix, BinaryVector, Error as MatrixError};

#[derive(Debug, PartialEq)]
pub enum Error {
    EmptyVector,
    InvalidCharacter { line: usize, column: usize, ch: char },
    Matrix(MatrixError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVector => write!(f, "empty bit string"),
            Self::InvalidCharacter { line, column, ch } => write!(
                f,
                "invalid character {:?} at line {}, column {}: expected '0' or '1'",
                ch, line + 1, column + 1
            ),
            Self::Matrix(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<MatrixError> for Error {
    fn from(e: MatrixError) -> Self {
        Self::Matrix(e)
    }
}

// Decode one line of '0'/'1' characters
fn parse_bits(text: &str, line: usize) -> Result<Vec<u8>, Error> {
    text.chars()
        .enumerate()
        .map(|(column, ch)| match ch {
            '0' => Ok(0_u8),
            '1' => Ok(1_u8),
            _ => Err(Error::InvalidCharacter { line, column, ch }),
        })
        .collect()
}

fn encode_bits(bits: &[u8]) -> String {
    bits.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect()
}

/// Parse a matrix written one row per line
///
/// Windows line endings and trailing blank lines are accepted.
///
/// errors: returns Error on non-binary characters, or a ragged/empty matrix
pub fn matrix_from_text(text: &str) -> Result<BinaryMatrix, Error> {
    let mut rows = Vec::new();
    for (i, line) in text.trim_end().lines().enumerate() {
        rows.push(parse_bits(line.trim_end_matches('\r'), i)?);
    }

    Ok(BinaryMatrix::from_rows(rows)?)
}

/// Serialize a matrix one row per line, rows joined by '\n'
pub fn matrix_to_text(matrix: &BinaryMatrix) -> String {
    let mut res = String::with_capacity(matrix.rows() * (matrix.cols() + 1));
    for row in 0..matrix.rows() {
        if row > 0 {
            res.push('\n');
        }
        res.push_str(&encode_bits(matrix.row(row)));
    }
    res
}

/// Parse a codeword or syndrome from a single line
///
/// errors: returns Error on empty input or non-binary characters
pub fn vector_from_text(text: &str) -> Result<BinaryVector, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyVector);
    }

    Ok(BinaryVector::from_bits(parse_bits(text, 0)?)?)
}

pub fn vector_to_text(vector: &BinaryVector) -> String {
    encode_bits(vector.as_slice())
}
