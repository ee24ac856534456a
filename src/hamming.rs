use core::fmt;

use crate::binary_matrix::BinaryVector;

#[derive(Debug, PartialEq)]
pub enum Error {
    Length { left: usize, right: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { left, right } => {
                write!(f, "vectors of unequal length ({} and {})", left, right)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Number of ones in a binary vector
pub fn weight(vector: &BinaryVector) -> usize {
    vector.as_slice().iter().filter(|&&b| b != 0).count()
}

/// Find the hamming distance between two binary vectors
///
/// errors: returns Error on unequal lengths
pub fn distance(left: &BinaryVector, right: &BinaryVector) -> Result<usize, Error> {
    if left.len() != right.len() {
        return Err(Error::Length {
            left: left.len(),
            right: right.len(),
        });
    }

    Ok(left
        .as_slice()
        .iter()
        .zip(right.as_slice().iter())
        .filter(|(l, r)| l != r)
        .count())
}
