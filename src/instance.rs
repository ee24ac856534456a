use alloc::{vec, vec::Vec};
use core::fmt;

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::binary_matrix::{syndrome, BinaryMatrix, BinaryVector, Error as MatrixError};
use crate::hamming::weight;
use crate::isd::InstanceParams;

#[derive(Debug, PartialEq)]
pub enum Error {
    Weight { weight: usize, len: usize },
    EmptyMatrix,
    Matrix(MatrixError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weight { weight, len } => write!(
                f,
                "cannot place {} errors in a vector of length {}",
                weight, len
            ),
            Self::EmptyMatrix => write!(f, "instance needs n > k"),
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

/// Generate a uniformly random binary matrix
///
/// errors: returns Error if either dimension is zero
pub fn random_matrix<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
) -> Result<BinaryMatrix, Error> {
    if rows == 0 || cols == 0 {
        return Err(Error::EmptyMatrix);
    }

    let data: Vec<Vec<u8>> = (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen::<bool>() as u8).collect::<Vec<u8>>())
        .collect();

    Ok(BinaryMatrix::from_rows(data)?)
}

/// Generate a vector of length `len` with exactly `weight` ones
///
/// errors: returns Error if `weight > len`
pub fn random_error_vector<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    weight: usize,
) -> Result<BinaryVector, Error> {
    if weight > len {
        return Err(Error::Weight { weight, len });
    }

    let mut bits = vec![0_u8; len];
    for idx in index::sample(rng, len, weight).into_iter() {
        bits[idx] = 1;
    }

    Ok(BinaryVector::from_bits(bits)?)
}

/// Uniformly random permutation of `0..len`
pub fn random_permutation<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..len).collect();
    permutation.shuffle(rng);
    permutation
}

/// Syndrome decoding instance with a known solution
#[derive(Clone, Debug, PartialEq)]
pub struct DecodingInstance {
    pub params: InstanceParams,
    /// `(n - k) x n` parity-check matrix
    pub check_matrix: BinaryMatrix,
    pub syndrome: BinaryVector,
    /// Planted error vector of weight omega
    pub error: BinaryVector,
}

impl DecodingInstance {
    /// Plant a random weight-omega error behind a random check matrix
    ///
    /// errors: returns Error when `n == k`, since there is no check matrix to build
    pub fn random<R: Rng + ?Sized>(rng: &mut R, params: &InstanceParams) -> Result<Self, Error> {
        let n = params.n() as usize;
        let rows = params.redundancy() as usize;

        let check_matrix = random_matrix(rng, rows, n)?;
        let error = random_error_vector(rng, n, params.omega() as usize)?;
        let syndrome = syndrome(&check_matrix, &error)?;

        Ok(Self {
            params: *params,
            check_matrix,
            syndrome,
            error,
        })
    }

    /// Check whether `candidate` solves the instance: `H·e = s` and `wt(e) = omega`
    ///
    /// errors: returns Error if the candidate has the wrong length
    pub fn verify(&self, candidate: &BinaryVector) -> Result<bool, Error> {
        let s = syndrome(&self.check_matrix, candidate)?;
        Ok(s == self.syndrome && weight(candidate) as u64 == self.params.omega())
    }
}
