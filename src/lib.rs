#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod benchmark;
pub mod binary_matrix;
pub mod binomial;
pub mod encoding;
pub mod gauss;
pub mod hamming;
pub mod instance;
pub mod isd;

pub use binary_matrix::{syndrome, to_systematic_form, BinaryMatrix, BinaryVector};
pub use isd::{AlgorithmTuning, ExpectedCost, InstanceParams, IsdModel, Variant};
