//! Comparison of measured ISD runs against the iteration model
//!
//! The benchmark engine writes one JSON document per run:
//!
//! ```text
//! {
//!     "stern": [{"iterations_count": 12, "duration": 130}, ...],
//!     "stern_params": {"p": 1, "l": 4},
//!     "MMT": [...],
//!     "MMT_params": {"p": 1, "l1": 8, "l2": 2},
//!     "params": {"n": 300, "k": 150, "omega": 9}
//! }
//! ```
//!
//! Durations are in milliseconds.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::iter::FromIterator;

use serde::Deserialize;
use serde_json::Value;

use crate::isd::{AlgorithmTuning, Error as IsdError, InstanceParams, IsdModel, Variant};

const PARAMS_KEY: &str = "params";
const TUNING_SUFFIX: &str = "_params";

#[derive(Debug, PartialEq)]
pub enum Error {
    Json(String),
    MissingParams,
    InvalidSample { algorithm: String, index: usize },
    MissingTuning(String),
    EmptySampleSet(String),
    Isd(IsdError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "malformed benchmark data: {}", e),
            Self::MissingParams => write!(f, "benchmark data has no {:?} entry", PARAMS_KEY),
            Self::InvalidSample { algorithm, index } => write!(
                f,
                "sample {} of {} has a negative or non-finite duration",
                index, algorithm
            ),
            Self::MissingTuning(alg) => {
                write!(f, "no {}{} entry for {}", alg, TUNING_SUFFIX, alg)
            }
            Self::EmptySampleSet(alg) => write!(f, "no samples recorded for {}", alg),
            Self::Isd(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<IsdError> for Error {
    fn from(e: IsdError) -> Self {
        Self::Isd(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

/// One empirical decoding trial
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Sample {
    pub iterations_count: u64,
    pub duration: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSet(Vec<Sample>);

impl SampleSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, sample: Sample) {
        self.0.push(sample);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.0.iter()
    }

    /// Average iteration count, None for an empty set
    pub fn mean_iterations(&self) -> Option<f64> {
        self.mean(|s| s.iterations_count as f64)
    }

    /// Average duration in milliseconds, None for an empty set
    pub fn mean_duration(&self) -> Option<f64> {
        self.mean(|s| s.duration)
    }

    fn mean<F: Fn(&Sample) -> f64>(&self, field: F) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }

        Some(self.0.iter().map(field).sum::<f64>() / self.0.len() as f64)
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Samples and tuning recorded under one algorithm name
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmRecord {
    pub name: String,
    pub samples: Option<SampleSet>,
    pub tuning: Option<AlgorithmTuning>,
}

impl AlgorithmRecord {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            samples: None,
            tuning: None,
        }
    }
}

#[derive(Deserialize)]
struct RawParams {
    n: u64,
    k: u64,
    omega: u64,
}

/// Measured against expected cost for one algorithm
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub variant: Variant,
    pub trials: usize,
    pub mean_iterations: f64,
    pub mean_duration: f64,
    pub expected: f64,
    /// mean_iterations / expected
    pub ratio: f64,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} trials: {:>4}  mean iterations: {:>12.2}  expected: {:>12.2}  ratio: {:>6.3}  mean duration: {:.2}ms",
            self.variant.name(),
            self.trials,
            self.mean_iterations,
            self.expected,
            self.ratio,
            self.mean_duration
        )
    }
}

/// Parsed benchmark record set
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkReport {
    params: InstanceParams,
    records: BTreeMap<String, AlgorithmRecord>,
}

impl BenchmarkReport {
    /// Parse a benchmark JSON document
    ///
    /// errors: returns Error on malformed JSON, a missing or invalid "params"
    /// entry, or samples with a negative duration
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(json)?;

        let params_value = raw.get(PARAMS_KEY).ok_or(Error::MissingParams)?;
        let p: RawParams = serde_json::from_value(params_value.clone())?;
        let params = InstanceParams::new(p.n, p.k, p.omega)?;

        let mut records: BTreeMap<String, AlgorithmRecord> = BTreeMap::new();
        for (key, value) in raw.into_iter() {
            if key == PARAMS_KEY {
                continue;
            }

            match key.strip_suffix(TUNING_SUFFIX).map(|alg| alg.to_string()) {
                Some(alg) => {
                    let table: BTreeMap<String, u64> = serde_json::from_value(value)?;
                    records
                        .entry(alg.clone())
                        .or_insert_with(|| AlgorithmRecord::new(&alg))
                        .tuning = Some(table.into_iter().collect());
                }
                None => {
                    let samples: Vec<Sample> = serde_json::from_value(value)?;
                    if let Some(index) = samples
                        .iter()
                        .position(|s| !s.duration.is_finite() || s.duration < 0.0)
                    {
                        return Err(Error::InvalidSample {
                            algorithm: key,
                            index,
                        });
                    }

                    records
                        .entry(key.clone())
                        .or_insert_with(|| AlgorithmRecord::new(&key))
                        .samples = Some(samples.into_iter().collect());
                }
            }
        }

        Ok(Self { params, records })
    }

    pub fn params(&self) -> &InstanceParams {
        &self.params
    }

    /// Records in name order
    pub fn records(&self) -> impl Iterator<Item = &AlgorithmRecord> {
        self.records.values()
    }

    pub fn record(&self, name: &str) -> Option<&AlgorithmRecord> {
        self.records.get(name)
    }

    /// Compare every algorithm that has samples with the model's expectation
    ///
    /// Tuning entries without samples are ignored. Any failure aborts the
    /// whole comparison, no partial result is returned.
    ///
    /// errors: returns Error on unknown algorithm names, missing tuning,
    /// empty sample sets, and tuning the model rejects
    pub fn reconcile(&self) -> Result<Vec<Comparison>, Error> {
        let model = IsdModel::new(self.params);
        let mut res = Vec::with_capacity(self.records.len());

        for record in self.records.values() {
            let samples = match &record.samples {
                Some(samples) => samples,
                None => continue,
            };

            let variant = Variant::from_name(&record.name)?;
            let tuning = record
                .tuning
                .as_ref()
                .ok_or_else(|| Error::MissingTuning(record.name.clone()))?;

            let (mean_iterations, mean_duration) =
                match (samples.mean_iterations(), samples.mean_duration()) {
                    (Some(iterations), Some(duration)) => (iterations, duration),
                    _ => return Err(Error::EmptySampleSet(record.name.clone())),
                };

            let expected = model.expected_for(variant, tuning)?.to_f64();

            res.push(Comparison {
                variant,
                trials: samples.len(),
                mean_iterations,
                mean_duration,
                expected,
                ratio: mean_iterations / expected,
            });
        }

        Ok(res)
    }
}
