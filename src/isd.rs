//! Closed-form iteration model for information-set decoding
//!
//! Every supported variant estimates the expected number of iterations as
//!
//! ```text
//! C(n, w) / (C(half, p)^2 * C(n - k - L, w - p'))
//! ```
//!
//! where `L` is the sum of the variant's `l` parameters, `p'` the total
//! weight placed in the information set and `half` the size of each of the
//! two halves the split weight is searched in. The variants only differ in
//! the values plugged into that template, see [`VariantDescriptor`].

use alloc::string::{String, ToString};
use core::fmt;
use core::iter::FromIterator;

use hashbrown::HashMap;
use num::bigint::BigUint;
use num::traits::{ToPrimitive, Zero};

use crate::binomial::{binomial, log2};

#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidInstance { n: u64, k: u64, omega: u64 },
    UnknownVariant(String),
    MissingTuningKey {
        variant: &'static str,
        key: &'static str,
    },
    UnexpectedTuningKey {
        variant: &'static str,
        key: String,
    },
    Domain(Infeasibility),
}

/// Reason a set of tuning parameters cannot be evaluated for an instance
#[derive(Debug, PartialEq)]
pub enum Infeasibility {
    /// `C(half, p)` is zero
    SplitExceedsHalf { p: u64, half: u64 },
    /// `n - k - L` is negative
    RedundancyExhausted { redundancy: u64, l_sum: u64 },
    /// `w - p'` is negative
    WeightTooSmall { omega: u64, split_weight: u64 },
    /// `C(n - k - L, w - p')` is zero
    WeightTooLarge { remaining: u64, available: u64 },
    ZeroDenominator,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SplitExceedsHalf { p, half } => write!(
                f,
                "p = {} is larger than the half information set of size {}",
                p, half
            ),
            Self::RedundancyExhausted { redundancy, l_sum } => write!(
                f,
                "l parameters sum to {} but n - k is only {}",
                l_sum, redundancy
            ),
            Self::WeightTooSmall {
                omega,
                split_weight,
            } => write!(
                f,
                "split weight p' = {} exceeds the error weight omega = {}",
                split_weight, omega
            ),
            Self::WeightTooLarge {
                remaining,
                available,
            } => write!(
                f,
                "remaining weight {} does not fit into {} redundancy positions",
                remaining, available
            ),
            Self::ZeroDenominator => write!(f, "success probability evaluated to zero"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInstance { n, k, omega } => write!(
                f,
                "invalid instance parameters n = {}, k = {}, omega = {}: need k <= n and omega <= n",
                n, k, omega
            ),
            Self::UnknownVariant(name) => write!(f, "unknown ISD variant {:?}", name),
            Self::MissingTuningKey { variant, key } => {
                write!(f, "{} requires tuning parameter {:?}", variant, key)
            }
            Self::UnexpectedTuningKey { variant, key } => {
                write!(f, "{} does not use tuning parameter {:?}", variant, key)
            }
            Self::Domain(reason) => write!(f, "infeasible tuning parameters: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Code length, dimension and target error weight of a decoding instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceParams {
    n: u64,
    k: u64,
    omega: u64,
}

impl InstanceParams {
    /// errors: returns Error unless `k <= n` and `omega <= n`
    pub fn new(n: u64, k: u64, omega: u64) -> Result<Self, Error> {
        if k > n || omega > n || n > i64::MAX as u64 {
            return Err(Error::InvalidInstance { n, k, omega });
        }

        Ok(Self { n, k, omega })
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn k(&self) -> u64 {
        self.k
    }

    pub fn omega(&self) -> u64 {
        self.omega
    }

    /// Number of parity-check rows, `n - k`
    pub fn redundancy(&self) -> u64 {
        self.n - self.k
    }
}

/// Search structure shared by a group of ISD variants
#[derive(Debug, PartialEq)]
pub struct VariantDescriptor {
    /// Factor turning `p` into the total split weight `p'`
    pub split_multiplier: u64,
    /// Window parameters summed into `L`
    pub l_keys: &'static [&'static str],
    /// Whether the halves are taken over `k + L` instead of `k`
    pub widens_information_set: bool,
}

impl VariantDescriptor {
    /// `p` followed by the window parameters
    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        core::iter::once("p").chain(self.l_keys.iter().copied())
    }
}

static STERN: VariantDescriptor = VariantDescriptor {
    split_multiplier: 2,
    l_keys: &["l"],
    widens_information_set: false,
};

static FS_ISD: VariantDescriptor = VariantDescriptor {
    split_multiplier: 2,
    l_keys: &["l"],
    widens_information_set: true,
};

static MMT: VariantDescriptor = VariantDescriptor {
    split_multiplier: 4,
    l_keys: &["l1", "l2"],
    widens_information_set: true,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Stern,
    SternHash,
    FsIsd,
    Mmt,
    MmtHash,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Stern,
        Variant::SternHash,
        Variant::FsIsd,
        Variant::Mmt,
        Variant::MmtHash,
    ];

    /// Name used in benchmark records
    pub fn name(self) -> &'static str {
        match self {
            Variant::Stern => "stern",
            Variant::SternHash => "stern_hash",
            Variant::FsIsd => "FS_ISD",
            Variant::Mmt => "MMT",
            Variant::MmtHash => "MMT_hash",
        }
    }

    /// errors: returns Error if the name is not one of the five known variants
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == name)
            .ok_or_else(|| Error::UnknownVariant(name.to_string()))
    }

    pub fn descriptor(self) -> &'static VariantDescriptor {
        match self {
            Variant::Stern | Variant::SternHash => &STERN,
            Variant::FsIsd => &FS_ISD,
            Variant::Mmt | Variant::MmtHash => &MMT,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named tuning parameters of one ISD variant (`p`, `l`, `l1`, `l2`)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlgorithmTuning {
    values: HashMap<String, u64>,
}

impl AlgorithmTuning {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Builder-style setter
    pub fn with(mut self, key: &str, value: u64) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn insert(&mut self, key: &str, value: u64) -> Option<u64> {
        self.values.insert(key.to_string(), value)
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tuning the benchmark engine uses for a code of length `n`
    ///
    /// `p = 0.2% n`, `l = 1.3% n` for the Stern family and FS-ISD,
    /// `l1 = 2.8% n`, `l2 = 0.6% n` for MMT; every value is at least 1.
    pub fn defaults(variant: Variant, n: u64) -> Self {
        let scaled = |per_mille: u64| core::cmp::max(1, n.saturating_mul(per_mille) / 1000);

        let tuning = Self::new().with("p", scaled(2));
        match variant {
            Variant::Stern | Variant::SternHash | Variant::FsIsd => tuning.with("l", scaled(13)),
            Variant::Mmt | Variant::MmtHash => {
                tuning.with("l1", scaled(28)).with("l2", scaled(6))
            }
        }
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for AlgorithmTuning {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Exact expected iteration count, kept as a ratio of big integers
#[derive(Clone, Debug, PartialEq)]
pub struct ExpectedCost {
    numerator: BigUint,
    denominator: BigUint,
}

impl ExpectedCost {
    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }

    pub fn log2(&self) -> f64 {
        log2(&self.numerator) - log2(&self.denominator)
    }

    /// Nearest `f64`; falls back to the logarithms when either side overflows
    pub fn to_f64(&self) -> f64 {
        match (self.numerator.to_f64(), self.denominator.to_f64()) {
            (Some(num), Some(den)) if num.is_finite() && den.is_finite() => num / den,
            _ => libm::exp2(self.log2()),
        }
    }
}

/// How one variant splits the error weight for a given instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split {
    /// Weight searched in each half, `p`
    pub p: u64,
    /// Size of each half of the (widened) information set
    pub half: u64,
    /// Total weight inside the information set, `p'`
    pub split_weight: u64,
    /// Redundancy positions left outside the windows, `n - k - L`
    pub available: u64,
    /// Weight that must fall into those positions, `w - p'`
    pub remaining: u64,
}

/// Expected-cost model for one instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsdModel {
    params: InstanceParams,
}

impl IsdModel {
    pub fn new(params: InstanceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &InstanceParams {
        &self.params
    }

    /// Expected number of iterations for the named variant
    ///
    /// errors: returns Error on unknown variant names, missing or
    /// unrecognized tuning keys, and tuning that is infeasible for the instance
    pub fn get_expected(
        &self,
        variant_name: &str,
        tuning: &AlgorithmTuning,
    ) -> Result<ExpectedCost, Error> {
        self.expected_for(Variant::from_name(variant_name)?, tuning)
    }

    pub fn expected_for(
        &self,
        variant: Variant,
        tuning: &AlgorithmTuning,
    ) -> Result<ExpectedCost, Error> {
        let split = self.split(variant, tuning)?;

        let numerator = binomial(self.params.n as i64, self.params.omega as i64);
        let inner = binomial(split.half as i64, split.p as i64);
        let outer = binomial(split.available as i64, split.remaining as i64);
        let denominator = &inner * &inner * outer;

        if denominator.is_zero() {
            return Err(Error::Domain(Infeasibility::ZeroDenominator));
        }

        Ok(ExpectedCost {
            numerator,
            denominator,
        })
    }

    /// Validate the tuning for `variant` and work out its weight split
    ///
    /// Every binomial argument of the cost formula is checked here, before
    /// anything is evaluated.
    pub fn split(&self, variant: Variant, tuning: &AlgorithmTuning) -> Result<Split, Error> {
        let descriptor = variant.descriptor();
        check_keys(variant, tuning)?;

        let mut l_sum = 0_u64;
        let mut p = 0_u64;
        for key in descriptor.required_keys() {
            let value = tuning.get(key).ok_or(Error::MissingTuningKey {
                variant: variant.name(),
                key,
            })?;

            if key == "p" {
                p = value;
            } else {
                l_sum = l_sum.saturating_add(value);
            }
        }

        let redundancy = self.params.redundancy();
        if l_sum > redundancy {
            return Err(Error::Domain(Infeasibility::RedundancyExhausted {
                redundancy,
                l_sum,
            }));
        }

        let half = if descriptor.widens_information_set {
            (self.params.k + l_sum) / 2
        } else {
            self.params.k / 2
        };
        if p > half {
            return Err(Error::Domain(Infeasibility::SplitExceedsHalf { p, half }));
        }

        let split_weight = p.saturating_mul(descriptor.split_multiplier);
        if split_weight > self.params.omega {
            return Err(Error::Domain(Infeasibility::WeightTooSmall {
                omega: self.params.omega,
                split_weight,
            }));
        }

        let available = redundancy - l_sum;
        let remaining = self.params.omega - split_weight;
        if remaining > available {
            return Err(Error::Domain(Infeasibility::WeightTooLarge {
                remaining,
                available,
            }));
        }

        Ok(Split {
            p,
            half,
            split_weight,
            available,
            remaining,
        })
    }
}

fn check_keys(variant: Variant, tuning: &AlgorithmTuning) -> Result<(), Error> {
    let descriptor = variant.descriptor();

    if let Some(key) = descriptor.required_keys().find(|&k| tuning.get(k).is_none()) {
        return Err(Error::MissingTuningKey {
            variant: variant.name(),
            key,
        });
    }

    // smallest offending key, so the error does not depend on hash order
    if let Some(key) = tuning
        .keys()
        .filter(|&k| !descriptor.required_keys().any(|r| r == k))
        .min()
    {
        return Err(Error::UnexpectedTuningKey {
            variant: variant.name(),
            key: key.to_string(),
        });
    }

    Ok(())
}
