use isd_analysis::binomial::binomial;
use isd_analysis::isd::{Error, Infeasibility};
use isd_analysis::{AlgorithmTuning, InstanceParams, IsdModel, Variant};

use num::bigint::BigUint;

fn model(n: u64, k: u64, omega: u64) -> IsdModel {
    IsdModel::new(InstanceParams::new(n, k, omega).unwrap())
}

#[test]
fn stern_small_instance() {
    // n = 20, k = 10, w = 4, p = 1, l = 2
    // C(20, 4) / (C(5, 1)^2 * C(8, 2)) = 4845 / 700
    let tuning = AlgorithmTuning::new().with("p", 1).with("l", 2);
    let cost = model(20, 10, 4).get_expected("stern", &tuning).unwrap();

    assert!((cost.to_f64() - 6.9214).abs() < 1e-4);
}

#[test]
fn hashed_variants_share_formulas() {
    let m = model(200, 100, 12);

    let stern = AlgorithmTuning::new().with("p", 2).with("l", 6);
    assert_eq!(
        m.get_expected("stern", &stern).unwrap(),
        m.get_expected("stern_hash", &stern).unwrap()
    );

    let mmt = AlgorithmTuning::new()
        .with("p", 1)
        .with("l1", 5)
        .with("l2", 2);
    assert_eq!(
        m.get_expected("MMT", &mmt).unwrap(),
        m.get_expected("MMT_hash", &mmt).unwrap()
    );
}

#[test]
fn fs_isd_and_mmt_formulas() {
    let m = model(20, 10, 4);

    // FS-ISD: C(20, 4) / (C(6, 1)^2 * C(8, 2)) = 4845 / 1008
    let fs = m
        .get_expected("FS_ISD", &AlgorithmTuning::new().with("p", 1).with("l", 2))
        .unwrap();
    assert_eq!(fs.denominator(), &BigUint::from(1008_u32));
    assert!((fs.to_f64() - 4845.0 / 1008.0).abs() < 1e-12);

    // MMT: p' = 4, C(20, 4) / (C(6, 1)^2 * C(7, 0)) = 4845 / 36
    let mmt = m
        .get_expected(
            "MMT",
            &AlgorithmTuning::new()
                .with("p", 1)
                .with("l1", 2)
                .with("l2", 1),
        )
        .unwrap();
    assert_eq!(mmt.denominator(), &BigUint::from(36_u32));
}

#[test]
fn expected_matches_direct_binomials() {
    let m = model(120, 60, 8);
    let tuning = AlgorithmTuning::new().with("p", 2).with("l", 5);
    let cost = m.expected_for(Variant::FsIsd, &tuning).unwrap();

    let half = binomial((60 + 5) / 2, 2);
    let expected_den = &half * &half * binomial(120 - 60 - 5, 8 - 4);

    assert_eq!(cost.numerator(), &binomial(120, 8));
    assert_eq!(cost.denominator(), &expected_den);
}

#[test]
fn unknown_variant_and_missing_keys() {
    let m = model(20, 10, 4);
    let tuning = AlgorithmTuning::new().with("p", 1).with("l", 2);

    assert_eq!(
        m.get_expected("ball_collision", &tuning),
        Err(Error::UnknownVariant("ball_collision".to_string()))
    );
    assert_eq!(
        m.get_expected("MMT", &tuning),
        Err(Error::MissingTuningKey {
            variant: "MMT",
            key: "l1"
        })
    );
}

#[test]
fn infeasible_tuning_is_a_domain_error() {
    let m = model(20, 10, 1);
    let tuning = AlgorithmTuning::new().with("p", 1).with("l", 2);

    let err = m.get_expected("stern", &tuning).unwrap_err();
    assert_eq!(
        err,
        Error::Domain(Infeasibility::WeightTooSmall {
            omega: 1,
            split_weight: 2
        })
    );
    assert!(err.to_string().contains("omega = 1"));
}

#[test]
fn default_tuning_is_feasible_for_benchmark_sizes() {
    // shape of the instances the benchmark engine runs on
    let m = model(1000, 500, 9);

    for variant in Variant::ALL.iter() {
        let tuning = AlgorithmTuning::defaults(*variant, 1000);
        let cost = m.expected_for(*variant, &tuning).unwrap();
        assert!(cost.to_f64() >= 1.0, "{} gave {}", variant, cost.to_f64());
    }
}
