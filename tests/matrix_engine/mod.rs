use isd_analysis::binary_matrix::{syndrome, to_systematic_form, BinaryMatrix, BinaryVector, Error};
use isd_analysis::encoding::{matrix_to_text, vector_to_text};
use isd_analysis::gauss;
use isd_analysis::hamming::weight;
use isd_analysis::instance::{random_permutation, DecodingInstance};
use isd_analysis::InstanceParams;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::{matrix, read_matrix, read_vector, vector};

#[test]
fn systematic_form_from_file() {
    let generator = read_matrix("generator_matrix.txt");
    let sys = to_systematic_form(&generator);

    assert_eq!(sys.rows(), 4);
    assert_eq!(sys.cols(), 7);
    assert_eq!(
        matrix_to_text(&sys),
        "1000101\n0100011\n0010101\n0001110"
    );

    // the input is not modified
    assert_eq!(generator, matrix(&[&[1, 0, 1, 1], &[0, 1, 0, 1], &[1, 1, 1, 0]]));
}

#[test]
fn syndrome_from_file() {
    let h = read_matrix("check_matrix.txt");
    let w = read_vector("codeword.txt");

    let s = syndrome(&h, &w).unwrap();
    assert_eq!(vector_to_text(&s), "11");
}

#[test]
fn syndrome_dimension_mismatch() {
    let h = read_matrix("check_matrix.txt");

    assert_eq!(
        syndrome(&h, &vector(&[1, 0, 1, 1])),
        Err(Error::DimensionMismatch {
            expected: 3,
            actual: 4
        })
    );
}

#[test]
fn identity_rows_reproduce_transpose() {
    // multiplying the systematic form by e_i picks out column i,
    // and the syndrome of row i against the identity block gives row i of [I | M^T]
    let m = matrix(&[&[1, 0, 1, 1], &[0, 1, 0, 1], &[1, 1, 1, 0]]);
    let sys = to_systematic_form(&m);
    let sys_t = sys.transpose();

    for i in 0..m.cols() {
        let mut bits = vec![0_u8; sys.rows()];
        bits[i] = 1;
        let unit = vector(&bits);

        let col = syndrome(&sys_t, &unit).unwrap();
        assert_eq!(col.as_slice(), sys.row(i));
        for r in 0..m.rows() {
            assert_eq!(col.get(m.cols() + r), m.get(r, i));
        }
    }
}

#[test]
fn permuted_instance_reduces_and_decodes() {
    let mut rng = StdRng::seed_from_u64(1234);
    let params = InstanceParams::new(30, 15, 4).unwrap();
    let inst = DecodingInstance::random(&mut rng, &params).unwrap();

    // keep drawing information sets until the right block is invertible
    let mut reduced = None;
    for _ in 0..100 {
        let perm = random_permutation(&mut rng, 30);
        let permuted = inst.check_matrix.apply_permutation(&perm).unwrap();

        if let Ok(r) = gauss::reduce(&permuted, &inst.syndrome) {
            reduced = Some((perm, r));
            break;
        }
    }

    let (perm, reduced) = reduced.expect("no invertible information set in 100 draws");

    // the permuted error solves the reduced system
    let permuted_error = inst.error.apply_permutation(&perm).unwrap();
    assert_eq!(
        syndrome(&reduced.matrix, &permuted_error).unwrap(),
        reduced.syndrome
    );

    // and maps back onto the planted solution
    let restored = permuted_error.restore_permutation(&perm).unwrap();
    assert!(inst.verify(&restored).unwrap());
    assert_eq!(weight(&restored), 4);
}

#[test]
fn reduced_matrix_has_identity_block() {
    let h = BinaryMatrix::from_rows(vec![
        vec![0, 1, 1, 0, 1, 1],
        vec![1, 1, 0, 1, 0, 1],
        vec![1, 0, 1, 1, 1, 1],
    ])
    .unwrap();
    let s = BinaryVector::from_bits(vec![1, 0, 1]).unwrap();
    let reduced = gauss::reduce(&h, &s).unwrap();

    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(reduced.matrix.get(row, 3 + col), (row == col) as u8);
        }
    }
}
