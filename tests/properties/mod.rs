use isd_analysis::binary_matrix::{syndrome, to_systematic_form, BinaryMatrix, BinaryVector};
use isd_analysis::encoding::{matrix_from_text, matrix_to_text};
use isd_analysis::gauss;
use isd_analysis::{AlgorithmTuning, InstanceParams, IsdModel};

use proptest::collection::vec;
use proptest::prelude::*;

fn binary_matrix(max_rows: usize, max_cols: usize) -> impl Strategy<Value = BinaryMatrix> {
    (1..=max_rows, 1..=max_cols).prop_flat_map(|(rows, cols)| {
        vec(vec(0_u8..=1, cols), rows).prop_map(|data| BinaryMatrix::from_rows(data).unwrap())
    })
}

fn matrix_and_two_words() -> impl Strategy<Value = (BinaryMatrix, Vec<u8>, Vec<u8>)> {
    binary_matrix(12, 24).prop_flat_map(|m| {
        let cols = m.cols();
        (Just(m), vec(0_u8..=1, cols), vec(0_u8..=1, cols))
    })
}

proptest! {
    #[test]
    fn systematic_form_shape(m in binary_matrix(10, 10)) {
        let sys = to_systematic_form(&m);

        prop_assert_eq!(sys.rows(), m.cols());
        prop_assert_eq!(sys.cols(), m.cols() + m.rows());
        for i in 0..m.cols() {
            for j in 0..m.cols() {
                prop_assert_eq!(sys.get(i, j), (i == j) as u8);
            }
            for r in 0..m.rows() {
                prop_assert_eq!(sys.get(i, m.cols() + r), m.get(r, i));
            }
        }
    }

    #[test]
    fn syndrome_is_linear((m, a, b) in matrix_and_two_words()) {
        let sum: Vec<u8> = a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect();

        let sa = syndrome(&m, &BinaryVector::from_bits(a).unwrap()).unwrap();
        let sb = syndrome(&m, &BinaryVector::from_bits(b).unwrap()).unwrap();
        let ssum = syndrome(&m, &BinaryVector::from_bits(sum).unwrap()).unwrap();

        prop_assert!(ssum.as_slice().iter().all(|&bit| bit <= 1));
        let expected: Vec<u8> = sa.as_slice().iter().zip(sb.as_slice()).map(|(x, y)| x ^ y).collect();
        prop_assert_eq!(ssum.as_slice(), &expected[..]);
    }

    #[test]
    fn syndrome_ignores_zero_columns((m, a, b) in matrix_and_two_words()) {
        // copy b into a wherever the column of m is all zero
        let merged: Vec<u8> = (0..m.cols())
            .map(|j| if (0..m.rows()).all(|r| m.get(r, j) == 0) { b[j] } else { a[j] })
            .collect();

        prop_assert_eq!(
            syndrome(&m, &BinaryVector::from_bits(a).unwrap()).unwrap(),
            syndrome(&m, &BinaryVector::from_bits(merged).unwrap()).unwrap()
        );
    }

    #[test]
    fn reduction_preserves_solutions((m, e, _) in matrix_and_two_words()) {
        let e = BinaryVector::from_bits(e).unwrap();
        let s = syndrome(&m, &e).unwrap();

        if let Ok(reduced) = gauss::reduce(&m, &s) {
            prop_assert_eq!(syndrome(&reduced.matrix, &e).unwrap(), reduced.syndrome);
        }
    }

    #[test]
    fn text_format_roundtrip(m in binary_matrix(8, 16)) {
        prop_assert_eq!(matrix_from_text(&matrix_to_text(&m)).unwrap(), m);
    }

    #[test]
    fn stern_aliases_agree(n in 20_u64..200, p in 1_u64..3, l in 0_u64..8) {
        let k = n / 2;
        let omega = 2 * p + 2;
        let model = IsdModel::new(InstanceParams::new(n, k, omega).unwrap());
        let tuning = AlgorithmTuning::new().with("p", p).with("l", l);

        prop_assert_eq!(
            model.get_expected("stern", &tuning),
            model.get_expected("stern_hash", &tuning)
        );
    }
}
