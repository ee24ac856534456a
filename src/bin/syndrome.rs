//! Compute the syndrome of a codeword
//!
//! usage: isd-syndrome <matrix> <codeword> <output_syndrome>

use std::process;

use isd_analysis::encoding::{matrix_from_text, vector_from_text, vector_to_text};
use isd_analysis::syndrome;

fn run(matrix_path: &str, codeword_path: &str, output: &str) -> Result<(), String> {
    let read = |path: &str| std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e));

    let matrix = matrix_from_text(&read(matrix_path)?).map_err(|e| format!("{}: {}", matrix_path, e))?;
    let codeword =
        vector_from_text(&read(codeword_path)?).map_err(|e| format!("{}: {}", codeword_path, e))?;

    let s = syndrome(&matrix, &codeword).map_err(|e| e.to_string())?;

    std::fs::write(output, vector_to_text(&s)).map_err(|e| format!("{}: {}", output, e))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!(
            "usage: {} <matrix> <codeword> <output_syndrome>\nexample: {} small/check_matrix.txt small/codeword.txt small/syndrome.txt",
            args[0], args[0]
        );
        process::exit(2);
    }

    if let Err(e) = run(&args[1], &args[2], &args[3]) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
