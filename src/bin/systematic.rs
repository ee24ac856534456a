//! Convert a matrix of generator rows into systematic form
//!
//! usage: isd-systematic <input_matrix> <output_matrix>

use std::process;

use isd_analysis::encoding::{matrix_from_text, matrix_to_text};
use isd_analysis::to_systematic_form;

fn run(input: &str, output: &str) -> Result<(), String> {
    let text = std::fs::read_to_string(input).map_err(|e| format!("{}: {}", input, e))?;
    let matrix = matrix_from_text(&text).map_err(|e| format!("{}: {}", input, e))?;

    let sys = to_systematic_form(&matrix);
    println!(
        "{}x{} -> {}x{}",
        matrix.rows(),
        matrix.cols(),
        sys.rows(),
        sys.cols()
    );

    std::fs::write(output, matrix_to_text(&sys)).map_err(|e| format!("{}: {}", output, e))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: {} <input_matrix> <output_matrix>", args[0]);
        process::exit(2);
    }

    if let Err(e) = run(&args[1], &args[2]) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
