//! Compare benchmark samples with the expected iteration counts
//!
//! usage: isd-report <benchmark.json>

use std::process;

use isd_analysis::benchmark::BenchmarkReport;

fn run(path: &str) -> Result<(), String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    let report = BenchmarkReport::from_json(&json).map_err(|e| format!("{}: {}", path, e))?;

    // computed in full before anything is printed
    let comparisons = report.reconcile().map_err(|e| e.to_string())?;

    let params = report.params();
    println!("n = {}, k = {}, omega = {}", params.n(), params.k(), params.omega());
    for comparison in comparisons.iter() {
        println!("{}", comparison);
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: {} <benchmark.json>", args[0]);
        process::exit(2);
    }

    if let Err(e) = run(&args[1]) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
