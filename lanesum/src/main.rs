use clap::*;
use colored::Colorize;
use liblanesum::buffer::{AlignedBuffer, MisalignedBuffer};
use liblanesum::reduce::{LoadMode, sum_scalar, sum_vector};
use liblanesum::timing;
use rand::{Rng, RngCore, SeedableRng, rng};
use rand_chacha::ChaCha8Rng;
use std::process::ExitCode;

const DEFAULT_SIZE: usize = 1_000_000;
const DEFAULT_RUNS: usize = 1_000;

// only use eprintln to log, so stdout can be used for the report
macro_rules! log {
    ($($rest:tt)*) => {
        std::eprintln!($($rest)*)
    }
}

#[derive(Parser, Debug)]
#[command(version)]
struct CliArgs {
    /// Number of f64 elements to allocate and sum.
    #[clap(long)]
    size: Option<usize>,

    /// Number of timed summation repetitions per alignment condition.
    #[clap(long)]
    runs: Option<usize>,
}

/// Resolve the run configuration from the command line.
/// The defaults are only used as a pair: unless both flags are given, both fall back, so a
/// report is never a mix of explicit and implicit configuration.
fn resolve_config(args: &CliArgs) -> (usize, usize) {
    match (args.size, args.runs) {
        (Some(size), Some(runs)) => (size, runs),
        _ => {
            log!(
                "{}",
                "No --size or --runs provided. Using default values.".yellow()
            );
            (DEFAULT_SIZE, DEFAULT_RUNS)
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let (size, runs) = resolve_config(&args);

    let mut aligned = match AlignedBuffer::new(size) {
        Ok(buffer) => buffer,
        Err(e) => {
            log!("{}", format!("Aligned buffer allocation failed: {e}").red());
            return ExitCode::FAILURE;
        }
    };

    // fixed seed drawn once up front, so a run can be reproduced from its log
    let seed = rng().next_u64();
    log!("Random seed: {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for value in aligned.as_mut_slice() {
        *value = rng.random();
    }

    let misaligned = match MisalignedBuffer::copy_of(&aligned) {
        Ok(buffer) => buffer,
        Err(e) => {
            log!("{}", format!("Unaligned buffer allocation failed: {e}").red());
            return ExitCode::FAILURE;
        }
    };

    println!("Running with: size={size}, runs={runs}");
    println!();

    let scalar_sum = sum_scalar(aligned.as_slice());
    let aligned_sum = sum_vector(aligned.as_slice(), LoadMode::Aligned);
    let unaligned_sum = sum_vector(misaligned.as_slice(), LoadMode::Unaligned);

    println!("Scalar sum:    {scalar_sum:.3}");
    println!("Aligned sum:   {aligned_sum:.3}");
    println!("Unaligned sum: {unaligned_sum:.3}");

    // guards the unaligned load path against a correctness regression; the sums are
    // otherwise only compared by eye, since their rounding legitimately differs
    if unaligned_sum.is_nan() {
        log!("{}", "Error: unaligned sum is NaN".red());
        return ExitCode::FAILURE;
    }

    let aligned_timing = timing::measure(aligned.as_slice(), LoadMode::Aligned, runs);
    let unaligned_timing = timing::measure(misaligned.as_slice(), LoadMode::Unaligned, runs);

    println!();
    println!("Performance (average over {runs} runs):");
    println!("Aligned sum time:   {:.3} ns", aligned_timing.nanos_per_run);
    println!("Unaligned sum time: {:.3} ns", unaligned_timing.nanos_per_run);
    println!(
        "Performance ratio (unaligned/aligned): {:.3}",
        unaligned_timing.nanos_per_run / aligned_timing.nanos_per_run
    );

    ExitCode::SUCCESS
}
