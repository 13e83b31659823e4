// src/bin/fuzz_lex.rs
// Generate random-but-valid while programs and check that every one is
// accepted, and that the parallel batch path agrees with one-at-a-time runs.
//   FUZZ_CASES=<n>   number of programs (default 2000)
//   FUZZ_SEED=<u64>  rng seed (default 42)
//   FUZZ_LINES=<n>   max body lines per program (default 12)

use std::time::Instant;

use anyhow::{Result, bail};
use lexdfa::{
    config::{env_u64, env_usize},
    dev::generator::gen_valid_while,
    grammar::while_loop,
    lexer::{analyze_batch_str, analyze_str},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn main() -> Result<()> {
    env_logger::init();

    let cases = env_usize("FUZZ_CASES", 2000);
    let seed = env_u64("FUZZ_SEED", 42);
    let max_lines = env_usize("FUZZ_LINES", 12);

    let mut rng = StdRng::seed_from_u64(seed);
    let srcs: Vec<String> = (0..cases)
        .map(|_| {
            let lines = rng.random_range(0..=max_lines);
            gen_valid_while(&mut rng, lines)
        })
        .collect();

    let table = while_loop::build_table();
    let delims = while_loop::delimiters();

    let t0 = Instant::now();
    let batch = analyze_batch_str(&table, &srcs, &delims);
    let batch_ms = t0.elapsed().as_secs_f64() * 1e3;

    let t0 = Instant::now();
    let mut failures = 0usize;
    for (i, (src, got)) in srcs.iter().zip(&batch).enumerate() {
        let seq = analyze_str(&table, src, &delims);
        if &seq != got {
            failures += 1;
            eprintln!("[fuzz_lex] case {i}: batch and sequential runs differ\n{src:?}");
        }
        if !seq.is_accepted() {
            failures += 1;
            eprintln!("[fuzz_lex] case {i}: valid program not accepted: {:?}\n{src:?}", seq.outcome);
        }
    }
    let seq_ms = t0.elapsed().as_secs_f64() * 1e3;

    let tokens: usize = batch.iter().map(|a| a.tokens.len()).sum();
    println!(
        "[fuzz_lex] seed={seed} cases={cases} tokens={tokens} | batch {batch_ms:.3} ms | sequential {seq_ms:.3} ms"
    );
    if failures > 0 {
        bail!("{failures} failing cases");
    }
    Ok(())
}
