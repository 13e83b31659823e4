// src/main.rs
// Validates while statements (or any JSON-defined table) read from the files
// named on the command line, or from stdin when none are given.

use std::{
    env, fs,
    io::{self, Read},
    process::ExitCode,
};

use anyhow::{Context, Result};
use lexdfa::{
    config::Config,
    grammar::while_loop,
    lexer::{
        Outcome, analyze_batch_str, analyze_with,
        tables::{StateId, TransitionTable, load_table_json},
    },
    report::{Printer, describe_expected, line_col},
};

struct Input {
    label: String,
    src: String,
}

fn read_inputs() -> Result<Vec<Input>> {
    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        let mut src = String::new();
        io::stdin()
            .read_to_string(&mut src)
            .context("reading stdin")?;
        return Ok(vec![Input {
            label: "<stdin>".into(),
            src,
        }]);
    }
    paths
        .into_iter()
        .map(|p| -> Result<Input> {
            let src = fs::read_to_string(&p).with_context(|| format!("reading {p}"))?;
            Ok(Input { label: p, src })
        })
        .collect()
}

fn run_one<S: StateId>(
    table: &TransitionTable<S, char>,
    cfg: &Config,
    input: &Input,
) -> Result<bool> {
    let delims = cfg.delimiters();
    let symbols: Vec<char> = input.src.chars().collect();

    let stdout = io::stdout();
    let mut printer = Printer::new(stdout.lock(), &symbols, cfg.end_marker);
    let analysis = analyze_with(table, &symbols, &delims, cfg.trace, &mut printer);
    drop(printer.finish().context("writing report")?);

    if let Outcome::Rejected { state, .. } | Outcome::NotAccepted { state } = &analysis.outcome {
        println!("expected one of: {}", describe_expected(table, state));
    }
    Ok(analysis.is_accepted())
}

fn run_many<S>(table: &TransitionTable<S, char>, cfg: &Config, inputs: &[Input]) -> usize
where
    S: StateId + Send + Sync,
{
    let delims = cfg.delimiters();
    let srcs: Vec<&str> = inputs.iter().map(|i| i.src.as_str()).collect();
    let results = analyze_batch_str(table, &srcs, &delims);

    let mut failed = 0;
    for (input, analysis) in inputs.iter().zip(&results) {
        match &analysis.outcome {
            Outcome::Accepted => {
                println!("{}: valid ({} tokens)", input.label, analysis.tokens.len());
            }
            Outcome::Rejected {
                position,
                offending_symbol,
                ..
            } => {
                failed += 1;
                let chars: Vec<char> = input.src.chars().collect();
                let (line, col) = line_col(&chars, *position);
                println!(
                    "{}:{line}:{col}: invalid symbol {offending_symbol:?}",
                    input.label
                );
            }
            Outcome::NotAccepted { state } => {
                failed += 1;
                println!("{}: incomplete (stopped in {state:?})", input.label);
            }
        }
    }
    failed
}

fn run<S>(table: &TransitionTable<S, char>, cfg: &Config, inputs: &[Input]) -> Result<ExitCode>
where
    S: StateId + Send + Sync,
{
    let ok = match inputs {
        [single] => run_one(table, cfg, single)?,
        many => {
            let failed = run_many(table, cfg, many);
            log::info!("{} of {} inputs valid", many.len() - failed, many.len());
            failed == 0
        }
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cfg = Config::from_env()?;
    let inputs = read_inputs()?;

    match &cfg.table_path {
        Some(path) => {
            let table: TransitionTable<String, char> = load_table_json(path)?;
            log::info!("using table {} ({} transitions)", path.display(), table.len());
            run(&table, &cfg, &inputs)
        }
        None => run(&while_loop::build_table(), &cfg, &inputs),
    }
}
