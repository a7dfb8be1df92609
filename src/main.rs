use std::env;
use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;

use matspeed::config::{DemoConfig, LARGE_SIZE_VAR, REDUCTION_SIZE_VAR, SEED_VAR, TELEMETRY_VAR};
use matspeed::telemetry::jsonl_recorder_from_env;
use matspeed::{run_demo_with_telemetry, MatrixError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Demo,
    Help,
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        let (message, code) = failure(&err);
        eprintln!("{message}");
        std::process::exit(code);
    }
}

fn failure(err: &anyhow::Error) -> (String, i32) {
    (format!("error: {err:#}"), 1)
}

/// `args` excludes the program name.
fn parse_args(args: &[String]) -> matspeed::Result<Mode> {
    match args {
        [] => Ok(Mode::Demo),
        [flag] if flag == "--help" || flag == "-h" => Ok(Mode::Help),
        [arg, ..] => Err(MatrixError::InvalidArgument {
            op: "cli",
            msg: format!("unexpected argument {arg}"),
        }),
    }
}

fn run(args: &[String]) -> Result<()> {
    match parse_args(args)? {
        Mode::Help => {
            print_usage();
            return Ok(());
        }
        Mode::Demo => {}
    }

    let config = DemoConfig::from_env()?;
    let telemetry = jsonl_recorder_from_env(TELEMETRY_VAR)
        .with_context(|| format!("failed to open telemetry sink from {TELEMETRY_VAR}"))?;
    if telemetry.is_some() {
        info!("recording timing samples to ${TELEMETRY_VAR}");
    }

    let report = run_demo_with_telemetry(&config, telemetry.as_ref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report.render(&mut out).context("failed to write report")?;
    out.flush()?;
    Ok(())
}

fn print_usage() {
    println!("Usage: matspeed");
    println!();
    println!("Runs the elementwise sum/product demo and prints timings.");
    println!();
    println!("Environment:");
    println!("  {SEED_VAR:<24} seed for the random matrices (default: entropy)");
    println!("  {LARGE_SIZE_VAR:<24} side of the timed matrices (default: 1000)");
    println!("  {REDUCTION_SIZE_VAR:<24} side of the reduced matrix (default: 500)");
    println!("  {TELEMETRY_VAR:<24} path of a JSONL file for timing samples");
    println!("  {:<24} log filter, e.g. info", "RUST_LOG");
}
