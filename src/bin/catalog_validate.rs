//! Strict validation of the record store.
//!
//! Walks every registered category, checks each record file against the
//! JSON Schema and the catalog invariants the loader assumes (unique types,
//! unique slugs, filenames matching type slugs, consistent rate strings,
//! resolvable compatibility references), and reports everything it finds.
//! Exit status is non-zero when any problem exists so CI can gate on it.

use anyhow::{Context, Result};
use cabledex::{CableStore, validate_store};
use std::env;
use std::path::PathBuf;

fn main() {
    cabledex::init_logging();
    match run() {
        Ok(clean) => {
            if !clean {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(2);
        }
    }
}

fn run() -> Result<bool> {
    let args = CliArgs::parse()?;
    let store = match &args.root {
        Some(root) => CableStore::new(root),
        None => CableStore::discover()?,
    };

    let report = validate_store(&store)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.is_ok());
    }

    for problem in &report.problems {
        println!(
            "{}/{}: {}",
            problem.category, problem.subject, problem.message
        );
    }
    if report.is_ok() {
        println!("catalog-validate: {} records, no problems", report.records);
    } else {
        println!(
            "catalog-validate: {} records, {} problem(s)",
            report.records,
            report.problems.len()
        );
    }
    Ok(report.is_ok())
}

struct CliArgs {
    root: Option<PathBuf>,
    json: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut root = None;
        let mut json = false;
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--root" => {
                    let value = args.next().context("Missing path for --root")?;
                    root = Some(PathBuf::from(value));
                }
                "--json" => json = true,
                "--help" | "-h" => usage(0),
                other => {
                    eprintln!("Unknown option: {other}");
                    usage(1);
                }
            }
        }
        Ok(Self { root, json })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalog-validate [--root DIR] [--json]\n\n\
         Validates every record file under the store's data/ tree and prints\n\
         a problem report. Exits 1 when problems are found, 2 on setup errors."
    );
    std::process::exit(code);
}
