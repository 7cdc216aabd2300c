// src/bin/cyclomet.rs
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cyclomet_core::analysis::collector::ComplexityCollector;
use cyclomet_core::analysis::naming::NamingChecker;
use cyclomet_core::analysis::UnitAnalyzer;
use cyclomet_core::loader;
use cyclomet_core::reporting;

#[derive(Parser)]
#[command(name = "cyclomet", version, about = "Method complexity and naming metrics for Java sources")]
struct Cli {
    /// Root directory containing the Java sources to analyze.
    path: PathBuf,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = parse_args();

    let mut complexity = ComplexityCollector::new();
    let mut naming = NamingChecker::new();
    let failed_files = {
        let mut analyzers: [&mut dyn UnitAnalyzer; 2] = [&mut complexity, &mut naming];
        loader::load_directory(&cli.path, &mut analyzers)?
    };

    println!("{}", "\nAnalyzing cyclomatic complexity:".bold());
    println!("{}", reporting::complexity_report(&complexity));

    println!("{}", "Checking code style:".bold());
    println!("{}", reporting::style_report(&naming, &failed_files));

    Ok(())
}

fn parse_args() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        // Usage problems exit 1; --help/--version exit 0.
        process::exit(i32::from(e.use_stderr()));
    })
}
