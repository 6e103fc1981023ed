//! isa-registers: highest vector and scalar register index of one ISA report

use clap::Parser;
use kernel_splitter::{isa, logging, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "isa-registers")]
#[command(version, about = "Highest vector/scalar register index in an ISA report")]
struct Cli {
    /// ISA report produced by the finalizer
    #[arg(value_name = "ISA")]
    report: PathBuf,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match isa::analyze_report(&cli.report) {
        Ok(usage) => {
            print!("{}", output::format_registers(&usage));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
