//! kernel-splitter CLI
//!
//! Splits an OpenCL source into per-kernel files, builds each with the HSAIL
//! toolchain and reports register and instruction usage.

use clap::Parser;
use kernel_splitter::{logging, output, HsailToolchain, OutputFormat, Pipeline, ToolchainConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kernel-splitter")]
#[command(author, version, about = "Per-kernel ISA register and instruction usage")]
#[command(long_about = "
Splits a multi-kernel OpenCL source into one file per `__kernel void`
declaration (each prefixed with the shared preamble), compiles each with
`cloc.sh -hsail`, finalizes it with `finalizer_dumper`, and reports the
highest vector/scalar register index and instruction count per kernel,
followed by totals.
")]
struct Cli {
    /// OpenCL source containing one or more kernels
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Directory for generated files (tools run here)
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// OpenCL to BRIG compiler
    #[arg(long, env = "KERNEL_SPLITTER_COMPILER", default_value = "cloc.sh")]
    compiler: PathBuf,

    /// BRIG finalizer that writes isa.txt
    #[arg(long, env = "KERNEL_SPLITTER_FINALIZER", default_value = "finalizer_dumper")]
    finalizer: PathBuf,

    /// Extension of the generated kernel sources
    #[arg(long, value_name = "EXT", default_value = "cl")]
    source_ext: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ToolchainConfig {
        compiler: tool_path(cli.compiler)?,
        finalizer: tool_path(cli.finalizer)?,
        source_extension: cli.source_ext,
        ..Default::default()
    };
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let pipeline = Pipeline::new(HsailToolchain::new(config), cli.output_dir);
    let summary = pipeline.run_file(&cli.source, |kernel| {
        output::write_kernel(kernel, format).map_err(Into::into)
    })?;
    output::write_summary(&summary, format)?;

    Ok(())
}

/// Tools run inside the output directory, so a relative path such as
/// `./bin/cloc.sh` is anchored to the invocation directory. Bare names are
/// left for `PATH` lookup.
fn tool_path(path: PathBuf) -> std::io::Result<PathBuf> {
    if path.components().count() > 1 && path.is_relative() {
        std::path::absolute(&path)
    } else {
        Ok(path)
    }
}
