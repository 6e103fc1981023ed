//! Output formatters for kernel-splitter
//!
//! Text output mirrors the historical script output line for line, with the
//! kernel header highlighted. JSON output is for tooling and CI.

use crate::usage::{KernelUsage, SplitSummary, UsageRecord};
use colored::Colorize;
use std::io::{self, Write};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Text output for terminal
    #[default]
    Text,
    /// JSON output for tooling and CI
    Json,
}

/// Register lines of one ISA report
#[must_use]
pub fn format_registers(usage: &UsageRecord) -> String {
    format!(
        "vector register: {}\nscalar register: {}\n",
        usage.vector_registers, usage.scalar_registers
    )
}

/// Instruction line of one ISA report
#[must_use]
pub fn format_instructions(usage: &UsageRecord) -> String {
    format!("Num of instructions: {}\n", usage.instructions)
}

/// Per-kernel block: name, compile command, usage
#[must_use]
pub fn format_kernel(kernel: &KernelUsage) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", kernel.kernel.cyan().bold()));
    output.push_str(&format!("{}\n", kernel.command));
    output.push_str(&format_registers(&kernel.usage));
    output.push_str(&format_instructions(&kernel.usage));
    output
}

/// Aggregate lines printed once every kernel is done
#[must_use]
pub fn format_totals(totals: &UsageRecord) -> String {
    format!(
        "vector register total: {}\nscalar register total: {}\nnumber instructions total: {}\n",
        totals.vector_registers, totals.scalar_registers, totals.instructions
    )
}

/// Format a summary as JSON
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn format_json(summary: &SplitSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

/// Write one kernel's block to stdout as soon as it is known
///
/// Nothing is written in JSON mode; the summary carries every kernel.
///
/// # Errors
///
/// Returns `io::Error` if writing to stdout fails.
pub fn write_kernel(kernel: &KernelUsage, format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Text {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", format_kernel(kernel))?;
    }
    Ok(())
}

/// Write the closing summary to stdout in the specified format
///
/// In text mode only the totals are written, since the kernels were already
/// streamed by [`write_kernel`].
///
/// # Errors
///
/// Returns `io::Error` if writing to stdout fails or JSON serialization fails.
pub fn write_summary(summary: &SplitSummary, format: OutputFormat) -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    match format {
        OutputFormat::Text => {
            write!(stdout, "{}", format_totals(&summary.totals))?;
        }
        OutputFormat::Json => {
            let json = format_json(summary).map_err(io::Error::other)?;
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}
