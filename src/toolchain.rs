//! External toolchain invocation
//!
//! Per kernel: compile the source to BRIG, finalize the BRIG into an ISA
//! dump, then move the dump to a per-kernel name. The tools are opaque
//! subprocesses; only their exit status and output files are checked.

use crate::config::ToolchainConfig;
use crate::error::{Result, SplitError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Produces an ISA report for a kernel source file
pub trait Toolchain {
    /// Command line shown to the user for `kernel`
    fn command_line(&self, kernel: &str) -> String;

    /// Where the source of `kernel` is expected inside `dir`
    fn source_path(&self, dir: &Path, kernel: &str) -> PathBuf;

    /// Build the ISA report for `kernel`, whose source is already written to `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if a tool cannot be started, exits unsuccessfully, or
    /// does not produce its expected output.
    fn isa_report(&self, kernel: &str, dir: &Path) -> Result<PathBuf>;
}

/// `cloc.sh` + `finalizer_dumper`
#[derive(Debug, Clone, Default)]
pub struct HsailToolchain {
    config: ToolchainConfig,
}

impl HsailToolchain {
    /// Create a toolchain from its configuration
    #[must_use]
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    fn run(&self, program: &Path, args: &[&str], kernel: &str, dir: &Path) -> Result<()> {
        let tool = program.display().to_string();
        info!(%tool, ?args, kernel, "running");

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| SplitError::Spawn {
                tool: tool.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(%tool, kernel, "{}", stdout.trim_end());
        }

        if !output.status.success() {
            return Err(SplitError::ToolFailed {
                tool,
                kernel: kernel.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}

/// Remove a leftover output so only this run's file can satisfy [`require`]
fn clear_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale output");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(SplitError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn require(path: PathBuf, kernel: &str) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(SplitError::MissingOutput {
            kernel: kernel.to_string(),
            path,
        })
    }
}

impl Toolchain for HsailToolchain {
    fn command_line(&self, kernel: &str) -> String {
        self.config.compile_command(kernel)
    }

    fn source_path(&self, dir: &Path, kernel: &str) -> PathBuf {
        self.config.source_path(dir, kernel)
    }

    fn isa_report(&self, kernel: &str, dir: &Path) -> Result<PathBuf> {
        let config = &self.config;

        let source = format!("{kernel}.{}", config.source_extension);
        let binary = config.binary_path(dir, kernel);
        clear_stale(&binary)?;
        self.run(
            &config.compiler,
            &[config.compiler_flag.as_str(), source.as_str()],
            kernel,
            dir,
        )?;
        let binary = require(binary, kernel)?;

        // The finalizer always writes the same file name; callers must not
        // run two kernels in one directory concurrently.
        let dump = dir.join(&config.report_name);
        clear_stale(&dump)?;
        let binary_name = format!("{kernel}.{}", config.binary_extension);
        self.run(&config.finalizer, &[binary_name.as_str()], kernel, dir)?;
        let dump = require(dump, kernel)?;

        let report = config.report_path(dir, kernel);
        fs::rename(&dump, &report).map_err(|source| SplitError::Write {
            path: report.clone(),
            source,
        })?;
        debug!(
            kernel,
            binary = %binary.display(),
            report = %report.display(),
            "isa report ready"
        );
        Ok(report)
    }
}
