//! Split, compile and scan every kernel of a source document

use crate::error::{Result, SplitError};
use crate::isa;
use crate::splitter::{split_document, SplitDocument};
use crate::toolchain::Toolchain;
use crate::usage::{KernelUsage, SplitSummary};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Drives the toolchain over each kernel of a document, one kernel at a time
#[derive(Debug, Clone)]
pub struct Pipeline<T> {
    toolchain: T,
    output_dir: PathBuf,
}

impl<T: Toolchain> Pipeline<T> {
    /// Write artifacts into `output_dir` and run `toolchain` there
    pub fn new(toolchain: T, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            toolchain,
            output_dir: output_dir.into(),
        }
    }

    /// Read `source`, then process it like [`Pipeline::run_document`]
    ///
    /// # Errors
    ///
    /// Returns `SplitError::Read` before anything is written if `source`
    /// cannot be read, otherwise the first per-kernel failure.
    pub fn run_file(
        &self,
        source: &Path,
        on_kernel: impl FnMut(&KernelUsage) -> Result<()>,
    ) -> Result<SplitSummary> {
        let text = fs::read_to_string(source).map_err(|err| SplitError::Read {
            path: source.to_path_buf(),
            source: err,
        })?;
        info!(source = %source.display(), bytes = text.len(), "read source document");
        self.run_document(&split_document(&text), on_kernel)
    }

    /// Write each kernel's artifact, build its ISA report and scan it
    ///
    /// `on_kernel` sees each kernel's usage as soon as it is known. The
    /// first failure aborts the run; kernels already processed keep their
    /// files on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if an artifact cannot be written, the toolchain
    /// fails, the report cannot be read, or `on_kernel` fails.
    pub fn run_document(
        &self,
        doc: &SplitDocument,
        mut on_kernel: impl FnMut(&KernelUsage) -> Result<()>,
    ) -> Result<SplitSummary> {
        let mut summary = SplitSummary::default();

        for (name, artifact) in doc.artifacts() {
            let kernel = self.process(name, &artifact)?;
            on_kernel(&kernel)?;
            summary.totals += kernel.usage;
            summary.kernels.push(kernel);
        }

        debug!(kernels = summary.kernels.len(), totals = ?summary.totals, "document done");
        Ok(summary)
    }

    fn process(&self, name: &str, artifact: &str) -> Result<KernelUsage> {
        let command = self.toolchain.command_line(name);
        let path = self.write_artifact(name, artifact)?;
        debug!(kernel = name, path = %path.display(), "wrote kernel source");

        let report = self.toolchain.isa_report(name, &self.output_dir)?;
        let usage = isa::analyze_report(&report)?;

        Ok(KernelUsage {
            kernel: name.to_string(),
            command,
            usage,
        })
    }

    /// The file is flushed and closed on return, before any tool reads it.
    fn write_artifact(&self, name: &str, artifact: &str) -> Result<PathBuf> {
        let path = self.toolchain.source_path(&self.output_dir, name);
        let write = |path: &Path| -> std::io::Result<()> {
            let mut file = File::create(path)?;
            file.write_all(artifact.as_bytes())?;
            file.sync_all()
        };
        write(&path).map_err(|source| SplitError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
