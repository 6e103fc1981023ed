//! Error types for kernel-splitter

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while splitting a document or running the toolchain
#[derive(Error, Debug)]
pub enum SplitError {
    /// Source document or ISA report could not be read
    #[error("Failed to open {}: {source}", .path.display())]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Kernel artifact could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// External tool could not be started
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        /// Program name or path
        tool: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// External tool ran but exited unsuccessfully
    #[error("{tool} failed for kernel {kernel} ({status}){}", format_stderr(.stderr))]
    ToolFailed {
        /// Program name or path
        tool: String,
        /// Kernel being processed
        kernel: String,
        /// Exit status of the tool
        status: ExitStatus,
        /// Captured standard error
        stderr: String,
    },

    /// External tool exited successfully without producing its output file
    #[error("Expected output {} for kernel {kernel} was not produced", .path.display())]
    MissingOutput {
        /// Kernel being processed
        kernel: String,
        /// File the tool should have written
        path: PathBuf,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{trimmed}")
    }
}

/// Result type alias for kernel-splitter operations
pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_names_path() {
        let err = SplitError::Read {
            path: PathBuf::from("missing.cl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.cl"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_missing_output_names_kernel() {
        let err = SplitError::MissingOutput {
            kernel: "vec_add".to_string(),
            path: PathBuf::from("vec_add.brig"),
        };
        let msg = err.to_string();
        assert!(msg.contains("vec_add"));
        assert!(msg.contains("vec_add.brig"));
    }

    #[test]
    fn test_stderr_suffix_omitted_when_blank() {
        assert_eq!(format_stderr("  \n"), "");
        assert_eq!(format_stderr("boom\n"), ":\nboom");
    }
}
