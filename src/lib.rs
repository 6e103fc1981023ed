//! kernel-splitter: per-kernel register and instruction usage for OpenCL sources
//!
//! Splits a multi-kernel source into one file per `__kernel void` declaration,
//! runs the HSAIL toolchain (`cloc.sh -hsail`, then `finalizer_dumper`) on each,
//! and scans the resulting ISA dumps.
//!
//! # Features
//!
//! - Preamble-preserving kernel splitting
//! - Highest vector (`v`) and scalar (`s`) register index per kernel
//! - Annotated instruction line counts
//! - Totals across every kernel of the document
//!
//! # Example
//!
//! ```rust
//! use kernel_splitter::{isa, split_document};
//!
//! let doc = split_document("#define N 4\n__kernel void k(__global int *a) {\n}\n");
//! assert_eq!(doc.kernels[0].name, "k");
//!
//! let usage = isa::analyze_text("v_mov_b32 v3, s[4:7] // 0000\n");
//! assert_eq!(usage.vector_registers, 3);
//! assert_eq!(usage.scalar_registers, 7);
//! assert_eq!(usage.instructions, 1);
//! ```

#![allow(clippy::cast_possible_truncation)] // Line counts fit in u64
#![allow(clippy::unwrap_used)] // Safe for compile-time constant regex
#![allow(clippy::format_push_string)] // Performance not critical for CLI

pub mod config;
pub mod error;
pub mod isa;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod splitter;
pub mod toolchain;
pub mod usage;

pub use config::ToolchainConfig;
pub use error::{Result, SplitError};
pub use isa::{count_instructions, max_register, scan_registers, RegisterClass, RegisterUsage};
pub use output::OutputFormat;
pub use pipeline::Pipeline;
pub use splitter::{kernel_name, split_document, KernelBlock, SplitDocument};
pub use toolchain::{HsailToolchain, Toolchain};
pub use usage::{KernelUsage, SplitSummary, UsageRecord};
