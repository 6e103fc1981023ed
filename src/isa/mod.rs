//! ISA report analysis
//!
//! Scans the textual ISA dump emitted by the finalizer for:
//! - Highest vector and scalar register index referenced
//! - Annotated instruction lines

mod instructions;
mod registers;

pub use instructions::count_instructions;
pub use registers::{max_register, scan_registers, RegisterClass, RegisterUsage};

use crate::error::{Result, SplitError};
use crate::usage::UsageRecord;
use std::fs;
use std::path::Path;

/// Read an ISA report from disk and compute its usage record
///
/// # Errors
///
/// Returns `SplitError::Read` if the report cannot be read.
pub fn analyze_report(path: &Path) -> Result<UsageRecord> {
    let text = fs::read_to_string(path).map_err(|source| SplitError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(analyze_text(&text))
}

/// Compute the usage record of an in-memory ISA report
#[must_use]
pub fn analyze_text(text: &str) -> UsageRecord {
    let lines: Vec<&str> = text.lines().collect();
    let registers = scan_registers(&lines);
    UsageRecord {
        vector_registers: registers.vector,
        scalar_registers: registers.scalar,
        instructions: count_instructions(&lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_ISA: &str = r#"
  s_load_dwordx4 s[4:7], s[0:1], 0x00          // 000000000100: C0820100
  s_waitcnt     lgkmcnt(0)                     // 000000000104: BF8C007F
  v_mov_b32     v2, s4                         // 000000000108: 7E040204
  v_add_i32     v3, vcc, s5, v0                // 00000000010C: 4A060005
  buffer_store_dword v3, v[0:1], s[8:11], 0    // 000000000110: E0700000
  s_endpgm                                     // 000000000118: BF810000
"#;

    #[test]
    fn test_analyze_text_sample() {
        let usage = analyze_text(SAMPLE_ISA);
        assert_eq!(usage.vector_registers, 3);
        assert_eq!(usage.scalar_registers, 11);
        assert_eq!(usage.instructions, 6);
    }

    #[test]
    fn test_analyze_text_empty() {
        assert_eq!(analyze_text(""), UsageRecord::default());
    }

    #[test]
    fn test_analyze_report_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE_ISA}").unwrap();

        let usage = analyze_report(file.path()).unwrap();
        assert_eq!(usage, analyze_text(SAMPLE_ISA));
    }

    #[test]
    fn test_analyze_report_missing_file() {
        let err = analyze_report(Path::new("/nonexistent/kernel.isa")).unwrap_err();
        assert!(matches!(err, SplitError::Read { .. }));
    }
}
