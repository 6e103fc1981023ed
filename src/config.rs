//! Toolchain configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Names and file conventions of the external HSAIL toolchain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// OpenCL to BRIG compiler
    pub compiler: PathBuf,
    /// Flag selecting HSAIL/BRIG output
    pub compiler_flag: String,
    /// BRIG finalizer that dumps the ISA
    pub finalizer: PathBuf,
    /// Extension of the per-kernel source files
    pub source_extension: String,
    /// Extension of the compiler's output
    pub binary_extension: String,
    /// Fixed file name the finalizer writes its dump to
    pub report_name: String,
    /// Extension the dump is renamed to
    pub report_extension: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("cloc.sh"),
            compiler_flag: "-hsail".to_string(),
            finalizer: PathBuf::from("finalizer_dumper"),
            source_extension: "cl".to_string(),
            binary_extension: "brig".to_string(),
            report_name: "isa.txt".to_string(),
            report_extension: "isa".to_string(),
        }
    }
}

impl ToolchainConfig {
    /// `<dir>/<kernel>.<source_extension>`
    #[must_use]
    pub fn source_path(&self, dir: &Path, kernel: &str) -> PathBuf {
        dir.join(format!("{kernel}.{}", self.source_extension))
    }

    /// `<dir>/<kernel>.<binary_extension>`
    #[must_use]
    pub fn binary_path(&self, dir: &Path, kernel: &str) -> PathBuf {
        dir.join(format!("{kernel}.{}", self.binary_extension))
    }

    /// `<dir>/<kernel>.<report_extension>`
    #[must_use]
    pub fn report_path(&self, dir: &Path, kernel: &str) -> PathBuf {
        dir.join(format!("{kernel}.{}", self.report_extension))
    }

    /// Compiler command line for `kernel`, as shown to the user
    #[must_use]
    pub fn compile_command(&self, kernel: &str) -> String {
        format!(
            "{} {} {kernel}.{}",
            self.compiler.display(),
            self.compiler_flag,
            self.source_extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_hsail_toolchain() {
        let config = ToolchainConfig::default();
        assert_eq!(
            config.compile_command("vec_add"),
            "cloc.sh -hsail vec_add.cl"
        );
        assert_eq!(config.finalizer, PathBuf::from("finalizer_dumper"));
        assert_eq!(config.report_name, "isa.txt");
    }

    #[test]
    fn test_artifact_paths() {
        let config = ToolchainConfig::default();
        let dir = Path::new("out");
        assert_eq!(config.source_path(dir, "k"), PathBuf::from("out/k.cl"));
        assert_eq!(config.binary_path(dir, "k"), PathBuf::from("out/k.brig"));
        assert_eq!(config.report_path(dir, "k"), PathBuf::from("out/k.isa"));
    }

    #[test]
    fn test_custom_source_extension() {
        let config = ToolchainConfig {
            source_extension: "xx".to_string(),
            ..Default::default()
        };
        assert_eq!(config.compile_command("k"), "cloc.sh -hsail k.xx");
    }
}
