//! Register index scanning
//!
//! The finalizer names registers either individually (`v7`, `s12`) or as a
//! contiguous range (`v[0:1]`, `s[8:11]`). Usage per class is reported as the
//! highest index referenced anywhere in the report.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static VECTOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| register_pattern(RegisterClass::Vector.prefix()));
static SCALAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| register_pattern(RegisterClass::Scalar.prefix()));

/// Matches `<prefix>N` or `<prefix>[N:M]`
fn register_pattern(prefix: char) -> Regex {
    let p = regex::escape(&prefix.to_string());
    Regex::new(&format!(r"{p}([0-9]+)|{p}\[([0-9]+):([0-9]+)\]")).unwrap()
}

/// Register classes tracked in an ISA report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterClass {
    /// Per-lane vector registers (`v`)
    Vector,
    /// Wavefront-uniform scalar registers (`s`)
    Scalar,
}

impl RegisterClass {
    /// Prefix character used by the disassembler
    #[must_use]
    pub fn prefix(self) -> char {
        match self {
            Self::Vector => 'v',
            Self::Scalar => 's',
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Vector => &VECTOR_PATTERN,
            Self::Scalar => &SCALAR_PATTERN,
        }
    }
}

impl fmt::Display for RegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector => write!(f, "vector"),
            Self::Scalar => write!(f, "scalar"),
        }
    }
}

/// Highest register index per class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUsage {
    /// Highest vector register index
    pub vector: u64,
    /// Highest scalar register index
    pub scalar: u64,
}

/// Return the highest register index of `class` referenced in `lines`
///
/// Both bounds of a range reference count, whichever order they appear in.
/// Lines without a reference contribute nothing, so a report that never
/// mentions the class yields 0. Indices too large for `u64` saturate.
#[must_use]
pub fn max_register<S: AsRef<str>>(class: RegisterClass, lines: &[S]) -> u64 {
    let pattern = class.pattern();
    let mut max = 0;

    for line in lines {
        for cap in pattern.captures_iter(line.as_ref()) {
            for num in cap.iter().skip(1).flatten() {
                let index = num.as_str().parse::<u64>().unwrap_or(u64::MAX);
                if index > max {
                    max = index;
                }
            }
        }
    }

    max
}

/// Scan both register classes
#[must_use]
pub fn scan_registers<S: AsRef<str>>(lines: &[S]) -> RegisterUsage {
    RegisterUsage {
        vector: max_register(RegisterClass::Vector, lines),
        scalar: max_register(RegisterClass::Scalar, lines),
    }
}
