//! Usage records and their aggregation

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Register and instruction usage of one kernel, or a sum over kernels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Highest vector register index (summed when aggregated)
    pub vector_registers: u64,
    /// Highest scalar register index (summed when aggregated)
    pub scalar_registers: u64,
    /// Annotated instruction lines
    pub instructions: u64,
}

impl Add for UsageRecord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            vector_registers: self.vector_registers.saturating_add(rhs.vector_registers),
            scalar_registers: self.scalar_registers.saturating_add(rhs.scalar_registers),
            instructions: self.instructions.saturating_add(rhs.instructions),
        }
    }
}

impl AddAssign for UsageRecord {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for UsageRecord {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a UsageRecord> for UsageRecord {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Usage of one kernel together with the compile command that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelUsage {
    /// Kernel name taken from its declaration
    pub kernel: String,
    /// Compiler command line, as printed
    pub command: String,
    /// Scanned usage
    pub usage: UsageRecord,
}

/// Result of one splitter invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    /// Per-kernel usage in document order
    pub kernels: Vec<KernelUsage>,
    /// Sum of every kernel's usage
    pub totals: UsageRecord,
}

impl FromIterator<KernelUsage> for SplitSummary {
    fn from_iter<I: IntoIterator<Item = KernelUsage>>(iter: I) -> Self {
        let kernels: Vec<KernelUsage> = iter.into_iter().collect();
        let totals = kernels.iter().map(|k| &k.usage).sum();
        Self { kernels, totals }
    }
}
