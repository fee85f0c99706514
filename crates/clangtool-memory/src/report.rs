use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pressure::{MemoryPressure, MemoryPressureThresholds};
use crate::types::ResourceUsage;

/// Usage of one cached translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryUsage {
    pub path: PathBuf,
    /// Combined usage, equal to `usage.total()`.
    pub bytes: u64,
    pub usage: ResourceUsage,
}

impl EntryUsage {
    pub fn new(path: PathBuf, usage: ResourceUsage) -> Self {
        Self {
            path,
            bytes: usage.total(),
            usage,
        }
    }
}

/// Snapshot of the whole index, intended for callers that run their own
/// eviction policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    pub entries: Vec<EntryUsage>,
    pub total_bytes: u64,
    pub budget_bytes: Option<u64>,
    /// `None` when no budget is configured.
    pub pressure: Option<MemoryPressure>,
}

impl IndexReport {
    pub fn new(
        entries: Vec<EntryUsage>,
        budget_bytes: Option<u64>,
        thresholds: MemoryPressureThresholds,
    ) -> Self {
        let total_bytes = entries
            .iter()
            .fold(0u64, |acc, entry| acc.saturating_add(entry.bytes));
        let pressure = budget_bytes.map(|budget| thresholds.level_for(total_bytes, budget));
        Self {
            entries,
            total_bytes,
            budget_bytes,
            pressure,
        }
    }

    /// Entries ordered from largest to smallest, ties broken by path.
    pub fn largest_first(&self) -> Vec<&EntryUsage> {
        let mut entries: Vec<&EntryUsage> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.path.cmp(&b.path)));
        entries
    }
}
