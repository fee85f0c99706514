use serde::{Deserialize, Serialize};

/// How close the index is to its configured budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

/// Budget fractions at which the index report moves up a [`MemoryPressure`] level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryPressureThresholds {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for MemoryPressureThresholds {
    fn default() -> Self {
        Self {
            medium: 0.70,
            high: 0.85,
            critical: 0.95,
        }
    }
}

impl MemoryPressureThresholds {
    /// Highest level whose threshold `ratio` reaches.
    pub fn level_for_ratio(self, ratio: f64) -> MemoryPressure {
        [
            (self.critical, MemoryPressure::Critical),
            (self.high, MemoryPressure::High),
            (self.medium, MemoryPressure::Medium),
        ]
        .into_iter()
        .find(|&(threshold, _)| ratio >= threshold)
        .map_or(MemoryPressure::Low, |(_, level)| level)
    }

    /// Pressure for `used` bytes against `budget`; a zero budget is always critical.
    pub fn level_for(self, used: u64, budget: u64) -> MemoryPressure {
        if budget == 0 {
            return MemoryPressure::Critical;
        }
        self.level_for_ratio(used as f64 / budget as f64)
    }
}
