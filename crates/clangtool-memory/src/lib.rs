//! Resource accounting for cached translation units.
//!
//! This crate is report-only:
//! - Usage figures come from the front end right after each (re)parse.
//! - [`IndexReport`] classifies the combined total against an optional budget.
//! - Nothing here evicts; callers decide what to drop using the report.

mod budget;
mod pressure;
mod report;
mod types;

pub use budget::{parse_byte_size, ByteSizeError, GB, KB, MB};
pub use pressure::{MemoryPressure, MemoryPressureThresholds};
pub use report::{EntryUsage, IndexReport};
pub use types::{ResourceKind, ResourceUsage};
