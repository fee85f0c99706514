use serde::{Deserialize, Serialize};

/// Categories a parsed unit reports memory under.
///
/// These mirror the breakdown libclang exposes for a translation unit; other
/// front ends report what they can and leave the rest out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Ast,
    Identifiers,
    Selectors,
    GlobalCompletionResults,
    SourceManagerContentCache,
    AstSideTables,
    SourceManagerMembufferMalloc,
    SourceManagerMembufferMmap,
    ExternalAstSourceMembufferMalloc,
    ExternalAstSourceMembufferMmap,
    Preprocessor,
    PreprocessingRecord,
    SourceManagerDataStructures,
    PreprocessorHeaderSearch,
    Other,
}

/// Per-kind byte counts for one parsed unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    entries: Vec<(ResourceKind, u64)>,
}

impl ResourceUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `bytes` under `kind`, merging with an existing entry of the same kind.
    pub fn add(&mut self, kind: ResourceKind, bytes: u64) {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => *existing = existing.saturating_add(bytes),
            None => self.entries.push((kind, bytes)),
        }
    }

    pub fn with(mut self, kind: ResourceKind, bytes: u64) -> Self {
        self.add(kind, bytes);
        self
    }

    pub fn get(&self, kind: ResourceKind) -> u64 {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, bytes)| *bytes)
            .unwrap_or(0)
    }

    /// Combined usage across all kinds.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, bytes)| acc.saturating_add(*bytes))
    }

    pub fn entries(&self) -> &[(ResourceKind, u64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
