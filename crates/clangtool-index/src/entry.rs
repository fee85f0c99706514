use clangtool_core::Diagnostic;
use clangtool_memory::ResourceUsage;

/// Lifecycle of a cached path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// A (re)parse is in progress.
    Parsing,
    /// Parsed under the current arguments.
    Ready,
    /// Parsed under arguments that have since been replaced. Still queryable;
    /// the next touch does a full parse.
    Stale,
}

/// One cached translation unit.
#[derive(Debug)]
pub struct IndexEntry<U> {
    pub(crate) unit: Option<U>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) usage: ResourceUsage,
    pub(crate) arg_generation: u64,
    pub(crate) parsing: bool,
}

impl<U> IndexEntry<U> {
    pub(crate) fn parsing(arg_generation: u64) -> Self {
        Self {
            unit: None,
            diagnostics: Vec::new(),
            usage: ResourceUsage::new(),
            arg_generation,
            parsing: true,
        }
    }

    /// The parsed handle, or `None` when the front end failed outright.
    pub fn unit(&self) -> Option<&U> {
        self.unit.as_ref()
    }

    pub fn unit_mut(&mut self) -> Option<&mut U> {
        self.unit.as_mut()
    }

    /// Diagnostics captured by the last (re)parse, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn usage(&self) -> &ResourceUsage {
        &self.usage
    }

    pub fn arg_generation(&self) -> u64 {
        self.arg_generation
    }

    pub fn state(&self, current_generation: u64) -> EntryState {
        if self.parsing {
            EntryState::Parsing
        } else if self.arg_generation == current_generation {
            EntryState::Ready
        } else {
            EntryState::Stale
        }
    }
}
