use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clangtool_core::{Diagnostic, Severity, SourceLocation};
use clangtool_frontend::{FrontEnd, FrontEndError, ParseRequest, ParsedUnit, RawCompletion};
use clangtool_memory::{EntryUsage, IndexReport, MemoryPressureThresholds, ResourceUsage};
use clangtool_vfs::UnsavedBuffers;

use crate::{ArgumentStore, EntryState, IndexEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Full,
    Incremental,
}

impl Strategy {
    fn as_str(self) -> &'static str {
        match self {
            Strategy::Full => "full",
            Strategy::Incremental => "incremental",
        }
    }
}

/// Path-keyed cache of parsed translation units.
///
/// Paths are used as given; callers normalize them first (see
/// [`clangtool_vfs::normalize_path`]). Dropping an entry, through
/// [`Index::remove`], [`Index::clear`], a re-touch or dropping the index,
/// releases its front-end handle.
pub struct Index<F: FrontEnd> {
    front_end: F,
    args: ArgumentStore,
    overlay: UnsavedBuffers,
    entries: BTreeMap<PathBuf, IndexEntry<F::Unit>>,
}

impl<F: FrontEnd> std::fmt::Debug for Index<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("args", &self.args)
            .field("overlay", &self.overlay.len())
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<F: FrontEnd> Index<F> {
    pub fn new(front_end: F) -> Self {
        Self {
            front_end,
            args: ArgumentStore::new(),
            overlay: UnsavedBuffers::new(),
            entries: BTreeMap::new(),
        }
    }

    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    pub fn arguments(&self) -> &ArgumentStore {
        &self.args
    }

    /// Replaces the compiler arguments. Cached entries keep their parse until
    /// they are touched again.
    pub fn set_arguments(&mut self, args: Vec<String>) {
        self.args.set(args);
    }

    pub fn overlay(&self) -> &UnsavedBuffers {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut UnsavedBuffers {
        &mut self.overlay
    }

    /// Creates or refreshes the entry for `path`.
    ///
    /// An entry that still has a handle and was parsed under the current
    /// arguments is reparsed incrementally; anything else gets a full parse.
    /// A failed incremental reparse releases the old handle and falls back to
    /// a full parse.
    pub fn touch(&mut self, path: &Path) -> &mut IndexEntry<F::Unit> {
        let started = Instant::now();
        let generation = self.args.generation();

        let reusable = match self.entries.remove(path) {
            Some(entry) if entry.arg_generation == generation => entry.unit,
            _ => None,
        };
        self.entries
            .insert(path.to_path_buf(), IndexEntry::parsing(generation));

        let unsaved = self.overlay.unsaved_files();
        let request = ParseRequest {
            path,
            args: self.args.get(),
            unsaved: &unsaved,
        };

        let outcome = match reusable {
            Some(mut unit) => match self.front_end.reparse(&mut unit, &request) {
                Ok(()) => Ok((unit, Strategy::Incremental)),
                Err(err) => {
                    tracing::debug!(
                        target: "clangtool.index",
                        path = %path.display(),
                        error = %err,
                        "incremental reparse failed; falling back to a full parse"
                    );
                    drop(unit);
                    self.front_end.parse(&request).map(|unit| (unit, Strategy::Full))
                }
            },
            None => self.front_end.parse(&request).map(|unit| (unit, Strategy::Full)),
        };

        let entry = match outcome {
            Ok((unit, strategy)) => {
                let diagnostics = unit.diagnostics();
                let usage = unit.resource_usage();
                tracing::debug!(
                    target: "clangtool.index",
                    path = %path.display(),
                    strategy = strategy.as_str(),
                    diagnostics = diagnostics.len(),
                    bytes = usage.total(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "translation unit ready"
                );
                IndexEntry {
                    unit: Some(unit),
                    diagnostics,
                    usage,
                    arg_generation: generation,
                    parsing: false,
                }
            }
            Err(err) => {
                tracing::warn!(
                    target: "clangtool.index",
                    path = %path.display(),
                    error = %err,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "translation unit failed to parse"
                );
                failed_entry(path, &err, generation)
            }
        };

        let slot = self
            .entries
            .entry(path.to_path_buf())
            .or_insert_with(|| IndexEntry::parsing(generation));
        *slot = entry;
        slot
    }

    /// The entry for `path`, touching it first when it is not cached.
    pub fn ensure(&mut self, path: &Path) -> &mut IndexEntry<F::Unit> {
        self.ensure_with(path, false)
    }

    /// Like [`Index::ensure`], but also refreshes an entry parsed under older
    /// arguments.
    pub fn ensure_current(&mut self, path: &Path) -> &mut IndexEntry<F::Unit> {
        self.ensure_with(path, true)
    }

    fn ensure_with(&mut self, path: &Path, require_current: bool) -> &mut IndexEntry<F::Unit> {
        let generation = self.args.generation();
        let usable = self.entries.get(path).is_some_and(|entry| {
            match entry.state(generation) {
                EntryState::Ready => true,
                EntryState::Stale => !require_current,
                EntryState::Parsing => false,
            }
        });
        if !usable {
            return self.touch(path);
        }
        self.entries
            .entry(path.to_path_buf())
            .or_insert_with(|| IndexEntry::parsing(generation))
    }

    /// Completion at a 1-based position using the current arguments and
    /// every unsaved buffer.
    pub fn complete_at(&mut self, path: &Path, row: u32, col: u32) -> Vec<RawCompletion> {
        self.ensure_current(path);
        let unsaved = self.overlay.unsaved_files();
        match self.entries.get_mut(path).and_then(IndexEntry::unit_mut) {
            Some(unit) => unit.complete_at(path, row, col, &unsaved),
            None => Vec::new(),
        }
    }

    /// Usage of every cached entry, ordered by path.
    pub fn status(&self) -> Vec<EntryUsage> {
        let generation = self.args.generation();
        self.entries
            .iter()
            .filter(|(_, entry)| entry.state(generation) != EntryState::Parsing)
            .map(|(path, entry)| EntryUsage::new(path.clone(), entry.usage.clone()))
            .collect()
    }

    pub fn report(
        &self,
        budget_bytes: Option<u64>,
        thresholds: MemoryPressureThresholds,
    ) -> IndexReport {
        IndexReport::new(self.status(), budget_bytes, thresholds)
    }

    /// Evicts `path`. Returns whether an entry existed.
    pub fn remove(&mut self, path: &Path) -> bool {
        let removed = self.entries.remove(path).is_some();
        if removed {
            tracing::debug!(
                target: "clangtool.index",
                path = %path.display(),
                "translation unit evicted"
            );
        }
        removed
    }

    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        tracing::debug!(target: "clangtool.index", count, "index cleared");
    }

    pub fn state(&self, path: &Path) -> Option<EntryState> {
        let generation = self.args.generation();
        self.entries.get(path).map(|entry| entry.state(generation))
    }

    pub fn entry(&self, path: &Path) -> Option<&IndexEntry<F::Unit>> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }
}

fn failed_entry<U>(path: &Path, err: &FrontEndError, generation: u64) -> IndexEntry<U> {
    let summary = err.to_string();
    let text = format!("{}: fatal error: {summary}", path.display());
    IndexEntry {
        unit: None,
        diagnostics: vec![Diagnostic::new(
            SourceLocation::none(),
            Severity::Fatal,
            text,
            summary,
        )],
        usage: ResourceUsage::new(),
        arg_generation: generation,
        parsing: false,
    }
}
