use std::path::{Path, PathBuf};

use clangtool_core::{AstNode, CompletionCandidate, Diagnostic, Outline, SourceLocation};
use clangtool_frontend::FrontEnd;
use clangtool_index::Index;
use clangtool_memory::{EntryUsage, IndexReport, MemoryPressureThresholds};
use clangtool_vfs::normalize_path;
use serde::{Deserialize, Serialize};

use crate::{ast, completion, navigation, outline};

/// Knobs for query results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Keep top-level cursors from included files in [`Engine::file_ast`].
    pub include_headers: bool,
    /// Upper bound on completion candidates, applied after sorting.
    pub max_candidates: Option<usize>,
}

/// C/C++ code intelligence over a cache of parsed files.
///
/// Every query resolves its path to a cached entry first, parsing it when the
/// path has never been touched. Rows and columns are 1-based; positions
/// outside the file produce empty results.
pub struct Engine<F: FrontEnd> {
    index: Index<F>,
    options: QueryOptions,
    thresholds: MemoryPressureThresholds,
}

impl<F: FrontEnd> std::fmt::Debug for Engine<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("index", &self.index)
            .field("options", &self.options)
            .finish()
    }
}

impl<F: FrontEnd> Engine<F> {
    pub fn new(front_end: F) -> Self {
        Self::with_options(front_end, QueryOptions::default())
    }

    pub fn with_options(front_end: F, options: QueryOptions) -> Self {
        Self {
            index: Index::new(front_end),
            options,
            thresholds: MemoryPressureThresholds::default(),
        }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: QueryOptions) {
        self.options = options;
    }

    pub fn set_pressure_thresholds(&mut self, thresholds: MemoryPressureThresholds) {
        self.thresholds = thresholds;
    }

    pub fn index(&self) -> &Index<F> {
        &self.index
    }

    pub fn front_end(&self) -> &F {
        self.index.front_end()
    }

    /// Replaces the compiler arguments used by later parses.
    pub fn set_arguments(&mut self, args: Vec<String>) {
        self.index.set_arguments(args);
    }

    pub fn arguments(&self) -> &[String] {
        self.index.arguments().get()
    }

    /// Discards any unsaved buffer for `path` and reparses it from disk.
    pub fn index_touch(&mut self, path: impl AsRef<Path>) {
        let path = normalize_path(path.as_ref());
        self.index.overlay_mut().discard(&path);
        self.index.touch(&path);
    }

    /// Registers the first `length` bytes of `content` as the unsaved content
    /// of `path`, then reparses it. The bytes are copied.
    pub fn index_touch_unsaved(&mut self, path: impl AsRef<Path>, content: &[u8], length: usize) {
        let path = normalize_path(path.as_ref());
        self.index.overlay_mut().set(path.clone(), content, length);
        self.index.touch(&path);
    }

    /// Whether an unsaved buffer is registered for `path`.
    pub fn has_unsaved(&self, path: impl AsRef<Path>) -> bool {
        self.index.overlay().contains(&normalize_path(path.as_ref()))
    }

    /// `(path, bytes)` for every cached entry, ordered by path.
    pub fn index_status(&self) -> Vec<EntryUsage> {
        self.index.status()
    }

    pub fn index_remove(&mut self, path: impl AsRef<Path>) {
        self.index.remove(&normalize_path(path.as_ref()));
    }

    pub fn index_clear(&mut self) {
        self.index.clear();
    }

    /// Status plus totals, classified against `budget_bytes` when given.
    pub fn index_report(&self, budget_bytes: Option<u64>) -> IndexReport {
        self.index.report(budget_bytes, self.thresholds)
    }

    pub fn file_ast(&mut self, path: impl AsRef<Path>) -> AstNode {
        let path = normalize_path(path.as_ref());
        let include_headers = self.options.include_headers;
        match self.index.ensure(&path).unit() {
            Some(unit) => ast::build(unit, include_headers),
            None => ast::empty_root(&path),
        }
    }

    pub fn file_outline(&mut self, path: impl AsRef<Path>) -> Outline {
        let path = normalize_path(path.as_ref());
        match self.index.ensure(&path).unit() {
            Some(unit) => outline::build(unit),
            None => Outline::default(),
        }
    }

    /// Diagnostics from the last parse, in emission order.
    pub fn file_diagnose(&mut self, path: impl AsRef<Path>) -> Vec<Diagnostic> {
        let path = normalize_path(path.as_ref());
        self.index.ensure(&path).diagnostics().to_vec()
    }

    /// Completion candidates sorted by ascending priority.
    pub fn cursor_candidates_at(
        &mut self,
        path: impl AsRef<Path>,
        row: u32,
        col: u32,
    ) -> Vec<CompletionCandidate> {
        let Some(path) = position_path(path.as_ref(), row, col) else {
            return Vec::new();
        };
        let raw = self.index.complete_at(&path, row, col);
        let candidates = completion::candidates(raw, self.options.max_candidates);
        tracing::trace!(
            target: "clangtool.ide",
            path = %path.display(),
            row,
            col,
            count = candidates.len(),
            "completion"
        );
        candidates
    }

    /// Type spelling under the position, or an empty string.
    pub fn cursor_type_at(&mut self, path: impl AsRef<Path>, row: u32, col: u32) -> String {
        let Some(path) = position_path(path.as_ref(), row, col) else {
            return String::new();
        };
        match self.index.ensure(&path).unit() {
            Some(unit) => navigation::type_at(unit, &path, row, col),
            None => String::new(),
        }
    }

    pub fn cursor_declaration_at(
        &mut self,
        path: impl AsRef<Path>,
        row: u32,
        col: u32,
    ) -> SourceLocation {
        let Some(path) = position_path(path.as_ref(), row, col) else {
            return SourceLocation::none();
        };
        match self.index.ensure(&path).unit() {
            Some(unit) => navigation::declaration_at(unit, &path, row, col),
            None => SourceLocation::none(),
        }
    }

    pub fn cursor_definition_at(
        &mut self,
        path: impl AsRef<Path>,
        row: u32,
        col: u32,
    ) -> SourceLocation {
        let Some(path) = position_path(path.as_ref(), row, col) else {
            return SourceLocation::none();
        };
        match self.index.ensure(&path).unit() {
            Some(unit) => navigation::definition_at(unit, &path, row, col),
            None => SourceLocation::none(),
        }
    }
}

/// Normalized path, or `None` for positions that can never be valid.
fn position_path(path: &Path, row: u32, col: u32) -> Option<PathBuf> {
    if row == 0 || col == 0 {
        return None;
    }
    Some(normalize_path(path))
}
