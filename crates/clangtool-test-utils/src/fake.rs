use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clangtool_core::{AccessSpecifier, Diagnostic, LineIndex, SourceLocation};
use clangtool_frontend::{
    CursorInfo, CursorKind, FrontEnd, FrontEndError, ParseRequest, ParsedUnit, RawCompletion,
    UnsavedFile,
};
use clangtool_memory::{ResourceKind, ResourceUsage};

/// What a script sees for one parse.
#[derive(Debug, Clone, Copy)]
pub struct FakeSource<'a> {
    pub path: &'a Path,
    pub args: &'a [String],
    /// Overlay content when present, otherwise the file on disk.
    pub text: &'a str,
    pub from_overlay: bool,
}

/// How the engine asked for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseKind {
    Full,
    Incremental,
}

/// One parse request as the fake front end received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRecord {
    pub path: PathBuf,
    pub kind: ParseKind,
    pub args: Vec<String>,
    pub text: String,
    /// Paths of every overlay handed over with the request, in order.
    pub unsaved: Vec<PathBuf>,
}

/// One completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub path: PathBuf,
    pub row: u32,
    pub col: u32,
    pub unsaved: Vec<PathBuf>,
}

/// A node of a scripted syntax tree.
///
/// Nodes can be given a `key`; other nodes point at them with
/// [`FakeNode::refers_to`] and [`FakeNode::defined_by`].
#[derive(Debug, Clone)]
pub struct FakeNode {
    info: CursorInfo,
    key: Option<String>,
    refers_to: Option<String>,
    defined_by: Option<String>,
    children: Vec<FakeNode>,
}

impl FakeNode {
    pub fn new(kind: CursorKind, spelling: &str) -> Self {
        let mut info = CursorInfo::new(kind);
        info.spelling = spelling.to_string();
        info.display_name = spelling.to_string();
        Self {
            info,
            key: None,
            refers_to: None,
            defined_by: None,
            children: Vec::new(),
        }
    }

    pub fn at(mut self, file: impl Into<PathBuf>, row: u32, col: u32) -> Self {
        self.info.location = SourceLocation::new(file, row, col);
        self
    }

    pub fn ty(mut self, ty: &str) -> Self {
        self.info.ty = ty.to_string();
        self
    }

    pub fn typedef_type(mut self, ty: &str) -> Self {
        self.info.typedef_type = ty.to_string();
        self
    }

    pub fn doc(mut self, doc: &str) -> Self {
        self.info.doc = doc.to_string();
        self
    }

    pub fn access(mut self, access: AccessSpecifier) -> Self {
        self.info.access = access;
        self
    }

    pub fn display_name(mut self, name: &str) -> Self {
        self.info.display_name = name.to_string();
        self
    }

    /// Marks the node as the defining declaration of its entity.
    pub fn definition(mut self) -> Self {
        self.info.is_definition = true;
        self
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn refers_to(mut self, key: &str) -> Self {
        self.refers_to = Some(key.to_string());
        self
    }

    pub fn defined_by(mut self, key: &str) -> Self {
        self.defined_by = Some(key.to_string());
        self
    }

    pub fn child(mut self, child: FakeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = FakeNode>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Everything a script returns for one parse.
#[derive(Debug, Clone, Default)]
pub struct FakeOutput {
    pub nodes: Vec<FakeNode>,
    pub diagnostics: Vec<Diagnostic>,
    pub completions: Vec<RawCompletion>,
    pub usage: ResourceUsage,
}

impl FakeOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, node: FakeNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn completion(mut self, completion: RawCompletion) -> Self {
        self.completions.push(completion);
        self
    }

    pub fn usage(mut self, usage: ResourceUsage) -> Self {
        self.usage = usage;
        self
    }
}

type Script = dyn Fn(&FakeSource<'_>) -> Result<FakeOutput, FrontEndError>;

#[derive(Debug, Default)]
struct Shared {
    parses: RefCell<Vec<ParseRecord>>,
    completions: RefCell<Vec<CompletionRecord>>,
    live_units: Cell<usize>,
}

/// A scripted front end.
///
/// Sources are read the way libclang reads them: the overlay for the path if
/// one was handed over, otherwise the file on disk. A path with neither fails
/// with [`FrontEndError::ParseFailed`] before the script runs.
pub struct FakeFrontEnd {
    script: Box<Script>,
    shared: Rc<Shared>,
    fail_reparse: Cell<bool>,
}

impl std::fmt::Debug for FakeFrontEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeFrontEnd")
            .field("parses", &self.shared.parses.borrow().len())
            .field("live_units", &self.shared.live_units.get())
            .finish()
    }
}

impl Default for FakeFrontEnd {
    /// Units with no nodes whose AST usage is the source length.
    fn default() -> Self {
        Self::new(|source| {
            Ok(FakeOutput::new().usage(
                ResourceUsage::new().with(ResourceKind::Ast, source.text.len() as u64),
            ))
        })
    }
}

impl FakeFrontEnd {
    pub fn new(
        script: impl Fn(&FakeSource<'_>) -> Result<FakeOutput, FrontEndError> + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            shared: Rc::new(Shared::default()),
            fail_reparse: Cell::new(false),
        }
    }

    /// Every parse attempt so far, including failed ones.
    pub fn parses(&self) -> Vec<ParseRecord> {
        self.shared.parses.borrow().clone()
    }

    pub fn parse_count(&self) -> usize {
        self.shared.parses.borrow().len()
    }

    pub fn last_parse(&self) -> Option<ParseRecord> {
        self.shared.parses.borrow().last().cloned()
    }

    pub fn completions(&self) -> Vec<CompletionRecord> {
        self.shared.completions.borrow().clone()
    }

    /// Units created by this front end that have not been dropped yet.
    pub fn live_units(&self) -> usize {
        self.shared.live_units.get()
    }

    /// Makes every following incremental reparse fail.
    pub fn set_fail_reparse(&self, fail: bool) {
        self.fail_reparse.set(fail);
    }

    fn record(&self, request: &ParseRequest<'_>, kind: ParseKind, text: &str) {
        self.shared.parses.borrow_mut().push(ParseRecord {
            path: request.path.to_path_buf(),
            kind,
            args: request.args.to_vec(),
            text: text.to_string(),
            unsaved: request.unsaved.iter().map(|f| f.path.to_path_buf()).collect(),
        });
    }

    fn run(&self, request: &ParseRequest<'_>, kind: ParseKind) -> Result<FakeUnit, FrontEndError> {
        let (text, from_overlay) = match request.unsaved_contents() {
            Some(bytes) => (String::from_utf8_lossy(bytes).into_owned(), true),
            None => match std::fs::read(request.path) {
                Ok(bytes) => (String::from_utf8_lossy(&bytes).into_owned(), false),
                Err(_) => {
                    self.record(request, kind, "");
                    return Err(FrontEndError::ParseFailed {
                        path: request.path.to_path_buf(),
                        code: 1,
                    });
                }
            },
        };
        self.record(request, kind, &text);

        if kind == ParseKind::Incremental && self.fail_reparse.get() {
            return Err(FrontEndError::ReparseFailed {
                path: request.path.to_path_buf(),
                code: 1,
            });
        }

        let output = (self.script)(&FakeSource {
            path: request.path,
            args: request.args,
            text: &text,
            from_overlay,
        })?;
        Ok(FakeUnit::build(
            request.path.to_path_buf(),
            text,
            output,
            Rc::clone(&self.shared),
        ))
    }
}

impl FrontEnd for FakeFrontEnd {
    type Unit = FakeUnit;

    fn parse(&self, request: &ParseRequest<'_>) -> Result<FakeUnit, FrontEndError> {
        self.run(request, ParseKind::Full)
    }

    fn reparse(&self, unit: &mut FakeUnit, request: &ParseRequest<'_>) -> Result<(), FrontEndError> {
        *unit = self.run(request, ParseKind::Incremental)?;
        Ok(())
    }
}

/// Index of a node inside a [`FakeUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeCursor(pub usize);

#[derive(Debug)]
struct Slot {
    info: CursorInfo,
    children: Vec<usize>,
    referenced: Option<usize>,
    definition: Option<usize>,
}

/// A parsed unit built from a [`FakeOutput`].
#[derive(Debug)]
pub struct FakeUnit {
    path: PathBuf,
    text: String,
    slots: Vec<Slot>,
    diagnostics: Vec<Diagnostic>,
    completions: Vec<RawCompletion>,
    usage: ResourceUsage,
    shared: Rc<Shared>,
}

impl FakeUnit {
    fn build(path: PathBuf, text: String, output: FakeOutput, shared: Rc<Shared>) -> Self {
        let mut root = CursorInfo::new(CursorKind::TranslationUnit);
        root.spelling = path.display().to_string();
        let mut slots = vec![Slot {
            info: root,
            children: Vec::new(),
            referenced: None,
            definition: None,
        }];

        let mut keys = HashMap::new();
        let mut links = Vec::new();
        for node in output.nodes {
            let id = flatten(node, &path, &mut slots, &mut keys, &mut links);
            slots[0].children.push(id);
        }
        for (id, refers_to, defined_by) in links {
            slots[id].referenced = refers_to.and_then(|key| keys.get(&key).copied());
            slots[id].definition = defined_by.and_then(|key| keys.get(&key).copied());
        }

        shared.live_units.set(shared.live_units.get() + 1);
        Self {
            path,
            text,
            slots,
            diagnostics: output.diagnostics,
            completions: output.completions,
            usage: output.usage,
            shared,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn in_bounds(&self, path: &Path, row: u32, col: u32) -> bool {
        path == self.path && LineIndex::new(self.text.as_bytes()).contains(row, col)
    }
}

type Link = (usize, Option<String>, Option<String>);

/// Appends `node` and its subtree to `slots` in pre-order without recursing,
/// so scripted trees can be arbitrarily deep.
fn flatten(
    node: FakeNode,
    main: &Path,
    slots: &mut Vec<Slot>,
    keys: &mut HashMap<String, usize>,
    links: &mut Vec<Link>,
) -> usize {
    let first = slots.len();
    let mut stack: Vec<(FakeNode, Option<usize>)> = vec![(node, None)];

    while let Some((node, parent)) = stack.pop() {
        let FakeNode {
            mut info,
            key,
            refers_to,
            defined_by,
            children,
        } = node;
        info.in_main_file = !info.location.is_none() && info.location.file() == main;

        let id = slots.len();
        slots.push(Slot {
            info,
            children: Vec::new(),
            referenced: None,
            definition: None,
        });
        if let Some(key) = key {
            keys.insert(key, id);
        }
        links.push((id, refers_to, defined_by));
        if let Some(parent) = parent {
            slots[parent].children.push(id);
        }
        stack.extend(children.into_iter().rev().map(|child| (child, Some(id))));
    }
    first
}

impl Drop for FakeUnit {
    fn drop(&mut self) {
        let live = self.shared.live_units.get();
        self.shared.live_units.set(live.saturating_sub(1));
    }
}

impl ParsedUnit for FakeUnit {
    type Cursor = FakeCursor;

    fn root(&self) -> FakeCursor {
        FakeCursor(0)
    }

    fn children(&self, cursor: FakeCursor) -> Vec<FakeCursor> {
        self.slots[cursor.0]
            .children
            .iter()
            .map(|&id| FakeCursor(id))
            .collect()
    }

    fn info(&self, cursor: FakeCursor) -> CursorInfo {
        self.slots[cursor.0].info.clone()
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.clone()
    }

    /// The innermost node whose spelling covers the position.
    fn cursor_at(&self, path: &Path, row: u32, col: u32) -> Option<FakeCursor> {
        if !self.in_bounds(path, row, col) {
            return None;
        }
        self.slots
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, slot)| {
                let loc = &slot.info.location;
                let width = slot.info.spelling.len().max(1) as u32;
                loc.file() == path && loc.row == row && col >= loc.col && col < loc.col + width
            })
            .map(|(id, _)| FakeCursor(id))
            .last()
    }

    fn referenced(&self, cursor: FakeCursor) -> Option<FakeCursor> {
        let slot = &self.slots[cursor.0];
        if let Some(id) = slot.referenced {
            return Some(FakeCursor(id));
        }
        match slot.info.kind {
            CursorKind::Other | CursorKind::TranslationUnit => None,
            _ => Some(cursor),
        }
    }

    fn definition(&self, cursor: FakeCursor) -> Option<FakeCursor> {
        let slot = &self.slots[cursor.0];
        match slot.definition {
            Some(id) => Some(FakeCursor(id)),
            None => slot.info.is_definition.then_some(cursor),
        }
    }

    fn complete_at(
        &mut self,
        path: &Path,
        row: u32,
        col: u32,
        unsaved: &[UnsavedFile<'_>],
    ) -> Vec<RawCompletion> {
        self.shared.completions.borrow_mut().push(CompletionRecord {
            path: path.to_path_buf(),
            row,
            col,
            unsaved: unsaved.iter().map(|f| f.path.to_path_buf()).collect(),
        });
        if !self.in_bounds(path, row, col) {
            return Vec::new();
        }
        self.completions.clone()
    }

    fn resource_usage(&self) -> ResourceUsage {
        self.usage.clone()
    }
}
