use std::path::Path;

use clangtool_core::{AstNode, CompletionKind};
use clangtool_frontend::ParsedUnit;

struct Frame<C> {
    node: AstNode,
    children: Vec<C>,
    next: usize,
}

fn node<U: ParsedUnit>(unit: &U, cursor: U::Cursor) -> AstNode {
    let info = unit.info(cursor);
    let kind = info.kind.completion_kind();
    if kind == CompletionKind::Unknown {
        return AstNode::unknown();
    }
    AstNode {
        name: info.display_name,
        ty: info.ty,
        typedef_type: info.typedef_type,
        doc: info.doc,
        kind,
        access: info.access,
        location: info.location,
        children: Vec::new(),
    }
}

/// The synthetic root for a unit that failed to parse.
pub(crate) fn empty_root(path: &Path) -> AstNode {
    let mut root = AstNode::unknown();
    root.name = path.display().to_string();
    root
}

/// Builds the tree depth-first with an explicit stack.
pub(crate) fn build<U: ParsedUnit>(unit: &U, include_headers: bool) -> AstNode {
    let root = unit.root();
    let top_level: Vec<U::Cursor> = unit
        .children(root)
        .into_iter()
        .filter(|&c| include_headers || unit.info(c).in_main_file)
        .collect();

    let mut root_node = AstNode::unknown();
    root_node.name = unit.info(root).spelling;
    let mut stack = vec![Frame {
        node: root_node,
        children: top_level,
        next: 0,
    }];

    loop {
        let Some(top) = stack.last_mut() else {
            return AstNode::unknown();
        };
        if let Some(&cursor) = top.children.get(top.next) {
            top.next += 1;
            stack.push(Frame {
                node: node(unit, cursor),
                children: unit.children(cursor),
                next: 0,
            });
            continue;
        }

        let Some(done) = stack.pop() else {
            return AstNode::unknown();
        };
        match stack.last_mut() {
            Some(parent) => parent.node.children.push(done.node),
            None => return done.node,
        }
    }
}
