use serde::{Deserialize, Serialize};

use crate::{CompletionKind, SourceLocation};

/// C++ access control of a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSpecifier {
    #[default]
    None,
    Public,
    Protected,
    Private,
}

/// One node of a file's syntax tree.
///
/// The root is a synthetic translation-unit node. Nodes whose `kind` is
/// [`CompletionKind::Unknown`] keep empty semantic fields but still carry their
/// children, so declarations nested in statements stay reachable.
///
/// Dropping a tree is iterative, so arbitrarily deep trees are safe to
/// discard. The derived `Clone`, `PartialEq`, `Debug` and serde impls still
/// recurse once per level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstNode {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(rename = "typedef")]
    pub typedef_type: String,
    pub doc: String,
    pub kind: CompletionKind,
    pub access: AccessSpecifier,
    pub location: SourceLocation,
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// A node with no semantic payload.
    pub fn unknown() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.kind.is_unknown()
    }

    /// Pre-order iterator over this node and everything below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Number of nodes in the tree rooted here.
    pub fn len(&self) -> usize {
        self.descendants().count()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// First node (pre-order) with the given name and kind.
    pub fn find(&self, kind: CompletionKind, name: &str) -> Option<&AstNode> {
        self.descendants()
            .find(|node| node.kind == kind && node.name == name)
    }
}

impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// See [`AstNode::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a AstNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
