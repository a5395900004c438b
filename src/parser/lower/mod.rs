//! Lowering from the tree-sitter CST to the typed AST.
//!
//! Input trees are already known to be free of `ERROR`/`MISSING` nodes,
//! so an absent required field is reported as a parse error rather than
//! silently producing a partial node.

mod declarations;
mod expressions;
mod statements;

use std::path::Path;

use tree_sitter::Node;

use crate::analysis::DepthBudget;
use crate::error::{Error, Result};

pub(crate) struct Lowerer<'src> {
    path: &'src Path,
    source: &'src [u8],
    budget: DepthBudget,
}

impl<'src> Lowerer<'src> {
    pub(crate) fn new(path: &'src Path, source: &'src [u8], max_depth: usize) -> Self {
        Self {
            path,
            source,
            budget: DepthBudget::new(max_depth),
        }
    }

    fn text(&self, node: Node) -> &'src str {
        node.utf8_text(self.source).unwrap_or("")
    }

    /// Node text with whitespace runs collapsed, for type names.
    fn compact(&self, node: Node) -> String {
        self.text(node).split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn missing(&self, node: Node, what: &str) -> Error {
        Error::parse(
            self.path,
            format!(
                "`{}` without {} at {}:{}",
                node.kind(),
                what,
                node.start_position().row + 1,
                node.start_position().column + 1
            ),
        )
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>> {
        node.child_by_field_name(name)
            .ok_or_else(|| self.missing(node, name))
    }

    fn field_text(&self, node: Node, name: &str) -> Result<String> {
        let child = self.field(node, name)?;
        Ok(self.text(child).to_string())
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.budget.enter()?;
        let result = f(self);
        self.budget.exit();
        result
    }
}

fn is_comment(node: Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

/// Named children, skipping comments.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|n| !is_comment(*n))
        .collect();
    children
}

fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    named_children(node).into_iter().next()
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|n| n.kind() == kind);
    found
}

fn fields<'t>(node: Node<'t>, name: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children_by_field_name(name, &mut cursor).collect();
    found
}
