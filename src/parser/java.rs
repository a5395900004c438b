//! tree-sitter driver for Java sources.

use std::fs;
use std::path::Path;
use std::thread;

use once_cell::sync::OnceCell;
use tree_sitter::{Language, Node, Parser, Tree};

use super::lower::Lowerer;
use crate::analysis::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use crate::ast::{CompilationUnit, Span};
use crate::error::{Error, Result};

/// Shared parser with the default depth limit.
static DEFAULT_PARSER: OnceCell<JavaParser> = OnceCell::new();

/// Stack reserved per nesting level on the lowering thread. Unoptimized
/// builds spend up to ~35 KiB per level across the lowering frames.
const STACK_PER_LEVEL: usize = 64 * 1024;

const MIN_LOWERING_STACK: usize = 16 * 1024 * 1024;

fn lowering_stack_size(max_depth: usize) -> usize {
    max_depth
        .saturating_mul(STACK_PER_LEVEL)
        .max(MIN_LOWERING_STACK)
}

/// Parses Java source into a [`CompilationUnit`].
///
/// Holds only configuration; a fresh `tree_sitter::Parser` is created for
/// each call since those are not `Sync`.
#[derive(Clone)]
pub struct JavaParser {
    language: Language,
    max_depth: usize,
}

impl JavaParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Parser with the default configuration, shared process-wide.
    pub fn shared() -> &'static JavaParser {
        DEFAULT_PARSER.get_or_init(JavaParser::new)
    }

    /// Bound the nesting depth accepted while lowering the tree.
    ///
    /// Values above [`MAX_DEPTH_LIMIT`] are clamped to it.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Read and parse a file.
    pub fn parse_file(&self, path: &Path) -> Result<CompilationUnit> {
        let source = fs::read_to_string(path)
            .map_err(|e| Error::parse(path, format!("cannot read file: {}", e)))?;
        self.parse_source(path, source)
    }

    /// Parse source text. `path` is only used for error reporting.
    ///
    /// Lowering recurses once per nesting level, so it runs on a scoped
    /// thread whose stack is sized from the depth limit. Input nested
    /// deeper than the limit fails with `DepthExceeded` instead of
    /// exhausting the caller's stack.
    pub fn parse_source(&self, path: &Path, source: impl Into<String>) -> Result<CompilationUnit> {
        let source = source.into();
        let stack_size = lowering_stack_size(self.max_depth);

        thread::scope(|scope| {
            let worker = thread::Builder::new()
                .name("flatjava-lower".to_string())
                .stack_size(stack_size)
                .spawn_scoped(scope, move || self.parse_in_place(path, source))
                .map_err(|e| Error::parse(path, format!("cannot start parser thread: {}", e)))?;
            match worker.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        })
    }

    fn parse_in_place(&self, path: &Path, source: String) -> Result<CompilationUnit> {
        let tree = self.parse_tree(path, source.as_bytes())?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(Error::parse(path, describe_syntax_error(root, source.as_bytes())));
        }

        tracing::debug!(
            path = %path.display(),
            bytes = source.len(),
            max_depth = self.max_depth,
            "lowering java syntax tree"
        );
        let mut lowerer = Lowerer::new(path, source.as_bytes(), self.max_depth);
        let (package, imports, types) = lowerer.compilation_unit(root)?;
        Ok(CompilationUnit::new(source, package, imports, types, Span::from_node(root)))
    }

    fn parse_tree(&self, path: &Path, source: &[u8]) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| Error::parse(path, format!("cannot load java grammar: {}", e)))?;
        parser
            .parse(source, None)
            .ok_or_else(|| Error::parse(path, "parser produced no tree"))
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Message for the first `ERROR` or `MISSING` node in document order.
fn describe_syntax_error(root: Node, source: &[u8]) -> String {
    match first_syntax_error(root) {
        Some(node) if node.is_missing() => format!(
            "syntax error at {}:{}: missing `{}`",
            node.start_position().row + 1,
            node.start_position().column + 1,
            node.kind()
        ),
        Some(node) => {
            let text = node.utf8_text(source).unwrap_or("");
            let excerpt: String = text.chars().take(40).collect();
            format!(
                "syntax error at {}:{} near `{}`",
                node.start_position().row + 1,
                node.start_position().column + 1,
                excerpt.trim()
            )
        }
        None => "syntax error".to_string(),
    }
}

/// Iterative walk that only descends into subtrees containing errors.
fn first_syntax_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
