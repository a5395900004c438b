//! Pre-order enumeration of every statement or expression in a subtree.

use super::visit::{walk_expr, walk_stmt, Visitor, Walkable};
use super::{DepthBudget, DEFAULT_MAX_DEPTH};
use crate::ast::{Expression, Statement};
use crate::error::Result;

/// Every statement under `node`, parents before children.
pub fn all_statements<W: Walkable + ?Sized>(node: &W) -> Result<Vec<&Statement>> {
    let mut collector = NodeCollector::new(DEFAULT_MAX_DEPTH);
    node.accept(&mut collector)?;
    Ok(collector.statements)
}

/// Every expression under `node`, parents before children.
pub fn all_expressions<W: Walkable + ?Sized>(node: &W) -> Result<Vec<&Expression>> {
    let mut collector = NodeCollector::new(DEFAULT_MAX_DEPTH);
    node.accept(&mut collector)?;
    Ok(collector.expressions)
}

struct NodeCollector<'ast> {
    budget: DepthBudget,
    statements: Vec<&'ast Statement>,
    expressions: Vec<&'ast Expression>,
}

impl<'ast> NodeCollector<'ast> {
    fn new(max_depth: usize) -> Self {
        Self {
            budget: DepthBudget::new(max_depth),
            statements: Vec::new(),
            expressions: Vec::new(),
        }
    }
}

impl<'ast> Visitor<'ast> for NodeCollector<'ast> {
    fn budget(&mut self) -> &mut DepthBudget {
        &mut self.budget
    }

    fn visit_stmt(&mut self, stmt: &'ast Statement) -> Result<()> {
        self.statements.push(stmt);
        walk_stmt(self, stmt)
    }

    fn visit_expr(&mut self, expr: &'ast Expression) -> Result<()> {
        self.expressions.push(expr);
        walk_expr(self, expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;
    use std::path::Path;

    #[test]
    fn test_statements_in_pre_order() {
        let source = "class T { void m() { if (a) { b(); } return; } }";
        let unit = JavaParser::new()
            .parse_source(Path::new("T.java"), source)
            .unwrap();
        let kinds: Vec<_> = all_statements(&unit)
            .unwrap()
            .into_iter()
            .map(|s| s.kind_name())
            .collect();
        assert_eq!(kinds, vec!["if", "block", "expression", "return"]);
    }

    #[test]
    fn test_expressions_in_pre_order() {
        let source = "class T { int f = 1; void m() { g(x + 2); } }";
        let unit = JavaParser::new()
            .parse_source(Path::new("T.java"), source)
            .unwrap();
        let kinds: Vec<_> = all_expressions(&unit)
            .unwrap()
            .into_iter()
            .map(|e| e.kind_name().to_string())
            .collect();
        assert_eq!(kinds, vec!["literal", "method_call", "binary", "name", "literal"]);
    }

    #[test]
    fn test_members_follow_declaration_order() {
        let source = "public class T { void m() { a(); } int f = b(); T() { c(); } }";
        let unit = JavaParser::new()
            .parse_source(Path::new("T.java"), source)
            .unwrap();
        let texts: Vec<_> = all_expressions(&unit)
            .unwrap()
            .into_iter()
            .map(|e| unit.snippet(e.span))
            .collect();
        assert_eq!(texts, vec!["a()", "b()", "c()"]);

        let statements = all_statements(&unit).unwrap();
        assert_eq!(unit.snippet(statements[0].span), "a();");
        assert_eq!(unit.snippet(statements[1].span), "c();");
    }
}
