//! Statement flattening.
//!
//! Linearizes a method body into the expressions that appear directly as
//! statement bodies or return values, in source order. Control structure
//! is descended into but its headers are not: loop conditions, `if`
//! conditions, switch selectors, synchronized locks and try resources are
//! never emitted. Sub-expressions of an emitted expression are not split
//! out either.

use super::DepthBudget;
use super::DEFAULT_MAX_DEPTH;
use crate::ast::{Block, Expression, MethodDeclaration, Statement, StmtKind, SwitchBlock};
use crate::error::Result;

/// Flatten a method body with the default depth limit.
///
/// Methods without a body (abstract, interface, native) yield an empty list.
pub fn flatten_method(method: &MethodDeclaration) -> Result<Vec<&Expression>> {
    StatementFlattener::default().flatten_method(method)
}

/// Flatten a single statement with the default depth limit.
pub fn flatten_statement(stmt: &Statement) -> Result<Vec<&Expression>> {
    StatementFlattener::default().flatten_statement(stmt)
}

/// Configurable entry point for flattening.
#[derive(Debug, Clone, Copy)]
pub struct StatementFlattener {
    max_depth: usize,
}

impl StatementFlattener {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn flatten_method<'ast>(&self, method: &'ast MethodDeclaration) -> Result<Vec<&'ast Expression>> {
        match &method.body {
            Some(body) => self.flatten_block(body),
            None => Ok(Vec::new()),
        }
    }

    pub fn flatten_block<'ast>(&self, block: &'ast Block) -> Result<Vec<&'ast Expression>> {
        let mut pass = Pass::new(self.max_depth);
        pass.block(block)?;
        Ok(pass.out)
    }

    pub fn flatten_statement<'ast>(&self, stmt: &'ast Statement) -> Result<Vec<&'ast Expression>> {
        let mut pass = Pass::new(self.max_depth);
        pass.statement(stmt)?;
        Ok(pass.out)
    }
}

impl Default for StatementFlattener {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

struct Pass<'ast> {
    budget: DepthBudget,
    out: Vec<&'ast Expression>,
}

impl<'ast> Pass<'ast> {
    fn new(max_depth: usize) -> Self {
        Self {
            budget: DepthBudget::new(max_depth),
            out: Vec::new(),
        }
    }

    fn block(&mut self, block: &'ast Block) -> Result<()> {
        for stmt in &block.statements {
            self.statement(stmt)?;
        }
        Ok(())
    }

    fn statement(&mut self, stmt: &'ast Statement) -> Result<()> {
        self.budget.enter()?;
        let result = self.statement_kind(stmt);
        self.budget.exit();
        result
    }

    fn statement_kind(&mut self, stmt: &'ast Statement) -> Result<()> {
        match &stmt.kind {
            StmtKind::Expression(expr) => self.out.push(expr),
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.out.push(value);
                }
            }
            StmtKind::Block(block) => self.block(block)?,
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.statement(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.statement(else_branch)?;
                }
            }
            StmtKind::Foreach { body, .. }
            | StmtKind::For { body, .. }
            | StmtKind::Do { body, .. }
            | StmtKind::While { body, .. } => self.statement(body)?,
            StmtKind::Switch(switch) => self.switch(switch)?,
            StmtKind::Synchronized { body, .. } => self.block(body)?,
            StmtKind::Try(try_stmt) => {
                self.block(&try_stmt.block)?;
                for catch in &try_stmt.catches {
                    self.block(&catch.body)?;
                }
                if let Some(finally) = &try_stmt.finally {
                    self.block(finally)?;
                }
            }
            StmtKind::Throw(_)
            | StmtKind::Break(_)
            | StmtKind::Continue(_)
            | StmtKind::Labeled { .. }
            | StmtKind::Assert { .. }
            | StmtKind::Yield(_)
            | StmtKind::LocalClass(_)
            | StmtKind::ConstructorCall(_)
            | StmtKind::Empty
            | StmtKind::Other { .. } => {
                tracing::trace!(
                    kind = stmt.kind_name(),
                    at = %stmt.span,
                    "statement contributes no expressions"
                );
            }
        }
        Ok(())
    }

    fn switch(&mut self, switch: &'ast SwitchBlock) -> Result<()> {
        for entry in &switch.entries {
            for stmt in &entry.statements {
                self.statement(stmt)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompilationUnit, ExprKind};
    use crate::error::Error;
    use crate::parser::JavaParser;
    use std::path::Path;

    fn unit(body: &str) -> CompilationUnit {
        let source = format!("class T {{ void m() {{ {} }} abstract void a(); }}", body);
        JavaParser::new()
            .parse_source(Path::new("T.java"), source)
            .unwrap()
    }

    fn texts(unit: &CompilationUnit) -> Vec<String> {
        let method = &unit.types[0].methods()[0];
        flatten_method(method)
            .unwrap()
            .into_iter()
            .map(|e| unit.snippet(e.span).to_string())
            .collect()
    }

    #[test]
    fn test_empty_and_absent_bodies() {
        let unit = unit("");
        assert!(texts(&unit).is_empty());

        let abstract_method = &unit.types[0].methods()[1];
        assert!(abstract_method.body.is_none());
        assert!(flatten_method(abstract_method).unwrap().is_empty());
    }

    #[test]
    fn test_if_else_both_branches() {
        let unit = unit("if (cond) { x = 1; } else { y = 2; }");
        assert_eq!(texts(&unit), vec!["x = 1", "y = 2"]);
    }

    #[test]
    fn test_else_if_chain() {
        let unit = unit("if (a) f(); else if (b) g(); else h();");
        assert_eq!(texts(&unit), vec!["f()", "g()", "h()"]);
    }

    #[test]
    fn test_try_catch_finally_order() {
        let unit = unit(
            "try { a(); } catch (IOException e) { b(); } catch (RuntimeException e) { c(); } finally { d(); }",
        );
        assert_eq!(texts(&unit), vec!["a()", "b()", "c()", "d()"]);
    }

    #[test]
    fn test_try_resources_are_not_emitted() {
        let unit = unit("try (Reader r = open()) { r.read(); }");
        assert_eq!(texts(&unit), vec!["r.read()"]);
    }

    #[test]
    fn test_loop_headers_are_excluded() {
        let unit = unit(
            "for (int i = next(); i < limit(); i++) { work(i); }
             for (String s : items()) use(s);
             while (more()) { step(); }
             do { again(); } while (check());",
        );
        assert_eq!(texts(&unit), vec!["work(i)", "use(s)", "step()", "again()"]);
    }

    #[test]
    fn test_return_value_and_bare_return() {
        let unit = unit("if (done) return; return compute();");
        assert_eq!(texts(&unit), vec!["compute()"]);
    }

    #[test]
    fn test_switch_classic_and_arrow() {
        let unit = unit(
            "switch (k) { case 1: one(); break; case 2: case 3: two(); default: other(); }
             switch (k) { case 1 -> first(); default -> { second(); } }",
        );
        assert_eq!(
            texts(&unit),
            vec!["one()", "two()", "other()", "first()", "second()"]
        );
    }

    #[test]
    fn test_synchronized_body_only() {
        let unit = unit("synchronized (lock()) { guarded(); }");
        assert_eq!(texts(&unit), vec!["guarded()"]);
    }

    #[test]
    fn test_unhandled_statements_are_ignored() {
        let unit = unit(
            "outer: for (;;) { break outer; }
             throw fail();
             assert ok() : msg();
             class Local { void f() { hidden(); } }
             ;
             kept();",
        );
        assert_eq!(texts(&unit), vec!["kept()"]);
    }

    #[test]
    fn test_labeled_body_is_not_descended() {
        let unit = unit("label: { inside(); } after();");
        assert_eq!(texts(&unit), vec!["after()"]);
    }

    #[test]
    fn test_declarations_are_emitted_whole() {
        let unit = unit("int a = f(g()), b; foo();");
        let method = &unit.types[0].methods()[0];
        let exprs = flatten_method(method).unwrap();
        assert_eq!(exprs.len(), 2);
        assert!(matches!(exprs[0].kind, ExprKind::VariableDeclaration(_)));
        assert!(exprs[1].is_method_call());
        assert_eq!(unit.snippet(exprs[0].span), "int a = f(g()), b");
    }

    #[test]
    fn test_declaration_span_stops_before_semicolon() {
        let unit = unit("final int[] xs = { 1, 2 } ; return xs;");
        assert_eq!(texts(&unit), vec!["final int[] xs = { 1, 2 }", "xs"]);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let unit = unit("if (a) { x(); } else { try { y(); } finally { z(); } }");
        let method = &unit.types[0].methods()[0];
        let first = flatten_method(method).unwrap();
        let second = flatten_method(method).unwrap();
        assert_eq!(first.len(), second.len());
        assert!(first
            .iter()
            .zip(&second)
            .all(|(a, b)| std::ptr::eq(*a, *b)));
    }

    #[test]
    fn test_flatten_single_statement() {
        let unit = unit("{ a(); { b(); } }");
        let body = unit.types[0].methods()[0].body.as_ref().unwrap();
        let exprs = flatten_statement(&body.statements[0]).unwrap();
        assert_eq!(exprs.len(), 2);
    }

    #[test]
    fn test_depth_limit() {
        let unit = unit("{ { { deep(); } } }");
        let method = &unit.types[0].methods()[0];

        let err = StatementFlattener::new(2).flatten_method(method).unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { limit: 2 }));

        let exprs = StatementFlattener::new(4).flatten_method(method).unwrap();
        assert_eq!(exprs.len(), 1);
    }
}
