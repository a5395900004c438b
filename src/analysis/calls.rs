//! Method call collection.

use super::visit::{walk_method_call, Visitor, Walkable};
use super::{DepthBudget, DEFAULT_MAX_DEPTH};
use crate::ast::MethodCallExpr;
use crate::error::Result;

/// Every method call under `node`, post-order: for `a(b(), c())` the
/// result is `[b, c, a]`.
///
/// Unlike flattening, the walk is unrestricted. Loop headers, conditions,
/// lambda bodies, anonymous class bodies and arguments are all searched.
pub fn collect_calls<W: Walkable + ?Sized>(node: &W) -> Result<Vec<&MethodCallExpr>> {
    CallCollector::new(DEFAULT_MAX_DEPTH).collect(node)
}

pub struct CallCollector<'ast> {
    budget: DepthBudget,
    calls: Vec<&'ast MethodCallExpr>,
}

impl<'ast> CallCollector<'ast> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            budget: DepthBudget::new(max_depth),
            calls: Vec::new(),
        }
    }

    pub fn collect<W: Walkable + ?Sized>(mut self, node: &'ast W) -> Result<Vec<&'ast MethodCallExpr>> {
        node.accept(&mut self)?;
        Ok(self.calls)
    }
}

impl<'ast> Visitor<'ast> for CallCollector<'ast> {
    fn budget(&mut self) -> &mut DepthBudget {
        &mut self.budget
    }

    fn visit_method_call(&mut self, call: &'ast MethodCallExpr) -> Result<()> {
        walk_method_call(self, call)?;
        tracing::trace!(
            scope = call.scope().map(|s| s.kind_name()).unwrap_or("none"),
            name = %call.name(),
            arguments = call.arguments().len(),
            "method call"
        );
        self.calls.push(call);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompilationUnit, ExprKind, StmtKind};
    use crate::error::Error;
    use crate::parser::JavaParser;
    use std::path::Path;

    fn parse(source: &str) -> CompilationUnit {
        JavaParser::new()
            .parse_source(Path::new("T.java"), source)
            .unwrap()
    }

    fn method_unit(body: &str) -> CompilationUnit {
        parse(&format!("class T {{ void m() {{ {} }} }}", body))
    }

    fn call_names(unit: &CompilationUnit) -> Vec<String> {
        collect_calls(&unit.types[0].methods()[0])
            .unwrap()
            .into_iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    #[test]
    fn test_post_order_for_nested_arguments() {
        let unit = method_unit("a(b(), c());");
        assert_eq!(call_names(&unit), vec!["b", "c", "a"]);

        let calls = collect_calls(&unit.types[0].methods()[0]).unwrap();
        let outer = calls[2];
        assert!(outer.scope().is_none());
        assert_eq!(outer.arguments().len(), 2);
        assert!(outer.arguments().iter().all(|a| a.is_method_call()));
    }

    #[test]
    fn test_scope_is_walked_before_the_call() {
        let unit = method_unit("builder().add(x).build();");
        assert_eq!(call_names(&unit), vec!["builder", "add", "build"]);

        let calls = collect_calls(&unit.types[0].methods()[0]).unwrap();
        let build = calls[2];
        let scope = build.scope().unwrap();
        assert_eq!(unit.snippet(scope.span), "builder().add(x)");
        assert!(matches!(scope.kind, ExprKind::MethodCall(_)));
    }

    #[test]
    fn test_headers_and_conditions_are_searched() {
        let unit = method_unit(
            "for (int i = start(); i < end(); i = step(i)) {}
             if (check()) {} while (more()) {}
             for (String s : items()) {}",
        );
        assert_eq!(
            call_names(&unit),
            vec!["start", "end", "step", "check", "more", "items"]
        );
    }

    #[test]
    fn test_lambda_and_anonymous_class_bodies() {
        let unit = method_unit(
            "run(() -> inLambda());
             submit(new Runnable() { public void run() { inAnonymous(); } });",
        );
        assert_eq!(
            call_names(&unit),
            vec!["inLambda", "run", "inAnonymous", "submit"]
        );
    }

    #[test]
    fn test_statements_the_flattener_skips_are_searched() {
        let unit = method_unit("throw error(code()); ");
        assert_eq!(call_names(&unit), vec!["code", "error"]);
    }

    #[test]
    fn test_call_free_subtree() {
        let unit = method_unit("int x = 1 + 2; x++;");
        assert!(call_names(&unit).is_empty());
    }

    #[test]
    fn test_whole_unit_and_single_expression() {
        let unit = parse(
            "class A { int f = init(); void m() { one(); } }
             class B { B() { two(); } }",
        );
        let names: Vec<_> = collect_calls(&unit)
            .unwrap()
            .into_iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, vec!["init", "one", "two"]);

        let body = unit.types[0].methods()[0].body.as_ref().unwrap();
        let StmtKind::Expression(expr) = &body.statements[0].kind else {
            panic!("expected expression statement");
        };
        assert_eq!(collect_calls(expr).unwrap().len(), 1);
    }

    #[test]
    fn test_members_in_declaration_order() {
        let unit = parse(
            "public class T {
                 void m() { a(); }
                 int f = b();
                 T() { c(); }
                 static { d(); }
                 class Inner { void n() { e(); } }
                 int g = f();
             }",
        );
        let names: Vec<_> = collect_calls(&unit)
            .unwrap()
            .into_iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_enum_constants_and_members_interleaved() {
        let unit = parse(
            "enum E {
                 X(x()) { void body() { inX(); } }, Y(y());
                 static final int Z = z();
                 E(int v) { ctor(); }
             }",
        );
        let names: Vec<_> = collect_calls(&unit)
            .unwrap()
            .into_iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, vec!["x", "inX", "y", "z", "ctor"]);
    }

    #[test]
    fn test_depth_limit() {
        let unit = method_unit("f(g(h(i())));");
        let method = &unit.types[0].methods()[0];
        let err = CallCollector::new(3).collect(method).unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { limit: 3 }));
        assert_eq!(CallCollector::new(16).collect(method).unwrap().len(), 4);
    }
}
