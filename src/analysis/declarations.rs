//! Local variable declarators reachable through statement flattening.

use super::flatten::StatementFlattener;
use crate::ast::{Expression, MethodDeclaration, VariableDeclarator};
use crate::error::Result;

/// Declarators of every top-level declaration expression in the flattened
/// body, in order. Declarations nested inside other expressions (lambda
/// bodies, anonymous classes) and loop headers are not included.
pub fn variable_declarations(method: &MethodDeclaration) -> Result<Vec<&VariableDeclarator>> {
    variable_declarations_with(&StatementFlattener::default(), method)
}

pub fn variable_declarations_with<'ast>(
    flattener: &StatementFlattener,
    method: &'ast MethodDeclaration,
) -> Result<Vec<&'ast VariableDeclarator>> {
    let expressions = flattener.flatten_method(method)?;
    Ok(declarators(&expressions))
}

/// Declarators among already flattened expressions.
pub fn declarators<'ast>(expressions: &[&'ast Expression]) -> Vec<&'ast VariableDeclarator> {
    expressions
        .iter()
        .filter_map(|expr| expr.as_variable_declaration())
        .flat_map(|decl| decl.variables.iter())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;
    use std::path::Path;

    fn names(body: &str) -> Vec<String> {
        let source = format!("class T {{ void m() {{ {} }} }}", body);
        let unit = JavaParser::new()
            .parse_source(Path::new("T.java"), source)
            .unwrap();
        variable_declarations(&unit.types[0].methods()[0])
            .unwrap()
            .into_iter()
            .map(|v| v.name.clone())
            .collect()
    }

    #[test]
    fn test_multiple_declarators_in_order() {
        assert_eq!(names("int a, b; foo();"), vec!["a", "b"]);
    }

    #[test]
    fn test_nested_blocks_and_branches() {
        assert_eq!(
            names("int a = 1; if (a > 0) { String s = \"x\"; } else { long t; } while (x) { var u = 2; }"),
            vec!["a", "s", "t", "u"]
        );
    }

    #[test]
    fn test_for_header_is_not_a_declaration_site() {
        assert_eq!(names("for (int i = 0; i < 3; i++) { int j = i; }"), vec!["j"]);
    }

    #[test]
    fn test_lambda_locals_are_not_included() {
        assert!(names("run(() -> { int hidden = 1; });").is_empty());
    }

    #[test]
    fn test_array_dimensions_after_name() {
        let source = "class T { void m() { int a[], b; } }";
        let unit = JavaParser::new()
            .parse_source(Path::new("T.java"), source)
            .unwrap();
        let vars = variable_declarations(&unit.types[0].methods()[0]).unwrap();
        assert_eq!(vars[0].ty, "int[]");
        assert_eq!(vars[1].ty, "int");
        assert!(vars.iter().all(|v| v.initializer.is_none()));
    }
}
