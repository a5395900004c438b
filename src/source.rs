//! Query facade over one parsed Java file.

use std::path::{Path, PathBuf};

use crate::analysis::{
    self, AssignmentCollector, CallCollector, StatementFlattener, DEFAULT_MAX_DEPTH,
};
use crate::ast::{
    AssignExpr, CompilationUnit, Expression, MethodCallExpr, MethodDeclaration, Statement,
    VariableDeclarator,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::JavaParser;

/// A parsed Java source file.
///
/// The unit is immutable once parsed; every query borrows from it, so a
/// `JavaSource` can be shared across threads and queried concurrently.
#[derive(Debug, Clone)]
pub struct JavaSource {
    path: PathBuf,
    unit: CompilationUnit,
    max_depth: usize,
}

impl JavaSource {
    /// Read and parse `path` with the default depth limit.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unit = JavaParser::shared().parse_file(path)?;
        Ok(Self::new(path, unit, DEFAULT_MAX_DEPTH))
    }

    /// Read and parse `path` with the limits from `config`.
    pub fn parse_with<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let unit = JavaParser::new()
            .with_max_depth(config.max_depth)
            .parse_file(path)?;
        Ok(Self::new(path, unit, config.max_depth))
    }

    /// Parse in-memory source; `name` stands in for the path in errors.
    pub fn from_source(name: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self> {
        let path = name.into();
        let unit = JavaParser::shared().parse_source(&path, source)?;
        Ok(Self::new(&path, unit, DEFAULT_MAX_DEPTH))
    }

    fn new(path: &Path, unit: CompilationUnit, max_depth: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            unit,
            max_depth,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn compilation_unit(&self) -> &CompilationUnit {
        &self.unit
    }

    pub fn package_name(&self) -> Result<&str> {
        self.unit
            .package
            .as_ref()
            .map(|p| p.name.as_str())
            .ok_or_else(|| Error::MissingPackage {
                path: self.path.clone(),
            })
    }

    /// Name of the first public class or interface.
    pub fn public_class_name(&self) -> Option<&str> {
        self.unit.public_class().map(|c| c.name.as_str())
    }

    /// Methods of the public class, in source order, whatever their own
    /// modifiers.
    pub fn public_methods(&self) -> Option<&[MethodDeclaration]> {
        self.unit.public_class().map(|c| c.methods())
    }

    /// First method of the public class named `name`.
    pub fn public_method(&self, name: &str) -> Option<&MethodDeclaration> {
        self.public_methods()?.iter().find(|m| m.name == name)
    }

    pub fn method_expressions<'a>(&'a self, method: &'a MethodDeclaration) -> Result<Vec<&'a Expression>> {
        self.flattener().flatten_method(method)
    }

    pub fn variable_declarations<'a>(
        &'a self,
        method: &'a MethodDeclaration,
    ) -> Result<Vec<&'a VariableDeclarator>> {
        analysis::variable_declarations_with(&self.flattener(), method)
    }

    pub fn method_calls<'a>(&'a self, method: &'a MethodDeclaration) -> Result<Vec<&'a MethodCallExpr>> {
        CallCollector::new(self.max_depth).collect(method)
    }

    pub fn assignments<'a>(&'a self, method: &'a MethodDeclaration) -> Result<Vec<&'a AssignExpr>> {
        AssignmentCollector::new(self.max_depth).collect(method)
    }

    /// Every statement in the file, pre-order.
    pub fn all_statements(&self) -> Result<Vec<&Statement>> {
        analysis::all_statements(&self.unit)
    }

    /// Every expression in the file, pre-order.
    pub fn all_expressions(&self) -> Result<Vec<&Expression>> {
        analysis::all_expressions(&self.unit)
    }

    /// Source text of a node.
    pub fn text(&self, span: crate::ast::Span) -> &str {
        self.unit.snippet(span)
    }

    fn flattener(&self) -> StatementFlattener {
        StatementFlattener::new(self.max_depth)
    }
}
