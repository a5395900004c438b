//! Output formatting for inspection results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ast::{MethodDeclaration, Span};
use crate::error::Result;
use crate::source::JavaSource;

/// Longest expression text shown by the pretty printer before eliding.
const PRETTY_TEXT_WIDTH: usize = 72;

// =============================================================================
// Report model
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub files: Vec<FileReport>,
}

/// Everything reported for one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_class: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodReport>,
    /// Set when the file could not be parsed or traversed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodReport {
    pub name: String,
    pub signature: String,
    pub line: usize,
    pub end_line: usize,
    pub expressions: Vec<ExpressionEntry>,
    pub declarations: Vec<DeclarationEntry>,
    pub calls: Vec<CallEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionEntry {
    pub kind: String,
    pub line: usize,
    pub end_line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub name: String,
    pub arguments: usize,
    pub line: usize,
}

/// Which methods of a file to report.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection<'a> {
    /// Only methods with this name.
    pub method: Option<&'a str>,
    /// Methods of every top-level class, not just the public one.
    pub include_non_public: bool,
}

impl FileReport {
    /// Analyze `source` and collect the selected methods.
    pub fn from_source(source: &JavaSource, selection: Selection<'_>) -> Result<Self> {
        let mut methods = Vec::new();
        for method in selected_methods(source, selection) {
            methods.push(method_report(source, method)?);
        }

        Ok(Self {
            path: source.path().display().to_string(),
            package: source.package_name().ok().map(str::to_string),
            public_class: source.public_class_name().map(str::to_string),
            methods,
            error: None,
        })
    }

    /// Report for a file that could not be analyzed.
    pub fn failed(path: &Path, error: impl ToString) -> Self {
        Self {
            path: path.display().to_string(),
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

fn selected_methods<'a>(
    source: &'a JavaSource,
    selection: Selection<'_>,
) -> Vec<&'a MethodDeclaration> {
    let candidates: Vec<&MethodDeclaration> = if selection.include_non_public {
        source
            .compilation_unit()
            .types
            .iter()
            .flat_map(|t| t.methods())
            .collect()
    } else {
        source.public_methods().map(|m| m.iter().collect()).unwrap_or_default()
    };

    candidates
        .into_iter()
        .filter(|m| selection.method.map_or(true, |name| m.name == name))
        .collect()
}

fn method_report(source: &JavaSource, method: &MethodDeclaration) -> Result<MethodReport> {
    let expressions = source
        .method_expressions(method)?
        .into_iter()
        .map(|e| ExpressionEntry {
            kind: e.kind_name().to_string(),
            line: e.span.start.line,
            end_line: e.span.end.line,
            text: one_line(source, e.span),
        })
        .collect();

    let declarations = source
        .variable_declarations(method)?
        .into_iter()
        .map(|v| DeclarationEntry {
            name: v.name.clone(),
            ty: v.ty.clone(),
            line: v.span.start.line,
            initializer: v.initializer.as_ref().map(|i| one_line(source, i.span)),
        })
        .collect();

    let calls = source
        .method_calls(method)?
        .into_iter()
        .map(|c| CallEntry {
            scope: c.scope().map(|s| one_line(source, s.span)),
            name: c.name().to_string(),
            arguments: c.arguments().len(),
            line: c.span.start.line,
        })
        .collect();

    Ok(MethodReport {
        name: method.name.clone(),
        signature: method.signature(),
        line: method.span.start.line,
        end_line: method.span.end.line,
        expressions,
        declarations,
        calls,
    })
}

/// Node text with line breaks and indentation collapsed.
fn one_line(source: &JavaSource, span: Span) -> String {
    source
        .text(span)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// JSON Format
// =============================================================================

pub fn to_json(reports: &[FileReport]) -> serde_json::Result<String> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_scanned: reports.len(),
        files_failed: reports.iter().filter(|r| r.is_failed()).count(),
        files: reports.to_vec(),
    };
    serde_json::to_string_pretty(&report)
}

/// Write results in JSON format.
pub fn write_json(reports: &[FileReport]) -> anyhow::Result<()> {
    let json = to_json(reports)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(reports: &[FileReport]) {
    println!();
    print!("  ");
    print!("{}", "flatjava".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    for report in reports {
        write_file(report);
        println!();
    }

    let failed = reports.iter().filter(|r| r.is_failed()).count();
    print!("  {}", format!("Files: {}", reports.len()).dimmed());
    if failed > 0 {
        println!("  {}", format!("{} failed", failed).red());
    } else {
        println!("  {}", "all parsed".green());
    }
    println!();
}

fn write_file(report: &FileReport) {
    println!("  {}", report.path.blue().bold());

    if let Some(error) = &report.error {
        println!("    {} {}", "ERROR".red(), error);
        return;
    }

    print!("    {}", "package: ".dimmed());
    println!("{}", report.package.as_deref().unwrap_or("(none)"));
    print!("    {}", "class:   ".dimmed());
    println!("{}", report.public_class.as_deref().unwrap_or("(no public class)"));

    for method in &report.methods {
        println!();
        write_method(method);
    }
}

fn write_method(method: &MethodReport) {
    print!("    {}", method.signature.bold());
    println!("{}", format!(":{}-{}", method.line, method.end_line).dimmed());

    if method.expressions.is_empty() {
        println!("      {}", "(no statement expressions)".dimmed());
    }
    for expr in &method.expressions {
        print!("      {:<20}", expr.kind.as_str().dimmed());
        println!("{}", elide(&expr.text));
    }

    if !method.declarations.is_empty() {
        println!("      {}", "declares:".yellow());
        for decl in &method.declarations {
            println!("        {} {}", decl.ty.dimmed(), decl.name);
        }
    }

    if !method.calls.is_empty() {
        println!("      {}", "calls:".green());
        for call in &method.calls {
            match &call.scope {
                Some(scope) => print!("        {}{}", elide(scope).dimmed(), ".".dimmed()),
                None => print!("        "),
            }
            println!("{}/{}", call.name, call.arguments);
        }
    }
}

fn elide(text: &str) -> String {
    if text.chars().count() <= PRETTY_TEXT_WIDTH {
        return text.to_string();
    }
    let head: String = text.chars().take(PRETTY_TEXT_WIDTH - 3).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
package demo;

public class Greeter {
    public void greet(String name) {
        String msg = format(name);
        out.println(
            msg);
    }

    void quiet() {}
}

class Other {
    void helper() { run(); }
}
"#;

    #[test]
    fn test_file_report() {
        let source = JavaSource::from_source("Greeter.java", SOURCE).unwrap();
        let report = FileReport::from_source(&source, Selection::default()).unwrap();

        assert_eq!(report.package.as_deref(), Some("demo"));
        assert_eq!(report.public_class.as_deref(), Some("Greeter"));
        assert_eq!(report.methods.len(), 2);

        let greet = &report.methods[0];
        assert_eq!(greet.signature, "greet(String)");
        assert_eq!((greet.line, greet.end_line), (5, 9));
        assert_eq!(greet.expressions[0].text, "String msg = format(name)");
        assert_eq!(greet.expressions[1].text, "out.println( msg)");
        assert_eq!((greet.expressions[1].line, greet.expressions[1].end_line), (7, 8));
        assert_eq!(greet.declarations[0].name, "msg");
        assert_eq!(greet.declarations[0].initializer.as_deref(), Some("format(name)"));
        let calls: Vec<_> = greet.calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(calls, vec!["format", "println"]);
        assert_eq!(greet.calls[1].scope.as_deref(), Some("out"));
    }

    #[test]
    fn test_selection() {
        let source = JavaSource::from_source("Greeter.java", SOURCE).unwrap();

        let only = Selection {
            method: Some("quiet"),
            include_non_public: false,
        };
        let report = FileReport::from_source(&source, only).unwrap();
        assert_eq!(report.methods.len(), 1);
        assert!(report.methods[0].expressions.is_empty());

        let all = Selection {
            method: None,
            include_non_public: true,
        };
        let report = FileReport::from_source(&source, all).unwrap();
        let names: Vec<_> = report.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["greet", "quiet", "helper"]);
    }

    #[test]
    fn test_json_shape() {
        let source = JavaSource::from_source("Greeter.java", SOURCE).unwrap();
        let ok = FileReport::from_source(&source, Selection::default()).unwrap();
        let failed = FileReport::failed(Path::new("Broken.java"), "syntax error at 1:1");

        let json = to_json(&[ok, failed]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["files_scanned"], 2);
        assert_eq!(value["files_failed"], 1);
        assert_eq!(value["files"][0]["methods"][0]["declarations"][0]["type"], "String");
        assert_eq!(value["files"][1]["error"], "syntax error at 1:1");
        assert!(value["files"][1].get("package").is_none());
    }

    #[test]
    fn test_elide() {
        assert_eq!(elide("short"), "short");
        let long = "x".repeat(100);
        let elided = elide(&long);
        assert_eq!(elided.chars().count(), PRETTY_TEXT_WIDTH);
        assert!(elided.ends_with("..."));
    }
}
