//! Rendering and writing generated compilation units.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::method::{CodeLine, MethodSpec};
use crate::ast::Modifier;
use crate::error::Result;

const INDENT: &str = "  ";

/// A generated compilation unit holding one public class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    pub package: String,
    pub class_name: String,
    pub methods: Vec<MethodSpec>,
}

impl JavaFile {
    /// Path relative to a source root: `com/example/Main.java`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.package.split('.').filter(|s| !s.is_empty()).collect();
        path.push(format!("{}.java", self.class_name));
        path
    }

    /// Java source text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.package.is_empty() {
            let _ = writeln!(out, "package {};\n", self.package);
        }
        let _ = writeln!(out, "public class {} {{", self.class_name);
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            render_method(&mut out, method);
        }
        out.push_str("}\n");
        out
    }

    /// Write under `dir`, creating package directories as needed.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.render())?;
        tracing::debug!(path = %path.display(), "wrote generated class");
        Ok(path)
    }
}

fn render_method(out: &mut String, method: &MethodSpec) {
    let modifiers: Vec<&str> = method.modifiers.iter().map(Modifier::as_str).collect();
    let params: Vec<String> = method
        .parameters
        .iter()
        .map(|(ty, name)| format!("{} {}", ty, name))
        .collect();

    out.push_str(INDENT);
    for modifier in modifiers {
        out.push_str(modifier);
        out.push(' ');
    }
    let _ = writeln!(
        out,
        "{} {}({}) {{",
        method.return_type,
        method.name,
        params.join(", ")
    );

    for line in &method.body {
        match line {
            CodeLine::Statement(stmt) => {
                let _ = writeln!(out, "{INDENT}{INDENT}{};", stmt);
            }
            CodeLine::Raw(code) => {
                for raw in code.trim_end().lines() {
                    if raw.trim().is_empty() {
                        out.push('\n');
                    } else {
                        let _ = writeln!(out, "{INDENT}{INDENT}{}", raw);
                    }
                }
            }
        }
    }
    let _ = writeln!(out, "{INDENT}}}");
}
