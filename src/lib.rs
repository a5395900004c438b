//! flatjava - statement-level analysis of Java method bodies.
//!
//! Parses a Java file, picks out its package and public class, and for any
//! method produces:
//!
//! - the ordered expressions that appear directly as statement bodies or
//!   return values, with control structure flattened away
//! - the local variable declarators among them
//! - every method call in the body, innermost first
//!
//! It can also emit a minimal class with a generated `main` method.
//!
//! ```
//! use flatjava::JavaSource;
//!
//! let source = JavaSource::from_source(
//!     "Main.java",
//!     "package demo; public class Main { void run() { int a = 1; if (a > 0) { go(a); } } }",
//! )?;
//! let run = source.public_method("run").unwrap();
//!
//! let exprs = source.method_expressions(run)?;
//! assert_eq!(exprs.len(), 2);
//! assert_eq!(source.variable_declarations(run)?[0].name, "a");
//! assert_eq!(source.method_calls(run)?[0].name(), "go");
//! # Ok::<(), flatjava::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `parser`: tree-sitter driver and lowering into the typed tree
//! - `ast`: owned, immutable Java syntax tree with spans
//! - `analysis`: flattener, declaration extractor, visitor-based collectors
//! - `source`: `JavaSource` query facade over one file
//! - `codegen`: class builder and Java source writer
//! - `config`, `report`, `cli`: the `flatjava` binary

pub mod analysis;
pub mod ast;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
mod logging;
pub mod parser;
pub mod report;
pub mod source;

pub use analysis::{
    collect_assignments, collect_calls, flatten_method, flatten_statement, variable_declarations,
    StatementFlattener, Visitor, Walkable,
};
pub use codegen::{ClassBuilder, JavaFile, MethodSpec};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use parser::JavaParser;
pub use source::JavaSource;
