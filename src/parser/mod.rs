//! Java parsing.
//!
//! [`JavaParser`] runs tree-sitter over the source, rejects input containing
//! `ERROR` or `MISSING` nodes, and lowers the concrete tree into
//! [`crate::ast`] while enforcing the nesting depth limit.

mod java;
mod lower;

pub use java::JavaParser;
