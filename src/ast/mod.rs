//! Typed Java syntax tree.
//!
//! The tree is lowered once from the tree-sitter CST by [`crate::parser`]
//! and never mutated afterwards. Every node carries a [`Span`]; source text
//! is recovered through [`CompilationUnit::snippet`].
//!
//! Analysis results borrow from this tree (`Vec<&'ast Expression>` and
//! friends) rather than copying nodes out of it.

mod decl;
mod expr;
mod span;
mod stmt;

pub use decl::{
    ClassBody, ClassMember, CompilationUnit, EnumConstant, ImportDeclaration, Member,
    MethodDeclaration, Modifier, Modifiers, PackageDeclaration, Parameter, TypeDeclaration,
    TypeKind,
};
pub use expr::{
    AssignExpr, ExprKind, Expression, LambdaBody, MethodCallExpr, ObjectCreationExpr,
    VariableDeclarationExpr, VariableDeclarator,
};
pub use span::{Position, Span};
pub use stmt::{
    Block, CatchClause, ConstructorCall, Statement, StmtKind, SwitchBlock, SwitchEntry,
    SwitchLabel, TryStmt,
};
