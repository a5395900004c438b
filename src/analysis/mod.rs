//! Read-only analyses over the typed AST.
//!
//! - `flatten`: method body to the ordered list of statement-level expressions
//! - `declarations`: local variable declarators among those expressions
//! - `calls` / `assignments`: every call or assignment in a subtree
//! - `nodes`: every statement or expression in a subtree
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ CompilationUnit │────▶│ flattener        │────▶│ Vec<&Expression> │
//! └─────────────────┘     └──────────────────┘     └──────────────────┘
//!          │                                                │
//!          ▼                                                ▼
//! ┌─────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ Visitor / walk_*│────▶│ Call / Assignment│     │ variable         │
//! │                 │     │ collectors       │     │ declarators      │
//! └─────────────────┘     └──────────────────┘     └──────────────────┘
//! ```
//!
//! All passes return fresh vectors of references into the tree and share
//! no state, so they may run concurrently over the same unit. Each pass
//! carries a [`DepthBudget`] and fails with
//! [`Error::DepthExceeded`](crate::Error::DepthExceeded) on pathological
//! nesting instead of exhausting the stack.

mod assignments;
mod calls;
mod declarations;
mod depth;
mod flatten;
mod nodes;
mod visit;

pub use assignments::{collect_assignments, AssignmentCollector};
pub use calls::{collect_calls, CallCollector};
pub use declarations::{declarators, variable_declarations, variable_declarations_with};
pub use depth::{DepthBudget, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use flatten::{flatten_method, flatten_statement, StatementFlattener};
pub use nodes::{all_expressions, all_statements};
pub use visit::{
    walk_assign, walk_block, walk_class_body, walk_expr, walk_method, walk_method_call,
    walk_stmt, walk_switch, walk_type, walk_unit, walk_variable_declaration, Visitor, Walkable,
};
