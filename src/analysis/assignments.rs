//! Assignment collection.

use super::visit::{walk_assign, Visitor, Walkable};
use super::{DepthBudget, DEFAULT_MAX_DEPTH};
use crate::ast::AssignExpr;
use crate::error::Result;

/// Every assignment under `node`, including compound ones (`+=`),
/// post-order like [`collect_calls`](super::collect_calls): in
/// `a = b = 1` the inner `b = 1` comes first.
pub fn collect_assignments<W: Walkable + ?Sized>(node: &W) -> Result<Vec<&AssignExpr>> {
    AssignmentCollector::new(DEFAULT_MAX_DEPTH).collect(node)
}

pub struct AssignmentCollector<'ast> {
    budget: DepthBudget,
    assignments: Vec<&'ast AssignExpr>,
}

impl<'ast> AssignmentCollector<'ast> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            budget: DepthBudget::new(max_depth),
            assignments: Vec::new(),
        }
    }

    pub fn collect<W: Walkable + ?Sized>(mut self, node: &'ast W) -> Result<Vec<&'ast AssignExpr>> {
        node.accept(&mut self)?;
        Ok(self.assignments)
    }
}

impl<'ast> Visitor<'ast> for AssignmentCollector<'ast> {
    fn budget(&mut self) -> &mut DepthBudget {
        &mut self.budget
    }

    fn visit_assign(&mut self, assign: &'ast AssignExpr) -> Result<()> {
        walk_assign(self, assign)?;
        tracing::trace!(
            target_kind = assign.target.kind_name(),
            operator = %assign.operator,
            "assignment"
        );
        self.assignments.push(assign);
        Ok(())
    }
}
