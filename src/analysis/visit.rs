//! Read-only traversal over the typed AST.
//!
//! Implement [`Visitor`] for a pass, overriding only the `visit_*` methods
//! for the nodes it cares about. Call the matching `walk_*` function from an
//! override to keep descending; returning without it prunes the subtree.
//!
//! ```
//! use flatjava::analysis::{walk_expr, DepthBudget, Visitor};
//! use flatjava::ast::{ExprKind, Expression};
//! use flatjava::Result;
//!
//! #[derive(Default)]
//! struct Literals<'ast> {
//!     budget: DepthBudget,
//!     found: Vec<&'ast str>,
//! }
//!
//! impl<'ast> Visitor<'ast> for Literals<'ast> {
//!     fn budget(&mut self) -> &mut DepthBudget {
//!         &mut self.budget
//!     }
//!
//!     fn visit_expr(&mut self, expr: &'ast Expression) -> Result<()> {
//!         if let ExprKind::Literal(text) = &expr.kind {
//!             self.found.push(text);
//!         }
//!         walk_expr(self, expr)
//!     }
//! }
//! ```
//!
//! Every statement and expression level counts against the visitor's
//! [`DepthBudget`]; exceeding it aborts the walk with
//! [`Error::DepthExceeded`](crate::Error::DepthExceeded).

use super::DepthBudget;
use crate::ast::{
    AssignExpr, Block, ClassBody, CompilationUnit, ExprKind, Expression, LambdaBody, Member,
    MethodCallExpr, MethodDeclaration, Statement, StmtKind, SwitchBlock, SwitchLabel,
    TypeDeclaration, VariableDeclarationExpr,
};
use crate::error::Result;

pub trait Visitor<'ast>: Sized {
    /// Depth accounting for this traversal.
    fn budget(&mut self) -> &mut DepthBudget;

    fn visit_unit(&mut self, unit: &'ast CompilationUnit) -> Result<()> {
        walk_unit(self, unit)
    }

    fn visit_type(&mut self, ty: &'ast TypeDeclaration) -> Result<()> {
        walk_type(self, ty)
    }

    fn visit_class_body(&mut self, body: &'ast ClassBody) -> Result<()> {
        walk_class_body(self, body)
    }

    fn visit_method(&mut self, method: &'ast MethodDeclaration) -> Result<()> {
        walk_method(self, method)
    }

    fn visit_block(&mut self, block: &'ast Block) -> Result<()> {
        walk_block(self, block)
    }

    fn visit_stmt(&mut self, stmt: &'ast Statement) -> Result<()> {
        walk_stmt(self, stmt)
    }

    fn visit_switch(&mut self, switch: &'ast SwitchBlock) -> Result<()> {
        walk_switch(self, switch)
    }

    fn visit_expr(&mut self, expr: &'ast Expression) -> Result<()> {
        walk_expr(self, expr)
    }

    fn visit_method_call(&mut self, call: &'ast MethodCallExpr) -> Result<()> {
        walk_method_call(self, call)
    }

    fn visit_assign(&mut self, assign: &'ast AssignExpr) -> Result<()> {
        walk_assign(self, assign)
    }

    fn visit_variable_declaration(&mut self, decl: &'ast VariableDeclarationExpr) -> Result<()> {
        walk_variable_declaration(self, decl)
    }
}

/// A node a [`Visitor`] can start from.
pub trait Walkable {
    fn accept<'ast, V: Visitor<'ast>>(&'ast self, visitor: &mut V) -> Result<()>;
}

impl Walkable for CompilationUnit {
    fn accept<'ast, V: Visitor<'ast>>(&'ast self, visitor: &mut V) -> Result<()> {
        visitor.visit_unit(self)
    }
}

impl Walkable for TypeDeclaration {
    fn accept<'ast, V: Visitor<'ast>>(&'ast self, visitor: &mut V) -> Result<()> {
        visitor.visit_type(self)
    }
}

impl Walkable for ClassBody {
    fn accept<'ast, V: Visitor<'ast>>(&'ast self, visitor: &mut V) -> Result<()> {
        visitor.visit_class_body(self)
    }
}

impl Walkable for MethodDeclaration {
    fn accept<'ast, V: Visitor<'ast>>(&'ast self, visitor: &mut V) -> Result<()> {
        visitor.visit_method(self)
    }
}

impl Walkable for Block {
    fn accept<'ast, V: Visitor<'ast>>(&'ast self, visitor: &mut V) -> Result<()> {
        visitor.visit_block(self)
    }
}

impl Walkable for Statement {
    fn accept<'ast, V: Visitor<'ast>>(&'ast self, visitor: &mut V) -> Result<()> {
        visitor.visit_stmt(self)
    }
}

impl Walkable for Expression {
    fn accept<'ast, V: Visitor<'ast>>(&'ast self, visitor: &mut V) -> Result<()> {
        visitor.visit_expr(self)
    }
}

// ============================================================================
// Walk functions
// ============================================================================

pub fn walk_unit<'ast, V: Visitor<'ast>>(visitor: &mut V, unit: &'ast CompilationUnit) -> Result<()> {
    for ty in &unit.types {
        visitor.visit_type(ty)?;
    }
    Ok(())
}

pub fn walk_type<'ast, V: Visitor<'ast>>(visitor: &mut V, ty: &'ast TypeDeclaration) -> Result<()> {
    visitor.visit_class_body(&ty.body)
}

/// Members are walked in declaration order.
pub fn walk_class_body<'ast, V: Visitor<'ast>>(visitor: &mut V, body: &'ast ClassBody) -> Result<()> {
    for member in body.members() {
        match member {
            Member::EnumConstant(constant) => {
                for arg in &constant.arguments {
                    visitor.visit_expr(arg)?;
                }
                if let Some(body) = &constant.body {
                    visitor.visit_class_body(body)?;
                }
            }
            Member::Field(field) => visitor.visit_variable_declaration(field)?,
            Member::Initializer(init) => visitor.visit_block(init)?,
            Member::Constructor(method) | Member::Method(method) => visitor.visit_method(method)?,
            Member::Type(ty) => visitor.visit_type(ty)?,
        }
    }
    Ok(())
}

pub fn walk_method<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    method: &'ast MethodDeclaration,
) -> Result<()> {
    match &method.body {
        Some(body) => visitor.visit_block(body),
        None => Ok(()),
    }
}

pub fn walk_block<'ast, V: Visitor<'ast>>(visitor: &mut V, block: &'ast Block) -> Result<()> {
    for stmt in &block.statements {
        visitor.visit_stmt(stmt)?;
    }
    Ok(())
}

pub fn walk_stmt<'ast, V: Visitor<'ast>>(visitor: &mut V, stmt: &'ast Statement) -> Result<()> {
    visitor.budget().enter()?;
    let result = walk_stmt_kind(visitor, &stmt.kind);
    visitor.budget().exit();
    result
}

fn walk_stmt_kind<'ast, V: Visitor<'ast>>(visitor: &mut V, kind: &'ast StmtKind) -> Result<()> {
    match kind {
        StmtKind::Expression(expr) | StmtKind::Throw(expr) | StmtKind::Yield(expr) => {
            visitor.visit_expr(expr)
        }
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition)?;
            visitor.visit_stmt(then_branch)?;
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch)?;
            }
            Ok(())
        }
        StmtKind::Foreach { iterable, body, .. } => {
            visitor.visit_expr(iterable)?;
            visitor.visit_stmt(body)
        }
        StmtKind::For {
            init,
            condition,
            update,
            body,
        } => {
            for expr in init {
                visitor.visit_expr(expr)?;
            }
            if let Some(condition) = condition {
                visitor.visit_expr(condition)?;
            }
            for expr in update {
                visitor.visit_expr(expr)?;
            }
            visitor.visit_stmt(body)
        }
        StmtKind::Block(block) => visitor.visit_block(block),
        StmtKind::Do { body, condition } => {
            visitor.visit_stmt(body)?;
            visitor.visit_expr(condition)
        }
        StmtKind::While { condition, body } => {
            visitor.visit_expr(condition)?;
            visitor.visit_stmt(body)
        }
        StmtKind::Return(value) => match value {
            Some(value) => visitor.visit_expr(value),
            None => Ok(()),
        },
        StmtKind::Switch(switch) => visitor.visit_switch(switch),
        StmtKind::Synchronized { lock, body } => {
            visitor.visit_expr(lock)?;
            visitor.visit_block(body)
        }
        StmtKind::Try(try_stmt) => {
            for resource in &try_stmt.resources {
                visitor.visit_expr(resource)?;
            }
            visitor.visit_block(&try_stmt.block)?;
            for catch in &try_stmt.catches {
                visitor.visit_block(&catch.body)?;
            }
            if let Some(finally) = &try_stmt.finally {
                visitor.visit_block(finally)?;
            }
            Ok(())
        }
        StmtKind::Labeled { body, .. } => visitor.visit_stmt(body),
        StmtKind::Assert { check, message } => {
            visitor.visit_expr(check)?;
            if let Some(message) = message {
                visitor.visit_expr(message)?;
            }
            Ok(())
        }
        StmtKind::LocalClass(ty) => visitor.visit_type(ty),
        StmtKind::ConstructorCall(call) => {
            if let Some(qualifier) = &call.qualifier {
                visitor.visit_expr(qualifier)?;
            }
            for arg in &call.arguments {
                visitor.visit_expr(arg)?;
            }
            Ok(())
        }
        StmtKind::Break(_) | StmtKind::Continue(_) | StmtKind::Empty | StmtKind::Other { .. } => {
            Ok(())
        }
    }
}

pub fn walk_switch<'ast, V: Visitor<'ast>>(visitor: &mut V, switch: &'ast SwitchBlock) -> Result<()> {
    visitor.visit_expr(&switch.selector)?;
    for entry in &switch.entries {
        for label in &entry.labels {
            if let SwitchLabel::Case(values) = label {
                for value in values {
                    visitor.visit_expr(value)?;
                }
            }
        }
        for stmt in &entry.statements {
            visitor.visit_stmt(stmt)?;
        }
    }
    Ok(())
}

pub fn walk_expr<'ast, V: Visitor<'ast>>(visitor: &mut V, expr: &'ast Expression) -> Result<()> {
    visitor.budget().enter()?;
    let result = walk_expr_kind(visitor, &expr.kind);
    visitor.budget().exit();
    result
}

fn walk_expr_kind<'ast, V: Visitor<'ast>>(visitor: &mut V, kind: &'ast ExprKind) -> Result<()> {
    match kind {
        ExprKind::VariableDeclaration(decl) => visitor.visit_variable_declaration(decl),
        ExprKind::MethodCall(call) => visitor.visit_method_call(call),
        ExprKind::Assign(assign) => visitor.visit_assign(assign),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left)?;
            visitor.visit_expr(right)
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::FieldAccess { scope, .. } => visitor.visit_expr(scope),
        ExprKind::ArrayAccess { array, index } => {
            visitor.visit_expr(array)?;
            visitor.visit_expr(index)
        }
        ExprKind::ObjectCreation(creation) => {
            if let Some(scope) = &creation.scope {
                visitor.visit_expr(scope)?;
            }
            for arg in &creation.arguments {
                visitor.visit_expr(arg)?;
            }
            if let Some(body) = &creation.body {
                visitor.visit_class_body(body)?;
            }
            Ok(())
        }
        ExprKind::ArrayCreation {
            dimensions,
            initializer,
            ..
        } => {
            for dim in dimensions {
                visitor.visit_expr(dim)?;
            }
            if let Some(init) = initializer {
                visitor.visit_expr(init)?;
            }
            Ok(())
        }
        ExprKind::ArrayInitializer(elements) => {
            for element in elements {
                visitor.visit_expr(element)?;
            }
            Ok(())
        }
        ExprKind::Cast { value, .. } => visitor.visit_expr(value),
        ExprKind::Conditional {
            condition,
            then_expr,
            else_expr,
        } => {
            visitor.visit_expr(condition)?;
            visitor.visit_expr(then_expr)?;
            visitor.visit_expr(else_expr)
        }
        ExprKind::InstanceOf { value, .. } => visitor.visit_expr(value),
        ExprKind::Lambda { body, .. } => match body {
            LambdaBody::Expression(expr) => visitor.visit_expr(expr),
            LambdaBody::Block(block) => visitor.visit_block(block),
        },
        ExprKind::MethodReference { scope, .. } => visitor.visit_expr(scope),
        ExprKind::Switch(switch) => visitor.visit_switch(switch),
        ExprKind::Enclosed(inner) => visitor.visit_expr(inner),
        ExprKind::Other { children, .. } => {
            for child in children {
                visitor.visit_expr(child)?;
            }
            Ok(())
        }
        ExprKind::Name(_)
        | ExprKind::Literal(_)
        | ExprKind::This
        | ExprKind::Super
        | ExprKind::ClassLiteral(_) => Ok(()),
    }
}

/// Scope first, then arguments in order.
pub fn walk_method_call<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    call: &'ast MethodCallExpr,
) -> Result<()> {
    if let Some(scope) = call.scope() {
        visitor.visit_expr(scope)?;
    }
    for arg in call.arguments() {
        visitor.visit_expr(arg)?;
    }
    Ok(())
}

pub fn walk_assign<'ast, V: Visitor<'ast>>(visitor: &mut V, assign: &'ast AssignExpr) -> Result<()> {
    visitor.visit_expr(&assign.target)?;
    visitor.visit_expr(&assign.value)
}

pub fn walk_variable_declaration<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    decl: &'ast VariableDeclarationExpr,
) -> Result<()> {
    for var in &decl.variables {
        if let Some(init) = &var.initializer {
            visitor.visit_expr(init)?;
        }
    }
    Ok(())
}
