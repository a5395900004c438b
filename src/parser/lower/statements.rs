use tree_sitter::Node;

use super::declarations::type_kind;
use super::{child_of_kind, fields, first_named, named_children, Lowerer};
use crate::ast::{
    CatchClause, ConstructorCall, ExprKind, Expression, Parameter, Span, Statement, StmtKind,
    SwitchBlock, SwitchEntry, SwitchLabel, TryStmt,
};
use crate::error::Result;

impl<'src> Lowerer<'src> {
    pub(super) fn statement(&mut self, node: Node) -> Result<Statement> {
        self.nested(|this| this.statement_kind(node))
            .map(|kind| Statement::new(kind, Span::from_node(node)))
    }

    fn boxed_statement(&mut self, node: Node, field: &str) -> Result<Box<Statement>> {
        let child = self.field(node, field)?;
        Ok(Box::new(self.statement(child)?))
    }

    fn field_expression(&mut self, node: Node, field: &str) -> Result<Expression> {
        let child = self.field(node, field)?;
        self.expression(child)
    }

    fn statement_kind(&mut self, node: Node) -> Result<StmtKind> {
        let kind = match node.kind() {
            "expression_statement" => match self.first_expression(node)? {
                Some(expr) => StmtKind::Expression(expr),
                None => StmtKind::Empty,
            },
            "local_variable_declaration" => {
                let decl = self.variable_declaration(node)?;
                let span = decl.span;
                StmtKind::Expression(Expression::new(ExprKind::VariableDeclaration(decl), span))
            }
            "if_statement" => StmtKind::If {
                condition: self.field_expression(node, "condition")?,
                then_branch: self.boxed_statement(node, "consequence")?,
                else_branch: match node.child_by_field_name("alternative") {
                    Some(alt) => Some(Box::new(self.statement(alt)?)),
                    None => None,
                },
            },
            "while_statement" => StmtKind::While {
                condition: self.field_expression(node, "condition")?,
                body: self.boxed_statement(node, "body")?,
            },
            "do_statement" => StmtKind::Do {
                body: self.boxed_statement(node, "body")?,
                condition: self.field_expression(node, "condition")?,
            },
            "for_statement" => {
                let mut init = Vec::new();
                for child in fields(node, "init") {
                    init.push(self.for_init(child)?);
                }
                let condition = match node.child_by_field_name("condition") {
                    Some(cond) => Some(self.expression(cond)?),
                    None => None,
                };
                let mut update = Vec::new();
                for child in fields(node, "update") {
                    update.push(self.expression(child)?);
                }
                StmtKind::For {
                    init,
                    condition,
                    update,
                    body: self.boxed_statement(node, "body")?,
                }
            }
            "enhanced_for_statement" => {
                let ty = self.field(node, "type").map(|t| self.compact(t))?;
                let variable = Parameter {
                    name: self.field_text(node, "name")?,
                    ty,
                    modifiers: self.modifiers(node),
                    varargs: false,
                    span: Span::from_node(node),
                };
                StmtKind::Foreach {
                    variable,
                    iterable: self.field_expression(node, "value")?,
                    body: self.boxed_statement(node, "body")?,
                }
            }
            "block" => StmtKind::Block(self.block(node)?),
            "return_statement" => StmtKind::Return(self.first_expression(node)?),
            "switch_expression" => StmtKind::Switch(self.switch_block(node)?),
            "synchronized_statement" => {
                let lock = child_of_kind(node, "parenthesized_expression")
                    .ok_or_else(|| self.missing(node, "lock"))?;
                let body = self.field(node, "body")?;
                StmtKind::Synchronized {
                    lock: self.expression(lock)?,
                    body: self.block(body)?,
                }
            }
            "try_statement" | "try_with_resources_statement" => {
                StmtKind::Try(self.try_statement(node)?)
            }
            "throw_statement" => match self.first_expression(node)? {
                Some(expr) => StmtKind::Throw(expr),
                None => return Err(self.missing(node, "expression")),
            },
            "break_statement" => StmtKind::Break(self.label(node)),
            "continue_statement" => StmtKind::Continue(self.label(node)),
            "labeled_statement" => {
                let children = named_children(node);
                let label = children
                    .first()
                    .map(|l| self.text(*l).to_string())
                    .unwrap_or_default();
                let body = children
                    .last()
                    .copied()
                    .filter(|_| children.len() > 1)
                    .ok_or_else(|| self.missing(node, "statement"))?;
                StmtKind::Labeled {
                    label,
                    body: Box::new(self.statement(body)?),
                }
            }
            "assert_statement" => {
                let children = named_children(node);
                let check = children
                    .first()
                    .copied()
                    .ok_or_else(|| self.missing(node, "condition"))?;
                let message = match children.get(1) {
                    Some(msg) => Some(self.expression(*msg)?),
                    None => None,
                };
                StmtKind::Assert {
                    check: self.expression(check)?,
                    message,
                }
            }
            "yield_statement" => match self.first_expression(node)? {
                Some(expr) => StmtKind::Yield(expr),
                None => return Err(self.missing(node, "expression")),
            },
            "explicit_constructor_invocation" => {
                StmtKind::ConstructorCall(self.constructor_call(node)?)
            }
            ";" => StmtKind::Empty,
            other => match type_kind(other) {
                Some(kind) => StmtKind::LocalClass(Box::new(self.type_declaration(node, kind)?)),
                None => {
                    tracing::debug!(kind = other, "statement form not modelled");
                    StmtKind::Other {
                        kind: other.to_string(),
                    }
                }
            },
        };
        Ok(kind)
    }

    fn label(&self, node: Node) -> Option<String> {
        child_of_kind(node, "identifier").map(|l| self.text(l).to_string())
    }

    fn for_init(&mut self, node: Node) -> Result<Expression> {
        if node.kind() == "local_variable_declaration" {
            let decl = self.variable_declaration(node)?;
            let span = decl.span;
            return Ok(Expression::new(ExprKind::VariableDeclaration(decl), span));
        }
        self.expression(node)
    }

    /// Shared by switch statements and switch expressions.
    pub(super) fn switch_block(&mut self, node: Node) -> Result<SwitchBlock> {
        let selector = self.field_expression(node, "condition")?;
        let body = self.field(node, "body")?;

        let mut entries = Vec::new();
        for group in named_children(body) {
            let arrow = match group.kind() {
                "switch_block_statement_group" => false,
                "switch_rule" => true,
                _ => continue,
            };

            let mut labels = Vec::new();
            let mut statements = Vec::new();
            for child in named_children(group) {
                if child.kind() == "switch_label" {
                    labels.push(self.switch_label(child)?);
                } else {
                    statements.push(self.statement(child)?);
                }
            }

            entries.push(SwitchEntry {
                labels,
                statements,
                arrow,
                span: Span::from_node(group),
            });
        }

        Ok(SwitchBlock { selector, entries })
    }

    fn switch_label(&mut self, node: Node) -> Result<SwitchLabel> {
        let values = named_children(node);
        if values.is_empty() {
            return Ok(SwitchLabel::Default);
        }
        let mut cases = Vec::with_capacity(values.len());
        for value in values {
            cases.push(self.expression(value)?);
        }
        Ok(SwitchLabel::Case(cases))
    }

    fn try_statement(&mut self, node: Node) -> Result<TryStmt> {
        let mut resources = Vec::new();
        if let Some(spec) = node.child_by_field_name("resources") {
            for resource in named_children(spec) {
                if resource.kind() == "resource" {
                    resources.push(self.resource(resource)?);
                }
            }
        }

        let body = self.field(node, "body")?;
        let block = self.block(body)?;

        let mut catches = Vec::new();
        let mut finally = None;
        for child in named_children(node) {
            match child.kind() {
                "catch_clause" => catches.push(self.catch_clause(child)?),
                "finally_clause" => {
                    if let Some(block) = child_of_kind(child, "block") {
                        finally = Some(self.block(block)?);
                    }
                }
                _ => {}
            }
        }

        Ok(TryStmt {
            resources,
            block,
            catches,
            finally,
        })
    }

    /// `Type name = value` becomes a declaration; `name` or `a.b` stays an expression.
    fn resource(&mut self, node: Node) -> Result<Expression> {
        let span = Span::from_node(node);
        match node.child_by_field_name("type") {
            Some(ty) => {
                let base = self.compact(ty);
                let declarator = self.declarator(node, &base)?;
                let decl = crate::ast::VariableDeclarationExpr {
                    modifiers: self.modifiers(node),
                    variables: vec![declarator],
                    span,
                };
                Ok(Expression::new(ExprKind::VariableDeclaration(decl), span))
            }
            None => match first_named(node) {
                Some(expr) => self.expression(expr),
                None => Err(self.missing(node, "resource")),
            },
        }
    }

    fn catch_clause(&mut self, node: Node) -> Result<CatchClause> {
        let param = child_of_kind(node, "catch_formal_parameter")
            .ok_or_else(|| self.missing(node, "parameter"))?;

        let ty = child_of_kind(param, "catch_type")
            .map(|types| {
                named_children(types)
                    .into_iter()
                    .map(|t| self.compact(t))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .unwrap_or_default();

        let parameter = Parameter {
            name: self.field_text(param, "name")?,
            ty,
            modifiers: self.modifiers(param),
            varargs: false,
            span: Span::from_node(param),
        };

        let body = self.field(node, "body")?;
        Ok(CatchClause {
            parameter,
            body: self.block(body)?,
            span: Span::from_node(node),
        })
    }

    fn constructor_call(&mut self, node: Node) -> Result<ConstructorCall> {
        let target = self.field_text(node, "constructor")?;
        let qualifier = match node.child_by_field_name("object") {
            Some(object) => Some(self.expression(object)?),
            None => None,
        };
        Ok(ConstructorCall {
            target,
            qualifier,
            arguments: self.arguments(node)?,
        })
    }
}
