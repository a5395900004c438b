use tree_sitter::Node;

use super::{child_of_kind, fields, first_named, named_children, Lowerer};
use crate::ast::{
    AssignExpr, ExprKind, Expression, LambdaBody, MethodCallExpr, ObjectCreationExpr, Span,
};
use crate::error::Result;

const LITERAL_KINDS: &[&str] = &[
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "decimal_floating_point_literal",
    "hex_floating_point_literal",
    "character_literal",
    "string_literal",
    "text_block",
    "true",
    "false",
    "null_literal",
];

impl<'src> Lowerer<'src> {
    pub(super) fn expression(&mut self, node: Node) -> Result<Expression> {
        self.nested(|this| this.expression_kind(node))
            .map(|kind| Expression::new(kind, Span::from_node(node)))
    }

    fn boxed(&mut self, node: Node, field: &str) -> Result<Box<Expression>> {
        let child = self.field(node, field)?;
        Ok(Box::new(self.expression(child)?))
    }

    /// Lower the `arguments` field of a call-like node; empty when absent.
    pub(super) fn arguments(&mut self, node: Node) -> Result<Vec<Expression>> {
        let Some(list) = node.child_by_field_name("arguments") else {
            return Ok(Vec::new());
        };
        let mut arguments = Vec::new();
        for arg in named_children(list) {
            arguments.push(self.expression(arg)?);
        }
        Ok(arguments)
    }

    fn expression_kind(&mut self, node: Node) -> Result<ExprKind> {
        let kind = match node.kind() {
            "identifier" => ExprKind::Name(self.text(node).to_string()),
            "this" => ExprKind::This,
            "super" => ExprKind::Super,
            kind if LITERAL_KINDS.contains(&kind) => ExprKind::Literal(self.text(node).to_string()),
            "method_invocation" => ExprKind::MethodCall(self.method_call(node)?),
            "assignment_expression" => {
                let operator = self.field_text(node, "operator")?;
                ExprKind::Assign(AssignExpr {
                    target: self.boxed(node, "left")?,
                    operator,
                    value: self.boxed(node, "right")?,
                    span: Span::from_node(node),
                })
            }
            "binary_expression" => {
                let operator = self.field_text(node, "operator")?;
                ExprKind::Binary {
                    left: self.boxed(node, "left")?,
                    operator,
                    right: self.boxed(node, "right")?,
                }
            }
            "unary_expression" => {
                let operator = self.field_text(node, "operator")?;
                ExprKind::Unary {
                    operator,
                    operand: self.boxed(node, "operand")?,
                    postfix: false,
                }
            }
            "update_expression" => self.update(node)?,
            "parenthesized_expression" => match first_named(node) {
                Some(inner) => ExprKind::Enclosed(Box::new(self.expression(inner)?)),
                None => return Err(self.missing(node, "expression")),
            },
            "field_access" => {
                let field = self.field_text(node, "field")?;
                ExprKind::FieldAccess {
                    scope: self.boxed(node, "object")?,
                    field,
                }
            }
            "array_access" => ExprKind::ArrayAccess {
                array: self.boxed(node, "array")?,
                index: self.boxed(node, "index")?,
            },
            "object_creation_expression" => ExprKind::ObjectCreation(self.object_creation(node)?),
            "array_creation_expression" => self.array_creation(node)?,
            "array_initializer" => {
                let mut elements = Vec::new();
                for element in named_children(node) {
                    elements.push(self.expression(element)?);
                }
                ExprKind::ArrayInitializer(elements)
            }
            "cast_expression" => {
                let ty = fields(node, "type")
                    .into_iter()
                    .map(|t| self.compact(t))
                    .collect::<Vec<_>>()
                    .join(" & ");
                ExprKind::Cast {
                    ty,
                    value: self.boxed(node, "value")?,
                }
            }
            "ternary_expression" => ExprKind::Conditional {
                condition: self.boxed(node, "condition")?,
                then_expr: self.boxed(node, "consequence")?,
                else_expr: self.boxed(node, "alternative")?,
            },
            "instanceof_expression" => {
                let ty = node
                    .child_by_field_name("right")
                    .or_else(|| node.child_by_field_name("pattern"))
                    .map(|t| self.compact(t))
                    .unwrap_or_default();
                let binding = node
                    .child_by_field_name("name")
                    .map(|n| self.text(n).to_string());
                ExprKind::InstanceOf {
                    value: self.boxed(node, "left")?,
                    ty,
                    binding,
                }
            }
            "lambda_expression" => self.lambda(node)?,
            "method_reference" => {
                let children = named_children(node);
                let scope = children
                    .first()
                    .copied()
                    .ok_or_else(|| self.missing(node, "scope"))?;
                // The member is either an identifier or the `new` keyword.
                let mut cursor = node.walk();
                let name = node
                    .children(&mut cursor)
                    .last()
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_default();
                ExprKind::MethodReference {
                    scope: Box::new(self.expression(scope)?),
                    name,
                }
            }
            "switch_expression" => ExprKind::Switch(Box::new(self.switch_block(node)?)),
            "class_literal" => {
                let ty = first_named(node)
                    .map(|t| self.compact(t))
                    .unwrap_or_default();
                ExprKind::ClassLiteral(ty)
            }
            other => {
                let mut children = Vec::new();
                for child in named_children(node) {
                    children.push(self.expression(child)?);
                }
                ExprKind::Other {
                    kind: other.to_string(),
                    children,
                }
            }
        };
        Ok(kind)
    }

    fn method_call(&mut self, node: Node) -> Result<MethodCallExpr> {
        let scope = match node.child_by_field_name("object") {
            Some(object) => Some(Box::new(self.expression(object)?)),
            None => None,
        };
        let type_arguments: Vec<String> = node
            .child_by_field_name("type_arguments")
            .map(|args| {
                named_children(args)
                    .into_iter()
                    .map(|t| self.compact(t))
                    .collect()
            })
            .unwrap_or_default();
        let name = self.field_text(node, "name")?;
        let arguments = self.arguments(node)?;

        Ok(MethodCallExpr {
            scope,
            type_arguments,
            name,
            arguments,
            span: Span::from_node(node),
        })
    }

    /// `x++`, `--x`
    fn update(&mut self, node: Node) -> Result<ExprKind> {
        let operand = first_named(node).ok_or_else(|| self.missing(node, "operand"))?;
        let postfix = node.child(0).map_or(false, |first| first.is_named());

        let mut cursor = node.walk();
        let operator = node
            .children(&mut cursor)
            .find(|c| !c.is_named())
            .map(|c| self.text(c).to_string())
            .unwrap_or_default();

        Ok(ExprKind::Unary {
            operator,
            operand: Box::new(self.expression(operand)?),
            postfix,
        })
    }

    fn object_creation(&mut self, node: Node) -> Result<ObjectCreationExpr> {
        // `outer.new Inner()` puts the qualifying expression before `new`.
        let mut qualifier = None;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "new" {
                break;
            }
            if child.is_named() && !super::is_comment(child) {
                qualifier = Some(child);
            }
        }

        let scope = match qualifier {
            Some(q) => Some(Box::new(self.expression(q)?)),
            None => None,
        };
        let ty = self.field(node, "type").map(|t| self.compact(t))?;
        let arguments = self.arguments(node)?;
        let body = match child_of_kind(node, "class_body") {
            Some(body) => Some(self.class_body(body)?),
            None => None,
        };

        Ok(ObjectCreationExpr {
            scope,
            ty,
            arguments,
            body,
        })
    }

    fn array_creation(&mut self, node: Node) -> Result<ExprKind> {
        let ty = self.field(node, "type").map(|t| self.compact(t))?;

        let mut dimensions = Vec::new();
        for dims in named_children(node) {
            if dims.kind() == "dimensions_expr" {
                if let Some(size) = first_named(dims) {
                    dimensions.push(self.expression(size)?);
                }
            }
        }

        let initializer = match node.child_by_field_name("value") {
            Some(init) => Some(Box::new(self.expression(init)?)),
            None => None,
        };

        Ok(ExprKind::ArrayCreation {
            ty,
            dimensions,
            initializer,
        })
    }

    fn lambda(&mut self, node: Node) -> Result<ExprKind> {
        let params = self.field(node, "parameters")?;
        let parameters = match params.kind() {
            "identifier" => vec![self.text(params).to_string()],
            "formal_parameters" => self
                .parameters(params)
                .into_iter()
                .map(|p| p.name)
                .collect(),
            _ => named_children(params)
                .into_iter()
                .map(|p| self.text(p).to_string())
                .collect(),
        };

        let body = self.field(node, "body")?;
        let body = if body.kind() == "block" {
            LambdaBody::Block(self.block(body)?)
        } else {
            LambdaBody::Expression(Box::new(self.expression(body)?))
        };

        Ok(ExprKind::Lambda { parameters, body })
    }
}
