//! Expressions.

use super::{Block, ClassBody, Span, SwitchBlock};

#[derive(Debug, Clone)]
pub struct Expression {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn as_method_call(&self) -> Option<&MethodCallExpr> {
        match &self.kind {
            ExprKind::MethodCall(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_variable_declaration(&self) -> Option<&VariableDeclarationExpr> {
        match &self.kind {
            ExprKind::VariableDeclaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_assign(&self) -> Option<&AssignExpr> {
        match &self.kind {
            ExprKind::Assign(assign) => Some(assign),
            _ => None,
        }
    }

    pub fn is_method_call(&self) -> bool {
        matches!(self.kind, ExprKind::MethodCall(_))
    }

    pub fn is_variable_declaration(&self) -> bool {
        matches!(self.kind, ExprKind::VariableDeclaration(_))
    }

    /// Short lowercase name of the expression kind, for diagnostics.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            ExprKind::VariableDeclaration(_) => "variable_declaration",
            ExprKind::MethodCall(_) => "method_call",
            ExprKind::Assign(_) => "assign",
            ExprKind::Binary { .. } => "binary",
            ExprKind::Unary { .. } => "unary",
            ExprKind::Name(_) => "name",
            ExprKind::Literal(_) => "literal",
            ExprKind::FieldAccess { .. } => "field_access",
            ExprKind::ArrayAccess { .. } => "array_access",
            ExprKind::ObjectCreation(_) => "object_creation",
            ExprKind::ArrayCreation { .. } => "array_creation",
            ExprKind::ArrayInitializer(_) => "array_initializer",
            ExprKind::Cast { .. } => "cast",
            ExprKind::Conditional { .. } => "conditional",
            ExprKind::InstanceOf { .. } => "instanceof",
            ExprKind::Lambda { .. } => "lambda",
            ExprKind::MethodReference { .. } => "method_reference",
            ExprKind::Switch(_) => "switch",
            ExprKind::Enclosed(_) => "enclosed",
            ExprKind::This => "this",
            ExprKind::Super => "super",
            ExprKind::ClassLiteral(_) => "class_literal",
            ExprKind::Other { kind, .. } => kind,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    VariableDeclaration(VariableDeclarationExpr),
    MethodCall(MethodCallExpr),
    Assign(AssignExpr),
    Binary {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    /// Prefix and postfix unary operators, including `++`/`--`.
    Unary {
        operator: String,
        operand: Box<Expression>,
        postfix: bool,
    },
    Name(String),
    /// Literal source text, e.g. `42`, `"hi"`, `null`.
    Literal(String),
    FieldAccess {
        scope: Box<Expression>,
        field: String,
    },
    ArrayAccess {
        array: Box<Expression>,
        index: Box<Expression>,
    },
    ObjectCreation(ObjectCreationExpr),
    ArrayCreation {
        ty: String,
        dimensions: Vec<Expression>,
        initializer: Option<Box<Expression>>,
    },
    ArrayInitializer(Vec<Expression>),
    Cast {
        ty: String,
        value: Box<Expression>,
    },
    /// `condition ? then_expr : else_expr`
    Conditional {
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
    },
    InstanceOf {
        value: Box<Expression>,
        ty: String,
        binding: Option<String>,
    },
    Lambda {
        parameters: Vec<String>,
        body: LambdaBody,
    },
    /// `scope::name`
    MethodReference {
        scope: Box<Expression>,
        name: String,
    },
    Switch(Box<SwitchBlock>),
    /// `( inner )`
    Enclosed(Box<Expression>),
    This,
    Super,
    ClassLiteral(String),
    /// Any other expression form, with its lowered children.
    Other {
        kind: String,
        children: Vec<Expression>,
    },
}

/// `T a = x, b[];`
#[derive(Debug, Clone)]
pub struct VariableDeclarationExpr {
    pub modifiers: super::Modifiers,
    pub variables: Vec<VariableDeclarator>,
    pub span: Span,
}

/// One name+type binding of a declaration.
#[derive(Debug, Clone)]
pub struct VariableDeclarator {
    pub name: String,
    /// Declared type, including dimensions written after the name.
    pub ty: String,
    pub initializer: Option<Expression>,
    pub span: Span,
}

/// `scope.<T>name(arguments)`
#[derive(Debug, Clone)]
pub struct MethodCallExpr {
    pub scope: Option<Box<Expression>>,
    pub type_arguments: Vec<String>,
    pub name: String,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

impl MethodCallExpr {
    /// Receiver expression; `None` for unqualified calls.
    pub fn scope(&self) -> Option<&Expression> {
        self.scope.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }
}

/// `target op= value`
#[derive(Debug, Clone)]
pub struct AssignExpr {
    pub target: Box<Expression>,
    pub operator: String,
    pub value: Box<Expression>,
    pub span: Span,
}

/// `[scope.]new T(arguments) [{ body }]`
#[derive(Debug, Clone)]
pub struct ObjectCreationExpr {
    pub scope: Option<Box<Expression>>,
    pub ty: String,
    pub arguments: Vec<Expression>,
    /// Anonymous class body.
    pub body: Option<ClassBody>,
}

#[derive(Debug, Clone)]
pub enum LambdaBody {
    Expression(Box<Expression>),
    Block(Block),
}
