//! Statements.

use super::{Expression, Parameter, Span, TypeDeclaration};

/// `{ ... }`
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Statement {
    pub kind: StmtKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Short lowercase name of the statement kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            StmtKind::Expression(_) => "expression",
            StmtKind::If { .. } => "if",
            StmtKind::Foreach { .. } => "foreach",
            StmtKind::For { .. } => "for",
            StmtKind::Block(_) => "block",
            StmtKind::Do { .. } => "do",
            StmtKind::While { .. } => "while",
            StmtKind::Return(_) => "return",
            StmtKind::Switch(_) => "switch",
            StmtKind::Synchronized { .. } => "synchronized",
            StmtKind::Try(_) => "try",
            StmtKind::Throw(_) => "throw",
            StmtKind::Break(_) => "break",
            StmtKind::Continue(_) => "continue",
            StmtKind::Labeled { .. } => "labeled",
            StmtKind::Assert { .. } => "assert",
            StmtKind::Yield(_) => "yield",
            StmtKind::LocalClass(_) => "local_class",
            StmtKind::ConstructorCall(_) => "constructor_call",
            StmtKind::Empty => "empty",
            StmtKind::Other { .. } => "other",
        }
    }
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    /// An expression used as a statement, including local variable
    /// declarations (`int a = 1, b;`).
    Expression(Expression),
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    /// `for (T name : iterable) body`
    Foreach {
        variable: Parameter,
        iterable: Expression,
        body: Box<Statement>,
    },
    For {
        init: Vec<Expression>,
        condition: Option<Expression>,
        update: Vec<Expression>,
        body: Box<Statement>,
    },
    Block(Block),
    Do {
        body: Box<Statement>,
        condition: Expression,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    Return(Option<Expression>),
    Switch(SwitchBlock),
    Synchronized {
        lock: Expression,
        body: Block,
    },
    Try(TryStmt),
    Throw(Expression),
    Break(Option<String>),
    Continue(Option<String>),
    Labeled {
        label: String,
        body: Box<Statement>,
    },
    Assert {
        check: Expression,
        message: Option<Expression>,
    },
    Yield(Expression),
    LocalClass(Box<TypeDeclaration>),
    /// `this(...)` or `super(...)` at the start of a constructor body.
    ConstructorCall(ConstructorCall),
    /// A lone `;`.
    Empty,
    /// A statement form this model does not represent.
    Other { kind: String },
}

/// Selector plus entries; shared by switch statements and switch expressions.
#[derive(Debug, Clone)]
pub struct SwitchBlock {
    pub selector: Expression,
    pub entries: Vec<SwitchEntry>,
}

/// One `case ...:` group or `case ... ->` rule.
#[derive(Debug, Clone)]
pub struct SwitchEntry {
    pub labels: Vec<SwitchLabel>,
    pub statements: Vec<Statement>,
    /// True for arrow-form rules (`case X -> ...`).
    pub arrow: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum SwitchLabel {
    Case(Vec<Expression>),
    Default,
}

#[derive(Debug, Clone)]
pub struct TryStmt {
    /// try-with-resources declarations or expressions.
    pub resources: Vec<Expression>,
    pub block: Block,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Block>,
}

#[derive(Debug, Clone)]
pub struct CatchClause {
    /// Multi-catch types are joined with ` | `.
    pub parameter: Parameter,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConstructorCall {
    /// `this` or `super`.
    pub target: String,
    /// `outer.super(...)`
    pub qualifier: Option<Expression>,
    pub arguments: Vec<Expression>,
}
