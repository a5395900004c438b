//! Compilation units, type declarations and method declarations.

use std::fmt;

use super::{Block, Expression, Span, VariableDeclarationExpr};

/// Root of one parsed Java file.
///
/// Owns the full tree together with the source text it was lowered from,
/// so that any span in the tree can be rendered back with [`snippet`].
///
/// [`snippet`]: CompilationUnit::snippet
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub package: Option<PackageDeclaration>,
    pub imports: Vec<ImportDeclaration>,
    pub types: Vec<TypeDeclaration>,
    pub span: Span,
    source: String,
}

impl CompilationUnit {
    pub fn new(
        source: String,
        package: Option<PackageDeclaration>,
        imports: Vec<ImportDeclaration>,
        types: Vec<TypeDeclaration>,
        span: Span,
    ) -> Self {
        Self {
            package,
            imports,
            types,
            span,
            source,
        }
    }

    /// The source text this unit was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text covered by `span`.
    ///
    /// Returns an empty string for spans that do not belong to this unit.
    pub fn snippet(&self, span: Span) -> &str {
        self.source.get(span.range()).unwrap_or("")
    }

    /// First class or interface carrying the `public` modifier, in source order.
    pub fn public_class(&self) -> Option<&TypeDeclaration> {
        self.types
            .iter()
            .find(|t| t.kind.is_class_or_interface() && t.modifiers.contains(Modifier::Public))
    }
}

/// `package com.example;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDeclaration {
    pub name: String,
    pub span: Span,
}

/// `import [static] a.b.C[.*];`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub span: Span,
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Record => "record",
            TypeKind::Annotation => "@interface",
        }
    }

    /// Classes and interfaces are the candidates for "the public class".
    pub fn is_class_or_interface(&self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Interface)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named type: class, interface, enum, record or annotation type.
#[derive(Debug, Clone)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub body: ClassBody,
    pub span: Span,
}

impl TypeDeclaration {
    /// Declared methods in source order. Constructors are not included.
    pub fn methods(&self) -> &[MethodDeclaration] {
        self.body.methods()
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.contains(Modifier::Public)
    }
}

/// An owned class body member, as produced by lowering.
#[derive(Debug, Clone)]
pub enum ClassMember {
    EnumConstant(EnumConstant),
    Field(VariableDeclarationExpr),
    Initializer(Block),
    Constructor(MethodDeclaration),
    Method(MethodDeclaration),
    Type(TypeDeclaration),
}

/// A borrowed view of one member, yielded by [`ClassBody::members`].
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    EnumConstant(&'a EnumConstant),
    Field(&'a VariableDeclarationExpr),
    Initializer(&'a Block),
    Constructor(&'a MethodDeclaration),
    Method(&'a MethodDeclaration),
    Type(&'a TypeDeclaration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    EnumConstant(usize),
    Field(usize),
    Initializer(usize),
    Constructor(usize),
    Method(usize),
    Type(usize),
}

/// Members of a class body.
///
/// Members are stored grouped by kind so each group can be borrowed as a
/// slice, and [`members`](Self::members) replays them in declaration order.
/// Anonymous classes and enum constant bodies use the same structure.
#[derive(Debug, Clone, Default)]
pub struct ClassBody {
    enum_constants: Vec<EnumConstant>,
    fields: Vec<VariableDeclarationExpr>,
    initializers: Vec<Block>,
    constructors: Vec<MethodDeclaration>,
    methods: Vec<MethodDeclaration>,
    types: Vec<TypeDeclaration>,
    order: Vec<Slot>,
}

impl ClassBody {
    /// Append a member after every member pushed so far.
    pub fn push(&mut self, member: ClassMember) {
        let slot = match member {
            ClassMember::EnumConstant(c) => {
                self.enum_constants.push(c);
                Slot::EnumConstant(self.enum_constants.len() - 1)
            }
            ClassMember::Field(f) => {
                self.fields.push(f);
                Slot::Field(self.fields.len() - 1)
            }
            ClassMember::Initializer(b) => {
                self.initializers.push(b);
                Slot::Initializer(self.initializers.len() - 1)
            }
            ClassMember::Constructor(m) => {
                self.constructors.push(m);
                Slot::Constructor(self.constructors.len() - 1)
            }
            ClassMember::Method(m) => {
                self.methods.push(m);
                Slot::Method(self.methods.len() - 1)
            }
            ClassMember::Type(t) => {
                self.types.push(t);
                Slot::Type(self.types.len() - 1)
            }
        };
        self.order.push(slot);
    }

    /// All members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = Member<'_>> + '_ {
        self.order.iter().map(move |slot| match *slot {
            Slot::EnumConstant(i) => Member::EnumConstant(&self.enum_constants[i]),
            Slot::Field(i) => Member::Field(&self.fields[i]),
            Slot::Initializer(i) => Member::Initializer(&self.initializers[i]),
            Slot::Constructor(i) => Member::Constructor(&self.constructors[i]),
            Slot::Method(i) => Member::Method(&self.methods[i]),
            Slot::Type(i) => Member::Type(&self.types[i]),
        })
    }

    pub fn enum_constants(&self) -> &[EnumConstant] {
        &self.enum_constants
    }

    pub fn fields(&self) -> &[VariableDeclarationExpr] {
        &self.fields
    }

    pub fn initializers(&self) -> &[Block] {
        &self.initializers
    }

    pub fn constructors(&self) -> &[MethodDeclaration] {
        &self.constructors
    }

    pub fn methods(&self) -> &[MethodDeclaration] {
        &self.methods
    }

    pub fn types(&self) -> &[TypeDeclaration] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<ClassMember> for ClassBody {
    fn from_iter<I: IntoIterator<Item = ClassMember>>(iter: I) -> Self {
        let mut body = ClassBody::default();
        for member in iter {
            body.push(member);
        }
        body
    }
}

/// `RED(1, 2) { ... }`
#[derive(Debug, Clone)]
pub struct EnumConstant {
    pub name: String,
    pub arguments: Vec<Expression>,
    pub body: Option<ClassBody>,
    pub span: Span,
}

/// A method or constructor.
///
/// Constructors have no return type. Abstract and interface methods have
/// no body.
#[derive(Debug, Clone)]
pub struct MethodDeclaration {
    pub name: String,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<String>,
    pub return_type: Option<String>,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<String>,
    pub body: Option<Block>,
    pub span: Span,
}

impl MethodDeclaration {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    /// `name(Type, Type...)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                if p.varargs {
                    format!("{}...", p.ty)
                } else {
                    p.ty.clone()
                }
            })
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// A formal parameter, catch parameter or foreach variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
    pub modifiers: Modifiers,
    pub varargs: bool,
    pub span: Span,
}

/// Java modifier keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Sealed,
    NonSealed,
    Default,
    Synchronized,
    Native,
    Transient,
    Volatile,
    Strictfp,
}

impl Modifier {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let modifier = match keyword {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "abstract" => Modifier::Abstract,
            "static" => Modifier::Static,
            "final" => Modifier::Final,
            "sealed" => Modifier::Sealed,
            "non-sealed" => Modifier::NonSealed,
            "default" => Modifier::Default,
            "synchronized" => Modifier::Synchronized,
            "native" => Modifier::Native,
            "transient" => Modifier::Transient,
            "volatile" => Modifier::Volatile,
            "strictfp" => Modifier::Strictfp,
            _ => return None,
        };
        Some(modifier)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Sealed => "sealed",
            Modifier::NonSealed => "non-sealed",
            Modifier::Default => "default",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Strictfp => "strictfp",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier keywords plus annotation names, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub keywords: Vec<Modifier>,
    pub annotations: Vec<String>,
}

impl Modifiers {
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.keywords.contains(&modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.annotations.is_empty()
    }
}
