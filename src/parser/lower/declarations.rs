use tree_sitter::Node;

use super::{child_of_kind, fields, first_named, named_children, Lowerer};
use crate::ast::{
    Block, ClassBody, ClassMember, EnumConstant, ImportDeclaration, MethodDeclaration, Modifier,
    Modifiers, PackageDeclaration, Parameter, Span, TypeDeclaration, TypeKind,
    VariableDeclarationExpr, VariableDeclarator,
};
use crate::error::Result;

pub(crate) type UnitParts = (
    Option<PackageDeclaration>,
    Vec<ImportDeclaration>,
    Vec<TypeDeclaration>,
);

/// Map a CST node kind to the type declaration it introduces.
pub(super) fn type_kind(kind: &str) -> Option<TypeKind> {
    match kind {
        "class_declaration" => Some(TypeKind::Class),
        "interface_declaration" => Some(TypeKind::Interface),
        "enum_declaration" => Some(TypeKind::Enum),
        "record_declaration" => Some(TypeKind::Record),
        "annotation_type_declaration" => Some(TypeKind::Annotation),
        _ => None,
    }
}

impl<'src> Lowerer<'src> {
    pub(crate) fn compilation_unit(&mut self, root: Node) -> Result<UnitParts> {
        let mut package = None;
        let mut imports = Vec::new();
        let mut types = Vec::new();

        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    if package.is_none() {
                        package = self.package(child);
                    }
                }
                "import_declaration" => {
                    if let Some(import) = self.import(child) {
                        imports.push(import);
                    }
                }
                kind => {
                    if let Some(type_kind) = type_kind(kind) {
                        types.push(self.type_declaration(child, type_kind)?);
                    }
                }
            }
        }

        Ok((package, imports, types))
    }

    fn package(&self, node: Node) -> Option<PackageDeclaration> {
        named_children(node)
            .into_iter()
            .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))
            .map(|name| PackageDeclaration {
                name: self.text(name).to_string(),
                span: Span::from_node(node),
            })
    }

    fn import(&self, node: Node) -> Option<ImportDeclaration> {
        let path = named_children(node)
            .into_iter()
            .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))?;
        Some(ImportDeclaration {
            path: self.text(path).to_string(),
            is_static: child_of_kind(node, "static").is_some(),
            is_wildcard: child_of_kind(node, "asterisk").is_some(),
            span: Span::from_node(node),
        })
    }

    pub(super) fn type_declaration(&mut self, node: Node, kind: TypeKind) -> Result<TypeDeclaration> {
        self.nested(|this| {
            let name = this.field_text(node, "name")?;
            let modifiers = this.modifiers(node);
            let body = match node.child_by_field_name("body") {
                Some(body) => this.class_body(body)?,
                None => ClassBody::default(),
            };
            Ok(TypeDeclaration {
                name,
                kind,
                modifiers,
                body,
                span: Span::from_node(node),
            })
        })
    }

    /// Lower a class, interface, enum or annotation body.
    pub(super) fn class_body(&mut self, node: Node) -> Result<ClassBody> {
        let mut body = ClassBody::default();
        self.class_members(node, &mut body)?;
        Ok(body)
    }

    fn class_members(&mut self, node: Node, body: &mut ClassBody) -> Result<()> {
        for member in named_children(node) {
            let lowered = match member.kind() {
                "method_declaration" | "annotation_type_element_declaration" => {
                    ClassMember::Method(self.method(member)?)
                }
                "constructor_declaration" | "compact_constructor_declaration" => {
                    ClassMember::Constructor(self.method(member)?)
                }
                "field_declaration" | "constant_declaration" => {
                    ClassMember::Field(self.variable_declaration(member)?)
                }
                "static_initializer" => match child_of_kind(member, "block") {
                    Some(block) => ClassMember::Initializer(self.block(block)?),
                    None => continue,
                },
                "block" => ClassMember::Initializer(self.block(member)?),
                "enum_constant" => ClassMember::EnumConstant(self.enum_constant(member)?),
                "enum_body_declarations" => {
                    self.class_members(member, body)?;
                    continue;
                }
                kind => match type_kind(kind) {
                    Some(type_kind) => ClassMember::Type(self.type_declaration(member, type_kind)?),
                    None => continue,
                },
            };
            body.push(lowered);
        }
        Ok(())
    }

    fn enum_constant(&mut self, node: Node) -> Result<EnumConstant> {
        let name = self.field_text(node, "name")?;
        let arguments = self.arguments(node)?;
        let body = match node.child_by_field_name("body") {
            Some(body) => Some(self.class_body(body)?),
            None => None,
        };
        Ok(EnumConstant {
            name,
            arguments,
            body,
            span: Span::from_node(node),
        })
    }

    /// Methods, constructors and annotation elements.
    fn method(&mut self, node: Node) -> Result<MethodDeclaration> {
        let name = self.field_text(node, "name")?;
        let modifiers = self.modifiers(node);

        let type_parameters: Vec<String> = node
            .child_by_field_name("type_parameters")
            .map(|params| {
                named_children(params)
                    .into_iter()
                    .map(|p| self.compact(p))
                    .collect()
            })
            .unwrap_or_default();

        let return_type = match node.kind() {
            "method_declaration" | "annotation_type_element_declaration" => {
                let ty = self.field(node, "type")?;
                Some(self.with_dimensions(self.compact(ty), node))
            }
            _ => None,
        };

        let parameters = match node.child_by_field_name("parameters") {
            Some(params) => self.parameters(params),
            None => Vec::new(),
        };

        let throws: Vec<String> = child_of_kind(node, "throws")
            .map(|throws| {
                named_children(throws)
                    .into_iter()
                    .map(|t| self.compact(t))
                    .collect()
            })
            .unwrap_or_default();

        let body = match node.child_by_field_name("body") {
            Some(body) => Some(self.block(body)?),
            None => None,
        };

        Ok(MethodDeclaration {
            name,
            modifiers,
            type_parameters,
            return_type,
            parameters,
            throws,
            body,
            span: Span::from_node(node),
        })
    }

    /// Lower `formal_parameters`; receiver parameters are dropped.
    pub(super) fn parameters(&self, node: Node) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        for param in named_children(node) {
            match param.kind() {
                "formal_parameter" => {
                    let ty = param
                        .child_by_field_name("type")
                        .map(|t| self.compact(t))
                        .unwrap_or_default();
                    parameters.push(Parameter {
                        name: param
                            .child_by_field_name("name")
                            .map(|n| self.text(n).to_string())
                            .unwrap_or_default(),
                        ty: self.with_dimensions(ty, param),
                        modifiers: self.modifiers(param),
                        varargs: false,
                        span: Span::from_node(param),
                    });
                }
                "spread_parameter" => {
                    let children = named_children(param);
                    let ty = children
                        .iter()
                        .find(|n| !matches!(n.kind(), "modifiers" | "variable_declarator"))
                        .map(|t| self.compact(*t))
                        .unwrap_or_default();
                    let name = children
                        .iter()
                        .find(|n| n.kind() == "variable_declarator")
                        .and_then(|d| d.child_by_field_name("name"))
                        .map(|n| self.text(n).to_string())
                        .unwrap_or_default();
                    parameters.push(Parameter {
                        name,
                        ty,
                        modifiers: self.modifiers(param),
                        varargs: true,
                        span: Span::from_node(param),
                    });
                }
                _ => {}
            }
        }
        parameters
    }

    /// Collect the `modifiers` child of a declaration, if any.
    pub(super) fn modifiers(&self, node: Node) -> Modifiers {
        let mut modifiers = Modifiers::default();
        let Some(list) = child_of_kind(node, "modifiers") else {
            return modifiers;
        };

        let mut cursor = list.walk();
        for child in list.children(&mut cursor) {
            match child.kind() {
                "marker_annotation" | "annotation" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        modifiers.annotations.push(self.text(name).to_string());
                    }
                }
                keyword => {
                    if let Some(modifier) = Modifier::from_keyword(keyword) {
                        modifiers.keywords.push(modifier);
                    }
                }
            }
        }
        modifiers
    }

    /// Local variable, field or constant declaration.
    pub(super) fn variable_declaration(&mut self, node: Node) -> Result<VariableDeclarationExpr> {
        let modifiers = self.modifiers(node);
        let base = self.field(node, "type").map(|t| self.compact(t))?;

        let declarators = fields(node, "declarator");
        let mut variables = Vec::with_capacity(declarators.len());
        for declarator in &declarators {
            variables.push(self.declarator(*declarator, &base)?);
        }

        // Stops at the last declarator so the trailing `;` is not included.
        let span = match declarators.last() {
            Some(last) => Span::covering(node, *last),
            None => Span::from_node(node),
        };

        Ok(VariableDeclarationExpr {
            modifiers,
            variables,
            span,
        })
    }

    /// Lower anything carrying `name`, optional `dimensions` and optional
    /// `value` fields: variable declarators and try resources.
    pub(super) fn declarator(&mut self, node: Node, base: &str) -> Result<VariableDeclarator> {
        let name = self.field_text(node, "name")?;
        let initializer = match node.child_by_field_name("value") {
            Some(value) => Some(self.expression(value)?),
            None => None,
        };
        Ok(VariableDeclarator {
            name,
            ty: self.with_dimensions(base.to_string(), node),
            initializer,
            span: Span::from_node(node),
        })
    }

    /// Append C-style dimensions written after a name (`int a[]`).
    fn with_dimensions(&self, ty: String, node: Node) -> String {
        match node.child_by_field_name("dimensions") {
            Some(dims) => format!("{}{}", ty, self.compact(dims).replace(' ', "")),
            None => ty,
        }
    }

    pub(super) fn block(&mut self, node: Node) -> Result<Block> {
        let mut statements = Vec::new();
        for child in named_children(node) {
            statements.push(self.statement(child)?);
        }
        Ok(Block {
            statements,
            span: Span::from_node(node),
        })
    }

    /// First non-comment named child lowered as an expression.
    pub(super) fn first_expression(&mut self, node: Node) -> Result<Option<crate::ast::Expression>> {
        match first_named(node) {
            Some(child) => Ok(Some(self.expression(child)?)),
            None => Ok(None),
        }
    }
}
