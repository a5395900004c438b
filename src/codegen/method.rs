//! Method specifications for generated classes.

use super::names::{check_identifier, check_type};
use crate::ast::Modifier;
use crate::error::Result;

/// One line of a generated method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLine {
    /// Emitted as written, followed by `;`.
    Statement(String),
    /// Emitted verbatim, line by line.
    Raw(String),
}

/// A validated method ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub return_type: String,
    /// `(type, name)` pairs.
    pub parameters: Vec<(String, String)>,
    pub body: Vec<CodeLine>,
}

impl MethodSpec {
    pub fn builder(name: impl Into<String>) -> MethodSpecBuilder {
        MethodSpecBuilder {
            name: name.into(),
            modifiers: Vec::new(),
            return_type: "void".to_string(),
            parameters: Vec::new(),
            body: Vec::new(),
        }
    }

    /// `public static void main(String[] args)` with `code` as its body.
    pub fn main(code: impl Into<String>) -> Self {
        Self::main_builder().code(code).build_unchecked()
    }

    /// `public static void main(String[] args)` with a single statement.
    pub fn main_statement(statement: impl Into<String>) -> Self {
        Self::main_builder().statement(statement).build_unchecked()
    }

    fn main_builder() -> MethodSpecBuilder {
        Self::builder("main")
            .modifiers([Modifier::Public, Modifier::Static])
            .parameter("String[]", "args")
    }

    /// `name(Type, Type)`
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.parameters.iter().map(|(ty, _)| ty.as_str()).collect();
        format!("{}({})", self.name, types.join(", "))
    }
}

#[derive(Debug, Clone)]
pub struct MethodSpecBuilder {
    name: String,
    modifiers: Vec<Modifier>,
    return_type: String,
    parameters: Vec<(String, String)>,
    body: Vec<CodeLine>,
}

impl MethodSpecBuilder {
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn modifiers(self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        modifiers.into_iter().fold(self, |b, m| b.modifier(m))
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = ty.into();
        self
    }

    pub fn parameter(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.parameters.push((ty.into(), name.into()));
        self
    }

    /// Append a statement; a trailing `;` is added when rendering.
    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        let statement = statement.into();
        let statement = statement.trim().trim_end_matches(';').to_string();
        self.body.push(CodeLine::Statement(statement));
        self
    }

    /// Append raw code, emitted as written.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.body.push(CodeLine::Raw(code.into()));
        self
    }

    /// Validate names and types.
    pub fn build(self) -> Result<MethodSpec> {
        check_identifier("method", &self.name)?;
        check_type(&self.return_type)?;
        for (ty, name) in &self.parameters {
            check_type(ty)?;
            check_identifier("parameter", name)?;
        }
        Ok(self.build_unchecked())
    }

    fn build_unchecked(self) -> MethodSpec {
        MethodSpec {
            name: self.name,
            modifiers: self.modifiers,
            return_type: self.return_type,
            parameters: self.parameters,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builder() {
        let spec = MethodSpec::builder("add")
            .modifier(Modifier::Public)
            .modifier(Modifier::Public)
            .returns("int")
            .parameter("int", "a")
            .parameter("int", "b")
            .statement("return a + b;")
            .build()
            .unwrap();
        assert_eq!(spec.modifiers, vec![Modifier::Public]);
        assert_eq!(spec.signature(), "add(int, int)");
        assert_eq!(spec.body, vec![CodeLine::Statement("return a + b".into())]);
    }

    #[test]
    fn test_main_shape() {
        let spec = MethodSpec::main_statement("System.out.println(\"hi\")");
        assert_eq!(spec.name, "main");
        assert_eq!(spec.modifiers, vec![Modifier::Public, Modifier::Static]);
        assert_eq!(spec.return_type, "void");
        assert_eq!(spec.parameters, vec![("String[]".into(), "args".into())]);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let err = MethodSpec::builder("class").build().unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier { kind: "method", .. }));

        let err = MethodSpec::builder("ok")
            .parameter("int", "2x")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier { kind: "parameter", .. }));
    }
}
