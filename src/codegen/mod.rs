//! Minimal Java class generation.
//!
//! Builds a single public class in a package, typically around a generated
//! `public static void main(String[] args)` entry point, and writes it out
//! as a source file.
//!
//! ```no_run
//! use flatjava::codegen::ClassBuilder;
//!
//! # fn main() -> flatjava::Result<()> {
//! let mut builder = ClassBuilder::new("com.example", "Hello")?;
//! let main = builder.main_method_statement("System.out.println(\"hello\")");
//! builder.add_method(main);
//! let path = builder.build().write_to("generated")?;
//! println!("wrote {}", path.display());
//! # Ok(())
//! # }
//! ```

mod file;
mod method;
mod names;

pub use file::JavaFile;
pub use method::{CodeLine, MethodSpec, MethodSpecBuilder};
pub use names::{is_identifier, is_reserved};

use crate::error::Result;

/// Accumulates methods for one public class.
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    package: String,
    class_name: String,
    methods: Vec<MethodSpec>,
}

impl ClassBuilder {
    /// Fails with [`Error::InvalidIdentifier`](crate::Error::InvalidIdentifier)
    /// for malformed package or class names.
    pub fn new(package: impl Into<String>, class_name: impl Into<String>) -> Result<Self> {
        let package = package.into();
        let class_name = class_name.into();
        names::check_package(&package)?;
        names::check_identifier("class", &class_name)?;
        Ok(Self {
            package,
            class_name,
            methods: Vec::new(),
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Entry method whose body is `code`, emitted verbatim. Not added to
    /// the class until passed to [`add_method`](Self::add_method).
    pub fn main_method(&self, code: impl Into<String>) -> MethodSpec {
        MethodSpec::main(code)
    }

    /// Entry method whose body is the single statement `statement`.
    pub fn main_method_statement(&self, statement: impl Into<String>) -> MethodSpec {
        MethodSpec::main_statement(statement)
    }

    pub fn add_method(&mut self, method: MethodSpec) -> &mut Self {
        self.methods.push(method);
        self
    }

    /// Add methods in order. An empty iterator is a no-op.
    pub fn add_methods(&mut self, methods: impl IntoIterator<Item = MethodSpec>) -> &mut Self {
        self.methods.extend(methods);
        self
    }

    pub fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }

    pub fn build(&self) -> JavaFile {
        JavaFile {
            package: self.package.clone(),
            class_name: self.class_name.clone(),
            methods: self.methods.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_validates_names() {
        assert!(ClassBuilder::new("com.example", "Main").is_ok());
        assert!(ClassBuilder::new("", "Main").is_ok());
        assert!(matches!(
            ClassBuilder::new("com.example", "int"),
            Err(Error::InvalidIdentifier { kind: "class", .. })
        ));
        assert!(matches!(
            ClassBuilder::new("com.1example", "Main"),
            Err(Error::InvalidIdentifier { kind: "package", .. })
        ));
    }

    #[test]
    fn test_main_methods_are_not_added_implicitly() {
        let builder = ClassBuilder::new("p", "Main").unwrap();
        let _ = builder.main_method("run();");
        assert!(builder.methods().is_empty());
    }

    #[test]
    fn test_add_methods_keeps_order() {
        let mut builder = ClassBuilder::new("p", "Main").unwrap();
        builder.add_methods(Vec::new());
        assert!(builder.methods().is_empty());

        let main = builder.main_method_statement("go()");
        let helper = MethodSpec::builder("go").build().unwrap();
        builder.add_methods([main, helper]);
        let names: Vec<_> = builder.methods().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["main", "go"]);
    }

    #[test]
    fn test_generated_source_parses_back() {
        let mut builder = ClassBuilder::new("com.example", "Main").unwrap();
        let main = builder.main_method("int x = 1;\nSystem.out.println(x);");
        builder.add_method(main);

        let rendered = builder.build().render();
        let source = crate::JavaSource::from_source("Main.java", rendered).unwrap();
        assert_eq!(source.package_name().unwrap(), "com.example");
        assert_eq!(source.public_class_name(), Some("Main"));
        let main = source.public_method("main").unwrap();
        assert_eq!(source.variable_declarations(main).unwrap()[0].name, "x");
    }
}
