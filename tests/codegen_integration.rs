//! End-to-end tests for class generation.

use std::fs;

use flatjava::ast::Modifier;
use flatjava::{ClassBuilder, Error, JavaSource, MethodSpec};
use tempfile::TempDir;

#[test]
fn test_write_to_creates_package_directories() {
    let dir = TempDir::new().unwrap();

    let mut builder = ClassBuilder::new("org.demo.app", "Launcher").unwrap();
    let main = builder.main_method("String who = args[0];\ngreet(who);\n");
    let greet = MethodSpec::builder("greet")
        .modifiers([Modifier::Private, Modifier::Static])
        .parameter("String", "who")
        .statement("System.out.println(\"hello \" + who)")
        .build()
        .unwrap();
    builder.add_methods([main, greet]);

    let path = builder.build().write_to(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("org/demo/app/Launcher.java"));
    assert!(path.is_file());

    let source = JavaSource::parse(&path).unwrap();
    assert_eq!(source.package_name().unwrap(), "org.demo.app");
    assert_eq!(source.public_class_name(), Some("Launcher"));

    let main = source.public_method("main").unwrap();
    assert_eq!(main.signature(), "main(String[])");
    assert!(main.modifiers.contains(Modifier::Static));
    let calls: Vec<_> = source
        .method_calls(main)
        .unwrap()
        .into_iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(calls, vec!["greet"]);

    let greet = source.public_method("greet").unwrap();
    assert_eq!(source.method_expressions(greet).unwrap().len(), 1);
}

#[test]
fn test_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let builder = ClassBuilder::new("", "Solo").unwrap();

    let first = builder.build().write_to(dir.path()).unwrap();
    fs::write(&first, "stale").unwrap();
    let second = builder.build().write_to(dir.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(second).unwrap(), "public class Solo {\n}\n");
}

#[test]
fn test_invalid_names() {
    for (package, class) in [("a.b", "2Fast"), ("a.if.b", "Ok"), ("a", "")] {
        let err = ClassBuilder::new(package, class).unwrap_err();
        assert!(
            matches!(err, Error::InvalidIdentifier { .. }),
            "{}.{} accepted",
            package,
            class
        );
    }
}
