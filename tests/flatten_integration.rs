//! Integration tests for parsing, flattening and call collection.
//!
//! These tests run the public API against the Java fixtures in
//! `testdata/java`.

use std::path::PathBuf;

use flatjava::ast::ExprKind;
use flatjava::{collect_calls, Config, Error, JavaSource};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("java")
        .join(name)
}

fn order_service() -> JavaSource {
    JavaSource::parse(fixture("OrderService.java")).expect("fixture should parse")
}

/// Flattened expressions of `method`, rendered on one line each.
fn flattened(source: &JavaSource, method: &str) -> Vec<String> {
    let method = source.public_method(method).expect("method should exist");
    source
        .method_expressions(method)
        .unwrap()
        .into_iter()
        .map(|e| source.text(e.span).split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

fn call_names(source: &JavaSource, method: &str) -> Vec<String> {
    let method = source.public_method(method).expect("method should exist");
    source
        .method_calls(method)
        .unwrap()
        .into_iter()
        .map(|c| c.name().to_string())
        .collect()
}

#[test]
fn test_package_and_public_class() {
    let source = order_service();
    assert_eq!(source.package_name().unwrap(), "com.shop.orders");
    assert_eq!(source.public_class_name(), Some("OrderService"));

    let methods: Vec<_> = source
        .public_methods()
        .unwrap()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(methods, vec!["total", "place", "describe", "drain", "reject"]);
}

#[test]
fn test_loop_body_and_return() {
    let source = order_service();
    assert_eq!(
        flattened(&source, "total"),
        vec![
            "int sum = 0, count",
            "sum += price",
            "count = prices.size()",
            "log(\"total\", count)",
            "sum",
        ]
    );

    let total = source.public_method("total").unwrap();
    let vars: Vec<_> = source
        .variable_declarations(total)
        .unwrap()
        .into_iter()
        .map(|v| (v.name.as_str(), v.initializer.is_some()))
        .collect();
    assert_eq!(vars, vec![("sum", true), ("count", false)]);
}

#[test]
fn test_branches_then_try_catch_finally() {
    let source = order_service();
    assert_eq!(
        flattened(&source, "place"),
        vec![
            "reject(item)",
            "backorder(item, qty)",
            "int left = stock.get(item) - qty",
            "stock.put(item, left)",
            "audit.record(item)",
            "retry(item)",
            "audit.flush()",
        ]
    );
}

#[test]
fn test_switch_statement_and_switch_expression() {
    let source = order_service();
    let exprs = flattened(&source, "describe");
    assert_eq!(exprs.len(), 5);
    assert_eq!(&exprs[..3], ["note(\"one\")", "note(\"few\")", "note(\"many\")"]);
    assert!(exprs[3].starts_with("String label = switch (code)"));
    assert_eq!(exprs[4], "label");
}

#[test]
fn test_flattener_versus_collector() {
    let source = order_service();
    assert_eq!(
        flattened(&source, "drain"),
        vec![
            "String next = queue.remove(0)",
            "process(next)",
            "queue.forEach(q -> discard(q))",
            "new Thread(new Runnable() { public void run() { cleanup(); } }).start()",
        ]
    );
    assert_eq!(
        call_names(&source, "drain"),
        vec!["isEmpty", "remove", "process", "discard", "forEach", "cleanup", "start"]
    );
}

#[test]
fn test_throw_only_method() {
    let source = order_service();
    assert!(flattened(&source, "reject").is_empty());
    assert!(call_names(&source, "reject").is_empty());
}

#[test]
fn test_collect_over_whole_unit() {
    let source = order_service();
    let calls = collect_calls(source.compilation_unit()).unwrap();
    assert_eq!(calls.first().map(|c| c.name()), Some("size"));
    assert_eq!(calls.last().map(|c| c.name()), Some("help"));

    let scoped = calls
        .iter()
        .filter(|c| matches!(c.scope().map(|s| &s.kind), Some(ExprKind::Name(n)) if n == "audit"))
        .count();
    assert_eq!(scoped, 2);
}

#[test]
fn test_missing_package() {
    let source = JavaSource::parse(fixture("NoPackage.java")).unwrap();
    assert!(matches!(
        source.package_name(),
        Err(Error::MissingPackage { .. })
    ));
    assert_eq!(source.public_class_name(), Some("NoPackage"));
}

#[test]
fn test_no_public_class() {
    let source = JavaSource::parse(fixture("PackagePrivate.java")).unwrap();
    assert_eq!(source.package_name().unwrap(), "com.shop.internal");
    assert!(source.public_class_name().is_none());
    assert!(source.public_methods().is_none());
}

#[test]
fn test_syntax_error() {
    let err = JavaSource::parse(fixture("Broken.java")).unwrap_err();
    match err {
        Error::Parse { path, message } => {
            assert!(path.ends_with("Broken.java"));
            assert!(message.contains("syntax error"), "got {}", message);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_unreadable_file() {
    let err = JavaSource::parse(fixture("DoesNotExist.java")).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_configured_depth_limit() {
    let mut body = String::from("work();");
    for _ in 0..40 {
        body = format!("if (c) {{ {} }}", body);
    }
    let text = format!("package p; public class Deep {{ void m() {{ {} }} }}", body);

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Deep.java");
    std::fs::write(&path, &text).unwrap();

    let shallow = Config {
        max_depth: 16,
        ..Config::default()
    };
    let err = JavaSource::parse_with(&path, &shallow).unwrap_err();
    assert!(matches!(err, Error::DepthExceeded { limit: 16 }));

    let source = JavaSource::parse_with(&path, &Config::default()).unwrap();
    let m = source.public_method("m").unwrap();
    assert_eq!(source.method_expressions(m).unwrap().len(), 1);
    assert_eq!(source.method_calls(m).unwrap().len(), 1);
}

#[test]
fn test_concurrent_queries_share_one_tree() {
    let source = order_service();
    let expected = flattened(&source, "place");
    let source = &source;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    let place = source.public_method("place").unwrap();
                    let exprs = source.method_expressions(place).unwrap();
                    let calls = source.method_calls(place).unwrap();
                    (exprs.len(), calls.len())
                })
            })
            .collect();

        for handle in handles {
            let (exprs, calls) = handle.join().unwrap();
            assert_eq!(exprs, expected.len());
            assert!(calls >= exprs);
        }
    });
}
