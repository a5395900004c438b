//! Deeply nested input is rejected with `DepthExceeded` instead of
//! overflowing the stack.
//!
//! Every case runs on a thread with the 2 MiB stack test threads get by
//! default, so a regression aborts the test binary.

use std::path::Path;
use std::thread;

use flatjava::analysis::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use flatjava::{collect_calls, Error, JavaParser, JavaSource};

const TEST_THREAD_STACK: usize = 2 * 1024 * 1024;

fn on_small_stack<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    thread::Builder::new()
        .stack_size(TEST_THREAD_STACK)
        .spawn(f)
        .expect("should spawn test thread")
        .join()
        .expect("test thread should not panic")
}

/// `work();` wrapped in `depth` nested blocks inside a method.
fn nested_blocks(depth: usize) -> String {
    format!(
        "package p; public class Deep {{ void m() {{ {}work();{} }} }}",
        "{ ".repeat(depth),
        " }".repeat(depth)
    )
}

#[test]
fn test_nesting_just_under_default_limit() {
    let (exprs, calls) = on_small_stack(|| {
        let source = JavaSource::from_source("Deep.java", nested_blocks(DEFAULT_MAX_DEPTH - 8))
            .expect("should parse below the limit");
        let m = source.public_method("m").unwrap();
        let exprs: Vec<String> = source
            .method_expressions(m)
            .unwrap()
            .into_iter()
            .map(|e| source.text(e.span).to_string())
            .collect();
        let calls = collect_calls(source.compilation_unit()).unwrap().len();
        (exprs, calls)
    });
    assert_eq!(exprs, vec!["work()"]);
    assert_eq!(calls, 1);
}

#[test]
fn test_nesting_far_over_default_limit() {
    let err = on_small_stack(|| JavaSource::from_source("Deep.java", nested_blocks(5_000)).err());
    assert!(
        matches!(err, Some(Error::DepthExceeded { limit }) if limit == DEFAULT_MAX_DEPTH),
        "got {:?}",
        err
    );
}

#[test]
fn test_long_string_concatenation() {
    let outcome = on_small_stack(|| {
        let terms: Vec<String> = (0..600).map(|i| format!("\"s{}\"", i)).collect();
        let text = format!(
            "package p; public class Concat {{ String m() {{ String s = {}; return s; }} }}",
            terms.join(" + ")
        );
        match JavaSource::from_source("Concat.java", text) {
            Ok(source) => {
                let m = source.public_method("m").unwrap();
                source.method_expressions(m).map(|exprs| exprs.len())
            }
            Err(e) => Err(e),
        }
    });
    assert!(
        matches!(outcome, Ok(2) | Err(Error::DepthExceeded { .. })),
        "got {:?}",
        outcome
    );
}

#[test]
fn test_largest_configurable_limit() {
    let types = on_small_stack(|| {
        let unit = JavaParser::new()
            .with_max_depth(MAX_DEPTH_LIMIT)
            .parse_source(Path::new("Deep.java"), nested_blocks(MAX_DEPTH_LIMIT - 8))
            .expect("should parse below the configured limit");
        unit.types.len()
    });
    assert_eq!(types, 1);
}
