//! Integration tests for end-to-end compilation.
//!
//! These tests verify that the complete pipeline works correctly from
//! source code through tokenization, parsing, analysis, optimization and
//! JavaScript generation.

use pythonpoint::{
    analyze_source,
    analyzer::ir::{Expression, Statement},
    analyzer::types::Type,
    compile,
    errors::errors::ErrorImpl,
    parse_source,
};

const DEMO: &str = include_str!("../demos/predictive.pop");

#[test]
fn test_compile_demo() {
    let output = compile(DEMO, "predictive.pop", false).unwrap();

    assert!(output.contains("function greet(name, punctuation = \"!\") {\n"));
    assert!(output.contains("  console.log(((\"Hello, \" + name) + punctuation));\n"));
    assert!(output.contains("function* squares(limit) {\n"));
    assert!(output.contains("    yield (n * n);\n"));
    assert!(output.contains("let who = \"PythOnPoint\";\n"));
    assert!(output.contains("greet(who);\n"));
    assert!(output.contains("// predictive pattern: prime\nfor (let i = 1; i <= 10; i++) {\n  console.log(i);\n}\n"));
    assert!(output.ends_with("console.log((2 + 2) === 4);\n"));
}

#[test]
fn test_compile_demo_optimized() {
    let output = compile(DEMO, "predictive.pop", true).unwrap();
    assert!(output.ends_with("console.log(4 === 4);\n"));
}

#[test]
fn test_parse_demo() {
    assert!(parse_source(DEMO, "predictive.pop").is_ok());
}

#[test]
fn test_predictive_loop_ir() {
    let program = analyze_source("for i in predictive_range(1, 10, prime) { print(i) }", "loop.pop").unwrap();
    assert_eq!(program.statements.len(), 1);

    match &program.statements[0] {
        Statement::PredictiveLoop(predictive_loop) => {
            assert_eq!(predictive_loop.iterator.ty, Some(Type::Int));
            assert_eq!(predictive_loop.low, Expression::NumberLiteral { value: 1, ty: Type::Int });
            assert_eq!(predictive_loop.high, Expression::NumberLiteral { value: 10, ty: Type::Int });
            assert_eq!(predictive_loop.body.len(), 1);
            assert!(matches!(predictive_loop.body[0], Statement::PrintStatement { .. }));
        }
        statement => panic!("unexpected {:?}", statement),
    }
}

#[test]
fn test_redeclaration_fails_but_shadowing_succeeds() {
    let error = analyze_source("let x = 1\nlet x = 2", "dup.pop").unwrap_err();
    assert_eq!(error.get_error_name(), "DuplicateDeclaration");

    let source = "let x = 1\nfor i in predictive_range(1, 2, linear) {\n  let x = 2\n  print x\n}";
    assert!(analyze_source(source, "shadow.pop").is_ok());
}

#[test]
fn test_undeclared_identifiers_are_named() {
    let cases = [
        ("print ghost", "ghost"),
        ("let y = 1 + phantom", "phantom"),
        ("compare 1 to spectre", "spectre"),
        ("wraith(1)", "wraith"),
        ("for i in predictive_range(1, shade, p) { print i }", "shade"),
    ];

    for (source, name) in cases {
        let error = analyze_source(source, "undeclared.pop").unwrap_err();
        assert_eq!(
            error.get_kind(),
            &ErrorImpl::UndeclaredIdentifier { name: String::from(name) },
            "{}",
            source
        );
    }
}

#[test]
fn test_argument_count_mismatches() {
    let error = analyze_source("define f() then print 1\nf(1)", "args.pop").unwrap_err();
    assert_eq!(error.get_message(), "0 argument(s) required but 1 passed");

    let error = analyze_source("define g(x) then print x\ng()", "args.pop").unwrap_err();
    assert_eq!(error.get_message(), "1 argument(s) required but 0 passed");
}

#[test]
fn test_return_and_yield_context() {
    let error = analyze_source("return 1", "ctx.pop").unwrap_err();
    assert_eq!(error.get_error_name(), "ReturnOutsideFunction");

    let error = analyze_source("define f() then\n  yield 1", "ctx.pop").unwrap_err();
    assert_eq!(error.get_error_name(), "YieldOutsideLoop");

    let source = "define f() then\n  for i in predictive_range(1, 3, linear) {\n    yield i\n  }";
    assert!(analyze_source(source, "ctx.pop").is_ok());
}

#[test]
fn test_analysis_is_idempotent() {
    let first = analyze_source(DEMO, "predictive.pop").unwrap();
    let second = analyze_source(DEMO, "predictive.pop").unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_diagnostic_format() {
    let error = compile("let x = 1\nlet x = 2\nprint x", "dup.pop", false).unwrap_err();
    let expected = "Line 2, col 5:\n  1 | let x = 1\n> 2 | let x = 2\n    |     ^\n  3 | print x\nIdentifier x already declared";

    assert_eq!(error.to_string(), expected);
}

#[test]
fn test_syntax_errors_surface_from_compile() {
    let error = compile("print 1 % 2", "bad.pop", false).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnrecognisedToken { token: String::from("%") });

    let error = compile("let = 3", "bad.pop", false).unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

fn identifiers(expression: &str) -> Vec<&str> {
    expression
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Checks that no `let` reads the name it is declaring, and that every
/// `yield` sits inside a `function*`.
fn assert_well_scoped(output: &str) {
    let mut generators: Vec<usize> = vec![];

    for line in output.lines() {
        let indent = line.len() - line.trim_start().len();
        let code = line.trim_start();

        if code == "}" && generators.last() == Some(&indent) {
            generators.pop();
        }
        if code.starts_with("function* ") {
            generators.push(indent);
        }
        if code.starts_with("yield ") {
            assert!(!generators.is_empty(), "yield outside a generator: {}", line);
        }

        if let Some(rest) = code.strip_prefix("let ") {
            if let Some((name, initializer)) = rest.split_once(" = ") {
                assert!(!identifiers(initializer).contains(&name), "{} reads itself: {}", name, line);
            }
        }
        if let Some(rest) = code.strip_prefix("for (let ") {
            if let Some((name, header)) = rest.split_once(" = ") {
                let mut clauses = header.split("; ");
                let low = clauses.next().unwrap_or_default();
                let high = clauses
                    .next()
                    .and_then(|clause| clause.strip_prefix(&format!("{} <= ", name)))
                    .unwrap_or_default();
                assert!(!identifiers(low).contains(&name), "{} reads itself: {}", name, line);
                assert!(!identifiers(high).contains(&name), "{} reads itself: {}", name, line);
            }
        }
    }
}

#[test]
fn test_emitted_bindings_are_well_scoped() {
    let sources = [
        DEMO,
        "let x = 1\nfor i in predictive_range(1, 3, prime) {\n  x = x + 1\n  print x\n}\nprint x",
        "let total = 0\ndefine add(n) then\n  total = total + n\n  return total\nprint add(1)",
        "let i = 3\ndefine f() then\n  for i in predictive_range(i, 9, linear) {\n    yield i\n  }",
        "for i in predictive_range(1, 3, prime) {\n  yield i\n}",
        "let s = \"a\"\nfor i in predictive_range(1, 2, linear) {\n  s = s + i\n  for j in predictive_range(1, 2, linear) {\n    s = s + j\n  }\n}",
    ];

    for source in sources {
        for optimize in [false, true] {
            let output = compile(source, "scoped.pop", optimize).unwrap();
            assert_well_scoped(&output);
        }
    }
}

#[test]
fn test_compile_shadowing_and_top_level_yield() {
    let output = compile(
        "let x = 1\nfor i in predictive_range(1, 3, prime) {\n  x = x + 1\n  print x\n}\nprint x",
        "shadow.pop",
        false,
    )
    .unwrap();
    assert!(output.contains("  let x_1 = (x + 1);\n  console.log(x_1);\n"));
    assert!(output.ends_with("console.log(x);\n"));

    let output = compile("for i in predictive_range(1, 3, prime) {\n  yield i\n}", "gen.pop", false).unwrap();
    assert!(output.contains("  console.log(i);\n"));
    assert!(!output.contains("yield"));
}

#[test]
fn test_compile_keyword_argument_call() {
    let source = "define greet(name) then print \"Hello \" + name\ngreet(name=\"Alice\")";
    let output = compile(source, "greet.pop", false).unwrap();
    assert!(output.ends_with("greet(\"Alice\");\n"));

    let error = compile("define greet(name) then print name\ngreet(nombre=\"Alice\")", "greet.pop", false).unwrap_err();
    assert_eq!(error.get_message(), "Identifier nombre not declared");
}
