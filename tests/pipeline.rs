//! End-to-end checks over complete programs

use pretty_assertions::assert_eq;

use rustica::check_source;
use rustica::feedback::CheckReport;
use rustica::types::Type;
use rustica::utils::{SemanticErrorKind, SyntaxError};

fn semantic_messages(source: &str) -> Vec<String> {
    let outcome = check_source(source);
    assert!(outcome.syntax_errors.is_empty(), "{:?}", outcome.syntax_errors);
    outcome
        .analysis
        .expect("analysis runs when parsing succeeds")
        .diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect()
}

#[test]
fn calculator_is_clean() {
    let outcome = check_source(include_str!("fixtures/calculator.rs"));
    assert!(outcome.is_ok(), "{:?}", outcome);

    let analysis = outcome.analysis.unwrap();
    let names: Vec<&str> = analysis.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["sumar", "restar", "multiplicar", "dividir", "main"]);
    assert_eq!(analysis.functions[4].ret, None);

    let div = analysis.symbols.iter().find(|s| s.name == "div_result").unwrap();
    assert_eq!(div.ty, Type::I32);
    assert!(!div.mutable);
}

#[test]
fn full_tour_is_clean() {
    let outcome = check_source(include_str!("fixtures/full_tour.rs"));
    assert!(outcome.is_ok(), "{:?}", outcome.analysis);

    let analysis = outcome.analysis.unwrap();
    let ty_of = |name: &str| analysis.symbols.iter().find(|s| s.name == name).map(|s| s.ty.clone());
    assert_eq!(ty_of("y"), Some(Type::F64));
    assert_eq!(ty_of("single"), Some(Type::Char));
    assert_eq!(ty_of("name"), Some(Type::Str));
    assert_eq!(ty_of("v"), Some(Type::Vec(Box::new(Type::I32))));
    assert_eq!(ty_of("arr"), Some(Type::Array { elem: Box::new(Type::I32), size: 3 }));
}

#[test]
fn syntax_error_in_nested_condition_reported_once() {
    let outcome = check_source(include_str!("fixtures/syntax_errors.rs"));

    // `if x !== 100 {` fails at the second `=`; its body and the closing
    // braces after it still line up
    assert_eq!(
        outcome.syntax_errors,
        vec![SyntaxError::UnexpectedToken { value: "=".to_string(), line: 49, column: 16 }]
    );
    assert!(outcome.analysis.is_none());
    assert_eq!(outcome.diagnostic_count(), 1);
}

#[test]
fn condition_errors_do_not_leak_braces() {
    let outcome = check_source("if a + { let y = 1; }\nlet b = ;\n");
    assert_eq!(
        outcome.syntax_errors,
        vec![
            SyntaxError::UnexpectedToken { value: "{".to_string(), line: 1, column: 8 },
            SyntaxError::UnexpectedToken { value: ";".to_string(), line: 2, column: 9 },
        ]
    );
}

#[test]
fn indexed_writes_initialize_the_binding() {
    let outcome = check_source("let v: [i32; 2];\nv[0] = 1;\nv[1] = 2;");
    let analysis = outcome.analysis.unwrap();
    assert_eq!(
        analysis.diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
        vec!["line 3: cannot assign twice to immutable variable 'v'"]
    );
    assert!(analysis.symbols[0].initialized);
}

#[test]
fn overflowing_literal_is_rejected() {
    let outcome = check_source("let big = 99999999999999999999;");
    assert_eq!(
        outcome.syntax_errors,
        vec![SyntaxError::UnexpectedToken {
            value: "99999999999999999999".to_string(),
            line: 1,
            column: 11
        }]
    );
}

#[test]
fn semantic_errors_first_program() {
    let messages = semantic_messages(include_str!("fixtures/semantic_errors_a.rs"));
    assert_eq!(
        messages,
        vec![
            "line 5: variable 'x' is not declared",
            "line 9: cannot assign twice to immutable variable 'y'",
            "line 12: type mismatch in declaration of 'edad': expected 'i32', found 'bool'",
            "line 15: variable 'z' is not declared",
            "line 20: function 'sumar' is not declared",
            "line 23: type mismatch in elements of array literal: expected 'i32', found 'f64'",
            "line 27: type mismatch in condition of 'if': expected 'bool', found 'i32'",
            "line 33: index into 'datos' must be 'i32', found 'f64'",
            "line 43: function 'multiplicar' expects 2 argument(s), found 1",
            "line 46: type mismatch in argument 1 of 'multiplicar': expected 'i32', found 'String'",
            "line 50: 'return' outside of a function",
            "line 54: 'break' outside of a loop",
            "line 59: type mismatch in return value of 'division': expected 'i32', found 'f64'",
            "line 63: function 'resta' is missing a return statement",
        ]
    );
}

#[test]
fn semantic_errors_second_program() {
    let outcome = check_source(include_str!("fixtures/semantic_errors_b.rs"));
    let analysis = outcome.analysis.unwrap();

    let found: Vec<(usize, SemanticErrorKind)> =
        analysis.diagnostics.iter().map(|d| (d.line(), d.kind())).collect();
    assert_eq!(
        found,
        vec![
            (5, SemanticErrorKind::UndeclaredUse),
            (9, SemanticErrorKind::ImmutableAssignment),
            (12, SemanticErrorKind::TypeMismatch),
            (16, SemanticErrorKind::TypeMismatch),
            (21, SemanticErrorKind::UndeclaredUse),
            (24, SemanticErrorKind::TypeMismatch),
            (28, SemanticErrorKind::IndexTypeError),
            (31, SemanticErrorKind::InvalidControlFlow),
            (44, SemanticErrorKind::ArityMismatch),
            (49, SemanticErrorKind::TypeMismatch),
        ]
    );
}

#[test]
fn redeclaration_reported_once() {
    assert_eq!(
        semantic_messages("let a = 1;\nlet b = 2;\nlet a = 3;"),
        vec!["line 3: variable 'a' is already declared in this scope"]
    );
}

#[test]
fn two_syntax_errors_skip_semantics() {
    let outcome = check_source("let a = 1 +;\nbreak;\nlet b = (2;\n");
    assert_eq!(outcome.syntax_errors.len(), 2);
    assert_eq!(outcome.syntax_errors[0].line(), Some(1));
    assert_eq!(outcome.syntax_errors[1].line(), Some(3));
    // `break;` would be a semantic error, but analysis never runs
    assert!(outcome.analysis.is_none());
}

#[test]
fn end_of_input_reported_once() {
    let outcome = check_source("fn main() {\n    let x = 1;\n    while x < 3 {\n");
    assert_eq!(outcome.syntax_errors, vec![SyntaxError::UnexpectedEof]);
    assert_eq!(
        outcome.syntax_errors[0].to_string(),
        "syntax error: unexpected end of input"
    );
}

#[test]
fn report_serializes_both_phases() {
    let outcome = check_source(include_str!("fixtures/semantic_errors_b.rs"));
    let report = CheckReport::new("semantic_errors_b.rs", &outcome);
    assert!(!report.success);
    assert_eq!(report.semantic_errors.len(), 10);

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["source_file"], "semantic_errors_b.rs");
    assert_eq!(value["semantic_errors"][7]["message"], "line 31: 'break' outside of a loop");
    assert_eq!(value["functions"][1]["name"], "sumar");
    assert_eq!(value["functions"][1]["params"][0], "i32");
}
