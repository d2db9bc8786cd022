//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl};
use crate::{Position, SourceFile};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_message(), "Unrecognised token @");
}

#[test]
fn test_error_position() {
    let file = SourceFile::new("test.pop", "let x = 1\nprint y");
    let error = Error::new(
        ErrorImpl::UndeclaredIdentifier {
            name: "y".to_string(),
        },
        file.position(16),
    );

    assert_eq!(error.get_position().offset, 16);
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 7);
}

#[test]
fn test_error_display_has_location_prefix() {
    let file = SourceFile::new("test.pop", "print y");
    let error = Error::new(
        ErrorImpl::UndeclaredIdentifier {
            name: "y".to_string(),
        },
        file.position(6),
    );

    let rendered = error.to_string();
    assert!(rendered.starts_with("Line 1, col 7:\n"));
    assert!(rendered.ends_with("Identifier y not declared"));
}

#[test]
fn test_declaration_messages() {
    let duplicate = ErrorImpl::DuplicateDeclaration {
        name: "x".to_string(),
    };
    assert_eq!(duplicate.to_string(), "Identifier x already declared");

    let undeclared = ErrorImpl::UndeclaredIdentifier {
        name: "greet".to_string(),
    };
    assert_eq!(undeclared.to_string(), "Identifier greet not declared");
}

#[test]
fn test_argument_count_message() {
    let error = ErrorImpl::ArgumentCountMismatch {
        required: 1,
        passed: 0,
    };

    assert_eq!(error.to_string(), "1 argument(s) required but 0 passed");
}

#[test]
fn test_assignability_message() {
    let error = ErrorImpl::AssignabilityMismatch {
        from: "string".to_string(),
        to: "int".to_string(),
    };

    assert_eq!(error.to_string(), "Cannot assign a string to a int");
}

#[test]
fn test_context_messages() {
    assert_eq!(
        ErrorImpl::ReturnOutsideFunction.to_string(),
        "Return can only appear in a function"
    );
    assert_eq!(
        ErrorImpl::YieldOutsideLoop.to_string(),
        "Yield can only appear in a loop"
    );
    assert_eq!(
        ErrorImpl::NotCallable.to_string(),
        "Call of non-function or non-constructor"
    );
}

#[test]
fn test_error_names() {
    let cases = vec![
        (ErrorImpl::ExpectedNumber, "ExpectedNumber"),
        (ErrorImpl::ExpectedBoolean, "ExpectedBoolean"),
        (ErrorImpl::ExpectedInteger, "ExpectedInteger"),
        (ErrorImpl::OperandTypeMismatch, "OperandTypeMismatch"),
        (
            ErrorImpl::InvalidOperator {
                operator: "%".to_string(),
            },
            "InvalidOperator",
        ),
    ];

    for (error_impl, name) in cases {
        let error = Error::new(error_impl, Position::null());
        assert_eq!(error.get_error_name(), name);
    }
}
