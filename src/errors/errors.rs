use thiserror::Error;

use crate::Position;

/// A diagnostic located in the source.
///
/// Displays as the line/column prefix of its position followed by the
/// message of the underlying `ErrorImpl`.
#[derive(Error, Debug, Clone)]
#[error("{prefix}{internal_error}", prefix = .position.line_and_column_message())]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The message without its location prefix.
    pub fn get_message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::ExpectedNumber => "ExpectedNumber",
            ErrorImpl::ExpectedBoolean => "ExpectedBoolean",
            ErrorImpl::ExpectedInteger => "ExpectedInteger",
            ErrorImpl::ExpectedValue { .. } => "ExpectedValue",
            ErrorImpl::YieldOutsideLoop => "YieldOutsideLoop",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::NotCallable => "NotCallable",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::AssignabilityMismatch { .. } => "AssignabilityMismatch",
            ErrorImpl::OperandTypeMismatch => "OperandTypeMismatch",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::UnexpectedNode { .. } => "UnexpectedNode",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexing and parsing
    #[error("Unrecognised token {token}")]
    UnrecognisedToken { token: String },
    #[error("Unexpected token {token}")]
    UnexpectedToken { token: String },
    #[error("Unexpected token {token}, {message}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("Invalid integer literal {token}")]
    NumberParseError { token: String },

    // Analysis
    #[error("Identifier {name} already declared")]
    DuplicateDeclaration { name: String },
    #[error("Identifier {name} not declared")]
    UndeclaredIdentifier { name: String },
    #[error("Expected a number")]
    ExpectedNumber,
    #[error("Expected a boolean")]
    ExpectedBoolean,
    #[error("Expected an integer")]
    ExpectedInteger,
    #[error("Expected a value but {name} is a type")]
    ExpectedValue { name: String },
    #[error("Yield can only appear in a loop")]
    YieldOutsideLoop,
    #[error("Return can only appear in a function")]
    ReturnOutsideFunction,
    #[error("Call of non-function or non-constructor")]
    NotCallable,
    #[error("{required} argument(s) required but {passed} passed")]
    ArgumentCountMismatch { required: usize, passed: usize },
    #[error("Cannot assign a {from} to a {to}")]
    AssignabilityMismatch { from: String, to: String },
    #[error("Operands do not have the same type")]
    OperandTypeMismatch,

    // Internal: reaching these is a bug in the parser or analyzer
    #[error("Invalid binary operator: {operator}")]
    InvalidOperator { operator: String },
    #[error("Unexpected {kind} node")]
    UnexpectedNode { kind: String },
}
