//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer and string literals
//! - Operators and punctuation
//! - Comments
//! - Error cases

use crate::SourceFile;

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    let file = SourceFile::new("test.pop", source);
    tokenize(&file).unwrap().iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "define then for in predictive_range compare to print return yield let true false and or";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Define,
            TokenKind::Then,
            TokenKind::For,
            TokenKind::In,
            TokenKind::PredictiveRange,
            TokenKind::Compare,
            TokenKind::To,
            TokenKind::Print,
            TokenKind::Return,
            TokenKind::Yield,
            TokenKind::Let,
            TokenKind::True,
            TokenKind::False,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let file = SourceFile::new("test.pop", "foo baz_123 _underscore printer prime");
    let tokens = tokenize(&file).unwrap();

    let values: Vec<&str> = tokens[..5].iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "baz_123", "_underscore", "printer", "prime"]);
    assert!(tokens[..5].iter().all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let file = SourceFile::new("test.pop", "42 0 100");
    let tokens = tokenize(&file).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "100");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_are_raw() {
    let file = SourceFile::new("test.pop", r#""hello" "two words" "back\slash""#);
    let tokens = tokenize(&file).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "two words");
    assert_eq!(tokens[2].value, "back\\slash");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators_and_punctuation() {
    assert_eq!(
        kinds("( ) { } , = + - * /"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Comma,
            TokenKind::Assignment,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("let x = 5 // this is a comment\nprint x"),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Print,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_positions() {
    let file = SourceFile::new("test.pop", "let x = 5\n  print x");
    let tokens = tokenize(&file).unwrap();

    assert_eq!((tokens[0].line(), tokens[0].column()), (1, 1));
    assert_eq!((tokens[3].line(), tokens[3].column()), (1, 9));
    assert_eq!((tokens[4].line(), tokens[4].column()), (2, 3));
    assert_eq!(tokens[4].span.source_string(), "print");
}

#[test]
fn test_tokenize_unrecognised_character() {
    let file = SourceFile::new("test.pop", "let x = 5 % 2");
    let error = tokenize(&file).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_message(), "Unrecognised token %");
    assert_eq!(error.get_position().column, 11);
}

#[test]
fn test_tokenize_unterminated_string() {
    let file = SourceFile::new("test.pop", "print \"oops");
    let error = tokenize(&file).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().column, 7);
}
