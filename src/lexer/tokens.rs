use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("define", TokenKind::Define);
        map.insert("then", TokenKind::Then);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("predictive_range", TokenKind::PredictiveRange);
        map.insert("compare", TokenKind::Compare);
        map.insert("to", TokenKind::To);
        map.insert("print", TokenKind::Print);
        map.insert("return", TokenKind::Return);
        map.insert("yield", TokenKind::Yield);
        map.insert("let", TokenKind::Let);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Define,
    Then,
    For,
    In,
    PredictiveRange,
    Compare,
    To,
    Print,
    Return,
    Yield,
    Let,
    True,
    False,
    And,
    Or,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String | TokenKind::Identifier | TokenKind::Number => {
                write!(f, "{} ({})", self.kind, self.value)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
