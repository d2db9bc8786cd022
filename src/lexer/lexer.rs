use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, SourceFile, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Called with the text matched by a pattern at the lexer's position.
pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

// Every pattern is anchored; the first one matching at the current position wins.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\"[^\"]*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    file: Rc<SourceFile>,
    pos: usize,
}

impl Lexer {
    pub fn new(file: &Rc<SourceFile>) -> Lexer {
        Lexer {
            tokens: vec![],
            file: Rc::clone(file),
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.file.text[self.pos..].chars().next().unwrap_or('\0')
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.file.text.len()
    }

    /// Span of the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.file.position(self.pos),
            end: self.file.position(self.pos + len),
        }
    }
}

fn number_handler(lexer: &mut Lexer, matched: &str) {
    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched.to_string(), span));
    lexer.advance_n(matched.len());
}

fn skip_handler(lexer: &mut Lexer, matched: &str) {
    lexer.advance_n(matched.len());
}

// String contents are kept raw: no escape sequences exist in the language.
fn string_handler(lexer: &mut Lexer, matched: &str) {
    let span = lexer.span_of(matched.len());
    let contents = matched[1..matched.len() - 1].to_string();

    lexer.push(MK_TOKEN!(TokenKind::String, contents, span));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) {
    let span = lexer.span_of(matched.len());
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, matched.to_string(), span));
    lexer.advance_n(matched.len());
}

pub fn tokenize(file: &Rc<SourceFile>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(file);

    while !lex.at_eof() {
        let remainder = &file.text[lex.pos..];
        let matched = PATTERNS
            .iter()
            .find_map(|pattern| pattern.regex.find(remainder).map(|m| (pattern.handler, m.as_str())));

        match matched {
            Some((handler, text)) => handler(&mut lex, text),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token: lex.at().to_string() },
                    file.position(lex.pos),
                ));
            }
        }
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
