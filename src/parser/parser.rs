//! Parser implementation for building the parse tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, SourceFile, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and the lookup tables for parsing
/// statements and expressions. It tracks the current position in the token
/// stream and provides methods for token consumption.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance over a token stream ending in `EOF`.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    ///
    /// Once the stream is exhausted this keeps returning the `EOF` token.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// Returns the consumed token if the current token matches, otherwise the
    /// given error or a default `UnexpectedToken` error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance());
        }

        match error {
            Some(error) => Err(error),
            None => Err(self.unexpected_token()),
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Consumes an identifier and returns it as an `Identifier` leaf node.
    pub fn expect_identifier(&mut self, message: &str) -> Result<Node, Error> {
        let error = self.unexpected_token_detailed(message);
        let token = self.expect_error(TokenKind::Identifier, Some(error))?;
        Ok(Node::new(NodeKind::Identifier, token.span))
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Binding power of the current token; `Default` when it is not an infix operator.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix tokens get no binding power: statements are not terminated, so
    /// a literal or identifier after a complete expression starts the next
    /// statement instead of continuing the expression.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Returns the end of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        match self.pos {
            0 => self.get_position(),
            pos => self.tokens[pos - 1].span.end.clone(),
        }
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: &Position) -> Span {
        Span {
            start: start.clone(),
            end: self.previous_end(),
        }
    }

    pub fn unexpected_token(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current_token().value.clone(),
            },
            self.get_position(),
        )
    }

    pub fn unexpected_token_detailed(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }
}

/// Parses a stream of tokens into a `Program` parse tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses statements until EOF. The
/// first syntax error aborts parsing.
pub fn parse(tokens: Vec<Token>, file: Rc<SourceFile>) -> Result<Node, Error> {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let mut body = vec![];
    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    Ok(Node::new(
        NodeKind::Program(body),
        Span {
            start: file.position(0),
            end: file.position(file.text.len()),
        },
    ))
}
