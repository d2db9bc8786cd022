use std::collections::HashMap;

use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Logical,
    Additive,
    Multiplicative,
    Call,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type LEDHandler = fn(&mut Parser, Node, BindingPower) -> Result<Node, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led(TokenKind::And, BindingPower::Logical, parse_binary_expr);
    parser.led(TokenKind::Or, BindingPower::Logical, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Define, parse_function_definition_stmt);
    parser.stmt(TokenKind::For, parse_predictive_loop_stmt);
    parser.stmt(TokenKind::Compare, parse_comparison_stmt);
    parser.stmt(TokenKind::Print, parse_print_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Yield, parse_yield_stmt);
    parser.stmt(TokenKind::Let, parse_var_decl_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
