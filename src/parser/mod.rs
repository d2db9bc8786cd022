//! Parser module for building the parse tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into the parse tree walked by the analyzer. It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Statement parsing (definitions, loops, declarations, print/compare/return/yield)
//! - Expression parsing (binary ops, function calls, literals, grouping)
//! - The offside rule that delimits function bodies
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
