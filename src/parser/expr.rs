use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected_token()),
    };

    let mut left = nud(parser)?;

    // While the next infix operator binds tighter than the caller, keep extending lhs
    while parser.current_binding_power() > bp {
        let operator_bp = parser.current_binding_power();
        let led = match parser.get_led_lookup().get(&parser.current_token_kind()) {
            Some(led) => *led,
            None => return Err(parser.unexpected_token()),
        };

        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let kind = match parser.current_token_kind() {
        TokenKind::Number => {
            if parser.current_token().value.parse::<i64>().is_err() {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ));
            }
            NodeKind::Number
        }
        TokenKind::String => NodeKind::Str,
        TokenKind::Identifier => NodeKind::Identifier,
        TokenKind::True => NodeKind::True,
        TokenKind::False => NodeKind::False,
        _ => return Err(parser.unexpected_token()),
    };

    Ok(Node::new(kind, parser.advance().span))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, bp: BindingPower) -> Result<Node, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    Ok(Node::new(
        NodeKind::Binary {
            operator: Box::new(Node::new(NodeKind::Operator, operator_token.span)),
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Node::new(
        NodeKind::Parenthesized(Box::new(expr)),
        parser.span_from(&start),
    ))
}

/// Parses the argument list following a callee.
///
/// Only a bare name can be called; anything else in callee position is a
/// syntax error reported at the opening parenthesis. An argument may name
/// its parameter, as in `greet(name = "Alice")`.
pub fn parse_call_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    if !matches!(left.kind, NodeKind::Identifier) {
        return Err(parser.unexpected_token_detailed("only a name can be called"));
    }

    parser.advance();

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_argument(parser)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let span = parser.span_from(&left.span.start);
    Ok(Node::new(
        NodeKind::Call {
            callee: Box::new(left),
            arguments,
        },
        span,
    ))
}

fn parse_argument(parser: &mut Parser) -> Result<Node, Error> {
    let expr = parse_expr(parser, BindingPower::Default)?;
    if !matches!(expr.kind, NodeKind::Identifier)
        || parser.current_token_kind() != TokenKind::Assignment
    {
        return Ok(expr);
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;

    let span = parser.span_from(&expr.span.start);
    Ok(Node::new(
        NodeKind::KeywordArgument {
            name: Box::new(expr),
            value: Box::new(value),
        },
        span,
    ))
}
