use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

/// Parses one statement.
///
/// Keyword statements dispatch through the statement lookup. Anything else
/// must be a reassignment (`name = expr`) or a call used as a statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        let handler = *handler;
        return handler(parser);
    }

    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(parser.unexpected_token_detailed("expected a statement"));
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    match expr.kind {
        NodeKind::Identifier if parser.current_token_kind() == TokenKind::Assignment => {
            parser.advance();
            let value = parse_expr(parser, BindingPower::Default)?;
            let span = parser.span_from(&expr.span.start);

            Ok(Node::new(
                NodeKind::VariableReassignment {
                    name: Box::new(expr),
                    value: Box::new(value),
                },
                span,
            ))
        }
        NodeKind::Call { .. } => Ok(expr),
        _ => Err(parser.unexpected_token_detailed("expected a statement")),
    }
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;
    let name = parser.expect_identifier("expected identifier during variable declaration")?;

    parser.expect(TokenKind::Assignment)?;
    let initializer = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::new(
        NodeKind::VariableDeclaration {
            name: Box::new(name),
            initializer: Box::new(initializer),
        },
        parser.span_from(&start),
    ))
}

/// Parses `define name(params) then body`.
///
/// The body has no closing delimiter. It holds every statement that starts
/// on the `then` line or in a column to the right of `define`, and ends at
/// the first statement that does not, at a closing brace, or at end of
/// input. At least one statement is required.
pub fn parse_function_definition_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let define_token = parser.advance();
    let name = parser.expect_identifier("expected function name")?;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        parameters.push(parse_parameter(parser)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let then_token = parser.expect(TokenKind::Then)?;

    let mut body = vec![];
    while parser.has_tokens()
        && parser.current_token_kind() != TokenKind::CloseCurly
        && (parser.current_token().line() == then_token.line()
            || parser.current_token().column() > define_token.column())
    {
        body.push(parse_stmt(parser)?);
    }

    if body.is_empty() {
        return Err(parser.unexpected_token_detailed("expected a function body"));
    }

    Ok(Node::new(
        NodeKind::FunctionDefinition {
            name: Box::new(name),
            parameters,
            body,
        },
        parser.span_from(&define_token.span.start),
    ))
}

fn parse_parameter(parser: &mut Parser) -> Result<Node, Error> {
    let name = parser.expect_identifier("expected parameter name")?;

    let default = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    } else {
        None
    };

    let span = parser.span_from(&name.span.start);
    Ok(Node::new(
        NodeKind::Parameter {
            name: Box::new(name),
            default,
        },
        span,
    ))
}

/// Parses `for name in predictive_range(low, high, pattern) { body }`.
pub fn parse_predictive_loop_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;
    let variable = parser.expect_identifier("expected loop variable")?;

    parser.expect(TokenKind::In)?;
    parser.expect(TokenKind::PredictiveRange)?;
    parser.expect(TokenKind::OpenParen)?;
    let low = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let high = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let pattern = parser.expect_identifier("expected pattern name")?;
    parser.expect(TokenKind::CloseParen)?;

    parser.expect(TokenKind::OpenCurly)?;
    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        body.push(parse_stmt(parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Node::new(
        NodeKind::PredictiveLoop {
            variable: Box::new(variable),
            low: Box::new(low),
            high: Box::new(high),
            pattern: Box::new(pattern),
            body,
        },
        parser.span_from(&start),
    ))
}

pub fn parse_comparison_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start;
    let left = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::To)?;
    let right = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::new(
        NodeKind::ComparisonStatement {
            left: Box::new(left),
            right: Box::new(right),
        },
        parser.span_from(&start),
    ))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let (expression, span) = parse_keyword_and_expr(parser)?;
    Ok(Node::new(NodeKind::PrintStatement(expression), span))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let (expression, span) = parse_keyword_and_expr(parser)?;
    Ok(Node::new(NodeKind::ReturnStatement(expression), span))
}

pub fn parse_yield_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let (expression, span) = parse_keyword_and_expr(parser)?;
    Ok(Node::new(NodeKind::YieldStatement(expression), span))
}

fn parse_keyword_and_expr(parser: &mut Parser) -> Result<(Box<Node>, Span), Error> {
    let start = parser.advance().span.start;
    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok((Box::new(expression), parser.span_from(&start)))
}
