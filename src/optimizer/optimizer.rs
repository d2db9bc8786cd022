use std::rc::Rc;

use tracing::trace;

use crate::analyzer::{
    ir::{
        BinaryExpression, CallExpression, Expression, FunctionDeclaration, Parameter,
        PredictiveLoop, Program, Statement,
    },
    types::Type,
};

/// Folds constants throughout a program.
///
/// Function declarations get a freshly built body, which is attached to
/// their function entity in place of the analyzed one.
pub fn optimize(program: Program) -> Program {
    Program {
        statements: optimize_statements(program.statements),
    }
}

fn optimize_statements(statements: Vec<Statement>) -> Vec<Statement> {
    statements.into_iter().map(optimize_statement).collect()
}

pub fn optimize_statement(statement: Statement) -> Statement {
    match statement {
        Statement::FunctionDeclaration(declaration) => {
            let body = Rc::new(optimize_statements(declaration.body.iter().cloned().collect()));
            declaration.function.attach_body(&body);

            Statement::FunctionDeclaration(FunctionDeclaration {
                name: declaration.name,
                parameters: declaration
                    .parameters
                    .into_iter()
                    .map(optimize_parameter)
                    .collect(),
                body,
                function: declaration.function,
            })
        }
        Statement::VariableDeclaration {
            variable,
            initializer,
        } => Statement::VariableDeclaration {
            variable,
            initializer: optimize_expression(initializer),
        },
        Statement::VariableReassignment { variable, value } => Statement::VariableReassignment {
            variable,
            value: optimize_expression(value),
        },
        Statement::PredictiveLoop(predictive_loop) => Statement::PredictiveLoop(PredictiveLoop {
            iterator: predictive_loop.iterator,
            low: optimize_expression(predictive_loop.low),
            high: optimize_expression(predictive_loop.high),
            pattern_type: predictive_loop.pattern_type,
            body: optimize_statements(predictive_loop.body),
        }),
        Statement::ComparisonStatement { left, right } => Statement::ComparisonStatement {
            left: optimize_expression(left),
            right: optimize_expression(right),
        },
        Statement::PrintStatement { expression } => Statement::PrintStatement {
            expression: optimize_expression(expression),
        },
        Statement::ReturnStatement { expression } => Statement::ReturnStatement {
            expression: optimize_expression(expression),
        },
        Statement::YieldStatement { expression } => Statement::YieldStatement {
            expression: optimize_expression(expression),
        },
        Statement::Call(call) => Statement::Call(optimize_call(call)),
    }
}

fn optimize_parameter(parameter: Parameter) -> Parameter {
    Parameter {
        param_name: parameter.param_name,
        default_value: parameter.default_value.map(optimize_expression),
    }
}

fn optimize_call(call: CallExpression) -> CallExpression {
    CallExpression {
        callee: call.callee,
        arguments: call.arguments.into_iter().map(optimize_expression).collect(),
        ty: call.ty,
    }
}

pub fn optimize_expression(expression: Expression) -> Expression {
    match expression {
        Expression::Call(call) => Expression::Call(optimize_call(call)),
        Expression::Binary(binary) => {
            let left = optimize_expression(*binary.left);
            let right = optimize_expression(*binary.right);

            match fold(&binary.operator, &left, &right) {
                Some(folded) => {
                    trace!(operator = %binary.operator, "folded constant");
                    folded
                }
                None => Expression::Binary(BinaryExpression {
                    operator: binary.operator,
                    left: Box::new(left),
                    right: Box::new(right),
                    ty: binary.ty,
                }),
            }
        }
        literal_or_reference => literal_or_reference,
    }
}

/// The constant value of `left operator right`, when both sides are
/// literals and the result is representable.
///
/// Division only folds when it is exact: the emitted code divides real
/// numbers, so `7 / 2` must stay as it is.
fn fold(operator: &str, left: &Expression, right: &Expression) -> Option<Expression> {
    match (left, right) {
        (
            Expression::NumberLiteral { value: a, .. },
            Expression::NumberLiteral { value: b, .. },
        ) => {
            let value = match operator {
                "+" => a.checked_add(*b),
                "-" => a.checked_sub(*b),
                "*" => a.checked_mul(*b),
                "/" if *b != 0 && a.checked_rem(*b) == Some(0) => a.checked_div(*b),
                _ => None,
            }?;

            Some(Expression::NumberLiteral { value, ty: Type::Int })
        }
        (
            Expression::StringLiteral { value: a, .. },
            Expression::StringLiteral { value: b, .. },
        ) if operator == "+" => Some(Expression::StringLiteral {
            value: format!("{}{}", a, b),
            ty: Type::String,
        }),
        (Expression::BooleanLiteral { value: a }, Expression::BooleanLiteral { value: b }) => {
            match operator {
                "and" => Some(Expression::BooleanLiteral { value: *a && *b }),
                "or" => Some(Expression::BooleanLiteral { value: *a || *b }),
                _ => None,
            }
        }
        _ => None,
    }
}
