use crate::analyzer::ir::{CallExpression, Callee, Expression};

use super::compiler::Compiler;

/// Generates JavaScript for the given expression.
pub fn gen_expression(compiler: &Compiler, expression: &Expression) -> String {
    match expression {
        Expression::Call(call) => gen_call(compiler, call),
        Expression::Binary(binary) => format!(
            "({} {} {})",
            gen_expression(compiler, &binary.left),
            js_operator(&binary.operator),
            gen_expression(compiler, &binary.right)
        ),
        Expression::BooleanLiteral { value } => value.to_string(),
        Expression::NumberLiteral { value, .. } => value.to_string(),
        Expression::StringLiteral { value, .. } => quote(value),
        Expression::Variable(variable) => compiler.name_of(variable),
        Expression::FunctionReference(function) => function.name.clone(),
    }
}

/// Function calls are plain calls; struct construction uses `new`.
pub fn gen_call(compiler: &Compiler, call: &CallExpression) -> String {
    let arguments: Vec<String> = call
        .arguments
        .iter()
        .map(|argument| gen_expression(compiler, argument))
        .collect();

    match &call.callee {
        Callee::Function(function) => format!("{}({})", function.name, arguments.join(", ")),
        Callee::Struct(structure) => format!("new {}({})", structure.name, arguments.join(", ")),
    }
}

fn js_operator(operator: &str) -> &str {
    match operator {
        "and" => "&&",
        "or" => "||",
        other => other,
    }
}

/// Quotes a string literal. Language strings have no escapes, so every
/// character stands for itself and is escaped here as JavaScript needs.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
