use crate::analyzer::ir::{FunctionDeclaration, Parameter, PredictiveLoop, Statement};

use super::{
    compiler::Compiler,
    expr::{gen_call, gen_expression},
};

pub fn gen_statement(compiler: &mut Compiler, statement: &Statement) {
    match statement {
        Statement::FunctionDeclaration(declaration) => gen_function(compiler, declaration),
        Statement::VariableDeclaration {
            variable,
            initializer,
        } => {
            // The initializer still sees the bindings from before this one.
            let initializer = gen_expression(compiler, initializer);
            let name = compiler.declare(variable);
            compiler.emit(format!("let {} = {};", name, initializer));
        }
        Statement::VariableReassignment { variable, value } => {
            let value = gen_expression(compiler, value);
            let name = compiler.rebind(variable);
            compiler.emit(format!("{} = {};", name, value));
        }
        Statement::PredictiveLoop(predictive_loop) => gen_predictive_loop(compiler, predictive_loop),
        Statement::ComparisonStatement { left, right } => {
            let line = format!(
                "console.log({} === {});",
                gen_expression(compiler, left),
                gen_expression(compiler, right)
            );
            compiler.emit(line);
        }
        Statement::PrintStatement { expression } => {
            let line = format!("console.log({});", gen_expression(compiler, expression));
            compiler.emit(line);
        }
        Statement::ReturnStatement { expression } => {
            let line = format!("return {};", gen_expression(compiler, expression));
            compiler.emit(line);
        }
        Statement::YieldStatement { expression } => {
            let expression = gen_expression(compiler, expression);
            // A loop outside any function has no generator to yield from;
            // its values are printed instead.
            if compiler.in_function() {
                compiler.emit(format!("yield {};", expression));
            } else {
                compiler.emit(format!("console.log({});", expression));
            }
        }
        Statement::Call(call) => {
            let line = format!("{};", gen_call(compiler, call));
            compiler.emit(line);
        }
    }
}

fn gen_block(compiler: &mut Compiler, statements: &[Statement]) {
    compiler.indent();
    for statement in statements {
        gen_statement(compiler, statement);
    }
    compiler.dedent();
}

/// Emits a function, as a generator (`function*`) when its body yields.
fn gen_function(compiler: &mut Compiler, declaration: &FunctionDeclaration) {
    let parameters: Vec<String> = declaration
        .parameters
        .iter()
        .map(|parameter| gen_parameter(compiler, parameter))
        .collect();
    let star = if contains_yield(&declaration.body) { "*" } else { "" };

    compiler.bind(&declaration.name);
    compiler.emit(format!(
        "function{} {}({}) {{",
        star,
        declaration.name,
        parameters.join(", ")
    ));

    compiler.open_scope();
    for parameter in &declaration.parameters {
        compiler.bind(&parameter.param_name);
    }
    let was_in_function = compiler.set_in_function(true);
    gen_block(compiler, &declaration.body);
    compiler.set_in_function(was_in_function);
    compiler.close_scope();

    compiler.emit("}");
}

fn gen_parameter(compiler: &Compiler, parameter: &Parameter) -> String {
    match &parameter.default_value {
        Some(default) => format!(
            "{} = {}",
            parameter.param_name,
            gen_expression(compiler, default)
        ),
        None => parameter.param_name.clone(),
    }
}

/// The pattern tag is kept as a comment only; the loop counts from low to
/// high inclusive.
fn gen_predictive_loop(compiler: &mut Compiler, predictive_loop: &PredictiveLoop) {
    let low = gen_expression(compiler, &predictive_loop.low);
    let high = gen_expression(compiler, &predictive_loop.high);

    compiler.open_scope();
    let name = compiler.declare(&predictive_loop.iterator);

    compiler.emit(format!("// predictive pattern: {}", predictive_loop.pattern_type));
    compiler.emit(format!(
        "for (let {name} = {low}; {name} <= {high}; {name}++) {{"
    ));
    gen_block(compiler, &predictive_loop.body);
    compiler.emit("}");

    compiler.close_scope();
}

/// Whether a yield occurs in these statements, looking into loops but not
/// into nested functions.
pub fn contains_yield(statements: &[Statement]) -> bool {
    statements.iter().any(|statement| match statement {
        Statement::YieldStatement { .. } => true,
        Statement::PredictiveLoop(predictive_loop) => contains_yield(&predictive_loop.body),
        _ => false,
    })
}
