use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    context::{Context, ScopeOverrides},
    ir::{
        BinaryExpression, CallExpression, Callee, Entity, Expression, Function,
        FunctionDeclaration, Parameter, PredictiveLoop, Program, Statement, Variable,
    },
    types::{assignable, describe, equivalent, Type},
};

/// The single gate for semantic errors: fails with `error`, located at the
/// start of `at`, unless `condition` holds.
pub fn must(condition: bool, error: ErrorImpl, at: &Node) -> Result<(), Error> {
    if condition {
        Ok(())
    } else {
        Err(Error::new(error, at.span.start.clone()))
    }
}

fn unexpected_node(node: &Node) -> Error {
    Error::new(
        ErrorImpl::UnexpectedNode {
            kind: node.kind.to_string(),
        },
        node.span.start.clone(),
    )
}

/// Walks a parse tree, enforcing the language rules and building the IR.
///
/// Each rule validates and builds in one step. A failed rule returns the
/// error immediately and leaves the context wherever it was; an analyzer
/// that failed should be dropped.
#[derive(Debug, Default)]
pub struct Analyzer {
    pub context: Context,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            context: Context::root(),
        }
    }

    pub fn analyze_program(&mut self, node: &Node) -> Result<Program, Error> {
        match &node.kind {
            NodeKind::Program(statements) => Ok(Program {
                statements: self.analyze_statements(statements)?,
            }),
            _ => Err(unexpected_node(node)),
        }
    }

    fn analyze_statements(&mut self, statements: &[Node]) -> Result<Vec<Statement>, Error> {
        statements
            .iter()
            .map(|statement| self.analyze_statement(statement))
            .collect()
    }

    pub fn analyze_statement(&mut self, node: &Node) -> Result<Statement, Error> {
        trace!(kind = %node.kind, "analyzing statement");

        match &node.kind {
            NodeKind::FunctionDefinition { name, parameters, body } => {
                self.analyze_function_definition(name, parameters, body)
            }
            NodeKind::PredictiveLoop { variable, low, high, pattern, body } => {
                self.analyze_predictive_loop(variable, low, high, pattern, body)
            }
            NodeKind::ComparisonStatement { left, right } => {
                self.analyze_comparison(left, right)
            }
            NodeKind::PrintStatement(expression) => Ok(Statement::PrintStatement {
                expression: self.analyze_expression(expression)?,
            }),
            NodeKind::ReturnStatement(expression) => self.analyze_return(node, expression),
            NodeKind::YieldStatement(expression) => self.analyze_yield(node, expression),
            NodeKind::VariableDeclaration { name, initializer } => {
                self.analyze_variable_declaration(name, initializer)
            }
            NodeKind::VariableReassignment { name, value } => {
                self.analyze_variable_reassignment(name, value)
            }
            NodeKind::Call { callee, arguments } => {
                Ok(Statement::Call(self.analyze_call(node, callee, arguments)?))
            }
            NodeKind::Program(_)
            | NodeKind::Parameter { .. }
            | NodeKind::KeywordArgument { .. }
            | NodeKind::Binary { .. }
            | NodeKind::Parenthesized(_)
            | NodeKind::Number
            | NodeKind::Str
            | NodeKind::True
            | NodeKind::False
            | NodeKind::Identifier
            | NodeKind::Operator => Err(unexpected_node(node)),
        }
    }

    pub fn analyze_expression(&mut self, node: &Node) -> Result<Expression, Error> {
        trace!(kind = %node.kind, "analyzing expression");

        match &node.kind {
            NodeKind::Call { callee, arguments } => {
                Ok(Expression::Call(self.analyze_call(node, callee, arguments)?))
            }
            NodeKind::Binary { left, operator, right } => {
                self.analyze_binary(left, operator, right)
            }
            NodeKind::Parenthesized(expression) => self.analyze_expression(expression),
            NodeKind::Number => {
                let value = node.source_string().parse::<i64>().map_err(|_| {
                    Error::new(
                        ErrorImpl::NumberParseError {
                            token: String::from(node.source_string()),
                        },
                        node.span.start.clone(),
                    )
                })?;

                Ok(Expression::NumberLiteral { value, ty: Type::Int })
            }
            NodeKind::Str => {
                let text = node.source_string();
                let value = text
                    .strip_prefix('"')
                    .and_then(|text| text.strip_suffix('"'))
                    .unwrap_or(text);

                Ok(Expression::StringLiteral {
                    value: String::from(value),
                    ty: Type::String,
                })
            }
            NodeKind::True => Ok(Expression::BooleanLiteral { value: true }),
            NodeKind::False => Ok(Expression::BooleanLiteral { value: false }),
            NodeKind::Identifier => self.analyze_identifier(node),
            NodeKind::Program(_)
            | NodeKind::FunctionDefinition { .. }
            | NodeKind::PredictiveLoop { .. }
            | NodeKind::ComparisonStatement { .. }
            | NodeKind::PrintStatement(_)
            | NodeKind::ReturnStatement(_)
            | NodeKind::YieldStatement(_)
            | NodeKind::VariableDeclaration { .. }
            | NodeKind::VariableReassignment { .. }
            | NodeKind::Parameter { .. }
            | NodeKind::KeywordArgument { .. }
            | NodeKind::Operator => Err(unexpected_node(node)),
        }
    }

    fn must_not_already_be_declared(&self, name: &Node) -> Result<(), Error> {
        let identifier = name.source_string();
        must(
            self.context.lookup_local(identifier).is_none(),
            ErrorImpl::DuplicateDeclaration {
                name: String::from(identifier),
            },
            name,
        )
    }

    fn resolve(&self, name: &Node) -> Result<Entity, Error> {
        let identifier = name.source_string();
        self.context.lookup(identifier).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::UndeclaredIdentifier {
                    name: String::from(identifier),
                },
                name.span.start.clone(),
            )
        })
    }

    /// `define name(params) then body`
    ///
    /// The function is bound before its body is analyzed, so the body can
    /// call it. Parameter defaults are analyzed in the enclosing scope.
    pub fn analyze_function_definition(
        &mut self,
        name: &Node,
        parameters: &[Node],
        body: &[Node],
    ) -> Result<Statement, Error> {
        self.must_not_already_be_declared(name)?;

        let parameters = parameters
            .iter()
            .map(|parameter| self.analyze_parameter(parameter))
            .collect::<Result<Vec<_>, _>>()?;

        let function = Function::new(name.source_string(), parameters.clone());
        self.context
            .add(name.source_string(), Entity::Function(Rc::clone(&function)));
        debug!(name = %function.name, params = ?function.param_names(), "declared function");

        self.context.new_child(ScopeOverrides {
            in_loop: Some(false),
            function: Some(Rc::clone(&function)),
        });
        for parameter in &parameters {
            self.context.add(
                &parameter.param_name,
                Entity::Variable(Variable::new(&parameter.param_name, parameter.ty())),
            );
        }
        let body = self.analyze_statements(body)?;
        self.context.pop();

        let body = Rc::new(body);
        function.attach_body(&body);

        Ok(Statement::FunctionDeclaration(FunctionDeclaration {
            name: function.name.clone(),
            parameters,
            body,
            function,
        }))
    }

    pub fn analyze_parameter(&mut self, node: &Node) -> Result<Parameter, Error> {
        match &node.kind {
            NodeKind::Parameter { name, default } => Ok(Parameter {
                param_name: String::from(name.source_string()),
                default_value: match default {
                    Some(default) => Some(self.analyze_expression(default)?),
                    None => None,
                },
            }),
            _ => Err(unexpected_node(node)),
        }
    }

    /// `for variable in predictive_range(low, high, pattern) { body }`
    pub fn analyze_predictive_loop(
        &mut self,
        variable: &Node,
        low: &Node,
        high: &Node,
        pattern: &Node,
        body: &[Node],
    ) -> Result<Statement, Error> {
        self.must_not_already_be_declared(variable)?;

        let low_expression = self.analyze_expression(low)?;
        let high_expression = self.analyze_expression(high)?;
        must(low_expression.ty() == Some(Type::Int), ErrorImpl::ExpectedInteger, low)?;
        must(high_expression.ty() == Some(Type::Int), ErrorImpl::ExpectedInteger, high)?;

        let iterator = Variable::new(variable.source_string(), Some(Type::Int));

        self.context.new_child(ScopeOverrides {
            in_loop: Some(true),
            function: None,
        });
        self.context
            .add(&iterator.name, Entity::Variable(Rc::clone(&iterator)));
        let body = self.analyze_statements(body)?;
        self.context.pop();

        Ok(Statement::PredictiveLoop(PredictiveLoop {
            iterator,
            low: low_expression,
            high: high_expression,
            pattern_type: String::from(pattern.source_string()),
            body,
        }))
    }

    /// `compare left to right`: operands of known type must be equivalent.
    pub fn analyze_comparison(&mut self, left: &Node, right: &Node) -> Result<Statement, Error> {
        let left_expression = self.analyze_expression(left)?;
        let right_expression = self.analyze_expression(right)?;

        if let (Some(left_type), Some(right_type)) = (left_expression.ty(), right_expression.ty()) {
            must(
                equivalent(&left_type, &right_type),
                ErrorImpl::OperandTypeMismatch,
                right,
            )?;
        }

        Ok(Statement::ComparisonStatement {
            left: left_expression,
            right: right_expression,
        })
    }

    pub fn analyze_return(&mut self, node: &Node, expression: &Node) -> Result<Statement, Error> {
        let expression = self.analyze_expression(expression)?;
        must(
            self.context.function().is_some(),
            ErrorImpl::ReturnOutsideFunction,
            node,
        )?;

        Ok(Statement::ReturnStatement { expression })
    }

    pub fn analyze_yield(&mut self, node: &Node, expression: &Node) -> Result<Statement, Error> {
        let expression = self.analyze_expression(expression)?;
        must(self.context.in_loop(), ErrorImpl::YieldOutsideLoop, node)?;

        Ok(Statement::YieldStatement { expression })
    }

    /// `let name = initializer`
    ///
    /// The initializer is analyzed before the name is bound, so it cannot
    /// refer to the variable it declares.
    pub fn analyze_variable_declaration(
        &mut self,
        name: &Node,
        initializer: &Node,
    ) -> Result<Statement, Error> {
        self.must_not_already_be_declared(name)?;

        let initializer = self.analyze_expression(initializer)?;
        let variable = Variable::new(name.source_string(), initializer.ty());
        self.context
            .add(&variable.name, Entity::Variable(Rc::clone(&variable)));

        Ok(Statement::VariableDeclaration {
            variable,
            initializer,
        })
    }

    /// `name = value`
    ///
    /// Needs no prior declaration. The name is always rebound in the current
    /// scope to a fresh variable typed by the new value. When the current
    /// scope already bound it to a value this is a reassignment, otherwise
    /// it declares a new (possibly shadowing) variable.
    pub fn analyze_variable_reassignment(
        &mut self,
        name: &Node,
        value: &Node,
    ) -> Result<Statement, Error> {
        let value = self.analyze_expression(value)?;
        let rebinds = matches!(
            self.context.lookup_local(name.source_string()),
            Some(Entity::Variable(_)) | Some(Entity::Function(_))
        );

        let variable = Variable::new(name.source_string(), value.ty());
        self.context
            .add(&variable.name, Entity::Variable(Rc::clone(&variable)));

        if rebinds {
            Ok(Statement::VariableReassignment { variable, value })
        } else {
            Ok(Statement::VariableDeclaration {
                variable,
                initializer: value,
            })
        }
    }

    /// `callee(arguments)`
    ///
    /// Functions take exactly as many arguments as they have parameters
    /// without defaults, and each argument must be assignable to the type of
    /// its parameter when both are known. An argument given as `name = value`
    /// is checked against the parameter it names, which must exist; the rest
    /// pair with parameters by position. Struct types construct values of
    /// themselves.
    pub fn analyze_call(
        &mut self,
        node: &Node,
        callee: &Node,
        arguments: &[Node],
    ) -> Result<CallExpression, Error> {
        let entity = self.resolve(callee)?;
        must(entity.is_callable(), ErrorImpl::NotCallable, callee)?;

        let mut argument_expressions = Vec::with_capacity(arguments.len());
        let mut keywords = Vec::with_capacity(arguments.len());
        for argument in arguments {
            match &argument.kind {
                NodeKind::KeywordArgument { name, value } => {
                    argument_expressions.push(self.analyze_expression(value)?);
                    keywords.push(Some(&**name));
                }
                _ => {
                    argument_expressions.push(self.analyze_expression(argument)?);
                    keywords.push(None);
                }
            }
        }

        match entity {
            Entity::Function(function) => {
                must(
                    argument_expressions.len() == function.required_count(),
                    ErrorImpl::ArgumentCountMismatch {
                        required: function.required_count(),
                        passed: argument_expressions.len(),
                    },
                    node,
                )?;

                for (index, ((argument, expression), keyword)) in arguments
                    .iter()
                    .zip(&argument_expressions)
                    .zip(&keywords)
                    .enumerate()
                {
                    let parameter = match keyword {
                        Some(name) => {
                            let parameter = function
                                .parameters
                                .iter()
                                .find(|parameter| parameter.param_name == name.source_string());
                            must(
                                parameter.is_some(),
                                ErrorImpl::UndeclaredIdentifier {
                                    name: String::from(name.source_string()),
                                },
                                name,
                            )?;
                            parameter
                        }
                        None => function.parameters.get(index),
                    };

                    if let (Some(from), Some(to)) =
                        (expression.ty(), parameter.and_then(Parameter::ty))
                    {
                        must(
                            assignable(&from, &to),
                            ErrorImpl::AssignabilityMismatch {
                                from: describe(&from),
                                to: describe(&to),
                            },
                            argument,
                        )?;
                    }
                }

                Ok(CallExpression {
                    ty: function.return_type.clone(),
                    callee: Callee::Function(function),
                    arguments: argument_expressions,
                })
            }
            Entity::Type(Type::Struct(structure)) => Ok(CallExpression {
                ty: Some(Type::Struct(Rc::clone(&structure))),
                callee: Callee::Struct(structure),
                arguments: argument_expressions,
            }),
            Entity::Variable(_) | Entity::Type(_) => Err(Error::new(
                ErrorImpl::NotCallable,
                callee.span.start.clone(),
            )),
        }
    }

    /// Arithmetic and logical operators.
    ///
    /// `+` with a string on either side is concatenation and yields a
    /// string. Other arithmetic needs numeric operands and yields an int,
    /// unless an operand's type is unknown, in which case nothing is checked
    /// and the result type is unknown too. `and`/`or` need booleans.
    pub fn analyze_binary(
        &mut self,
        left: &Node,
        operator: &Node,
        right: &Node,
    ) -> Result<Expression, Error> {
        let left_expression = self.analyze_expression(left)?;
        let right_expression = self.analyze_expression(right)?;
        let left_type = left_expression.ty();
        let right_type = right_expression.ty();
        let op = operator.source_string();

        let ty = match op {
            "+" if left_type == Some(Type::String) || right_type == Some(Type::String) => {
                Some(Type::String)
            }
            "+" | "-" | "*" | "/" => match (&left_type, &right_type) {
                (Some(left_type), Some(right_type)) => {
                    must(left_type.is_numeric(), ErrorImpl::ExpectedNumber, left)?;
                    must(right_type.is_numeric(), ErrorImpl::ExpectedNumber, right)?;
                    Some(Type::Int)
                }
                _ => None,
            },
            "and" | "or" => {
                must(left_type == Some(Type::Bool), ErrorImpl::ExpectedBoolean, left)?;
                must(right_type == Some(Type::Bool), ErrorImpl::ExpectedBoolean, right)?;
                Some(Type::Bool)
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::InvalidOperator {
                        operator: String::from(op),
                    },
                    operator.span.start.clone(),
                ))
            }
        };

        Ok(Expression::Binary(BinaryExpression {
            operator: String::from(op),
            left: Box::new(left_expression),
            right: Box::new(right_expression),
            ty,
        }))
    }

    /// A name used as a value: variables are referenced directly, functions
    /// become function references, and type names are rejected.
    pub fn analyze_identifier(&mut self, node: &Node) -> Result<Expression, Error> {
        match self.resolve(node)? {
            Entity::Variable(variable) => Ok(Expression::Variable(variable)),
            Entity::Function(function) => Ok(Expression::FunctionReference(function)),
            Entity::Type(_) => Err(Error::new(
                ErrorImpl::ExpectedValue {
                    name: String::from(node.source_string()),
                },
                node.span.start.clone(),
            )),
        }
    }
}

/// Analyzes a whole program with a fresh root context.
pub fn analyze(tree: &Node) -> Result<Program, Error> {
    Analyzer::new().analyze_program(tree)
}
