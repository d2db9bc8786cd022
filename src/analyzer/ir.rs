//! The typed intermediate representation produced by analysis.
//!
//! Statements and expressions own their children. Entities are shared:
//! every reference to a variable holds the same `Rc<Variable>` as its
//! declaration, so "all uses of x" is a pointer comparison.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use super::types::{StructType, Type};

/// A declared variable. `ty` is `None` when the type could not be
/// determined statically, as for a parameter without a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub ty: Option<Type>,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: Option<Type>) -> Rc<Self> {
        Rc::new(Variable {
            name: name.into(),
            ty,
        })
    }
}

/// A function parameter; one without a default value is required.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub param_name: String,
    pub default_value: Option<Expression>,
}

impl Parameter {
    pub fn is_required(&self) -> bool {
        self.default_value.is_none()
    }

    /// The type of the default value, if there is one and it is known.
    pub fn ty(&self) -> Option<Type> {
        self.default_value.as_ref().and_then(Expression::ty)
    }
}

/// A declared function.
///
/// The entity is bound before its body is analyzed so the body can call it;
/// the body is attached once analysis of it completes. The entity only
/// keeps a weak handle to the body, which is owned by the declaration;
/// passes that rebuild the body attach the new one.
#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    body: RefCell<Weak<Vec<Statement>>>,
}

impl Function {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Rc<Self> {
        Rc::new(Function {
            name: name.into(),
            parameters,
            return_type: None,
            body: RefCell::new(Weak::new()),
        })
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .map(|parameter| parameter.param_name.as_str())
            .collect()
    }

    pub fn required_count(&self) -> usize {
        self.parameters
            .iter()
            .filter(|parameter| parameter.is_required())
            .count()
    }

    /// Attaches the body, replacing any previously attached one.
    pub fn attach_body(&self, body: &Rc<Vec<Statement>>) {
        *self.body.borrow_mut() = Rc::downgrade(body);
    }

    /// The analyzed body, while the declaration owning it is alive.
    pub fn body(&self) -> Option<Rc<Vec<Statement>>> {
        self.body.borrow().upgrade()
    }

    /// The function's signature. Untyped parameters and the unknown return
    /// type are `any`.
    pub fn ty(&self) -> Type {
        Type::function(
            self.parameters
                .iter()
                .map(|parameter| parameter.ty().unwrap_or(Type::Any))
                .collect(),
            self.return_type.clone().unwrap_or(Type::Any),
        )
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.parameters == other.parameters
            && self.return_type == other.return_type
    }
}

/// Anything a name can be bound to.
#[derive(Debug, Clone)]
pub enum Entity {
    Variable(Rc<Variable>),
    Function(Rc<Function>),
    Type(Type),
}

impl Entity {
    pub fn is_callable(&self) -> bool {
        matches!(self, Entity::Function(_) | Entity::Type(Type::Struct(_)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    FunctionDeclaration(FunctionDeclaration),
    VariableDeclaration {
        variable: Rc<Variable>,
        initializer: Expression,
    },
    VariableReassignment {
        variable: Rc<Variable>,
        value: Expression,
    },
    PredictiveLoop(PredictiveLoop),
    ComparisonStatement {
        left: Expression,
        right: Expression,
    },
    PrintStatement {
        expression: Expression,
    },
    ReturnStatement {
        expression: Expression,
    },
    YieldStatement {
        expression: Expression,
    },
    Call(CallExpression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Rc<Vec<Statement>>,
    pub function: Rc<Function>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictiveLoop {
    pub iterator: Rc<Variable>,
    pub low: Expression,
    pub high: Expression,
    /// Pattern tag such as `prime` or `fibonacci`, carried through uninterpreted.
    pub pattern_type: String,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    Function(Rc<Function>),
    Struct(Rc<StructType>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Callee,
    pub arguments: Vec<Expression>,
    pub ty: Option<Type>,
}

impl CallExpression {
    pub fn callee_name(&self) -> &str {
        match &self.callee {
            Callee::Function(function) => &function.name,
            Callee::Struct(structure) => &structure.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub ty: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Call(CallExpression),
    Binary(BinaryExpression),
    BooleanLiteral { value: bool },
    NumberLiteral { value: i64, ty: Type },
    StringLiteral { value: String, ty: Type },
    Variable(Rc<Variable>),
    FunctionReference(Rc<Function>),
}

impl Expression {
    /// The static type of the expression, `None` when undetermined.
    ///
    /// Boolean literals carry no type field but are always `boolean`.
    pub fn ty(&self) -> Option<Type> {
        match self {
            Expression::Call(call) => call.ty.clone(),
            Expression::Binary(binary) => binary.ty.clone(),
            Expression::BooleanLiteral { .. } => Some(Type::Bool),
            Expression::NumberLiteral { ty, .. } | Expression::StringLiteral { ty, .. } => {
                Some(ty.clone())
            }
            Expression::Variable(variable) => variable.ty.clone(),
            Expression::FunctionReference(function) => Some(function.ty()),
        }
    }
}
