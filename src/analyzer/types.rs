use std::{fmt::Display, rc::Rc};

/// A nominal struct type. Two struct types are the same type only when they
/// are the same allocation, whatever their names.
#[derive(Debug)]
pub struct StructType {
    pub name: String,
}

impl StructType {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(StructType { name: name.into() })
    }
}

impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

#[derive(Debug, Clone)]
pub enum Type {
    Int,
    Float,
    String,
    Bool,
    Void,
    Any,
    Struct(Rc<StructType>),
    Function { params: Vec<Type>, ret: Box<Type> },
    Array(Box<Type>),
    Optional(Box<Type>),
}

impl Type {
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Function {
            params,
            ret: Box::new(ret),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }
}

/// Whether two types are interchangeable.
///
/// Primitives compare by kind, structs by identity, and arrays, optionals
/// and functions structurally.
pub fn equivalent(t1: &Type, t2: &Type) -> bool {
    match (t1, t2) {
        (Type::Int, Type::Int)
        | (Type::Float, Type::Float)
        | (Type::String, Type::String)
        | (Type::Bool, Type::Bool)
        | (Type::Void, Type::Void)
        | (Type::Any, Type::Any) => true,
        (Type::Struct(a), Type::Struct(b)) => Rc::ptr_eq(a, b),
        (Type::Array(a), Type::Array(b)) | (Type::Optional(a), Type::Optional(b)) => {
            equivalent(a, b)
        }
        (
            Type::Function { params: p1, ret: r1 },
            Type::Function { params: p2, ret: r2 },
        ) => {
            equivalent(r1, r2)
                && p1.len() == p2.len()
                && p1.iter().zip(p2).all(|(a, b)| equivalent(a, b))
        }
        _ => false,
    }
}

/// Whether a value of type `from` may be used where `to` is expected.
///
/// Everything is assignable to `any`. Function types are covariant in their
/// return type and contravariant in their parameter types.
pub fn assignable(from: &Type, to: &Type) -> bool {
    if matches!(to, Type::Any) || equivalent(from, to) {
        return true;
    }

    match (from, to) {
        (
            Type::Function { params: from_params, ret: from_ret },
            Type::Function { params: to_params, ret: to_ret },
        ) => {
            assignable(from_ret, to_ret)
                && from_params.len() == to_params.len()
                && to_params
                    .iter()
                    .zip(from_params)
                    .all(|(to_param, from_param)| assignable(to_param, from_param))
        }
        _ => false,
    }
}

/// Renders a type the way diagnostics show it: `int`, `Point`,
/// `(int, string)->boolean`, `[int]`, `string?`.
pub fn describe(ty: &Type) -> String {
    match ty {
        Type::Int => String::from("int"),
        Type::Float => String::from("float"),
        Type::String => String::from("string"),
        Type::Bool => String::from("boolean"),
        Type::Void => String::from("void"),
        Type::Any => String::from("any"),
        Type::Struct(structure) => structure.name.clone(),
        Type::Function { params, ret } => {
            let params: Vec<String> = params.iter().map(describe).collect();
            format!("({})->{}", params.join(", "), describe(ret))
        }
        Type::Array(base) => format!("[{}]", describe(base)),
        Type::Optional(base) => format!("{}?", describe(base)),
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        equivalent(self, other)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", describe(self))
    }
}
