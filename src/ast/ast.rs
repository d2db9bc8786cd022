use std::fmt::Display;

use crate::Span;

/// A node of the concrete parse tree.
///
/// Every node remembers the span it was parsed from, so the exact matched
/// text (`source_string`) and a location for diagnostics are always at hand.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    /// The raw text this node was parsed from.
    pub fn source_string(&self) -> &str {
        self.span.source_string()
    }

    /// The `Line N, col M:` prefix used in front of diagnostics about this node.
    pub fn location(&self) -> String {
        self.span.start.line_and_column_message()
    }
}

/// Node kinds, one per grammar construct.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Program(Vec<Node>),

    // Statements
    FunctionDefinition {
        name: Box<Node>,
        parameters: Vec<Node>,
        body: Vec<Node>,
    },
    PredictiveLoop {
        variable: Box<Node>,
        low: Box<Node>,
        high: Box<Node>,
        pattern: Box<Node>,
        body: Vec<Node>,
    },
    ComparisonStatement {
        left: Box<Node>,
        right: Box<Node>,
    },
    PrintStatement(Box<Node>),
    ReturnStatement(Box<Node>),
    YieldStatement(Box<Node>),
    VariableDeclaration {
        name: Box<Node>,
        initializer: Box<Node>,
    },
    VariableReassignment {
        name: Box<Node>,
        value: Box<Node>,
    },

    /// `name` or `name = default`
    Parameter {
        name: Box<Node>,
        default: Option<Box<Node>>,
    },

    /// `name = value` in an argument list
    KeywordArgument {
        name: Box<Node>,
        value: Box<Node>,
    },

    // Expressions
    Call {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    Binary {
        left: Box<Node>,
        operator: Box<Node>,
        right: Box<Node>,
    },
    Parenthesized(Box<Node>),
    Number,
    Str,
    True,
    False,
    Identifier,
    /// An operator token kept as a leaf so the analyzer reads its text.
    Operator,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program(_) => "Program",
            NodeKind::FunctionDefinition { .. } => "FunctionDefinition",
            NodeKind::PredictiveLoop { .. } => "PredictiveLoop",
            NodeKind::ComparisonStatement { .. } => "ComparisonStatement",
            NodeKind::PrintStatement(_) => "PrintStatement",
            NodeKind::ReturnStatement(_) => "ReturnStatement",
            NodeKind::YieldStatement(_) => "YieldStatement",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableReassignment { .. } => "VariableReassignment",
            NodeKind::Parameter { .. } => "Parameter",
            NodeKind::KeywordArgument { .. } => "KeywordArgument",
            NodeKind::Call { .. } => "Call",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::Parenthesized(_) => "Parenthesized",
            NodeKind::Number => "Number",
            NodeKind::Str => "String",
            NodeKind::True => "True",
            NodeKind::False => "False",
            NodeKind::Identifier => "Identifier",
            NodeKind::Operator => "Operator",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Renders a parse tree as an indented outline, one node per line.
pub fn outline(node: &Node) -> String {
    let mut result = String::new();
    write_outline(node, 0, &mut result);
    result
}

fn write_outline(node: &Node, depth: usize, result: &mut String) {
    result.push_str(&"  ".repeat(depth));
    match &node.kind {
        NodeKind::Number
        | NodeKind::Str
        | NodeKind::True
        | NodeKind::False
        | NodeKind::Identifier
        | NodeKind::Operator => {
            result.push_str(&format!("{} {}\n", node.kind, node.source_string()));
            return;
        }
        kind => result.push_str(&format!("{}\n", kind)),
    }

    for child in children(node) {
        write_outline(child, depth + 1, result);
    }
}

/// Direct children of a node in source order.
pub fn children(node: &Node) -> Vec<&Node> {
    match &node.kind {
        NodeKind::Program(statements) => statements.iter().collect(),
        NodeKind::FunctionDefinition { name, parameters, body } => std::iter::once(&**name)
            .chain(parameters.iter())
            .chain(body.iter())
            .collect(),
        NodeKind::PredictiveLoop { variable, low, high, pattern, body } => {
            vec![&**variable, &**low, &**high, &**pattern]
                .into_iter()
                .chain(body.iter())
                .collect()
        }
        NodeKind::ComparisonStatement { left, right } => vec![&**left, &**right],
        NodeKind::PrintStatement(expression)
        | NodeKind::ReturnStatement(expression)
        | NodeKind::YieldStatement(expression)
        | NodeKind::Parenthesized(expression) => vec![&**expression],
        NodeKind::VariableDeclaration { name, initializer } => vec![&**name, &**initializer],
        NodeKind::VariableReassignment { name, value }
        | NodeKind::KeywordArgument { name, value } => vec![&**name, &**value],
        NodeKind::Parameter { name, default } => std::iter::once(&**name)
            .chain(default.iter().map(|node| &**node))
            .collect(),
        NodeKind::Call { callee, arguments } => std::iter::once(&**callee)
            .chain(arguments.iter())
            .collect(),
        NodeKind::Binary { left, operator, right } => vec![&**left, &**operator, &**right],
        NodeKind::Number
        | NodeKind::Str
        | NodeKind::True
        | NodeKind::False
        | NodeKind::Identifier
        | NodeKind::Operator => vec![],
    }
}
