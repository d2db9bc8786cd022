/// AST module
/// Contains the parse tree handed from the parser to the analyzer
///
/// Submodules:
/// - ast: Parse tree nodes, their kinds, source text and locations
pub mod ast;
