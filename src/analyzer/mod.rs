//! Semantic analysis.
//!
//! This module walks the parse tree and builds the typed intermediate
//! representation consumed by the optimizer and the code generator:
//!
//! - `types` - the closed set of types with equivalence, assignability and description
//! - `context` - the scope chain with its loop and function flags
//! - `ir` - entities (variables, functions) and the IR node shapes
//! - `analyzer` - the per-construct rules and the diagnostic gate
//!
//! Analysis is fail-fast: the first violated rule aborts the pass with a
//! located `Error` and no partial IR.

pub mod analyzer;
pub mod context;
pub mod ir;
pub mod types;
