//! IR-to-IR optimization.
//!
//! A best-effort pass that folds constant subexpressions. It keeps the IR
//! shapes produced by the analyzer and never changes the meaning of the
//! emitted program.

pub mod optimizer;
