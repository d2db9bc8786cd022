//! Code generation module for the compiler.
//!
//! This module contains the code generator that transforms the analyzed IR
//! into JavaScript source. It handles:
//!
//! - Emission of statements with block indentation
//! - Emission of expressions, with binary expressions fully parenthesised
//! - Functions, which become generators when their body yields
//! - Predictive loops, emitted as counting loops tagged with their pattern

pub mod compiler;
pub mod expr;
pub mod stmt;
