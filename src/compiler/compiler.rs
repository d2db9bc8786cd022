//! Main compiler module.
//!
//! This module contains the Compiler structure that accumulates emitted
//! lines and decides the JavaScript name of every variable, and the
//! `generate` entry point that turns a whole program into JavaScript.

use std::{collections::HashMap, mem, rc::Rc};

use crate::analyzer::ir::{Program, Variable};

use super::stmt::gen_statement;

const INDENT: &str = "  ";

/// Output buffer and naming state for one program.
///
/// Holds the emitted lines and the current block depth; `emit` prefixes each
/// line with the indentation of that depth.
///
/// `scopes` mirrors the open JavaScript blocks, mapping each name bound in a
/// block to the name it was emitted as. A variable that would reuse a name
/// still visible from an enclosing block is emitted under a fresh one
/// (`x_1`), so an initializer like `x + 1` keeps reading the outer `x`.
#[derive(Debug)]
pub struct Compiler {
    lines: Vec<String>,
    depth: usize,
    scopes: Vec<HashMap<String, String>>,
    names: HashMap<*const Variable, String>,
    in_function: bool,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            lines: vec![],
            depth: 0,
            scopes: vec![HashMap::new()],
            names: HashMap::new(),
            in_function: false,
        }
    }

    /// Appends one line at the current depth.
    pub fn emit(&mut self, line: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", INDENT.repeat(self.depth), line.as_ref()));
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn open_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Closes the innermost block. The outermost one stays open.
    pub fn close_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Whether a `yield` here is inside an emitted function.
    pub fn in_function(&self) -> bool {
        self.in_function
    }

    /// Sets whether emission is inside a function, returning the old value.
    pub fn set_in_function(&mut self, in_function: bool) -> bool {
        mem::replace(&mut self.in_function, in_function)
    }

    fn is_visible(&self, emitted: &str) -> bool {
        self.scopes
            .iter()
            .any(|scope| scope.values().any(|name| name == emitted))
    }

    fn innermost(&mut self) -> &mut HashMap<String, String> {
        if self.scopes.is_empty() {
            self.scopes.push(HashMap::new());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Binds a function or parameter name in the innermost block as itself.
    pub fn bind(&mut self, name: &str) {
        self.innermost()
            .insert(String::from(name), String::from(name));
    }

    /// Binds a newly declared variable in the innermost block, returning the
    /// name to emit for it.
    pub fn declare(&mut self, variable: &Rc<Variable>) -> String {
        let mut emitted = variable.name.clone();
        let mut suffix = 0;
        while self.is_visible(&emitted) {
            suffix += 1;
            emitted = format!("{}_{}", variable.name, suffix);
        }

        self.innermost()
            .insert(variable.name.clone(), emitted.clone());
        self.names.insert(Rc::as_ptr(variable), emitted.clone());
        emitted
    }

    /// Rebinds a name of the innermost block to a reassigned variable, which
    /// keeps the emitted name it had there.
    pub fn rebind(&mut self, variable: &Rc<Variable>) -> String {
        let bound = self.innermost().get(&variable.name).cloned();
        match bound {
            Some(emitted) => {
                self.names.insert(Rc::as_ptr(variable), emitted.clone());
                emitted
            }
            None => self.declare(variable),
        }
    }

    /// The emitted name of a variable. Parameters are never declared here
    /// and keep their own name.
    pub fn name_of(&self, variable: &Rc<Variable>) -> String {
        self.names
            .get(&Rc::as_ptr(variable))
            .cloned()
            .unwrap_or_else(|| variable.name.clone())
    }

    /// Takes the lines emitted so far.
    pub fn take(&mut self) -> String {
        mem::take(&mut self.lines).join("\n")
    }
}

/// Emits JavaScript for a program.
///
/// Top-level statements are separated by a blank line and the output ends
/// with a newline, unless the program is empty.
pub fn generate(program: &Program) -> String {
    let mut compiler = Compiler::new();
    let chunks: Vec<String> = program
        .statements
        .iter()
        .map(|statement| {
            gen_statement(&mut compiler, statement);
            compiler.take()
        })
        .collect();

    if chunks.is_empty() {
        String::new()
    } else {
        format!("{}\n", chunks.join("\n\n"))
    }
}
