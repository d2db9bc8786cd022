#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    analyzer::{analyzer::analyze, ir::Program},
    ast::ast::Node,
    compiler::compiler::generate,
    errors::errors::Error,
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
};

pub mod analyzer;
pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod optimizer;
pub mod parser;

extern crate regex;

/// The text of one compilation unit, with the byte offset of every line start
/// so positions can be turned into line/column pairs.
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Rc<Self> {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(index, _)| index + 1));

        Rc::new(SourceFile {
            name: name.into(),
            text,
            line_starts,
        })
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the 1-based `line` without its terminator, or an empty string
    /// when the line does not exist.
    pub fn line_text(&self, line: usize) -> &str {
        if line == 0 || line > self.line_starts.len() {
            return "";
        }

        let start = self.line_starts[line - 1];
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len());

        self.text[start..end].trim_end_matches(['\n', '\r'])
    }

    pub fn position(self: &Rc<Self>, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        let column = self.text[self.line_starts[line]..offset].chars().count() + 1;

        Position {
            offset: offset as u32,
            line: line as u32 + 1,
            column: column as u32,
            file: Rc::clone(self),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub file: Rc<SourceFile>,
}

impl Position {
    pub fn null() -> Self {
        SourceFile::new("<null>", "").position(0)
    }

    /// Renders the location prefix put in front of every diagnostic:
    ///
    /// ```text
    /// Line 2, col 5:
    ///   1 | let x = 1
    /// > 2 | let x = 2
    ///     |     ^
    ///   3 | print x
    /// ```
    pub fn line_and_column_message(&self) -> String {
        let line = self.line as usize;
        let last_line = (line + 1).min(self.file.line_count());
        let width = last_line.to_string().len();
        let caret = self.column as usize;

        let mut message = format!("Line {}, col {}:\n", self.line, self.column);
        if line > 1 {
            message.push_str(&format!(
                "  {:>width$} | {}\n",
                line - 1,
                self.file.line_text(line - 1)
            ));
        }
        message.push_str(&format!(
            "> {:>width$} | {}\n",
            line,
            self.file.line_text(line)
        ));
        message.push_str(&format!("  {:>width$} | {:>caret$}\n", "", "^"));
        if line < self.file.line_count() {
            message.push_str(&format!(
                "  {:>width$} | {}\n",
                line + 1,
                self.file.line_text(line + 1)
            ));
        }

        message
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// The exact source text covered by this span.
    pub fn source_string(&self) -> &str {
        &self.start.file.text[self.start.offset as usize..self.end.offset as usize]
    }
}

/// Tokenizes and parses `source` into a parse tree.
pub fn parse_source(source: &str, file_name: &str) -> Result<Node, Error> {
    let file = SourceFile::new(file_name, source);
    let tokens = tokenize(&file)?;
    parse(tokens, file)
}

/// Runs the front end up to and including semantic analysis.
pub fn analyze_source(source: &str, file_name: &str) -> Result<Program, Error> {
    let tree = parse_source(source, file_name)?;
    analyze(&tree)
}

/// Runs the full pipeline and returns the emitted JavaScript.
pub fn compile(source: &str, file_name: &str, should_optimize: bool) -> Result<String, Error> {
    let mut program = analyze_source(source, file_name)?;
    if should_optimize {
        program = optimize(program);
    }

    Ok(generate(&program))
}
