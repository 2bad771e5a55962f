//! AST Printer - tab-indented tree dump for `--emit ast`

use std::fmt::Write;

use crate::frontend::ast::*;

/// Pretty printer for the syntax tree
pub struct AstPrinter {
    output: String,
    indent: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Print a program to string
    pub fn print_program(&mut self, program: &Program) -> String {
        self.output.clear();
        self.indent = 0;

        self.line("PROGRAM", None);
        self.indent += 1;
        for stmt in &program.statements {
            self.print_stmt(stmt);
        }
        self.indent -= 1;

        std::mem::take(&mut self.output)
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::ForLoop(f) => {
                self.line(stmt.kind_name(), Some(&f.variable.name));
                self.indent += 1;
                self.print_expr(&f.iterable);
                self.print_stmt(&f.body);
                self.indent -= 1;
            }
            Stmt::Print(p) => self.print_print(p),
            Stmt::Range(r) => self.print_range(r),
        }
    }

    fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Range(r) => self.print_range(r),
            Expr::Print(p) => self.print_print(p),
            leaf => self.line(leaf.kind_name(), leaf.literal_text()),
        }
    }

    fn print_print(&mut self, print: &Print) {
        self.line("PRINT", None);
        self.indent += 1;
        self.print_expr(&print.expression);
        self.indent -= 1;
    }

    fn print_range(&mut self, range: &Range) {
        self.line("RANGE", None);
        self.indent += 1;
        self.print_expr(&range.start);
        self.print_expr(&range.end);
        self.indent -= 1;
    }

    fn line(&mut self, tag: &str, value: Option<&str>) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
        self.output.push_str(tag);
        if let Some(value) = value {
            let _ = write!(self.output, " ({})", value);
        }
        self.output.push('\n');
    }
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `program` as an indented tree
pub fn print_ast(program: &Program) -> String {
    AstPrinter::new().print_program(program)
}
