//! Semantic Analysis for para
//!
//! Performs:
//! - Declaration-before-use checking of identifiers
//! - Narrowing the tree to the supported subset (top-level loops with a print body)
//! - Flattening each accepted loop into an [`AnalyzedRecord`]

use std::collections::HashSet;
use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::frontend::ast::*;
use crate::utils::{Error, Result};

/// Record kind tag for loops
pub const FOR_LOOP: &str = "for_loop";

// ==================== Analyzed Records ====================

/// A validated, flattened statement handed to code generation.
///
/// `kind` is a free-form tag so that records read back from JSON can carry
/// kinds the generator does not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    pub kind: String,
    pub variable: String,
    pub iterable: Expr,
    pub body: Stmt,
}

impl AnalyzedRecord {
    pub fn for_loop(variable: impl Into<String>, iterable: Expr, body: Stmt) -> Self {
        Self {
            kind: FOR_LOOP.to_string(),
            variable: variable.into(),
            iterable,
            body,
        }
    }
}

impl fmt::Display for AnalyzedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kind: {}, variable: {}, iterable: {}, body: {}",
            self.kind,
            self.variable,
            describe_expr(&self.iterable),
            describe_stmt(&self.body)
        )
    }
}

fn describe_expr(expr: &Expr) -> String {
    match expr {
        Expr::Range(r) => format!("RANGE({}, {})", describe_expr(&r.start), describe_expr(&r.end)),
        Expr::Print(p) => format!("PRINT({})", describe_expr(&p.expression)),
        leaf => format!("{}({})", leaf.kind_name(), leaf.literal_text().unwrap_or_default()),
    }
}

fn describe_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::ForLoop(f) => format!("FOR_LOOP({})", f.variable.name),
        Stmt::Print(p) => format!("PRINT({})", describe_expr(&p.expression)),
        Stmt::Range(r) => format!("RANGE({}, {})", describe_expr(&r.start), describe_expr(&r.end)),
    }
}

// ==================== Declared Variables ====================

/// Names considered declared during one analysis run.
///
/// While the set is empty, the first loop variable checked against it is
/// declared on the spot. After that every name must already be present.
#[derive(Debug, Default)]
pub struct DeclaredVariables {
    names: HashSet<String>,
}

impl DeclaredVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a loop-header variable, declaring it if nothing is declared yet.
    pub fn accept_loop_variable(&mut self, name: &str) -> bool {
        if self.names.is_empty() {
            trace!("auto-declaring first variable '{}'", name);
            self.names.insert(name.to_string());
            return true;
        }
        self.names.contains(name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn clear(&mut self) {
        self.names.clear();
    }
}

// ==================== Semantic Analyzer ====================

/// Semantic analyzer. State is reset at the start of every `analyze` call.
pub struct SemanticAnalyzer {
    declared: DeclaredVariables,
    records: Vec<AnalyzedRecord>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            declared: DeclaredVariables::new(),
            records: Vec::new(),
        }
    }

    /// Analyze a program
    pub fn analyze(&mut self, program: &Program) -> Result<Vec<AnalyzedRecord>> {
        self.declared.clear();
        self.records.clear();

        let outcome = program
            .statements
            .iter()
            .try_for_each(|stmt| self.analyze_stmt(stmt));

        self.declared.clear();
        let records = std::mem::take(&mut self.records);
        outcome?;

        debug!("analysis produced {} records", records.len());
        Ok(records)
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::ForLoop(f) => self.analyze_for_loop(f),
            Stmt::Print(_) | Stmt::Range(_) => Err(unsupported_statement(stmt)),
        }
    }

    fn analyze_for_loop(&mut self, for_loop: &ForLoop) -> Result<()> {
        let variable = &for_loop.variable;
        if !self.declared.accept_loop_variable(&variable.name) {
            return Err(Error::UndeclaredVariable {
                name: variable.name.clone(),
                span: variable.span,
            });
        }

        self.check_expr(&for_loop.iterable)?;
        self.check_body(&for_loop.body)?;

        trace!("accepted loop over '{}'", variable.name);
        self.records.push(AnalyzedRecord::for_loop(
            variable.name.clone(),
            for_loop.iterable.clone(),
            (*for_loop.body).clone(),
        ));
        Ok(())
    }

    fn check_body(&self, body: &Stmt) -> Result<()> {
        match body {
            Stmt::Print(p) => self.check_expr(&p.expression),
            Stmt::ForLoop(_) | Stmt::Range(_) => Err(unsupported_statement(body)),
        }
    }

    /// Every identifier reachable from `expr` must already be declared.
    fn check_expr(&self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Identifier(ident) => {
                if self.declared.is_declared(&ident.name) {
                    Ok(())
                } else {
                    Err(Error::UndeclaredVariable {
                        name: ident.name.clone(),
                        span: ident.span,
                    })
                }
            }
            Expr::Integer(_) | Expr::String(_) => Ok(()),
            Expr::Range(r) => {
                self.check_expr(&r.start)?;
                self.check_expr(&r.end)
            }
            Expr::Print(p) => self.check_expr(&p.expression),
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn unsupported_statement(stmt: &Stmt) -> Error {
    Error::UnsupportedStatement {
        kind: stmt.kind_name().to_string(),
        span: Some(stmt.span()),
    }
}

/// Analyze `program` with a fresh analyzer.
pub fn analyze(program: &Program) -> Result<Vec<AnalyzedRecord>> {
    SemanticAnalyzer::new().analyze(program)
}
