//! Compilation driver
//!
//! Runs the stages strictly in order: text -> tokens -> AST -> records -> code.
//! Each stage finishes before the next starts and the first error stops the run.

use std::time::Instant;

use log::info;

use crate::backend::{CodeGen, PythonCodeGen};
use crate::feedback::CompilationStats;
use crate::frontend::ast::Program;
use crate::frontend::lexer::Lexer;
use crate::frontend::parser::Parser;
use crate::frontend::semantic::{AnalyzedRecord, SemanticAnalyzer};
use crate::frontend::token::Token;
use crate::utils::Result;

/// Everything one pipeline run produced
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    pub records: Vec<AnalyzedRecord>,
    /// `None` when the run stopped after analysis
    pub code: Option<String>,
    pub stats: CompilationStats,
}

/// Pipeline over a code generator
pub struct Compiler<G: CodeGen> {
    codegen: G,
}

impl Compiler<PythonCodeGen> {
    pub fn python() -> Self {
        Self::new(PythonCodeGen::new())
    }
}

impl<G: CodeGen> Compiler<G> {
    pub fn new(codegen: G) -> Self {
        Self { codegen }
    }

    /// Lex, parse and analyze without generating code
    pub fn check(&mut self, source: &str) -> Result<Compilation> {
        let total = Instant::now();
        let mut stats = CompilationStats {
            loc: source.lines().count(),
            ..CompilationStats::default()
        };

        let started = Instant::now();
        let tokens = Lexer::new(source)?.scan()?;
        stats.lex_time_us = elapsed_us(started);
        stats.token_count = tokens.len();

        let started = Instant::now();
        let program = Parser::from_tokens(tokens.clone()).parse_program()?;
        stats.parse_time_us = elapsed_us(started);
        stats.statement_count = program.statements.len();

        let started = Instant::now();
        let records = SemanticAnalyzer::new().analyze(&program)?;
        stats.semantic_time_us = elapsed_us(started);
        stats.record_count = records.len();

        stats.total_time_us = elapsed_us(total);
        Ok(Compilation { tokens, program, records, code: None, stats })
    }

    /// Run the whole pipeline
    pub fn compile(&mut self, source: &str) -> Result<Compilation> {
        let mut compilation = self.check(source)?;

        let started = Instant::now();
        let code = self.codegen.generate(&compilation.records)?;
        compilation.stats.codegen_time_us = elapsed_us(started);
        compilation.stats.total_time_us += compilation.stats.codegen_time_us;

        info!(
            "{} backend: {} records -> {} bytes",
            self.codegen.name(),
            compilation.records.len(),
            code.len()
        );
        compilation.code = Some(code);
        Ok(compilation)
    }

    /// Render records that were analyzed elsewhere
    pub fn generate(&mut self, records: &[AnalyzedRecord]) -> Result<String> {
        self.codegen.generate(records)
    }
}

fn elapsed_us(started: Instant) -> u64 {
    started.elapsed().as_micros() as u64
}

/// Translate `source` to Python in one call.
pub fn compile(source: &str) -> Result<String> {
    let compilation = Compiler::python().compile(source)?;
    Ok(compilation.code.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Error;

    #[test]
    fn test_compile_collects_every_stage() {
        let compilation = Compiler::python()
            .compile("para x no intervalo 5 : escreva x")
            .unwrap();
        assert_eq!(compilation.tokens.len(), 8);
        assert_eq!(compilation.program.statements.len(), 1);
        assert_eq!(compilation.records.len(), 1);
        assert_eq!(compilation.code.as_deref(), Some("for x in range(0, 5):\n    print(x)"));
        assert_eq!(compilation.stats.token_count, 8);
        assert_eq!(compilation.stats.record_count, 1);
        assert_eq!(compilation.stats.loc, 1);
    }

    #[test]
    fn test_check_stops_before_codegen() {
        let compilation = Compiler::python().check("para x no intervalo 5 : escreva x").unwrap();
        assert!(compilation.code.is_none());
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(compile("").unwrap(), "");
    }

    #[test]
    fn test_first_error_stops_the_run() {
        let err = compile("para x no intervalo 5 : escreva z #").unwrap_err();
        assert!(matches!(err, Error::Lexical { .. }));
    }
}
