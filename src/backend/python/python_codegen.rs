//! Python Code Generator
//!
//! Renders analyzed records as Python 3 source.

use log::debug;

use crate::backend::codegen::CodeGen;
use crate::frontend::ast::{Expr, Stmt};
use crate::frontend::semantic::{AnalyzedRecord, FOR_LOOP};
use crate::utils::{Error, Result};

const INDENT: &str = "    ";

/// Python code generator
pub struct PythonCodeGen {
    lines: Vec<String>,
}

impl PythonCodeGen {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn generate_entry(&mut self, record: &AnalyzedRecord) -> Result<()> {
        match record.kind.as_str() {
            FOR_LOOP => self.generate_for_loop(record),
            other => Err(Error::UnsupportedEntry { kind: other.to_string() }),
        }
    }

    fn generate_for_loop(&mut self, record: &AnalyzedRecord) -> Result<()> {
        let iterable = self.render_iterable(&record.iterable)?;
        let body = self.render_body(&record.body)?;
        self.lines.push(format!("for {} in {}:", record.variable, iterable));
        self.lines.push(body);
        Ok(())
    }

    fn render_iterable(&self, expr: &Expr) -> Result<String> {
        match expr {
            Expr::Range(r) => Ok(format!(
                "range({}, {})",
                self.render_leaf(&r.start)?,
                self.render_leaf(&r.end)?
            )),
            other => self.render_leaf(other),
        }
    }

    fn render_body(&self, body: &Stmt) -> Result<String> {
        match body {
            Stmt::Print(p) => Ok(format!("{}print({})", INDENT, self.render_leaf(&p.expression)?)),
            other => Err(Error::UnsupportedStatement {
                kind: other.kind_name().to_string(),
                span: Some(other.span()),
            }),
        }
    }

    /// Identifiers and literals render as their source text; nothing else nests.
    fn render_leaf(&self, expr: &Expr) -> Result<String> {
        expr.literal_text()
            .map(str::to_string)
            .ok_or_else(|| Error::UnsupportedExpression {
                kind: expr.kind_name().to_string(),
                span: Some(expr.span()),
            })
    }
}

impl Default for PythonCodeGen {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGen for PythonCodeGen {
    fn generate(&mut self, records: &[AnalyzedRecord]) -> Result<String> {
        self.lines.clear();
        for record in records {
            self.generate_entry(record)?;
        }
        debug!("generated {} lines of python", self.lines.len());
        Ok(std::mem::take(&mut self.lines).join("\n"))
    }

    fn name(&self) -> &str {
        "python"
    }
}

/// Render `records` as Python source with a fresh generator.
pub fn generate(records: &[AnalyzedRecord]) -> Result<String> {
    PythonCodeGen::new().generate(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::{Ident, Literal, Print, Range};
    use crate::frontend::{lexer::scan, parser::parse, semantic::analyze};
    use crate::utils::Span;
    use pretty_assertions::assert_eq;

    fn generate_src(source: &str) -> Result<String> {
        generate(&analyze(&parse(scan(source)?)?)?)
    }

    fn int(text: &str) -> Expr {
        Expr::Integer(Literal::new(text, Span::dummy()))
    }

    fn print_of(expr: Expr) -> Stmt {
        Stmt::Print(Print { expression: Box::new(expr), span: Span::dummy() })
    }

    fn range_of(start: Expr, end: Expr) -> Range {
        Range { start: Box::new(start), end: Box::new(end), span: Span::dummy() }
    }

    #[test]
    fn test_single_argument_range() {
        let code = generate_src("para x no intervalo 5 : escreva x").unwrap();
        assert_eq!(code, "for x in range(0, 5):\n    print(x)");
    }

    #[test]
    fn test_two_argument_range() {
        let code = generate_src("para i no intervalo 1 , 10 : escreva i").unwrap();
        assert_eq!(code, "for i in range(1, 10):\n    print(i)");
    }

    #[test]
    fn test_string_body_keeps_quotes() {
        let code = generate_src("para i no intervalo (2, 4) : escreva 'oi'").unwrap();
        assert_eq!(code, "for i in range(2, 4):\n    print('oi')");
    }

    #[test]
    fn test_records_joined_without_trailing_newline() {
        let code = generate_src(
            "para i no intervalo 2 : escreva i para i no intervalo 3 : escreva \"x\"",
        )
        .unwrap();
        assert_eq!(
            code,
            "for i in range(0, 2):\n    print(i)\nfor i in range(0, 3):\n    print(\"x\")"
        );
    }

    #[test]
    fn test_no_records_generate_empty_text() {
        assert_eq!(generate(&[]).unwrap(), "");
    }

    #[test]
    fn test_string_iterable() {
        let record = AnalyzedRecord::for_loop(
            "c",
            Expr::String(Literal::new("'abc'", Span::dummy())),
            print_of(Expr::Identifier(Ident::new("c", Span::dummy()))),
        );
        assert_eq!(generate(&[record]).unwrap(), "for c in 'abc':\n    print(c)");
    }

    #[test]
    fn test_unknown_entry_kind() {
        let mut record = AnalyzedRecord::for_loop("i", int("3"), print_of(int("1")));
        record.kind = "while_loop".to_string();
        let err = generate(&[record]).unwrap_err();
        assert_eq!(err, Error::UnsupportedEntry { kind: "while_loop".to_string() });
    }

    #[test]
    fn test_nested_range_bound_is_unsupported() {
        let nested = Expr::Range(range_of(int("0"), int("2")));
        let record = AnalyzedRecord::for_loop(
            "i",
            Expr::Range(range_of(int("0"), nested)),
            print_of(int("1")),
        );
        let err = generate(&[record]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedExpression { ref kind, .. } if kind == "RANGE"));
    }

    #[test]
    fn test_print_of_range_is_unsupported() {
        let err = generate_src("para i no intervalo 2 : escreva intervalo 0 : 1").unwrap_err();
        assert!(matches!(err, Error::UnsupportedExpression { ref kind, .. } if kind == "RANGE"));
    }

    #[test]
    fn test_non_print_body_is_unsupported() {
        let body = Stmt::Range(range_of(int("0"), int("1")));
        let record = AnalyzedRecord::for_loop("i", int("3"), body);
        let err = generate(&[record]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedStatement { ref kind, .. } if kind == "RANGE"));
    }

    #[test]
    fn test_records_from_json() {
        let json = r#"[{
            "kind": "for_loop",
            "variable": "n",
            "iterable": {"node": "range",
                         "start": {"node": "integer", "text": "1"},
                         "end": {"node": "integer", "text": "3"}},
            "body": {"node": "print", "expression": {"node": "identifier", "name": "n"}}
        }]"#;
        let records: Vec<AnalyzedRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(generate(&records).unwrap(), "for n in range(1, 3):\n    print(n)");
    }
}
