//! Structured Feedback Module
//!
//! Machine-readable compiler output:
//! - JSON error reports with fix suggestions
//! - Compilation statistics

use serde::{Deserialize, Serialize};

use crate::utils::Error;

// ==================== Structured Error Report ====================

/// A structured error report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code (e.g., "E0001")
    pub code: String,

    /// Pipeline stage that failed
    pub stage: String,

    /// Human-readable message
    pub message: String,

    /// Location information
    pub location: Option<Location>,

    /// Suggested fixes
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Description of the fix
    pub message: String,

    /// The replacement text
    pub replacement: Option<String>,
}

// ==================== Compilation Feedback ====================

/// Complete compilation feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilationFeedback {
    /// Compilation status
    pub success: bool,

    /// Source file
    pub source_file: String,

    /// Errors (at most one, the pipeline stops at the first)
    pub diagnostics: Vec<ErrorReport>,

    /// Compilation statistics
    pub stats: CompilationStats,

    /// Generated code, when compilation got that far
    pub generated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationStats {
    /// Lexing time in microseconds
    pub lex_time_us: u64,

    /// Parse time
    pub parse_time_us: u64,

    /// Semantic analysis time
    pub semantic_time_us: u64,

    /// Code generation time
    pub codegen_time_us: u64,

    /// Total time
    pub total_time_us: u64,

    pub token_count: usize,
    pub statement_count: usize,
    pub record_count: usize,

    /// Lines of source
    pub loc: usize,
}

// ==================== Error Conversion ====================

impl ErrorReport {
    /// Create an error report from a compiler error
    pub fn from_error(error: &Error, file_name: &str) -> Self {
        let (code, suggestions) = generate_error_info(error);

        let location = error.span().map(|s| Location {
            file: file_name.to_string(),
            line: s.line,
            column: s.column,
            offset: s.start,
            length: s.len(),
        });

        Self {
            code: code.to_string(),
            stage: error.stage().to_string(),
            message: error.to_string(),
            location,
            suggestions,
        }
    }

    /// One-line rendering, `file:line:col: error[E0001]: message`
    pub fn render(&self) -> String {
        let mut out = match &self.location {
            Some(loc) => format!(
                "{}:{}:{}: error[{}]: {}",
                loc.file, loc.line, loc.column, self.code, self.message
            ),
            None => format!("error[{}]: {}", self.code, self.message),
        };
        for suggestion in &self.suggestions {
            out.push_str("\n  help: ");
            out.push_str(&suggestion.message);
        }
        out
    }
}

fn suggestion(message: impl Into<String>, replacement: Option<String>) -> Suggestion {
    Suggestion { message: message.into(), replacement }
}

/// Error code and fix suggestions for each error kind
fn generate_error_info(error: &Error) -> (&'static str, Vec<Suggestion>) {
    match error {
        Error::Lexical { character, .. } => (
            "E0001",
            vec![suggestion(
                format!("Remove '{}'; only words, integers, quoted strings, ',', '(', ')' and ':' are allowed", character),
                Some(String::new()),
            )],
        ),

        Error::UnexpectedToken { expected, got, .. } => {
            let mut suggestions = vec![suggestion(format!("Insert {} here", expected), None)];
            if got == "end of input" {
                suggestions.push(suggestion("The program ends in the middle of a statement", None));
            }
            ("E0002", suggestions)
        }

        Error::UndeclaredVariable { name, .. } => (
            "E0003",
            vec![
                suggestion(
                    format!("Only the first loop variable is declared; use it instead of '{}'", name),
                    None,
                ),
                suggestion("Replace the name with a literal", None),
            ],
        ),

        Error::UnsupportedStatement { kind, .. } => (
            "E0004",
            vec![suggestion(
                format!("{} is not supported here; write 'para <var> no ... : escreva ...'", kind),
                None,
            )],
        ),

        Error::UnsupportedExpression { kind, .. } => (
            "E0005",
            vec![suggestion(
                format!("{} cannot be nested; use an identifier or a literal", kind),
                None,
            )],
        ),

        Error::UnsupportedEntry { kind } => (
            "E0006",
            vec![suggestion(format!("Record kind '{}' is unknown; expected 'for_loop'", kind), None)],
        ),

        _ => ("E9999", Vec::new()),
    }
}

impl CompilationFeedback {
    /// Create a successful feedback
    pub fn success(source_file: String, stats: CompilationStats, generated: Option<String>) -> Self {
        Self {
            success: true,
            source_file,
            diagnostics: vec![],
            stats,
            generated,
        }
    }

    /// Create a failed feedback
    pub fn failure(source_file: String, error: &Error, stats: CompilationStats) -> Self {
        let report = ErrorReport::from_error(error, &source_file);
        Self {
            success: false,
            source_file,
            diagnostics: vec![report],
            stats,
            generated: None,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
